use anyhow::{Context, Result};
use std::path::PathBuf;

use pixgear::gear::GearExporter;
use pixgear::geometry::{DetectorIdRegistry, GeometryConfig};

/// Export only the GEAR geometry file, numbering detectors in file order
pub fn run(geometry: PathBuf, output: PathBuf, detector_name: String) -> Result<()> {
    let manager = GeometryConfig::from_file(&geometry)
        .and_then(|config| config.build())
        .with_context(|| format!("Failed to load geometry from {}", geometry.display()))?;
    let registry = DetectorIdRegistry::sequential(manager.detectors().iter().map(|d| d.name()))?;

    GearExporter::new(detector_name)
        .export(&manager, &registry, &output)
        .context("Failed to export geometry")?;
    println!(
        "Wrote {} layers to {}",
        registry.len(),
        output.display()
    );

    Ok(())
}
