use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use pixgear::geometry::GeometryConfig;
use pixgear::writer::{EventCollectionWriter, WriterConfig};

use super::config::Config;
use super::hits::HitTable;

/// Write CSV pixel hits into an event store and export the geometry
pub fn run(
    geometry: PathBuf,
    hits: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    geometry_output: Option<PathBuf>,
) -> Result<()> {
    let mut writer_config = match &config {
        Some(path) => Config::from_file(path)?.writer,
        None => WriterConfig::default(),
    };
    if let Some(output) = output {
        writer_config.file_name = output;
    }
    if let Some(path) = geometry_output {
        writer_config.geometry_file = Some(path);
    }

    let geometry = GeometryConfig::from_file(&geometry)
        .and_then(|config| config.build())
        .with_context(|| format!("Failed to load geometry from {}", geometry.display()))?;
    let table = HitTable::from_file(&hits)?;

    info!("Geometry: {} detectors", geometry.detectors().len());
    info!("Hits:     {} from {}", table.hit_count(), hits.display());
    info!("Output:   {}", writer_config.file_name.display());

    let mut writer = EventCollectionWriter::initialize(writer_config, &geometry)
        .context("Failed to initialize event writer")?;

    if let Some((first, last)) = table.event_range() {
        for event in first..=last {
            writer
                .run(event, table.messages(event))
                .with_context(|| format!("Failed to write event {event}"))?;
        }
    }

    let stats = writer
        .finalize(&geometry)
        .context("Failed to finalize event writer")?;
    println!("{stats}");

    Ok(())
}
