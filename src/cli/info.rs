use anyhow::{Context, Result};
use std::path::PathBuf;

use pixgear::reader::EventStoreReader;

/// Display information about an event store
pub fn run(file: PathBuf, events: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = EventStoreReader::open(&file).context("Failed to read event store")?;
    let metadata = reader.metadata();

    println!("pixgear Event Store");
    println!("===================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Format version: {}", metadata.format_version);
    if let Some(converter) = &metadata.converter_info {
        println!("  Written by: {converter}");
    }
    if let Some(timestamp) = &metadata.creation_timestamp {
        println!("  Created: {timestamp}");
    }
    println!("  Row groups: {}", metadata.num_row_groups);
    println!("  Total rows: {}", metadata.total_rows);
    println!();

    println!("Run:");
    println!("  Run number: {}", metadata.footer.run_number);
    println!("  Detector: {}", metadata.footer.detector_name);
    println!("  Collections:");
    for (name, encoding) in &metadata.footer.collection_encodings {
        println!("    {name}: {encoding}");
    }
    println!();

    let records = reader.read_events().context("Failed to read events")?;
    let hits: usize = records.iter().map(|r| r.entry_count()).sum();
    println!("Events: {} ({} hits)", records.len(), hits);

    if events {
        for record in &records {
            let sizes: Vec<String> = record
                .collections
                .iter()
                .map(|c| format!("{}={}", c.name(), c.len()))
                .collect();
            println!("  {:8} {}", record.event_number, sizes.join(" "));
        }
    }

    Ok(())
}
