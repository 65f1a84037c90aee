use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::event::{
    CellEntry, CollectionKind, EventRecord, HitCollection, PixelHitMessage, MC_TRUTH_COLLECTIONS,
};
use crate::gear::GearExporter;
use crate::geometry::GeometryManager;

use super::config::{ChannelMap, WriterConfig};
use super::error::WriterError;
use super::metadata::FooterMetadata;
use super::stats::WriterStats;
use super::store::EventStoreWriter;

/// Per-event writer turning pixel hits into typed, cell-ID encoded collections.
///
/// Lifecycle: [`initialize`](Self::initialize) once, [`run`](Self::run) per
/// event in increasing event-number order, [`finalize`](Self::finalize) once.
/// All calls are sequential; the writer owns its output file exclusively.
pub struct EventCollectionWriter {
    config: WriterConfig,
    channels: ChannelMap,
    store: EventStoreWriter<File>,
    last_event: Option<u64>,
    hits_written: usize,
}

impl EventCollectionWriter {
    /// Validate the configuration, resolve channels and open the event store
    pub fn initialize(config: WriterConfig, geometry: &GeometryManager) -> Result<Self, WriterError> {
        let layout = config.channel_layout()?;
        config.compression()?;
        let channels = ChannelMap::resolve(&layout, geometry, config.pixel_type)?;
        if config.dump_mc_truth {
            channels.check_mc_truth_names()?;
        }

        create_parent_dir(&config.file_name)?;
        if let Some(path) = config.geometry_output() {
            create_parent_dir(path)?;
        }

        let metadata = FooterMetadata {
            run_number: config.run_number,
            detector_name: config.detector_name.clone(),
            collection_encodings: channels.collection_encodings(),
        };
        let store = EventStoreWriter::new_file(&config.file_name, &metadata, &config)?;

        info!(
            "Writing events of {} detectors into {} collection(s) in {}",
            channels.registry().len(),
            channels.channels().len(),
            config.file_name.display()
        );

        Ok(Self {
            config,
            channels,
            store,
            last_event: None,
            hits_written: 0,
        })
    }

    /// Encode and write one event; `None` writes the event with empty collections
    pub fn run(
        &mut self,
        event_number: u64,
        messages: Option<&[PixelHitMessage]>,
    ) -> Result<(), WriterError> {
        if let Some(last) = self.last_event {
            if event_number <= last {
                return Err(WriterError::Referential(format!(
                    "event {event_number} follows event {last}"
                )));
            }
        }

        let mut collections: Vec<HitCollection> = self
            .channels
            .channels()
            .iter()
            .map(|channel| {
                HitCollection::new(channel.name(), CollectionKind::TrackerData)
                    .with_encoding(channel.encoder().encoding().descriptor())
            })
            .collect();

        let mut hits = 0;
        for message in messages.unwrap_or_default() {
            let (index, sensor_id) = self.channels.route(&message.detector)?;
            let encoder = self.channels.channels()[index].encoder();
            for hit in &message.hits {
                collections[index].push(CellEntry {
                    cell_id: encoder.encode(sensor_id, hit.x, hit.y)?,
                    x: hit.x,
                    y: hit.y,
                    signal: hit.signal,
                    time: hit.local_time,
                    global_time: hit.global_time,
                });
            }
            hits += message.hits.len();
        }

        let mut record = EventRecord::new(self.config.run_number, event_number);
        for collection in collections {
            record.add_collection(collection);
        }
        if self.config.dump_mc_truth {
            for (name, kind) in MC_TRUTH_COLLECTIONS {
                record.add_collection(HitCollection::new(name, kind));
            }
        }

        self.store.write_event(&record)?;
        debug!(
            "Event {event_number}: {hits} hits in {} collections",
            record.collections.len()
        );

        self.last_event = Some(event_number);
        self.hits_written += hits;
        Ok(())
    }

    /// Close the event store, then export the geometry file if configured
    pub fn finalize(self, geometry: &GeometryManager) -> Result<WriterStats, WriterError> {
        let store_stats = self.store.finish()?;
        let file_size_bytes = fs::metadata(&self.config.file_name)
            .map_err(|source| WriterError::FileError {
                path: self.config.file_name.clone(),
                source,
            })?
            .len();

        let geometry_file = match self.config.geometry_output() {
            Some(path) => {
                GearExporter::new(&self.config.detector_name).export(
                    geometry,
                    self.channels.registry(),
                    path,
                )?;
                Some(path.to_path_buf())
            }
            None => None,
        };

        let stats = WriterStats {
            events_written: store_stats.events_written,
            collections_written: store_stats.collections_written,
            hits_written: self.hits_written,
            row_groups_written: store_stats.row_groups_written,
            file_size_bytes,
            geometry_file,
        };
        info!("{stats}");
        Ok(stats)
    }

    /// The resolved channel table
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Event store path
    pub fn output_path(&self) -> &Path {
        &self.config.file_name
    }

    /// Number of events written so far
    pub fn events_written(&self) -> usize {
        self.store.events_written()
    }
}

fn create_parent_dir(path: &Path) -> Result<(), WriterError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| WriterError::FileError {
                path: PathBuf::from(parent),
                source,
            })
        }
        _ => Ok(()),
    }
}
