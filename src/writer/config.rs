use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;
use serde::{Deserialize, Serialize};

use crate::event::{PixelCellEncoder, DEFAULT_PIXEL_TYPE, DEFAULT_RUN_NUMBER, MC_TRUTH_COLLECTIONS};
use crate::gear::DEFAULT_DETECTOR_NAME;
use crate::geometry::{DetectorIdRegistry, GeometryManager};

use super::error::WriterError;
use super::schema::LIST_COLUMNS;

/// Collection used when no naming mode is configured
pub const DEFAULT_COLLECTION_NAME: &str = "zsdata_m26";

/// Event store written when no file name is configured
pub const DEFAULT_OUTPUT_FILE: &str = "output.pixgear.parquet";

/// Geometry file written when none is configured
pub const DEFAULT_GEOMETRY_FILE: &str = "output_geometry.xml";

/// Explicit placement of one detector into a named collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorAssignment {
    /// Detector name in the geometry
    pub detector: String,
    /// Collection receiving the detector's hits
    pub collection: String,
    /// Sensor ID written into cell IDs and the geometry file
    pub sensor_id: u32,
}

/// Configuration for the event collection writer.
///
/// Loaded from the `[writer]` table of a TOML file; every key is optional:
///
/// ```toml
/// [writer]
/// file_name = "run42.pixgear.parquet"
/// geometry_file = "run42_geometry.xml"
/// dump_mc_truth = true
///
/// [[writer.detector_assignment]]
/// detector = "telescope0"
/// collection = "zsdata_m26"
/// sensor_id = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Event store path
    pub file_name: PathBuf,

    /// Geometry file path; an empty path disables the export
    pub geometry_file: Option<PathBuf>,

    /// Detector setup label written into the geometry file and footer
    pub detector_name: String,

    /// Sparse pixel type stamped into every cell ID
    pub pixel_type: u32,

    /// Write the four Monte-Carlo truth collections with every event
    pub dump_mc_truth: bool,

    /// Run number of every event
    pub run_number: u32,

    /// Single collection receiving all hits
    pub output_collection_name: Option<String>,

    /// Per-detector collections and sensor IDs
    pub detector_assignment: Option<Vec<DetectorAssignment>>,

    /// ZSTD compression level
    pub compression_level: i32,

    /// Close a row group after every event
    pub flush_each_event: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from(DEFAULT_OUTPUT_FILE),
            geometry_file: Some(PathBuf::from(DEFAULT_GEOMETRY_FILE)),
            detector_name: DEFAULT_DETECTOR_NAME.to_string(),
            pixel_type: DEFAULT_PIXEL_TYPE,
            dump_mc_truth: false,
            run_number: DEFAULT_RUN_NUMBER,
            output_collection_name: None,
            detector_assignment: None,
            compression_level: 3,
            flush_each_event: true,
        }
    }
}

impl WriterConfig {
    /// Resolve the collection naming mode.
    ///
    /// Setting both `output_collection_name` and `detector_assignment` is an
    /// error; setting neither selects a single collection named
    /// [`DEFAULT_COLLECTION_NAME`].
    pub fn channel_layout(&self) -> Result<ChannelLayout, WriterError> {
        match (&self.output_collection_name, &self.detector_assignment) {
            (Some(_), Some(_)) => Err(WriterError::Config(
                "output_collection_name and detector_assignment are mutually exclusive".to_string(),
            )),
            (Some(name), None) => Ok(ChannelLayout::Single(name.clone())),
            (None, Some(assignments)) => Ok(ChannelLayout::PerDetector(assignments.clone())),
            (None, None) => Ok(ChannelLayout::Single(DEFAULT_COLLECTION_NAME.to_string())),
        }
    }

    /// Geometry file to export, if enabled
    pub fn geometry_output(&self) -> Option<&Path> {
        self.geometry_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// ZSTD compression at the configured level
    pub fn compression(&self) -> Result<Compression, WriterError> {
        let level = ZstdLevel::try_new(self.compression_level).map_err(|e| {
            WriterError::Config(format!("compression_level {}: {e}", self.compression_level))
        })?;
        Ok(Compression::ZSTD(level))
    }

    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> Result<WriterProperties, WriterError> {
        let mut builder = WriterProperties::builder()
            .set_compression(self.compression()?)
            .set_statistics_enabled(EnabledStatistics::Chunk);

        // Per-pixel values are high-cardinality
        for col in LIST_COLUMNS {
            builder = builder.set_column_dictionary_enabled(
                ColumnPath::new(vec![col.to_string(), "list".to_string(), "item".to_string()]),
                false,
            );
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        Ok(builder.set_key_value_metadata(Some(kv_metadata)).build())
    }
}

/// Collection naming mode, resolved once at initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Every detector writes into one collection; sensor IDs follow geometry order
    Single(String),
    /// Explicit collection and sensor ID per detector
    PerDetector(Vec<DetectorAssignment>),
}

/// One output collection with its cell ID encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChannel {
    name: String,
    encoder: PixelCellEncoder,
}

impl OutputChannel {
    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoder for the collection's cell IDs
    pub fn encoder(&self) -> &PixelCellEncoder {
        &self.encoder
    }
}

/// Lookup table from detector name to output channel and sensor ID.
///
/// Immutable once resolved; every detector of the geometry is routed.
#[derive(Debug, Clone)]
pub struct ChannelMap {
    registry: DetectorIdRegistry,
    channels: Vec<OutputChannel>,
    routes: HashMap<String, usize>,
}

impl ChannelMap {
    /// Resolve a layout against the geometry
    pub fn resolve(
        layout: &ChannelLayout,
        geometry: &GeometryManager,
        pixel_type: u32,
    ) -> Result<Self, WriterError> {
        let encoder = PixelCellEncoder::new(pixel_type)
            .map_err(|e| WriterError::Config(format!("pixel_type {pixel_type}: {e}")))?;
        let channel = |name: &str| -> Result<OutputChannel, WriterError> {
            if name.trim().is_empty() {
                return Err(WriterError::Config("collection name is empty".to_string()));
            }
            Ok(OutputChannel {
                name: name.to_string(),
                encoder: encoder.clone(),
            })
        };

        let map = match layout {
            ChannelLayout::Single(name) => {
                let registry =
                    DetectorIdRegistry::sequential(geometry.detectors().iter().map(|d| d.name()))
                        .map_err(|e| WriterError::Config(e.to_string()))?;
                let routes = registry.iter().map(|(_, name)| (name.to_string(), 0)).collect();
                Self {
                    registry,
                    channels: vec![channel(name)?],
                    routes,
                }
            }
            ChannelLayout::PerDetector(assignments) => {
                if assignments.is_empty() {
                    return Err(WriterError::Config(
                        "detector_assignment has no entries".to_string(),
                    ));
                }
                for assignment in assignments {
                    if !geometry.has_detector(&assignment.detector) {
                        return Err(WriterError::Config(format!(
                            "detector_assignment names unknown detector '{}'",
                            assignment.detector
                        )));
                    }
                }
                let registry = DetectorIdRegistry::with_assignments(
                    assignments
                        .iter()
                        .map(|a| (a.detector.as_str(), a.sensor_id)),
                )
                .map_err(|e| WriterError::Config(e.to_string()))?;
                if let Some(missing) = geometry
                    .detectors()
                    .iter()
                    .find(|d| registry.get(d.name()).is_none())
                {
                    return Err(WriterError::Config(format!(
                        "detector '{}' has no collection assignment",
                        missing.name()
                    )));
                }

                let mut channels: Vec<OutputChannel> = Vec::new();
                let mut routes = HashMap::new();
                for assignment in assignments {
                    let index = match channels.iter().position(|c| c.name == assignment.collection) {
                        Some(index) => index,
                        None => {
                            channels.push(channel(&assignment.collection)?);
                            channels.len() - 1
                        }
                    };
                    routes.insert(assignment.detector.clone(), index);
                }
                Self {
                    registry,
                    channels,
                    routes,
                }
            }
        };

        // Sensor IDs must fit the cell ID layout
        for (id, name) in map.registry.iter() {
            encoder.encode(id, 0, 0).map_err(|_| {
                WriterError::Config(format!(
                    "sensor ID {id} of detector '{name}' does not fit the cell ID layout"
                ))
            })?;
        }

        Ok(map)
    }

    /// Detector IDs used in cell IDs and the geometry file
    pub fn registry(&self) -> &DetectorIdRegistry {
        &self.registry
    }

    /// Output channels in collection order
    pub fn channels(&self) -> &[OutputChannel] {
        &self.channels
    }

    /// Channel index and sensor ID of a detector
    pub fn route(&self, detector: &str) -> Result<(usize, u32), WriterError> {
        let unknown = || WriterError::Referential(format!("hit on unknown detector '{detector}'"));
        let channel = *self.routes.get(detector).ok_or_else(unknown)?;
        let sensor_id = self.registry.get(detector).ok_or_else(unknown)?;
        Ok((channel, sensor_id))
    }

    /// Collection name to cell ID layout, for every collection of an event
    pub fn collection_encodings(&self) -> BTreeMap<String, String> {
        self.channels
            .iter()
            .map(|c| (c.name.clone(), c.encoder.encoding().to_string()))
            .collect()
    }

    /// Reject channel names that shadow the Monte-Carlo truth collections
    pub(super) fn check_mc_truth_names(&self) -> Result<(), WriterError> {
        for channel in &self.channels {
            if MC_TRUTH_COLLECTIONS.iter().any(|(name, _)| *name == channel.name) {
                return Err(WriterError::Config(format!(
                    "collection '{}' clashes with a Monte-Carlo truth collection",
                    channel.name
                )));
            }
        }
        Ok(())
    }
}
