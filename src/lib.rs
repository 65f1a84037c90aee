//! # pixgear - Pixel Telescope Event and Geometry Writer
//!
//! `pixgear` writes simulated pixel-detector data in the form consumed by
//! telescope reconstruction frameworks:
//!
//! - **Event store**: per-event, typed collections of pixel hits whose cell IDs
//!   pack `(sensor ID, pixel type, column, row)` into one integer, stored as
//!   ZSTD-compressed Parquet.
//!
//! - **GEAR geometry file**: an XML description of every detector plane
//!   (position, rotation angles, ladder and sensitive volumes) numbered with
//!   the same sensor IDs that appear in the cell IDs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixgear::event::{PixelHit, PixelHitMessage};
//! use pixgear::geometry::GeometryConfig;
//! use pixgear::writer::{EventCollectionWriter, WriterConfig};
//!
//! let geometry = GeometryConfig::from_file("telescope.toml")?.build()?;
//!
//! let config = WriterConfig {
//!     output_collection_name: Some("zsdata_m26".to_string()),
//!     ..WriterConfig::default()
//! };
//! let mut writer = EventCollectionWriter::initialize(config, &geometry)?;
//!
//! for event in 0..100 {
//!     let hits = vec![PixelHitMessage::new("plane0", vec![PixelHit::new(10, 20, 1500.0)])];
//!     writer.run(event, Some(&hits))?;
//! }
//!
//! let stats = writer.finalize(&geometry)?;
//! println!("{stats}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Geometry Description
//!
//! Geometries are TOML files; quantities accept unit suffixes and are
//! converted to internal units (mm, rad, ns):
//!
//! ```toml
//! [magnetic_field]
//! model = "constant"
//! field = ["0T", "0T", "1.5T"]
//!
//! [[detector]]
//! name = "plane0"
//! type = "mimosa26"
//! position = ["0mm", "0mm", "0mm"]
//! orientation = ["0deg", "0deg", "0deg"]
//! number_of_pixels = [1152, 576]
//! pixel_size = ["18.4um", "18.4um"]
//! size = ["21.5mm", "13.7mm", "50um"]
//! ```
//!
//! ## Architecture
//!
//! - [`units`]: unit table and quantity parsing
//! - [`geometry`]: detectors, magnetic field, rotation decomposition, ID registry
//! - [`gear`]: GEAR document model and XML exporter
//! - [`event`]: hits, cell-ID encoding, event records
//! - [`writer`]: event collection writer and Parquet event store
//! - [`reader`]: event store reader

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod event;
pub mod gear;
pub mod geometry;
pub mod reader;
pub mod units;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::event::{
        BitFieldEncoding, CellEntry, CollectionKind, EventRecord, HitCollection, PixelCellEncoder,
        PixelHit, PixelHitMessage, PIXEL_CELL_ENCODING,
    };
    pub use crate::gear::{GearExporter, GearError, GeometryDocument};
    pub use crate::geometry::{
        Detector, DetectorIdRegistry, DetectorModel, GeometryConfig, GeometryError,
        GeometryManager, MagneticField,
    };
    pub use crate::reader::{EventStoreReader, ReaderError, StoreMetadata};
    pub use crate::writer::{
        ChannelLayout, ChannelMap, DetectorAssignment, EventCollectionWriter, EventStoreWriter,
        WriterConfig, WriterError, WriterStats,
    };
}
