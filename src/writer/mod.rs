//! # Event Collection Writer
//!
//! Turns per-event pixel-hit batches into typed collections of cell-ID
//! encoded pixels and streams them into a Parquet event store. At the end of a
//! run the detector geometry is exported as a GEAR file using the same
//! detector IDs that appear in the cell IDs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pixgear::event::{PixelHit, PixelHitMessage};
//! use pixgear::geometry::GeometryConfig;
//! use pixgear::writer::{EventCollectionWriter, WriterConfig};
//!
//! let geometry = GeometryConfig::from_file("telescope.toml")?.build()?;
//! let mut writer = EventCollectionWriter::initialize(WriterConfig::default(), &geometry)?;
//!
//! let hits = vec![PixelHitMessage::new("plane1", vec![PixelHit::new(10, 20, 1500.0)])];
//! writer.run(0, Some(&hits))?;
//! writer.run(1, None)?;
//!
//! let stats = writer.finalize(&geometry)?;
//! println!("{stats}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod metadata;
mod schema;
mod stats;
mod store;
mod writer_impl;


pub use config::{
    ChannelLayout, ChannelMap, DetectorAssignment, OutputChannel, WriterConfig,
    DEFAULT_COLLECTION_NAME, DEFAULT_GEOMETRY_FILE, DEFAULT_OUTPUT_FILE,
};
pub use error::WriterError;
pub use metadata::FooterMetadata;
pub use schema::{
    columns, create_event_schema, create_event_schema_arc, EVENT_STORE_EXTENSION,
    EVENT_STORE_FORMAT_VERSION, KEY_COLLECTION_ENCODINGS, KEY_CONVERTER_INFO,
    KEY_CREATION_TIMESTAMP, KEY_DETECTOR_NAME, KEY_FORMAT_VERSION, KEY_RUN_NUMBER, LIST_COLUMNS,
};
pub use stats::WriterStats;
pub use store::{EventStoreStats, EventStoreWriter};
pub use writer_impl::EventCollectionWriter;
