use std::path::PathBuf;

/// Errors that can occur while writing event collections
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// Malformed or contradictory configuration, reported before any event
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to create or write an output file
    #[error("I/O error on {}: {source}", path.display())]
    FileError {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error serializing footer metadata
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Geometry lookup failed
    #[error("Geometry error: {0}")]
    GeometryError(#[from] crate::geometry::GeometryError),

    /// Cell ID could not be encoded
    #[error("Encoding error: {0}")]
    EncodingError(#[from] crate::event::EncodingError),

    /// Geometry file export failed
    #[error("Geometry export error: {0}")]
    GearError(#[from] crate::gear::GearError),

    /// Hit on an unknown detector or out-of-order event number
    #[error("Referential error: {0}")]
    Referential(String),
}
