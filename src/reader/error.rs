/// Errors that can occur during reading
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Footer metadata missing or malformed
    #[error("Metadata error: {0}")]
    MetadataError(String),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}
