use std::path::PathBuf;

use crate::geometry::GeometryError;
use crate::units::UnitError;

/// Errors that can occur while exporting a GEAR geometry file
#[derive(Debug, thiserror::Error)]
pub enum GearError {
    /// The geometry file could not be created or written
    #[error("Cannot write GEAR geometry file {}: {source}", path.display())]
    FileError {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error while serializing the document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// XML serialization error
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Value could not be converted to output units
    #[error("Unit error: {0}")]
    UnitError(#[from] UnitError),

    /// Geometry and registry disagree
    #[error("Geometry error: {0}")]
    GeometryError(#[from] GeometryError),
}
