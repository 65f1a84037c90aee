use crate::units::UnitError;

/// Errors that can occur while building or querying the detector geometry
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// I/O error reading a geometry description
    #[error("Failed to read geometry file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error in a geometry description
    #[error("Geometry TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A quantity could not be converted to internal units
    #[error("Unit error: {0}")]
    UnitError(#[from] UnitError),

    /// Detector model with non-physical dimensions
    #[error("Invalid detector model '{model}': {reason}")]
    InvalidModel {
        /// Model type name
        model: String,
        /// What is wrong with it
        reason: String,
    },

    /// Orientation matrix is not a proper rotation
    #[error("Invalid orientation for detector '{detector}': {reason}")]
    InvalidOrientation {
        /// Detector name
        detector: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two detectors share the same name
    #[error("Duplicate detector name: {0}")]
    DuplicateDetector(String),

    /// Two detectors were given the same integer identifier
    #[error("Detector ID {id} assigned to both '{first}' and '{second}'")]
    DuplicateId {
        /// The contested identifier
        id: u32,
        /// Detector holding the identifier first
        first: String,
        /// Detector requesting it again
        second: String,
    },

    /// A detector name that is not part of the geometry or registry
    #[error("Unknown detector: {0}")]
    UnknownDetector(String),
}
