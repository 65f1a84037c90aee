//! # Detector Geometry
//!
//! Read-only description of the simulated telescope: placed [`Detector`]s sharing
//! [`DetectorModel`]s, the global [`MagneticField`], and the
//! [`DetectorIdRegistry`] that maps detector names to the integer IDs used in
//! every output file.
//!
//! Geometries are usually built from a TOML description, see [`GeometryConfig`].

mod config;
mod detector;
mod error;
mod field;
mod manager;
mod registry;
pub mod rotation;

#[cfg(test)]
mod tests;

pub use config::{DetectorConfig, FieldConfig, GeometryConfig, Quantity};
pub use detector::{Detector, DetectorModel};
pub use error::GeometryError;
pub use field::MagneticField;
pub use manager::GeometryManager;
pub use registry::DetectorIdRegistry;
