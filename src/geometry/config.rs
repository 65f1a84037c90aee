//! TOML geometry descriptions.
//!
//! ```toml
//! [magnetic_field]
//! model = "constant"
//! field = ["0T", "0T", "1.5T"]
//!
//! [[detector]]
//! name = "telescope0"
//! type = "mimosa26"
//! position = ["0mm", "0mm", "0mm"]
//! orientation = ["0deg", "0deg", "0deg"]
//! number_of_pixels = [1152, 576]
//! pixel_size = ["18.4um", "18.4um"]
//! size = ["21.2mm", "10.6mm", "50um"]
//! ```
//!
//! Quantities are either plain numbers in internal units or strings carrying a
//! unit suffix. Orientations are the angles `[α, β, γ]` of
//! `R = Rz(γ) · Ry(β) · Rx(α)`.

use std::path::Path;
use std::sync::Arc;

use nalgebra::{Vector2, Vector3};
use serde::Deserialize;

use super::rotation::rotation_from_angles;
use super::{Detector, DetectorModel, GeometryError, GeometryManager, MagneticField};
use crate::units::{self, UnitError};

/// A number in internal units or a string with a unit suffix
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Plain number, already in internal units
    Number(f64),
    /// Number with unit, e.g. `"50um"`
    Text(String),
}

impl Quantity {
    /// Value in internal units
    pub fn value(&self) -> Result<f64, UnitError> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Text(s) => units::parse_quantity(s),
        }
    }
}

fn vector2(values: &[Quantity; 2]) -> Result<Vector2<f64>, UnitError> {
    Ok(Vector2::new(values[0].value()?, values[1].value()?))
}

fn vector3(values: &[Quantity; 3]) -> Result<Vector3<f64>, UnitError> {
    Ok(Vector3::new(
        values[0].value()?,
        values[1].value()?,
        values[2].value()?,
    ))
}

/// Root of a geometry description file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryConfig {
    /// Detectors, in file order
    #[serde(default, rename = "detector")]
    pub detectors: Vec<DetectorConfig>,

    /// Optional magnetic field; absent means no field
    #[serde(default)]
    pub magnetic_field: Option<FieldConfig>,
}

/// One `[[detector]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
    /// Unique detector name
    pub name: String,
    /// Model type name
    #[serde(rename = "type")]
    pub model_type: String,
    /// Center position
    pub position: [Quantity; 3],
    /// Rotation angles `[α, β, γ]`, identity when omitted
    #[serde(default)]
    pub orientation: Option<[Quantity; 3]>,
    /// Pixel counts along x and y
    pub number_of_pixels: [u32; 2],
    /// Pixel pitch along x and y
    pub pixel_size: [Quantity; 2],
    /// Full physical size
    pub size: [Quantity; 3],
    /// Sensitive volume size, defaults to `size`
    #[serde(default)]
    pub sensor_size: Option<[Quantity; 3]>,
}

/// The `[magnetic_field]` table
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    /// `"none"`, `"constant"`, or the name of any other field model
    pub model: String,
    /// Field vector for constant fields
    #[serde(default)]
    pub field: Option<[Quantity; 3]>,
}

impl GeometryConfig {
    /// Load a geometry description from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GeometryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a geometry description from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, GeometryError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the geometry, converting all quantities to internal units
    pub fn build(&self) -> Result<GeometryManager, GeometryError> {
        let mut geometry = GeometryManager::new();

        for config in &self.detectors {
            let size = vector3(&config.size)?;
            let sensor_size = match &config.sensor_size {
                Some(s) => vector3(s)?,
                None => size,
            };
            let model = DetectorModel::new(
                config.model_type.clone(),
                Vector2::new(config.number_of_pixels[0], config.number_of_pixels[1]),
                vector2(&config.pixel_size)?,
                size,
                sensor_size,
            )?;

            let angles = match &config.orientation {
                Some(o) => [o[0].value()?, o[1].value()?, o[2].value()?],
                None => [0.0; 3],
            };
            let orientation = rotation_from_angles(angles);

            geometry.add_detector(Detector::new(
                config.name.clone(),
                vector3(&config.position)?,
                *orientation.matrix(),
                Arc::new(model),
            )?)?;
        }

        if let Some(field) = &self.magnetic_field {
            geometry.set_magnetic_field(field.build()?);
        }

        Ok(geometry)
    }
}

impl FieldConfig {
    fn build(&self) -> Result<MagneticField, GeometryError> {
        match self.model.as_str() {
            "none" => Ok(MagneticField::None),
            "constant" => {
                let field = match &self.field {
                    Some(f) => vector3(f)?,
                    None => Vector3::zeros(),
                };
                Ok(MagneticField::Constant(field))
            }
            other => Ok(MagneticField::NonUniform(other.to_string())),
        }
    }
}
