use std::sync::Arc;

use nalgebra::{Matrix3, Rotation3, Vector2, Vector3};

use super::GeometryError;

/// Tolerance for the orthonormality and determinant checks on orientations
const ORIENTATION_TOLERANCE: f64 = 1e-6;

/// Static description of a pixel sensor type, shared between detectors of the same type
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorModel {
    model_type: String,
    number_of_pixels: Vector2<u32>,
    pixel_size: Vector2<f64>,
    size: Vector3<f64>,
    sensor_size: Vector3<f64>,
}

impl DetectorModel {
    /// Create a detector model, all lengths in internal units.
    ///
    /// `size` is the full physical envelope, `sensor_size` the sensitive volume.
    pub fn new(
        model_type: impl Into<String>,
        number_of_pixels: Vector2<u32>,
        pixel_size: Vector2<f64>,
        size: Vector3<f64>,
        sensor_size: Vector3<f64>,
    ) -> Result<Self, GeometryError> {
        let model_type = model_type.into();
        let invalid = |reason: &str| GeometryError::InvalidModel {
            model: model_type.clone(),
            reason: reason.to_string(),
        };

        if number_of_pixels.x == 0 || number_of_pixels.y == 0 {
            return Err(invalid("pixel grid must not be empty"));
        }
        if !all_positive(pixel_size.iter()) {
            return Err(invalid("pixel pitch must be strictly positive"));
        }
        if !all_positive(size.iter()) {
            return Err(invalid("size must be strictly positive"));
        }
        if !all_positive(sensor_size.iter()) {
            return Err(invalid("sensor size must be strictly positive"));
        }

        Ok(Self {
            model_type,
            number_of_pixels,
            pixel_size,
            size,
            sensor_size,
        })
    }

    /// Model type name
    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    /// Number of pixels along x and y
    pub fn number_of_pixels(&self) -> Vector2<u32> {
        self.number_of_pixels
    }

    /// Pixel pitch along x and y
    pub fn pixel_size(&self) -> Vector2<f64> {
        self.pixel_size
    }

    /// Full physical size of the detector
    pub fn size(&self) -> Vector3<f64> {
        self.size
    }

    /// Size of the sensitive sensor volume
    pub fn sensor_size(&self) -> Vector3<f64> {
        self.sensor_size
    }

    /// Active area spanned by the pixel grid (pixel count times pitch)
    pub fn matrix_size(&self) -> Vector2<f64> {
        Vector2::new(
            f64::from(self.number_of_pixels.x) * self.pixel_size.x,
            f64::from(self.number_of_pixels.y) * self.pixel_size.y,
        )
    }
}

fn all_positive<'a>(mut values: impl Iterator<Item = &'a f64>) -> bool {
    values.all(|v| v.is_finite() && *v > 0.0)
}

/// A placed detector: a named instance of a [`DetectorModel`]
#[derive(Debug, Clone)]
pub struct Detector {
    name: String,
    position: Vector3<f64>,
    orientation: Rotation3<f64>,
    model: Arc<DetectorModel>,
}

impl Detector {
    /// Place a detector.
    ///
    /// The orientation must be a proper rotation (orthonormal, determinant +1).
    pub fn new(
        name: impl Into<String>,
        position: Vector3<f64>,
        orientation: Matrix3<f64>,
        model: Arc<DetectorModel>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        let invalid = |reason: String| GeometryError::InvalidOrientation {
            detector: name.clone(),
            reason,
        };

        if orientation.iter().any(|v| !v.is_finite()) {
            return Err(invalid("matrix contains non-finite entries".to_string()));
        }
        let deviation = (orientation.transpose() * orientation - Matrix3::identity()).norm();
        if deviation > ORIENTATION_TOLERANCE {
            return Err(invalid(format!("matrix is not orthonormal (deviation {deviation:e})")));
        }
        let determinant = orientation.determinant();
        if (determinant - 1.0).abs() > ORIENTATION_TOLERANCE {
            return Err(invalid(format!("determinant is {determinant}, expected +1")));
        }
        if position.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidModel {
                model: model.model_type().to_string(),
                reason: format!("position of '{name}' is not finite"),
            });
        }

        Ok(Self {
            name,
            position,
            orientation: Rotation3::from_matrix_unchecked(orientation),
            model,
        })
    }

    /// Detector name, unique within a geometry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name of the underlying model
    pub fn model_type(&self) -> &str {
        self.model.model_type()
    }

    /// Position of the detector center in the global frame
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Rotation from the local into the global frame
    pub fn orientation(&self) -> &Rotation3<f64> {
        &self.orientation
    }

    /// The detector model
    pub fn model(&self) -> &Arc<DetectorModel> {
        &self.model
    }
}
