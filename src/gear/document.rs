use log::warn;

use crate::geometry::rotation::gear_rotation_angles;
use crate::geometry::{Detector, DetectorIdRegistry, GeometryManager, MagneticField};
use crate::units;

use super::GearError;

/// Radiation length written for every ladder and sensitive volume, in millimeters.
///
/// Fixed placeholder value; the material of the detector models is not taken into account.
pub const RADIATION_LENGTH_MM: f64 = 94.65;

/// Sensor-level 2×2 rotation block `rotation1..4`, always the identity.
///
/// The full detector orientation is already carried by the ladder angles.
pub const SENSOR_ROTATION: [f64; 4] = [1.0, 0.0, 0.0, 1.0];

/// Detector label written to `<global detectorName>` when none is configured
pub const DEFAULT_DETECTOR_NAME: &str = "EUTelescope";

/// Value of `<siplanesType type>`
pub const SIPLANES_TYPE: &str = "TelescopeWithoutDUT";

/// Value of `<siplanesID ID>`
pub const SIPLANES_ID: u32 = 0;

/// Constant magnetic field in tesla
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BFieldRecord {
    /// x component
    pub x: f64,
    /// y component
    pub y: f64,
    /// z component
    pub z: f64,
}

/// Mechanical description of one detector plane, lengths in mm and angles in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct LadderRecord {
    /// Registry ID of the detector
    pub id: u32,
    /// Center position
    pub position: [f64; 3],
    /// `[rotationZY, rotationZX, rotationXY]`
    pub rotation: [f64; 3],
    /// Total size: x, y and thickness
    pub size: [f64; 3],
    /// Radiation length
    pub rad_length: f64,
}

/// Active pixel matrix of one detector plane, lengths in mm
#[derive(Debug, Clone, PartialEq)]
pub struct SensitiveRecord {
    /// Registry ID of the detector
    pub id: u32,
    /// Center position
    pub position: [f64; 3],
    /// Pixel matrix extent (count × pitch) and sensor thickness
    pub size: [f64; 3],
    /// Pixel counts along x and y
    pub npixel: [u32; 2],
    /// Pixel pitch along x and y
    pub pitch: [f64; 2],
    /// Single-hit resolution estimate, pitch-x / √12
    pub resolution: f64,
    /// `rotation1..4`
    pub rotation: [f64; 4],
    /// Radiation length
    pub rad_length: f64,
}

/// One `<layer>`: the ladder and sensitive records of a single detector
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRecord {
    /// Detector name, written as a comment
    pub detector_name: String,
    /// Detector model type, written as a comment
    pub detector_type: String,
    /// Ladder record
    pub ladder: LadderRecord,
    /// Sensitive record
    pub sensitive: SensitiveRecord,
}

/// Complete in-memory GEAR document, assembled before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryDocument {
    /// `<global detectorName>`
    pub detector_name: String,
    /// `<BField>`
    pub field: BFieldRecord,
    /// Layers in ascending registry ID order
    pub layers: Vec<LayerRecord>,
}

impl GeometryDocument {
    /// Assemble the document for every registered detector, in registry ID order
    pub fn build(
        detector_name: &str,
        geometry: &GeometryManager,
        registry: &DetectorIdRegistry,
    ) -> Result<Self, GearError> {
        let layers = registry
            .iter()
            .map(|(id, name)| LayerRecord::build(id, geometry.detector(name)?))
            .collect::<Result<Vec<_>, GearError>>()?;

        Ok(Self {
            detector_name: detector_name.to_string(),
            field: BFieldRecord::build(geometry.magnetic_field())?,
            layers,
        })
    }
}

impl BFieldRecord {
    fn build(field: &MagneticField) -> Result<Self, GearError> {
        match field {
            MagneticField::Constant(b) => Ok(Self {
                x: units::convert(b.x, "T")?,
                y: units::convert(b.y, "T")?,
                z: units::convert(b.z, "T")?,
            }),
            MagneticField::None => Ok(Self::default()),
            MagneticField::NonUniform(model) => {
                warn!(
                    "Magnetic field model '{}' not handled by GEAR geometry, writing null magnetic field instead",
                    model
                );
                Ok(Self::default())
            }
        }
    }
}

impl LayerRecord {
    fn build(id: u32, detector: &Detector) -> Result<Self, GearError> {
        let model = detector.model();
        let position = detector.position();
        let position = [
            units::convert(position.x, "mm")?,
            units::convert(position.y, "mm")?,
            units::convert(position.z, "mm")?,
        ];

        let angles = gear_rotation_angles(detector.orientation());
        let rotation = [
            units::convert(angles[0], "deg")?,
            units::convert(angles[1], "deg")?,
            units::convert(angles[2], "deg")?,
        ];

        let size = model.size();
        let ladder = LadderRecord {
            id,
            position,
            rotation,
            size: [
                units::convert(size.x, "mm")?,
                units::convert(size.y, "mm")?,
                units::convert(size.z, "mm")?,
            ],
            rad_length: RADIATION_LENGTH_MM,
        };

        // Active area comes from the pixel grid, thickness from the sensor volume
        let npixel = model.number_of_pixels();
        let pitch = model.pixel_size();
        let matrix = model.matrix_size();
        let sensitive = SensitiveRecord {
            id,
            position,
            size: [
                units::convert(matrix.x, "mm")?,
                units::convert(matrix.y, "mm")?,
                units::convert(model.sensor_size().z, "mm")?,
            ],
            npixel: [npixel.x, npixel.y],
            pitch: [units::convert(pitch.x, "mm")?, units::convert(pitch.y, "mm")?],
            resolution: units::convert(pitch.x / 12f64.sqrt(), "mm")?,
            rotation: SENSOR_ROTATION,
            rad_length: RADIATION_LENGTH_MM,
        };

        Ok(Self {
            detector_name: detector.name().to_string(),
            detector_type: detector.model_type().to_string(),
            ladder,
            sensitive,
        })
    }
}
