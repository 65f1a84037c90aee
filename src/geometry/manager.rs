use super::{Detector, GeometryError, MagneticField};

/// Ordered collection of placed detectors plus the global magnetic field
#[derive(Debug, Clone, Default)]
pub struct GeometryManager {
    detectors: Vec<Detector>,
    magnetic_field: MagneticField,
}

impl GeometryManager {
    /// Create an empty geometry without magnetic field
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detector; names must be unique
    pub fn add_detector(&mut self, detector: Detector) -> Result<(), GeometryError> {
        if self.has_detector(detector.name()) {
            return Err(GeometryError::DuplicateDetector(detector.name().to_string()));
        }
        self.detectors.push(detector);
        Ok(())
    }

    /// Builder-style variant of [`add_detector`](Self::add_detector)
    pub fn with_detector(mut self, detector: Detector) -> Result<Self, GeometryError> {
        self.add_detector(detector)?;
        Ok(self)
    }

    /// Replace the magnetic field
    pub fn set_magnetic_field(&mut self, field: MagneticField) {
        self.magnetic_field = field;
    }

    /// All detectors in insertion order
    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Look up a detector by name
    pub fn detector(&self, name: &str) -> Result<&Detector, GeometryError> {
        self.detectors
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| GeometryError::UnknownDetector(name.to_string()))
    }

    /// Whether a detector with this name exists
    pub fn has_detector(&self, name: &str) -> bool {
        self.detectors.iter().any(|d| d.name() == name)
    }

    /// The magnetic field descriptor
    pub fn magnetic_field(&self) -> &MagneticField {
        &self.magnetic_field
    }
}
