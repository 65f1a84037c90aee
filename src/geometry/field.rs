use nalgebra::Vector3;

/// Magnetic field descriptor of the simulated setup
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MagneticField {
    /// No magnetic field
    #[default]
    None,
    /// Spatially uniform field, internal units
    Constant(Vector3<f64>),
    /// Any non-uniform field (field maps, gradients, custom functions), named by its model
    NonUniform(String),
}

impl MagneticField {
    /// Short name of the field model, as used in geometry descriptions
    pub fn model_name(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Constant(_) => "constant",
            Self::NonUniform(model) => model,
        }
    }
}
