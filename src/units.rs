//! # Unit System
//!
//! All quantities inside pixgear are stored in a fixed internal unit system:
//!
//! | Quantity | Internal unit |
//! |----------|---------------|
//! | Length | millimeter |
//! | Angle | radian |
//! | Time | nanosecond |
//! | Magnetic field | MeV·ns/(e·mm²), so that 1 T = 0.001 |
//!
//! Output formats (the GEAR geometry file in particular) require fixed units, so
//! every value leaves the crate through [`convert`] with an explicit unit name.

/// Errors that can occur when resolving units
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    /// The unit name is not part of the unit table
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// A quantity string could not be parsed
    #[error("Invalid quantity '{0}'")]
    InvalidQuantity(String),
}

/// Unit name and its value expressed in internal units.
const UNIT_TABLE: &[(&str, f64)] = &[
    // Length
    ("nm", 1e-6),
    ("um", 1e-3),
    ("mm", 1.0),
    ("cm", 10.0),
    ("m", 1e3),
    // Angle
    ("rad", 1.0),
    ("mrad", 1e-3),
    ("deg", std::f64::consts::PI / 180.0),
    // Time
    ("ps", 1e-3),
    ("ns", 1.0),
    ("us", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    // Magnetic field
    ("mT", 1e-6),
    ("T", 1e-3),
    ("kT", 1.0),
];

/// Value of one `unit` in internal units
pub fn get(unit: &str) -> Result<f64, UnitError> {
    UNIT_TABLE
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| UnitError::UnknownUnit(unit.to_string()))
}

/// Convert an internal value into the given unit
///
/// ```
/// use pixgear::units;
///
/// let pitch = units::to_internal(50.0, "um").unwrap();
/// assert!((units::convert(pitch, "mm").unwrap() - 0.05).abs() < 1e-12);
/// ```
pub fn convert(value: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(value / get(unit)?)
}

/// Convert a value given in `unit` into internal units
pub fn to_internal(value: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(value * get(unit)?)
}

/// Parse a quantity such as `"50um"`, `"1.5 T"` or `"-90deg"` into internal units.
///
/// A bare number is taken to be in internal units already.
pub fn parse_quantity(input: &str) -> Result<f64, UnitError> {
    let trimmed = input.trim();
    let split = trimmed
        .char_indices()
        .find(|(i, c)| c.is_ascii_alphabetic() && !is_exponent(trimmed, *i))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (number, unit) = trimmed.split_at(split);
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| UnitError::InvalidQuantity(input.to_string()))?;

    let unit = unit.trim();
    if unit.is_empty() {
        Ok(value)
    } else {
        to_internal(value, unit)
    }
}

/// An `e`/`E` directly following a digit and followed by a digit or sign is an exponent
fn is_exponent(s: &str, index: usize) -> bool {
    let bytes = s.as_bytes();
    if !matches!(bytes[index], b'e' | b'E') || index == 0 {
        return false;
    }
    let prev_is_digit = bytes[index - 1].is_ascii_digit() || bytes[index - 1] == b'.';
    let next_ok = bytes
        .get(index + 1)
        .map(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+')
        .unwrap_or(false);
    prev_is_digit && next_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let value = to_internal(50.0, "um").unwrap();
        assert!((value - 0.05).abs() < 1e-15);
        assert!((convert(value, "um").unwrap() - 50.0).abs() < 1e-9);
        assert!((convert(to_internal(1.0, "m").unwrap(), "mm").unwrap() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_conversion() {
        let quarter = std::f64::consts::FRAC_PI_2;
        assert!((convert(quarter, "deg").unwrap() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_conversion() {
        let field = to_internal(1.5, "T").unwrap();
        assert!((field - 0.0015).abs() < 1e-15);
        assert!((convert(field, "T").unwrap() - 1.5).abs() < 1e-12);
        assert!((convert(field, "mT").unwrap() - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit() {
        assert!(matches!(convert(1.0, "furlong"), Err(UnitError::UnknownUnit(_))));
    }

    #[test]
    fn test_parse_quantity() {
        assert!((parse_quantity("50um").unwrap() - 0.05).abs() < 1e-15);
        assert!((parse_quantity(" 2.5 mm ").unwrap() - 2.5).abs() < 1e-15);
        assert!((parse_quantity("-90deg").unwrap() + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((parse_quantity("1e-3m").unwrap() - 1.0).abs() < 1e-12);
        assert!((parse_quantity("12").unwrap() - 12.0).abs() < 1e-15);
        assert!(parse_quantity("mm").is_err());
        assert!(parse_quantity("5 parsecs").is_err());
    }
}
