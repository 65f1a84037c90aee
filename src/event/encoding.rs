use std::fmt;
use std::str::FromStr;

use super::EncodingError;

/// Cell ID layout shared with the reconstruction side.
///
/// `sensorID` is the registry ID of the detector, `sparsePixelType` the sparse
/// pixel flavour of the collection, followed by the pixel column and row.
pub const PIXEL_CELL_ENCODING: &str = "sensorID:7,sparsePixelType:5,xPixel:16,yPixel:16";

/// Sparse pixel type written when none is configured (generic sparse pixel)
pub const DEFAULT_PIXEL_TYPE: u32 = 2;

/// One named field of a [`BitFieldEncoding`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitField {
    name: String,
    offset: u32,
    width: u32,
}

impl BitField {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the lowest bit
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of bits
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Largest value the field can hold
    pub fn max_value(&self) -> u64 {
        if self.width == 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    fn extract(&self, code: u64) -> u64 {
        (code >> self.offset) & self.max_value()
    }
}

/// Immutable bit-field layout for packing named unsigned values into one 64-bit code.
///
/// Layouts are written as `name:width[,name:width...]`; fields are packed from
/// bit 0 upward in the order given.
///
/// ```
/// use pixgear::event::BitFieldEncoding;
///
/// let encoding: BitFieldEncoding = "sensorID:7,sparsePixelType:5".parse().unwrap();
/// let code = encoding.encode(&[("sensorID", 3), ("sparsePixelType", 2)]).unwrap();
/// assert_eq!(code, 3 | (2 << 7));
/// assert_eq!(encoding.value(code, "sparsePixelType").unwrap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitFieldEncoding {
    descriptor: String,
    fields: Vec<BitField>,
}

impl BitFieldEncoding {
    /// Parse a layout descriptor
    pub fn parse(descriptor: &str) -> Result<Self, EncodingError> {
        let invalid = |reason: String| EncodingError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason,
        };

        let mut fields: Vec<BitField> = Vec::new();
        let mut offset = 0u32;

        for entry in descriptor.split(',') {
            let (name, width) = entry
                .split_once(':')
                .ok_or_else(|| invalid(format!("entry '{entry}' is not of the form name:width")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(invalid(format!("entry '{entry}' has no name")));
            }
            if fields.iter().any(|f| f.name == name) {
                return Err(invalid(format!("field '{name}' appears twice")));
            }

            let width: u32 = width
                .trim()
                .parse()
                .map_err(|_| invalid(format!("field '{name}' has invalid width '{width}'")))?;
            if width == 0 {
                return Err(invalid(format!("field '{name}' has zero width")));
            }
            if width > 64 || offset + width > 64 {
                return Err(invalid("layout needs more than 64 bits".to_string()));
            }

            fields.push(BitField {
                name: name.to_string(),
                offset,
                width,
            });
            offset += width;
        }

        Ok(Self {
            descriptor: descriptor.to_string(),
            fields,
        })
    }

    /// The descriptor this layout was parsed from
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Fields from the lowest bit upward
    pub fn fields(&self) -> &[BitField] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Result<&BitField, EncodingError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| EncodingError::UnknownField(name.to_string()))
    }

    /// Total number of bits used
    pub fn total_width(&self) -> u32 {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Pack named values; fields not mentioned are zero
    pub fn encode(&self, values: &[(&str, u64)]) -> Result<u64, EncodingError> {
        let mut code = 0u64;
        for (name, value) in values {
            let field = self.field(name)?;
            if *value > field.max_value() {
                return Err(EncodingError::Overflow {
                    field: field.name.clone(),
                    width: field.width,
                    value: *value,
                });
            }
            let mask = field.max_value() << field.offset;
            code = (code & !mask) | (value << field.offset);
        }
        Ok(code)
    }

    /// Unpack every field of a code
    pub fn decode(&self, code: u64) -> Vec<(&str, u64)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.extract(code)))
            .collect()
    }

    /// Unpack a single field
    pub fn value(&self, code: u64, name: &str) -> Result<u64, EncodingError> {
        Ok(self.field(name)?.extract(code))
    }
}

impl FromStr for BitFieldEncoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BitFieldEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor)
    }
}

/// Decoded pixel cell ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCell {
    /// Registry ID of the detector
    pub sensor_id: u32,
    /// Sparse pixel type
    pub pixel_type: u32,
    /// Pixel column
    pub x: u32,
    /// Pixel row
    pub y: u32,
}

/// Encoder for pixel cell IDs following [`PIXEL_CELL_ENCODING`].
///
/// Value object: the sparse pixel type is fixed at construction and every call
/// is a pure function of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCellEncoder {
    encoding: BitFieldEncoding,
    pixel_type: u32,
}

impl PixelCellEncoder {
    /// Encoder using the shared [`PIXEL_CELL_ENCODING`] layout
    pub fn new(pixel_type: u32) -> Result<Self, EncodingError> {
        Self::with_encoding(BitFieldEncoding::parse(PIXEL_CELL_ENCODING)?, pixel_type)
    }

    /// Encoder for a custom layout; it must contain the four pixel fields
    pub fn with_encoding(encoding: BitFieldEncoding, pixel_type: u32) -> Result<Self, EncodingError> {
        for name in ["sensorID", "sparsePixelType", "xPixel", "yPixel"] {
            encoding.field(name)?;
        }
        // Reject a pixel type that can never be encoded up front
        encoding.encode(&[("sparsePixelType", u64::from(pixel_type))])?;
        Ok(Self {
            encoding,
            pixel_type,
        })
    }

    /// The underlying layout
    pub fn encoding(&self) -> &BitFieldEncoding {
        &self.encoding
    }

    /// Sparse pixel type stamped into every cell ID
    pub fn pixel_type(&self) -> u32 {
        self.pixel_type
    }

    /// Pack `(sensor ID, x, y)` into a cell ID
    pub fn encode(&self, sensor_id: u32, x: u32, y: u32) -> Result<u64, EncodingError> {
        self.encoding.encode(&[
            ("sensorID", u64::from(sensor_id)),
            ("sparsePixelType", u64::from(self.pixel_type)),
            ("xPixel", u64::from(x)),
            ("yPixel", u64::from(y)),
        ])
    }

    /// Unpack a cell ID
    pub fn decode(&self, cell_id: u64) -> Result<PixelCell, EncodingError> {
        let get = |name: &str| -> Result<u32, EncodingError> {
            let value = self.encoding.value(cell_id, name)?;
            // Fields of custom layouts may be wider than 32 bits
            u32::try_from(value).map_err(|_| EncodingError::Overflow {
                field: name.to_string(),
                width: 32,
                value,
            })
        };
        Ok(PixelCell {
            sensor_id: get("sensorID")?,
            pixel_type: get("sparsePixelType")?,
            x: get("xPixel")?,
            y: get("yPixel")?,
        })
    }
}
