/// Errors that can occur while parsing encodings or packing cell IDs
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Malformed encoding descriptor
    #[error("Invalid encoding descriptor '{descriptor}': {reason}")]
    InvalidDescriptor {
        /// The descriptor string
        descriptor: String,
        /// What is wrong with it
        reason: String,
    },

    /// Field name not part of the encoding
    #[error("Unknown field '{0}' in cell ID encoding")]
    UnknownField(String),

    /// Value does not fit into its bit field
    #[error("Value {value} does not fit into the {width}-bit field '{field}'")]
    Overflow {
        /// Field name
        field: String,
        /// Field width in bits
        width: u32,
        /// Rejected value
        value: u64,
    },
}
