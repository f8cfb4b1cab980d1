use thiserror::Error;

/// Failures raised while packing a value into a PER bit stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Length determinant {length} exceeds 16383")]
    LengthTooLarge { length: usize },

    #[error("Value {value} not in range {min}..={max}")]
    ValueOutOfRange { value: u64, min: u64, max: u64 },

    #[error("Size {size} not in range {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("ASN.1 extensions not supported: {what}")]
    ExtensionNotSupported { what: &'static str },

    #[error("Write cursor capacity exceeded: need {needed} octets, capacity {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },
}

/// Failures raised while unpacking a PER bit stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unexpected end of input: need {needed} bits, have {available}")]
    UnexpectedEndOfInput { needed: usize, available: usize },

    #[error("Fragmented length determinant not supported")]
    LengthTooLarge,

    #[error("ASN.1 extensions not supported: {what}")]
    ExtensionNotSupported { what: &'static str },

    #[error("Value {value} not in range {min}..={max}")]
    ValueOutOfRange { value: u64, min: u64, max: u64 },

    #[error("Size {size} not in range {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("Non-zero padding bit at position {position}")]
    NonZeroPadding { position: usize },

    #[error("Unknown {what} index {index}")]
    UnknownChoice { what: &'static str, index: u32 },

    #[error("Unknown procedure code {code}")]
    UnknownProcedure { code: u8 },

    #[error("Mandatory IE {id} missing")]
    MissingIe { id: u16 },

    #[error("Unknown IE {id} with criticality reject")]
    UnknownIe { id: u16 },

    #[error("IE {id} present more than once")]
    DuplicateIe { id: u16 },

    #[error("{octets} unexpected octets after end of value")]
    TrailingData { octets: usize },
}

/// Main error type for X2AP codec operations
///
/// Mirrors the tri-state result of every pack/unpack call: success, an
/// encode failure or a decode failure. Invalid arguments to the cursor
/// primitives are reported separately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum X2apError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Encode failure: {0}")]
    Encode(#[from] EncodeError),

    #[error("Decode failure: {0}")]
    Decode(#[from] DecodeError),
}

impl X2apError {
    pub fn is_encode(&self) -> bool {
        matches!(self, X2apError::Encode(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, X2apError::Decode(_))
    }
}

/// Result type alias for X2AP codec operations
pub type X2apResult<T> = Result<T, X2apError>;
