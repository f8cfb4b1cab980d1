//! Aligned PER (X.691) encoding/decoding module
//!
//! The bit cursor every X2AP codec is built on: fixed-width integers,
//! octet alignment and the short/long length determinant, plus the X.691
//! helpers composed from them.

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod types;

pub use codec::PerCodec;
pub use decoder::PerDecoder;
pub use encoder::PerEncoder;
pub use types::{LengthDeterminant, SizeConstraint};
