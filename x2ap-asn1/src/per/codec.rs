//! The codec trait implemented by every X2AP IE and message

use crate::per::{PerDecoder, PerEncoder};
use x2ap_core::X2apResult;

/// Aligned PER pack/unpack for one ASN.1 type
///
/// Implementations call the cursor primitives and the codecs of their
/// fields in declaration order and return the first failure unchanged.
pub trait PerCodec: Sized {
    /// Append this value to the write cursor
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()>;

    /// Consume one value from the read cursor
    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self>;

    /// Encode this value on its own, padded to whole octets
    fn to_per_bytes(&self) -> X2apResult<Vec<u8>> {
        let mut encoder = PerEncoder::new();
        self.pack(&mut encoder)?;
        Ok(encoder.into_bytes())
    }

    /// Decode a value that must span all of `bytes`
    fn from_per_bytes(bytes: &[u8]) -> X2apResult<Self> {
        let mut decoder = PerDecoder::new(bytes);
        let value = Self::unpack(&mut decoder)?;
        decoder.finish()?;
        Ok(value)
    }
}
