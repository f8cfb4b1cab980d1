//! Aligned PER write cursor
//!
//! `PerEncoder` is the write side of the bit cursor: an owned, zero
//! initialised octet buffer plus a bit length. Every multi-bit value is
//! written MSB first and nothing is padded unless an alignment is requested.
//!
//! # Usage Example
//!
//! ```rust
//! use x2ap_asn1::per::PerEncoder;
//!
//! let mut encoder = PerEncoder::new();
//! encoder.write_bits(0b101, 3).unwrap();
//! encoder.align_up_zero(8).unwrap();
//! encoder.write_length_determinant(300).unwrap();
//! assert_eq!(encoder.into_bytes(), vec![0xA0, 0x81, 0x2C]);
//! ```

use crate::per::codec::PerCodec;
use crate::per::types::{
    bits_for_range, octets_for_value, range_of, LengthDeterminant, SizeConstraint,
};
use x2ap_core::{BitString, CodecConfig, DiagnosticSink, EncodeError, LogSink, X2apError, X2apResult};

static DEFAULT_SINK: LogSink = LogSink;

/// Write cursor for aligned PER encoding
pub struct PerEncoder<'s> {
    buffer: Vec<u8>,
    bit_len: usize,
    config: CodecConfig,
    sink: &'s dyn DiagnosticSink,
}

impl PerEncoder<'static> {
    /// Create a new encoder with the default configuration, logging through `log`
    pub fn new() -> Self {
        Self::with_options(CodecConfig::default(), &DEFAULT_SINK)
    }
}

impl<'s> PerEncoder<'s> {
    /// Create a new encoder for one pack call
    pub fn with_options(config: CodecConfig, sink: &'s dyn DiagnosticSink) -> Self {
        Self {
            buffer: Vec::new(),
            bit_len: 0,
            config,
            sink,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn sink(&self) -> &'s dyn DiagnosticSink {
        self.sink
    }

    /// Number of bits written so far
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_aligned(&self) -> bool {
        self.bit_len % 8 == 0
    }

    /// Get a reference to the encoded bytes, last partial octet zero padded
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the encoded bytes, last partial octet zero padded
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Grow the zero-filled backing buffer so `n_bits` more bits fit.
    fn reserve_bits(&mut self, n_bits: usize) -> X2apResult<()> {
        let needed = (self.bit_len + n_bits).div_ceil(8);
        if let Some(capacity) = self.config.max_message_octets {
            if needed > capacity {
                return Err(EncodeError::CapacityExceeded { needed, capacity }.into());
            }
        }
        if needed > self.buffer.len() {
            self.buffer.resize(needed, 0);
        }
        Ok(())
    }

    /// Write the lowest `n_bits` of `value` without range checks.
    fn put_bits(&mut self, value: u64, n_bits: usize) -> X2apResult<()> {
        self.reserve_bits(n_bits)?;
        for i in (0..n_bits).rev() {
            if (value >> i) & 1 == 1 {
                self.buffer[self.bit_len / 8] |= 0x80 >> (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
        Ok(())
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) -> X2apResult<()> {
        self.put_bits(bit as u64, 1)
    }

    /// Write `value` in exactly `n_bits` bits, MSB first
    ///
    /// # Errors
    /// * `InvalidArgument` if `n_bits` is not in 1..=32
    /// * `ValueOutOfRange` if `value` does not fit in `n_bits`
    pub fn write_bits(&mut self, value: u32, n_bits: usize) -> X2apResult<()> {
        if n_bits == 0 || n_bits > 32 {
            return Err(X2apError::InvalidArgument(format!(
                "bit width {} not in 1..=32",
                n_bits
            )));
        }
        self.write_bits_u64(value as u64, n_bits)
    }

    /// Write `value` in exactly `n_bits` bits (1..=64), MSB first
    pub fn write_bits_u64(&mut self, value: u64, n_bits: usize) -> X2apResult<()> {
        if n_bits == 0 || n_bits > 64 {
            return Err(X2apError::InvalidArgument(format!(
                "bit width {} not in 1..=64",
                n_bits
            )));
        }
        if n_bits < 64 && value >> n_bits != 0 {
            return Err(EncodeError::ValueOutOfRange {
                value,
                min: 0,
                max: (1u64 << n_bits) - 1,
            }
            .into());
        }
        self.put_bits(value, n_bits)
    }

    /// Write zero bits until the bit length is a multiple of `to_bits`
    pub fn align_up_zero(&mut self, to_bits: usize) -> X2apResult<()> {
        if to_bits == 0 || to_bits > 64 {
            return Err(X2apError::InvalidArgument(format!(
                "alignment {} not in 1..=64",
                to_bits
            )));
        }
        let remainder = self.bit_len % to_bits;
        if remainder != 0 {
            let padding = to_bits - remainder;
            // reserve_bits zero-fills, so skipping is enough
            self.reserve_bits(padding)?;
            self.bit_len += padding;
        }
        Ok(())
    }

    /// Write raw octets at the current position, without aligning first
    pub fn write_octets(&mut self, octets: &[u8]) -> X2apResult<()> {
        if self.is_aligned() {
            self.reserve_bits(octets.len() * 8)?;
            let start = self.bit_len / 8;
            self.buffer[start..start + octets.len()].copy_from_slice(octets);
            self.bit_len += octets.len() * 8;
            Ok(())
        } else {
            for octet in octets {
                self.put_bits(*octet as u64, 8)?;
            }
            Ok(())
        }
    }

    /// Write an unconstrained length determinant (X.691 §11.9.3.5-7)
    ///
    /// `0..=127` takes one octet, `128..=16383` two octets. Larger values
    /// fail with `LengthTooLarge` before anything is written.
    pub fn write_length_determinant(&mut self, len: usize) -> X2apResult<()> {
        match LengthDeterminant::new(len)? {
            LengthDeterminant::Short(value) => {
                self.put_bits(0, 1)?;
                self.put_bits(value as u64, 7)
            }
            LengthDeterminant::Long(value) => {
                self.put_bits(0b10, 2)?;
                self.put_bits(value as u64, 14)
            }
        }
    }

    /// Write the extension bit of an extensible type
    pub fn write_extension_bit(&mut self, extended: bool) -> X2apResult<()> {
        self.write_bit(extended)
    }

    /// Encode a constrained whole number `lb..=ub` (X.691 §10.5)
    ///
    /// Ranges up to 255 use a bit-field of minimal width, a range of 256
    /// one aligned octet, ranges up to 64K two aligned octets. Larger ranges
    /// write the octet count in a bit-field followed by aligned octets.
    pub fn write_constrained_whole_number(&mut self, value: u64, lb: u64, ub: u64) -> X2apResult<()> {
        if value < lb || value > ub {
            return Err(EncodeError::ValueOutOfRange { value, min: lb, max: ub }.into());
        }
        let range = range_of(lb, ub);
        let offset = value - lb;
        match range {
            1 => Ok(()),
            2..=255 => self.put_bits(offset, bits_for_range(range)),
            256 => {
                self.align_up_zero(8)?;
                self.put_bits(offset, 8)
            }
            257..=65536 => {
                self.align_up_zero(8)?;
                self.put_bits(offset, 16)
            }
            _ => {
                let max_octets = octets_for_value(ub - lb);
                let octets = octets_for_value(offset);
                self.put_bits((octets - 1) as u64, bits_for_range(max_octets as u128))?;
                self.align_up_zero(8)?;
                self.put_bits(offset, octets * 8)
            }
        }
    }

    /// Encode an ENUMERATED root value as its index among `count` values
    pub fn write_enumerated(&mut self, index: u32, count: u32, extensible: bool) -> X2apResult<()> {
        if extensible {
            self.write_extension_bit(false)?;
        }
        self.write_constrained_whole_number(index as u64, 0, count.saturating_sub(1) as u64)
    }

    /// Encode a CHOICE tag selecting root alternative `index` of `count`
    pub fn write_choice_index(&mut self, index: u32, count: u32, extensible: bool) -> X2apResult<()> {
        self.write_enumerated(index, count, extensible)
    }

    /// Write the bits of a bit string with no length or alignment
    fn put_bit_string(&mut self, bits: &BitString) -> X2apResult<()> {
        let whole = bits.num_bits() / 8;
        self.write_octets(&bits.as_bytes()[..whole])?;
        let rest = bits.num_bits() % 8;
        if rest != 0 {
            self.put_bits((bits.as_bytes()[whole] >> (8 - rest)) as u64, rest)?;
        }
        Ok(())
    }

    /// Encode a BIT STRING of exactly `size` bits
    pub fn write_fixed_bit_string(&mut self, bits: &BitString, size: usize) -> X2apResult<()> {
        self.write_bit_string(bits, SizeConstraint::fixed(size))
    }

    /// Encode a BIT STRING under `constraint` (X.691 §16)
    pub fn write_bit_string(&mut self, bits: &BitString, constraint: SizeConstraint) -> X2apResult<()> {
        let size = bits.num_bits();
        if constraint.extensible {
            if !constraint.contains(size) {
                return Err(EncodeError::ExtensionNotSupported { what: "BIT STRING size" }.into());
            }
            self.write_extension_bit(false)?;
        } else if !constraint.contains(size) {
            return Err(EncodeError::SizeOutOfRange {
                size,
                min: constraint.lb,
                max: constraint.ub,
            }
            .into());
        }

        if constraint.is_fixed() && constraint.ub < 65536 {
            if size > 16 {
                self.align_up_zero(8)?;
            }
            return self.put_bit_string(bits);
        }

        if constraint.ub < 65536 {
            self.write_constrained_whole_number(size as u64, constraint.lb as u64, constraint.ub as u64)?;
        } else {
            self.align_up_zero(8)?;
            self.write_length_determinant(size)?;
        }
        if size > 0 {
            self.align_up_zero(8)?;
            self.put_bit_string(bits)?;
        }
        Ok(())
    }

    /// Encode a fixed-size OCTET STRING of `size` octets
    ///
    /// Strings longer than two octets start on an octet boundary.
    pub fn write_fixed_octet_string(&mut self, octets: &[u8], size: usize) -> X2apResult<()> {
        if octets.len() != size {
            return Err(EncodeError::SizeOutOfRange {
                size: octets.len(),
                min: size,
                max: size,
            }
            .into());
        }
        if size > 2 {
            self.align_up_zero(8)?;
        }
        self.write_octets(octets)
    }

    /// Encode an unconstrained OCTET STRING: aligned length determinant and octets
    pub fn write_octet_string(&mut self, octets: &[u8]) -> X2apResult<()> {
        self.align_up_zero(8)?;
        self.write_length_determinant(octets.len())?;
        self.write_octets(octets)
    }

    /// Encode the element count of a SEQUENCE OF
    pub fn write_sequence_of_count(&mut self, count: usize, constraint: SizeConstraint) -> X2apResult<()> {
        if !constraint.contains(count) {
            return Err(EncodeError::SizeOutOfRange {
                size: count,
                min: constraint.lb,
                max: constraint.ub,
            }
            .into());
        }
        if constraint.extensible {
            self.write_extension_bit(false)?;
        }
        if constraint.ub < 65536 {
            self.write_constrained_whole_number(count as u64, constraint.lb as u64, constraint.ub as u64)
        } else {
            self.align_up_zero(8)?;
            self.write_length_determinant(count)
        }
    }

    /// Encode a SEQUENCE OF: the count, then every element in order
    pub fn write_sequence_of<T: PerCodec>(&mut self, items: &[T], constraint: SizeConstraint) -> X2apResult<()> {
        self.write_sequence_of_count(items.len(), constraint)?;
        for item in items {
            item.pack(self)?;
        }
        Ok(())
    }

    /// Encode an open type: the value produced by `pack_value` is encoded
    /// on its own, padded to whole octets and written behind an aligned
    /// length determinant.
    pub fn write_open_type<F>(&mut self, pack_value: F) -> X2apResult<()>
    where
        F: FnOnce(&mut PerEncoder<'s>) -> X2apResult<()>,
    {
        let mut inner = PerEncoder::with_options(self.config, self.sink);
        pack_value(&mut inner)?;
        let mut octets = inner.into_bytes();
        if octets.is_empty() {
            // an empty encoding still occupies one octet (X.691 §10.1.3)
            octets.push(0);
        }
        self.align_up_zero(8)?;
        self.write_length_determinant(octets.len())?;
        self.write_octets(&octets)
    }
}

impl Default for PerEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits_msb_first() {
        let mut encoder = PerEncoder::new();
        encoder.write_bits(0b1, 1).unwrap();
        encoder.write_bits(0b0110, 4).unwrap();
        encoder.write_bits(0x1FF, 9).unwrap();
        assert_eq!(encoder.bit_len(), 14);
        assert_eq!(encoder.as_bytes(), &[0b1011_0111, 0b1111_1100]);
    }

    #[test]
    fn test_write_bits_rejects_bad_width_and_value() {
        let mut encoder = PerEncoder::new();
        assert!(matches!(encoder.write_bits(0, 0), Err(X2apError::InvalidArgument(_))));
        assert!(matches!(encoder.write_bits(0, 33), Err(X2apError::InvalidArgument(_))));
        assert_eq!(
            encoder.write_bits(256, 8).unwrap_err(),
            X2apError::Encode(EncodeError::ValueOutOfRange { value: 256, min: 0, max: 255 })
        );
        assert_eq!(encoder.bit_len(), 0);
        encoder.write_bits(u32::MAX, 32).unwrap();
        assert_eq!(encoder.as_bytes(), &[0xFF; 4]);
    }

    #[test]
    fn test_align_up_zero_is_idempotent() {
        let mut encoder = PerEncoder::new();
        encoder.write_bits(0b111, 3).unwrap();
        encoder.align_up_zero(8).unwrap();
        assert_eq!(encoder.bit_len(), 8);
        encoder.align_up_zero(8).unwrap();
        assert_eq!(encoder.bit_len(), 8);
        assert_eq!(encoder.as_bytes(), &[0xE0]);
        assert!(encoder.align_up_zero(0).is_err());
    }

    #[test]
    fn test_length_determinant_bits() {
        let mut encoder = PerEncoder::new();
        encoder.write_length_determinant(5).unwrap();
        encoder.write_length_determinant(16383).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x05, 0xBF, 0xFF]);
    }

    #[test]
    fn test_length_determinant_overflow_writes_nothing() {
        let mut encoder = PerEncoder::new();
        let err = encoder.write_length_determinant(16384).unwrap_err();
        assert_eq!(err, X2apError::Encode(EncodeError::LengthTooLarge { length: 16384 }));
        assert!(encoder.write_length_determinant(1 << 20).unwrap_err().is_encode());
        assert_eq!(encoder.bit_len(), 0);
    }

    #[test]
    fn test_capacity_limit() {
        let config = CodecConfig::default().with_max_message_octets(2);
        let mut encoder = PerEncoder::with_options(config, &DEFAULT_SINK);
        encoder.write_bits(0xABCD, 16).unwrap();
        assert_eq!(
            encoder.write_bit(true).unwrap_err(),
            X2apError::Encode(EncodeError::CapacityExceeded { needed: 3, capacity: 2 })
        );
    }

    #[test]
    fn test_constrained_whole_number_forms() {
        let mut encoder = PerEncoder::new();
        // 0..7: three bits, no alignment
        encoder.write_constrained_whole_number(5, 0, 7).unwrap();
        // 1..256: one aligned octet holding value - 1
        encoder.write_constrained_whole_number(256, 1, 256).unwrap();
        // 0..4095: two aligned octets
        encoder.write_constrained_whole_number(0x123, 0, 4095).unwrap();
        assert_eq!(encoder.as_bytes(), &[0xA0, 0xFF, 0x01, 0x23]);

        let mut encoder = PerEncoder::new();
        // 0..2^32-1: 2-bit octet count, then aligned octets
        encoder.write_constrained_whole_number(0x1_0000, 0, u32::MAX as u64).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x80, 0x01, 0x00, 0x00]);

        let mut encoder = PerEncoder::new();
        assert!(encoder.write_constrained_whole_number(8, 0, 7).unwrap_err().is_encode());
    }

    #[test]
    fn test_fixed_bit_strings() {
        let mut encoder = PerEncoder::new();
        encoder.write_bit(true).unwrap();
        // 16 bits or fewer: no alignment
        let algorithms = BitString::new(vec![0xE0, 0x00], 16).unwrap();
        encoder.write_bit_string(&algorithms, SizeConstraint::fixed(16)).unwrap();
        // 28 bits: aligned first
        let cell_id = BitString::from_u32(0xABCDEF1, 28).unwrap();
        encoder.write_fixed_bit_string(&cell_id, 28).unwrap();
        assert_eq!(encoder.as_bytes(), &[0xF0, 0x00, 0x00, 0xAB, 0xCD, 0xEF, 0x10]);
        assert_eq!(encoder.bit_len(), 52);
    }

    #[test]
    fn test_variable_bit_string() {
        let mut encoder = PerEncoder::new();
        let address = BitString::new(vec![10, 0, 0, 1], 32).unwrap();
        encoder
            .write_bit_string(&address, SizeConstraint::extensible(1, 160))
            .unwrap();
        // ext bit, length - 1 = 31 in 8 bits, pad, four octets
        assert_eq!(encoder.as_bytes(), &[0x0F, 0x80, 10, 0, 0, 1]);

        let too_long = BitString::zeroed(161);
        assert_eq!(
            encoder
                .write_bit_string(&too_long, SizeConstraint::extensible(1, 160))
                .unwrap_err(),
            X2apError::Encode(EncodeError::ExtensionNotSupported { what: "BIT STRING size" })
        );
    }

    #[test]
    fn test_octet_strings() {
        let mut encoder = PerEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder.write_fixed_octet_string(&[0xAB, 0xCD], 2).unwrap();
        encoder.write_fixed_octet_string(&[0x01, 0x02, 0x03], 3).unwrap();
        encoder.write_octet_string(&[0xEE]).unwrap();
        assert_eq!(
            encoder.as_bytes(),
            &[0xD5, 0xE6, 0x80, 0x01, 0x02, 0x03, 0x01, 0xEE]
        );
        assert!(encoder.write_fixed_octet_string(&[1], 2).is_err());
    }

    #[test]
    fn test_open_type_pads_inner_value() {
        let mut encoder = PerEncoder::new();
        encoder.write_bits(0b11, 2).unwrap();
        encoder
            .write_open_type(|inner| inner.write_bits(0b101, 3))
            .unwrap();
        encoder.write_open_type(|_| Ok(())).unwrap();
        assert_eq!(encoder.as_bytes(), &[0xC0, 0x01, 0xA0, 0x01, 0x00]);
    }
}
