//! Aligned PER read cursor
//!
//! `PerDecoder` is the exact mirror of `PerEncoder`. It borrows the input
//! for the lifetime of one unpack call and checks every read against the
//! remaining bits, so truncated input fails with `UnexpectedEndOfInput`
//! instead of reading past the buffer.

use crate::per::codec::PerCodec;
use crate::per::types::{
    bits_for_range, octets_for_value, range_of, LengthDeterminant, SizeConstraint,
};
use x2ap_core::{BitString, CodecConfig, DecodeError, DiagnosticSink, LogSink, X2apError, X2apResult};

static DEFAULT_SINK: LogSink = LogSink;

/// Read cursor for aligned PER decoding
pub struct PerDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
    config: CodecConfig,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> PerDecoder<'a> {
    /// Create a new decoder with the default configuration, logging through `log`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_options(buffer, CodecConfig::default(), &DEFAULT_SINK)
    }

    /// Create a new decoder for one unpack call
    pub fn with_options(buffer: &'a [u8], config: CodecConfig, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            buffer,
            position: 0,
            config,
            sink,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn sink(&self) -> &'a dyn DiagnosticSink {
        self.sink
    }

    /// Current bit position
    pub fn bit_position(&self) -> usize {
        self.position
    }

    /// Bits left before the end of the input
    pub fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - self.position
    }

    pub fn is_aligned(&self) -> bool {
        self.position % 8 == 0
    }

    fn ensure_bits(&self, needed: usize) -> X2apResult<()> {
        let available = self.remaining_bits();
        if needed > available {
            return Err(DecodeError::UnexpectedEndOfInput { needed, available }.into());
        }
        Ok(())
    }

    /// Read `n_bits` bits MSB first without validating the width.
    fn take_bits(&mut self, n_bits: usize) -> X2apResult<u64> {
        self.ensure_bits(n_bits)?;
        let mut value = 0u64;
        for _ in 0..n_bits {
            let bit = (self.buffer[self.position / 8] >> (7 - self.position % 8)) & 1;
            value = (value << 1) | bit as u64;
            self.position += 1;
        }
        Ok(value)
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> X2apResult<bool> {
        Ok(self.take_bits(1)? == 1)
    }

    /// Read `n_bits` bits (1..=32) MSB first
    pub fn read_bits(&mut self, n_bits: usize) -> X2apResult<u32> {
        if n_bits == 0 || n_bits > 32 {
            return Err(X2apError::InvalidArgument(format!(
                "bit width {} not in 1..=32",
                n_bits
            )));
        }
        Ok(self.take_bits(n_bits)? as u32)
    }

    /// Read `n_bits` bits (1..=64) MSB first
    pub fn read_bits_u64(&mut self, n_bits: usize) -> X2apResult<u64> {
        if n_bits == 0 || n_bits > 64 {
            return Err(X2apError::InvalidArgument(format!(
                "bit width {} not in 1..=64",
                n_bits
            )));
        }
        self.take_bits(n_bits)
    }

    /// Skip to the next multiple of `to_bits`
    ///
    /// Skipped bits are only checked when `strict_padding` is configured.
    pub fn align_up(&mut self, to_bits: usize) -> X2apResult<()> {
        if to_bits == 0 || to_bits > 64 {
            return Err(X2apError::InvalidArgument(format!(
                "alignment {} not in 1..=64",
                to_bits
            )));
        }
        let remainder = self.position % to_bits;
        if remainder == 0 {
            return Ok(());
        }
        let padding = to_bits - remainder;
        self.ensure_bits(padding)?;
        if self.config.strict_padding {
            for _ in 0..padding {
                let position = self.position;
                if self.take_bits(1)? != 0 {
                    return Err(DecodeError::NonZeroPadding { position }.into());
                }
            }
        } else {
            self.position += padding;
        }
        Ok(())
    }

    /// Borrow `len` octets from an aligned position
    fn take_aligned_octets(&mut self, len: usize) -> X2apResult<&'a [u8]> {
        debug_assert!(self.is_aligned());
        self.ensure_bits(len * 8)?;
        let start = self.position / 8;
        self.position += len * 8;
        Ok(&self.buffer[start..start + len])
    }

    /// Read `len` raw octets at the current position, without aligning first
    pub fn read_octets(&mut self, len: usize) -> X2apResult<Vec<u8>> {
        if self.is_aligned() {
            return Ok(self.take_aligned_octets(len)?.to_vec());
        }
        self.ensure_bits(len * 8)?;
        let mut octets = Vec::with_capacity(len);
        for _ in 0..len {
            octets.push(self.take_bits(8)? as u8);
        }
        Ok(octets)
    }

    /// Read an unconstrained length determinant (X.691 §11.9.3.5-7)
    pub fn read_length_determinant(&mut self) -> X2apResult<usize> {
        if !self.read_bit()? {
            let len = self.take_bits(7)? as u8;
            return Ok(LengthDeterminant::Short(len).value());
        }
        if !self.read_bit()? {
            let len = self.take_bits(14)? as u16;
            return Ok(LengthDeterminant::Long(len).value());
        }
        Err(DecodeError::LengthTooLarge.into())
    }

    /// Read the extension bit of an extensible type, rejecting extensions
    pub fn read_extension_bit(&mut self, what: &'static str) -> X2apResult<()> {
        if self.read_bit()? {
            return Err(DecodeError::ExtensionNotSupported { what }.into());
        }
        Ok(())
    }

    /// Decode a constrained whole number `lb..=ub` (X.691 §10.5)
    pub fn read_constrained_whole_number(&mut self, lb: u64, ub: u64) -> X2apResult<u64> {
        let range = range_of(lb, ub);
        let offset = match range {
            1 => 0,
            2..=255 => self.take_bits(bits_for_range(range))?,
            256 => {
                self.align_up(8)?;
                self.take_bits(8)?
            }
            257..=65536 => {
                self.align_up(8)?;
                self.take_bits(16)?
            }
            _ => {
                let max_octets = octets_for_value(ub - lb);
                let octets = self.take_bits(bits_for_range(max_octets as u128))? as usize + 1;
                if octets > max_octets {
                    return Err(DecodeError::SizeOutOfRange {
                        size: octets,
                        min: 1,
                        max: max_octets,
                    }
                    .into());
                }
                self.align_up(8)?;
                self.take_bits(octets * 8)?
            }
        };
        let value = offset
            .checked_add(lb)
            .filter(|value| *value <= ub)
            .ok_or(DecodeError::ValueOutOfRange {
                value: offset,
                min: lb,
                max: ub,
            })?;
        Ok(value)
    }

    /// Decode an ENUMERATED root index among `count` values
    ///
    /// An index that fits the bit-field but lies past the last root value
    /// fails with `UnknownChoice`.
    pub fn read_enumerated(&mut self, count: u32, extensible: bool, what: &'static str) -> X2apResult<u32> {
        if extensible {
            self.read_extension_bit(what)?;
        }
        let ub = count.saturating_sub(1) as u64;
        let range = range_of(0, ub);
        let index = if range <= 255 {
            self.take_bits(bits_for_range(range))?
        } else {
            self.read_constrained_whole_number(0, ub)?
        };
        if index > ub {
            return Err(DecodeError::UnknownChoice {
                what,
                index: index as u32,
            }
            .into());
        }
        Ok(index as u32)
    }

    /// Decode a CHOICE tag among `count` root alternatives
    pub fn read_choice_index(&mut self, count: u32, extensible: bool, what: &'static str) -> X2apResult<u32> {
        self.read_enumerated(count, extensible, what)
    }

    fn take_bit_string(&mut self, num_bits: usize) -> X2apResult<BitString> {
        self.ensure_bits(num_bits)?;
        let mut bytes = self.read_octets(num_bits / 8)?;
        let rest = num_bits % 8;
        if rest != 0 {
            bytes.push((self.take_bits(rest)? as u8) << (8 - rest));
        }
        BitString::new(bytes, num_bits)
    }

    /// Decode a BIT STRING of exactly `size` bits
    pub fn read_fixed_bit_string(&mut self, size: usize) -> X2apResult<BitString> {
        self.read_bit_string(SizeConstraint::fixed(size))
    }

    /// Decode a BIT STRING under `constraint` (X.691 §16)
    pub fn read_bit_string(&mut self, constraint: SizeConstraint) -> X2apResult<BitString> {
        if constraint.extensible {
            self.read_extension_bit("BIT STRING size")?;
        }

        if constraint.is_fixed() && constraint.ub < 65536 {
            if constraint.ub > 16 {
                self.align_up(8)?;
            }
            return self.take_bit_string(constraint.ub);
        }

        let size = if constraint.ub < 65536 {
            self.read_constrained_whole_number(constraint.lb as u64, constraint.ub as u64)? as usize
        } else {
            self.align_up(8)?;
            let size = self.read_length_determinant()?;
            if !constraint.contains(size) {
                return Err(DecodeError::SizeOutOfRange {
                    size,
                    min: constraint.lb,
                    max: constraint.ub,
                }
                .into());
            }
            size
        };
        if size > 0 {
            self.align_up(8)?;
        }
        self.take_bit_string(size)
    }

    /// Decode a fixed-size OCTET STRING of `size` octets
    pub fn read_fixed_octet_string(&mut self, size: usize) -> X2apResult<Vec<u8>> {
        if size > 2 {
            self.align_up(8)?;
        }
        self.read_octets(size)
    }

    /// Decode a fixed-size OCTET STRING into an array
    pub fn read_octet_array<const N: usize>(&mut self) -> X2apResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(&self.read_fixed_octet_string(N)?);
        Ok(array)
    }

    /// Decode an unconstrained OCTET STRING
    pub fn read_octet_string(&mut self) -> X2apResult<Vec<u8>> {
        self.align_up(8)?;
        let len = self.read_length_determinant()?;
        Ok(self.take_aligned_octets(len)?.to_vec())
    }

    /// Decode the element count of a SEQUENCE OF
    ///
    /// Counts above the configured `max_sequence_len` are rejected here,
    /// before any element storage is allocated.
    pub fn read_sequence_of_count(&mut self, constraint: SizeConstraint) -> X2apResult<usize> {
        if constraint.extensible {
            self.read_extension_bit("SEQUENCE OF size")?;
        }
        let count = if constraint.ub < 65536 {
            self.read_constrained_whole_number(constraint.lb as u64, constraint.ub as u64)? as usize
        } else {
            self.align_up(8)?;
            self.read_length_determinant()?
        };
        let max = constraint.ub.min(self.config.max_sequence_len);
        if count < constraint.lb || count > max {
            return Err(DecodeError::SizeOutOfRange {
                size: count,
                min: constraint.lb,
                max,
            }
            .into());
        }
        Ok(count)
    }

    /// Decode a SEQUENCE OF: the count, then every element in order
    pub fn read_sequence_of<T: PerCodec>(&mut self, constraint: SizeConstraint) -> X2apResult<Vec<T>> {
        let count = self.read_sequence_of_count(constraint)?;
        let mut items = Vec::with_capacity(count.min(self.remaining_bits()));
        for _ in 0..count {
            items.push(T::unpack(self)?);
        }
        Ok(items)
    }

    /// Decode an open type
    ///
    /// The declared octets are handed to `unpack_value` through a separate
    /// decoder, so the inner value can never read past its own length.
    pub fn read_open_type<T, F>(&mut self, unpack_value: F) -> X2apResult<T>
    where
        F: FnOnce(&mut PerDecoder<'a>) -> X2apResult<T>,
    {
        let octets = self.read_open_type_octets()?;
        let mut inner = PerDecoder::with_options(octets, self.config, self.sink);
        let value = unpack_value(&mut inner)?;
        inner.finish()?;
        Ok(value)
    }

    /// Read the raw octets of an open type without interpreting them
    pub fn read_open_type_octets(&mut self) -> X2apResult<&'a [u8]> {
        self.align_up(8)?;
        let len = self.read_length_determinant()?;
        self.take_aligned_octets(len)
    }

    /// Check that nothing but padding follows the decoded value
    ///
    /// A value encoded in zero bits still occupies a single zero octet.
    pub fn finish(&mut self) -> X2apResult<()> {
        let consumed = self.position;
        self.align_up(8)?;
        let leftover = self.buffer.len() - self.position / 8;
        if leftover == 0 || (consumed == 0 && leftover == 1 && self.buffer[0] == 0) {
            return Ok(());
        }
        Err(DecodeError::TrailingData { octets: leftover }.into())
    }
}
