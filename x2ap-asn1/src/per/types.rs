//! PER building blocks shared by the encoder and decoder

use x2ap_core::{EncodeError, X2apResult};

/// Unconstrained length determinant (X.691 §11.9)
///
/// Only the single-octet and two-octet forms are supported; the fragmented
/// form for lengths of 16384 and above is rejected on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthDeterminant {
    /// `0` flag bit followed by the length in 7 bits
    Short(u8),
    /// `1`, `0` flag bits followed by the length in 14 bits
    Long(u16),
}

impl LengthDeterminant {
    pub const MAX_SHORT: usize = 127;
    pub const MAX_LONG: usize = 16383;

    /// Pick the encoding form for `length`
    pub fn new(length: usize) -> X2apResult<Self> {
        if length <= Self::MAX_SHORT {
            Ok(LengthDeterminant::Short(length as u8))
        } else if length <= Self::MAX_LONG {
            Ok(LengthDeterminant::Long(length as u16))
        } else {
            Err(EncodeError::LengthTooLarge { length }.into())
        }
    }

    pub fn value(&self) -> usize {
        match self {
            LengthDeterminant::Short(len) => *len as usize,
            LengthDeterminant::Long(len) => *len as usize,
        }
    }

    /// Encoded size in bits, flag bits included
    pub fn encoded_bits(&self) -> usize {
        match self {
            LengthDeterminant::Short(_) => 8,
            LengthDeterminant::Long(_) => 16,
        }
    }
}

/// Number of bits needed to encode the offsets `0..range`
pub fn bits_for_range(range: u128) -> usize {
    if range <= 1 {
        0
    } else {
        (128 - (range - 1).leading_zeros()) as usize
    }
}

/// Number of octets needed to hold `value`, at least one
pub fn octets_for_value(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Number of values in `lb..=ub`
pub fn range_of(lb: u64, ub: u64) -> u128 {
    (ub as u128) - (lb as u128) + 1
}

/// SIZE constraint of a BIT STRING, OCTET STRING or SEQUENCE OF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConstraint {
    pub lb: usize,
    pub ub: usize,
    pub extensible: bool,
}

impl SizeConstraint {
    pub const fn fixed(size: usize) -> Self {
        Self { lb: size, ub: size, extensible: false }
    }

    pub const fn new(lb: usize, ub: usize) -> Self {
        Self { lb, ub, extensible: false }
    }

    pub const fn extensible(lb: usize, ub: usize) -> Self {
        Self { lb, ub, extensible: true }
    }

    pub fn contains(&self, size: usize) -> bool {
        size >= self.lb && size <= self.ub
    }

    pub fn is_fixed(&self) -> bool {
        self.lb == self.ub
    }
}
