//! Bit string value type used by X2AP BIT STRING IEs

use crate::error::{X2apError, X2apResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arbitrary string of bits, stored MSB first in whole octets.
///
/// Bits past `num_bits` in the last octet are kept at zero so two equal
/// bit strings always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    bytes: Vec<u8>,
    num_bits: usize,
}

impl BitString {
    /// Construct a new bit string object.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The bit string as a byte array, MSB first
    /// * `num_bits` - The number of bits
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` does not hold exactly the octets needed
    /// for `num_bits` bits.
    pub fn new(mut bytes: Vec<u8>, num_bits: usize) -> X2apResult<Self> {
        if bytes.len() != num_bits.div_ceil(8) {
            return Err(X2apError::InvalidArgument(format!(
                "{} bits need {} octets, got {}",
                num_bits,
                num_bits.div_ceil(8),
                bytes.len()
            )));
        }
        let unused = bytes.len() * 8 - num_bits;
        if let Some(last) = bytes.last_mut() {
            *last &= 0xFFu8 << unused;
        }
        Ok(Self { bytes, num_bits })
    }

    /// An all-zero bit string of `num_bits` bits
    pub fn zeroed(num_bits: usize) -> Self {
        Self {
            bytes: vec![0; num_bits.div_ceil(8)],
            num_bits,
        }
    }

    /// Build a bit string from the lowest `num_bits` bits of `value`.
    pub fn from_u32(value: u32, num_bits: usize) -> X2apResult<Self> {
        if num_bits == 0 || num_bits > 32 {
            return Err(X2apError::InvalidArgument(format!(
                "bit width {} not in 1..=32",
                num_bits
            )));
        }
        if num_bits < 32 && value >> num_bits != 0 {
            return Err(X2apError::InvalidArgument(format!(
                "value {:#x} does not fit in {} bits",
                value, num_bits
            )));
        }
        let aligned = (value as u64) << (32 - num_bits);
        let bytes = (aligned as u32).to_be_bytes()[..num_bits.div_ceil(8)].to_vec();
        Ok(Self { bytes, num_bits })
    }

    /// Interpret a bit string of at most 32 bits as an unsigned value.
    pub fn to_u32(&self) -> Option<u32> {
        if self.num_bits == 0 || self.num_bits > 32 {
            return None;
        }
        let mut padded = [0u8; 4];
        padded[..self.bytes.len()].copy_from_slice(&self.bytes);
        Some(u32::from_be_bytes(padded) >> (32 - self.num_bits))
    }

    /// Get the bit string as byte array.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The number of bits in the byte array.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Get the bit at a specific position
    ///
    /// # Arguments
    /// * `index` - The bit index (0-based)
    ///
    /// # Returns
    /// * `true` if the bit is set, `false` otherwise
    /// * `Err` if the index is out of bounds
    pub fn get_bit(&self, index: usize) -> X2apResult<bool> {
        if index >= self.num_bits {
            return Err(X2apError::InvalidArgument(format!(
                "Bit index {} out of bounds (num_bits: {})",
                index, self.num_bits
            )));
        }
        let byte_index = index / 8;
        let bit_index = 7 - (index % 8); // MSB first
        Ok((self.bytes[byte_index] >> bit_index) & 1 == 1)
    }

    /// Set the bit at a specific position
    pub fn set_bit(&mut self, index: usize, value: bool) -> X2apResult<()> {
        if index >= self.num_bits {
            return Err(X2apError::InvalidArgument(format!(
                "Bit index {} out of bounds (num_bits: {})",
                index, self.num_bits
            )));
        }
        let byte_index = index / 8;
        let bit_index = 7 - (index % 8);
        if value {
            self.bytes[byte_index] |= 1 << bit_index;
        } else {
            self.bytes[byte_index] &= !(1 << bit_index);
        }
        Ok(())
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.num_bits {
            let bit = (self.bytes[index / 8] >> (7 - index % 8)) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_string_new() {
        let bytes = vec![0xFF, 0x00, 0xAA];
        let bit_string = BitString::new(bytes.clone(), 24).unwrap();
        assert_eq!(bit_string.as_bytes(), &bytes);
        assert_eq!(bit_string.num_bits(), 24);
    }

    #[test]
    fn test_bit_string_invalid() {
        assert!(BitString::new(vec![0xFF], 16).is_err());
        assert!(BitString::new(vec![0xFF, 0xFF], 4).is_err());
    }

    #[test]
    fn test_bit_string_masks_unused_bits() {
        let bit_string = BitString::new(vec![0xFF], 4).unwrap();
        assert_eq!(bit_string.as_bytes(), &[0xF0]);
        assert_eq!(bit_string, BitString::new(vec![0xF0], 4).unwrap());
    }

    #[test]
    fn test_from_u32_28_bits() {
        let cell_id = BitString::from_u32(0x0123_4567, 28).unwrap();
        assert_eq!(cell_id.as_bytes(), &[0x12, 0x34, 0x56, 0x70]);
        assert_eq!(cell_id.to_u32(), Some(0x0123_4567));
        assert!(BitString::from_u32(0x1000_0000, 28).is_err());
    }

    #[test]
    fn test_get_set_bit() {
        let mut bits = BitString::zeroed(10);
        bits.set_bit(9, true).unwrap();
        assert!(bits.get_bit(9).unwrap());
        assert!(!bits.get_bit(0).unwrap());
        assert!(bits.get_bit(10).is_err());
        assert_eq!(bits.to_string(), "0000000001");
    }
}
