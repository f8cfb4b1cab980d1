//! Codec configuration
//!
//! A `CodecConfig` is plain data handed to every read/write cursor. It holds
//! the decode hardening limits and the write cursor capacity; there is no
//! process-wide configuration.

use serde::{Deserialize, Serialize};

/// Default upper bound for a decoded SEQUENCE OF element count
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 4096;

/// Options controlling a single pack or unpack call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Fail with `NonZeroPadding` when an alignment skips a bit set to 1
    pub strict_padding: bool,
    /// Largest SEQUENCE OF count accepted on decode, checked before allocation
    pub max_sequence_len: usize,
    /// Capacity of the write cursor in octets, unbounded when `None`
    pub max_message_octets: Option<usize>,
    /// Skip unknown protocol IEs whose criticality is ignore or notify
    pub skip_unknown_ies: bool,
}

impl CodecConfig {
    /// Configuration rejecting anything a conformant peer would not send
    pub fn strict() -> Self {
        Self {
            strict_padding: true,
            skip_unknown_ies: false,
            ..Self::default()
        }
    }

    pub fn with_max_message_octets(mut self, octets: usize) -> Self {
        self.max_message_octets = Some(octets);
        self
    }

    pub fn with_max_sequence_len(mut self, len: usize) -> Self {
        self.max_sequence_len = len;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_padding: false,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            max_message_octets: None,
            skip_unknown_ies: true,
        }
    }
}
