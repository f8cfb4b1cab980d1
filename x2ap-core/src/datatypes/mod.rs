//! Value types shared by the X2AP IE codecs

pub mod bit_string;

pub use bit_string::BitString;
