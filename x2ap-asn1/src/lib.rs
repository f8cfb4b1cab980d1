//! ASN.1 aligned PER codec for X2AP
//!
//! This crate provides the bit cursor the whole codec is built on, and the
//! X2AP information elements, messages and PDU envelope composed from it.
//!
//! # Layout
//!
//! - `per`: the PER write/read cursors and the `PerCodec` trait
//! - `ie`: information element codecs
//! - `messages`: ProtocolIE-Container messages
//! - `pdu`: the X2AP-PDU envelope

#[macro_use]
mod macros;

pub mod per;
pub mod ie;
pub mod messages;
pub mod pdu;

mod capture_tests;

pub use per::{LengthDeterminant, PerCodec, PerDecoder, PerEncoder, SizeConstraint};
pub use pdu::{InitiatingMessage, SuccessfulOutcome, UnsuccessfulOutcome, X2apPdu};
