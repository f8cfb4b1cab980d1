//! Core types and utilities for the X2AP PER codec
//!
//! This crate provides the error taxonomy, the codec configuration and the
//! diagnostic sink shared by the codec crates.

pub mod error;
pub mod config;
pub mod diagnostics;
pub mod datatypes;

pub use error::{DecodeError, EncodeError, X2apError, X2apResult};
pub use config::CodecConfig;
pub use diagnostics::{DiagnosticSink, LogSink, NullSink};
pub use datatypes::BitString;

#[cfg(any(test, feature = "mock"))]
pub use diagnostics::MockDiagnosticSink;
