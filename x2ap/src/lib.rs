//! x2ap - Rust implementation of the X2AP aligned PER codec
//!
//! This library encodes and decodes X2AP (3GPP TS 36.423, the LTE
//! inter-eNodeB interface) PDUs using ASN.1 aligned PER (ITU-T X.691).
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `x2ap-core`: Error taxonomy, codec configuration, diagnostic sink
//! - `x2ap-asn1`: PER bit cursor, IE codecs, message codecs, PDU envelope
//!
//! # Implementation Status
//!
//! - Handover Preparation (request, acknowledge, failure)
//! - Handover Cancel
//! - SN Status Transfer
//! - UE Context Release
//! - Error Indication
//! - Reset (request, response)
//!
//! Extension additions are not supported: a set extension bit fails to
//! decode, and a value that needs one fails to encode.
//!
//! # Usage
//!
//! ```rust
//! use x2ap::{Cause, CauseMisc, InitiatingMessage, NullSink, ResetRequest, X2apCodec, X2apPdu};
//!
//! let codec = X2apCodec::with_sink(NullSink);
//! let pdu = X2apPdu::InitiatingMessage(InitiatingMessage::ResetRequest(ResetRequest {
//!     cause: Cause::Misc(CauseMisc::OmIntervention),
//! }));
//! let bytes = codec.pack(&pdu).unwrap();
//! assert_eq!(codec.unpack(&bytes).unwrap(), pdu);
//! ```

use bytes::Bytes;
use log::Level;

// Re-export core types
pub use x2ap_core::{
    BitString, CodecConfig, DecodeError, DiagnosticSink, EncodeError, LogSink, NullSink, X2apError, X2apResult,
};

// Re-export the PDU model
pub use x2ap_asn1::ie::*;
pub use x2ap_asn1::messages::{
    ErrorIndication, HandoverCancel, HandoverPreparationFailure, HandoverRequest, HandoverRequestAcknowledge,
    ResetRequest, ResetResponse, SnStatusTransfer, TargetEnbToSourceEnbTransparentContainer, UeContextRelease,
};
pub use x2ap_asn1::pdu::{InitiatingMessage, SuccessfulOutcome, UnsuccessfulOutcome, X2apPdu};

// Re-export the PER layer for custom IEs
pub mod per {
    pub use x2ap_asn1::per::*;
}

/// Top-level X2AP packer/unpacker
///
/// Every call builds its own cursor, so one codec can serve any number of
/// calls, from any number of threads when the sink allows it. Outcomes are
/// reported to the sink: trace on success, debug on failure.
#[derive(Debug, Clone, Default)]
pub struct X2apCodec<S: DiagnosticSink = LogSink> {
    config: CodecConfig,
    sink: S,
}

impl X2apCodec<LogSink> {
    /// Codec with the default configuration, reporting through `log`
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DiagnosticSink> X2apCodec<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            config: CodecConfig::default(),
            sink,
        }
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Encode a PDU
    ///
    /// On failure nothing is returned; a partially written buffer is never
    /// exposed.
    pub fn pack(&self, pdu: &X2apPdu) -> X2apResult<Bytes> {
        match pdu.encode_with(self.config, &self.sink) {
            Ok(bytes) => {
                self.sink.report(
                    Level::Trace,
                    &format!("packed {} ({} octets)", pdu.message_name(), bytes.len()),
                );
                Ok(bytes)
            }
            Err(e) => {
                self.sink
                    .report(Level::Debug, &format!("failed to pack {}: {}", pdu.message_name(), e));
                Err(e)
            }
        }
    }

    /// Decode a PDU that must span all of `bytes`
    pub fn unpack(&self, bytes: &[u8]) -> X2apResult<X2apPdu> {
        match X2apPdu::decode_with(bytes, self.config, &self.sink) {
            Ok(pdu) => {
                self.sink.report(
                    Level::Trace,
                    &format!("unpacked {} ({} octets)", pdu.message_name(), bytes.len()),
                );
                Ok(pdu)
            }
            Err(e) => {
                self.sink
                    .report(Level::Debug, &format!("failed to unpack {} octets: {}", bytes.len(), e));
                Err(e)
            }
        }
    }
}
