//! X2AP PDU envelope
//!
//! This module provides the top-level X2AP-PDU and its three message
//! categories:
//! - InitiatingMessage (requests and class 2 messages)
//! - SuccessfulOutcome (positive responses)
//! - UnsuccessfulOutcome (negative responses)
//!
//! # Encoding Format
//!
//! ```text
//! X2AP-PDU ::= CHOICE { initiatingMessage, successfulOutcome, unsuccessfulOutcome, ... }
//!
//! InitiatingMessage ::= SEQUENCE {
//!     procedureCode   ProcedureCode,      -- one aligned octet
//!     criticality     Criticality,        -- 2 bits
//!     value           open type           -- aligned length + octets
//! }
//! ```
//!
//! The procedure code and criticality are derived from the message variant
//! on encode. On decode the procedure code selects the message codec; a
//! code this crate does not implement fails with `UnknownProcedure`.

use crate::ie::common::{Criticality, ProcedureCode};
use crate::messages::{
    ErrorIndication, HandoverCancel, HandoverPreparationFailure, HandoverRequest, HandoverRequestAcknowledge,
    ResetRequest, ResetResponse, SnStatusTransfer, UeContextRelease,
};
use crate::per::{PerCodec, PerDecoder, PerEncoder};
use bytes::Bytes;
use x2ap_core::{CodecConfig, DecodeError, DiagnosticSink, X2apError, X2apResult};

/// Value of an InitiatingMessage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitiatingMessage {
    HandoverRequest(HandoverRequest),
    HandoverCancel(HandoverCancel),
    ErrorIndication(ErrorIndication),
    SnStatusTransfer(SnStatusTransfer),
    UeContextRelease(UeContextRelease),
    ResetRequest(ResetRequest),
}

impl InitiatingMessage {
    pub fn procedure_code(&self) -> ProcedureCode {
        match self {
            InitiatingMessage::HandoverRequest(_) => ProcedureCode::HANDOVER_PREPARATION,
            InitiatingMessage::HandoverCancel(_) => ProcedureCode::HANDOVER_CANCEL,
            InitiatingMessage::ErrorIndication(_) => ProcedureCode::ERROR_INDICATION,
            InitiatingMessage::SnStatusTransfer(_) => ProcedureCode::SN_STATUS_TRANSFER,
            InitiatingMessage::UeContextRelease(_) => ProcedureCode::UE_CONTEXT_RELEASE,
            InitiatingMessage::ResetRequest(_) => ProcedureCode::RESET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitiatingMessage::HandoverRequest(_) => "HandoverRequest",
            InitiatingMessage::HandoverCancel(_) => "HandoverCancel",
            InitiatingMessage::ErrorIndication(_) => "ErrorIndication",
            InitiatingMessage::SnStatusTransfer(_) => "SNStatusTransfer",
            InitiatingMessage::UeContextRelease(_) => "UEContextRelease",
            InitiatingMessage::ResetRequest(_) => "ResetRequest",
        }
    }

    fn pack_value(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        match self {
            InitiatingMessage::HandoverRequest(message) => message.pack(encoder),
            InitiatingMessage::HandoverCancel(message) => message.pack(encoder),
            InitiatingMessage::ErrorIndication(message) => message.pack(encoder),
            InitiatingMessage::SnStatusTransfer(message) => message.pack(encoder),
            InitiatingMessage::UeContextRelease(message) => message.pack(encoder),
            InitiatingMessage::ResetRequest(message) => message.pack(encoder),
        }
    }

    fn unpack_value(code: ProcedureCode, decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        let message = match code {
            ProcedureCode::HANDOVER_PREPARATION => InitiatingMessage::HandoverRequest(HandoverRequest::unpack(decoder)?),
            ProcedureCode::HANDOVER_CANCEL => InitiatingMessage::HandoverCancel(HandoverCancel::unpack(decoder)?),
            ProcedureCode::ERROR_INDICATION => InitiatingMessage::ErrorIndication(ErrorIndication::unpack(decoder)?),
            ProcedureCode::SN_STATUS_TRANSFER => InitiatingMessage::SnStatusTransfer(SnStatusTransfer::unpack(decoder)?),
            ProcedureCode::UE_CONTEXT_RELEASE => InitiatingMessage::UeContextRelease(UeContextRelease::unpack(decoder)?),
            ProcedureCode::RESET => InitiatingMessage::ResetRequest(ResetRequest::unpack(decoder)?),
            ProcedureCode(code) => return Err(X2apError::Decode(DecodeError::UnknownProcedure { code })),
        };
        Ok(message)
    }
}

/// Value of a SuccessfulOutcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessfulOutcome {
    HandoverRequestAcknowledge(HandoverRequestAcknowledge),
    ResetResponse(ResetResponse),
}

impl SuccessfulOutcome {
    pub fn procedure_code(&self) -> ProcedureCode {
        match self {
            SuccessfulOutcome::HandoverRequestAcknowledge(_) => ProcedureCode::HANDOVER_PREPARATION,
            SuccessfulOutcome::ResetResponse(_) => ProcedureCode::RESET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SuccessfulOutcome::HandoverRequestAcknowledge(_) => "HandoverRequestAcknowledge",
            SuccessfulOutcome::ResetResponse(_) => "ResetResponse",
        }
    }

    fn pack_value(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        match self {
            SuccessfulOutcome::HandoverRequestAcknowledge(message) => message.pack(encoder),
            SuccessfulOutcome::ResetResponse(message) => message.pack(encoder),
        }
    }

    fn unpack_value(code: ProcedureCode, decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        match code {
            ProcedureCode::HANDOVER_PREPARATION => Ok(SuccessfulOutcome::HandoverRequestAcknowledge(
                HandoverRequestAcknowledge::unpack(decoder)?,
            )),
            ProcedureCode::RESET => Ok(SuccessfulOutcome::ResetResponse(ResetResponse::unpack(decoder)?)),
            ProcedureCode(code) => Err(X2apError::Decode(DecodeError::UnknownProcedure { code })),
        }
    }
}

/// Value of an UnsuccessfulOutcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsuccessfulOutcome {
    HandoverPreparationFailure(HandoverPreparationFailure),
}

impl UnsuccessfulOutcome {
    pub fn procedure_code(&self) -> ProcedureCode {
        match self {
            UnsuccessfulOutcome::HandoverPreparationFailure(_) => ProcedureCode::HANDOVER_PREPARATION,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnsuccessfulOutcome::HandoverPreparationFailure(_) => "HandoverPreparationFailure",
        }
    }

    fn pack_value(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        match self {
            UnsuccessfulOutcome::HandoverPreparationFailure(message) => message.pack(encoder),
        }
    }

    fn unpack_value(code: ProcedureCode, decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        match code {
            ProcedureCode::HANDOVER_PREPARATION => Ok(UnsuccessfulOutcome::HandoverPreparationFailure(
                HandoverPreparationFailure::unpack(decoder)?,
            )),
            ProcedureCode(code) => Err(X2apError::Decode(DecodeError::UnknownProcedure { code })),
        }
    }
}

/// X2AP-PDU
///
/// # Usage Example
///
/// ```rust
/// use x2ap_asn1::ie::{Cause, CauseMisc};
/// use x2ap_asn1::messages::ResetRequest;
/// use x2ap_asn1::pdu::{InitiatingMessage, X2apPdu};
///
/// let pdu = X2apPdu::InitiatingMessage(InitiatingMessage::ResetRequest(ResetRequest {
///     cause: Cause::Misc(CauseMisc::OmIntervention),
/// }));
/// let bytes = pdu.encode().unwrap();
/// assert_eq!(X2apPdu::decode(&bytes).unwrap(), pdu);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum X2apPdu {
    InitiatingMessage(InitiatingMessage),
    SuccessfulOutcome(SuccessfulOutcome),
    UnsuccessfulOutcome(UnsuccessfulOutcome),
}

impl X2apPdu {
    const ALTERNATIVES: u32 = 3;

    /// Procedure code of the carried message
    pub fn procedure_code(&self) -> ProcedureCode {
        match self {
            X2apPdu::InitiatingMessage(message) => message.procedure_code(),
            X2apPdu::SuccessfulOutcome(message) => message.procedure_code(),
            X2apPdu::UnsuccessfulOutcome(message) => message.procedure_code(),
        }
    }

    /// Criticality of the procedure, as sent in the envelope
    pub fn criticality(&self) -> Criticality {
        match self.procedure_code() {
            ProcedureCode::HANDOVER_PREPARATION | ProcedureCode::RESET => Criticality::Reject,
            _ => Criticality::Ignore,
        }
    }

    /// Name of the carried message, for diagnostics
    pub fn message_name(&self) -> &'static str {
        match self {
            X2apPdu::InitiatingMessage(message) => message.name(),
            X2apPdu::SuccessfulOutcome(message) => message.name(),
            X2apPdu::UnsuccessfulOutcome(message) => message.name(),
        }
    }

    /// Encode with the default configuration, logging through `log`
    pub fn encode(&self) -> X2apResult<Bytes> {
        Ok(Bytes::from(self.to_per_bytes()?))
    }

    /// Encode with an explicit configuration and diagnostic sink
    pub fn encode_with(&self, config: CodecConfig, sink: &dyn DiagnosticSink) -> X2apResult<Bytes> {
        let mut encoder = PerEncoder::with_options(config, sink);
        self.pack(&mut encoder)?;
        Ok(Bytes::from(encoder.into_bytes()))
    }

    /// Decode a complete PDU with the default configuration
    ///
    /// # Errors
    /// * `TrailingData` if octets follow the PDU
    pub fn decode(bytes: &[u8]) -> X2apResult<Self> {
        Self::from_per_bytes(bytes)
    }

    /// Decode a complete PDU with an explicit configuration and diagnostic sink
    pub fn decode_with(bytes: &[u8], config: CodecConfig, sink: &dyn DiagnosticSink) -> X2apResult<Self> {
        let mut decoder = PerDecoder::with_options(bytes, config, sink);
        let pdu = Self::unpack(&mut decoder)?;
        decoder.finish()?;
        Ok(pdu)
    }
}

impl PerCodec for X2apPdu {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        let index = match self {
            X2apPdu::InitiatingMessage(_) => 0,
            X2apPdu::SuccessfulOutcome(_) => 1,
            X2apPdu::UnsuccessfulOutcome(_) => 2,
        };
        encoder.write_choice_index(index, Self::ALTERNATIVES, true)?;
        self.procedure_code().pack(encoder)?;
        self.criticality().pack(encoder)?;
        encoder.write_open_type(|inner| match self {
            X2apPdu::InitiatingMessage(message) => message.pack_value(inner),
            X2apPdu::SuccessfulOutcome(message) => message.pack_value(inner),
            X2apPdu::UnsuccessfulOutcome(message) => message.pack_value(inner),
        })
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        let index = decoder.read_choice_index(Self::ALTERNATIVES, true, "X2AP-PDU")?;
        let code = ProcedureCode::unpack(decoder)?;
        // the procedure already fixes the criticality
        Criticality::unpack(decoder)?;
        match index {
            0 => Ok(X2apPdu::InitiatingMessage(
                decoder.read_open_type(|inner| InitiatingMessage::unpack_value(code, inner))?,
            )),
            1 => Ok(X2apPdu::SuccessfulOutcome(
                decoder.read_open_type(|inner| SuccessfulOutcome::unpack_value(code, inner))?,
            )),
            2 => Ok(X2apPdu::UnsuccessfulOutcome(
                decoder.read_open_type(|inner| UnsuccessfulOutcome::unpack_value(code, inner))?,
            )),
            index => Err(X2apError::Decode(DecodeError::UnknownChoice { what: "X2AP-PDU", index })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::{Cause, CauseRadioNetwork};
    use crate::ie::identity::UeX2apId;

    fn handover_cancel() -> X2apPdu {
        X2apPdu::InitiatingMessage(InitiatingMessage::HandoverCancel(HandoverCancel {
            old_enb_ue_x2ap_id: UeX2apId(1),
            new_enb_ue_x2ap_id: None,
            cause: Cause::RadioNetwork(CauseRadioNetwork::Tx2RelocOverallExpiry),
        }))
    }

    #[test]
    fn test_envelope_layout() {
        let bytes = handover_cancel().encode().unwrap();
        assert_eq!(&bytes[..4], &[0x00, 0x01, 0x40, 0x0F]);
        assert_eq!(bytes.len(), 4 + 15);
    }

    #[test]
    fn test_successful_outcome_tag() {
        let pdu = X2apPdu::SuccessfulOutcome(SuccessfulOutcome::ResetResponse(ResetResponse::default()));
        let bytes = pdu.encode().unwrap();
        assert_eq!(bytes.as_ref(), &[0x20, 0x07, 0x00, 0x03, 0x00, 0x00, 0x00]);
        assert_eq!(X2apPdu::decode(&bytes).unwrap(), pdu);
        assert_eq!(pdu.criticality(), Criticality::Reject);
        assert_eq!(pdu.message_name(), "ResetResponse");
    }

    #[test]
    fn test_unknown_procedure() {
        // X2 Setup (6) is not implemented
        let bytes = [0x00, 0x06, 0x00, 0x03, 0x00, 0x00, 0x00];
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::UnknownProcedure { code: 6 })
        );
        // HandoverCancel has no successful outcome
        let bytes = [0x20, 0x01, 0x40, 0x03, 0x00, 0x00, 0x00];
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::UnknownProcedure { code: 1 })
        );
    }

    #[test]
    fn test_pdu_tags_past_root() {
        assert_eq!(
            X2apPdu::decode(&[0x60, 0x00]).unwrap_err(),
            X2apError::Decode(DecodeError::UnknownChoice { what: "X2AP-PDU", index: 3 })
        );
        assert_eq!(
            X2apPdu::decode(&[0x80, 0x00]).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "X2AP-PDU" })
        );
    }

    #[test]
    fn test_trailing_octets_rejected() {
        let mut bytes = handover_cancel().encode().unwrap().to_vec();
        bytes.push(0xFF);
        assert_eq!(
            X2apPdu::decode(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::TrailingData { octets: 1 })
        );
    }

    #[test]
    fn test_truncated_pdu() {
        let bytes = handover_cancel().encode().unwrap();
        for len in 0..bytes.len() {
            assert!(X2apPdu::decode(&bytes[..len]).unwrap_err().is_decode(), "length {}", len);
        }
    }
}
