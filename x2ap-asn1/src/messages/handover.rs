//! Handover Preparation and Handover Cancel messages

use crate::ie::cause::Cause;
use crate::ie::common::{Criticality, ProtocolIeId};
use crate::ie::criticality_diagnostics::CriticalityDiagnostics;
use crate::ie::erab::{ERabList, ERabsAdmittedList};
use crate::ie::history::UeHistoryInformation;
use crate::ie::identity::{Ecgi, Gummei, UeX2apId};
use crate::ie::ue_context::UeContextInformation;
use crate::messages::container::{ProtocolIeContainerReader, ProtocolIeContainerWriter};
use crate::per::{PerCodec, PerDecoder, PerEncoder};
use x2ap_core::X2apResult;

/// TargeteNBtoSource-eNBTransparentContainer ::= OCTET STRING
///
/// Carries the RRC HandoverCommand built by the target eNB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnbToSourceEnbTransparentContainer(pub Vec<u8>);

impl PerCodec for TargetEnbToSourceEnbTransparentContainer {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_octet_string(&self.0)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_octet_string()?))
    }
}

/// HANDOVER REQUEST, source eNB to target eNB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverRequest {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub cause: Cause,
    pub target_cell_id: Ecgi,
    pub gummei: Gummei,
    pub ue_context_information: UeContextInformation,
    pub ue_history_information: UeHistoryInformation,
}

impl PerCodec for HandoverRequest {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Reject, &self.old_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::CAUSE, Criticality::Ignore, &self.cause)?;
        ies.push(ProtocolIeId::TARGET_CELL_ID, Criticality::Reject, &self.target_cell_id)?;
        ies.push(ProtocolIeId::GUMMEI_ID, Criticality::Reject, &self.gummei)?;
        ies.push(ProtocolIeId::UE_CONTEXT_INFORMATION, Criticality::Reject, &self.ue_context_information)?;
        ies.push(ProtocolIeId::UE_HISTORY_INFORMATION, Criticality::Ignore, &self.ue_history_information)?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("HandoverRequest")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            cause: ies.require(ProtocolIeId::CAUSE)?,
            target_cell_id: ies.require(ProtocolIeId::TARGET_CELL_ID)?,
            gummei: ies.require(ProtocolIeId::GUMMEI_ID)?,
            ue_context_information: ies.require(ProtocolIeId::UE_CONTEXT_INFORMATION)?,
            ue_history_information: ies.require(ProtocolIeId::UE_HISTORY_INFORMATION)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

/// HANDOVER REQUEST ACKNOWLEDGE, target eNB to source eNB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverRequestAcknowledge {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: UeX2apId,
    pub e_rabs_admitted_list: ERabsAdmittedList,
    pub e_rabs_not_admitted_list: Option<ERabList>,
    pub target_to_source_transparent_container: TargetEnbToSourceEnbTransparentContainer,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

impl PerCodec for HandoverRequestAcknowledge {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Ignore, &self.old_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::NEW_ENB_UE_X2AP_ID, Criticality::Ignore, &self.new_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::E_RABS_ADMITTED_LIST, Criticality::Ignore, &self.e_rabs_admitted_list)?;
        ies.push_optional(
            ProtocolIeId::E_RABS_NOT_ADMITTED_LIST,
            Criticality::Ignore,
            &self.e_rabs_not_admitted_list,
        )?;
        ies.push(
            ProtocolIeId::TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER,
            Criticality::Ignore,
            &self.target_to_source_transparent_container,
        )?;
        ies.push_optional(
            ProtocolIeId::CRITICALITY_DIAGNOSTICS,
            Criticality::Ignore,
            &self.criticality_diagnostics,
        )?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("HandoverRequestAcknowledge")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            new_enb_ue_x2ap_id: ies.require(ProtocolIeId::NEW_ENB_UE_X2AP_ID)?,
            e_rabs_admitted_list: ies.require(ProtocolIeId::E_RABS_ADMITTED_LIST)?,
            e_rabs_not_admitted_list: ies.take(ProtocolIeId::E_RABS_NOT_ADMITTED_LIST)?,
            target_to_source_transparent_container: ies
                .require(ProtocolIeId::TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER)?,
            criticality_diagnostics: ies.take(ProtocolIeId::CRITICALITY_DIAGNOSTICS)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

/// HANDOVER PREPARATION FAILURE, target eNB to source eNB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverPreparationFailure {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub cause: Cause,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

impl PerCodec for HandoverPreparationFailure {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Ignore, &self.old_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::CAUSE, Criticality::Ignore, &self.cause)?;
        ies.push_optional(
            ProtocolIeId::CRITICALITY_DIAGNOSTICS,
            Criticality::Ignore,
            &self.criticality_diagnostics,
        )?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("HandoverPreparationFailure")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            cause: ies.require(ProtocolIeId::CAUSE)?,
            criticality_diagnostics: ies.take(ProtocolIeId::CRITICALITY_DIAGNOSTICS)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

/// HANDOVER CANCEL, source eNB to target eNB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverCancel {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: Option<UeX2apId>,
    pub cause: Cause,
}

impl PerCodec for HandoverCancel {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Reject, &self.old_enb_ue_x2ap_id)?;
        ies.push_optional(ProtocolIeId::NEW_ENB_UE_X2AP_ID, Criticality::Ignore, &self.new_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::CAUSE, Criticality::Ignore, &self.cause)?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("HandoverCancel")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            new_enb_ue_x2ap_id: ies.take(ProtocolIeId::NEW_ENB_UE_X2AP_ID)?,
            cause: ies.require(ProtocolIeId::CAUSE)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::{CauseRadioNetwork, CauseTransport};
    use crate::ie::erab::{ERabId, ERabItem, ERabsAdmittedItem, GtpTunnelEndpoint};
    use x2ap_core::{DecodeError, X2apError};

    #[test]
    fn test_handover_cancel_layout() {
        let cancel = HandoverCancel {
            old_enb_ue_x2ap_id: UeX2apId(1),
            new_enb_ue_x2ap_id: None,
            cause: Cause::RadioNetwork(CauseRadioNetwork::Tx2RelocOverallExpiry),
        };
        let bytes = cancel.to_per_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![
                0x00, 0x00, 0x02, // ext, IE count
                0x00, 0x0A, 0x00, 0x02, 0x00, 0x01, // Old-eNB-UE-X2AP-ID
                0x00, 0x05, 0x40, 0x02, 0x04, 0x80, // Cause
            ]
        );
        assert_eq!(HandoverCancel::from_per_bytes(&bytes).unwrap(), cancel);
    }

    #[test]
    fn test_handover_cancel_missing_cause() {
        // same message with only the first IE
        let bytes = [0x00, 0x00, 0x01, 0x00, 0x0A, 0x00, 0x02, 0x00, 0x01];
        assert_eq!(
            HandoverCancel::from_per_bytes(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::MissingIe { id: 5 })
        );
    }

    #[test]
    fn test_handover_cancel_ie_order_irrelevant() {
        let bytes = [
            0x00, 0x00, 0x02, //
            0x00, 0x05, 0x40, 0x02, 0x04, 0x80, //
            0x00, 0x0A, 0x00, 0x02, 0x00, 0x01,
        ];
        let cancel = HandoverCancel::from_per_bytes(&bytes).unwrap();
        assert_eq!(cancel.old_enb_ue_x2ap_id, UeX2apId(1));
    }

    #[test]
    fn test_preparation_failure_round_trip() {
        let failure = HandoverPreparationFailure {
            old_enb_ue_x2ap_id: UeX2apId(4095),
            cause: Cause::Transport(CauseTransport::TransportResourceUnavailable),
            criticality_diagnostics: Some(CriticalityDiagnostics::default()),
        };
        let bytes = failure.to_per_bytes().unwrap();
        assert_eq!(&bytes[..3], &[0x00, 0x00, 0x03]);
        assert_eq!(HandoverPreparationFailure::from_per_bytes(&bytes).unwrap(), failure);
    }

    #[test]
    fn test_request_acknowledge_round_trip() {
        let endpoint = GtpTunnelEndpoint::ipv4([192, 168, 1, 10], [0, 0, 0x10, 0x01]).unwrap();
        let acknowledge = HandoverRequestAcknowledge {
            old_enb_ue_x2ap_id: UeX2apId(1),
            new_enb_ue_x2ap_id: UeX2apId(2),
            e_rabs_admitted_list: ERabsAdmittedList(vec![ERabsAdmittedItem {
                e_rab_id: ERabId(5),
                ul_gtp_tunnel_endpoint: None,
                dl_gtp_tunnel_endpoint: Some(endpoint),
                ie_extensions: None,
            }]),
            e_rabs_not_admitted_list: Some(ERabList(vec![ERabItem {
                e_rab_id: ERabId(6),
                cause: Cause::RadioNetwork(CauseRadioNetwork::NoRadioResourcesAvailableInTargetCell),
                ie_extensions: None,
            }])),
            target_to_source_transparent_container: TargetEnbToSourceEnbTransparentContainer(vec![
                0x0A, 0x10, 0x31, 0x00,
            ]),
            criticality_diagnostics: None,
        };
        let bytes = acknowledge.to_per_bytes().unwrap();
        assert_eq!(&bytes[..3], &[0x00, 0x00, 0x05]);
        assert_eq!(HandoverRequestAcknowledge::from_per_bytes(&bytes).unwrap(), acknowledge);
    }

    #[test]
    fn test_message_extension_rejected() {
        let bytes = [0x80, 0x00, 0x00];
        assert_eq!(
            HandoverCancel::from_per_bytes(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "HandoverCancel" })
        );
    }
}
