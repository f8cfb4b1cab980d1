//! SN Status Transfer and UE Context Release messages

use crate::ie::common::{Criticality, ProtocolIeId};
use crate::ie::identity::UeX2apId;
use crate::ie::status_transfer::ERabsSubjectToStatusTransferList;
use crate::messages::container::{ProtocolIeContainerReader, ProtocolIeContainerWriter};
use crate::per::{PerCodec, PerDecoder, PerEncoder};
use x2ap_core::X2apResult;

/// SN STATUS TRANSFER, source eNB to target eNB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnStatusTransfer {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: UeX2apId,
    pub e_rabs_subject_to_status_transfer_list: ERabsSubjectToStatusTransferList,
}

impl PerCodec for SnStatusTransfer {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Reject, &self.old_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::NEW_ENB_UE_X2AP_ID, Criticality::Reject, &self.new_enb_ue_x2ap_id)?;
        ies.push(
            ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST,
            Criticality::Ignore,
            &self.e_rabs_subject_to_status_transfer_list,
        )?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("SNStatusTransfer")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            new_enb_ue_x2ap_id: ies.require(ProtocolIeId::NEW_ENB_UE_X2AP_ID)?,
            e_rabs_subject_to_status_transfer_list: ies
                .require(ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

/// UE CONTEXT RELEASE, target eNB to source eNB once the handover completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UeContextRelease {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: UeX2apId,
}

impl PerCodec for UeContextRelease {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Reject, &self.old_enb_ue_x2ap_id)?;
        ies.push(ProtocolIeId::NEW_ENB_UE_X2AP_ID, Criticality::Reject, &self.new_enb_ue_x2ap_id)?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("UEContextRelease")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            new_enb_ue_x2ap_id: ies.require(ProtocolIeId::NEW_ENB_UE_X2AP_ID)?,
        };
        ies.finish()?;
        Ok(message)
    }
}
