//! Global procedures: Error Indication and Reset

use crate::ie::cause::Cause;
use crate::ie::common::{Criticality, ProtocolIeId};
use crate::ie::criticality_diagnostics::CriticalityDiagnostics;
use crate::ie::identity::UeX2apId;
use crate::messages::container::{ProtocolIeContainerReader, ProtocolIeContainerWriter};
use crate::per::{PerCodec, PerDecoder, PerEncoder};
use x2ap_core::X2apResult;

/// ERROR INDICATION
///
/// Every IE is optional; an empty container is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorIndication {
    pub old_enb_ue_x2ap_id: Option<UeX2apId>,
    pub new_enb_ue_x2ap_id: Option<UeX2apId>,
    pub cause: Option<Cause>,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

impl PerCodec for ErrorIndication {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push_optional(ProtocolIeId::OLD_ENB_UE_X2AP_ID, Criticality::Ignore, &self.old_enb_ue_x2ap_id)?;
        ies.push_optional(ProtocolIeId::NEW_ENB_UE_X2AP_ID, Criticality::Ignore, &self.new_enb_ue_x2ap_id)?;
        ies.push_optional(ProtocolIeId::CAUSE, Criticality::Ignore, &self.cause)?;
        ies.push_optional(
            ProtocolIeId::CRITICALITY_DIAGNOSTICS,
            Criticality::Ignore,
            &self.criticality_diagnostics,
        )?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("ErrorIndication")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            old_enb_ue_x2ap_id: ies.take(ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
            new_enb_ue_x2ap_id: ies.take(ProtocolIeId::NEW_ENB_UE_X2AP_ID)?,
            cause: ies.take(ProtocolIeId::CAUSE)?,
            criticality_diagnostics: ies.take(ProtocolIeId::CRITICALITY_DIAGNOSTICS)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

/// RESET REQUEST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetRequest {
    pub cause: Cause,
}

impl PerCodec for ResetRequest {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push(ProtocolIeId::CAUSE, Criticality::Ignore, &self.cause)?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("ResetRequest")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            cause: ies.require(ProtocolIeId::CAUSE)?,
        };
        ies.finish()?;
        Ok(message)
    }
}

/// RESET RESPONSE
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetResponse {
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

impl PerCodec for ResetResponse {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        let mut ies = ProtocolIeContainerWriter::new(encoder);
        ies.push_optional(
            ProtocolIeId::CRITICALITY_DIAGNOSTICS,
            Criticality::Ignore,
            &self.criticality_diagnostics,
        )?;
        ies.finish(encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("ResetResponse")?;
        let mut ies = ProtocolIeContainerReader::read(decoder)?;
        let message = Self {
            criticality_diagnostics: ies.take(ProtocolIeId::CRITICALITY_DIAGNOSTICS)?,
        };
        ies.finish()?;
        Ok(message)
    }
}
