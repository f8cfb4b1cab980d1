//! CriticalityDiagnostics IE

use crate::ie::common::{
    pack_optional, unpack_optional, Criticality, ProcedureCode, ProtocolExtensionContainer, ProtocolIeId,
    TriggeringMessage, TypeOfError,
};
use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use x2ap_core::X2apResult;

/// maxNrOfErrors
pub const MAX_NR_OF_ERRORS: usize = 256;

/// One entry of CriticalityDiagnostics-IE-List
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalityDiagnosticsIeItem {
    pub ie_criticality: Criticality,
    pub ie_id: ProtocolIeId,
    pub type_of_error: TypeOfError,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for CriticalityDiagnosticsIeItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.ie_criticality.pack(encoder)?;
        self.ie_id.pack(encoder)?;
        self.type_of_error.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("CriticalityDiagnostics-IE-List item")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            ie_criticality: Criticality::unpack(decoder)?,
            ie_id: ProtocolIeId::unpack(decoder)?,
            type_of_error: TypeOfError::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// CriticalityDiagnostics ::= SEQUENCE { all fields OPTIONAL, ... }
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalityDiagnostics {
    pub procedure_code: Option<ProcedureCode>,
    pub triggering_message: Option<TriggeringMessage>,
    pub procedure_criticality: Option<Criticality>,
    pub ies_criticality_diagnostics: Option<Vec<CriticalityDiagnosticsIeItem>>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl CriticalityDiagnostics {
    const IE_LIST_SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NR_OF_ERRORS);
}

impl PerCodec for CriticalityDiagnostics {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.procedure_code.is_some())?;
        encoder.write_bit(self.triggering_message.is_some())?;
        encoder.write_bit(self.procedure_criticality.is_some())?;
        encoder.write_bit(self.ies_criticality_diagnostics.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        pack_optional(&self.procedure_code, encoder)?;
        pack_optional(&self.triggering_message, encoder)?;
        pack_optional(&self.procedure_criticality, encoder)?;
        if let Some(items) = &self.ies_criticality_diagnostics {
            encoder.write_sequence_of(items, Self::IE_LIST_SIZE)?;
        }
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("CriticalityDiagnostics")?;
        let mut present = [false; 5];
        for bit in present.iter_mut() {
            *bit = decoder.read_bit()?;
        }
        Ok(Self {
            procedure_code: unpack_optional(present[0], decoder)?,
            triggering_message: unpack_optional(present[1], decoder)?,
            procedure_criticality: unpack_optional(present[2], decoder)?,
            ies_criticality_diagnostics: if present[3] {
                Some(decoder.read_sequence_of(Self::IE_LIST_SIZE)?)
            } else {
                None
            },
            ie_extensions: unpack_optional(present[4], decoder)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diagnostics() {
        let diagnostics = CriticalityDiagnostics::default();
        assert_eq!(diagnostics.to_per_bytes().unwrap(), vec![0x00]);
        assert_eq!(CriticalityDiagnostics::from_per_bytes(&[0x00]).unwrap(), diagnostics);
    }

    #[test]
    fn test_diagnostics_with_ie_list() {
        let diagnostics = CriticalityDiagnostics {
            procedure_code: Some(ProcedureCode::HANDOVER_PREPARATION),
            triggering_message: Some(TriggeringMessage::InitiatingMessage),
            procedure_criticality: Some(Criticality::Reject),
            ies_criticality_diagnostics: Some(vec![CriticalityDiagnosticsIeItem {
                ie_criticality: Criticality::Reject,
                ie_id: ProtocolIeId::OLD_ENB_UE_X2AP_ID,
                type_of_error: TypeOfError::Missing,
                ie_extensions: None,
            }]),
            ie_extensions: None,
        };
        let bytes = diagnostics.to_per_bytes().unwrap();
        // preamble 011110, pad, code 0, trig 00 crit 00, pad, count 0
        // item: ext 0 pres 0 crit 00, pad, id 10, ext 0 missing 1
        assert_eq!(bytes, vec![0x78, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x40]);
        assert_eq!(CriticalityDiagnostics::from_per_bytes(&bytes).unwrap(), diagnostics);
    }
}
