//! Cause IE

use crate::per::{PerCodec, PerDecoder, PerEncoder};
use x2ap_core::{DecodeError, X2apError, X2apResult};

per_enumerated! {
    /// CauseRadioNetwork ::= ENUMERATED { ..., ... }
    pub enum CauseRadioNetwork ("CauseRadioNetwork", extensible = true) {
        HandoverDesirableForRadioReasons,
        TimeCriticalHandover,
        ResourceOptimisationHandover,
        ReduceLoadInServingCell,
        PartialHandover,
        UnknownNewEnbUeX2apId,
        UnknownOldEnbUeX2apId,
        UnknownPairOfUeX2apId,
        HoTargetNotAllowed,
        Tx2RelocOverallExpiry,
        TRelocPrepExpiry,
        CellNotAvailable,
        NoRadioResourcesAvailableInTargetCell,
        InvalidMmeGroupId,
        UnknownMmeCode,
        EncryptionAndOrIntegrityProtectionAlgorithmsNotSupported,
        ReportCharacteristicsEmpty,
        NoReportPeriodicity,
        ExistingMeasurementId,
        UnknownEnbMeasurementId,
        MeasurementTemporarilyNotAvailable,
        Unspecified,
    }
}

per_enumerated! {
    pub enum CauseTransport ("CauseTransport", extensible = true) {
        TransportResourceUnavailable,
        Unspecified,
    }
}

per_enumerated! {
    pub enum CauseProtocol ("CauseProtocol", extensible = true) {
        TransferSyntaxError,
        AbstractSyntaxErrorReject,
        AbstractSyntaxErrorIgnoreAndNotify,
        MessageNotCompatibleWithReceiverState,
        SemanticError,
        Unspecified,
        AbstractSyntaxErrorFalselyConstructedMessage,
    }
}

per_enumerated! {
    pub enum CauseMisc ("CauseMisc", extensible = true) {
        ControlProcessingOverload,
        HardwareFailure,
        OmIntervention,
        NotEnoughUserPlaneProcessingResources,
        Unspecified,
    }
}

/// Cause ::= CHOICE { radioNetwork, transport, protocol, misc, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cause {
    RadioNetwork(CauseRadioNetwork),
    Transport(CauseTransport),
    Protocol(CauseProtocol),
    Misc(CauseMisc),
}

impl Cause {
    const ALTERNATIVES: u32 = 4;

    fn choice_index(&self) -> u32 {
        match self {
            Cause::RadioNetwork(_) => 0,
            Cause::Transport(_) => 1,
            Cause::Protocol(_) => 2,
            Cause::Misc(_) => 3,
        }
    }
}

impl PerCodec for Cause {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_choice_index(self.choice_index(), Self::ALTERNATIVES, true)?;
        match self {
            Cause::RadioNetwork(value) => value.pack(encoder),
            Cause::Transport(value) => value.pack(encoder),
            Cause::Protocol(value) => value.pack(encoder),
            Cause::Misc(value) => value.pack(encoder),
        }
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        match decoder.read_choice_index(Self::ALTERNATIVES, true, "Cause")? {
            0 => Ok(Cause::RadioNetwork(CauseRadioNetwork::unpack(decoder)?)),
            1 => Ok(Cause::Transport(CauseTransport::unpack(decoder)?)),
            2 => Ok(Cause::Protocol(CauseProtocol::unpack(decoder)?)),
            3 => Ok(Cause::Misc(CauseMisc::unpack(decoder)?)),
            index => Err(X2apError::Decode(DecodeError::UnknownChoice { what: "Cause", index })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_bits() {
        let cases = [
            (Cause::RadioNetwork(CauseRadioNetwork::HandoverDesirableForRadioReasons), vec![0x00, 0x00]),
            (Cause::RadioNetwork(CauseRadioNetwork::Unspecified), vec![0x0A, 0x80]),
            (Cause::Transport(CauseTransport::Unspecified), vec![0x28]),
            (Cause::Protocol(CauseProtocol::SemanticError), vec![0x44]),
            (Cause::Misc(CauseMisc::Unspecified), vec![0x74]),
        ];
        for (cause, bytes) in cases {
            assert_eq!(cause.to_per_bytes().unwrap(), bytes, "{:?}", cause);
            assert_eq!(Cause::from_per_bytes(&bytes).unwrap(), cause);
        }
    }

    #[test]
    fn test_root_sizes() {
        assert_eq!(CauseRadioNetwork::ALL.len(), 22);
        assert_eq!(CauseTransport::ALL.len(), 2);
        assert_eq!(CauseProtocol::ALL.len(), 7);
        assert_eq!(CauseMisc::ALL.len(), 5);
    }

    #[test]
    fn test_cause_extensions_rejected() {
        // choice extension bit
        assert_eq!(
            Cause::from_per_bytes(&[0x80]).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "Cause" })
        );
        // misc, enumeration extension bit
        assert_eq!(
            Cause::from_per_bytes(&[0x78]).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "CauseMisc" })
        );
    }

    #[test]
    fn test_radio_network_index_past_root() {
        // 5 bit index 22 is beyond the 22 root values
        let bytes = [0x0B, 0x00];
        assert!(Cause::from_per_bytes(&bytes).unwrap_err().is_decode());
    }
}
