//! X2AP common definitions (X2AP-CommonDataTypes, X2AP-Containers)
//!
//! Criticality, procedure codes, IE identifiers, and the generic protocol
//! extension and single-IE containers every other IE builds on.

use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use x2ap_core::{DecodeError, X2apError, X2apResult};

/// maxProtocolIEs / maxProtocolExtensions
pub const MAX_PROTOCOL_IES: usize = 65535;

per_enumerated! {
    /// Criticality ::= ENUMERATED { reject, ignore, notify }
    pub enum Criticality ("Criticality", extensible = false) {
        Reject,
        Ignore,
        Notify,
    }
}

per_enumerated! {
    /// TriggeringMessage ::= ENUMERATED { initiating-message, successful-outcome, unsuccessful-outcome }
    pub enum TriggeringMessage ("TriggeringMessage", extensible = false) {
        InitiatingMessage,
        SuccessfulOutcome,
        UnsuccessfulOutcome,
    }
}

per_enumerated! {
    /// TypeOfError ::= ENUMERATED { not-understood, missing, ... }
    pub enum TypeOfError ("TypeOfError", extensible = true) {
        NotUnderstood,
        Missing,
    }
}

/// ProcedureCode ::= INTEGER (0..255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcedureCode(pub u8);

impl ProcedureCode {
    pub const HANDOVER_PREPARATION: Self = Self(0);
    pub const HANDOVER_CANCEL: Self = Self(1);
    pub const LOAD_INDICATION: Self = Self(2);
    pub const ERROR_INDICATION: Self = Self(3);
    pub const SN_STATUS_TRANSFER: Self = Self(4);
    pub const UE_CONTEXT_RELEASE: Self = Self(5);
    pub const X2_SETUP: Self = Self(6);
    pub const RESET: Self = Self(7);
}

impl PerCodec for ProcedureCode {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, 255)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, 255)? as u8))
    }
}

/// ProtocolIE-ID ::= INTEGER (0..maxProtocolIEs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolIeId(pub u16);

impl ProtocolIeId {
    pub const E_RABS_ADMITTED_ITEM: Self = Self(0);
    pub const E_RABS_ADMITTED_LIST: Self = Self(1);
    pub const E_RAB_ITEM: Self = Self(2);
    pub const E_RABS_NOT_ADMITTED_LIST: Self = Self(3);
    pub const E_RABS_TO_BE_SETUP_ITEM: Self = Self(4);
    pub const CAUSE: Self = Self(5);
    pub const NEW_ENB_UE_X2AP_ID: Self = Self(9);
    pub const OLD_ENB_UE_X2AP_ID: Self = Self(10);
    pub const TARGET_CELL_ID: Self = Self(11);
    pub const TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER: Self = Self(12);
    pub const TRACE_ACTIVATION: Self = Self(13);
    pub const UE_CONTEXT_INFORMATION: Self = Self(14);
    pub const UE_HISTORY_INFORMATION: Self = Self(15);
    pub const UE_X2AP_ID: Self = Self(16);
    pub const CRITICALITY_DIAGNOSTICS: Self = Self(17);
    pub const E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST: Self = Self(18);
    pub const E_RABS_SUBJECT_TO_STATUS_TRANSFER_ITEM: Self = Self(19);
    pub const GUMMEI_ID: Self = Self(23);
}

impl PerCodec for ProtocolIeId {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, MAX_PROTOCOL_IES as u64)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, MAX_PROTOCOL_IES as u64)? as u16))
    }
}

/// One entry of a ProtocolExtensionContainer
///
/// The extension value is kept as the raw octets of its open type; no
/// extension IE is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolExtensionField {
    pub id: ProtocolIeId,
    pub criticality: Criticality,
    pub extension_value: Vec<u8>,
}

impl PerCodec for ProtocolExtensionField {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        self.id.pack(encoder)?;
        self.criticality.pack(encoder)?;
        encoder.write_open_type(|inner| inner.write_octets(&self.extension_value))
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        let id = ProtocolIeId::unpack(decoder)?;
        let criticality = Criticality::unpack(decoder)?;
        let extension_value = decoder.read_open_type_octets()?.to_vec();
        Ok(Self {
            id,
            criticality,
            extension_value,
        })
    }
}

/// ProtocolExtensionContainer ::= SEQUENCE (SIZE (1..maxProtocolExtensions)) OF ProtocolExtensionField
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolExtensionContainer(pub Vec<ProtocolExtensionField>);

impl ProtocolExtensionContainer {
    const SIZE: SizeConstraint = SizeConstraint::new(1, MAX_PROTOCOL_IES);
}

impl PerCodec for ProtocolExtensionContainer {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_sequence_of(&self.0, Self::SIZE)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_sequence_of(Self::SIZE)?))
    }
}

/// Pack an OPTIONAL field whose presence bit was already written
pub fn pack_optional<T: PerCodec>(value: &Option<T>, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
    match value {
        Some(value) => value.pack(encoder),
        None => Ok(()),
    }
}

/// Unpack an OPTIONAL field given its presence bit
pub fn unpack_optional<T: PerCodec>(present: bool, decoder: &mut PerDecoder<'_>) -> X2apResult<Option<T>> {
    if present {
        Ok(Some(T::unpack(decoder)?))
    } else {
        Ok(None)
    }
}

/// A value carried in a ProtocolIE-Single-Container list element
pub trait ContainerItem: PerCodec {
    const ID: ProtocolIeId;
    const CRITICALITY: Criticality;
}

/// Pack a SEQUENCE OF ProtocolIE-Single-Container
pub fn pack_single_container_list<T: ContainerItem>(
    items: &[T],
    constraint: SizeConstraint,
    encoder: &mut PerEncoder<'_>,
) -> X2apResult<()> {
    encoder.write_sequence_of_count(items.len(), constraint)?;
    for item in items {
        T::ID.pack(encoder)?;
        T::CRITICALITY.pack(encoder)?;
        encoder.write_open_type(|inner| item.pack(inner))?;
    }
    Ok(())
}

/// Unpack a SEQUENCE OF ProtocolIE-Single-Container
///
/// Every element must carry the item's own IE identifier.
pub fn unpack_single_container_list<T: ContainerItem>(
    constraint: SizeConstraint,
    decoder: &mut PerDecoder<'_>,
) -> X2apResult<Vec<T>> {
    let count = decoder.read_sequence_of_count(constraint)?;
    let mut items = Vec::with_capacity(count.min(decoder.remaining_bits()));
    for _ in 0..count {
        let id = ProtocolIeId::unpack(decoder)?;
        if id != T::ID {
            return Err(X2apError::Decode(DecodeError::UnknownIe { id: id.0 }));
        }
        Criticality::unpack(decoder)?;
        items.push(decoder.read_open_type(|inner| T::unpack(inner))?);
    }
    Ok(items)
}
