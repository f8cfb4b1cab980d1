//! SN status transfer IEs

use crate::ie::common::{
    pack_optional, pack_single_container_list, unpack_optional, unpack_single_container_list, ContainerItem,
    Criticality, ProtocolExtensionContainer, ProtocolIeId,
};
use crate::ie::erab::{ERabId, MAX_NO_OF_BEARERS};
use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use x2ap_core::{BitString, X2apResult};

/// PDCP-SN ::= INTEGER (0..4095)
pub const MAX_PDCP_SN: u64 = 4095;
/// HFN ::= INTEGER (0..1048575)
pub const MAX_HFN: u64 = 1_048_575;
/// ReceiveStatusofULPDCPSDUs ::= BIT STRING (SIZE(4096))
pub const RECEIVE_STATUS_BITS: usize = 4096;

/// COUNTvalue ::= SEQUENCE { pDCP-SN, hFN, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountValue {
    pub pdcp_sn: u16,
    pub hfn: u32,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl CountValue {
    pub fn new(pdcp_sn: u16, hfn: u32) -> Self {
        Self {
            pdcp_sn,
            hfn,
            ie_extensions: None,
        }
    }
}

impl PerCodec for CountValue {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        encoder.write_constrained_whole_number(self.pdcp_sn as u64, 0, MAX_PDCP_SN)?;
        encoder.write_constrained_whole_number(self.hfn as u64, 0, MAX_HFN)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("COUNTvalue")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            pdcp_sn: decoder.read_constrained_whole_number(0, MAX_PDCP_SN)? as u16,
            hfn: decoder.read_constrained_whole_number(0, MAX_HFN)? as u32,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// E-RABs-SubjectToStatusTransfer-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsSubjectToStatusTransferItem {
    pub e_rab_id: ERabId,
    /// One bit per uplink PDCP SDU after the first missing one
    pub receive_status_of_ul_pdcp_sdus: Option<BitString>,
    pub ul_count_value: CountValue,
    pub dl_count_value: CountValue,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl ERabsSubjectToStatusTransferItem {
    const RECEIVE_STATUS_SIZE: SizeConstraint = SizeConstraint::fixed(RECEIVE_STATUS_BITS);
}

impl PerCodec for ERabsSubjectToStatusTransferItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.receive_status_of_ul_pdcp_sdus.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.e_rab_id.pack(encoder)?;
        if let Some(status) = &self.receive_status_of_ul_pdcp_sdus {
            encoder.write_bit_string(status, Self::RECEIVE_STATUS_SIZE)?;
        }
        self.ul_count_value.pack(encoder)?;
        self.dl_count_value.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("E-RABs-SubjectToStatusTransfer-Item")?;
        let has_receive_status = decoder.read_bit()?;
        let has_extensions = decoder.read_bit()?;
        let e_rab_id = ERabId::unpack(decoder)?;
        let receive_status_of_ul_pdcp_sdus = match has_receive_status {
            true => Some(decoder.read_bit_string(Self::RECEIVE_STATUS_SIZE)?),
            false => None,
        };
        Ok(Self {
            e_rab_id,
            receive_status_of_ul_pdcp_sdus,
            ul_count_value: CountValue::unpack(decoder)?,
            dl_count_value: CountValue::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

impl ContainerItem for ERabsSubjectToStatusTransferItem {
    const ID: ProtocolIeId = ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_ITEM;
    const CRITICALITY: Criticality = Criticality::Ignore;
}

/// E-RABs-SubjectToStatusTransfer-List
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsSubjectToStatusTransferList(pub Vec<ERabsSubjectToStatusTransferItem>);

impl ERabsSubjectToStatusTransferList {
    const SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NO_OF_BEARERS);
}

impl PerCodec for ERabsSubjectToStatusTransferList {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        pack_single_container_list(&self.0, Self::SIZE, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(unpack_single_container_list(Self::SIZE, decoder)?))
    }
}
