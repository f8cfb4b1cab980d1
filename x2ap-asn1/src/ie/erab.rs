//! E-RAB IEs: identity, QoS, tunnel endpoints and the per-bearer list items

use crate::ie::cause::Cause;
use crate::ie::common::{
    pack_optional, pack_single_container_list, unpack_optional, unpack_single_container_list, ContainerItem,
    Criticality, ProtocolExtensionContainer, ProtocolIeId,
};
use crate::ie::ue_context::BitRate;
use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use x2ap_core::{BitString, EncodeError, X2apResult};

/// maxnoofBearers
pub const MAX_NO_OF_BEARERS: usize = 256;

/// E-RAB-ID ::= INTEGER (0..15, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ERabId(pub u8);

impl ERabId {
    pub const MAX: u8 = 15;
}

impl PerCodec for ERabId {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        if self.0 > Self::MAX {
            return Err(EncodeError::ExtensionNotSupported { what: "E-RAB-ID" }.into());
        }
        encoder.write_extension_bit(false)?;
        encoder.write_constrained_whole_number(self.0 as u64, 0, Self::MAX as u64)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("E-RAB-ID")?;
        Ok(Self(decoder.read_constrained_whole_number(0, Self::MAX as u64)? as u8))
    }
}

/// QCI ::= INTEGER (0..255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qci(pub u8);

impl PerCodec for Qci {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, 255)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, 255)? as u8))
    }
}

/// PriorityLevel ::= INTEGER { spare(0), highest(1), lowest(14), no-priority(15) } (0..15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriorityLevel(pub u8);

impl PriorityLevel {
    pub const HIGHEST: Self = Self(1);
    pub const LOWEST: Self = Self(14);
    pub const NO_PRIORITY: Self = Self(15);
}

impl PerCodec for PriorityLevel {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, 15)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, 15)? as u8))
    }
}

per_enumerated! {
    pub enum PreEmptionCapability ("Pre-emptionCapability", extensible = false) {
        ShallNotTriggerPreEmption,
        MayTriggerPreEmption,
    }
}

per_enumerated! {
    pub enum PreEmptionVulnerability ("Pre-emptionVulnerability", extensible = false) {
        NotPreEmptable,
        PreEmptable,
    }
}

/// AllocationAndRetentionPriority ::= SEQUENCE { priorityLevel, pre-emptionCapability, pre-emptionVulnerability, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationAndRetentionPriority {
    pub priority_level: PriorityLevel,
    pub pre_emption_capability: PreEmptionCapability,
    pub pre_emption_vulnerability: PreEmptionVulnerability,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for AllocationAndRetentionPriority {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.priority_level.pack(encoder)?;
        self.pre_emption_capability.pack(encoder)?;
        self.pre_emption_vulnerability.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("AllocationAndRetentionPriority")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            priority_level: PriorityLevel::unpack(decoder)?,
            pre_emption_capability: PreEmptionCapability::unpack(decoder)?,
            pre_emption_vulnerability: PreEmptionVulnerability::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// GBR-QosInformation ::= SEQUENCE { four BitRates, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GbrQosInformation {
    pub e_rab_maximum_bitrate_dl: BitRate,
    pub e_rab_maximum_bitrate_ul: BitRate,
    pub e_rab_guaranteed_bitrate_dl: BitRate,
    pub e_rab_guaranteed_bitrate_ul: BitRate,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for GbrQosInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.e_rab_maximum_bitrate_dl.pack(encoder)?;
        self.e_rab_maximum_bitrate_ul.pack(encoder)?;
        self.e_rab_guaranteed_bitrate_dl.pack(encoder)?;
        self.e_rab_guaranteed_bitrate_ul.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("GBR-QosInformation")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            e_rab_maximum_bitrate_dl: BitRate::unpack(decoder)?,
            e_rab_maximum_bitrate_ul: BitRate::unpack(decoder)?,
            e_rab_guaranteed_bitrate_dl: BitRate::unpack(decoder)?,
            e_rab_guaranteed_bitrate_ul: BitRate::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// E-RAB-Level-QoS-Parameters ::= SEQUENCE { qCI, allocationAndRetentionPriority, gbrQosInformation OPTIONAL, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabLevelQosParameters {
    pub qci: Qci,
    pub allocation_and_retention_priority: AllocationAndRetentionPriority,
    pub gbr_qos_information: Option<GbrQosInformation>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for ERabLevelQosParameters {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.gbr_qos_information.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.qci.pack(encoder)?;
        self.allocation_and_retention_priority.pack(encoder)?;
        pack_optional(&self.gbr_qos_information, encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("E-RAB-Level-QoS-Parameters")?;
        let has_gbr = decoder.read_bit()?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            qci: Qci::unpack(decoder)?,
            allocation_and_retention_priority: AllocationAndRetentionPriority::unpack(decoder)?,
            gbr_qos_information: unpack_optional(has_gbr, decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// GTPtunnelEndpoint ::= SEQUENCE { transportLayerAddress, gTP-TEID, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtpTunnelEndpoint {
    /// TransportLayerAddress ::= BIT STRING (SIZE(1..160, ...))
    pub transport_layer_address: BitString,
    /// GTP-TEI ::= OCTET STRING (SIZE (4))
    pub gtp_teid: [u8; 4],
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl GtpTunnelEndpoint {
    const ADDRESS_SIZE: SizeConstraint = SizeConstraint::extensible(1, 160);

    /// Endpoint with an IPv4 transport address
    pub fn ipv4(address: [u8; 4], gtp_teid: [u8; 4]) -> X2apResult<Self> {
        Ok(Self {
            transport_layer_address: BitString::new(address.to_vec(), 32)?,
            gtp_teid,
            ie_extensions: None,
        })
    }
}

impl PerCodec for GtpTunnelEndpoint {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        encoder.write_bit_string(&self.transport_layer_address, Self::ADDRESS_SIZE)?;
        encoder.write_fixed_octet_string(&self.gtp_teid, 4)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("GTPtunnelEndpoint")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            transport_layer_address: decoder.read_bit_string(Self::ADDRESS_SIZE)?,
            gtp_teid: decoder.read_octet_array()?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

per_enumerated! {
    /// DL-Forwarding ::= ENUMERATED { dL-forwardingProposed, ... }
    pub enum DlForwarding ("DL-Forwarding", extensible = true) {
        DlForwardingProposed,
    }
}

/// E-RABs-ToBeSetup-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsToBeSetupItem {
    pub e_rab_id: ERabId,
    pub e_rab_level_qos_parameters: ERabLevelQosParameters,
    pub dl_forwarding: Option<DlForwarding>,
    pub ul_gtp_tunnel_endpoint: GtpTunnelEndpoint,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for ERabsToBeSetupItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.dl_forwarding.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.e_rab_id.pack(encoder)?;
        self.e_rab_level_qos_parameters.pack(encoder)?;
        pack_optional(&self.dl_forwarding, encoder)?;
        self.ul_gtp_tunnel_endpoint.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("E-RABs-ToBeSetup-Item")?;
        let has_dl_forwarding = decoder.read_bit()?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            e_rab_id: ERabId::unpack(decoder)?,
            e_rab_level_qos_parameters: ERabLevelQosParameters::unpack(decoder)?,
            dl_forwarding: unpack_optional(has_dl_forwarding, decoder)?,
            ul_gtp_tunnel_endpoint: GtpTunnelEndpoint::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

impl ContainerItem for ERabsToBeSetupItem {
    const ID: ProtocolIeId = ProtocolIeId::E_RABS_TO_BE_SETUP_ITEM;
    const CRITICALITY: Criticality = Criticality::Ignore;
}

/// E-RABs-Admitted-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsAdmittedItem {
    pub e_rab_id: ERabId,
    pub ul_gtp_tunnel_endpoint: Option<GtpTunnelEndpoint>,
    pub dl_gtp_tunnel_endpoint: Option<GtpTunnelEndpoint>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for ERabsAdmittedItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ul_gtp_tunnel_endpoint.is_some())?;
        encoder.write_bit(self.dl_gtp_tunnel_endpoint.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.e_rab_id.pack(encoder)?;
        pack_optional(&self.ul_gtp_tunnel_endpoint, encoder)?;
        pack_optional(&self.dl_gtp_tunnel_endpoint, encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("E-RABs-Admitted-Item")?;
        let has_ul = decoder.read_bit()?;
        let has_dl = decoder.read_bit()?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            e_rab_id: ERabId::unpack(decoder)?,
            ul_gtp_tunnel_endpoint: unpack_optional(has_ul, decoder)?,
            dl_gtp_tunnel_endpoint: unpack_optional(has_dl, decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

impl ContainerItem for ERabsAdmittedItem {
    const ID: ProtocolIeId = ProtocolIeId::E_RABS_ADMITTED_ITEM;
    const CRITICALITY: Criticality = Criticality::Ignore;
}

/// E-RAB-Item, an E-RAB with the cause it was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabItem {
    pub e_rab_id: ERabId,
    pub cause: Cause,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for ERabItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.e_rab_id.pack(encoder)?;
        self.cause.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("E-RAB-Item")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            e_rab_id: ERabId::unpack(decoder)?,
            cause: Cause::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

impl ContainerItem for ERabItem {
    const ID: ProtocolIeId = ProtocolIeId::E_RAB_ITEM;
    const CRITICALITY: Criticality = Criticality::Ignore;
}

const BEARER_LIST_SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NO_OF_BEARERS);

/// Declare a SEQUENCE (SIZE(1..maxnoofBearers)) OF ProtocolIE-Single-Container list
macro_rules! bearer_list {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(pub Vec<$item>);

        impl PerCodec for $name {
            fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
                pack_single_container_list(&self.0, BEARER_LIST_SIZE, encoder)
            }

            fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
                Ok(Self(unpack_single_container_list(BEARER_LIST_SIZE, decoder)?))
            }
        }
    };
}

bearer_list!(
    /// E-RABs-ToBeSetup-List
    ERabsToBeSetupList,
    ERabsToBeSetupItem
);
bearer_list!(
    /// E-RABs-Admitted-List
    ERabsAdmittedList,
    ERabsAdmittedItem
);
bearer_list!(
    /// E-RAB-List, used for E-RABs-NotAdmitted-List
    ERabList,
    ERabItem
);
