//! UE context IEs carried in the Handover Request

use crate::ie::common::{pack_optional, unpack_optional, ProtocolExtensionContainer};
use crate::ie::erab::ERabsToBeSetupList;
use crate::ie::identity::PlmnIdentity;
use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use x2ap_core::{BitString, X2apResult};

/// maxnoofEPLMNs
pub const MAX_NO_OF_EPLMNS: usize = 15;
/// maxnoofEPLMNsPlusOne
pub const MAX_NO_OF_EPLMNS_PLUS_ONE: usize = 16;
/// maxnoofForbTACs / maxnoofForbLACs
pub const MAX_NO_OF_FORB_ACS: usize = 4096;

/// BitRate ::= INTEGER (0..10000000000), in bit/s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitRate(pub u64);

impl BitRate {
    pub const MAX: u64 = 10_000_000_000;
}

impl PerCodec for BitRate {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0, 0, Self::MAX)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, Self::MAX)?))
    }
}

/// UE-S1AP-ID ::= INTEGER (0..4294967295)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UeS1apId(pub u32);

impl PerCodec for UeS1apId {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, u32::MAX as u64)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, u32::MAX as u64)? as u32))
    }
}

/// UESecurityCapabilities ::= SEQUENCE { encryptionAlgorithms, integrityProtectionAlgorithms, iE-Extensions OPTIONAL, ... }
///
/// Both algorithm sets are BIT STRING (SIZE (16, ...)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeSecurityCapabilities {
    pub encryption_algorithms: BitString,
    pub integrity_protection_algorithms: BitString,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl UeSecurityCapabilities {
    const ALGORITHMS_SIZE: SizeConstraint = SizeConstraint::extensible(16, 16);
}

impl PerCodec for UeSecurityCapabilities {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        encoder.write_bit_string(&self.encryption_algorithms, Self::ALGORITHMS_SIZE)?;
        encoder.write_bit_string(&self.integrity_protection_algorithms, Self::ALGORITHMS_SIZE)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("UESecurityCapabilities")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            encryption_algorithms: decoder.read_bit_string(Self::ALGORITHMS_SIZE)?,
            integrity_protection_algorithms: decoder.read_bit_string(Self::ALGORITHMS_SIZE)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// AS-SecurityInformation ::= SEQUENCE { key-eNodeB-star BIT STRING (SIZE(256)), nextHopChainingCount INTEGER (0..7), ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsSecurityInformation {
    pub key_enodeb_star: [u8; 32],
    pub next_hop_chaining_count: u8,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for AsSecurityInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        let key = BitString::new(self.key_enodeb_star.to_vec(), 256)?;
        encoder.write_fixed_bit_string(&key, 256)?;
        encoder.write_constrained_whole_number(self.next_hop_chaining_count as u64, 0, 7)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("AS-SecurityInformation")?;
        let has_extensions = decoder.read_bit()?;
        let key = decoder.read_fixed_bit_string(256)?;
        let mut key_enodeb_star = [0u8; 32];
        key_enodeb_star.copy_from_slice(key.as_bytes());
        Ok(Self {
            key_enodeb_star,
            next_hop_chaining_count: decoder.read_constrained_whole_number(0, 7)? as u8,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// UEAggregateMaximumBitRate ::= SEQUENCE { uEaggregateMaximumBitRateDownlink, ...Uplink, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeAggregateMaximumBitRate {
    pub downlink: BitRate,
    pub uplink: BitRate,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for UeAggregateMaximumBitRate {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.downlink.pack(encoder)?;
        self.uplink.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("UEAggregateMaximumBitRate")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            downlink: BitRate::unpack(decoder)?,
            uplink: BitRate::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// SubscriberProfileIDforRFP ::= INTEGER (1..256)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberProfileIdForRfp(pub u16);

impl PerCodec for SubscriberProfileIdForRfp {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 1, 256)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(1, 256)? as u16))
    }
}

/// TAC ::= OCTET STRING (SIZE (2))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tac(pub [u8; 2]);

impl PerCodec for Tac {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_fixed_octet_string(&self.0, 2)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_octet_array()?))
    }
}

/// LAC ::= OCTET STRING (SIZE (2))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lac(pub [u8; 2]);

impl PerCodec for Lac {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_fixed_octet_string(&self.0, 2)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_octet_array()?))
    }
}

const FORBIDDEN_CODES_SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NO_OF_FORB_ACS);

/// ForbiddenTAs-Item ::= SEQUENCE { pLMN-Identity, forbiddenTACs, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenTasItem {
    pub plmn_identity: PlmnIdentity,
    pub forbidden_tacs: Vec<Tac>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for ForbiddenTasItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.plmn_identity.pack(encoder)?;
        encoder.write_sequence_of(&self.forbidden_tacs, FORBIDDEN_CODES_SIZE)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("ForbiddenTAs-Item")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            plmn_identity: PlmnIdentity::unpack(decoder)?,
            forbidden_tacs: decoder.read_sequence_of(FORBIDDEN_CODES_SIZE)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// ForbiddenLAs-Item ::= SEQUENCE { pLMN-Identity, forbiddenLACs, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenLasItem {
    pub plmn_identity: PlmnIdentity,
    pub forbidden_lacs: Vec<Lac>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for ForbiddenLasItem {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.plmn_identity.pack(encoder)?;
        encoder.write_sequence_of(&self.forbidden_lacs, FORBIDDEN_CODES_SIZE)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("ForbiddenLAs-Item")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            plmn_identity: PlmnIdentity::unpack(decoder)?,
            forbidden_lacs: decoder.read_sequence_of(FORBIDDEN_CODES_SIZE)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

per_enumerated! {
    /// ForbiddenInterRATs ::= ENUMERATED { all, geran, utran, cdma2000, ... }
    pub enum ForbiddenInterRats ("ForbiddenInterRATs", extensible = true) {
        All,
        Geran,
        Utran,
        Cdma2000,
    }
}

/// HandoverRestrictionList
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverRestrictionList {
    pub serving_plmn: PlmnIdentity,
    pub equivalent_plmns: Option<Vec<PlmnIdentity>>,
    pub forbidden_tas: Option<Vec<ForbiddenTasItem>>,
    pub forbidden_las: Option<Vec<ForbiddenLasItem>>,
    pub forbidden_inter_rats: Option<ForbiddenInterRats>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl HandoverRestrictionList {
    const EPLMNS_SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NO_OF_EPLMNS);
    const FORBIDDEN_AREAS_SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NO_OF_EPLMNS_PLUS_ONE);

    pub fn new(serving_plmn: PlmnIdentity) -> Self {
        Self {
            serving_plmn,
            equivalent_plmns: None,
            forbidden_tas: None,
            forbidden_las: None,
            forbidden_inter_rats: None,
            ie_extensions: None,
        }
    }
}

impl PerCodec for HandoverRestrictionList {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.equivalent_plmns.is_some())?;
        encoder.write_bit(self.forbidden_tas.is_some())?;
        encoder.write_bit(self.forbidden_las.is_some())?;
        encoder.write_bit(self.forbidden_inter_rats.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.serving_plmn.pack(encoder)?;
        if let Some(plmns) = &self.equivalent_plmns {
            encoder.write_sequence_of(plmns, Self::EPLMNS_SIZE)?;
        }
        if let Some(items) = &self.forbidden_tas {
            encoder.write_sequence_of(items, Self::FORBIDDEN_AREAS_SIZE)?;
        }
        if let Some(items) = &self.forbidden_las {
            encoder.write_sequence_of(items, Self::FORBIDDEN_AREAS_SIZE)?;
        }
        pack_optional(&self.forbidden_inter_rats, encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("HandoverRestrictionList")?;
        let has_eplmns = decoder.read_bit()?;
        let has_tas = decoder.read_bit()?;
        let has_las = decoder.read_bit()?;
        let has_rats = decoder.read_bit()?;
        let has_extensions = decoder.read_bit()?;
        let serving_plmn = PlmnIdentity::unpack(decoder)?;
        let equivalent_plmns = match has_eplmns {
            true => Some(decoder.read_sequence_of(Self::EPLMNS_SIZE)?),
            false => None,
        };
        let forbidden_tas = match has_tas {
            true => Some(decoder.read_sequence_of(Self::FORBIDDEN_AREAS_SIZE)?),
            false => None,
        };
        let forbidden_las = match has_las {
            true => Some(decoder.read_sequence_of(Self::FORBIDDEN_AREAS_SIZE)?),
            false => None,
        };
        Ok(Self {
            serving_plmn,
            equivalent_plmns,
            forbidden_tas,
            forbidden_las,
            forbidden_inter_rats: unpack_optional(has_rats, decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

per_enumerated! {
    pub enum EventType ("EventType", extensible = true) {
        ChangeOfServingCell,
    }
}

per_enumerated! {
    pub enum ReportArea ("ReportArea", extensible = true) {
        Ecgi,
    }
}

/// LocationReportingInformation ::= SEQUENCE { eventType, reportArea, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationReportingInformation {
    pub event_type: EventType,
    pub report_area: ReportArea,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for LocationReportingInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.event_type.pack(encoder)?;
        self.report_area.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("LocationReportingInformation")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            event_type: EventType::unpack(decoder)?,
            report_area: ReportArea::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// UE-ContextInformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeContextInformation {
    pub mme_ue_s1ap_id: UeS1apId,
    pub ue_security_capabilities: UeSecurityCapabilities,
    pub as_security_information: AsSecurityInformation,
    pub ue_aggregate_maximum_bit_rate: UeAggregateMaximumBitRate,
    pub subscriber_profile_id_for_rfp: Option<SubscriberProfileIdForRfp>,
    pub e_rabs_to_be_setup_list: ERabsToBeSetupList,
    /// RRC-Context ::= OCTET STRING, the HandoverPreparationInformation message
    pub rrc_context: Vec<u8>,
    pub handover_restriction_list: Option<HandoverRestrictionList>,
    pub location_reporting_information: Option<LocationReportingInformation>,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for UeContextInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.subscriber_profile_id_for_rfp.is_some())?;
        encoder.write_bit(self.handover_restriction_list.is_some())?;
        encoder.write_bit(self.location_reporting_information.is_some())?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.mme_ue_s1ap_id.pack(encoder)?;
        self.ue_security_capabilities.pack(encoder)?;
        self.as_security_information.pack(encoder)?;
        self.ue_aggregate_maximum_bit_rate.pack(encoder)?;
        pack_optional(&self.subscriber_profile_id_for_rfp, encoder)?;
        self.e_rabs_to_be_setup_list.pack(encoder)?;
        encoder.write_octet_string(&self.rrc_context)?;
        pack_optional(&self.handover_restriction_list, encoder)?;
        pack_optional(&self.location_reporting_information, encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("UE-ContextInformation")?;
        let has_spid = decoder.read_bit()?;
        let has_hrl = decoder.read_bit()?;
        let has_lri = decoder.read_bit()?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            mme_ue_s1ap_id: UeS1apId::unpack(decoder)?,
            ue_security_capabilities: UeSecurityCapabilities::unpack(decoder)?,
            as_security_information: AsSecurityInformation::unpack(decoder)?,
            ue_aggregate_maximum_bit_rate: UeAggregateMaximumBitRate::unpack(decoder)?,
            subscriber_profile_id_for_rfp: unpack_optional(has_spid, decoder)?,
            e_rabs_to_be_setup_list: ERabsToBeSetupList::unpack(decoder)?,
            rrc_context: decoder.read_octet_string()?,
            handover_restriction_list: unpack_optional(has_hrl, decoder)?,
            location_reporting_information: unpack_optional(has_lri, decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}
