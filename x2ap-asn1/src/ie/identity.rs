//! Node, cell and UE identities

use crate::ie::common::{pack_optional, unpack_optional, ProtocolExtensionContainer};
use crate::per::{PerCodec, PerDecoder, PerEncoder};
use x2ap_core::{X2apError, X2apResult};

/// PLMN-Identity ::= OCTET STRING (SIZE(3)), TBCD encoded MCC and MNC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlmnIdentity(pub [u8; 3]);

impl PlmnIdentity {
    /// Build the TBCD form from decimal MCC (3 digits) and MNC (2 or 3 digits)
    pub fn from_mcc_mnc(mcc: &str, mnc: &str) -> X2apResult<Self> {
        let digits = |s: &str| -> X2apResult<Vec<u8>> {
            s.chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| X2apError::InvalidArgument(format!("non-digit '{}' in PLMN", c)))
                })
                .collect()
        };
        let mcc = digits(mcc)?;
        let mnc = digits(mnc)?;
        if mcc.len() != 3 || !(2..=3).contains(&mnc.len()) {
            return Err(X2apError::InvalidArgument(format!(
                "PLMN needs a 3 digit MCC and a 2 or 3 digit MNC, got {} and {}",
                mcc.len(),
                mnc.len()
            )));
        }
        let mnc3 = mnc.get(2).copied().unwrap_or(0x0F);
        Ok(Self([
            (mcc[1] << 4) | mcc[0],
            (mnc3 << 4) | mcc[2],
            (mnc[1] << 4) | mnc[0],
        ]))
    }

    /// Decimal MCC and MNC
    pub fn mcc_mnc(&self) -> (String, String) {
        let [b0, b1, b2] = self.0;
        let mcc = format!("{}{}{}", b0 & 0x0F, b0 >> 4, b1 & 0x0F);
        let mut mnc = format!("{}{}", b2 & 0x0F, b2 >> 4);
        if b1 >> 4 != 0x0F {
            mnc.push_str(&(b1 >> 4).to_string());
        }
        (mcc, mnc)
    }
}

impl PerCodec for PlmnIdentity {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_fixed_octet_string(&self.0, 3)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_octet_array()?))
    }
}

/// EUTRANCellIdentifier ::= BIT STRING (SIZE (28))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EutranCellIdentifier(u32);

impl EutranCellIdentifier {
    pub const BITS: usize = 28;
    pub const MAX: u32 = (1 << Self::BITS) - 1;

    pub fn new(value: u32) -> X2apResult<Self> {
        if value > Self::MAX {
            return Err(X2apError::InvalidArgument(format!(
                "cell identity {:#x} wider than 28 bits",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The 20 leftmost bits, the eNB identifier of a macro cell
    pub fn macro_enb_id(&self) -> u32 {
        self.0 >> 8
    }
}

impl PerCodec for EutranCellIdentifier {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        // fixed size above 16 bits starts on an octet
        encoder.align_up_zero(8)?;
        encoder.write_bits(self.0, Self::BITS)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.align_up(8)?;
        Ok(Self(decoder.read_bits(Self::BITS)?))
    }
}

/// ECGI ::= SEQUENCE { pLMN-Identity, eUTRANcellIdentifier, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecgi {
    pub plmn_identity: PlmnIdentity,
    pub eutran_cell_identifier: EutranCellIdentifier,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl Ecgi {
    pub fn new(plmn_identity: PlmnIdentity, eutran_cell_identifier: EutranCellIdentifier) -> Self {
        Self {
            plmn_identity,
            eutran_cell_identifier,
            ie_extensions: None,
        }
    }
}

impl PerCodec for Ecgi {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.plmn_identity.pack(encoder)?;
        self.eutran_cell_identifier.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("ECGI")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            plmn_identity: PlmnIdentity::unpack(decoder)?,
            eutran_cell_identifier: EutranCellIdentifier::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// MME-Group-ID ::= OCTET STRING (SIZE (2))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MmeGroupId(pub [u8; 2]);

impl PerCodec for MmeGroupId {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_fixed_octet_string(&self.0, 2)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_octet_array()?))
    }
}

/// MME-Code ::= OCTET STRING (SIZE (1))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MmeCode(pub u8);

impl PerCodec for MmeCode {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_fixed_octet_string(&[self.0], 1)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        let [code] = decoder.read_octet_array::<1>()?;
        Ok(Self(code))
    }
}

/// GU-Group-ID ::= SEQUENCE { pLMN-Identity, mME-Group-ID, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuGroupId {
    pub plmn_identity: PlmnIdentity,
    pub mme_group_id: MmeGroupId,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for GuGroupId {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.plmn_identity.pack(encoder)?;
        self.mme_group_id.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("GU-Group-ID")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            plmn_identity: PlmnIdentity::unpack(decoder)?,
            mme_group_id: MmeGroupId::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// GUMMEI ::= SEQUENCE { gU-Group-ID, mME-Code, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gummei {
    pub gu_group_id: GuGroupId,
    pub mme_code: MmeCode,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for Gummei {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.gu_group_id.pack(encoder)?;
        self.mme_code.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("GUMMEI")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            gu_group_id: GuGroupId::unpack(decoder)?,
            mme_code: MmeCode::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// UE-X2AP-ID ::= INTEGER (0..4095)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UeX2apId(pub u16);

impl UeX2apId {
    pub const MAX: u16 = 4095;
}

impl PerCodec for UeX2apId {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, Self::MAX as u64)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, Self::MAX as u64)? as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x2ap_core::{DecodeError, EncodeError};

    #[test]
    fn test_plmn_tbcd() {
        let plmn = PlmnIdentity::from_mcc_mnc("001", "01").unwrap();
        assert_eq!(plmn.0, [0x00, 0xF1, 0x10]);
        assert_eq!(plmn.mcc_mnc(), ("001".to_string(), "01".to_string()));

        let plmn = PlmnIdentity::from_mcc_mnc("310", "410").unwrap();
        assert_eq!(plmn.0, [0x13, 0x00, 0x14]);
        assert_eq!(plmn.mcc_mnc(), ("310".to_string(), "410".to_string()));

        assert!(PlmnIdentity::from_mcc_mnc("01", "01").is_err());
        assert!(PlmnIdentity::from_mcc_mnc("0a1", "01").is_err());
    }

    #[test]
    fn test_ecgi_layout() {
        let ecgi = Ecgi::new(
            PlmnIdentity([0x00, 0xF1, 0x10]),
            EutranCellIdentifier::new(0x0123456).unwrap(),
        );
        let bytes = ecgi.to_per_bytes().unwrap();
        // ext 0, no extensions, pad, PLMN, 28 bit cell id, pad
        assert_eq!(bytes, vec![0x00, 0x00, 0xF1, 0x10, 0x01, 0x23, 0x45, 0x60]);
        assert_eq!(Ecgi::from_per_bytes(&bytes).unwrap(), ecgi);
        assert_eq!(ecgi.eutran_cell_identifier.macro_enb_id(), 0x01234);
    }

    #[test]
    fn test_ecgi_extension_bit_rejected() {
        let bytes = [0x80, 0x00, 0xF1, 0x10, 0x01, 0x23, 0x45, 0x60];
        assert_eq!(
            Ecgi::from_per_bytes(&bytes).unwrap_err(),
            X2apError::Decode(DecodeError::ExtensionNotSupported { what: "ECGI" })
        );
    }

    #[test]
    fn test_cell_identifier_range() {
        assert!(EutranCellIdentifier::new(EutranCellIdentifier::MAX).is_ok());
        assert!(EutranCellIdentifier::new(EutranCellIdentifier::MAX + 1).is_err());
        let cell = EutranCellIdentifier::new(EutranCellIdentifier::MAX).unwrap();
        assert_eq!(cell.to_per_bytes().unwrap(), vec![0xFF, 0xFF, 0xFF, 0xF0]);
    }

    #[test]
    fn test_gummei_layout() {
        let gummei = Gummei {
            gu_group_id: GuGroupId {
                plmn_identity: PlmnIdentity([0x00, 0xF1, 0x10]),
                mme_group_id: MmeGroupId([0x80, 0x01]),
                ie_extensions: None,
            },
            mme_code: MmeCode(0x02),
            ie_extensions: None,
        };
        let bytes = gummei.to_per_bytes().unwrap();
        // two sequence preambles, pad, PLMN, then the 2 and 1 octet strings unaligned
        assert_eq!(bytes, vec![0x00, 0x00, 0xF1, 0x10, 0x80, 0x01, 0x02]);
        assert_eq!(Gummei::from_per_bytes(&bytes).unwrap(), gummei);
    }

    #[test]
    fn test_ue_x2ap_id_two_octets() {
        assert_eq!(UeX2apId(4095).to_per_bytes().unwrap(), vec![0x0F, 0xFF]);
        assert_eq!(UeX2apId::from_per_bytes(&[0x00, 0x07]).unwrap(), UeX2apId(7));
        assert_eq!(
            UeX2apId(4096).to_per_bytes().unwrap_err(),
            X2apError::Encode(EncodeError::ValueOutOfRange { value: 4096, min: 0, max: 4095 })
        );
        assert!(UeX2apId::from_per_bytes(&[0x10, 0x00]).unwrap_err().is_decode());
    }
}
