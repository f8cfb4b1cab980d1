//! UE history IEs

use crate::ie::common::{pack_optional, unpack_optional, ProtocolExtensionContainer};
use crate::ie::identity::Ecgi;
use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use x2ap_core::{DecodeError, X2apError, X2apResult};

/// maxnoofCells
pub const MAX_NO_OF_CELLS: usize = 16;

per_enumerated! {
    /// Cell-Size ::= ENUMERATED { verysmall, small, medium, large, ... }
    pub enum CellSize ("Cell-Size", extensible = true) {
        VerySmall,
        Small,
        Medium,
        Large,
    }
}

/// CellType ::= SEQUENCE { cell-Size, iE-Extensions OPTIONAL, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellType {
    pub cell_size: CellSize,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for CellType {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.cell_size.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("CellType")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            cell_size: CellSize::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// Time-UE-StayedInCell ::= INTEGER (0..4095), in seconds
///
/// Encoded as two aligned octets, the X.691 form for a range of 4096.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeUeStayedInCell(pub u16);

impl TimeUeStayedInCell {
    pub const MAX: u16 = 4095;
}

impl PerCodec for TimeUeStayedInCell {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_constrained_whole_number(self.0 as u64, 0, Self::MAX as u64)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_constrained_whole_number(0, Self::MAX as u64)? as u16))
    }
}

/// LastVisitedEUTRANCellInformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastVisitedEutranCellInformation {
    pub global_cell_id: Ecgi,
    pub cell_type: CellType,
    pub time_ue_stayed_in_cell: TimeUeStayedInCell,
    pub ie_extensions: Option<ProtocolExtensionContainer>,
}

impl PerCodec for LastVisitedEutranCellInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_extension_bit(false)?;
        encoder.write_bit(self.ie_extensions.is_some())?;
        self.global_cell_id.pack(encoder)?;
        self.cell_type.pack(encoder)?;
        self.time_ue_stayed_in_cell.pack(encoder)?;
        pack_optional(&self.ie_extensions, encoder)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        decoder.read_extension_bit("LastVisitedEUTRANCellInformation")?;
        let has_extensions = decoder.read_bit()?;
        Ok(Self {
            global_cell_id: Ecgi::unpack(decoder)?,
            cell_type: CellType::unpack(decoder)?,
            time_ue_stayed_in_cell: TimeUeStayedInCell::unpack(decoder)?,
            ie_extensions: unpack_optional(has_extensions, decoder)?,
        })
    }
}

/// LastVisitedGERANCellInformation ::= CHOICE { undefined NULL, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastVisitedGeranCellInformation {
    Undefined,
}

impl PerCodec for LastVisitedGeranCellInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        match self {
            LastVisitedGeranCellInformation::Undefined => encoder.write_choice_index(0, 1, true),
        }
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        match decoder.read_choice_index(1, true, "LastVisitedGERANCellInformation")? {
            0 => Ok(LastVisitedGeranCellInformation::Undefined),
            index => Err(X2apError::Decode(DecodeError::UnknownChoice {
                what: "LastVisitedGERANCellInformation",
                index,
            })),
        }
    }
}

/// LastVisitedCell-Item ::= CHOICE { e-UTRAN-Cell, uTRAN-Cell, gERAN-Cell, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastVisitedCell {
    EUtran(LastVisitedEutranCellInformation),
    /// LastVisitedUTRANCellInformation ::= OCTET STRING
    Utran(Vec<u8>),
    Geran(LastVisitedGeranCellInformation),
}

impl PerCodec for LastVisitedCell {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        match self {
            LastVisitedCell::EUtran(info) => {
                encoder.write_choice_index(0, 3, true)?;
                info.pack(encoder)
            }
            LastVisitedCell::Utran(info) => {
                encoder.write_choice_index(1, 3, true)?;
                encoder.write_octet_string(info)
            }
            LastVisitedCell::Geran(info) => {
                encoder.write_choice_index(2, 3, true)?;
                info.pack(encoder)
            }
        }
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        match decoder.read_choice_index(3, true, "LastVisitedCell-Item")? {
            0 => Ok(LastVisitedCell::EUtran(LastVisitedEutranCellInformation::unpack(decoder)?)),
            1 => Ok(LastVisitedCell::Utran(decoder.read_octet_string()?)),
            2 => Ok(LastVisitedCell::Geran(LastVisitedGeranCellInformation::unpack(decoder)?)),
            index => Err(X2apError::Decode(DecodeError::UnknownChoice {
                what: "LastVisitedCell-Item",
                index,
            })),
        }
    }
}

/// UE-HistoryInformation ::= SEQUENCE (SIZE(1..maxnoofCells)) OF LastVisitedCell-Item
///
/// Most recently visited cell first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeHistoryInformation(pub Vec<LastVisitedCell>);

impl UeHistoryInformation {
    const SIZE: SizeConstraint = SizeConstraint::new(1, MAX_NO_OF_CELLS);
}

impl PerCodec for UeHistoryInformation {
    fn pack(&self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_sequence_of(&self.0, Self::SIZE)
    }

    fn unpack(decoder: &mut PerDecoder<'_>) -> X2apResult<Self> {
        Ok(Self(decoder.read_sequence_of(Self::SIZE)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::identity::{EutranCellIdentifier, PlmnIdentity};

    fn eutran_cell(seconds: u16) -> LastVisitedCell {
        LastVisitedCell::EUtran(LastVisitedEutranCellInformation {
            global_cell_id: Ecgi::new(
                PlmnIdentity([0x00, 0xF1, 0x10]),
                EutranCellIdentifier::new(0x0123456).unwrap(),
            ),
            cell_type: CellType {
                cell_size: CellSize::Medium,
                ie_extensions: None,
            },
            time_ue_stayed_in_cell: TimeUeStayedInCell(seconds),
            ie_extensions: None,
        })
    }

    #[test]
    fn test_eutran_cell_layout() {
        let cell = eutran_cell(10);
        let bytes = cell.to_per_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![0x00, 0x00, 0xF1, 0x10, 0x01, 0x23, 0x45, 0x61, 0x00, 0x00, 0x0A]
        );
        assert_eq!(LastVisitedCell::from_per_bytes(&bytes).unwrap(), cell);
    }

    #[test]
    fn test_time_stayed_in_cell_two_octets() {
        assert_eq!(TimeUeStayedInCell(4095).to_per_bytes().unwrap(), vec![0x0F, 0xFF]);
        assert!(TimeUeStayedInCell(4096).to_per_bytes().unwrap_err().is_encode());
    }

    #[test]
    fn test_utran_and_geran_cells() {
        let utran = LastVisitedCell::Utran(vec![0xAB, 0xCD]);
        assert_eq!(utran.to_per_bytes().unwrap(), vec![0x20, 0x02, 0xAB, 0xCD]);
        let geran = LastVisitedCell::Geran(LastVisitedGeranCellInformation::Undefined);
        assert_eq!(geran.to_per_bytes().unwrap(), vec![0x40]);
        assert_eq!(LastVisitedCell::from_per_bytes(&[0x40]).unwrap(), geran);
    }

    #[test]
    fn test_unknown_cell_choice() {
        // root has three alternatives, tag 3 is not one of them
        assert_eq!(
            LastVisitedCell::from_per_bytes(&[0x60]).unwrap_err(),
            X2apError::Decode(DecodeError::UnknownChoice { what: "LastVisitedCell-Item", index: 3 })
        );
    }

    #[test]
    fn test_history_list() {
        let history = UeHistoryInformation(vec![
            eutran_cell(30),
            LastVisitedCell::Geran(LastVisitedGeranCellInformation::Undefined),
        ]);
        let bytes = history.to_per_bytes().unwrap();
        assert_eq!(bytes[0] >> 4, 1);
        assert_eq!(UeHistoryInformation::from_per_bytes(&bytes).unwrap(), history);
        assert!(UeHistoryInformation(vec![]).to_per_bytes().unwrap_err().is_encode());
    }
}
