//! ProtocolIE-Container handling shared by every message
//!
//! ```text
//! ProtocolIE-Container ::= SEQUENCE (SIZE (0..maxProtocolIEs)) OF ProtocolIE-Field
//! ProtocolIE-Field     ::= SEQUENCE { id, criticality, value (open type) }
//! ```
//!
//! The count precedes the fields, so the writer collects the fields in a
//! separate cursor and emits the count once every IE has been packed.

use crate::ie::common::{Criticality, ProtocolIeId, MAX_PROTOCOL_IES};
use crate::per::{PerCodec, PerDecoder, PerEncoder, SizeConstraint};
use log::Level;
use x2ap_core::{CodecConfig, DecodeError, DiagnosticSink, X2apError, X2apResult};

const CONTAINER_SIZE: SizeConstraint = SizeConstraint::new(0, MAX_PROTOCOL_IES);

/// Builder for the protocol IEs of one message
pub struct ProtocolIeContainerWriter<'s> {
    fields: PerEncoder<'s>,
    count: usize,
}

impl<'s> ProtocolIeContainerWriter<'s> {
    /// Create a writer sharing the configuration and sink of `encoder`
    pub fn new(encoder: &PerEncoder<'s>) -> Self {
        Self {
            fields: PerEncoder::with_options(*encoder.config(), encoder.sink()),
            count: 0,
        }
    }

    /// Append one ProtocolIE-Field
    pub fn push<T: PerCodec>(&mut self, id: ProtocolIeId, criticality: Criticality, value: &T) -> X2apResult<()> {
        id.pack(&mut self.fields)?;
        criticality.pack(&mut self.fields)?;
        self.fields.write_open_type(|inner| value.pack(inner))?;
        self.count += 1;
        Ok(())
    }

    /// Append a ProtocolIE-Field if `value` is present
    pub fn push_optional<T: PerCodec>(
        &mut self,
        id: ProtocolIeId,
        criticality: Criticality,
        value: &Option<T>,
    ) -> X2apResult<()> {
        match value {
            Some(value) => self.push(id, criticality, value),
            None => Ok(()),
        }
    }

    /// Write the IE count followed by the collected fields
    pub fn finish(self, encoder: &mut PerEncoder<'_>) -> X2apResult<()> {
        encoder.write_sequence_of_count(self.count, CONTAINER_SIZE)?;
        // every field ends on an octet boundary, and so does the count
        encoder.write_octets(&self.fields.into_bytes())
    }
}

#[derive(Debug)]
struct RawIe<'a> {
    id: ProtocolIeId,
    criticality: Criticality,
    value: &'a [u8],
    taken: bool,
}

/// Protocol IEs of one received message, decoded on demand
///
/// IE values stay undecoded until a message codec asks for them by id, so
/// the order of IEs on the wire does not matter.
pub struct ProtocolIeContainerReader<'a> {
    fields: Vec<RawIe<'a>>,
    config: CodecConfig,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ProtocolIeContainerReader<'a> {
    /// Read the IE count and the raw fields
    ///
    /// # Errors
    /// * `DuplicateIe` if an IE id occurs twice
    pub fn read(decoder: &mut PerDecoder<'a>) -> X2apResult<Self> {
        let count = decoder.read_sequence_of_count(CONTAINER_SIZE)?;
        let mut fields: Vec<RawIe<'a>> = Vec::with_capacity(count.min(decoder.remaining_bits() / 8));
        for _ in 0..count {
            let id = ProtocolIeId::unpack(decoder)?;
            let criticality = Criticality::unpack(decoder)?;
            let value = decoder.read_open_type_octets()?;
            if fields.iter().any(|field| field.id == id) {
                return Err(X2apError::Decode(DecodeError::DuplicateIe { id: id.0 }));
            }
            fields.push(RawIe {
                id,
                criticality,
                value,
                taken: false,
            });
        }
        Ok(Self {
            fields,
            config: *decoder.config(),
            sink: decoder.sink(),
        })
    }

    /// Number of IEs in the container
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode the IE with `id`, if present
    pub fn take<T: PerCodec>(&mut self, id: ProtocolIeId) -> X2apResult<Option<T>> {
        let Some(field) = self.fields.iter_mut().find(|field| field.id == id) else {
            return Ok(None);
        };
        field.taken = true;
        let mut inner = PerDecoder::with_options(field.value, self.config, self.sink);
        let value = T::unpack(&mut inner)?;
        inner.finish()?;
        Ok(Some(value))
    }

    /// Decode the mandatory IE with `id`
    ///
    /// # Errors
    /// * `MissingIe` if the container has no such IE
    pub fn require<T: PerCodec>(&mut self, id: ProtocolIeId) -> X2apResult<T> {
        self.take(id)?
            .ok_or(X2apError::Decode(DecodeError::MissingIe { id: id.0 }))
    }

    /// Check the IEs no message field asked for
    ///
    /// Unknown IEs with criticality reject always fail. Others are skipped
    /// and reported to the sink when `skip_unknown_ies` is set.
    pub fn finish(self) -> X2apResult<()> {
        for field in self.fields.iter().filter(|field| !field.taken) {
            if field.criticality == Criticality::Reject || !self.config.skip_unknown_ies {
                return Err(X2apError::Decode(DecodeError::UnknownIe { id: field.id.0 }));
            }
            let level = match field.criticality {
                Criticality::Notify => Level::Warn,
                _ => Level::Debug,
            };
            self.sink.report(
                level,
                &format!(
                    "skipping unknown IE {} ({:?}, {} octets)",
                    field.id.0,
                    field.criticality,
                    field.value.len()
                ),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::identity::UeX2apId;
    use x2ap_core::MockDiagnosticSink;

    fn container(fields: &[(u16, Criticality, u16)]) -> Vec<u8> {
        let mut encoder = PerEncoder::new();
        let mut writer = ProtocolIeContainerWriter::new(&encoder);
        for (id, criticality, value) in fields {
            writer.push(ProtocolIeId(*id), *criticality, &UeX2apId(*value)).unwrap();
        }
        writer.finish(&mut encoder).unwrap();
        encoder.into_bytes()
    }

    #[test]
    fn test_writer_layout() {
        let bytes = container(&[(10, Criticality::Reject, 7)]);
        assert_eq!(bytes, vec![0x00, 0x01, 0x00, 0x0A, 0x00, 0x02, 0x00, 0x07]);
    }

    #[test]
    fn test_reader_take_and_require() {
        let bytes = container(&[(9, Criticality::Ignore, 3), (10, Criticality::Reject, 7)]);
        let mut decoder = PerDecoder::new(&bytes);
        let mut reader = ProtocolIeContainerReader::read(&mut decoder).unwrap();
        assert_eq!(reader.len(), 2);
        let old: UeX2apId = reader.require(ProtocolIeId::OLD_ENB_UE_X2AP_ID).unwrap();
        assert_eq!(old, UeX2apId(7));
        let new: Option<UeX2apId> = reader.take(ProtocolIeId::NEW_ENB_UE_X2AP_ID).unwrap();
        assert_eq!(new, Some(UeX2apId(3)));
        assert_eq!(
            reader.require::<UeX2apId>(ProtocolIeId::CAUSE).unwrap_err(),
            X2apError::Decode(DecodeError::MissingIe { id: 5 })
        );
        reader.finish().unwrap();
        decoder.finish().unwrap();
    }

    #[test]
    fn test_reader_rejects_duplicates() {
        let bytes = container(&[(10, Criticality::Reject, 1), (10, Criticality::Reject, 2)]);
        let mut decoder = PerDecoder::new(&bytes);
        assert_eq!(
            ProtocolIeContainerReader::read(&mut decoder).err(),
            Some(X2apError::Decode(DecodeError::DuplicateIe { id: 10 }))
        );
    }

    #[test]
    fn test_unknown_reject_ie_fails() {
        let bytes = container(&[(200, Criticality::Reject, 1)]);
        let mut decoder = PerDecoder::new(&bytes);
        let reader = ProtocolIeContainerReader::read(&mut decoder).unwrap();
        assert_eq!(
            reader.finish().unwrap_err(),
            X2apError::Decode(DecodeError::UnknownIe { id: 200 })
        );
    }

    #[test]
    fn test_unknown_ignore_ie_reported() {
        let bytes = container(&[(200, Criticality::Ignore, 1), (201, Criticality::Notify, 1)]);
        let mut sink = MockDiagnosticSink::new();
        sink.expect_report()
            .withf(|level, message| *level == Level::Debug && message.contains("unknown IE 200"))
            .times(1)
            .return_const(());
        sink.expect_report()
            .withf(|level, message| *level == Level::Warn && message.contains("unknown IE 201"))
            .times(1)
            .return_const(());
        let mut decoder = PerDecoder::with_options(&bytes, CodecConfig::default(), &sink);
        let reader = ProtocolIeContainerReader::read(&mut decoder).unwrap();
        reader.finish().unwrap();
    }

    #[test]
    fn test_unknown_ie_without_skipping() {
        let bytes = container(&[(200, Criticality::Ignore, 1)]);
        let config = CodecConfig {
            skip_unknown_ies: false,
            ..CodecConfig::default()
        };
        let sink = MockDiagnosticSink::new();
        let mut decoder = PerDecoder::with_options(&bytes, config, &sink);
        let reader = ProtocolIeContainerReader::read(&mut decoder).unwrap();
        assert!(reader.finish().unwrap_err().is_decode());
    }

    #[test]
    fn test_ie_value_must_fill_open_type() {
        // IE 10 carries three octets, UE-X2AP-ID uses two
        let bytes = [0x00, 0x01, 0x00, 0x0A, 0x00, 0x03, 0x00, 0x07, 0x01];
        let mut decoder = PerDecoder::new(&bytes);
        let mut reader = ProtocolIeContainerReader::read(&mut decoder).unwrap();
        assert_eq!(
            reader.require::<UeX2apId>(ProtocolIeId::OLD_ENB_UE_X2AP_ID).unwrap_err(),
            X2apError::Decode(DecodeError::TrailingData { octets: 1 })
        );
    }
}
