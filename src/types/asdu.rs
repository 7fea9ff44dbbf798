//! IEC 60870-5-101 ASDU (Application Service Data Unit).
//!
//! ASDU contains the actual data (measurements, commands, etc.).
//!
//! ```text
//! +---------+-----+-----+----+----------------------------+
//! | Type ID | VSQ | COT | CA | Information objects ...    |
//! +---------+-----+-----+----+----------------------------+
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Iec101Error, Result};
use crate::parser;
use crate::types::{Cot, InformationElement, TimeTag, TypeId};

/// Size of the ASDU header (type id, VSQ, COT, common address).
pub const ASDU_HEADER_SIZE: usize = 4;

/// Size of an information object address.
pub const IOA_SIZE: usize = 2;

/// Maximum number of information objects (7-bit VSQ number).
pub const MAX_OBJECTS: usize = 127;

/// Variable Structure Qualifier (VSQ).
///
/// Defines the structure of information objects in an ASDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vsq {
    /// Number of information objects or elements (1-127)
    pub count: u8,
    /// If true, one base address precedes all elements (SQ=1)
    pub sequence: bool,
}

impl Vsq {
    /// Create a new VSQ.
    #[inline]
    pub const fn new(count: u8, sequence: bool) -> Self {
        Self { count, sequence }
    }

    /// Parse VSQ from byte.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self {
            count: value & 0x7F,
            sequence: (value & 0x80) != 0,
        }
    }

    /// Encode VSQ to byte.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        (self.count & 0x7F) | if self.sequence { 0x80 } else { 0 }
    }
}

/// Information Object Address (IOA).
///
/// 2-byte address identifying a data point within a common address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Ioa(pub u16);

impl Ioa {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Encode IOA to 2 bytes (little-endian).
    #[inline]
    pub const fn to_bytes(&self) -> [u8; IOA_SIZE] {
        self.0.to_le_bytes()
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Address `offset` positions after this one, wrapping at 0xFFFF.
    #[inline]
    pub const fn offset(&self, offset: usize) -> Self {
        Self(self.0.wrapping_add(offset as u16))
    }
}

impl std::fmt::Display for Ioa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Ioa {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// ASDU header (fixed part, without VSQ).
///
/// The VSQ is derived from the information objects, see [`Asdu::vsq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsduHeader {
    /// Type identification
    pub type_id: TypeId,
    /// Cause of transmission
    pub cot: Cot,
    /// Test flag (if true, this is a test ASDU)
    pub test: bool,
    /// Negative flag (if true, negative confirmation)
    pub negative: bool,
    /// Common address of ASDU (station address)
    pub common_address: u8,
}

impl AsduHeader {
    /// Create a new ASDU header.
    pub fn new(type_id: TypeId, cot: Cot, common_address: u8) -> Self {
        Self {
            type_id,
            cot,
            test: false,
            negative: false,
            common_address,
        }
    }

    /// Parse ASDU header from bytes.
    ///
    /// Returns the header and the VSQ.
    pub fn parse(data: &[u8]) -> Result<(Self, Vsq)> {
        if data.len() < ASDU_HEADER_SIZE {
            return Err(Iec101Error::truncated(ASDU_HEADER_SIZE, data.len()));
        }

        let type_id = TypeId::from_u8(data[0])?;
        let vsq = Vsq::from_u8(data[1]);

        // COT is in lower 6 bits, test flag in bit 7, negative in bit 6
        let cot = Cot::from_u8(data[2]);
        let test = (data[2] & 0x80) != 0;
        let negative = (data[2] & 0x40) != 0;

        Ok((
            Self {
                type_id,
                cot,
                test,
                negative,
                common_address: data[3],
            },
            vsq,
        ))
    }

    /// Encode ASDU header to bytes.
    pub fn encode(&self, vsq: Vsq, buf: &mut impl BufMut) {
        buf.put_u8(self.type_id.as_u8());
        buf.put_u8(vsq.as_u8());

        let mut cot_byte = self.cot.as_u8();
        if self.test {
            cot_byte |= 0x80;
        }
        if self.negative {
            cot_byte |= 0x40;
        }
        buf.put_u8(cot_byte);
        buf.put_u8(self.common_address);
    }
}

/// Information object with its own address (SQ=0 layout).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InformationObject {
    /// Information object address
    pub address: Ioa,
    /// Element group
    pub element: InformationElement,
    /// Time tag, present for time-tagged type identifiers
    pub time: Option<TimeTag>,
}

impl InformationObject {
    /// Create an object without time tag.
    pub fn new(address: u16, element: InformationElement) -> Self {
        Self {
            address: Ioa(address),
            element,
            time: None,
        }
    }

    /// Create an object with a time tag.
    pub fn with_time(
        address: u16,
        element: InformationElement,
        time: impl Into<TimeTag>,
    ) -> Self {
        Self {
            address: Ioa(address),
            element,
            time: Some(time.into()),
        }
    }
}

/// The information objects of an ASDU in one of the two addressing layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum InformationObjects {
    /// SQ=0: every object carries its own address.
    Discrete(Vec<InformationObject>),
    /// SQ=1: one base address; element `i` is addressed `base + i`.
    Sequence {
        base: Ioa,
        elements: Vec<InformationElement>,
    },
}

impl InformationObjects {
    /// Discrete objects (SQ=0).
    pub fn discrete(objects: Vec<InformationObject>) -> Self {
        Self::Discrete(objects)
    }

    /// A sequence of elements from a base address (SQ=1).
    pub fn sequence(base: u16, elements: Vec<InformationElement>) -> Self {
        Self::Sequence {
            base: Ioa(base),
            elements,
        }
    }

    /// Build a sequence from explicitly addressed elements.
    ///
    /// Addresses must be strictly contiguous starting at the first one.
    pub fn sequence_from_addressed<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Ioa, InformationElement)>,
    {
        let mut items = items.into_iter();
        let (base, first) = items.next().ok_or(Iec101Error::VsqNumberZero)?;
        let mut elements = vec![first];

        for (address, element) in items {
            let expected = base.offset(elements.len());
            if address != expected {
                return Err(Iec101Error::NonContiguousSequence {
                    expected: expected.value(),
                    actual: address.value(),
                });
            }
            elements.push(element);
        }

        Ok(Self::Sequence { base, elements })
    }

    /// Number of objects (SQ=0) or elements (SQ=1).
    pub fn len(&self) -> usize {
        match self {
            Self::Discrete(objects) => objects.len(),
            Self::Sequence { elements, .. } => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this uses the SQ=1 layout.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. })
    }

    /// Iterate over all objects with implicit sequence addresses resolved.
    pub fn iter(&self) -> Objects<'_> {
        Objects {
            objects: self,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &'a InformationObjects {
    type Item = (Ioa, &'a InformationElement, Option<&'a TimeTag>);
    type IntoIter = Objects<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(address, element, time tag)` of [`InformationObjects`].
#[derive(Debug, Clone)]
pub struct Objects<'a> {
    objects: &'a InformationObjects,
    index: usize,
}

impl<'a> Iterator for Objects<'a> {
    type Item = (Ioa, &'a InformationElement, Option<&'a TimeTag>);

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.objects {
            InformationObjects::Discrete(objects) => objects
                .get(self.index)
                .map(|obj| (obj.address, &obj.element, obj.time.as_ref())),
            InformationObjects::Sequence { base, elements } => elements
                .get(self.index)
                .map(|element| (base.offset(self.index), element, None)),
        }?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.objects.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Objects<'_> {}

/// Complete ASDU.
#[derive(Debug, Clone, PartialEq)]
pub struct Asdu {
    /// ASDU header
    pub header: AsduHeader,
    /// Information objects
    pub objects: InformationObjects,
}

impl Asdu {
    /// Create a new ASDU.
    pub fn new(header: AsduHeader, objects: InformationObjects) -> Self {
        Self { header, objects }
    }

    /// Create a single-object command ASDU with cause Activation.
    pub fn command(
        type_id: TypeId,
        common_address: u8,
        address: u16,
        element: InformationElement,
    ) -> Self {
        Self::new(
            AsduHeader::new(type_id, Cot::Activation, common_address),
            InformationObjects::Discrete(vec![InformationObject::new(address, element)]),
        )
    }

    /// VSQ describing the information objects.
    ///
    /// The count saturates at 127; encoding rejects anything larger.
    pub fn vsq(&self) -> Vsq {
        let count = self.objects.len().min(MAX_OBJECTS) as u8;
        Vsq::new(count, self.objects.is_sequence())
    }

    /// Parse ASDU from bytes (the link user data of a variable frame).
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (header, vsq) = AsduHeader::parse(data)?;
        let objects = parser::decode_objects(header.type_id, vsq, &data[ASDU_HEADER_SIZE..])?;
        Ok(Self { header, objects })
    }

    /// Encode ASDU to bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_to(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Check that the header and objects can be encoded as they stand.
    pub fn validate(&self) -> Result<()> {
        if !self.header.cot.is_encodable() {
            return Err(Iec101Error::InvalidCot(self.header.cot));
        }
        parser::validate_objects(self.header.type_id, &self.objects)
    }

    /// Encode ASDU into the provided buffer.
    ///
    /// Nothing is written if [`Self::validate`] fails.
    pub fn encode_to(&self, buf: &mut impl BufMut) -> Result<()> {
        self.validate()?;
        self.header.encode(self.vsq(), buf);
        parser::encode_objects(self.header.type_id, &self.objects, buf)
    }

    /// Calculate the encoded length of this ASDU.
    pub fn encoded_len(&self) -> usize {
        ASDU_HEADER_SIZE + parser::objects_len(self.header.type_id, &self.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cp56Time2a, Qds, Siq};

    #[test]
    fn test_vsq() {
        let vsq = Vsq::new(10, false);
        assert_eq!(vsq.as_u8(), 10);

        let vsq = Vsq::new(10, true);
        assert_eq!(vsq.as_u8(), 0x8A);

        let vsq = Vsq::from_u8(0x8A);
        assert_eq!(vsq.count, 10);
        assert!(vsq.sequence);
    }

    #[test]
    fn test_ioa() {
        let ioa = Ioa::new(0x1234);
        assert_eq!(ioa.to_bytes(), [0x34, 0x12]);
        assert_eq!(ioa.offset(2), Ioa(0x1236));
        assert_eq!(Ioa(0xFFFF).offset(1), Ioa(0));
    }

    #[test]
    fn test_asdu_header() {
        let mut header = AsduHeader::new(TypeId::MeasuredFloat, Cot::Spontaneous, 7);
        header.test = true;
        let mut buf = BytesMut::new();
        header.encode(Vsq::new(5, false), &mut buf);
        assert_eq!(&buf[..], &[13, 0x05, 0x83, 0x07]);

        let (parsed, vsq) = AsduHeader::parse(&buf).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(vsq, Vsq::new(5, false));
    }

    #[test]
    fn test_asdu_header_negative_flag() {
        let (header, _) = AsduHeader::parse(&[45, 0x01, 0x47, 0x01]).unwrap();
        assert!(header.negative);
        assert!(!header.test);
        assert_eq!(header.cot, Cot::ActivationConfirm);
    }

    #[test]
    fn test_asdu_header_truncated() {
        assert!(matches!(
            AsduHeader::parse(&[1, 1]),
            Err(Iec101Error::TruncatedInput {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_sequence_from_addressed() {
        let element = InformationElement::SinglePoint(Siq::new(true));
        let objects = InformationObjects::sequence_from_addressed([
            (Ioa(0x1000), element),
            (Ioa(0x1001), element),
            (Ioa(0x1002), element),
        ])
        .unwrap();
        assert_eq!(
            objects,
            InformationObjects::sequence(0x1000, vec![element; 3])
        );

        let gap = InformationObjects::sequence_from_addressed([
            (Ioa(0x1000), element),
            (Ioa(0x1002), element),
        ]);
        assert!(matches!(
            gap,
            Err(Iec101Error::NonContiguousSequence {
                expected: 0x1001,
                actual: 0x1002
            })
        ));

        let empty =
            InformationObjects::sequence_from_addressed(Vec::<(Ioa, InformationElement)>::new());
        assert!(matches!(empty, Err(Iec101Error::VsqNumberZero)));
    }

    #[test]
    fn test_objects_iter() {
        let time = Cp56Time2a::new(24, 1, 2, 3, 4, 5);
        let element = InformationElement::Scaled {
            sva: -7,
            qds: Qds::GOOD,
        };
        let discrete = InformationObjects::discrete(vec![
            InformationObject::with_time(10, element, time),
            InformationObject::with_time(20, element, time),
        ]);
        let addresses: Vec<Ioa> = discrete.iter().map(|(ioa, _, _)| ioa).collect();
        assert_eq!(addresses, vec![Ioa(10), Ioa(20)]);
        assert!(discrete.iter().all(|(_, _, t)| t == Some(&TimeTag::Cp56(time))));

        let sequence = InformationObjects::sequence(0x1000, vec![element; 3]);
        let addresses: Vec<Ioa> = sequence.iter().map(|(ioa, _, _)| ioa).collect();
        assert_eq!(addresses, vec![Ioa(0x1000), Ioa(0x1001), Ioa(0x1002)]);
        assert_eq!(sequence.iter().len(), 3);
    }

    #[test]
    fn test_asdu_vsq_derived() {
        let element = InformationElement::SinglePoint(Siq::new(false));
        let asdu = Asdu::new(
            AsduHeader::new(TypeId::SinglePoint, Cot::Periodic, 1),
            InformationObjects::sequence(1, vec![element]),
        );
        assert_eq!(asdu.vsq(), Vsq::new(1, true));
    }

    #[test]
    fn test_asdu_parse_unknown_type() {
        assert!(matches!(
            Asdu::parse(&[0x99, 0x01, 0x03, 0x01, 0x01, 0x00, 0x01]),
            Err(Iec101Error::UnknownTypeId(0x99))
        ));
    }

    #[test]
    fn test_asdu_parse_and_encode() {
        // M_ME_TF_1, spontaneous, CA=3, IOA=0x4001, 1.0, CP56
        let mut data = vec![36, 0x01, 0x03, 0x03, 0x01, 0x40];
        data.extend_from_slice(&1.0f32.to_le_bytes());
        data.push(0x00);
        data.extend_from_slice(&[0x10, 0x27, 0x1E, 0x0C, 0x2F, 0x03, 0x18]);

        let asdu = Asdu::parse(&data).unwrap();
        assert_eq!(asdu.header.type_id, TypeId::MeasuredFloatTime56);
        assert_eq!(asdu.header.cot, Cot::Spontaneous);
        assert_eq!(asdu.header.common_address, 3);
        assert_eq!(asdu.encoded_len(), data.len());

        let (ioa, element, time) = asdu.objects.iter().next().unwrap();
        assert_eq!(ioa, Ioa(0x4001));
        assert_eq!(
            *element,
            InformationElement::Float {
                value: 1.0,
                qds: Qds::GOOD
            }
        );
        let Some(TimeTag::Cp56(time)) = time else {
            panic!("Expected CP56 time tag");
        };
        assert_eq!(time.year(), 24);
        assert_eq!(time.month(), 3);
        assert_eq!(time.day(), 15);
        assert_eq!(time.day_of_week(), 1);
        assert_eq!(time.hour(), 12);
        assert_eq!(time.minute(), 30);
        assert_eq!(time.milliseconds(), 10_000);

        assert_eq!(&asdu.encode().unwrap()[..], &data[..]);
    }

    #[test]
    fn test_asdu_command() {
        let asdu = Asdu::command(
            TypeId::SingleCommand,
            1,
            0x0A0B,
            InformationElement::SingleCommand(crate::types::Sco::new(true, 0, true)),
        );
        assert_eq!(
            &asdu.encode().unwrap()[..],
            &[45, 0x01, 0x06, 0x01, 0x0B, 0x0A, 0x81]
        );
    }

    #[test]
    fn test_asdu_encode_rejects_invalid_objects() {
        let asdu = Asdu::new(
            AsduHeader::new(TypeId::DoubleCommand, Cot::Activation, 1),
            InformationObjects::discrete(vec![InformationObject::new(
                1,
                InformationElement::SinglePoint(Siq::new(true)),
            )]),
        );
        let mut buf = BytesMut::new();
        assert!(matches!(
            asdu.encode_to(&mut buf),
            Err(Iec101Error::ElementMismatch {
                type_id: TypeId::DoubleCommand,
                ..
            })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_asdu_encode_rejects_ambiguous_cot() {
        let element = InformationElement::SinglePoint(Siq::new(true));
        for cot in [Cot::Interrogated(17), Cot::Unassigned(3)] {
            let asdu = Asdu::new(
                AsduHeader::new(TypeId::SinglePoint, cot, 1),
                InformationObjects::discrete(vec![InformationObject::new(1, element)]),
            );
            let mut buf = BytesMut::new();
            assert!(matches!(
                asdu.encode_to(&mut buf),
                Err(Iec101Error::InvalidCot(c)) if c == cot
            ));
            assert!(buf.is_empty());
        }

        let asdu = Asdu::new(
            AsduHeader::new(TypeId::SinglePoint, Cot::Interrogated(16), 1),
            InformationObjects::discrete(vec![InformationObject::new(1, element)]),
        );
        let bytes = asdu.encode().unwrap();
        assert_eq!(bytes[2], 36);
        assert_eq!(Asdu::parse(&bytes).unwrap(), asdu);
    }
}
