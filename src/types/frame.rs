//! FT 1.2 link frames.
//!
//! IEC 60870-5-101 uses the FT 1.2 frame format on serial links:
//!
//! ```text
//! Single character:  E5 | A2
//! Fixed length:      10 CC AA SS 16
//! Variable length:   68 L  L  68 CC AA <ASDU, L-2 bytes> SS 16
//! ```
//!
//! `CC` is the control field, `AA` the link address and `SS` the checksum
//! (sum modulo 256 of control, address and ASDU octets).

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::{ChecksumPolicy, CodecConfig};
use crate::error::{Iec101Error, Result};
use crate::types::Asdu;

/// Start byte of a fixed-length frame.
pub const START_FIXED: u8 = 0x10;

/// Start byte of a variable-length frame (appears twice).
pub const START_VARIABLE: u8 = 0x68;

/// End byte of fixed and variable frames.
pub const END_BYTE: u8 = 0x16;

/// Single character positive acknowledgment.
pub const ACK: u8 = 0xE5;

/// Single character negative acknowledgment.
pub const NACK: u8 = 0xA2;

/// Encoded size of a fixed-length frame.
pub const FIXED_FRAME_LEN: usize = 5;

/// Start, two length octets and second start of a variable frame.
pub const VARIABLE_HEADER_LEN: usize = 4;

/// Largest value of the variable-frame length octet.
pub const MAX_USER_DATA_LEN: usize = 255;

/// Link function code (control field bits 0-3).
///
/// Names follow the primary direction (PRM=1). In the secondary direction
/// the same codes mean ACK (0), NACK (1), user data (8), no data (9) and
/// status of link (11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FunctionCode {
    /// SEND/CONFIRM reset of remote link
    ResetRemoteLink = 0,
    /// SEND/CONFIRM reset of user process
    ResetUserProcess = 1,
    /// SEND/CONFIRM, balanced transmission only
    BalancedTest = 2,
    /// SEND/CONFIRM user data
    UserDataConfirm = 3,
    /// SEND/NO REPLY user data
    UserDataNoReply = 4,
    Reserved5 = 5,
    Reserved6 = 6,
    Reserved7 = 7,
    /// REQUEST for access demand
    AccessDemand = 8,
    /// REQUEST/RESPOND status of link
    LinkStatus = 9,
    /// REQUEST/RESPOND user data class 1
    UserDataClass1 = 10,
    /// REQUEST/RESPOND user data class 2
    UserDataClass2 = 11,
    Reserved12 = 12,
    Reserved13 = 13,
    Reserved14 = 14,
    Reserved15 = 15,
}

impl FunctionCode {
    /// Parse from byte (lower 4 bits). Never fails; reserved codes are kept.
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::ResetRemoteLink,
            1 => Self::ResetUserProcess,
            2 => Self::BalancedTest,
            3 => Self::UserDataConfirm,
            4 => Self::UserDataNoReply,
            5 => Self::Reserved5,
            6 => Self::Reserved6,
            7 => Self::Reserved7,
            8 => Self::AccessDemand,
            9 => Self::LinkStatus,
            10 => Self::UserDataClass1,
            11 => Self::UserDataClass2,
            12 => Self::Reserved12,
            13 => Self::Reserved13,
            14 => Self::Reserved14,
            _ => Self::Reserved15,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this code is reserved or reserved for special use.
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Reserved5
                | Self::Reserved6
                | Self::Reserved7
                | Self::Reserved12
                | Self::Reserved13
                | Self::Reserved14
                | Self::Reserved15
        )
    }
}

/// Link control field.
///
/// ```text
///   bit 7   bit 6   bit 5   bit 4   bits 3-0
/// +-------+-------+-------+-------+----------+
/// |  RES  |  PRM  |  FCB  |  FCV  | function |
/// +-------+-------+-------+-------+----------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct ControlField(u8);

impl ControlField {
    /// Control field of a primary (initiating) station message.
    pub const fn primary(function: FunctionCode) -> Self {
        Self(0x40 | function.as_u8())
    }

    /// Control field of a secondary (responding) station message.
    pub const fn secondary(function: FunctionCode) -> Self {
        Self(function.as_u8())
    }

    /// Function code, bits 0-3.
    pub const fn function(&self) -> FunctionCode {
        FunctionCode::from_u8(self.0)
    }

    pub const fn with_function(self, function: FunctionCode) -> Self {
        Self((self.0 & 0xF0) | function.as_u8())
    }
}

flags!(ControlField {
    /// Frame count bit valid (FCV), bit 4; DFC in the secondary direction
    fcv, with_fcv = 0x10;
    /// Frame count bit (FCB), bit 5; ACD in the secondary direction
    fcb, with_fcb = 0x20;
    /// Primary message (PRM), bit 6
    prm, with_prm = 0x40;
    /// Reserved (RES), bit 7; DIR in balanced transmission
    res, with_res = 0x80;
});

raw_octet!(ControlField);

/// FT 1.2 checksum: arithmetic sum modulo 256.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}

/// Fixed-length frame (no user data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFrame {
    pub control: ControlField,
    pub address: u8,
    /// Checksum octet as received or last computed
    pub checksum: u8,
}

impl FixedFrame {
    /// Create a frame with a computed checksum.
    pub fn new(control: ControlField, address: u8) -> Self {
        let mut frame = Self {
            control,
            address,
            checksum: 0,
        };
        frame.checksum = frame.computed_checksum();
        frame
    }

    /// Checksum over the current field values.
    pub fn computed_checksum(&self) -> u8 {
        checksum(&[self.control.as_raw(), self.address])
    }
}

/// Variable-length frame carrying an optional ASDU.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableFrame {
    pub control: ControlField,
    pub address: u8,
    /// Link user data; `None` when the length octet is 2
    pub asdu: Option<Asdu>,
    /// Checksum octet as received or last computed
    pub checksum: u8,
}

impl VariableFrame {
    /// Create a frame with a computed checksum.
    ///
    /// Fails if the ASDU cannot be encoded.
    pub fn new(control: ControlField, address: u8, asdu: Option<Asdu>) -> Result<Self> {
        let mut frame = Self {
            control,
            address,
            asdu,
            checksum: 0,
        };
        frame.checksum = frame.computed_checksum()?;
        Ok(frame)
    }

    /// Checksum over the current field values.
    pub fn computed_checksum(&self) -> Result<u8> {
        let head = checksum(&[self.control.as_raw(), self.address]);
        match &self.asdu {
            Some(asdu) => Ok(head.wrapping_add(checksum(&asdu.encode()?))),
            None => Ok(head),
        }
    }

    /// Value of the two length octets.
    pub fn user_data_len(&self) -> usize {
        2 + self.asdu.as_ref().map_or(0, Asdu::encoded_len)
    }
}

/// Single character acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleChar {
    /// Positive acknowledgment (0xE5)
    Ack,
    /// Negative acknowledgment (0xA2)
    Nack,
}

impl SingleChar {
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Ack => ACK,
            Self::Nack => NACK,
        }
    }
}

/// Result of checking a frame's checksum octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    Valid,
    Mismatch { received: u8, computed: u8 },
    /// Single character frames carry no checksum
    NotPresent,
}

impl ChecksumStatus {
    fn of(received: u8, computed: u8) -> Self {
        if received == computed {
            Self::Valid
        } else {
            Self::Mismatch { received, computed }
        }
    }
}

/// An FT 1.2 link frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkFrame {
    Fixed(FixedFrame),
    Variable(VariableFrame),
    SingleChar(SingleChar),
}

impl LinkFrame {
    /// Control field, if the frame has one.
    pub fn control(&self) -> Option<ControlField> {
        match self {
            Self::Fixed(f) => Some(f.control),
            Self::Variable(f) => Some(f.control),
            Self::SingleChar(_) => None,
        }
    }

    /// Link address, if the frame has one.
    pub fn address(&self) -> Option<u8> {
        match self {
            Self::Fixed(f) => Some(f.address),
            Self::Variable(f) => Some(f.address),
            Self::SingleChar(_) => None,
        }
    }

    /// The carried ASDU, if any.
    pub fn asdu(&self) -> Option<&Asdu> {
        match self {
            Self::Variable(f) => f.asdu.as_ref(),
            _ => None,
        }
    }

    /// Compare the stored checksum with one computed from the frame content.
    pub fn checksum_status(&self) -> Result<ChecksumStatus> {
        Ok(match self {
            Self::Fixed(f) => ChecksumStatus::of(f.checksum, f.computed_checksum()),
            Self::Variable(f) => ChecksumStatus::of(f.checksum, f.computed_checksum()?),
            Self::SingleChar(_) => ChecksumStatus::NotPresent,
        })
    }

    /// Recompute the stored checksum after the frame content was changed.
    pub fn refresh_checksum(&mut self) -> Result<()> {
        match self {
            Self::Fixed(f) => f.checksum = f.computed_checksum(),
            Self::Variable(f) => f.checksum = f.computed_checksum()?,
            Self::SingleChar(_) => {}
        }
        Ok(())
    }

    /// Encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Fixed(_) => FIXED_FRAME_LEN,
            Self::Variable(f) => VARIABLE_HEADER_LEN + f.user_data_len() + 2,
            Self::SingleChar(_) => 1,
        }
    }

    /// Encode to bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_to(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Encode into the provided buffer.
    ///
    /// The stored checksum is written as is. Nothing is written on error.
    pub fn encode_to(&self, buf: &mut impl BufMut) -> Result<()> {
        match self {
            Self::SingleChar(c) => buf.put_u8(c.as_u8()),
            Self::Fixed(f) => {
                buf.put_u8(START_FIXED);
                buf.put_u8(f.control.as_raw());
                buf.put_u8(f.address);
                buf.put_u8(f.checksum);
                buf.put_u8(END_BYTE);
            }
            Self::Variable(f) => {
                let len = f.user_data_len();
                if len > MAX_USER_DATA_LEN {
                    return Err(Iec101Error::FrameTooLong(len));
                }
                if let Some(asdu) = &f.asdu {
                    asdu.validate()?;
                }

                buf.put_u8(START_VARIABLE);
                buf.put_u8(len as u8);
                buf.put_u8(len as u8);
                buf.put_u8(START_VARIABLE);
                buf.put_u8(f.control.as_raw());
                buf.put_u8(f.address);
                if let Some(asdu) = &f.asdu {
                    asdu.encode_to(buf)?;
                }
                buf.put_u8(f.checksum);
                buf.put_u8(END_BYTE);
            }
        }
        Ok(())
    }
}

impl From<FixedFrame> for LinkFrame {
    fn from(frame: FixedFrame) -> Self {
        Self::Fixed(frame)
    }
}

impl From<VariableFrame> for LinkFrame {
    fn from(frame: VariableFrame) -> Self {
        Self::Variable(frame)
    }
}

impl From<SingleChar> for LinkFrame {
    fn from(c: SingleChar) -> Self {
        Self::SingleChar(c)
    }
}

impl std::fmt::Display for LinkFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleChar(SingleChar::Ack) => write!(f, "ACK"),
            Self::SingleChar(SingleChar::Nack) => write!(f, "NACK"),
            Self::Fixed(frame) => write!(
                f,
                "FIXED {:?} PRM={} ADDR={}",
                frame.control.function(),
                frame.control.prm() as u8,
                frame.address
            ),
            Self::Variable(frame) => {
                write!(
                    f,
                    "VAR {:?} PRM={} ADDR={}",
                    frame.control.function(),
                    frame.control.prm() as u8,
                    frame.address
                )?;
                if let Some(asdu) = &frame.asdu {
                    write!(
                        f,
                        " [{}] COT={} CA={} N={}",
                        asdu.header.type_id,
                        asdu.header.cot,
                        asdu.header.common_address,
                        asdu.objects.len()
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Decode exactly one frame with the default configuration.
pub fn decode_frame(data: &[u8]) -> Result<LinkFrame> {
    decode_frame_with(data, &CodecConfig::default())
}

/// Decode exactly one frame.
///
/// `data` must hold one complete frame and nothing else.
///
/// # Example
///
/// ```rust
/// use voltage_iec101::{decode_frame, FunctionCode};
///
/// let frame = decode_frame(&[0x10, 0x49, 0x01, 0x4A, 0x16]).unwrap();
/// assert_eq!(frame.control().unwrap().function(), FunctionCode::LinkStatus);
/// assert_eq!(frame.address(), Some(1));
/// ```
pub fn decode_frame_with(data: &[u8], config: &CodecConfig) -> Result<LinkFrame> {
    let first = *data.first().ok_or(Iec101Error::truncated(1, 0))?;

    let frame = match first {
        ACK | NACK => {
            expect_len(data, 1)?;
            LinkFrame::SingleChar(if first == ACK {
                SingleChar::Ack
            } else {
                SingleChar::Nack
            })
        }
        START_FIXED => {
            expect_len(data, FIXED_FRAME_LEN)?;
            expect_end(data[4])?;
            check_checksum(data[3], checksum(&data[1..3]), config.checksum_policy)?;

            LinkFrame::Fixed(FixedFrame {
                control: ControlField(data[1]),
                address: data[2],
                checksum: data[3],
            })
        }
        START_VARIABLE => {
            if data.len() >= 3 && data[1] != data[2] {
                return Err(Iec101Error::LengthMismatch {
                    first: data[1],
                    second: data[2],
                });
            }
            if data.len() < VARIABLE_HEADER_LEN {
                return Err(Iec101Error::truncated(VARIABLE_HEADER_LEN, data.len()));
            }
            if data[3] != START_VARIABLE {
                return Err(Iec101Error::invalid_frame("missing second start byte"));
            }
            let len = data[1] as usize;
            if len < 2 {
                return Err(Iec101Error::invalid_frame("length below 2"));
            }

            let total = VARIABLE_HEADER_LEN + len + 2;
            expect_len(data, total)?;
            expect_end(data[total - 1])?;

            let user_data = &data[VARIABLE_HEADER_LEN..VARIABLE_HEADER_LEN + len];
            let received = data[total - 2];
            check_checksum(received, checksum(user_data), config.checksum_policy)?;

            let asdu = if len > 2 {
                Some(Asdu::parse(&user_data[2..])?)
            } else {
                None
            };

            LinkFrame::Variable(VariableFrame {
                control: ControlField(user_data[0]),
                address: user_data[1],
                asdu,
                checksum: received,
            })
        }
        other => return Err(Iec101Error::UnknownFrameStart(other)),
    };

    #[cfg(feature = "tracing-support")]
    tracing::trace!(%frame, "decoded link frame");

    Ok(frame)
}

/// Encode a frame to bytes.
pub fn encode_frame(frame: &LinkFrame) -> Result<Bytes> {
    frame.encode()
}

fn expect_len(data: &[u8], len: usize) -> Result<()> {
    if data.len() < len {
        Err(Iec101Error::truncated(len, data.len()))
    } else if data.len() > len {
        Err(Iec101Error::TrailingBytes(data.len() - len))
    } else {
        Ok(())
    }
}

fn expect_end(byte: u8) -> Result<()> {
    if byte == END_BYTE {
        Ok(())
    } else {
        Err(Iec101Error::UnterminatedFrame(byte))
    }
}

fn check_checksum(received: u8, computed: u8, policy: ChecksumPolicy) -> Result<()> {
    if received == computed {
        return Ok(());
    }
    match policy {
        ChecksumPolicy::Ignore => Ok(()),
        ChecksumPolicy::Report => {
            #[cfg(feature = "tracing-support")]
            tracing::warn!(received, computed, "link frame checksum mismatch");
            Ok(())
        }
        ChecksumPolicy::Reject => Err(Iec101Error::ChecksumMismatch { received, computed }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AsduHeader, Cot, InformationElement, InformationObject, InformationObjects, Qds, Siq,
        TypeId,
    };

    /// M_SP_NA_1, spontaneous, CA=1, IOA=5, ON; from a secondary station
    const SPONTANEOUS_SP: [u8; 15] = [
        0x68, 0x09, 0x09, 0x68, 0x08, 0x01, 0x01, 0x01, 0x03, 0x01, 0x05, 0x00, 0x01, 0x15,
        0x16,
    ];

    fn spontaneous_asdu() -> Asdu {
        Asdu::new(
            AsduHeader::new(TypeId::SinglePoint, Cot::Spontaneous, 1),
            InformationObjects::discrete(vec![InformationObject::new(
                5,
                InformationElement::SinglePoint(Siq::new(true)),
            )]),
        )
    }

    #[test]
    fn test_single_char() {
        assert_eq!(decode_frame(&[ACK]).unwrap(), LinkFrame::SingleChar(SingleChar::Ack));
        assert_eq!(decode_frame(&[NACK]).unwrap(), LinkFrame::SingleChar(SingleChar::Nack));
        assert!(matches!(
            decode_frame(&[ACK, ACK]),
            Err(Iec101Error::TrailingBytes(1))
        ));

        let frame = LinkFrame::from(SingleChar::Nack);
        assert_eq!(&frame.encode().unwrap()[..], &[0xA2]);
        assert_eq!(frame.checksum_status().unwrap(), ChecksumStatus::NotPresent);
    }

    #[test]
    fn test_decode_fixed_frame() {
        // Request status of link, PRM=1, address 1
        let frame = decode_frame(&[0x10, 0x49, 0x01, 0x4A, 0x16]).unwrap();
        let LinkFrame::Fixed(fixed) = &frame else {
            panic!("Expected fixed frame");
        };
        assert_eq!(fixed.control.function(), FunctionCode::LinkStatus);
        assert!(fixed.control.prm());
        assert!(!fixed.control.fcv());
        assert!(!fixed.control.fcb());
        assert!(!fixed.control.res());
        assert_eq!(fixed.address, 1);
        assert_eq!(frame.checksum_status().unwrap(), ChecksumStatus::Valid);
    }

    #[test]
    fn test_encode_fixed_frame() {
        let control = ControlField::primary(FunctionCode::UserDataClass2)
            .with_fcb(true)
            .with_fcv(true);
        let frame = LinkFrame::from(FixedFrame::new(control, 0x02));
        // 0x7B + 0x02 = 0x7D
        assert_eq!(&encode_frame(&frame).unwrap()[..], &[0x10, 0x7B, 0x02, 0x7D, 0x16]);
    }

    #[test]
    fn test_fixed_frame_unterminated() {
        assert!(matches!(
            decode_frame(&[0x10, 0x49, 0x01, 0x4A, 0x00]),
            Err(Iec101Error::UnterminatedFrame(0x00))
        ));
    }

    #[test]
    fn test_fixed_frame_truncated_and_trailing() {
        assert!(matches!(
            decode_frame(&[0x10, 0x49, 0x01]),
            Err(Iec101Error::TruncatedInput {
                needed: 5,
                available: 3
            })
        ));
        assert!(matches!(
            decode_frame(&[0x10, 0x49, 0x01, 0x4A, 0x16, 0xE5]),
            Err(Iec101Error::TrailingBytes(1))
        ));
        assert!(matches!(
            decode_frame(&[]),
            Err(Iec101Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_unknown_frame_start() {
        assert!(matches!(
            decode_frame(&[0x42, 0x00]),
            Err(Iec101Error::UnknownFrameStart(0x42))
        ));
    }

    #[test]
    fn test_variable_length_mismatch() {
        let mut data = SPONTANEOUS_SP;
        data[2] = 0x08;
        assert!(matches!(
            decode_frame(&data),
            Err(Iec101Error::LengthMismatch {
                first: 0x09,
                second: 0x08
            })
        ));
    }

    #[test]
    fn test_variable_length_mismatch_in_short_header() {
        assert!(matches!(
            decode_frame(&[0x68, 0x09, 0x08]),
            Err(Iec101Error::LengthMismatch {
                first: 0x09,
                second: 0x08
            })
        ));
        assert!(matches!(
            decode_frame(&[0x68, 0x09, 0x09]),
            Err(Iec101Error::TruncatedInput { needed: 4, available: 3 })
        ));
        assert!(matches!(
            decode_frame(&[0x68, 0x09]),
            Err(Iec101Error::TruncatedInput { needed: 4, available: 2 })
        ));
    }

    #[test]
    fn test_variable_malformed_header() {
        let mut data = SPONTANEOUS_SP;
        data[3] = 0x00;
        assert!(matches!(decode_frame(&data), Err(Iec101Error::InvalidFrame(_))));

        assert!(matches!(
            decode_frame(&[0x68, 0x01, 0x01, 0x68, 0x08, 0x08, 0x16]),
            Err(Iec101Error::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_decode_variable_frame() {
        let frame = decode_frame(&SPONTANEOUS_SP).unwrap();
        let LinkFrame::Variable(var) = &frame else {
            panic!("Expected variable frame");
        };
        assert_eq!(var.control.function(), FunctionCode::AccessDemand);
        assert!(!var.control.prm());
        assert_eq!(var.address, 1);
        assert_eq!(var.asdu, Some(spontaneous_asdu()));
        assert_eq!(frame.checksum_status().unwrap(), ChecksumStatus::Valid);

        assert_eq!(&frame.encode().unwrap()[..], &SPONTANEOUS_SP[..]);
    }

    #[test]
    fn test_build_variable_frame() {
        let frame = VariableFrame::new(
            ControlField::secondary(FunctionCode::AccessDemand),
            1,
            Some(spontaneous_asdu()),
        )
        .unwrap();
        assert_eq!(frame.checksum, 0x15);
        assert_eq!(frame.user_data_len(), 9);

        let frame = LinkFrame::from(frame);
        assert_eq!(frame.encoded_len(), SPONTANEOUS_SP.len());
        assert_eq!(&frame.encode().unwrap()[..], &SPONTANEOUS_SP[..]);
    }

    #[test]
    fn test_variable_frame_without_asdu() {
        let data = [0x68, 0x02, 0x02, 0x68, 0x73, 0x01, 0x74, 0x16];
        let frame = decode_frame(&data).unwrap();
        let LinkFrame::Variable(var) = &frame else {
            panic!("Expected variable frame");
        };
        assert!(var.asdu.is_none());
        assert!(var.control.fcv() && var.control.fcb() && var.control.prm());
        assert_eq!(var.control.function(), FunctionCode::UserDataConfirm);
        assert_eq!(&frame.encode().unwrap()[..], &data[..]);
    }

    #[test]
    fn test_variable_frame_bad_asdu() {
        let mut data = SPONTANEOUS_SP;
        data[6] = 0x99;
        // keep the checksum valid so the ASDU is reached
        data[13] = checksum(&data[4..13]);
        assert!(matches!(
            decode_frame(&data),
            Err(Iec101Error::UnknownTypeId(0x99))
        ));
    }

    #[test]
    fn test_checksum_policies() {
        let data = [0x10, 0x49, 0x01, 0x00, 0x16];

        let frame = decode_frame(&data).unwrap();
        assert_eq!(
            frame.checksum_status().unwrap(),
            ChecksumStatus::Mismatch {
                received: 0x00,
                computed: 0x4A
            }
        );
        // The received checksum is kept verbatim
        assert_eq!(&frame.encode().unwrap()[..], &data[..]);

        let ignore = CodecConfig::new().checksum_policy(ChecksumPolicy::Ignore);
        assert!(decode_frame_with(&data, &ignore).is_ok());

        let reject = CodecConfig::new().checksum_policy(ChecksumPolicy::Reject);
        assert!(matches!(
            decode_frame_with(&data, &reject),
            Err(Iec101Error::ChecksumMismatch {
                received: 0x00,
                computed: 0x4A
            })
        ));
        assert!(decode_frame_with(&[0x10, 0x49, 0x01, 0x4A, 0x16], &reject).is_ok());
    }

    #[test]
    fn test_refresh_checksum() {
        let mut frame = decode_frame(&SPONTANEOUS_SP).unwrap();
        if let LinkFrame::Variable(var) = &mut frame {
            var.address = 2;
        }
        assert!(matches!(
            frame.checksum_status().unwrap(),
            ChecksumStatus::Mismatch { .. }
        ));

        frame.refresh_checksum().unwrap();
        assert_eq!(frame.checksum_status().unwrap(), ChecksumStatus::Valid);
        assert_eq!(frame.encode().unwrap()[13], 0x16);
    }

    #[test]
    fn test_reserved_function_code_preserved() {
        // RES=1, PRM=1, function 13
        let data = [0x10, 0xCD, 0x05, 0xD2, 0x16];
        let frame = decode_frame(&data).unwrap();
        let control = frame.control().unwrap();
        assert_eq!(control.function(), FunctionCode::Reserved13);
        assert!(control.function().is_reserved());
        assert!(control.res());
        assert_eq!(&frame.encode().unwrap()[..], &data[..]);
    }

    #[test]
    fn test_function_code_all_values() {
        for code in 0..16u8 {
            assert_eq!(FunctionCode::from_u8(code).as_u8(), code);
            let control = ControlField::from_raw(0xF0 | code);
            assert_eq!(control.function().as_u8(), code);
        }
        assert!(!FunctionCode::UserDataClass1.is_reserved());
        assert_eq!(
            ControlField::from_raw(0x4A)
                .with_function(FunctionCode::ResetRemoteLink)
                .as_raw(),
            0x40
        );
    }

    #[test]
    fn test_frame_too_long() {
        let objects = (0..40u16)
            .map(|i| {
                InformationObject::new(
                    i,
                    InformationElement::Float {
                        value: f32::from(i),
                        qds: Qds::GOOD,
                    },
                )
            })
            .collect();
        let asdu = Asdu::new(
            AsduHeader::new(TypeId::MeasuredFloat, Cot::Periodic, 1),
            InformationObjects::discrete(objects),
        );
        let frame = LinkFrame::Variable(VariableFrame {
            control: ControlField::secondary(FunctionCode::AccessDemand),
            address: 1,
            asdu: Some(asdu),
            checksum: 0,
        });

        let mut buf = BytesMut::new();
        assert!(matches!(
            frame.encode_to(&mut buf),
            Err(Iec101Error::FrameTooLong(286))
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_invalid_asdu_writes_nothing() {
        let asdu = Asdu::new(
            AsduHeader::new(TypeId::SinglePoint, Cot::Spontaneous, 1),
            InformationObjects::discrete(Vec::new()),
        );
        let frame = LinkFrame::Variable(VariableFrame {
            control: ControlField::secondary(FunctionCode::AccessDemand),
            address: 1,
            asdu: Some(asdu),
            checksum: 0,
        });

        let mut buf = BytesMut::new();
        assert!(matches!(
            frame.encode_to(&mut buf),
            Err(Iec101Error::VsqNumberZero)
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_display() {
        let frame = decode_frame(&SPONTANEOUS_SP).unwrap();
        assert_eq!(
            frame.to_string(),
            "VAR AccessDemand PRM=0 ADDR=1 [M_SP_NA_1] COT=Spontaneous CA=1 N=1"
        );
        assert_eq!(LinkFrame::from(SingleChar::Ack).to_string(), "ACK");
    }
}
