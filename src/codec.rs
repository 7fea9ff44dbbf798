//! FT 1.2 stream codec for tokio.
//!
//! This module provides a codec implementation for splitting a serial octet
//! stream into IEC 101 link frames using the tokio-util codec framework.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::config::CodecConfig;
use crate::error::Iec101Error;
use crate::types::{
    decode_frame_with, LinkFrame, ACK, FIXED_FRAME_LEN, NACK, START_FIXED, START_VARIABLE,
    VARIABLE_HEADER_LEN,
};

/// IEC 60870-5-101 FT 1.2 codec.
///
/// Noise in front of a start byte is skipped, and so is a variable-frame
/// header whose length octets are inconsistent. A complete frame is handed to
/// [`decode_frame_with`]; errors found there are returned to the caller.
///
/// # Example
///
/// ```rust,ignore
/// use futures::StreamExt;
/// use tokio_util::codec::FramedRead;
/// use voltage_iec101::codec::Ft12Codec;
///
/// let port = tokio_serial::new("/dev/ttyS0", 9600).open_native_async()?;
/// let mut frames = FramedRead::new(port, Ft12Codec::new());
///
/// while let Some(frame) = frames.next().await {
///     println!("Received: {}", frame?);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ft12Codec {
    config: CodecConfig,
    state: DecodeState,
}

#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::enum_variant_names)]
enum DecodeState {
    #[default]
    WaitingForStart,
    WaitingForLength,
    WaitingForData {
        length: usize,
    },
}

impl Ft12Codec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with the given configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config,
            state: DecodeState::default(),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn resync(&mut self, src: &mut BytesMut, _reason: &'static str) {
        #[cfg(feature = "tracing-support")]
        tracing::debug!(reason = _reason, "dropping variable frame start byte");

        src.advance(1);
        self.state = DecodeState::WaitingForStart;
    }
}

fn is_start_byte(byte: u8) -> bool {
    matches!(byte, ACK | NACK | START_FIXED | START_VARIABLE)
}

impl Decoder for Ft12Codec {
    type Item = LinkFrame;
    type Error = Iec101Error;

    fn decode(
        &mut self,
        src: &mut BytesMut,
    ) -> std::result::Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                DecodeState::WaitingForStart => {
                    let skip = src
                        .iter()
                        .position(|b| is_start_byte(*b))
                        .unwrap_or(src.len());
                    if skip > 0 {
                        #[cfg(feature = "tracing-support")]
                        tracing::debug!(skipped = skip, "skipping bytes before frame start");
                        src.advance(skip);
                    }

                    let Some(&first) = src.first() else {
                        return Ok(None);
                    };

                    self.state = match first {
                        START_VARIABLE => DecodeState::WaitingForLength,
                        START_FIXED => DecodeState::WaitingForData {
                            length: FIXED_FRAME_LEN,
                        },
                        _ => DecodeState::WaitingForData { length: 1 },
                    };
                }

                DecodeState::WaitingForLength => {
                    if src.len() < VARIABLE_HEADER_LEN {
                        return Ok(None);
                    }

                    let length = src[1] as usize;
                    if src[1] != src[2] {
                        self.resync(src, "length octets differ");
                        continue;
                    }
                    if src[3] != START_VARIABLE {
                        self.resync(src, "missing second start byte");
                        continue;
                    }
                    if length < 2 || length > self.config.max_frame_len {
                        self.resync(src, "length out of range");
                        continue;
                    }

                    // start, L, L, start, user data, checksum, end
                    self.state = DecodeState::WaitingForData {
                        length: VARIABLE_HEADER_LEN + length + 2,
                    };
                }

                DecodeState::WaitingForData { length } => {
                    if src.len() < length {
                        src.reserve(length - src.len());
                        return Ok(None);
                    }

                    let frame = src.split_to(length);
                    self.state = DecodeState::WaitingForStart;

                    return decode_frame_with(&frame, &self.config).map(Some);
                }
            }
        }
    }
}

impl Encoder<LinkFrame> for Ft12Codec {
    type Error = Iec101Error;

    fn encode(
        &mut self,
        item: LinkFrame,
        dst: &mut BytesMut,
    ) -> std::result::Result<(), Self::Error> {
        dst.reserve(item.encoded_len());
        item.encode_to(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChecksumPolicy;
    use crate::types::{
        ChecksumStatus, ControlField, FixedFrame, FunctionCode, SingleChar, TypeId,
    };
    use futures::StreamExt;
    use tokio_util::codec::FramedRead;

    const LINK_STATUS: [u8; 5] = [0x10, 0x49, 0x01, 0x4A, 0x16];

    const SPONTANEOUS_SP: [u8; 15] = [
        0x68, 0x09, 0x09, 0x68, 0x08, 0x01, 0x01, 0x01, 0x03, 0x01, 0x05, 0x00, 0x01, 0x15,
        0x16,
    ];

    #[test]
    fn test_decode_single_char() {
        let mut codec = Ft12Codec::new();
        let mut buf = BytesMut::from(&[0xE5, 0xA2][..]);

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(LinkFrame::SingleChar(SingleChar::Ack))
        );
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(LinkFrame::SingleChar(SingleChar::Nack))
        );
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_fixed_frame() {
        let mut codec = Ft12Codec::new();
        let mut buf = BytesMut::from(&LINK_STATUS[..]);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(
            frame.control().unwrap().function(),
            FunctionCode::LinkStatus
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_frame() {
        let mut codec = Ft12Codec::new();

        let mut buf = BytesMut::from(&SPONTANEOUS_SP[..2]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&SPONTANEOUS_SP[2..9]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&SPONTANEOUS_SP[9..]);
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.asdu().unwrap().header.type_id, TypeId::SinglePoint);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_skip_garbage() {
        let mut codec = Ft12Codec::new();
        let mut buf = BytesMut::from(&[0xFF, 0x00, 0xAA][..]);
        buf.extend_from_slice(&LINK_STATUS);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.address(), Some(1));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_resync_on_bad_variable_header() {
        let mut codec = Ft12Codec::new();
        // Length octets differ: the first 0x68 is dropped and scanning restarts
        let mut buf = BytesMut::from(&[0x68, 0x09, 0x08, 0x00][..]);
        buf.extend_from_slice(&SPONTANEOUS_SP);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert!(frame.asdu().is_some());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_max_frame_len() {
        let mut codec = Ft12Codec::with_config(CodecConfig::new().max_frame_len(8));
        let mut buf = BytesMut::from(&SPONTANEOUS_SP[..]);
        buf.extend_from_slice(&[0xE5]);

        // L=9 is above the limit, so the variable frame is skipped entirely
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame, LinkFrame::SingleChar(SingleChar::Ack));
    }

    #[test]
    fn test_bad_frame_is_consumed() {
        let mut codec = Ft12Codec::new();
        let mut buf = BytesMut::from(&[0x10, 0x49, 0x01, 0x4A, 0x00][..]);
        buf.extend_from_slice(&LINK_STATUS);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(Iec101Error::UnterminatedFrame(0x00))
        ));
        assert!(codec.decode(&mut buf).unwrap().is_some());
    }

    #[test]
    fn test_checksum_policy_applied() {
        let config = CodecConfig::new().checksum_policy(ChecksumPolicy::Reject);
        let mut codec = Ft12Codec::with_config(config);
        let mut buf = BytesMut::from(&[0x10, 0x49, 0x01, 0x4B, 0x16][..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(Iec101Error::ChecksumMismatch { .. })
        ));
        assert_eq!(codec.config().checksum_policy, ChecksumPolicy::Reject);
    }

    #[test]
    fn test_reject_policy_accepts_valid_variable_frame() {
        let config = CodecConfig::new().checksum_policy(ChecksumPolicy::Reject);
        let mut codec = Ft12Codec::with_config(config);
        let mut buf = BytesMut::from(&SPONTANEOUS_SP[..]);

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.checksum_status().unwrap(), ChecksumStatus::Valid);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let mut codec = Ft12Codec::new();

        let frames = [
            LinkFrame::SingleChar(SingleChar::Ack),
            LinkFrame::Fixed(FixedFrame::new(
                ControlField::primary(FunctionCode::ResetRemoteLink),
                3,
            )),
            crate::types::decode_frame(&SPONTANEOUS_SP).unwrap(),
        ];

        let mut buf = BytesMut::new();
        for frame in frames.iter().cloned() {
            codec.encode(frame, &mut buf).unwrap();
        }

        for expected in frames {
            assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), expected);
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_framed_read_stream() {
        let reader = tokio_test::io::Builder::new()
            .read(&[0x00, 0x10, 0x49])
            .read(&[0x01, 0x4A, 0x16, 0xE5, 0x68, 0x09])
            .read(&SPONTANEOUS_SP[2..])
            .build();

        let frames: Vec<LinkFrame> = tokio_test::block_on(async {
            FramedRead::new(reader, Ft12Codec::new())
                .map(|frame| frame.unwrap())
                .collect()
                .await
        });

        assert_eq!(frames.len(), 3);
        assert!(matches!(frames[0], LinkFrame::Fixed(_)));
        assert_eq!(frames[1], LinkFrame::SingleChar(SingleChar::Ack));
        assert_eq!(
            frames[2].asdu().unwrap().header.common_address,
            1
        );
    }
}
