//! Error types for the IEC 60870-5-101 codec.

use thiserror::Error;

use crate::types::{Cot, TypeId};

/// Result type alias for IEC 101 operations.
pub type Result<T> = std::result::Result<T, Iec101Error>;

/// IEC 60870-5-101 codec error types.
#[derive(Debug, Error)]
pub enum Iec101Error {
    /// Leading octet is not a known FT 1.2 start character
    #[error("Unknown frame start: 0x{0:02X}")]
    UnknownFrameStart(u8),

    /// The two length octets of a variable frame disagree
    #[error("Length mismatch: {first} != {second}")]
    LengthMismatch { first: u8, second: u8 },

    /// Input ends before the length implied by its own header
    #[error("Truncated input: need {needed} bytes, have {available}")]
    TruncatedInput { needed: usize, available: usize },

    /// End octet is not 0x16
    #[error("Unterminated frame: end byte 0x{0:02X}")]
    UnterminatedFrame(u8),

    /// Malformed frame header
    #[error("Invalid frame: {0}")]
    InvalidFrame(&'static str),

    /// Bytes left over after a complete frame or ASDU
    #[error("{0} trailing bytes after end of data")]
    TrailingBytes(usize),

    /// Checksum does not match (only raised by `ChecksumPolicy::Reject`)
    #[error("Checksum mismatch: received 0x{received:02X}, computed 0x{computed:02X}")]
    ChecksumMismatch { received: u8, computed: u8 },

    /// Encoded variable frame would not fit into the length octet
    #[error("Frame too long: {0} bytes of user data")]
    FrameTooLong(usize),

    /// Unknown type identifier
    #[error("Unknown type ID: {0}")]
    UnknownTypeId(u8),

    /// SQ=1 used with a type identifier that forbids sequence addressing
    #[error("Sequence addressing not allowed for {0}")]
    IllegalSequenceMode(TypeId),

    /// VSQ number field is zero
    #[error("VSQ number is zero")]
    VsqNumberZero,

    /// More information objects than VSQ can express
    #[error("Too many information objects: {0} (max 127)")]
    TooManyObjects(usize),

    /// Element or time tag does not match the layout of the type identifier
    #[error("Element mismatch for {type_id}: {reason}")]
    ElementMismatch {
        type_id: TypeId,
        reason: &'static str,
    },

    /// Addresses supplied for a sequence are not contiguous
    #[error("Non-contiguous sequence: expected address {expected}, got {actual}")]
    NonContiguousSequence { expected: u16, actual: u16 },

    /// Cause of transmission has no 6-bit code of its own
    #[error("Cause of transmission cannot be encoded: {0}")]
    InvalidCot(Cot),

    /// I/O error (surfaced through the tokio-util codec traits)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Iec101Error {
    /// Create a truncated input error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::TruncatedInput { needed, available }
    }

    /// Create an invalid frame error.
    pub fn invalid_frame(msg: &'static str) -> Self {
        Self::InvalidFrame(msg)
    }

    /// Check if this error is a structural violation of the octet stream
    /// (framing, length, truncation, termination).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnknownFrameStart(_)
                | Self::LengthMismatch { .. }
                | Self::TruncatedInput { .. }
                | Self::UnterminatedFrame(_)
                | Self::InvalidFrame(_)
                | Self::TrailingBytes(_)
        )
    }

    /// Check if this error is an application-layer protocol violation.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeId(_)
                | Self::IllegalSequenceMode(_)
                | Self::VsqNumberZero
                | Self::TooManyObjects(_)
                | Self::ElementMismatch { .. }
                | Self::NonContiguousSequence { .. }
                | Self::InvalidCot(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Iec101Error::UnknownTypeId(0x99);
        assert_eq!(err.to_string(), "Unknown type ID: 153");

        let err = Iec101Error::LengthMismatch {
            first: 9,
            second: 8,
        };
        assert_eq!(err.to_string(), "Length mismatch: 9 != 8");

        let err = Iec101Error::UnterminatedFrame(0x00);
        assert_eq!(err.to_string(), "Unterminated frame: end byte 0x00");

        let err = Iec101Error::IllegalSequenceMode(TypeId::SingleCommand);
        assert_eq!(
            err.to_string(),
            "Sequence addressing not allowed for C_SC_NA_1"
        );
    }

    #[test]
    fn test_is_structural() {
        assert!(Iec101Error::UnknownFrameStart(0x42).is_structural());
        assert!(Iec101Error::truncated(6, 3).is_structural());
        assert!(Iec101Error::UnterminatedFrame(0).is_structural());
        assert!(!Iec101Error::VsqNumberZero.is_structural());
    }

    #[test]
    fn test_is_protocol() {
        assert!(Iec101Error::VsqNumberZero.is_protocol());
        assert!(Iec101Error::IllegalSequenceMode(TypeId::SingleCommand).is_protocol());
        assert!(Iec101Error::InvalidCot(Cot::Interrogated(17)).is_protocol());
        assert!(!Iec101Error::TrailingBytes(1).is_protocol());
        assert!(!Iec101Error::ChecksumMismatch {
            received: 1,
            computed: 2
        }
        .is_protocol());
    }
}
