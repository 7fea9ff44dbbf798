//! Codec configuration.

/// Default upper bound for the length octet of a variable frame.
pub const DEFAULT_MAX_FRAME_LEN: usize = 255;

/// What frame decoding does when the received checksum is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Accept the frame silently
    Ignore,
    /// Accept the frame and log a warning; the mismatch stays visible
    /// through [`crate::LinkFrame::checksum_status`]
    #[default]
    Report,
    /// Fail with [`crate::Iec101Error::ChecksumMismatch`]
    Reject,
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Checksum handling on decode
    pub checksum_policy: ChecksumPolicy,
    /// Largest variable-frame length octet the stream codec accepts
    pub max_frame_len: usize,
}

impl CodecConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            checksum_policy: ChecksumPolicy::default(),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }

    /// Set checksum policy.
    pub fn checksum_policy(mut self, policy: ChecksumPolicy) -> Self {
        self.checksum_policy = policy;
        self
    }

    /// Set maximum variable-frame length (clamped to 255).
    pub fn max_frame_len(mut self, len: usize) -> Self {
        self.max_frame_len = len.min(DEFAULT_MAX_FRAME_LEN);
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
