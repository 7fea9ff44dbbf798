//! IEC 60870-5-101 Cause of Transmission (COT).
//!
//! The cause of transmission defines the reason for sending an ASDU. It
//! occupies the low 6 bits of the COT octet; the test and negative flags in
//! bits 7 and 6 live on [`crate::types::AsduHeader`].

/// Cause of Transmission (COT).
///
/// Codes the standard leaves unassigned decode to [`Cot::Unassigned`] and
/// re-encode unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cot {
    /// Periodic, cyclic (1)
    Periodic,

    /// Background scan (2)
    Background,

    /// Spontaneous (3)
    Spontaneous,

    /// Initialized (4)
    Initialized,

    /// Request or requested (5)
    Request,

    /// Activation (6)
    Activation,

    /// Activation confirmation (7)
    ActivationConfirm,

    /// Deactivation (8)
    Deactivation,

    /// Deactivation confirmation (9)
    DeactivationConfirm,

    /// Activation termination (10)
    ActivationTermination,

    /// Return information caused by a remote command (11)
    ReturnRemoteCommand,

    /// Return information caused by a local command (12)
    ReturnLocalCommand,

    /// File transfer (13)
    FileTransfer,

    /// Interrogated by station (group 0) or group 1-16 interrogation (20-36)
    Interrogated(u8),

    /// Requested by general (group 0) or group 1-4 counter request (37-41)
    CounterRequested(u8),

    /// Unknown type identification (44)
    UnknownTypeId,

    /// Unknown cause of transmission (45)
    UnknownCot,

    /// Unknown common address of ASDU (46)
    UnknownCommonAddress,

    /// Unknown information object address (47)
    UnknownIoa,

    /// Any code without an assigned meaning (0, 14-19, 42-43, 48-63)
    Unassigned(u8),
}

impl Cot {
    /// Station interrogation (group 0).
    pub const INTERROGATED_BY_STATION: Self = Self::Interrogated(0);

    /// General counter request (group 0).
    pub const REQUESTED_BY_GENERAL_COUNTER: Self = Self::CounterRequested(0);

    /// Create COT from raw byte value (lower 6 bits).
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x3F {
            1 => Self::Periodic,
            2 => Self::Background,
            3 => Self::Spontaneous,
            4 => Self::Initialized,
            5 => Self::Request,
            6 => Self::Activation,
            7 => Self::ActivationConfirm,
            8 => Self::Deactivation,
            9 => Self::DeactivationConfirm,
            10 => Self::ActivationTermination,
            11 => Self::ReturnRemoteCommand,
            12 => Self::ReturnLocalCommand,
            13 => Self::FileTransfer,
            code @ 20..=36 => Self::Interrogated(code - 20),
            code @ 37..=41 => Self::CounterRequested(code - 37),
            44 => Self::UnknownTypeId,
            45 => Self::UnknownCot,
            46 => Self::UnknownCommonAddress,
            47 => Self::UnknownIoa,
            code => Self::Unassigned(code),
        }
    }

    /// Convert to raw 6-bit value.
    ///
    /// Out-of-range group numbers are masked into the 6-bit field.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        let code = match self {
            Self::Periodic => 1,
            Self::Background => 2,
            Self::Spontaneous => 3,
            Self::Initialized => 4,
            Self::Request => 5,
            Self::Activation => 6,
            Self::ActivationConfirm => 7,
            Self::Deactivation => 8,
            Self::DeactivationConfirm => 9,
            Self::ActivationTermination => 10,
            Self::ReturnRemoteCommand => 11,
            Self::ReturnLocalCommand => 12,
            Self::FileTransfer => 13,
            Self::Interrogated(group) => 20u8.wrapping_add(group),
            Self::CounterRequested(group) => 37u8.wrapping_add(group),
            Self::UnknownTypeId => 44,
            Self::UnknownCot => 45,
            Self::UnknownCommonAddress => 46,
            Self::UnknownIoa => 47,
            Self::Unassigned(code) => code,
        };
        code & 0x3F
    }

    /// Check that [`Self::as_u8`] yields a code that decodes back to `self`.
    ///
    /// False for group numbers above 16 (interrogation) or 4 (counters), and
    /// for `Unassigned` codes that are out of range or have a meaning.
    #[inline]
    pub const fn is_encodable(&self) -> bool {
        match *self {
            Self::Interrogated(group) => group <= 16,
            Self::CounterRequested(group) => group <= 4,
            Self::Unassigned(code) => {
                code <= 0x3F && matches!(Self::from_u8(code), Self::Unassigned(_))
            }
            _ => true,
        }
    }

    /// Check if this is a positive confirmation.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        matches!(
            self,
            Self::ActivationConfirm | Self::DeactivationConfirm | Self::ActivationTermination
        )
    }

    /// Check if this is one of the "unknown X" diagnostic causes.
    #[inline]
    pub const fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeId | Self::UnknownCot | Self::UnknownCommonAddress | Self::UnknownIoa
        )
    }

    /// Check if this COT indicates an interrogation response.
    #[inline]
    pub const fn is_interrogation_response(&self) -> bool {
        matches!(self.as_u8(), 20..=36)
    }

    /// Check if this COT indicates a counter request response.
    #[inline]
    pub const fn is_counter_response(&self) -> bool {
        matches!(self.as_u8(), 37..=41)
    }
}

impl std::fmt::Display for Cot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Periodic => write!(f, "Periodic"),
            Self::Background => write!(f, "Background"),
            Self::Spontaneous => write!(f, "Spontaneous"),
            Self::Initialized => write!(f, "Initialized"),
            Self::Request => write!(f, "Request"),
            Self::Activation => write!(f, "Activation"),
            Self::ActivationConfirm => write!(f, "ActivationConfirm"),
            Self::Deactivation => write!(f, "Deactivation"),
            Self::DeactivationConfirm => write!(f, "DeactivationConfirm"),
            Self::ActivationTermination => write!(f, "ActivationTermination"),
            Self::ReturnRemoteCommand => write!(f, "ReturnRemoteCommand"),
            Self::ReturnLocalCommand => write!(f, "ReturnLocalCommand"),
            Self::FileTransfer => write!(f, "FileTransfer"),
            Self::Interrogated(0) => write!(f, "InterrogatedByStation"),
            Self::Interrogated(group) => write!(f, "InterrogatedByGroup{}", group),
            Self::CounterRequested(0) => write!(f, "RequestedByGeneralCounter"),
            Self::CounterRequested(group) => write!(f, "RequestedByGroup{}Counter", group),
            Self::UnknownTypeId => write!(f, "UnknownTypeId"),
            Self::UnknownCot => write!(f, "UnknownCot"),
            Self::UnknownCommonAddress => write!(f, "UnknownCommonAddress"),
            Self::UnknownIoa => write!(f, "UnknownIoa"),
            Self::Unassigned(code) => write!(f, "Unassigned({})", code),
        }
    }
}
