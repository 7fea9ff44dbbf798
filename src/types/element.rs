//! Information elements for IEC 60870-5-101.
//!
//! Packed sub-byte fields are kept as their raw wire octet inside a
//! `#[repr(transparent)]` newtype. Accessors read individual bit positions,
//! `with_*` builders set them. Because the raw octet is stored, reserved bits
//! and reserved code points survive a decode/encode cycle unchanged.

use bytes::{Buf, BufMut};

/// Generates bit-flag getters and `with_*` setters for a raw-octet record.
macro_rules! flags {
    ($ty:ident { $($(#[$doc:meta])* $get:ident, $set:ident = $mask:expr;)* }) => {
        impl $ty {
            $(
                $(#[$doc])*
                #[inline(always)]
                pub const fn $get(&self) -> bool {
                    (self.0 & $mask) != 0
                }

                #[inline(always)]
                pub const fn $set(mut self, value: bool) -> Self {
                    if value {
                        self.0 |= $mask;
                    } else {
                        self.0 &= !$mask;
                    }
                    self
                }
            )*
        }
    };
}

/// Generates raw octet conversions for a record.
macro_rules! raw_octet {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                /// Create from the raw wire octet.
                #[inline(always)]
                pub const fn from_raw(raw: u8) -> Self {
                    Self(raw)
                }

                /// Get the raw wire octet.
                #[inline(always)]
                pub const fn as_raw(&self) -> u8 {
                    self.0
                }
            }
        )*
    };
}

// Bit masks shared by the quality-carrying records
const OV_MASK: u8 = 0x01;
const EI_MASK: u8 = 0x08;
const BL_MASK: u8 = 0x10;
const SB_MASK: u8 = 0x20;
const NT_MASK: u8 = 0x40;
const IV_MASK: u8 = 0x80;
const SE_MASK: u8 = 0x80;
const QU_MASK: u8 = 0x7C;
const QL_MASK: u8 = 0x7F;

/// Two-bit double-point / event-state coding (DPI, ES).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoublePointValue {
    /// Indeterminate or intermediate (00)
    Indeterminate = 0,
    /// Determined OFF (01)
    Off = 1,
    /// Determined ON (10)
    On = 2,
    /// Indeterminate (11)
    IndeterminateOrFaulty = 3,
}

impl DoublePointValue {
    /// Parse from byte (lower 2 bits).
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::Indeterminate,
            1 => Self::Off,
            2 => Self::On,
            _ => Self::IndeterminateOrFaulty,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Double command state (DCS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleCommandState {
    /// Not permitted (00)
    NotPermittedLow = 0,
    Off = 1,
    On = 2,
    /// Not permitted (11)
    NotPermittedHigh = 3,
}

impl DoubleCommandState {
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::NotPermittedLow,
            1 => Self::Off,
            2 => Self::On,
            _ => Self::NotPermittedHigh,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Regulating step command state (RCS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepCommandState {
    /// Not permitted (00)
    NotPermittedLow = 0,
    /// Next step LOWER
    Lower = 1,
    /// Next step HIGHER
    Higher = 2,
    /// Not permitted (11)
    NotPermittedHigh = 3,
}

impl StepCommandState {
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::NotPermittedLow,
            1 => Self::Lower,
            2 => Self::Higher,
            _ => Self::NotPermittedHigh,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Single-point information with quality descriptor (SIQ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Siq(u8);

impl Siq {
    /// Create with the given state and good quality.
    pub const fn new(value: bool) -> Self {
        Self(value as u8)
    }

    /// Check if the quality is good (all flags false).
    pub const fn is_good(&self) -> bool {
        self.0 & (BL_MASK | SB_MASK | NT_MASK | IV_MASK) == 0
    }
}

flags!(Siq {
    /// Single-point state (SPI), bit 0
    value, with_value = 0x01;
    /// Blocked (BL), bit 4
    blocked, with_blocked = BL_MASK;
    /// Substituted (SB), bit 5
    substituted, with_substituted = SB_MASK;
    /// Not topical (NT), bit 6
    not_topical, with_not_topical = NT_MASK;
    /// Invalid (IV), bit 7
    invalid, with_invalid = IV_MASK;
});

/// Double-point information with quality descriptor (DIQ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Diq(u8);

impl Diq {
    /// Create with the given state and good quality.
    pub const fn new(value: DoublePointValue) -> Self {
        Self(value.as_u8())
    }

    /// Double-point state (DPI), bits 0-1.
    pub const fn value(&self) -> DoublePointValue {
        DoublePointValue::from_u8(self.0)
    }

    pub const fn with_value(self, value: DoublePointValue) -> Self {
        Self((self.0 & !0x03) | value.as_u8())
    }

    pub const fn is_good(&self) -> bool {
        self.0 & (BL_MASK | SB_MASK | NT_MASK | IV_MASK) == 0
    }
}

flags!(Diq {
    blocked, with_blocked = BL_MASK;
    substituted, with_substituted = SB_MASK;
    not_topical, with_not_topical = NT_MASK;
    invalid, with_invalid = IV_MASK;
});

/// Quality descriptor for measured values (QDS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Qds(u8);

impl Qds {
    /// Good quality (all flags false).
    pub const GOOD: Self = Self(0);

    /// Check if the quality is good (all flags false).
    pub const fn is_good(&self) -> bool {
        self.0 & (OV_MASK | BL_MASK | SB_MASK | NT_MASK | IV_MASK) == 0
    }
}

flags!(Qds {
    /// Overflow (OV), bit 0
    overflow, with_overflow = OV_MASK;
    /// Blocked (BL), bit 4
    blocked, with_blocked = BL_MASK;
    /// Substituted (SB), bit 5
    substituted, with_substituted = SB_MASK;
    /// Not topical (NT), bit 6
    not_topical, with_not_topical = NT_MASK;
    /// Invalid (IV), bit 7
    invalid, with_invalid = IV_MASK;
});

/// Value with transient state indication (VTI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Vti(u8);

impl Vti {
    /// Create from a step position (-64..=63, wrapped into 7 bits).
    pub const fn new(value: i8, transient: bool) -> Self {
        Self((value as u8 & 0x7F) | if transient { 0x80 } else { 0 })
    }

    /// Step position, bits 0-6 as a signed 7-bit integer.
    pub const fn value(&self) -> i8 {
        ((self.0 << 1) as i8) >> 1
    }
}

flags!(Vti {
    /// Equipment is in transient state, bit 7
    transient, with_transient = 0x80;
});

/// Normalized value (NVA): a signed fixed-point fraction in [-1.0, 1.0).
///
/// The raw 16-bit word is stored so retransmission is bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Nva(pub i16);

impl Nva {
    /// Fraction represented by this value (raw / 32768).
    #[inline]
    pub fn value(&self) -> f32 {
        self.0 as f32 / 32768.0
    }

    /// Nearest representable value, saturating at both ends of the range.
    pub fn from_f32(value: f32) -> Self {
        let scaled = (value * 32768.0).round();
        Self(scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16)
    }

    #[inline]
    pub const fn raw(&self) -> i16 {
        self.0
    }
}

/// Status flags of a binary counter reading.
///
/// Sequence number in bits 0-4, CY bit 5, CA bit 6, IV bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct BcrStatus(u8);

impl BcrStatus {
    pub const fn new(sequence: u8) -> Self {
        Self(sequence & 0x1F)
    }

    /// Sequence number (0-31).
    pub const fn sequence(&self) -> u8 {
        self.0 & 0x1F
    }
}

flags!(BcrStatus {
    /// Counter overflow since last reading (CY)
    carry, with_carry = 0x20;
    /// Counter adjusted since last reading (CA)
    adjusted, with_adjusted = 0x40;
    invalid, with_invalid = IV_MASK;
});

/// Binary counter reading (BCR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bcr {
    /// Counter value
    pub counter: i32,
    /// Sequence number and flags
    pub status: BcrStatus,
}

impl Bcr {
    pub const fn new(counter: i32, status: BcrStatus) -> Self {
        Self { counter, status }
    }
}

/// Single event of protection equipment (SEP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Sep(u8);

impl Sep {
    pub const fn new(state: DoublePointValue) -> Self {
        Self(state.as_u8())
    }

    /// Event state (ES), bits 0-1.
    pub const fn event_state(&self) -> DoublePointValue {
        DoublePointValue::from_u8(self.0)
    }
}

flags!(Sep {
    /// Elapsed time invalid (EI), bit 3
    elapsed_invalid, with_elapsed_invalid = EI_MASK;
    blocked, with_blocked = BL_MASK;
    substituted, with_substituted = SB_MASK;
    not_topical, with_not_topical = NT_MASK;
    invalid, with_invalid = IV_MASK;
});

/// Start events of protection equipment (SPE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Spe(u8);

flags!(Spe {
    /// General start of operation (GS)
    general_start, with_general_start = 0x01;
    /// Start of operation phase L1 (SL1)
    start_l1, with_start_l1 = 0x02;
    /// Start of operation phase L2 (SL2)
    start_l2, with_start_l2 = 0x04;
    /// Start of operation phase L3 (SL3)
    start_l3, with_start_l3 = 0x08;
    /// Start of operation IE, earth current (SIE)
    start_earth, with_start_earth = 0x10;
    /// Start of operation in reverse direction (SRD)
    start_reverse, with_start_reverse = 0x20;
});

/// Output circuit information of protection equipment (OCI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Oci(u8);

flags!(Oci {
    /// General command to output circuit (GC)
    general_command, with_general_command = 0x01;
    /// Command to output circuit phase L1 (CL1)
    command_l1, with_command_l1 = 0x02;
    /// Command to output circuit phase L2 (CL2)
    command_l2, with_command_l2 = 0x04;
    /// Command to output circuit phase L3 (CL3)
    command_l3, with_command_l3 = 0x08;
});

/// Quality descriptor for events of protection equipment (QDP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Qdp(u8);

flags!(Qdp {
    elapsed_invalid, with_elapsed_invalid = EI_MASK;
    blocked, with_blocked = BL_MASK;
    substituted, with_substituted = SB_MASK;
    not_topical, with_not_topical = NT_MASK;
    invalid, with_invalid = IV_MASK;
});

/// Status and status change detection (SCD) for 16 packed single points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scd {
    /// Status bits, one per point
    pub status: u16,
    /// Change-detection bits, one per point
    pub change: u16,
}

impl Scd {
    pub const fn new(status: u16, change: u16) -> Self {
        Self { status, change }
    }

    /// State of point `index` (0-15).
    pub const fn point(&self, index: u8) -> bool {
        index < 16 && (self.status >> index) & 1 != 0
    }

    /// Whether point `index` (0-15) changed since the last report.
    pub const fn changed(&self, index: u8) -> bool {
        index < 16 && (self.change >> index) & 1 != 0
    }
}

/// Single command (SCO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Sco(u8);

impl Sco {
    /// Create a single command. `qualifier` is the 5-bit QU field.
    pub const fn new(state: bool, qualifier: u8, select: bool) -> Self {
        Self(state as u8 | ((qualifier << 2) & QU_MASK) | if select { SE_MASK } else { 0 })
    }

    /// Qualifier of command (QU), bits 2-6.
    pub const fn qualifier(&self) -> u8 {
        (self.0 & QU_MASK) >> 2
    }

    /// The execute command matching this select command.
    pub const fn with_execute(self) -> Self {
        self.with_select(false)
    }
}

flags!(Sco {
    /// Single command state (SCS), bit 0
    state, with_state = 0x01;
    /// Select (true) or execute (false), bit 7
    select, with_select = SE_MASK;
});

/// Double command (DCO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Dco(u8);

impl Dco {
    pub const fn new(state: DoubleCommandState, qualifier: u8, select: bool) -> Self {
        Self(state.as_u8() | ((qualifier << 2) & QU_MASK) | if select { SE_MASK } else { 0 })
    }

    /// Double command state (DCS), bits 0-1.
    pub const fn state(&self) -> DoubleCommandState {
        DoubleCommandState::from_u8(self.0)
    }

    pub const fn qualifier(&self) -> u8 {
        (self.0 & QU_MASK) >> 2
    }

    pub const fn with_execute(self) -> Self {
        self.with_select(false)
    }
}

flags!(Dco {
    select, with_select = SE_MASK;
});

/// Regulating step command (RCO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Rco(u8);

impl Rco {
    pub const fn new(state: StepCommandState, qualifier: u8, select: bool) -> Self {
        Self(state.as_u8() | ((qualifier << 2) & QU_MASK) | if select { SE_MASK } else { 0 })
    }

    /// Regulating step command state (RCS), bits 0-1.
    pub const fn state(&self) -> StepCommandState {
        StepCommandState::from_u8(self.0)
    }

    pub const fn qualifier(&self) -> u8 {
        (self.0 & QU_MASK) >> 2
    }

    pub const fn with_execute(self) -> Self {
        self.with_select(false)
    }
}

flags!(Rco {
    select, with_select = SE_MASK;
});

/// Qualifier of set-point command (QOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Qos(u8);

impl Qos {
    /// Create a qualifier. `ql` is the 7-bit QL field.
    pub const fn new(ql: u8, select: bool) -> Self {
        Self((ql & QL_MASK) | if select { SE_MASK } else { 0 })
    }

    /// Qualifier (QL), bits 0-6.
    pub const fn qualifier(&self) -> u8 {
        self.0 & QL_MASK
    }

    pub const fn with_execute(self) -> Self {
        self.with_select(false)
    }
}

flags!(Qos {
    select, with_select = SE_MASK;
});

/// Cause of initialization, decoded from the COI cause field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitCause {
    LocalPowerOn,
    LocalManualReset,
    RemoteReset,
    /// Reserved for the standard (3-31) or private use (32-127)
    Reserved(u8),
}

/// Cause of initialization (COI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Coi(u8);

impl Coi {
    pub const fn new(cause: u8, after_parameter_change: bool) -> Self {
        Self((cause & 0x7F) | if after_parameter_change { 0x80 } else { 0 })
    }

    /// Raw cause code, bits 0-6.
    pub const fn cause_code(&self) -> u8 {
        self.0 & 0x7F
    }

    pub const fn cause(&self) -> InitCause {
        match self.cause_code() {
            0 => InitCause::LocalPowerOn,
            1 => InitCause::LocalManualReset,
            2 => InitCause::RemoteReset,
            code => InitCause::Reserved(code),
        }
    }
}

flags!(Coi {
    /// Initialization after change of local parameters, bit 7
    after_parameter_change, with_after_parameter_change = 0x80;
});

raw_octet!(Siq, Diq, Qds, Vti, BcrStatus, Sep, Spe, Oci, Qdp, Sco, Dco, Rco, Qos, Coi);

/// Element group layouts known to the object registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    SinglePoint,
    DoublePoint,
    StepPosition,
    Bitstring,
    Normalized,
    Scaled,
    Float,
    IntegratedTotals,
    ProtectionEvent,
    ProtectionStartEvents,
    ProtectionOutputCircuit,
    StatusChange,
    NormalizedNoQuality,
    SingleCommand,
    DoubleCommand,
    RegulatingStep,
    SetpointNormalized,
    SetpointScaled,
    SetpointFloat,
    BitstringCommand,
    EndOfInit,
}

impl ElementKind {
    /// Encoded size of one element group in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::SinglePoint
            | Self::DoublePoint
            | Self::SingleCommand
            | Self::DoubleCommand
            | Self::RegulatingStep
            | Self::EndOfInit => 1,
            Self::StepPosition | Self::NormalizedNoQuality => 2,
            Self::Normalized
            | Self::Scaled
            | Self::ProtectionEvent
            | Self::SetpointNormalized
            | Self::SetpointScaled => 3,
            Self::ProtectionStartEvents | Self::ProtectionOutputCircuit | Self::BitstringCommand => 4,
            Self::Bitstring
            | Self::Float
            | Self::IntegratedTotals
            | Self::StatusChange
            | Self::SetpointFloat => 5,
        }
    }
}

/// One information element group.
///
/// Equality compares the wire octets, so float values are compared bit for
/// bit: a NaN equals itself and `-0.0` differs from `0.0`.
#[derive(Debug, Clone, Copy)]
pub enum InformationElement {
    /// Single-point information
    SinglePoint(Siq),
    /// Double-point information
    DoublePoint(Diq),
    /// Step position information
    StepPosition { vti: Vti, qds: Qds },
    /// Bitstring of 32 bit
    Bitstring { bsi: u32, qds: Qds },
    /// Measured value, normalized
    Normalized { nva: Nva, qds: Qds },
    /// Measured value, scaled
    Scaled { sva: i16, qds: Qds },
    /// Measured value, short floating point
    Float { value: f32, qds: Qds },
    /// Integrated totals
    IntegratedTotals(Bcr),
    /// Event of protection equipment; `elapsed_ms` is CP16Time2a
    ProtectionEvent { sep: Sep, elapsed_ms: u16 },
    /// Packed start events of protection equipment; `duration_ms` is the relay duration
    ProtectionStartEvents { spe: Spe, qdp: Qdp, duration_ms: u16 },
    /// Packed output circuit information; `operating_ms` is the relay operating time
    ProtectionOutputCircuit { oci: Oci, qdp: Qdp, operating_ms: u16 },
    /// Packed single-point information with status change detection
    StatusChange { scd: Scd, qds: Qds },
    /// Measured value, normalized without quality descriptor
    NormalizedNoQuality(Nva),
    /// Single command
    SingleCommand(Sco),
    /// Double command
    DoubleCommand(Dco),
    /// Regulating step command
    RegulatingStep(Rco),
    /// Set-point command, normalized
    SetpointNormalized { nva: Nva, qos: Qos },
    /// Set-point command, scaled
    SetpointScaled { sva: i16, qos: Qos },
    /// Set-point command, short floating point
    SetpointFloat { value: f32, qos: Qos },
    /// Bitstring of 32 bit command
    BitstringCommand(u32),
    /// End of initialization
    EndOfInit(Coi),
}

impl PartialEq for InformationElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.wire() == other.wire()
    }
}

impl Eq for InformationElement {}

impl InformationElement {
    /// Layout of this element.
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::SinglePoint(_) => ElementKind::SinglePoint,
            Self::DoublePoint(_) => ElementKind::DoublePoint,
            Self::StepPosition { .. } => ElementKind::StepPosition,
            Self::Bitstring { .. } => ElementKind::Bitstring,
            Self::Normalized { .. } => ElementKind::Normalized,
            Self::Scaled { .. } => ElementKind::Scaled,
            Self::Float { .. } => ElementKind::Float,
            Self::IntegratedTotals(_) => ElementKind::IntegratedTotals,
            Self::ProtectionEvent { .. } => ElementKind::ProtectionEvent,
            Self::ProtectionStartEvents { .. } => ElementKind::ProtectionStartEvents,
            Self::ProtectionOutputCircuit { .. } => ElementKind::ProtectionOutputCircuit,
            Self::StatusChange { .. } => ElementKind::StatusChange,
            Self::NormalizedNoQuality(_) => ElementKind::NormalizedNoQuality,
            Self::SingleCommand(_) => ElementKind::SingleCommand,
            Self::DoubleCommand(_) => ElementKind::DoubleCommand,
            Self::RegulatingStep(_) => ElementKind::RegulatingStep,
            Self::SetpointNormalized { .. } => ElementKind::SetpointNormalized,
            Self::SetpointScaled { .. } => ElementKind::SetpointScaled,
            Self::SetpointFloat { .. } => ElementKind::SetpointFloat,
            Self::BitstringCommand(_) => ElementKind::BitstringCommand,
            Self::EndOfInit(_) => ElementKind::EndOfInit,
        }
    }

    /// Select/execute flag of a command element, `None` for monitoring elements.
    pub const fn select(&self) -> Option<bool> {
        match self {
            Self::SingleCommand(sco) => Some(sco.select()),
            Self::DoubleCommand(dco) => Some(dco.select()),
            Self::RegulatingStep(rco) => Some(rco.select()),
            Self::SetpointNormalized { qos, .. }
            | Self::SetpointScaled { qos, .. }
            | Self::SetpointFloat { qos, .. } => Some(qos.select()),
            _ => None,
        }
    }

    /// Decode one element group of the given layout.
    ///
    /// The caller guarantees `buf` holds at least `kind.size()` bytes.
    pub(crate) fn decode(kind: ElementKind, buf: &mut impl Buf) -> Self {
        match kind {
            ElementKind::SinglePoint => Self::SinglePoint(Siq(buf.get_u8())),
            ElementKind::DoublePoint => Self::DoublePoint(Diq(buf.get_u8())),
            ElementKind::StepPosition => Self::StepPosition {
                vti: Vti(buf.get_u8()),
                qds: Qds(buf.get_u8()),
            },
            ElementKind::Bitstring => Self::Bitstring {
                bsi: buf.get_u32_le(),
                qds: Qds(buf.get_u8()),
            },
            ElementKind::Normalized => Self::Normalized {
                nva: Nva(buf.get_i16_le()),
                qds: Qds(buf.get_u8()),
            },
            ElementKind::Scaled => Self::Scaled {
                sva: buf.get_i16_le(),
                qds: Qds(buf.get_u8()),
            },
            ElementKind::Float => Self::Float {
                value: buf.get_f32_le(),
                qds: Qds(buf.get_u8()),
            },
            ElementKind::IntegratedTotals => Self::IntegratedTotals(Bcr {
                counter: buf.get_i32_le(),
                status: BcrStatus(buf.get_u8()),
            }),
            ElementKind::ProtectionEvent => Self::ProtectionEvent {
                sep: Sep(buf.get_u8()),
                elapsed_ms: buf.get_u16_le(),
            },
            ElementKind::ProtectionStartEvents => Self::ProtectionStartEvents {
                spe: Spe(buf.get_u8()),
                qdp: Qdp(buf.get_u8()),
                duration_ms: buf.get_u16_le(),
            },
            ElementKind::ProtectionOutputCircuit => Self::ProtectionOutputCircuit {
                oci: Oci(buf.get_u8()),
                qdp: Qdp(buf.get_u8()),
                operating_ms: buf.get_u16_le(),
            },
            ElementKind::StatusChange => Self::StatusChange {
                scd: Scd {
                    status: buf.get_u16_le(),
                    change: buf.get_u16_le(),
                },
                qds: Qds(buf.get_u8()),
            },
            ElementKind::NormalizedNoQuality => Self::NormalizedNoQuality(Nva(buf.get_i16_le())),
            ElementKind::SingleCommand => Self::SingleCommand(Sco(buf.get_u8())),
            ElementKind::DoubleCommand => Self::DoubleCommand(Dco(buf.get_u8())),
            ElementKind::RegulatingStep => Self::RegulatingStep(Rco(buf.get_u8())),
            ElementKind::SetpointNormalized => Self::SetpointNormalized {
                nva: Nva(buf.get_i16_le()),
                qos: Qos(buf.get_u8()),
            },
            ElementKind::SetpointScaled => Self::SetpointScaled {
                sva: buf.get_i16_le(),
                qos: Qos(buf.get_u8()),
            },
            ElementKind::SetpointFloat => Self::SetpointFloat {
                value: buf.get_f32_le(),
                qos: Qos(buf.get_u8()),
            },
            ElementKind::BitstringCommand => Self::BitstringCommand(buf.get_u32_le()),
            ElementKind::EndOfInit => Self::EndOfInit(Coi(buf.get_u8())),
        }
    }

    /// Encode this element group.
    fn wire(&self) -> [u8; 5] {
        let mut raw = [0u8; 5];
        self.encode(&mut &mut raw[..]);
        raw
    }

    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        match *self {
            Self::SinglePoint(siq) => buf.put_u8(siq.0),
            Self::DoublePoint(diq) => buf.put_u8(diq.0),
            Self::StepPosition { vti, qds } => {
                buf.put_u8(vti.0);
                buf.put_u8(qds.0);
            }
            Self::Bitstring { bsi, qds } => {
                buf.put_u32_le(bsi);
                buf.put_u8(qds.0);
            }
            Self::Normalized { nva, qds } => {
                buf.put_i16_le(nva.0);
                buf.put_u8(qds.0);
            }
            Self::Scaled { sva, qds } => {
                buf.put_i16_le(sva);
                buf.put_u8(qds.0);
            }
            Self::Float { value, qds } => {
                buf.put_f32_le(value);
                buf.put_u8(qds.0);
            }
            Self::IntegratedTotals(bcr) => {
                buf.put_i32_le(bcr.counter);
                buf.put_u8(bcr.status.0);
            }
            Self::ProtectionEvent { sep, elapsed_ms } => {
                buf.put_u8(sep.0);
                buf.put_u16_le(elapsed_ms);
            }
            Self::ProtectionStartEvents {
                spe,
                qdp,
                duration_ms,
            } => {
                buf.put_u8(spe.0);
                buf.put_u8(qdp.0);
                buf.put_u16_le(duration_ms);
            }
            Self::ProtectionOutputCircuit {
                oci,
                qdp,
                operating_ms,
            } => {
                buf.put_u8(oci.0);
                buf.put_u8(qdp.0);
                buf.put_u16_le(operating_ms);
            }
            Self::StatusChange { scd, qds } => {
                buf.put_u16_le(scd.status);
                buf.put_u16_le(scd.change);
                buf.put_u8(qds.0);
            }
            Self::NormalizedNoQuality(nva) => buf.put_i16_le(nva.0),
            Self::SingleCommand(sco) => buf.put_u8(sco.0),
            Self::DoubleCommand(dco) => buf.put_u8(dco.0),
            Self::RegulatingStep(rco) => buf.put_u8(rco.0),
            Self::SetpointNormalized { nva, qos } => {
                buf.put_i16_le(nva.0);
                buf.put_u8(qos.0);
            }
            Self::SetpointScaled { sva, qos } => {
                buf.put_i16_le(sva);
                buf.put_u8(qos.0);
            }
            Self::SetpointFloat { value, qos } => {
                buf.put_f32_le(value);
                buf.put_u8(qos.0);
            }
            Self::BitstringCommand(bsi) => buf.put_u32_le(bsi),
            Self::EndOfInit(coi) => buf.put_u8(coi.0),
        }
    }
}
