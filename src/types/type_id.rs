//! IEC 60870-5-101 Type Identification and the information-object registry.
//!
//! Type identification defines the structure and meaning of information
//! objects. Every supported type maps to an [`ObjectDescriptor`] that drives
//! the generic object engine in [`crate::parser`].

use crate::error::{Iec101Error, Result};
use crate::types::{ElementKind, TimeTagKind};

/// IEC 60870-5-101 Type Identification.
///
/// Defines the type of information contained in an ASDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeId {
    // ============================================
    // Process information in monitoring direction
    // ============================================
    /// Single-point information (M_SP_NA_1)
    SinglePoint = 1,

    /// Single-point information with time tag (M_SP_TA_1)
    SinglePointTime24 = 2,

    /// Double-point information (M_DP_NA_1)
    DoublePoint = 3,

    /// Double-point information with time tag (M_DP_TA_1)
    DoublePointTime24 = 4,

    /// Step position information (M_ST_NA_1)
    StepPosition = 5,

    /// Step position information with time tag (M_ST_TA_1)
    StepPositionTime24 = 6,

    /// Bitstring of 32 bit (M_BO_NA_1)
    Bitstring32 = 7,

    /// Bitstring of 32 bit with time tag (M_BO_TA_1)
    Bitstring32Time24 = 8,

    /// Measured value, normalized (M_ME_NA_1)
    MeasuredNormalized = 9,

    /// Measured value, normalized with time tag (M_ME_TA_1)
    MeasuredNormalizedTime24 = 10,

    /// Measured value, scaled (M_ME_NB_1)
    MeasuredScaled = 11,

    /// Measured value, scaled with time tag (M_ME_TB_1)
    MeasuredScaledTime24 = 12,

    /// Measured value, short floating point (M_ME_NC_1)
    MeasuredFloat = 13,

    /// Measured value, short floating point with time tag (M_ME_TC_1)
    MeasuredFloatTime24 = 14,

    /// Integrated totals (M_IT_NA_1)
    IntegratedTotals = 15,

    /// Integrated totals with time tag (M_IT_TA_1)
    IntegratedTotalsTime24 = 16,

    /// Event of protection equipment with time tag (M_EP_TA_1)
    ProtectionEventTime24 = 17,

    /// Packed start events of protection equipment with time tag (M_EP_TB_1)
    ProtectionStartEventsTime24 = 18,

    /// Packed output circuit information of protection equipment with time tag (M_EP_TC_1)
    ProtectionOutputCircuitTime24 = 19,

    /// Packed single-point information with status change detection (M_PS_NA_1)
    PackedSinglePoint = 20,

    /// Measured value, normalized without quality descriptor (M_ME_ND_1)
    MeasuredNormalizedNoQuality = 21,

    /// Single-point information with time tag CP56Time2a (M_SP_TB_1)
    SinglePointTime56 = 30,

    /// Double-point information with time tag CP56Time2a (M_DP_TB_1)
    DoublePointTime56 = 31,

    /// Step position information with time tag CP56Time2a (M_ST_TB_1)
    StepPositionTime56 = 32,

    /// Bitstring of 32 bit with time tag CP56Time2a (M_BO_TB_1)
    Bitstring32Time56 = 33,

    /// Measured value, normalized with time tag CP56Time2a (M_ME_TD_1)
    MeasuredNormalizedTime56 = 34,

    /// Measured value, scaled with time tag CP56Time2a (M_ME_TE_1)
    MeasuredScaledTime56 = 35,

    /// Measured value, short floating point with time tag CP56Time2a (M_ME_TF_1)
    MeasuredFloatTime56 = 36,

    /// Integrated totals with time tag CP56Time2a (M_IT_TB_1)
    IntegratedTotalsTime56 = 37,

    /// Event of protection equipment with time tag CP56Time2a (M_EP_TD_1)
    ProtectionEventTime56 = 38,

    /// Packed start events of protection equipment with time tag CP56Time2a (M_EP_TE_1)
    ProtectionStartEventsTime56 = 39,

    /// Packed output circuit information with time tag CP56Time2a (M_EP_TF_1)
    ProtectionOutputCircuitTime56 = 40,

    // ============================================
    // Process information in control direction
    // ============================================
    /// Single command (C_SC_NA_1)
    SingleCommand = 45,

    /// Double command (C_DC_NA_1)
    DoubleCommand = 46,

    /// Regulating step command (C_RC_NA_1)
    RegulatingStep = 47,

    /// Set-point command, normalized (C_SE_NA_1)
    SetpointNormalized = 48,

    /// Set-point command, scaled (C_SE_NB_1)
    SetpointScaled = 49,

    /// Set-point command, short floating point (C_SE_NC_1)
    SetpointFloat = 50,

    /// Bitstring of 32 bit command (C_BO_NA_1)
    Bitstring32Command = 51,

    // ============================================
    // System information in monitoring direction
    // ============================================
    /// End of initialization (M_EI_NA_1)
    EndOfInit = 70,
}

/// Layout of one information object type.
///
/// The registry entry for a type identifier: which element group is
/// repeated, whether each object carries a time tag, and whether sequence
/// addressing (SQ=1) is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectDescriptor {
    /// Element group carried by every object
    pub element: ElementKind,
    /// Time tag following each element group, if any
    pub time_tag: Option<TimeTagKind>,
    /// Whether SQ=1 may be used with this type
    pub sequence_allowed: bool,
}

impl ObjectDescriptor {
    const fn plain(element: ElementKind, sequence_allowed: bool) -> Self {
        Self {
            element,
            time_tag: None,
            sequence_allowed,
        }
    }

    const fn timed(element: ElementKind, time_tag: TimeTagKind) -> Self {
        Self {
            element,
            time_tag: Some(time_tag),
            sequence_allowed: false,
        }
    }

    /// Size of the element group plus time tag, without address.
    #[inline]
    pub const fn group_size(&self) -> usize {
        let time = match self.time_tag {
            Some(kind) => kind.size(),
            None => 0,
        };
        self.element.size() + time
    }
}

impl TypeId {
    /// Every supported type identifier, in numeric order.
    pub const ALL: [TypeId; 40] = [
        Self::SinglePoint,
        Self::SinglePointTime24,
        Self::DoublePoint,
        Self::DoublePointTime24,
        Self::StepPosition,
        Self::StepPositionTime24,
        Self::Bitstring32,
        Self::Bitstring32Time24,
        Self::MeasuredNormalized,
        Self::MeasuredNormalizedTime24,
        Self::MeasuredScaled,
        Self::MeasuredScaledTime24,
        Self::MeasuredFloat,
        Self::MeasuredFloatTime24,
        Self::IntegratedTotals,
        Self::IntegratedTotalsTime24,
        Self::ProtectionEventTime24,
        Self::ProtectionStartEventsTime24,
        Self::ProtectionOutputCircuitTime24,
        Self::PackedSinglePoint,
        Self::MeasuredNormalizedNoQuality,
        Self::SinglePointTime56,
        Self::DoublePointTime56,
        Self::StepPositionTime56,
        Self::Bitstring32Time56,
        Self::MeasuredNormalizedTime56,
        Self::MeasuredScaledTime56,
        Self::MeasuredFloatTime56,
        Self::IntegratedTotalsTime56,
        Self::ProtectionEventTime56,
        Self::ProtectionStartEventsTime56,
        Self::ProtectionOutputCircuitTime56,
        Self::SingleCommand,
        Self::DoubleCommand,
        Self::RegulatingStep,
        Self::SetpointNormalized,
        Self::SetpointScaled,
        Self::SetpointFloat,
        Self::Bitstring32Command,
        Self::EndOfInit,
    ];

    /// Create TypeId from raw byte value.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::SinglePoint),
            2 => Ok(Self::SinglePointTime24),
            3 => Ok(Self::DoublePoint),
            4 => Ok(Self::DoublePointTime24),
            5 => Ok(Self::StepPosition),
            6 => Ok(Self::StepPositionTime24),
            7 => Ok(Self::Bitstring32),
            8 => Ok(Self::Bitstring32Time24),
            9 => Ok(Self::MeasuredNormalized),
            10 => Ok(Self::MeasuredNormalizedTime24),
            11 => Ok(Self::MeasuredScaled),
            12 => Ok(Self::MeasuredScaledTime24),
            13 => Ok(Self::MeasuredFloat),
            14 => Ok(Self::MeasuredFloatTime24),
            15 => Ok(Self::IntegratedTotals),
            16 => Ok(Self::IntegratedTotalsTime24),
            17 => Ok(Self::ProtectionEventTime24),
            18 => Ok(Self::ProtectionStartEventsTime24),
            19 => Ok(Self::ProtectionOutputCircuitTime24),
            20 => Ok(Self::PackedSinglePoint),
            21 => Ok(Self::MeasuredNormalizedNoQuality),
            30 => Ok(Self::SinglePointTime56),
            31 => Ok(Self::DoublePointTime56),
            32 => Ok(Self::StepPositionTime56),
            33 => Ok(Self::Bitstring32Time56),
            34 => Ok(Self::MeasuredNormalizedTime56),
            35 => Ok(Self::MeasuredScaledTime56),
            36 => Ok(Self::MeasuredFloatTime56),
            37 => Ok(Self::IntegratedTotalsTime56),
            38 => Ok(Self::ProtectionEventTime56),
            39 => Ok(Self::ProtectionStartEventsTime56),
            40 => Ok(Self::ProtectionOutputCircuitTime56),
            45 => Ok(Self::SingleCommand),
            46 => Ok(Self::DoubleCommand),
            47 => Ok(Self::RegulatingStep),
            48 => Ok(Self::SetpointNormalized),
            49 => Ok(Self::SetpointScaled),
            50 => Ok(Self::SetpointFloat),
            51 => Ok(Self::Bitstring32Command),
            70 => Ok(Self::EndOfInit),
            _ => Err(Iec101Error::UnknownTypeId(value)),
        }
    }

    /// Convert to raw byte value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Registry entry describing the object layout of this type.
    pub const fn descriptor(self) -> ObjectDescriptor {
        use ElementKind as E;
        use ObjectDescriptor as D;
        use TimeTagKind::{Cp24, Cp56};

        match self {
            Self::SinglePoint => D::plain(E::SinglePoint, true),
            Self::SinglePointTime24 => D::timed(E::SinglePoint, Cp24),
            Self::DoublePoint => D::plain(E::DoublePoint, true),
            Self::DoublePointTime24 => D::timed(E::DoublePoint, Cp24),
            Self::StepPosition => D::plain(E::StepPosition, true),
            Self::StepPositionTime24 => D::timed(E::StepPosition, Cp24),
            Self::Bitstring32 => D::plain(E::Bitstring, true),
            Self::Bitstring32Time24 => D::timed(E::Bitstring, Cp24),
            Self::MeasuredNormalized => D::plain(E::Normalized, true),
            Self::MeasuredNormalizedTime24 => D::timed(E::Normalized, Cp24),
            Self::MeasuredScaled => D::plain(E::Scaled, true),
            Self::MeasuredScaledTime24 => D::timed(E::Scaled, Cp24),
            Self::MeasuredFloat => D::plain(E::Float, true),
            Self::MeasuredFloatTime24 => D::timed(E::Float, Cp24),
            Self::IntegratedTotals => D::plain(E::IntegratedTotals, true),
            Self::IntegratedTotalsTime24 => D::timed(E::IntegratedTotals, Cp24),
            Self::ProtectionEventTime24 => D::timed(E::ProtectionEvent, Cp24),
            Self::ProtectionStartEventsTime24 => D::timed(E::ProtectionStartEvents, Cp24),
            Self::ProtectionOutputCircuitTime24 => D::timed(E::ProtectionOutputCircuit, Cp24),
            Self::PackedSinglePoint => D::plain(E::StatusChange, true),
            Self::MeasuredNormalizedNoQuality => D::plain(E::NormalizedNoQuality, true),
            Self::SinglePointTime56 => D::timed(E::SinglePoint, Cp56),
            Self::DoublePointTime56 => D::timed(E::DoublePoint, Cp56),
            Self::StepPositionTime56 => D::timed(E::StepPosition, Cp56),
            Self::Bitstring32Time56 => D::timed(E::Bitstring, Cp56),
            Self::MeasuredNormalizedTime56 => D::timed(E::Normalized, Cp56),
            Self::MeasuredScaledTime56 => D::timed(E::Scaled, Cp56),
            Self::MeasuredFloatTime56 => D::timed(E::Float, Cp56),
            Self::IntegratedTotalsTime56 => D::timed(E::IntegratedTotals, Cp56),
            Self::ProtectionEventTime56 => D::timed(E::ProtectionEvent, Cp56),
            Self::ProtectionStartEventsTime56 => D::timed(E::ProtectionStartEvents, Cp56),
            Self::ProtectionOutputCircuitTime56 => D::timed(E::ProtectionOutputCircuit, Cp56),
            Self::SingleCommand => D::plain(E::SingleCommand, false),
            Self::DoubleCommand => D::plain(E::DoubleCommand, false),
            Self::RegulatingStep => D::plain(E::RegulatingStep, false),
            Self::SetpointNormalized => D::plain(E::SetpointNormalized, false),
            Self::SetpointScaled => D::plain(E::SetpointScaled, false),
            Self::SetpointFloat => D::plain(E::SetpointFloat, false),
            Self::Bitstring32Command => D::plain(E::BitstringCommand, false),
            Self::EndOfInit => D::plain(E::EndOfInit, false),
        }
    }

    /// Check if this type is in the monitoring direction (from RTU to master).
    #[inline]
    pub const fn is_monitoring(&self) -> bool {
        matches!(self.as_u8(), 1..=40 | 70)
    }

    /// Check if this type is in the control direction (from master to RTU).
    #[inline]
    pub const fn is_control(&self) -> bool {
        matches!(self.as_u8(), 45..=51)
    }

    /// Check if this type contains a time tag.
    #[inline]
    pub const fn has_time_tag(&self) -> bool {
        self.descriptor().time_tag.is_some()
    }

    /// Check if sequence addressing (SQ=1) is legal for this type.
    #[inline]
    pub const fn allows_sequence(&self) -> bool {
        self.descriptor().sequence_allowed
    }

    /// Get the IEC standard name (e.g., "M_SP_NA_1").
    #[inline]
    pub const fn standard_name(&self) -> &'static str {
        match self {
            Self::SinglePoint => "M_SP_NA_1",
            Self::SinglePointTime24 => "M_SP_TA_1",
            Self::DoublePoint => "M_DP_NA_1",
            Self::DoublePointTime24 => "M_DP_TA_1",
            Self::StepPosition => "M_ST_NA_1",
            Self::StepPositionTime24 => "M_ST_TA_1",
            Self::Bitstring32 => "M_BO_NA_1",
            Self::Bitstring32Time24 => "M_BO_TA_1",
            Self::MeasuredNormalized => "M_ME_NA_1",
            Self::MeasuredNormalizedTime24 => "M_ME_TA_1",
            Self::MeasuredScaled => "M_ME_NB_1",
            Self::MeasuredScaledTime24 => "M_ME_TB_1",
            Self::MeasuredFloat => "M_ME_NC_1",
            Self::MeasuredFloatTime24 => "M_ME_TC_1",
            Self::IntegratedTotals => "M_IT_NA_1",
            Self::IntegratedTotalsTime24 => "M_IT_TA_1",
            Self::ProtectionEventTime24 => "M_EP_TA_1",
            Self::ProtectionStartEventsTime24 => "M_EP_TB_1",
            Self::ProtectionOutputCircuitTime24 => "M_EP_TC_1",
            Self::PackedSinglePoint => "M_PS_NA_1",
            Self::MeasuredNormalizedNoQuality => "M_ME_ND_1",
            Self::SinglePointTime56 => "M_SP_TB_1",
            Self::DoublePointTime56 => "M_DP_TB_1",
            Self::StepPositionTime56 => "M_ST_TB_1",
            Self::Bitstring32Time56 => "M_BO_TB_1",
            Self::MeasuredNormalizedTime56 => "M_ME_TD_1",
            Self::MeasuredScaledTime56 => "M_ME_TE_1",
            Self::MeasuredFloatTime56 => "M_ME_TF_1",
            Self::IntegratedTotalsTime56 => "M_IT_TB_1",
            Self::ProtectionEventTime56 => "M_EP_TD_1",
            Self::ProtectionStartEventsTime56 => "M_EP_TE_1",
            Self::ProtectionOutputCircuitTime56 => "M_EP_TF_1",
            Self::SingleCommand => "C_SC_NA_1",
            Self::DoubleCommand => "C_DC_NA_1",
            Self::RegulatingStep => "C_RC_NA_1",
            Self::SetpointNormalized => "C_SE_NA_1",
            Self::SetpointScaled => "C_SE_NB_1",
            Self::SetpointFloat => "C_SE_NC_1",
            Self::Bitstring32Command => "C_BO_NA_1",
            Self::EndOfInit => "M_EI_NA_1",
        }
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.standard_name())
    }
}
