//! Binary time tags CP24Time2a and CP56Time2a.
//!
//! Both are kept as their raw wire octets. Accessors unpack the bit fields;
//! nothing is range-checked, so a day of 0 or a minute of 63 decodes and
//! re-encodes verbatim, reserved bits included.

use bytes::{Buf, BufMut};

/// Size of a CP24Time2a time tag in bytes.
pub const CP24_SIZE: usize = 3;

/// Size of a CP56Time2a time tag in bytes.
pub const CP56_SIZE: usize = 7;

const IV_MASK: u8 = 0x80;
const SUBSTITUTED_MASK: u8 = 0x40;
const MINUTE_MASK: u8 = 0x3F;
const SUMMER_MASK: u8 = 0x80;
const HOUR_MASK: u8 = 0x1F;
const DAY_MASK: u8 = 0x1F;
const MONTH_MASK: u8 = 0x0F;
const YEAR_MASK: u8 = 0x7F;

/// Three octet binary time (milliseconds and minutes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Cp24Time2a([u8; CP24_SIZE]);

impl Cp24Time2a {
    /// Create from milliseconds within the minute and the minute.
    pub const fn new(milliseconds: u16, minute: u8) -> Self {
        let ms = milliseconds.to_le_bytes();
        Self([ms[0], ms[1], minute & MINUTE_MASK])
    }

    /// Create from the raw wire octets.
    #[inline]
    pub const fn from_raw(raw: [u8; CP24_SIZE]) -> Self {
        Self(raw)
    }

    /// Get the raw wire octets.
    #[inline]
    pub const fn as_raw(&self) -> [u8; CP24_SIZE] {
        self.0
    }

    /// Milliseconds within the minute (0-59999 when valid).
    #[inline]
    pub const fn milliseconds(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Minute (0-59 when valid).
    #[inline]
    pub const fn minute(&self) -> u8 {
        self.0[2] & MINUTE_MASK
    }

    /// Invalid (IV) flag.
    #[inline]
    pub const fn invalid(&self) -> bool {
        self.0[2] & IV_MASK != 0
    }

    /// Substituted (genuine/substituted time) flag.
    #[inline]
    pub const fn substituted(&self) -> bool {
        self.0[2] & SUBSTITUTED_MASK != 0
    }

    /// Set the invalid flag.
    pub const fn with_invalid(mut self, value: bool) -> Self {
        self.0[2] = set_bit(self.0[2], IV_MASK, value);
        self
    }

    /// Set the substituted flag.
    pub const fn with_substituted(mut self, value: bool) -> Self {
        self.0[2] = set_bit(self.0[2], SUBSTITUTED_MASK, value);
        self
    }

    pub(crate) fn decode(buf: &mut impl Buf) -> Self {
        let mut raw = [0u8; CP24_SIZE];
        buf.copy_to_slice(&mut raw);
        Self(raw)
    }

    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self.0);
    }
}

impl std::fmt::Debug for Cp24Time2a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cp24Time2a")
            .field("milliseconds", &self.milliseconds())
            .field("minute", &self.minute())
            .field("invalid", &self.invalid())
            .field("substituted", &self.substituted())
            .finish()
    }
}

/// Seven octet binary time.
///
/// ```text
/// octet 0-1  milliseconds (LE)
/// octet 2    IV | SB | minute(6)
/// octet 3    SU | res(2) | hour(5)
/// octet 4    day of week(3) | day(5)
/// octet 5    res(4) | month(4)
/// octet 6    res(1) | year(7)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Cp56Time2a([u8; CP56_SIZE]);

impl Cp56Time2a {
    /// Create from calendar fields. Day of week and all flags start cleared.
    pub const fn new(year: u8, month: u8, day: u8, hour: u8, minute: u8, milliseconds: u16) -> Self {
        let ms = milliseconds.to_le_bytes();
        Self([
            ms[0],
            ms[1],
            minute & MINUTE_MASK,
            hour & HOUR_MASK,
            day & DAY_MASK,
            month & MONTH_MASK,
            year & YEAR_MASK,
        ])
    }

    /// Create from the raw wire octets.
    #[inline]
    pub const fn from_raw(raw: [u8; CP56_SIZE]) -> Self {
        Self(raw)
    }

    /// Get the raw wire octets.
    #[inline]
    pub const fn as_raw(&self) -> [u8; CP56_SIZE] {
        self.0
    }

    /// The leading three octets as a CP24Time2a.
    #[inline]
    pub const fn as_cp24(&self) -> Cp24Time2a {
        Cp24Time2a([self.0[0], self.0[1], self.0[2]])
    }

    #[inline]
    pub const fn milliseconds(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.0[2] & MINUTE_MASK
    }

    #[inline]
    pub const fn invalid(&self) -> bool {
        self.0[2] & IV_MASK != 0
    }

    #[inline]
    pub const fn substituted(&self) -> bool {
        self.0[2] & SUBSTITUTED_MASK != 0
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.0[3] & HOUR_MASK
    }

    /// Summer time (SU) flag.
    #[inline]
    pub const fn summer_time(&self) -> bool {
        self.0[3] & SUMMER_MASK != 0
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.0[4] & DAY_MASK
    }

    /// Day of week (1 = Monday .. 7 = Sunday, 0 = not used).
    #[inline]
    pub const fn day_of_week(&self) -> u8 {
        self.0[4] >> 5
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.0[5] & MONTH_MASK
    }

    /// Year within the century (0-99 when valid).
    #[inline]
    pub const fn year(&self) -> u8 {
        self.0[6] & YEAR_MASK
    }

    pub const fn with_invalid(mut self, value: bool) -> Self {
        self.0[2] = set_bit(self.0[2], IV_MASK, value);
        self
    }

    pub const fn with_substituted(mut self, value: bool) -> Self {
        self.0[2] = set_bit(self.0[2], SUBSTITUTED_MASK, value);
        self
    }

    pub const fn with_summer_time(mut self, value: bool) -> Self {
        self.0[3] = set_bit(self.0[3], SUMMER_MASK, value);
        self
    }

    pub const fn with_day_of_week(mut self, day_of_week: u8) -> Self {
        self.0[4] = (self.0[4] & DAY_MASK) | ((day_of_week & 0x07) << 5);
        self
    }

    pub(crate) fn decode(buf: &mut impl Buf) -> Self {
        let mut raw = [0u8; CP56_SIZE];
        buf.copy_to_slice(&mut raw);
        Self(raw)
    }

    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self.0);
    }
}

impl Default for Cp56Time2a {
    /// 2000-01-01 00:00:00.000
    fn default() -> Self {
        Self::new(0, 1, 1, 0, 0, 0)
    }
}

impl std::fmt::Debug for Cp56Time2a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cp56Time2a")
            .field("year", &self.year())
            .field("month", &self.month())
            .field("day", &self.day())
            .field("day_of_week", &self.day_of_week())
            .field("hour", &self.hour())
            .field("minute", &self.minute())
            .field("milliseconds", &self.milliseconds())
            .field("invalid", &self.invalid())
            .field("substituted", &self.substituted())
            .field("summer_time", &self.summer_time())
            .finish()
    }
}

impl std::fmt::Display for Cp56Time2a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.milliseconds() / 1000,
            self.milliseconds() % 1000
        )
    }
}

/// Kind of time tag carried by an information object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeTagKind {
    /// Three octet binary time
    Cp24,
    /// Seven octet binary time
    Cp56,
}

impl TimeTagKind {
    /// Encoded size in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Cp24 => CP24_SIZE,
            Self::Cp56 => CP56_SIZE,
        }
    }
}

/// Time tag attached to an information object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeTag {
    Cp24(Cp24Time2a),
    Cp56(Cp56Time2a),
}

impl TimeTag {
    #[inline]
    pub const fn kind(&self) -> TimeTagKind {
        match self {
            Self::Cp24(_) => TimeTagKind::Cp24,
            Self::Cp56(_) => TimeTagKind::Cp56,
        }
    }

    pub(crate) fn decode(kind: TimeTagKind, buf: &mut impl Buf) -> Self {
        match kind {
            TimeTagKind::Cp24 => Self::Cp24(Cp24Time2a::decode(buf)),
            TimeTagKind::Cp56 => Self::Cp56(Cp56Time2a::decode(buf)),
        }
    }

    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        match self {
            Self::Cp24(time) => time.encode(buf),
            Self::Cp56(time) => time.encode(buf),
        }
    }
}

impl From<Cp24Time2a> for TimeTag {
    fn from(time: Cp24Time2a) -> Self {
        Self::Cp24(time)
    }
}

impl From<Cp56Time2a> for TimeTag {
    fn from(time: Cp56Time2a) -> Self {
        Self::Cp56(time)
    }
}

#[inline]
const fn set_bit(byte: u8, mask: u8, value: bool) -> u8 {
    if value {
        byte | mask
    } else {
        byte & !mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp56_epoch_pattern() {
        let raw = [0x00, 0x00, 0x00, 0x00, 0x01, 0x21, 0x00];
        let time = Cp56Time2a::decode(&mut &raw[..]);

        assert_eq!(time.milliseconds(), 0);
        assert_eq!(time.minute(), 0);
        assert_eq!(time.hour(), 0);
        assert_eq!(time.day(), 1);
        assert_eq!(time.month(), 1);
        assert_eq!(time.year(), 0);
        assert!(!time.invalid());
        assert!(!time.substituted());
        assert!(!time.summer_time());

        // Reserved bit in the month octet survives re-encoding
        let mut out = Vec::new();
        time.encode(&mut out);
        assert_eq!(out, raw);
    }

    #[test]
    fn test_cp56_fields() {
        let time = Cp56Time2a::new(24, 6, 15, 12, 30, 30000)
            .with_day_of_week(3)
            .with_summer_time(true);

        assert_eq!(time.as_raw(), [0x30, 0x75, 30, 0x80 | 12, (3 << 5) | 15, 6, 24]);
        assert_eq!(time.milliseconds(), 30000);
        assert_eq!(time.minute(), 30);
        assert_eq!(time.hour(), 12);
        assert_eq!(time.day(), 15);
        assert_eq!(time.day_of_week(), 3);
        assert_eq!(time.month(), 6);
        assert_eq!(time.year(), 24);
        assert!(time.summer_time());
        assert!(!time.invalid());
    }

    #[test]
    fn test_cp56_out_of_range_preserved() {
        // day = 0, month = 15, minute = 63, all flags and reserved bits set
        let raw = [0xFF, 0xFF, 0xFF, 0xFF, 0xE0, 0xFF, 0xFF];
        let time = Cp56Time2a::from_raw(raw);
        assert_eq!(time.day(), 0);
        assert_eq!(time.day_of_week(), 7);
        assert_eq!(time.month(), 15);
        assert_eq!(time.minute(), 63);
        assert_eq!(time.hour(), 31);
        assert_eq!(time.year(), 127);
        assert_eq!(time.milliseconds(), 0xFFFF);
        assert!(time.invalid() && time.substituted() && time.summer_time());
        assert_eq!(time.as_raw(), raw);
    }

    #[test]
    fn test_cp24_flags() {
        let time = Cp24Time2a::from_raw([0x10, 0x27, 0xC5]);
        assert_eq!(time.milliseconds(), 10000);
        assert_eq!(time.minute(), 5);
        assert!(time.invalid());
        assert!(time.substituted());

        let built = Cp24Time2a::new(10000, 5)
            .with_invalid(true)
            .with_substituted(true);
        assert_eq!(built, time);
        assert_eq!(built.with_invalid(false).as_raw(), [0x10, 0x27, 0x45]);
    }

    #[test]
    fn test_cp56_as_cp24() {
        let time = Cp56Time2a::new(1, 2, 3, 4, 5, 678).with_invalid(true);
        let short = time.as_cp24();
        assert_eq!(short.minute(), 5);
        assert_eq!(short.milliseconds(), 678);
        assert!(short.invalid());
    }

    #[test]
    fn test_time_tag_kind() {
        assert_eq!(TimeTagKind::Cp24.size(), 3);
        assert_eq!(TimeTagKind::Cp56.size(), 7);
        assert_eq!(TimeTag::from(Cp56Time2a::default()).kind(), TimeTagKind::Cp56);
    }

    #[test]
    fn test_cp56_display() {
        let time = Cp56Time2a::new(24, 6, 15, 12, 30, 30500);
        assert_eq!(time.to_string(), "24-06-15 12:30:30.500");
    }
}
