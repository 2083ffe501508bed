//! Time representations for glkdate
//!
//! A moment in time travels through three shapes:
//! - Timestamp: signed 64-bit seconds since the epoch plus microseconds
//! - AbsoluteTime: the same value split into two 32-bit words for the ABI
//! - CalendarDate: broken-down year/month/day/... fields in some zone

use std::fmt;

/// Microseconds in one second
pub const MICROS_PER_SEC: i32 = 1_000_000;

/// Internal timestamp - genuine 64-bit seconds since the Unix epoch
/// INVARIANT: 0 <= micros < 1_000_000 when produced by this crate
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    pub secs: i64,
    pub micros: i32,
}

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp { secs: 0, micros: 0 };

    #[inline]
    pub fn new(secs: i64, micros: i32) -> Self {
        Timestamp { secs, micros }
    }

    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        Timestamp { secs, micros: 0 }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}.{:06})", self.secs, self.micros)
    }
}

/// Two-word absolute time, the shape persisted by interpreters
///
/// `high_sec` and `low_sec` are the upper and lower halves of a
/// two's-complement 64-bit seconds count. Save-state formats store these
/// words directly, so the split must stay bit-exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct AbsoluteTime {
    pub high_sec: i32,
    pub low_sec: u32,
    pub microsec: i32,
}

impl AbsoluteTime {
    pub const EPOCH: AbsoluteTime = AbsoluteTime {
        high_sec: 0,
        low_sec: 0,
        microsec: 0,
    };

    #[inline]
    pub fn new(high_sec: i32, low_sec: u32, microsec: i32) -> Self {
        AbsoluteTime {
            high_sec,
            low_sec,
            microsec,
        }
    }
}

/// Broken-down calendar date
///
/// On output every field is normalized: month 1-12, weekday 0 (Sunday)
/// to 6 (Saturday), microsec 0-999999. As a construction source any
/// field may be out of range and is carried into its neighbours;
/// weekday is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CalendarDate {
    /// Full year, e.g. 1970
    pub year: i32,
    /// 1-12
    pub month: i32,
    /// 1-31
    pub day: i32,
    /// 0 = Sunday
    pub weekday: i32,
    pub hour: i32,
    pub minute: i32,
    /// 0-59 (60 on hosts that report leap seconds)
    pub second: i32,
    pub microsec: i32,
}

impl CalendarDate {
    /// Build a date from its fields, leaving weekday at zero
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        microsec: i32,
    ) -> Self {
        CalendarDate {
            year,
            month,
            day,
            weekday: 0,
            hour,
            minute,
            second,
            microsec,
        }
    }

    /// Same date with a different microsecond field
    #[inline]
    pub fn with_microsec(self, microsec: i32) -> Self {
        CalendarDate { microsec, ..self }
    }

    /// Compare every field except weekday
    pub fn same_fields(&self, other: &CalendarDate) -> bool {
        self.year == other.year
            && self.month == other.month
            && self.day == other.day
            && self.hour == other.hour
            && self.minute == other.minute
            && self.second == other.second
            && self.microsec == other.microsec
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsec
        )
    }
}

/// Zone a calendar date is expressed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    Utc,
    Local,
}

impl Zone {
    /// Suffix used in Glk operation names
    #[inline]
    pub fn suffix(self) -> &'static str {
        match self {
            Zone::Utc => "utc",
            Zone::Local => "local",
        }
    }
}

/// Daylight-saving hint handed to the host construction facility
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DstHint {
    /// DST not in effect (tm_isdst = 0)
    Off,
    /// DST in effect (tm_isdst > 0)
    On,
    /// Let the host infer it from the date (tm_isdst = -1)
    Infer,
}

impl DstHint {
    /// Value of the POSIX tm_isdst field for this hint
    #[inline]
    pub fn as_isdst(self) -> i32 {
        match self {
            DstHint::Off => 0,
            DstHint::On => 1,
            DstHint::Infer => -1,
        }
    }
}

/// Native width of the host's time_t
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeWidth {
    Bits32,
    Bits64,
}

impl TimeWidth {
    /// Width for a time_t of the given size in bytes
    pub const fn of_bytes(size: usize) -> Self {
        if size <= 4 {
            TimeWidth::Bits32
        } else {
            TimeWidth::Bits64
        }
    }

    /// Whether `secs` fits a time_t of this width
    #[inline]
    pub fn can_represent(self, secs: i64) -> bool {
        match self {
            TimeWidth::Bits32 => i32::try_from(secs).is_ok(),
            TimeWidth::Bits64 => true,
        }
    }
}
