//! FFI Types - Glk date/time records
//!
//! Layouts match `glktimeval_t` and `glkdate_t` from glk.h exactly.

use glkdate_core::{AbsoluteTime, CalendarDate};

/// Glk signed 32-bit integer
#[allow(non_camel_case_types)]
pub type glsi32 = i32;

/// Glk unsigned 32-bit integer
#[allow(non_camel_case_types)]
pub type glui32 = u32;

/// glktimeval_t
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlkTimeval {
    pub high_sec: glsi32,
    pub low_sec: glui32,
    pub microsec: glsi32,
}

impl From<AbsoluteTime> for GlkTimeval {
    fn from(t: AbsoluteTime) -> Self {
        Self {
            high_sec: t.high_sec,
            low_sec: t.low_sec,
            microsec: t.microsec,
        }
    }
}

impl From<GlkTimeval> for AbsoluteTime {
    fn from(t: GlkTimeval) -> Self {
        AbsoluteTime::new(t.high_sec, t.low_sec, t.microsec)
    }
}

/// glkdate_t
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlkDate {
    pub year: glsi32,
    pub month: glsi32,
    pub day: glsi32,
    pub weekday: glsi32,
    pub hour: glsi32,
    pub minute: glsi32,
    pub second: glsi32,
    pub microsec: glsi32,
}

impl From<CalendarDate> for GlkDate {
    fn from(d: CalendarDate) -> Self {
        Self {
            year: d.year,
            month: d.month,
            day: d.day,
            weekday: d.weekday,
            hour: d.hour,
            minute: d.minute,
            second: d.second,
            microsec: d.microsec,
        }
    }
}

impl From<GlkDate> for CalendarDate {
    fn from(d: GlkDate) -> Self {
        CalendarDate {
            year: d.year,
            month: d.month,
            day: d.day,
            weekday: d.weekday,
            hour: d.hour,
            minute: d.minute,
            second: d.second,
            microsec: d.microsec,
        }
    }
}
