//! Free-function entry points over the C library host
//!
//! Each call builds a default `DateEngine`; engines hold no state beyond
//! their configuration, so this costs nothing.

#![cfg(unix)]

use glkdate_core::{AbsoluteTime, CalendarDate, Zone};

use crate::DateEngine;

/// Current wall-clock time, or the epoch if the clock cannot be read
pub fn now() -> AbsoluteTime {
    DateEngine::new().now()
}

/// Current wall-clock time in `factor`-second units, zero on failure
pub fn now_simplified(factor: u32) -> i32 {
    DateEngine::new().now_simplified(factor)
}

/// Break an absolute time down in `zone`
pub fn to_date(time: AbsoluteTime, zone: Zone) -> CalendarDate {
    DateEngine::new().to_date(time, zone)
}

/// Break simple time down in `zone`, with zero microseconds
pub fn simple_to_date(simple: i32, factor: u32, zone: Zone) -> CalendarDate {
    DateEngine::new().simple_to_date(simple, factor, zone)
}

/// Build an absolute time from a calendar date in `zone`
pub fn to_absolute_time(date: &CalendarDate, zone: Zone) -> AbsoluteTime {
    DateEngine::new().to_absolute_time(date, zone)
}

/// Build simple time from a calendar date in `zone`, zero on failure
pub fn to_simple_time(date: &CalendarDate, factor: u32, zone: Zone) -> i32 {
    DateEngine::new().to_simple_time(date, factor, zone)
}
