//! Simulated zone - a deterministic calendar host for zone testing
//!
//! The real C library answers local-time questions from the process TZ,
//! which tests cannot rely on. `SimulatedZone` computes calendars itself
//! (proleptic Gregorian, Howard Hinnant's civil algorithms) with a fixed
//! standard offset and at most one DST window, and mimics timegm/mktime
//! carry rules for out-of-range fields.

use glkdate_core::{DstHint, Timestamp, Zone};
use glkdate_time::{CalendarHost, HostTm};

const SECS_PER_DAY: i64 = 86_400;

/// A daylight-saving window in UTC seconds, [start, end)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DstWindow {
    pub start: i64,
    pub end: i64,
    /// Extra offset while the window is active, usually 3600
    pub shift: i64,
}

/// Deterministic calendar host
#[derive(Clone, Debug)]
pub struct SimulatedZone {
    /// Standard offset east of UTC in seconds
    pub std_offset: i64,
    pub dst: Option<DstWindow>,
    /// What the wall clock reads; None simulates a failed read
    pub clock: Option<Timestamp>,
}

impl SimulatedZone {
    /// Zone with a fixed offset and no DST
    pub fn fixed(std_offset: i64) -> Self {
        SimulatedZone {
            std_offset,
            dst: None,
            clock: Some(Timestamp::EPOCH),
        }
    }

    /// Zone with one DST window
    pub fn with_dst(std_offset: i64, window: DstWindow) -> Self {
        SimulatedZone {
            dst: Some(window),
            ..Self::fixed(std_offset)
        }
    }

    pub fn with_clock(mut self, clock: Option<Timestamp>) -> Self {
        self.clock = clock;
        self
    }

    fn in_dst(&self, secs: i64) -> bool {
        self.dst
            .map(|w| (w.start..w.end).contains(&secs))
            .unwrap_or(false)
    }

    /// Offset east of UTC in effect at `secs`
    pub fn offset_at(&self, secs: i64) -> i64 {
        match self.dst {
            Some(w) if self.in_dst(secs) => self.std_offset + w.shift,
            _ => self.std_offset,
        }
    }

    fn dst_offset(&self) -> i64 {
        self.std_offset + self.dst.map(|w| w.shift).unwrap_or(0)
    }
}

impl CalendarHost for SimulatedZone {
    fn wall_clock(&self) -> Option<Timestamp> {
        self.clock
    }

    fn breakdown(&self, secs: i64, zone: Zone) -> Option<HostTm> {
        let offset = match zone {
            Zone::Utc => 0,
            Zone::Local => self.offset_at(secs),
        };
        let local = secs.checked_add(offset)?;
        let days = local.div_euclid(SECS_PER_DAY);
        let time_of_day = local.rem_euclid(SECS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        Some(HostTm {
            year: i32::try_from(year - 1900).ok()?,
            mon: (month - 1) as i32,
            mday: day as i32,
            wday: (days + 4).rem_euclid(7) as i32,
            hour: (time_of_day / 3600) as i32,
            min: (time_of_day % 3600 / 60) as i32,
            sec: (time_of_day % 60) as i32,
            isdst: (zone == Zone::Local && self.in_dst(secs)) as i32,
        })
    }

    fn construct(&self, fields: &HostTm, zone: Zone, hint: DstHint) -> i64 {
        let months = fields.year as i64 * 12 + fields.mon as i64;
        let year = months.div_euclid(12) + 1900;
        let month = months.rem_euclid(12) + 1;
        let days = days_from_civil(year, month, 1) + fields.mday as i64 - 1;
        let wall = days * SECS_PER_DAY
            + fields.hour as i64 * 3600
            + fields.min as i64 * 60
            + fields.sec as i64;

        match (zone, hint) {
            (Zone::Utc, _) => wall,
            (Zone::Local, DstHint::Off) => wall - self.std_offset,
            (Zone::Local, DstHint::On) => wall - self.dst_offset(),
            (Zone::Local, DstHint::Infer) => {
                // Standard reading first, like mktime: inside a repeated
                // hour this lands on the later instant, inside a skipped
                // hour it lands past the gap.
                let standard = wall - self.std_offset;
                if !self.in_dst(standard) {
                    return standard;
                }
                let daylight = wall - self.dst_offset();
                if self.in_dst(daylight) {
                    daylight
                } else {
                    standard
                }
            }
        }
    }
}

/// Days since 1970-01-01 to (year, month, day)
pub fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + (month <= 2) as i64;
    (year, month, day)
}

/// (year, month, day) to days since 1970-01-01; day may be out of range
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let yoe = year - era * 400;
    let doy = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
