//! Calendar conversion - absolute time to and from broken-down dates

use glkdate_core::{
    normalize_microseconds, AbsoluteTime, CalendarDate, DateTimeError, DateTimeResult, DstHint,
    Timestamp, TimestampCodec, Zone,
};
use tracing::trace;

use crate::{CalendarHost, HostTm};

/// How local construction settles a wall-clock time that DST makes ambiguous
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DstResolution {
    /// A repeated time resolves to its earlier instant; a skipped time
    /// resolves to whatever the host infers
    #[default]
    Earliest,
    /// Whatever the host's mktime infers, unchecked
    Host,
}

/// Converts between absolute time and calendar dates through a host
pub struct CalendarConverter<H> {
    host: H,
    codec: TimestampCodec,
    dst_resolution: DstResolution,
}

impl<H: CalendarHost> CalendarConverter<H> {
    pub fn new(host: H, codec: TimestampCodec, dst_resolution: DstResolution) -> Self {
        CalendarConverter {
            host,
            codec,
            dst_resolution,
        }
    }

    #[inline]
    pub fn codec(&self) -> TimestampCodec {
        self.codec
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Break an absolute time down into a calendar date
    ///
    /// Microseconds are copied through unchanged.
    pub fn to_calendar(&self, time: AbsoluteTime, zone: Zone) -> DateTimeResult<CalendarDate> {
        let ts = self.codec.decode(time);
        let date = self.breakdown_secs(ts.secs, zone)?;
        Ok(date.with_microsec(ts.micros))
    }

    /// Break epoch seconds down into a calendar date with zero microseconds
    pub fn breakdown_secs(&self, secs: i64, zone: Zone) -> DateTimeResult<CalendarDate> {
        let tm = self
            .host
            .breakdown(secs, zone)
            .ok_or(DateTimeError::HostCalendarFailure {
                operation: match zone {
                    Zone::Utc => "time_to_date_utc",
                    Zone::Local => "time_to_date_local",
                },
                secs,
            })?;
        Ok(date_from_tm(&tm))
    }

    /// Build an absolute time from a possibly out-of-range calendar date
    pub fn from_calendar(&self, date: &CalendarDate, zone: Zone) -> AbsoluteTime {
        self.codec.encode(self.construct(date, zone))
    }

    /// Build a timestamp from a calendar date, normalizing every field
    ///
    /// Microseconds are folded into range here; the host absorbs whatever
    /// overflow remains in seconds, minutes, hours, days and months.
    pub fn construct(&self, date: &CalendarDate, zone: Zone) -> Timestamp {
        let (second, microsec) = normalize_microseconds(date.second, date.microsec);
        let tm = tm_from_date(date, second);
        let secs = match zone {
            Zone::Utc => self.host.construct(&tm, Zone::Utc, DstHint::Off),
            Zone::Local => self.construct_local(&tm),
        };
        Timestamp::new(secs, microsec)
    }

    fn construct_local(&self, tm: &HostTm) -> i64 {
        let inferred = self.host.construct(tm, Zone::Local, DstHint::Infer);
        if self.dst_resolution == DstResolution::Host {
            return inferred;
        }
        let Some(wall) = self.host.breakdown(inferred, Zone::Local) else {
            return inferred;
        };

        // A candidate is valid if the host reads it back as the same wall
        // clock with the DST state it was built under. Two valid
        // candidates mean the wall clock repeats; none means it was skipped.
        let earliest = [DstHint::On, DstHint::Off]
            .into_iter()
            .filter_map(|hint| {
                let secs = self.host.construct(tm, Zone::Local, hint);
                let back = self.host.breakdown(secs, Zone::Local)?;
                let same_dst = (back.isdst > 0) == (hint == DstHint::On);
                (same_dst && back.same_wall_clock(&wall)).then_some(secs)
            })
            .min();

        match earliest {
            Some(secs) => {
                if secs != inferred {
                    trace!(inferred, resolved = secs, "local time repeats, taking earlier instant");
                }
                secs
            }
            None => inferred,
        }
    }
}

/// Host tm fields to the public calendar convention
fn date_from_tm(tm: &HostTm) -> CalendarDate {
    CalendarDate {
        year: tm.year.wrapping_add(1900),
        month: tm.mon.wrapping_add(1),
        day: tm.mday,
        weekday: tm.wday,
        hour: tm.hour,
        minute: tm.min,
        second: tm.sec,
        microsec: 0,
    }
}

/// Public calendar fields to host tm, with the already-normalized second
fn tm_from_date(date: &CalendarDate, second: i32) -> HostTm {
    HostTm {
        year: date.year.wrapping_sub(1900),
        mon: date.month.wrapping_sub(1),
        mday: date.day,
        wday: 0,
        hour: date.hour,
        min: date.minute,
        sec: second,
        isdst: 0,
    }
}
