//! Date Engine - the Glk date/time entry points
//!
//! Every entry point comes in two forms. The `try_` form reports failures
//! as `DateTimeError`. The plain form never fails: it substitutes a
//! deterministic default and reports the failure as a warning, because
//! interpreters must keep running on malformed input.

use std::num::NonZeroU32;

use glkdate_core::{
    expand, simplify, AbsoluteTime, CalendarDate, DateTimeError, DateTimeResult, TimeWidth,
    Timestamp, TimestampCodec, Zone,
};
use tracing::warn;

use crate::{CalendarConverter, CalendarHost, DstResolution, NATIVE_TIME_WIDTH};

#[cfg(unix)]
use crate::SystemHost;

/// Out-of-band receiver for recovered failures
pub type WarningHook = fn(&DateTimeError);

/// Date Engine configuration
#[derive(Clone, Debug)]
pub struct DateEngineConfig {
    /// Width of time_t the two-word codec assumes
    pub time_width: TimeWidth,
    /// Tie-break for local wall-clock times that DST repeats
    pub dst_resolution: DstResolution,
    /// Report recovered failures (tracing warning and hook)
    pub strict_warnings: bool,
    /// Extra receiver for recovered failures, after the tracing event
    pub on_warning: Option<WarningHook>,
}

impl Default for DateEngineConfig {
    fn default() -> Self {
        DateEngineConfig {
            time_width: NATIVE_TIME_WIDTH,
            dst_resolution: DstResolution::Earliest,
            strict_warnings: true,
            on_warning: None,
        }
    }
}

impl DateEngineConfig {
    /// Recover silently from every failure
    pub fn quiet() -> Self {
        DateEngineConfig {
            strict_warnings: false,
            ..Self::default()
        }
    }

    /// Behave like a host with a 32-bit time_t
    pub fn narrow_time() -> Self {
        DateEngineConfig {
            time_width: TimeWidth::Bits32,
            ..Self::default()
        }
    }

    pub fn with_warning_hook(mut self, hook: WarningHook) -> Self {
        self.on_warning = Some(hook);
        self
    }
}

/// Date Engine - the six conversion entry points over one host
pub struct DateEngine<H> {
    converter: CalendarConverter<H>,
    config: DateEngineConfig,
}

#[cfg(unix)]
impl DateEngine<SystemHost> {
    /// Engine over the C library with default configuration
    pub fn new() -> Self {
        Self::with_config(DateEngineConfig::default())
    }

    /// Engine over the C library with custom configuration
    pub fn with_config(config: DateEngineConfig) -> Self {
        Self::with_host(SystemHost, config)
    }
}

#[cfg(unix)]
impl Default for DateEngine<SystemHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: CalendarHost> DateEngine<H> {
    /// Engine over a custom host
    pub fn with_host(host: H, config: DateEngineConfig) -> Self {
        DateEngine {
            converter: CalendarConverter::new(
                host,
                TimestampCodec::new(config.time_width),
                config.dst_resolution,
            ),
            config,
        }
    }

    pub fn config(&self) -> &DateEngineConfig {
        &self.config
    }

    pub fn converter(&self) -> &CalendarConverter<H> {
        &self.converter
    }

    /// Current wall-clock time
    pub fn try_now(&self) -> DateTimeResult<AbsoluteTime> {
        let now = self.read_clock("current_time")?;
        Ok(self.codec().encode(now))
    }

    /// Current wall-clock time, or the epoch if the clock cannot be read
    pub fn now(&self) -> AbsoluteTime {
        self.recover(self.try_now(), || AbsoluteTime::EPOCH)
    }

    /// Current wall-clock time in `factor`-second units
    pub fn try_now_simplified(&self, factor: u32) -> DateTimeResult<i32> {
        let factor = nonzero(factor, "current_simple_time")?;
        let now = self.read_clock("current_simple_time")?;
        Ok(simplify(now.secs, factor))
    }

    /// Current wall-clock time in `factor`-second units, zero on failure
    pub fn now_simplified(&self, factor: u32) -> i32 {
        self.recover(self.try_now_simplified(factor), || 0)
    }

    /// Break an absolute time down in `zone`
    pub fn try_to_date(&self, time: AbsoluteTime, zone: Zone) -> DateTimeResult<CalendarDate> {
        self.converter.to_calendar(time, zone)
    }

    /// Break an absolute time down in `zone`
    ///
    /// If the host cannot represent the timestamp the date is all zeroes
    /// apart from the copied microseconds.
    pub fn to_date(&self, time: AbsoluteTime, zone: Zone) -> CalendarDate {
        self.recover(self.try_to_date(time, zone), || CalendarDate {
            microsec: time.microsec,
            ..CalendarDate::default()
        })
    }

    /// Break simple time down in `zone`, with zero microseconds
    ///
    /// A zero factor is not an error here: it expands to the epoch.
    pub fn try_simple_to_date(
        &self,
        simple: i32,
        factor: u32,
        zone: Zone,
    ) -> DateTimeResult<CalendarDate> {
        let secs = self.to_time_width(expand(simple, factor));
        self.converter.breakdown_secs(secs, zone).map_err(|err| {
            err.in_operation(match zone {
                Zone::Utc => "simple_time_to_date_utc",
                Zone::Local => "simple_time_to_date_local",
            })
        })
    }

    /// Break simple time down in `zone`, with zero microseconds
    pub fn simple_to_date(&self, simple: i32, factor: u32, zone: Zone) -> CalendarDate {
        self.recover(self.try_simple_to_date(simple, factor, zone), CalendarDate::default)
    }

    /// Build an absolute time from a calendar date in `zone`
    ///
    /// Out-of-range fields are normalized, never rejected. This cannot fail.
    pub fn to_absolute_time(&self, date: &CalendarDate, zone: Zone) -> AbsoluteTime {
        self.converter.from_calendar(date, zone)
    }

    /// Build simple time from a calendar date in `zone`
    pub fn try_to_simple_time(
        &self,
        date: &CalendarDate,
        factor: u32,
        zone: Zone,
    ) -> DateTimeResult<i32> {
        let operation = match zone {
            Zone::Utc => "date_to_simple_time_utc",
            Zone::Local => "date_to_simple_time_local",
        };
        let factor = nonzero(factor, operation)?;
        let ts = self.converter.construct(date, zone);
        Ok(simplify(self.to_time_width(ts.secs), factor))
    }

    /// Build simple time from a calendar date in `zone`, zero on failure
    pub fn to_simple_time(&self, date: &CalendarDate, factor: u32, zone: Zone) -> i32 {
        self.recover(self.try_to_simple_time(date, factor, zone), || 0)
    }

    /// Report a recovered failure on the warning channels
    pub fn report(&self, err: &DateTimeError) {
        if !self.config.strict_warnings {
            return;
        }
        warn!(target: "glkdate", operation = err.operation(), "{}", err);
        if let Some(hook) = self.config.on_warning {
            hook(err);
        }
    }

    fn recover<T>(&self, result: DateTimeResult<T>, fallback: impl FnOnce() -> T) -> T {
        result.unwrap_or_else(|err| {
            self.report(&err);
            fallback()
        })
    }

    fn read_clock(&self, operation: &'static str) -> DateTimeResult<Timestamp> {
        let now = self
            .converter
            .host()
            .wall_clock()
            .ok_or(DateTimeError::HostClockFailure { operation })?;
        Ok(Timestamp::new(self.to_time_width(now.secs), now.micros))
    }

    /// Seconds as a time_t of the configured width would hold them
    fn to_time_width(&self, secs: i64) -> i64 {
        let codec = self.codec();
        codec.decode(codec.encode(Timestamp::from_secs(secs))).secs
    }

    #[inline]
    fn codec(&self) -> TimestampCodec {
        self.converter.codec()
    }
}

fn nonzero(factor: u32, operation: &'static str) -> DateTimeResult<NonZeroU32> {
    NonZeroU32::new(factor).ok_or(DateTimeError::InvalidFactor { operation })
}
