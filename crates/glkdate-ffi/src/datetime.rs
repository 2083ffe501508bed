#![allow(clippy::missing_safety_doc)]
//! FFI Glk date/time functions
//!
//! Pointer arguments must be NULL or point to valid, properly aligned
//! records. A NULL where a record is required writes nothing, returns 0
//! and records a `NullPointer` warning.

use std::sync::atomic::Ordering;

use glkdate_core::{CalendarDate, Zone};
use glkdate_time::{DateEngine, DateEngineConfig, SystemHost};

use crate::error::*;
use crate::types::*;
use crate::STRICT_WARNINGS;

fn engine() -> DateEngine<SystemHost> {
    let config = DateEngineConfig {
        strict_warnings: STRICT_WARNINGS.load(Ordering::Relaxed),
        ..DateEngineConfig::default()
    };
    DateEngine::with_config(config.with_warning_hook(record_warning))
}

unsafe fn time_to_date(
    time: *const GlkTimeval,
    date: *mut GlkDate,
    zone: Zone,
    operation: &'static str,
) {
    let (Some(time), Some(date)) = (time.as_ref(), date.as_mut()) else {
        null_argument(operation);
        return;
    };
    *date = engine().to_date((*time).into(), zone).into();
}

unsafe fn simple_time_to_date(
    time: glsi32,
    factor: glui32,
    date: *mut GlkDate,
    zone: Zone,
    operation: &'static str,
) {
    let Some(date) = date.as_mut() else {
        null_argument(operation);
        return;
    };
    *date = engine().simple_to_date(time, factor, zone).into();
}

unsafe fn date_to_time(
    date: *const GlkDate,
    time: *mut GlkTimeval,
    zone: Zone,
    operation: &'static str,
) {
    let (Some(date), Some(time)) = (date.as_ref(), time.as_mut()) else {
        null_argument(operation);
        return;
    };
    let date = CalendarDate::from(*date);
    *time = engine().to_absolute_time(&date, zone).into();
}

unsafe fn date_to_simple_time(
    date: *const GlkDate,
    factor: glui32,
    zone: Zone,
    operation: &'static str,
) -> glsi32 {
    let Some(date) = date.as_ref() else {
        null_argument(operation);
        return 0;
    };
    engine().to_simple_time(&CalendarDate::from(*date), factor, zone)
}

/// Current time as seconds and microseconds since the epoch
#[no_mangle]
pub unsafe extern "C" fn glk_current_time(time: *mut GlkTimeval) {
    let Some(time) = time.as_mut() else {
        null_argument("current_time");
        return;
    };
    *time = engine().now().into();
}

/// Current time divided by `factor`, rounded toward negative infinity
#[no_mangle]
pub extern "C" fn glk_current_simple_time(factor: glui32) -> glsi32 {
    engine().now_simplified(factor)
}

#[no_mangle]
pub unsafe extern "C" fn glk_time_to_date_utc(time: *const GlkTimeval, date: *mut GlkDate) {
    time_to_date(time, date, Zone::Utc, "time_to_date_utc");
}

#[no_mangle]
pub unsafe extern "C" fn glk_time_to_date_local(time: *const GlkTimeval, date: *mut GlkDate) {
    time_to_date(time, date, Zone::Local, "time_to_date_local");
}

#[no_mangle]
pub unsafe extern "C" fn glk_simple_time_to_date_utc(
    time: glsi32,
    factor: glui32,
    date: *mut GlkDate,
) {
    simple_time_to_date(time, factor, date, Zone::Utc, "simple_time_to_date_utc");
}

#[no_mangle]
pub unsafe extern "C" fn glk_simple_time_to_date_local(
    time: glsi32,
    factor: glui32,
    date: *mut GlkDate,
) {
    simple_time_to_date(time, factor, date, Zone::Local, "simple_time_to_date_local");
}

/// Normalize `date` (UTC) into a time value
#[no_mangle]
pub unsafe extern "C" fn glk_date_to_time_utc(date: *const GlkDate, time: *mut GlkTimeval) {
    date_to_time(date, time, Zone::Utc, "date_to_time_utc");
}

/// Normalize `date` (local time) into a time value
#[no_mangle]
pub unsafe extern "C" fn glk_date_to_time_local(date: *const GlkDate, time: *mut GlkTimeval) {
    date_to_time(date, time, Zone::Local, "date_to_time_local");
}

#[no_mangle]
pub unsafe extern "C" fn glk_date_to_simple_time_utc(
    date: *const GlkDate,
    factor: glui32,
) -> glsi32 {
    date_to_simple_time(date, factor, Zone::Utc, "date_to_simple_time_utc")
}

#[no_mangle]
pub unsafe extern "C" fn glk_date_to_simple_time_local(
    date: *const GlkDate,
    factor: glui32,
) -> glsi32 {
    date_to_simple_time(date, factor, Zone::Local, "date_to_simple_time_local")
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    fn date(year: i32, month: i32, day: i32, second: i32, microsec: i32) -> GlkDate {
        GlkDate {
            year,
            month,
            day,
            second,
            microsec,
            ..GlkDate::default()
        }
    }

    #[test]
    fn test_epoch_to_date_utc() {
        let time = GlkTimeval::default();
        let mut out = GlkDate::default();
        unsafe { glk_time_to_date_utc(&time, &mut out) };
        assert_eq!(
            out,
            GlkDate {
                year: 1970,
                month: 1,
                day: 1,
                weekday: 4,
                ..GlkDate::default()
            }
        );
    }

    #[test]
    fn test_date_to_time_normalizes_microseconds() {
        let mut time = GlkTimeval::default();
        unsafe { glk_date_to_time_utc(&date(1970, 1, 1, 0, 1_500_000), &mut time) };
        assert_eq!(
            time,
            GlkTimeval {
                high_sec: 0,
                low_sec: 1,
                microsec: 500_000
            }
        );

        unsafe { glk_date_to_time_utc(&date(1970, 1, 1, 10, -1), &mut time) };
        assert_eq!((time.low_sec, time.microsec), (9, 999_999));
    }

    #[test]
    fn test_zero_factor_sets_warning() {
        glkdate_clear_warning();
        assert_eq!(glk_current_simple_time(0), 0);
        assert_eq!(glkdate_last_warning_code(), GlkdateWarning::InvalidFactor);

        glkdate_clear_warning();
        let d = date(2000, 1, 1, 0, 0);
        assert_eq!(unsafe { glk_date_to_simple_time_utc(&d, 0) }, 0);
        assert_eq!(glkdate_last_warning_code(), GlkdateWarning::InvalidFactor);
    }

    #[test]
    fn test_null_pointers_are_recovered() {
        glkdate_clear_warning();
        unsafe { glk_current_time(ptr::null_mut()) };
        assert_eq!(glkdate_last_warning_code(), GlkdateWarning::NullPointer);

        let mut out = date(1, 2, 3, 4, 5);
        unsafe { glk_time_to_date_local(ptr::null(), &mut out) };
        assert_eq!(out, date(1, 2, 3, 4, 5));

        assert_eq!(unsafe { glk_date_to_simple_time_local(ptr::null(), 60) }, 0);
    }

    #[test]
    fn test_simple_time_utc() {
        let mut out = GlkDate::default();
        unsafe { glk_simple_time_to_date_utc(-1, 86_400, &mut out) };
        assert_eq!((out.year, out.month, out.day, out.weekday), (1969, 12, 31, 3));

        let d = date(1969, 12, 30, 86_399, 0);
        assert_eq!(unsafe { glk_date_to_simple_time_utc(&d, 86_400) }, -2);
    }

    #[test]
    fn test_current_time_is_normalized() {
        let mut time = GlkTimeval::default();
        unsafe { glk_current_time(&mut time) };
        assert!((0..1_000_000).contains(&time.microsec));
        assert!(time.low_sec != 0 || time.high_sec != 0);
    }
}
