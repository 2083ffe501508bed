#![no_main]
//! Arbitrary calendar fields through construction and back
//!
//! Interpreters hand over whatever the game wrote into a glkdate_t. No
//! field combination may panic, and microseconds must come out in range.

use arbitrary::Arbitrary;
use glkdate_core::{CalendarDate, Zone};
use glkdate_time::{DateEngine, DateEngineConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    year: i32,
    month: i32,
    day: i32,
    weekday: i32,
    hour: i32,
    minute: i32,
    second: i32,
    microsec: i32,
    local: bool,
}

fuzz_target!(|input: Input| {
    let engine = DateEngine::with_config(DateEngineConfig::quiet());
    let zone = if input.local { Zone::Local } else { Zone::Utc };
    let date = CalendarDate {
        year: input.year,
        month: input.month,
        day: input.day,
        weekday: input.weekday,
        hour: input.hour,
        minute: input.minute,
        second: input.second,
        microsec: input.microsec,
    };

    let time = engine.to_absolute_time(&date, zone);
    assert!((0..1_000_000).contains(&time.microsec));

    let back = engine.to_date(time, zone);
    assert_eq!(back.microsec, time.microsec);
    let _ = engine.to_simple_time(&date, 60, zone);
});
