//! glkdate Test Harness - Zone simulation and cross-zone validation
//!
//! This crate provides:
//! - A deterministic `CalendarHost` with a fixed offset and one DST window
//! - Cross-zone round-trip and consistency tests against it
//! - Tests against the real C library under POSIX TZ rules
//! - Benchmarks for the conversion paths

pub mod integration;
pub mod simulated_zone;

pub use simulated_zone::*;
