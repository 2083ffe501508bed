//! glkdate Time Engine - Calendar conversions over the host
//!
//! This crate implements the conversion engine:
//! - Host adapter around gmtime_r/localtime_r/timegm/mktime and the wall clock
//! - Calendar conversion in UTC and local zones
//! - Deterministic DST resolution for local construction
//! - The six Glk date/time entry points with recover-and-warn semantics
//!
//! The host calendar facilities share process-wide state (the active time
//! zone). Every call into them is serialized through one lock, but the
//! embedding runtime still owns serializing calls into this crate.

pub mod api;
pub mod convert;
pub mod engine;
pub mod host;

pub use api::*;
pub use convert::*;
pub use engine::*;
pub use host::*;
