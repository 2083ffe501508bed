//! FFI warning channel
//!
//! Glk date/time calls never fail across the ABI. A recovered failure
//! leaves a code and a message in a thread-local slot the interpreter can
//! poll, next to the tracing event the engine already emits.

use std::cell::RefCell;
use std::ffi::{c_char, CString};
use std::sync::atomic::Ordering;

use glkdate_core::DateTimeError;

use crate::STRICT_WARNINGS;

/// Warning codes for the last recovered failure
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlkdateWarning {
    /// No warning recorded
    None = 0,
    /// Wall clock could not be read
    HostClockFailure = 1,
    /// Scaling factor was zero
    InvalidFactor = 2,
    /// Host calendar could not represent the timestamp
    HostCalendarFailure = 3,
    /// A required pointer argument was NULL
    NullPointer = 4,
}

impl From<&DateTimeError> for GlkdateWarning {
    fn from(err: &DateTimeError) -> Self {
        match err {
            DateTimeError::HostClockFailure { .. } => GlkdateWarning::HostClockFailure,
            DateTimeError::InvalidFactor { .. } => GlkdateWarning::InvalidFactor,
            DateTimeError::HostCalendarFailure { .. } => GlkdateWarning::HostCalendarFailure,
        }
    }
}

thread_local! {
    static LAST_WARNING: RefCell<Option<(GlkdateWarning, CString)>> =
        const { RefCell::new(None) };
}

/// Set the last warning
pub fn set_last_warning(code: GlkdateWarning, msg: &str) {
    LAST_WARNING.with(|w| {
        *w.borrow_mut() = CString::new(msg).ok().map(|msg| (code, msg));
    });
}

/// Warning hook handed to the date engine
pub fn record_warning(err: &DateTimeError) {
    set_last_warning(GlkdateWarning::from(err), &err.to_string());
}

/// Record a NULL argument, mirrored to tracing
///
/// Silent while strict warnings are off, like engine-recovered failures.
pub(crate) fn null_argument(operation: &'static str) {
    if !STRICT_WARNINGS.load(Ordering::Relaxed) {
        return;
    }
    let msg = format!("{operation}: null pointer argument.");
    tracing::warn!(target: "glkdate", operation, "{}", msg);
    set_last_warning(GlkdateWarning::NullPointer, &msg);
}

/// Get the last warning message
/// Returns NULL if no warning
#[no_mangle]
pub extern "C" fn glkdate_last_warning() -> *const c_char {
    LAST_WARNING.with(|w| match w.borrow().as_ref() {
        Some((_, msg)) => msg.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Get the last warning code
#[no_mangle]
pub extern "C" fn glkdate_last_warning_code() -> GlkdateWarning {
    LAST_WARNING.with(|w| match w.borrow().as_ref() {
        Some((code, _)) => *code,
        None => GlkdateWarning::None,
    })
}

/// Clear the last warning
#[no_mangle]
pub extern "C" fn glkdate_clear_warning() {
    LAST_WARNING.with(|w| {
        *w.borrow_mut() = None;
    });
}
