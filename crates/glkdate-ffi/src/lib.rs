//! glkdate FFI - Foreign Function Interface
//!
//! C-compatible bindings of the Glk date/time API for interpreters.
//! This crate provides a stable ABI; the generated header lands in
//! `$OUT_DIR/glkdate.h`.
//!
//! Calls must be serialized by the embedding runtime. Concurrent calls from
//! several threads are not supported.

#[cfg(unix)]
pub mod datetime;
pub mod error;
pub mod types;

use std::ffi::{c_char, c_int};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::EnvFilter;

#[cfg(unix)]
pub use datetime::*;
pub use error::*;
pub use types::*;

/// Whether recovered failures are reported
pub(crate) static STRICT_WARNINGS: AtomicBool = AtomicBool::new(true);

/// Library version
#[no_mangle]
pub extern "C" fn glkdate_version() -> *const c_char {
    static VERSION: &[u8] = b"0.2.0\0";
    VERSION.as_ptr() as *const c_char
}

/// Initialize the glkdate library
/// Installs a stderr logging subscriber filtered by RUST_LOG (default
/// "warn") unless the process already has one. Safe to call repeatedly.
/// Returns 0
#[no_mangle]
pub extern "C" fn glkdate_init() -> c_int {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    tracing::debug!(installed, "glkdate initialized");
    0
}

/// Enable (non-zero) or disable (zero) warnings for recovered failures
#[no_mangle]
pub extern "C" fn glkdate_set_strict_warnings(enabled: c_int) {
    STRICT_WARNINGS.store(enabled != 0, Ordering::Relaxed);
}
