//! glkdate Core - Time representations and pure conversions
//!
//! This crate defines the value types and arithmetic shared by every layer:
//! - Time representations (Timestamp, AbsoluteTime, CalendarDate)
//! - The two-word timestamp codec and its 32-bit fallback
//! - Second/microsecond normalization for calendar construction
//! - Floor-division scaling to and from simple time

pub mod codec;
pub mod error;
pub mod normalize;
pub mod scale;
pub mod time;

pub use codec::*;
pub use error::*;
pub use normalize::*;
pub use scale::*;
pub use time::*;
