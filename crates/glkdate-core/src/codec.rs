//! Two-word timestamp codec
//!
//! Splits a signed 64-bit seconds count into `high_sec`/`low_sec` and joins
//! it back. On hosts whose time_t is only 32 bits wide the high word cannot
//! carry information: encoding sign-fills it and decoding ignores it. That
//! precision loss is part of the contract, not something to clamp.

use crate::{AbsoluteTime, TimeWidth, Timestamp};

const LOW_MASK: i64 = 0xFFFF_FFFF;

/// Codec between internal timestamps and the two-word ABI shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampCodec {
    width: TimeWidth,
}

impl TimestampCodec {
    pub const fn new(width: TimeWidth) -> Self {
        TimestampCodec { width }
    }

    #[inline]
    pub fn width(&self) -> TimeWidth {
        self.width
    }

    /// Split a timestamp into two words, carrying microseconds through
    pub fn encode(&self, ts: Timestamp) -> AbsoluteTime {
        let (high_sec, low_sec) = match self.width {
            TimeWidth::Bits64 => (
                ((ts.secs >> 32) & LOW_MASK) as u32 as i32,
                (ts.secs & LOW_MASK) as u32,
            ),
            // 32-bit time_t: the low word is all there is
            TimeWidth::Bits32 => (if ts.secs >= 0 { 0 } else { -1 }, ts.secs as u32),
        };
        AbsoluteTime {
            high_sec,
            low_sec,
            microsec: ts.micros,
        }
    }

    /// Join two words back into a timestamp
    pub fn decode(&self, time: AbsoluteTime) -> Timestamp {
        let secs = match self.width {
            TimeWidth::Bits64 => ((time.high_sec as i64) << 32) + time.low_sec as i64,
            TimeWidth::Bits32 => time.low_sec as i32 as i64,
        };
        Timestamp {
            secs,
            micros: time.microsec,
        }
    }
}
