//! Host calendar adapter
//!
//! The C library calendar routines keep process-wide state: the active
//! time zone, and on some platforms static result buffers. The rest of the
//! engine only sees the `CalendarHost` trait, a pair of pure-looking
//! functions plus the wall clock. `SystemHost` serializes every libc call
//! through a single process-wide lock.

use glkdate_core::{DstHint, TimeWidth, Timestamp, Zone};

/// Native width of time_t on this platform, fixed at compile time
#[cfg(unix)]
pub const NATIVE_TIME_WIDTH: TimeWidth = TimeWidth::of_bytes(std::mem::size_of::<libc::time_t>());

#[cfg(not(unix))]
pub const NATIVE_TIME_WIDTH: TimeWidth = TimeWidth::Bits64;

/// Broken-down time in host conventions (POSIX struct tm)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HostTm {
    /// Years since 1900
    pub year: i32,
    /// Months since January, 0-11
    pub mon: i32,
    pub mday: i32,
    /// Days since Sunday, 0-6
    pub wday: i32,
    pub hour: i32,
    pub min: i32,
    pub sec: i32,
    /// Positive if DST is in effect, zero if not, negative if unknown
    pub isdst: i32,
}

impl HostTm {
    /// Same wall-clock reading (date and time of day)
    pub fn same_wall_clock(&self, other: &HostTm) -> bool {
        self.year == other.year
            && self.mon == other.mon
            && self.mday == other.mday
            && self.hour == other.hour
            && self.min == other.min
            && self.sec == other.sec
    }
}

/// Host facilities the engine delegates to
///
/// Implementations absorb out-of-range fields in `construct` the way
/// timegm/mktime do (second 65 becomes minute + 1, month 13 becomes
/// January of the next year, and so on).
pub trait CalendarHost {
    /// Current wall-clock time, or None if the clock cannot be read
    fn wall_clock(&self) -> Option<Timestamp>;

    /// Break epoch seconds down into calendar fields
    ///
    /// Returns None if the host cannot represent the result.
    fn breakdown(&self, secs: i64, zone: Zone) -> Option<HostTm>;

    /// Build epoch seconds from calendar fields
    ///
    /// `fields.wday` and `fields.isdst` are ignored; `hint` supplies the
    /// DST state. UTC construction ignores the hint entirely.
    fn construct(&self, fields: &HostTm, zone: Zone, hint: DstHint) -> i64;
}

#[cfg(unix)]
pub use system::SystemHost;

#[cfg(unix)]
mod system {
    use parking_lot::Mutex;

    use super::{CalendarHost, HostTm};
    use glkdate_core::{DstHint, Timestamp, Zone};

    /// Guards the C library's time zone state and result buffers
    static HOST_LOCK: Mutex<()> = parking_lot::const_mutex(());

    extern "C" {
        fn tzset();
    }

    /// The C library calendar routines of the running process
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemHost;

    impl SystemHost {
        pub fn new() -> Self {
            SystemHost
        }
    }

    impl From<&libc::tm> for HostTm {
        fn from(tm: &libc::tm) -> Self {
            HostTm {
                year: tm.tm_year,
                mon: tm.tm_mon,
                mday: tm.tm_mday,
                wday: tm.tm_wday,
                hour: tm.tm_hour,
                min: tm.tm_min,
                sec: tm.tm_sec,
                isdst: tm.tm_isdst,
            }
        }
    }

    fn to_libc_tm(fields: &HostTm, hint: DstHint) -> libc::tm {
        // SAFETY: libc::tm is plain old data; all-zero is a valid value
        let mut tm: libc::tm = unsafe { std::mem::zeroed() };
        tm.tm_year = fields.year;
        tm.tm_mon = fields.mon;
        tm.tm_mday = fields.mday;
        tm.tm_hour = fields.hour;
        tm.tm_min = fields.min;
        tm.tm_sec = fields.sec;
        tm.tm_isdst = hint.as_isdst();
        tm
    }

    impl CalendarHost for SystemHost {
        fn wall_clock(&self) -> Option<Timestamp> {
            // SAFETY: libc::timespec is plain old data
            let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
            // SAFETY: ts is a valid, writable timespec
            if unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts) } != 0 {
                return None;
            }
            Some(Timestamp::new(ts.tv_sec as i64, (ts.tv_nsec / 1000) as i32))
        }

        fn breakdown(&self, secs: i64, zone: Zone) -> Option<HostTm> {
            let timestamp = libc::time_t::try_from(secs).ok()?;
            // SAFETY: libc::tm is plain old data
            let mut tm: libc::tm = unsafe { std::mem::zeroed() };

            let _guard = HOST_LOCK.lock();
            // SAFETY: both pointers are valid for the duration of the call
            let result = unsafe {
                match zone {
                    Zone::Utc => libc::gmtime_r(&timestamp, &mut tm),
                    Zone::Local => {
                        // localtime_r need not re-read TZ on its own
                        tzset();
                        libc::localtime_r(&timestamp, &mut tm)
                    }
                }
            };
            if result.is_null() {
                return None;
            }
            Some(HostTm::from(&tm))
        }

        fn construct(&self, fields: &HostTm, zone: Zone, hint: DstHint) -> i64 {
            let mut tm = to_libc_tm(fields, hint);

            let _guard = HOST_LOCK.lock();
            // SAFETY: tm is a valid, writable struct tm
            let timestamp = unsafe {
                match zone {
                    Zone::Utc => libc::timegm(&mut tm),
                    Zone::Local => libc::mktime(&mut tm),
                }
            };
            timestamp as i64
        }
    }
}
