//! Working out today's date for date validation.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset of a canonical timezone, e.g. "Asia/Kathmandu".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Resolve the offset used for "today".
///
/// A configured timezone must be valid. Without one the system's local offset
/// is used, falling back to UTC when it cannot be determined.
///
/// # Errors
///
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known
/// timezone name.
pub fn resolve_offset(canonical_timezone: Option<&str>) -> Result<UtcOffset, Error> {
    match canonical_timezone {
        Some(name) => {
            get_local_offset(name).ok_or_else(|| Error::InvalidTimezone(name.to_owned()))
        }
        None => Ok(UtcOffset::current_local_offset().unwrap_or_else(|_| {
            tracing::warn!("could not determine the local UTC offset, using UTC");
            UtcOffset::UTC
        })),
    }
}

/// Today's date at `offset`.
pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

/// A source for the current date.
pub trait Clock {
    /// The current date.
    fn today(&self) -> Date;
}

/// The wall clock at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Create a clock for the timezone at `offset`.
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        today(self.offset)
    }
}

/// A date is a clock that is stuck on that date.
impl Clock for Date {
    fn today(&self) -> Date {
        *self
    }
}
