//! Temporal values decoded from count-based columns.
//!
//! Every type here stores the raw count exactly as it appears in the column, together
//! with its unit. The `chrono` conversions are views over that count and return `None`
//! when the value cannot be represented (for example a day count beyond chrono's
//! supported calendar range, or a time of day outside `[00:00, 24:00)`).

use std::fmt;

use arrow_schema::TimeUnit;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const MILLIS_PER_DAY: i64 = 86_400_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

/// Number of nanoseconds in one tick of `unit`.
pub fn unit_nanos(unit: TimeUnit) -> i128 {
    match unit {
        TimeUnit::Second => 1_000_000_000,
        TimeUnit::Millisecond => 1_000_000,
        TimeUnit::Microsecond => 1_000,
        TimeUnit::Nanosecond => 1,
    }
}

/// Short unit suffix used when a value is printed as a raw count.
pub fn unit_suffix(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Second => "s",
        TimeUnit::Millisecond => "ms",
        TimeUnit::Microsecond => "us",
        TimeUnit::Nanosecond => "ns",
    }
}

fn subsecond_format(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Second => "",
        TimeUnit::Millisecond => "%.3f",
        TimeUnit::Microsecond => "%.6f",
        TimeUnit::Nanosecond => "%.9f",
    }
}

/// Splits a count of `unit` ticks since the epoch into whole seconds and nanoseconds.
fn split_epoch_count(value: i64, unit: TimeUnit) -> Option<(i64, u32)> {
    let nanos = i128::from(value) * unit_nanos(unit);
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    Some((secs, subsec))
}

/// A calendar date stored as a signed day count since 1970-01-01.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date32 {
    days: i32,
}

impl Date32 {
    pub const fn new(days: i32) -> Date32 {
        Date32 { days }
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        self.days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }
}

impl fmt::Display for Date32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive_date() {
            Some(date) => write!(f, "{date}"),
            None => write!(f, "{}d", self.days),
        }
    }
}

/// An instant stored as a signed millisecond count since the epoch, used for
/// millisecond-resolution date columns.
///
/// Well-formed values are multiples of one day, but this is not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date64 {
    millis: i64,
}

impl Date64 {
    pub const fn new(millis: i64) -> Date64 {
        Date64 { millis }
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.millis)
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        self.to_datetime().map(|dt| dt.date_naive())
    }
}

impl fmt::Display for Date64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) if self.millis % MILLIS_PER_DAY == 0 => write!(f, "{}", dt.date_naive()),
            Some(dt) => write!(f, "{}", dt.naive_utc().format("%Y-%m-%dT%H:%M:%S%.3f")),
            None => write!(f, "{}ms", self.millis),
        }
    }
}

/// A point in time stored as a count of `unit` ticks since the epoch.
///
/// The timezone is column metadata: when present, the count denotes a UTC instant;
/// when absent, it denotes a wall-clock reading with no zone attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp<'a> {
    value: i64,
    unit: TimeUnit,
    timezone: Option<&'a str>,
}

impl<'a> Timestamp<'a> {
    pub const fn new(value: i64, unit: TimeUnit, timezone: Option<&'a str>) -> Timestamp<'a> {
        Timestamp {
            value,
            unit,
            timezone,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn timezone(&self) -> Option<&'a str> {
        self.timezone
    }

    /// Total nanoseconds since the epoch; never overflows.
    pub fn nanos_since_epoch(&self) -> i128 {
        i128::from(self.value) * unit_nanos(self.unit)
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let (secs, nanos) = split_epoch_count(self.value, self.unit)?;
        DateTime::from_timestamp(secs, nanos)
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        self.to_utc().map(|dt| dt.naive_utc())
    }
}

impl fmt::Display for Timestamp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(naive) = self.to_naive() else {
            return write!(f, "{}{}", self.value, unit_suffix(self.unit));
        };
        let pattern = format!("%Y-%m-%dT%H:%M:%S{}", subsecond_format(self.unit));
        write!(f, "{}", naive.format(&pattern))?;
        if self.timezone.is_some() {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// A time of day stored as a count of `unit` ticks since midnight.
///
/// Values outside of a single day are kept as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    value: i64,
    unit: TimeUnit,
}

impl TimeOfDay {
    pub const fn new(value: i64, unit: TimeUnit) -> TimeOfDay {
        TimeOfDay { value, unit }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn nanos_since_midnight(&self) -> i128 {
        i128::from(self.value) * unit_nanos(self.unit)
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let nanos = self.nanos_since_midnight();
        if !(0..NANOS_PER_DAY).contains(&nanos) {
            return None;
        }
        NaiveTime::from_num_seconds_from_midnight_opt(
            (nanos / NANOS_PER_SECOND) as u32,
            (nanos % NANOS_PER_SECOND) as u32,
        )
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive_time() {
            Some(time) => {
                let pattern = format!("%H:%M:%S{}", subsecond_format(self.unit));
                write!(f, "{}", time.format(&pattern))
            }
            None => write!(f, "{}{}", self.value, unit_suffix(self.unit)),
        }
    }
}

/// An elapsed time stored as a count of `unit` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Duration {
    value: i64,
    unit: TimeUnit,
}

impl Duration {
    pub const fn new(value: i64, unit: TimeUnit) -> Duration {
        Duration { value, unit }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        match self.unit {
            TimeUnit::Second => TimeDelta::try_seconds(self.value),
            TimeUnit::Millisecond => TimeDelta::try_milliseconds(self.value),
            TimeUnit::Microsecond => Some(TimeDelta::microseconds(self.value)),
            TimeUnit::Nanosecond => Some(TimeDelta::nanoseconds(self.value)),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, unit_suffix(self.unit))
    }
}
