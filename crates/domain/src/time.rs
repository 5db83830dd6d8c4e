use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// Source of the current local date and time.
///
/// Every computation that depends on "now" (healing states, missed workouts,
/// rest timers) takes the time from a clock, so that tests can fix it.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[must_use]
pub fn start_of_day(date_time: NaiveDateTime) -> NaiveDateTime {
    date_time.date().and_time(NaiveTime::MIN)
}

#[must_use]
pub fn end_of_day(date_time: NaiveDateTime) -> NaiveDateTime {
    start_of_day(date_time) + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

/// Return the calendar day `n` days before `date`, saturating at the earliest
/// representable date.
#[must_use]
pub fn days_ago(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

#[must_use]
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Fractional number of days from `from` to `to`, negative if `to` is earlier.
#[must_use]
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = (to - from).num_milliseconds() as f64;
    millis / MILLISECONDS_PER_DAY
}

/// Format a number of seconds like `01h 05m 09s`.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let (hours, minutes, seconds) = split_seconds(seconds);
    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

/// Format a number of seconds like `01:05:09`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let (hours, minutes, seconds) = split_seconds(seconds);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn split_seconds(seconds: u32) -> (u32, u32, u32) {
    (seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

/// Describe how many whole days ago `date_time` was.
///
/// Returns `None` for points in the future.
#[must_use]
pub fn days_ago_label(date_time: NaiveDateTime, now: NaiveDateTime) -> Option<String> {
    match (now - date_time).num_days() {
        0 if date_time <= now => Some("Today".to_string()),
        1 => Some("1 day ago".to_string()),
        days if days > 1 => Some(format!("{days} days ago")),
        _ => None,
    }
}

/// Describe in how many whole days `date_time` will be reached.
///
/// Returns `None` for points in the past.
#[must_use]
pub fn in_days_label(date_time: NaiveDateTime, now: NaiveDateTime) -> Option<String> {
    match (date_time - now).num_days() {
        0 if date_time >= now => Some("Today".to_string()),
        1 => Some("1 day from now".to_string()),
        days if days > 1 => Some(format!("{days} days from now")),
        _ => None,
    }
}
