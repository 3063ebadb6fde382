//! Query time-window resolution.
//!
//! Tool callers supply time bounds loosely: explicit ISO 8601 strings,
//! or separate year/month/day and "HH:MM" fragments, or nothing at all.
//! This module turns any of those into a validated `[start, end)` UTC
//! interval, bounded to a fixed past/future horizon so a single tool
//! call cannot sweep unbounded history out of the upstream API.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Oldest permitted window start, relative to now (inclusive).
pub const MAX_PAST_DAYS: i64 = 10;

/// Furthest permitted window end, relative to now (inclusive).
pub const MAX_FUTURE_HOURS: i64 = 24;

/// Output format: second precision, literal `Z` designator.
const ISO_Z: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Errors from window resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// A supplied timestamp string is not ISO 8601.
    #[error("unrecognized timestamp {0:?}")]
    InvalidFormat(String),

    /// The year/month/day or HH:MM fragments do not form a valid date/time.
    #[error("invalid calendar components: {0}")]
    InvalidCalendarComponents(String),

    /// Window starts more than 10 days in the past.
    #[error("start is more than 10 days in the past")]
    RangeTooOld,

    /// Window ends more than 24 hours in the future.
    #[error("end is more than 24 hours in the future")]
    RangeTooFuture,

    /// Window end is not after its start.
    #[error("end must be after start")]
    InvertedRange,
}

/// A validated UTC query window.
///
/// Invariants (enforced at construction, relative to the `now` passed in):
/// `end > start`, `start >= now - 10 days`, `end <= now + 24 hours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    fn validated(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, WindowError> {
        if start < now - Duration::days(MAX_PAST_DAYS) {
            return Err(WindowError::RangeTooOld);
        }
        if end > now + Duration::hours(MAX_FUTURE_HOURS) {
            return Err(WindowError::RangeTooFuture);
        }
        if end <= start {
            return Err(WindowError::InvertedRange);
        }
        Ok(Self { start, end })
    }

    /// The default window when no temporal input is given: now ± 1 hour.
    fn around(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::hours(1),
            end: now + Duration::hours(1),
        }
    }

    /// Returns the window start.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the window end.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Window start as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn start_iso(&self) -> String {
        self.start.format(ISO_Z).to_string()
    }

    /// Window end as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn end_iso(&self) -> String {
        self.end.format(ISO_Z).to_string()
    }
}

/// Decomposed temporal input: calendar and time-of-day fragments.
///
/// Each field defaults independently. A caller may fix the year and let
/// month and day follow the current UTC date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParts {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Time of day for the window start, "HH:MM". Defaults to 00:00:00.
    pub start_time: Option<String>,
    /// Time of day for the window end, "HH:MM". Defaults to 23:59:59.
    pub end_time: Option<String>,
}

impl DateParts {
    /// True when no fragment was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }
}

/// Parse an ISO 8601 timestamp, assuming UTC when no offset is present.
///
/// Accepts a trailing literal `Z` as the UTC designator.
fn parse_utc(s: &str) -> Result<DateTime<Utc>, WindowError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    s.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|_| WindowError::InvalidFormat(s.to_string()))
}

/// Parse a "HH:MM" fragment into a time of day.
fn parse_hhmm(s: &str) -> Result<NaiveTime, WindowError> {
    let invalid = || WindowError::InvalidCalendarComponents(format!("expected HH:MM, got {s:?}"));
    let (h, m) = s.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = h.trim().parse().map_err(|_| invalid())?;
    let minute: u32 = m.trim().parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Resolve a window from optional explicit ISO 8601 bounds.
///
/// A missing start defaults to `now - 1h`; a missing end to `now + 1h`.
pub fn resolve_explicit(
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TimeWindow, WindowError> {
    let start = match start {
        Some(s) => parse_utc(s)?,
        None => now - Duration::hours(1),
    };
    let end = match end {
        Some(s) => parse_utc(s)?,
        None => now + Duration::hours(1),
    };
    TimeWindow::validated(start, end, now)
}

/// Resolve a window from decomposed calendar fragments.
///
/// With all five fragments absent this short-circuits to the same ±1h
/// default as [`resolve_explicit`] without constructing a calendar date.
pub fn resolve_decomposed(
    parts: &DateParts,
    now: DateTime<Utc>,
) -> Result<TimeWindow, WindowError> {
    if parts.is_empty() {
        let window = TimeWindow::around(now);
        return TimeWindow::validated(window.start, window.end, now);
    }

    let today = now.date_naive();
    let year = parts.year.unwrap_or_else(|| today.year());
    let month = parts.month.unwrap_or_else(|| today.month());
    let day = parts.day.unwrap_or_else(|| today.day());

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        WindowError::InvalidCalendarComponents(format!(
            "{year:04}-{month:02}-{day:02} is not a valid date"
        ))
    })?;

    let start_time = match &parts.start_time {
        Some(s) => parse_hhmm(s)?,
        None => NaiveTime::MIN,
    };
    let end_time = match &parts.end_time {
        Some(s) => parse_hhmm(s)?,
        // Last representable second of the day.
        None => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
    };

    let start = date.and_time(start_time).and_utc();
    let end = date.and_time(end_time).and_utc();
    TimeWindow::validated(start, end, now)
}
