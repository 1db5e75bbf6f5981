//! Date intervals and the active date range of a reform.
//!
//! Interval keys have the form `<start>.<end>`. Ranges are resolved by
//! calendar comparison; the endpoint strings are emitted as written.

use chrono::{DateTime, NaiveDate};

use crate::error::{ReproError, ReproResult};
use crate::types::Policy;

/// Formats accepted for interval endpoints, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// One `<start>.<end>` interval key split into its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateInterval<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> DateInterval<'a> {
    /// Split an interval key on its first `.`.
    pub fn parse(key: &'a str) -> ReproResult<Self> {
        match key.split_once('.') {
            Some((start, end)) if !start.is_empty() && !end.is_empty() => {
                Ok(Self { start, end })
            }
            _ => Err(ReproError::MalformedInterval(key.to_string())),
        }
    }
}

/// Earliest start and latest end across every interval of a reform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub earliest_start: String,
    pub latest_end: String,
}

/// Parse a date endpoint as a calendar date.
pub fn parse_calendar_date(raw: &str) -> ReproResult<NaiveDate> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(date) = trimmed
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        {
            return Ok(date);
        }
    }
    Err(ReproError::InvalidDate(raw.to_string()))
}

/// Resolve the span over which a reform is active.
///
/// Returns `None` for a reform with no parameters. Ties keep the first
/// endpoint seen.
pub fn start_end_dates(policy: &Policy) -> ReproResult<Option<DateRange>> {
    let mut earliest: Option<(NaiveDate, &str)> = None;
    let mut latest: Option<(NaiveDate, &str)> = None;

    for (_, key, _) in policy.reform.updates() {
        let interval = DateInterval::parse(key)?;
        let start = parse_calendar_date(interval.start)?;
        let end = parse_calendar_date(interval.end)?;

        if earliest.map_or(true, |(current, _)| start < current) {
            earliest = Some((start, interval.start));
        }
        if latest.map_or(true, |(current, _)| end > current) {
            latest = Some((end, interval.end));
        }
    }

    Ok(earliest.zip(latest).map(|((_, start), (_, end))| DateRange {
        earliest_start: start.to_string(),
        latest_end: end.to_string(),
    }))
}
