use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Rendering used for every date leaving the API, e.g. `Sun Jan 15 2023`.
pub const DATE_STRING_FORMAT: &str = "%a %b %d %Y";

/// ISO date-times without an offset. They are read as UTC.
const LOCAL_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", DATE_STRING_FORMAT];

/// Parse a caller-supplied date or date-time into a UTC instant.
///
/// Accepted forms:
/// - RFC 3339 timestamps with an offset, converted to UTC
/// - ISO date-times without an offset (`2023-02-01T10:00:00`, `2023-02-01T10:00`)
/// - `YYYY-MM-DD`, `MM/DD/YYYY`, `Month DD, YYYY` and the API's own rendered form
/// - reduced ISO dates `YYYY-MM` and `YYYY`, meaning the first day of the period
///
/// Date-only forms resolve to midnight UTC.
pub fn parse_calendar_instant(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc).naive_utc());
    }

    if let Some(instant) = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return Some(instant);
    }

    parse_date_only(input).map(start_of_day)
}

/// Parse a caller-supplied calendar date, keeping the UTC day of any time component.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    parse_calendar_instant(input).map(|instant| instant.date())
}

fn parse_date_only(input: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
    {
        return Some(date);
    }

    match input.len() {
        7 if input.as_bytes()[4] == b'-' => {
            NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d").ok()
        }
        4 if input.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(input.parse().ok()?, 1, 1)
        }
        _ => None,
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn to_date_string(date: NaiveDate) -> String {
    date.format(DATE_STRING_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
