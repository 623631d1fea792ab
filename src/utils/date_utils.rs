//! Date parsing and day arithmetic for event extracts.
//!
//! Extract dates arrive as `MM/DD/YYYY` or `MM-DD-YYYY`, sometimes followed by a
//! time of day. Parsing never fails loudly: callers get `None`, or the `-1`
//! sentinel from [`day_difference`], and decide how to degrade.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Day difference reported when either date cannot be parsed
pub const INCOMPARABLE_DAYS: i64 = -1;

/// Time formats tried after the date token of a timestamp
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%H:%M:%S%.f", "%I:%M%p"];

/// Parse a month-first date with `/` or `-` separators
///
/// Only the first whitespace-separated token is considered, so lab timestamps
/// such as `03/14/2018 07:45` parse to their calendar date.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let token = s.split_whitespace().next()?;
    split_date_parts(token, '/').or_else(|| split_date_parts(token, '-'))
}

fn split_date_parts(token: &str, separator: char) -> Option<NaiveDate> {
    let mut parts = token.split(separator);
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date with an optional trailing time of day
///
/// A missing or unreadable time falls back to midnight so ordering stays
/// day-accurate.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let mut tokens = s.split_whitespace();
    let date = parse_date(tokens.next()?)?;
    let rest = tokens.collect::<Vec<_>>().join("");

    let time = if rest.is_empty() {
        NaiveTime::MIN
    } else {
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(&rest, format).ok())
            .unwrap_or(NaiveTime::MIN)
    };

    Some(date.and_time(time))
}

/// Signed whole days from `earlier` to `later`
#[must_use]
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Signed day difference between two date strings, or `None` if either is unparsable
#[must_use]
pub fn try_day_difference(later: &str, earlier: &str) -> Option<i64> {
    Some(days_between(parse_date(later)?, parse_date(earlier)?))
}

/// Signed day difference between two date strings
///
/// Same-day dates give 0. Returns [`INCOMPARABLE_DAYS`] when either side is
/// unparsable; that value must be read as "incomparable", not as a real offset.
#[must_use]
pub fn day_difference(later: &str, earlier: &str) -> i64 {
    try_day_difference(later, earlier).unwrap_or(INCOMPARABLE_DAYS)
}

/// Whether `first` strictly precedes `second`; `false` if either is unparsable
#[must_use]
pub fn is_before(first: &str, second: &str) -> bool {
    match (parse_date(first), parse_date(second)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

/// Stable chronological sort by a date key
///
/// Items sharing a date keep their relative order. Items without a date sort
/// after every dated item.
pub fn sort_chronologically<T, F>(items: &mut [T], date_of: F)
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    items.sort_by_key(|item| {
        let date = date_of(item);
        (date.is_none(), date)
    });
}
