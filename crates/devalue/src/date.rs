//! ISO 8601 date text as written by JavaScript's `Date.prototype.toISOString`.
//!
//! Years 0 through 9999 use the plain RFC 3339 form. Other years use the
//! expanded form: a sign and six digits, as in `+010000-01-01T00:00:00.000Z`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        return date.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    format!(
        "{}{:06}-{}",
        if year < 0 { '-' } else { '+' },
        year.unsigned_abs(),
        date.format("%m-%dT%H:%M:%S%.3fZ")
    )
}

pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let expanded = match text.as_bytes().first() {
        Some(b'+') => Some((1, &text[1..])),
        Some(b'-') => Some((-1, &text[1..])),
        _ => None,
    };
    let Some((sign, rest)) = expanded else {
        return DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|d| d.with_timezone(&Utc));
    };

    let digits = rest.get(..6)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = sign * digits.parse::<i32>().ok()?;
    let (day, time) = rest.get(6..)?.strip_prefix('-')?.split_once('T')?;
    let (month, day) = day.split_once('-')?;
    if month.len() != 2 || day.len() != 2 {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)?;
    let time = NaiveTime::parse_from_str(time.strip_suffix('Z')?, "%H:%M:%S%.f").ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}
