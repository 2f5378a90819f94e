use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const MAX_TIMESPAN_DAYS: i64 = 10_000_000;

/// Parses a `[a, "b", c]` style list into its trimmed, non-empty elements.
///
/// Surrounding brackets are optional. Each element is trimmed of whitespace and
/// of surrounding double quotes; elements that end up empty are dropped.
pub fn parse_delimited_list(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(|item| item.trim().trim_matches('"'))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

/// Accepts RFC 3339, a handful of naive layouts (read as UTC) and bare dates.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses `[-][d.]hh:mm:ss[.fffffff]`.
pub fn parse_timespan(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut parts = body.split(':');
    let (head, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (days.parse::<i64>().ok()?, hours.parse::<i64>().ok()?),
        None => (0, head.parse::<i64>().ok()?),
    };
    let minutes = minutes.parse::<i64>().ok()?;
    let (whole, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole.parse::<i64>().ok()?, fraction),
        None => (seconds.parse::<i64>().ok()?, ""),
    };
    if days > MAX_TIMESPAN_DAYS || hours > 23 || minutes > 59 || whole > 59 {
        return None;
    }

    let nanos = if fraction.is_empty() {
        0
    } else {
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let digits: String = fraction.chars().chain(std::iter::repeat('0')).take(9).collect();
        digits.parse::<i64>().ok()?
    };

    let total = TimeDelta::days(days)
        + TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(whole)
        + TimeDelta::nanoseconds(nanos);

    Some(if negative { -total } else { total })
}

pub fn format_timespan(span: &TimeDelta) -> String {
    let negative = *span < TimeDelta::zero();
    let sign = if negative { "-" } else { "" };
    let span = if negative { -*span } else { *span };
    let days = span.num_days();
    let hours = span.num_hours() % 24;
    let minutes = span.num_minutes() % 60;
    let seconds = span.num_seconds() % 60;
    let nanos = span.subsec_nanos();

    let mut out = String::from(sign);
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if nanos > 0 {
        out.push_str(&format!(".{:07}", nanos / 100));
    }
    out
}
