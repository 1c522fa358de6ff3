use chrono::{DateTime, Local, NaiveDateTime, Utc};
use miette::Diagnostic;
use std::fmt::Write;
use thiserror::Error;

const MINUTE: i64 = 60;
const HOUR: i64 = 3600;
const DAY: i64 = 86400;
const WEEK: i64 = 604800;

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum TimeError {
    #[error("Unparseable timestamp: '{0}'")]
    #[diagnostic(
        code(postboard::time::unparseable),
        help("Expected an ISO 8601 date/time such as 2024-05-01T12:30:00")
    )]
    Unparseable(String),
}

/// Parses the timestamps the server emits.
///
/// RFC 3339 values carry their own offset. Naive values (the server's
/// `isoformat()` of a column without zone info) are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeError::Unparseable(raw.to_string()))
}

/// Coarse "time ago" text, or `None` once the age reaches a week.
/// Future timestamps count as zero seconds old.
pub fn format_relative(diff_secs: i64) -> Option<String> {
    match diff_secs.max(0) {
        d if d < MINUTE => Some(format_unit(d, "sec")),
        d if d < HOUR => Some(format_unit(d / MINUTE, "min")),
        d if d < DAY => Some(format_unit(d / HOUR, "hr")),
        d if d < WEEK => Some(format_unit(d / DAY, "day")),
        _ => None,
    }
}

pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>, date_format: &str) -> String {
    let elapsed = now.signed_duration_since(then).num_seconds();

    format_relative(elapsed).unwrap_or_else(|| absolute_date(then, date_format))
}

/// Local calendar date. A malformed pattern falls back to the default one.
fn absolute_date(then: DateTime<Utc>, date_format: &str) -> String {
    let local = then.with_timezone(&Local);
    let mut out = String::new();

    if write!(out, "{}", local.format(date_format)).is_err() {
        log::warn!("invalid date_format '{}', using default", date_format);
        out.clear();
        let _ = write!(out, "{}", local.format(DEFAULT_DATE_FORMAT));
    }

    out
}

pub fn label_for(raw: &str, now: DateTime<Utc>, date_format: &str) -> Result<String, TimeError> {
    let then = parse_timestamp(raw)?;
    Ok(relative_label(then, now, date_format))
}

fn format_unit(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn label_at(elapsed: i64) -> String {
        relative_label(now() - Duration::seconds(elapsed), now(), DEFAULT_DATE_FORMAT)
    }

    #[test]
    fn test_seconds_tier() {
        assert_eq!(label_at(0), "0 secs ago");
        assert_eq!(label_at(1), "1 sec ago");
        assert_eq!(label_at(2), "2 secs ago");
        assert_eq!(label_at(59), "59 secs ago");
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(label_at(60), "1 min ago");
        assert_eq!(label_at(119), "1 min ago");
        assert_eq!(label_at(3599), "59 mins ago");
        assert_eq!(label_at(3600), "1 hr ago");
        assert_eq!(label_at(86399), "23 hrs ago");
        assert_eq!(label_at(86400), "1 day ago");
        assert_eq!(label_at(604799), "6 days ago");
    }

    #[test]
    fn test_week_old_uses_absolute_date() {
        let then = now() - Duration::seconds(WEEK);
        let expected = then.with_timezone(&Local).format(DEFAULT_DATE_FORMAT).to_string();
        assert_eq!(relative_label(then, now(), DEFAULT_DATE_FORMAT), expected);
        assert_eq!(format_relative(WEEK), None);
    }

    #[test]
    fn test_custom_date_format() {
        let then = now() - Duration::days(30);
        let label = relative_label(then, now(), "%Y");
        assert_eq!(label, then.with_timezone(&Local).format("%Y").to_string());
    }

    #[test]
    fn test_bad_date_format_falls_back() {
        let then = now() - Duration::days(30);
        let expected = then.with_timezone(&Local).format(DEFAULT_DATE_FORMAT).to_string();
        assert_eq!(relative_label(then, now(), "%Q"), expected);
    }

    #[test]
    fn test_future_timestamp_clamps_to_zero() {
        assert_eq!(label_at(-30), "0 secs ago");
        assert_eq!(format_relative(-100_000), Some("0 secs ago".to_string()));
    }

    #[test]
    fn test_sub_second_elapsed_floors() {
        let then = now() - Duration::milliseconds(1999);
        assert_eq!(relative_label(then, now(), DEFAULT_DATE_FORMAT), "1 sec ago");
    }

    #[test]
    fn test_monotonic_within_tier() {
        for (start, end, step) in [
            (0, MINUTE, 1),
            (MINUTE, HOUR, 37),
            (HOUR, DAY, 601),
            (DAY, WEEK, 3607),
        ] {
            let mut last = 0;
            for e in (start..end).step_by(step) {
                let label = label_at(e);
                let n: i64 = label.split(' ').next().unwrap().parse().unwrap();
                assert!(n >= last, "{} < {} at e={}", n, last, e);
                last = n;
            }
        }
    }

    #[test]
    fn test_parse_naive_iso() {
        let dt = parse_timestamp("2024-06-15T11:59:00.123456").unwrap();
        assert_eq!(label_for("2024-06-15T11:59:00", now(), "%Y").unwrap(), "1 min ago");
        assert_eq!(label_for("2024-06-15T11:59:00.5", now(), "%Y").unwrap(), "59 secs ago");
        assert_eq!(dt.timestamp(), now().timestamp() - 60);
    }

    #[test]
    fn test_parse_with_offset() {
        let dt = parse_timestamp("2024-06-15T13:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_space_separated() {
        assert!(parse_timestamp("2024-06-15 11:00:00").is_ok());
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_timestamp("yesterday-ish").unwrap_err();
        assert_eq!(err, TimeError::Unparseable("yesterday-ish".to_string()));
    }
}
