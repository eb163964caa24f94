use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp into a UTC instant
///
/// Offsets are honoured and normalised to UTC; values without an offset are
/// taken as UTC. Returns `None` for anything unparseable, including empty input.
///
/// # Examples
/// ```
/// use weather_report::utils::parse_timestamp;
///
/// let ts = parse_timestamp("2006-04-01 00:00:00.000 +0200").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2006-03-31T22:00:00+00:00");
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(trimmed, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_dataset_format_with_offset() {
        let ts = parse_timestamp("2006-04-10 23:00:00.000 +0200").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2006, 4, 10, 21, 0, 0).unwrap());
    }

    #[test]
    fn test_colon_offset_and_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2016, 12, 31, 23, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2017-01-01 00:00:00 +01:00"), Some(expected));
        assert_eq!(parse_timestamp("2017-01-01T00:00:00+01:00"), Some(expected));
    }

    #[test]
    fn test_naive_values_are_utc() {
        assert_eq!(
            parse_timestamp("2020-01-02 03:04:05"),
            Some(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap())
        );
        assert_eq!(
            parse_timestamp("2020-01-01"),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2020-13-01"), None);
    }
}
