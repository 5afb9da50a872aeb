use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};

/// Parses an RFC 3339 / ISO-8601 instant carrying an explicit offset
/// (`2020-06-28T08:18:56Z`, `2020-06-28T10:18:56+02:00`) into a BSON date.
///
/// BSON dates hold milliseconds since the epoch; finer precision is truncated.
pub fn parse_iso8601(date: &str) -> Result<bson::DateTime> {
    let instant = DateTime::parse_from_rfc3339(date)?;
    Ok(bson::DateTime::from_chrono(instant.with_timezone(&Utc)))
}

/// Formats `date` in UTC with a `Z` suffix, showing milliseconds only when
/// they are not zero.
pub fn format_iso8601(date: bson::DateTime) -> String {
    let instant: DateTime<Utc> = date.to_chrono();
    if instant.timestamp_subsec_millis() == 0 {
        instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    } else {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;

    #[test]
    fn test_parse_utc_literal() {
        let date = parse_iso8601("2020-06-28T08:18:56Z").unwrap();
        let expected = Utc.with_ymd_and_hms(2020, 6, 28, 8, 18, 56).unwrap();
        assert_eq!(date.to_chrono(), expected);
        assert_eq!(date.timestamp_millis(), 1_593_332_336_000);
    }

    #[test]
    fn test_round_trip() {
        let literal = "2020-06-28T08:18:56Z";
        assert_eq!(format_iso8601(parse_iso8601(literal).unwrap()), literal);
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let date = parse_iso8601("2020-06-28T10:18:56+02:00").unwrap();
        assert_eq!(format_iso8601(date), "2020-06-28T08:18:56Z");
    }

    #[test]
    fn test_millis_are_kept() {
        let date = parse_iso8601("2020-06-28T08:18:56.250Z").unwrap();
        assert_eq!(format_iso8601(date), "2020-06-28T08:18:56.250Z");
    }

    #[test]
    fn test_malformed_literal() {
        for literal in ["2020-06-28", "2020-06-28T08:18:56", "28/06/2020 08:18", ""] {
            let err = parse_iso8601(literal).unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "{} should not parse", literal);
        }
    }
}
