//! Strict calendar date parsing
//!
//! Dates travel as `YYYY-MM-DD` text at every boundary. chrono's `%Y-%m-%d`
//! alone accepts unpadded fields such as `2024-1-5`, so the shape is checked
//! before handing the string to chrono for calendar validation.

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};

/// The only accepted textual date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date, naming `field` in the error
pub fn parse_date(field: &'static str, value: &str) -> TallyResult<NaiveDate> {
    if !has_date_shape(value) {
        return Err(TallyError::invalid_date(field, value));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| TallyError::invalid_date(field, value))
}

/// Parse an optional bound: blank means absent, anything else must be a date
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> TallyResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(field, s).map(Some),
    }
}

/// Render a date in the canonical `YYYY-MM-DD` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_date("date", "2024-01-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(parse_date("date", "2024-02-29").is_ok());
        assert!(parse_date("date", "2023-02-29").is_err());
    }

    #[test]
    fn test_rejects_invalid_dates() {
        for bad in ["2024-13-40", "not-a-date", "2024-1-5", "24-01-05", "2024/01/05", ""] {
            let err = parse_date("from", bad).unwrap_err();
            assert!(
                matches!(err, TallyError::InvalidDateFormat { field: "from", .. }),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(parse_optional_date("to", None).unwrap(), None);
        assert_eq!(parse_optional_date("to", Some("   ")).unwrap(), None);
        assert!(parse_optional_date("to", Some("2024-01-06")).unwrap().is_some());
        assert!(parse_optional_date("to", Some("2024-02-30")).is_err());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "2024-03-09");
    }
}
