//! # Temporal Parsing
//!
//! Date-of-birth parsing for registration input. The wire format is
//! `YYYY-MM-DD`; anything else is a [`ValidationError`].

use chrono::{NaiveDate, Utc};

use crate::error::ValidationError;

/// Parse a birth date from its `YYYY-MM-DD` wire form.
///
/// `field` names the request field for the error message. Dates in the
/// future are rejected — nobody enrolling today is born tomorrow.
pub fn parse_birth_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })?;
    if date > Utc::now().date_naive() {
        return Err(ValidationError::FutureDate { field });
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_iso_date() {
        let date = parse_birth_date("dob", "1999-04-23").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1999, 4, 23));
    }

    #[test]
    fn trims_input() {
        assert!(parse_birth_date("dob", " 1999-04-23 ").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            parse_birth_date("dob", "  "),
            Err(ValidationError::EmptyField { field: "dob" })
        );
    }

    #[test]
    fn rejects_wrong_format() {
        assert!(matches!(
            parse_birth_date("dob", "23/04/1999"),
            Err(ValidationError::InvalidDate { field: "dob", .. })
        ));
    }

    #[test]
    fn rejects_impossible_date() {
        assert!(matches!(
            parse_birth_date("dob", "1999-02-30"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn rejects_future_date() {
        let next_year = Utc::now().date_naive().year() + 1;
        assert_eq!(
            parse_birth_date("dob", &format!("{next_year}-01-01")),
            Err(ValidationError::FutureDate { field: "dob" })
        );
    }
}
