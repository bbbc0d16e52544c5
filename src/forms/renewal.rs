//! Loan renewal form

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::{FormErrors, REQUIRED};

/// Furthest a renewal may push the due date, counted from today
pub const MAX_RENEWAL_AHEAD_DAYS: i64 = 28;

pub const INVALID_DATE: &str = "Enter a valid date.";

/// Why a renewal date was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenewalDateError {
    #[error("date in past")]
    InPast,
    #[error("date too far in future")]
    TooFarAhead,
}

/// Accept `candidate` only if `today <= candidate <= today + 4 weeks`
pub fn validate_renewal_date(
    candidate: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, RenewalDateError> {
    if candidate < today {
        return Err(RenewalDateError::InPast);
    }
    // Past the last representable date nothing can be too far ahead
    let too_far = today
        .checked_add_signed(Duration::days(MAX_RENEWAL_AHEAD_DAYS))
        .is_some_and(|limit| candidate > limit);
    if too_far {
        return Err(RenewalDateError::TooFarAhead);
    }
    Ok(candidate)
}

/// Raw renewal form as submitted
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RenewBookForm {
    /// ISO date, YYYY-MM-DD
    pub renewal_date: Option<String>,
}

impl RenewBookForm {
    /// Parse the submitted date, then check it against `today`
    pub fn clean(&self, today: NaiveDate) -> Result<NaiveDate, FormErrors> {
        let raw = self
            .renewal_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FormErrors::single("renewal_date", REQUIRED))?;

        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| FormErrors::single("renewal_date", INVALID_DATE))?;

        validate_renewal_date(date, today)
            .map_err(|e| FormErrors::single("renewal_date", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let today = today();
        assert_eq!(validate_renewal_date(today, today), Ok(today));

        let last = today + Duration::days(28);
        assert_eq!(validate_renewal_date(last, today), Ok(last));
    }

    #[test]
    fn test_past_date_rejected() {
        let today = today();
        assert_eq!(
            validate_renewal_date(today - Duration::days(1), today),
            Err(RenewalDateError::InPast)
        );
    }

    #[test]
    fn test_far_date_rejected() {
        let today = today();
        assert_eq!(
            validate_renewal_date(today + Duration::days(29), today),
            Err(RenewalDateError::TooFarAhead)
        );
    }

    #[test]
    fn test_reasons() {
        assert_eq!(RenewalDateError::InPast.to_string(), "date in past");
        assert_eq!(
            RenewalDateError::TooFarAhead.to_string(),
            "date too far in future"
        );
    }

    #[test]
    fn test_window_crosses_month_end() {
        // 2024 is a leap year: 2024-02-20 + 28 days = 2024-03-19
        let today = today();
        let edge = NaiveDate::from_ymd_opt(2024, 3, 19).unwrap();
        assert!(validate_renewal_date(edge, today).is_ok());
        assert!(validate_renewal_date(edge.succ_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_window_near_last_representable_date() {
        let today = NaiveDate::MAX - Duration::days(3);
        assert_eq!(validate_renewal_date(NaiveDate::MAX, today), Ok(NaiveDate::MAX));
        assert_eq!(
            validate_renewal_date(today - Duration::days(1), today),
            Err(RenewalDateError::InPast)
        );
    }

    #[test]
    fn test_form_parses_and_validates() {
        let form = RenewBookForm {
            renewal_date: Some(" 2024-03-01 ".into()),
        };
        assert_eq!(
            form.clean(today()),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_form_field_errors() {
        let missing = RenewBookForm::default().clean(today()).unwrap_err();
        assert_eq!(missing.for_field("renewal_date"), vec![REQUIRED]);

        let garbage = RenewBookForm {
            renewal_date: Some("next tuesday".into()),
        };
        assert_eq!(
            garbage.clean(today()).unwrap_err().for_field("renewal_date"),
            vec![INVALID_DATE]
        );

        let past = RenewBookForm {
            renewal_date: Some("2024-02-19".into()),
        };
        assert_eq!(
            past.clean(today()).unwrap_err().for_field("renewal_date"),
            vec!["date in past"]
        );
    }
}
