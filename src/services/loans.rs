//! Loan renewal service

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::{
    config::LoansConfig,
    error::AppResult,
    forms::renewal::RenewBookForm,
    models::BookInstance,
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    /// Get a copy together with the renewal date to propose for it
    pub async fn renewal_proposal(
        &self,
        instance_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<(BookInstance, NaiveDate)> {
        let instance = self.repository.book_instances.get_by_id(instance_id).await?;
        Ok((instance, self.proposed_renewal_date(today)))
    }

    pub fn proposed_renewal_date(&self, today: NaiveDate) -> NaiveDate {
        proposed_renewal_date(today, self.config.proposed_renewal_weeks)
    }

    /// Validate a renewal form against `today` and move the due date
    pub async fn renew(
        &self,
        instance_id: Uuid,
        form: RenewBookForm,
        today: NaiveDate,
    ) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(instance_id).await?;

        let due_back = form.clean(today)?;
        let instance = self
            .repository
            .book_instances
            .set_due_back(instance_id, due_back)
            .await?;

        tracing::info!("Renewed book instance {} until {}", instance_id, due_back);
        Ok(instance)
    }
}

/// `today + weeks`, falling back to `today` when that date cannot be represented
pub fn proposed_renewal_date(today: NaiveDate, weeks: i64) -> NaiveDate {
    Duration::try_weeks(weeks)
        .and_then(|offset| today.checked_add_signed(offset))
        .unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::renewal::validate_renewal_date;

    #[test]
    fn test_default_proposal_is_accepted() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        let proposed = proposed_renewal_date(today, 3);
        assert_eq!(proposed, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert_eq!(validate_renewal_date(proposed, today), Ok(proposed));
    }

    #[test]
    fn test_proposal_does_not_overflow() {
        let today = NaiveDate::MAX - Duration::days(1);
        assert_eq!(proposed_renewal_date(today, 4), today);
        assert_eq!(proposed_renewal_date(today, i64::MAX), today);
    }
}
