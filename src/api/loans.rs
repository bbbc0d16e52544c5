//! Loan renewal endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, forms::renewal::RenewBookForm, models::BookInstance};

/// Renewal form initial values
#[derive(Serialize, ToSchema)]
pub struct RenewalProposal {
    pub instance: BookInstance,
    /// Suggested new due date
    pub proposed_renewal_date: NaiveDate,
}

/// Get a copy and the renewal date to propose for it
#[utoipa::path(
    get,
    path = "/book-instances/{id}/renew",
    tag = "loans",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Renewal proposal", body = RenewalProposal),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn get_renewal(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalProposal>> {
    let today = Local::now().date_naive();
    let (instance, proposed_renewal_date) =
        state.services.loans.renewal_proposal(id, today).await?;
    Ok(Json(RenewalProposal {
        instance,
        proposed_renewal_date,
    }))
}

/// Renew a copy: the new due date must be between today and four weeks ahead
#[utoipa::path(
    post,
    path = "/book-instances/{id}/renew",
    tag = "loans",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body = RenewBookForm,
    responses(
        (status = 200, description = "Due date updated", body = BookInstance),
        (status = 400, description = "Invalid renewal date", body = crate::error::ErrorResponse),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<RenewBookForm>,
) -> AppResult<Json<BookInstance>> {
    let today = Local::now().date_naive();
    let instance = state.services.loans.renew(id, form, today).await?;
    Ok(Json(instance))
}
