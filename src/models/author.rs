//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    /// May be empty for single-name authors
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Natural key of an author: two authors with the same pair are the same author
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorKey {
    pub first_name: String,
    pub last_name: String,
}

impl AuthorKey {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Derive a key from typed text.
    ///
    /// "Last, First" splits on the first comma; otherwise the first
    /// whitespace-separated token is the first name and the remaining tokens,
    /// joined by single spaces, form the last name.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some((last, first)) = text.split_once(',') {
            return Self::new(first.trim(), last.trim());
        }

        let mut tokens = text.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        let rest: Vec<&str> = tokens.collect();
        Self::new(first, rest.join(" "))
    }
}
