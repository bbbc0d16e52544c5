//! Home page statistics service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::LoanStatus, repository::Repository};

/// Aggregate counts shown on the home page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IndexStats {
    pub num_books: i64,
    pub num_instances: i64,
    /// Copies with status "available"
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    /// Books whose title contains the requested text, ignoring case
    pub num_books_containing: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn index(&self, title_contains: &str) -> AppResult<IndexStats> {
        let repo = &self.repository;
        Ok(IndexStats {
            num_books: repo.books.count().await?,
            num_instances: repo.book_instances.count().await?,
            num_instances_available: repo
                .book_instances
                .count_with_status(LoanStatus::Available)
                .await?,
            num_authors: repo.authors.count().await?,
            num_genres: repo.genres.count().await?,
            num_books_containing: repo.books.count_title_contains(title_contains).await?,
        })
    }
}
