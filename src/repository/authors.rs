//! Authors repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::AuthorStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorKey},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// List all authors, ordered for display
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    /// Insert the author unless the (first_name, last_name) pair exists, then
    /// read it back. The unique constraint makes concurrent inserts of the
    /// same pair collapse into one row.
    async fn find_or_create(&self, key: &AuthorKey) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name)
            VALUES ($1, $2)
            ON CONFLICT (first_name, last_name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&key.first_name)
        .bind(&key.last_name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(author) = created {
            tracing::info!(
                "Created author {} (first_name={:?}, last_name={:?})",
                author.id,
                author.first_name,
                author.last_name
            );
            return Ok(author);
        }

        sqlx::query_as::<_, Author>(
            "SELECT * FROM authors WHERE first_name = $1 AND last_name = $2",
        )
        .bind(&key.first_name)
        .bind(&key.last_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Author {:?} {:?} vanished after insert conflict",
                key.first_name, key.last_name
            ))
        })
    }
}
