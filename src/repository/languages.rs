//! Languages repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LanguageStore;
use crate::{
    error::{AppError, AppResult},
    models::{Language, LanguageKey},
};

#[derive(Clone)]
pub struct LanguagesRepository {
    pool: Pool<Postgres>,
}

impl LanguagesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get language by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language with id {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM languages WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn list(&self) -> AppResult<Vec<Language>> {
        let rows = sqlx::query_as::<_, Language>("SELECT * FROM languages ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl LanguageStore for LanguagesRepository {
    async fn find_or_create(&self, key: &LanguageKey) -> AppResult<Language> {
        let created = sqlx::query_as::<_, Language>(
            r#"
            INSERT INTO languages (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(language) = created {
            tracing::info!("Created language {} ({:?})", language.id, language.name);
            return Ok(language);
        }

        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE name = $1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Language {:?} vanished after insert conflict",
                    key.as_str()
                ))
            })
    }
}
