//! Books repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{Book, ResolvedBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a book and its genre links
    pub async fn create(&self, book: &ResolvedBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| duplicate_isbn(e, &book.isbn))?;

        Self::sync_genres(&mut tx, row.id, &book.genre_ids).await?;
        tx.commit().await?;

        Ok(row)
    }

    /// Replace every field of a book, genre links included
    pub async fn update(&self, id: i32, book: &ResolvedBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, summary = $2, isbn = $3, author_id = $4, language_id = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| duplicate_isbn(e, &book.isbn))?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Self::sync_genres(&mut tx, id, &book.genre_ids).await?;
        tx.commit().await?;

        Ok(row)
    }

    async fn sync_genres(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        genre_ids: &[i32],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut **tx)
            .await?;

        for genre_id in genre_ids {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(book_id)
            .bind(genre_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books whose title contains `needle`, ignoring case
    pub async fn count_title_contains(&self, needle: &str) -> AppResult<i64> {
        let pattern = format!("%{}%", escape_like(needle));
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE $1 ESCAPE '\\'")
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

/// Translate a unique violation on `isbn` into a conflict
fn duplicate_isbn(e: sqlx::Error, isbn: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return AppError::Conflict(format!("A book with ISBN {} already exists", isbn));
        }
    }
    AppError::Database(e)
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
