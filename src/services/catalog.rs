//! Catalog service: books and the records they reference

use crate::{
    error::AppResult,
    forms::{
        book::{resolve, BookForm},
        FormErrors,
    },
    models::{Author, Book, BookDetails, BookSubmission, Genre, Language},
    repository::Repository,
};

const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a book with its author, language and genres
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;
        self.details(book).await
    }

    /// Validate a submitted book form and create the book
    pub async fn create_book(&self, form: BookForm) -> AppResult<BookDetails> {
        let submission = self.clean_book_form(form).await?;
        let resolved = resolve(
            submission,
            &self.repository.authors,
            &self.repository.languages,
        )
        .await?;

        let book = self.repository.books.create(&resolved).await?;
        tracing::info!("Created book {} ({:?})", book.id, book.title);
        self.details(book).await
    }

    /// Validate a submitted book form and replace an existing book with it
    pub async fn update_book(&self, id: i32, form: BookForm) -> AppResult<BookDetails> {
        // 404 before reporting form errors
        self.repository.books.get_by_id(id).await?;

        let submission = self.clean_book_form(form).await?;
        let resolved = resolve(
            submission,
            &self.repository.authors,
            &self.repository.languages,
        )
        .await?;

        let book = self.repository.books.update(id, &resolved).await?;
        tracing::info!("Updated book {}", book.id);
        self.details(book).await
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list().await
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Field cleaning, then checks that every selected record exists
    async fn clean_book_form(&self, form: BookForm) -> AppResult<BookSubmission> {
        let submission = form.clean()?;

        let mut errors = FormErrors::default();
        if let Some(id) = submission.author_id {
            if !self.repository.authors.exists(id).await? {
                errors.add("author", INVALID_CHOICE);
            }
        }
        if let Some(id) = submission.language_id {
            if !self.repository.languages.exists(id).await? {
                errors.add("language", INVALID_CHOICE);
            }
        }
        for id in self.repository.genres.missing_ids(&submission.genre_ids).await? {
            errors.add(
                "genre",
                format!("Select a valid choice. {} is not one of the available choices.", id),
            );
        }
        errors.into_result()?;

        Ok(submission)
    }

    async fn details(&self, book: Book) -> AppResult<BookDetails> {
        let author = match book.author_id {
            Some(id) => Some(self.repository.authors.get_by_id(id).await?),
            None => None,
        };
        let language = match book.language_id {
            Some(id) => Some(self.repository.languages.get_by_id(id).await?),
            None => None,
        };
        let genres = self.repository.genres.for_book(book.id).await?;

        Ok(BookDetails {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            language,
            genres,
        })
    }
}
