//! Data models for the Local Library

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;

// Re-export commonly used types
pub use author::{Author, AuthorKey};
pub use book::{Book, BookDetails, BookSubmission, ResolvedBook};
pub use book_instance::{BookInstance, LoanStatus};
pub use genre::Genre;
pub use language::{Language, LanguageKey};
