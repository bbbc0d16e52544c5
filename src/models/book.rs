//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::Author, genre::Genre, language::Language};

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    /// 13 character ISBN
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}

/// Book with its related records, for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
}

/// Typed book submission, after field-level cleaning.
///
/// Each of the author and language pairs carries an optional reference to an
/// existing record and an optional free-text name; both members are
/// independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookSubmission {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
    pub language_id: Option<i32>,
    pub language_name: Option<String>,
}

/// Book payload ready to be stored: author and language are concrete ids, or
/// absent when neither a reference nor a name was submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBook {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}
