//! Book create/edit form
//!
//! Besides picking an existing author or language, a submitter may type a
//! name; the matching record is looked up, or created on first use.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{clean_optional_text, FormErrors, REQUIRED};
use crate::{
    error::AppResult,
    models::{AuthorKey, BookSubmission, LanguageKey, ResolvedBook},
    repository::{AuthorStore, LanguageStore},
};

/// Column widths of `authors.first_name` / `authors.last_name`
pub const MAX_AUTHOR_NAME_PART: usize = 100;
/// Column width of `languages.name`
pub const MAX_LANGUAGE_NAME: usize = 200;

/// Raw book form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Ensure this value has at most 1000 characters."))]
    pub summary: String,
    /// 13 character ISBN
    #[serde(default)]
    #[validate(length(max = 13, message = "Ensure this value has at most 13 characters."))]
    pub isbn: String,
    /// Genre ids, at least one
    #[serde(default)]
    pub genre: Vec<i32>,
    /// Existing author id
    pub author: Option<i32>,
    /// Author to use or create when no existing author is selected,
    /// "First Last" or "Last, First"
    pub author_name: Option<String>,
    /// Existing language id
    pub language: Option<i32>,
    /// Language to use or create when no existing language is selected
    pub language_name: Option<String>,
}

impl BookForm {
    /// Field-level cleaning: normalize, check required fields, check
    /// constraints. Every failure of these stages is reported at once.
    pub fn clean(mut self) -> Result<BookSubmission, FormErrors> {
        self.normalize();

        let mut errors = FormErrors::default();
        self.check_required(&mut errors);
        if let Err(e) = self.validate() {
            errors.extend_from_validator(e);
        }
        self.check_typed_names(&mut errors);
        errors.into_result()?;

        Ok(BookSubmission {
            title: self.title,
            summary: self.summary,
            isbn: self.isbn,
            genre_ids: self.genre,
            author_id: self.author,
            author_name: self.author_name,
            language_id: self.language,
            language_name: self.language_name,
        })
    }

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.summary = self.summary.trim().to_string();
        self.isbn = self.isbn.trim().to_string();
        self.author_name = clean_optional_text(self.author_name.take());
        self.language_name = clean_optional_text(self.language_name.take());

        let mut seen = Vec::with_capacity(self.genre.len());
        self.genre.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
    }

    fn check_required(&self, errors: &mut FormErrors) {
        if self.title.is_empty() {
            errors.add("title", REQUIRED);
        }
        if self.summary.is_empty() {
            errors.add("summary", REQUIRED);
        }
        if self.isbn.is_empty() {
            errors.add("isbn", REQUIRED);
        }
        if self.genre.is_empty() {
            errors.add("genre", REQUIRED);
        }
    }

    /// Typed names only matter when no record is selected; their parsed
    /// parts must fit the stored columns
    fn check_typed_names(&self, errors: &mut FormErrors) {
        if let (None, Some(name)) = (self.author, self.author_name.as_deref()) {
            let key = AuthorKey::parse(name);
            let longest = key.first_name.chars().count().max(key.last_name.chars().count());
            if longest > MAX_AUTHOR_NAME_PART {
                errors.add(
                    "author_name",
                    format!(
                        "Ensure first and last names have at most {} characters each.",
                        MAX_AUTHOR_NAME_PART
                    ),
                );
            }
        }
        if let (None, Some(name)) = (self.language, self.language_name.as_deref()) {
            if LanguageKey::parse(name).as_str().chars().count() > MAX_LANGUAGE_NAME {
                errors.add(
                    "language_name",
                    format!("Ensure this value has at most {} characters.", MAX_LANGUAGE_NAME),
                );
            }
        }
    }
}

/// Resolve the author and language of a cleaned submission to stored records.
///
/// For each pair, a selected record wins and its typed name is ignored;
/// otherwise a typed name is looked up and created if missing; otherwise the
/// field stays empty. Store failures are returned unchanged.
pub async fn resolve(
    submission: BookSubmission,
    authors: &dyn AuthorStore,
    languages: &dyn LanguageStore,
) -> AppResult<ResolvedBook> {
    let author_id = match (submission.author_id, submission.author_name.as_deref()) {
        (Some(id), _) => Some(id),
        (None, Some(name)) if !name.trim().is_empty() => {
            let key = AuthorKey::parse(name);
            tracing::debug!(
                "Resolving author {:?} as first_name={:?}, last_name={:?}",
                name,
                key.first_name,
                key.last_name
            );
            Some(authors.find_or_create(&key).await?.id)
        }
        _ => None,
    };

    let language_id = match (submission.language_id, submission.language_name.as_deref()) {
        (Some(id), _) => Some(id),
        (None, Some(name)) if !name.trim().is_empty() => {
            let key = LanguageKey::parse(name);
            tracing::debug!("Resolving language {:?}", key.as_str());
            Some(languages.find_or_create(&key).await?.id)
        }
        _ => None,
    };

    Ok(ResolvedBook {
        title: submission.title,
        summary: submission.summary,
        isbn: submission.isbn,
        genre_ids: submission.genre_ids,
        author_id,
        language_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{Author, Language},
        repository::{memory::MemoryStore, MockAuthorStore, MockLanguageStore},
    };

    fn form() -> BookForm {
        BookForm {
            title: "The Left Hand of Darkness".into(),
            summary: "An envoy visits the planet Gethen.".into(),
            isbn: "9780441478125".into(),
            genre: vec![1],
            ..Default::default()
        }
    }

    fn submission() -> BookSubmission {
        form().clean().unwrap()
    }

    #[test]
    fn test_clean_reports_all_missing_fields() {
        let errors = BookForm::default().clean().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "summary", "isbn", "genre"]);
        assert!(errors.iter().all(|e| e.message == REQUIRED));
    }

    #[test]
    fn test_clean_treats_blank_as_missing() {
        let errors = BookForm {
            title: "   ".into(),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert_eq!(errors.for_field("title"), vec![REQUIRED]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_clean_checks_lengths_after_trimming() {
        let ok = BookForm {
            isbn: "  9780441478125  ".into(),
            ..form()
        }
        .clean()
        .unwrap();
        assert_eq!(ok.isbn, "9780441478125");

        let errors = BookForm {
            isbn: "97804414781250".into(),
            title: "x".repeat(201),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert_eq!(
            errors.for_field("isbn"),
            vec!["Ensure this value has at most 13 characters."]
        );
        assert_eq!(
            errors.for_field("title"),
            vec!["Ensure this value has at most 200 characters."]
        );
    }

    #[test]
    fn test_clean_normalizes_optional_names_and_genres() {
        let cleaned = BookForm {
            author_name: Some("   ".into()),
            language_name: Some("  French  ".into()),
            genre: vec![2, 1, 2],
            ..form()
        }
        .clean()
        .unwrap();
        assert_eq!(cleaned.author_name, None);
        assert_eq!(cleaned.language_name.as_deref(), Some("French"));
        assert_eq!(cleaned.genre_ids, vec![2, 1]);
    }

    #[test]
    fn test_clean_rejects_typed_names_wider_than_columns() {
        let errors = BookForm {
            author_name: Some("A".repeat(101)),
            language_name: Some("L".repeat(201)),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("author_name").len(), 1);
        assert_eq!(errors.for_field("language_name").len(), 1);

        let long_last = BookForm {
            author_name: Some(format!("{}, Jane", "D".repeat(101))),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert_eq!(long_last.for_field("author_name").len(), 1);
    }

    #[test]
    fn test_clean_accepts_typed_names_at_column_width() {
        let cleaned = BookForm {
            author_name: Some(format!("{} {}", "F".repeat(100), "L".repeat(100))),
            language_name: Some(format!("  {}  ", "L".repeat(200))),
            ..form()
        }
        .clean()
        .unwrap();
        assert_eq!(cleaned.language_name.map(|n| n.len()), Some(200));
    }

    #[test]
    fn test_clean_ignores_long_names_when_records_are_selected() {
        let cleaned = BookForm {
            author: Some(1),
            author_name: Some("A".repeat(300)),
            language: Some(2),
            language_name: Some("L".repeat(300)),
            ..form()
        }
        .clean()
        .unwrap();
        assert_eq!(cleaned.author_id, Some(1));
        assert_eq!(cleaned.language_id, Some(2));
    }

    #[tokio::test]
    async fn test_existing_references_skip_the_store() {
        let mut authors = MockAuthorStore::new();
        authors.expect_find_or_create().never();
        let mut languages = MockLanguageStore::new();
        languages.expect_find_or_create().never();

        let resolved = resolve(
            BookSubmission {
                author_id: Some(7),
                author_name: Some(",,, not a name".into()),
                language_id: Some(3),
                language_name: Some("Klingon".into()),
                ..submission()
            },
            &authors,
            &languages,
        )
        .await
        .unwrap();

        assert_eq!(resolved.author_id, Some(7));
        assert_eq!(resolved.language_id, Some(3));
    }

    #[tokio::test]
    async fn test_nothing_supplied_leaves_fields_empty() {
        let mut authors = MockAuthorStore::new();
        authors.expect_find_or_create().never();
        let mut languages = MockLanguageStore::new();
        languages.expect_find_or_create().never();

        let resolved = resolve(submission(), &authors, &languages).await.unwrap();
        assert_eq!(resolved.author_id, None);
        assert_eq!(resolved.language_id, None);
        assert_eq!(resolved.title, "The Left Hand of Darkness");
        assert_eq!(resolved.genre_ids, vec![1]);
    }

    #[tokio::test]
    async fn test_typed_names_are_parsed_into_keys() {
        let mut authors = MockAuthorStore::new();
        authors
            .expect_find_or_create()
            .withf(|key| key.first_name == "Ursula K." && key.last_name == "Le Guin")
            .times(1)
            .returning(|key| {
                Ok(Author {
                    id: 11,
                    first_name: key.first_name.clone(),
                    last_name: key.last_name.clone(),
                    date_of_birth: None,
                    date_of_death: None,
                })
            });
        let mut languages = MockLanguageStore::new();
        languages
            .expect_find_or_create()
            .withf(|key| key.as_str() == "English")
            .times(1)
            .returning(|key| {
                Ok(Language {
                    id: 4,
                    name: key.as_str().to_string(),
                })
            });

        let resolved = resolve(
            BookSubmission {
                author_name: Some("Le Guin, Ursula K.".into()),
                language_name: Some(" English ".into()),
                ..submission()
            },
            &authors,
            &languages,
        )
        .await
        .unwrap();

        assert_eq!(resolved.author_id, Some(11));
        assert_eq!(resolved.language_id, Some(4));
    }

    #[tokio::test]
    async fn test_pairs_resolve_independently() {
        let store = MemoryStore::new();

        let resolved = resolve(
            BookSubmission {
                author_id: Some(42),
                language_name: Some("French".into()),
                ..submission()
            },
            &store,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(resolved.author_id, Some(42));
        assert!(resolved.language_id.is_some());
        assert!(store.authors().await.is_empty());
        assert_eq!(store.languages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_resolving_twice_reuses_records() {
        let store = MemoryStore::new();
        let typed = BookSubmission {
            author_name: Some("Mary Jane Watson".into()),
            language_name: Some("  French  ".into()),
            ..submission()
        };

        let first = resolve(typed.clone(), &store, &store).await.unwrap();
        let second = resolve(typed, &store, &store).await.unwrap();

        assert_eq!(first.author_id, second.author_id);
        assert_eq!(first.language_id, second.language_id);

        let authors = store.authors().await;
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].first_name, "Mary");
        assert_eq!(authors[0].last_name, "Jane Watson");
        assert_eq!(store.languages().await[0].name, "French");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut authors = MockAuthorStore::new();
        authors
            .expect_find_or_create()
            .returning(|_| Err(AppError::Internal("connection reset".into())));
        let mut languages = MockLanguageStore::new();
        languages.expect_find_or_create().never();

        let result = resolve(
            BookSubmission {
                author_name: Some("Cher".into()),
                ..submission()
            },
            &authors,
            &languages,
        )
        .await;

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg == "connection reset"));
    }
}
