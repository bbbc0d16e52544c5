//! Language model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A natural language a book is written in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    /// Unique, e.g. "French"
    pub name: String,
}

/// Natural key of a language: the trimmed typed name, verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageKey(pub String);

impl LanguageKey {
    pub fn parse(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_only() {
        assert_eq!(LanguageKey::parse("  French  ").as_str(), "French");
        assert_eq!(LanguageKey::parse("Old  Norse").as_str(), "Old  Norse");
        assert_eq!(LanguageKey::parse("english").as_str(), "english");
    }
}
