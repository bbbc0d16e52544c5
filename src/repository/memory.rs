//! In-memory author and language store
//!
//! Used where no database is available. The whole lookup-then-insert runs
//! under one lock, so concurrent calls with the same key never duplicate.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{AuthorStore, LanguageStore};
use crate::{
    error::AppResult,
    models::{Author, AuthorKey, Language, LanguageKey},
};

#[derive(Default)]
struct Tables {
    authors: Vec<Author>,
    languages: Vec<Language>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn authors(&self) -> Vec<Author> {
        self.tables.lock().await.authors.clone()
    }

    pub async fn languages(&self) -> Vec<Language> {
        self.tables.lock().await.languages.clone()
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn find_or_create(&self, key: &AuthorKey) -> AppResult<Author> {
        let mut tables = self.tables.lock().await;
        if let Some(author) = tables
            .authors
            .iter()
            .find(|a| a.first_name == key.first_name && a.last_name == key.last_name)
        {
            return Ok(author.clone());
        }

        let author = Author {
            id: tables.authors.len() as i32 + 1,
            first_name: key.first_name.clone(),
            last_name: key.last_name.clone(),
            date_of_birth: None,
            date_of_death: None,
        };
        tracing::info!("Created author {} in memory store", author.id);
        tables.authors.push(author.clone());
        Ok(author)
    }
}

#[async_trait]
impl LanguageStore for MemoryStore {
    async fn find_or_create(&self, key: &LanguageKey) -> AppResult<Language> {
        let mut tables = self.tables.lock().await;
        if let Some(language) = tables.languages.iter().find(|l| l.name == key.as_str()) {
            return Ok(language.clone());
        }

        let language = Language {
            id: tables.languages.len() as i32 + 1,
            name: key.as_str().to_string(),
        };
        tables.languages.push(language.clone());
        Ok(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_author_find_or_create_is_idempotent() {
        let store = MemoryStore::new();
        let key = AuthorKey::new("Jane", "Doe");

        let first = AuthorStore::find_or_create(&store, &key).await.unwrap();
        let second = AuthorStore::find_or_create(&store, &key).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.authors().await.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_create_distinct_authors() {
        let store = MemoryStore::new();
        let a = AuthorStore::find_or_create(&store, &AuthorKey::new("Jane", "Doe"))
            .await
            .unwrap();
        let b = AuthorStore::find_or_create(&store, &AuthorKey::new("Jane", ""))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_find_or_create_converges() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let author = AuthorStore::find_or_create(&store, &AuthorKey::new("Ada", "Lovelace"))
                    .await
                    .unwrap();
                let language = LanguageStore::find_or_create(&store, &LanguageKey::parse("English"))
                    .await
                    .unwrap();
                (author.id, language.id)
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert!(ids.iter().all(|pair| *pair == ids[0]));
        assert_eq!(store.authors().await.len(), 1);
        assert_eq!(store.languages().await.len(), 1);
    }
}
