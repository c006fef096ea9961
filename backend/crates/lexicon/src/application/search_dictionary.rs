//! Search Dictionary Use Case

use crate::domain::entities::DictionaryEntry;
use crate::domain::repository::DictionaryRepository;
use crate::domain::services::{DictionaryFilter, filter_entries};
use crate::error::LexiconResult;
use std::sync::Arc;

/// Search Dictionary Use Case
pub struct SearchDictionaryUseCase<R>
where
    R: DictionaryRepository,
{
    dictionary_repo: Arc<R>,
}

impl<R> SearchDictionaryUseCase<R>
where
    R: DictionaryRepository,
{
    pub fn new(dictionary_repo: Arc<R>) -> Self {
        Self { dictionary_repo }
    }

    pub async fn execute(&self, filter: &DictionaryFilter) -> LexiconResult<Vec<DictionaryEntry>> {
        let entries = self.dictionary_repo.list_entries().await?;
        let total = entries.len();
        let matched = filter_entries(entries, filter);

        tracing::debug!(
            term = ?filter.term,
            difficulty = ?filter.difficulty.map(|d| d.level()),
            total,
            matched = matched.len(),
            "Dictionary searched"
        );

        Ok(matched)
    }
}
