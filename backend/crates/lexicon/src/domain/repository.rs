//! Repository Traits
//!
//! Interfaces for lexicon persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entities::{DailyTip, DailyWord, DictionaryEntry, LexiconSeed, NewDailyWord};
use crate::error::LexiconResult;

/// Dictionary repository trait
#[trait_variant::make(DictionaryRepository: Send)]
pub trait LocalDictionaryRepository {
    /// All entries ordered by word
    async fn list_entries(&self) -> LexiconResult<Vec<DictionaryEntry>>;

    /// Insert an entry
    async fn insert_entry(&self, entry: &DictionaryEntry) -> LexiconResult<()>;
}

/// Daily word repository trait
#[trait_variant::make(DailyWordRepository: Send)]
pub trait LocalDailyWordRepository {
    /// Most recently published words, newest first
    async fn latest_words(&self, limit: usize) -> LexiconResult<Vec<DailyWord>>;

    /// Publish a word; the store assigns its id and timestamp
    async fn insert_word(&self, word: &NewDailyWord) -> LexiconResult<DailyWord>;
}

/// Daily tip repository trait
#[trait_variant::make(DailyTipRepository: Send)]
pub trait LocalDailyTipRepository {
    /// Active tips in a stable order
    async fn active_tips(&self) -> LexiconResult<Vec<DailyTip>>;
}

/// Bulk loading of starter content
#[trait_variant::make(SeedRepository: Send)]
pub trait LocalSeedRepository {
    /// Whether the dictionary, daily words or tips hold any row
    async fn has_content(&self) -> LexiconResult<bool>;

    /// Insert every row of `seed`, or none of them on failure
    async fn insert_seed(&self, seed: &LexiconSeed) -> LexiconResult<()>;
}
