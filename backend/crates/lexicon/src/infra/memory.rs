//! In-Memory Repository Implementation

use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{DailyTip, DailyWord, DictionaryEntry, LexiconSeed, NewDailyWord};
use crate::domain::repository::{
    DailyTipRepository, DailyWordRepository, DictionaryRepository, SeedRepository,
};
use crate::error::{LexiconError, LexiconResult};

#[derive(Default, Clone)]
struct LexiconState {
    entries: Vec<DictionaryEntry>,
    words: Vec<DailyWord>,
    tips: Vec<DailyTip>,
    last_word_id: i64,
}

/// In-memory lexicon for tests and offline sessions
#[derive(Default)]
pub struct InMemoryLexicon {
    state: Mutex<LexiconState>,
    /// Seed rows accepted before the write fails
    seed_failure: Mutex<Option<usize>>,
}

impl InMemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next seed writes after `rows` rows, as if the connection dropped
    pub fn fail_seed_after(&self, rows: usize) {
        *lock(&self.seed_failure) = Some(rows);
    }

    pub fn clear_failures(&self) {
        *lock(&self.seed_failure) = None;
    }

    fn lock(&self) -> MutexGuard<'_, LexiconState> {
        lock(&self.state)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(state: &mut LexiconState, word: &NewDailyWord) -> DailyWord {
    state.last_word_id += 1;
    let stored = DailyWord {
        id: state.last_word_id,
        word: word.word.clone(),
        definition: word.definition.clone(),
        challenges: word.challenges.clone(),
        dictionary_id: word.dictionary_id,
        created_at: Utc::now(),
    };
    state.words.push(stored.clone());
    stored
}

impl DictionaryRepository for InMemoryLexicon {
    async fn list_entries(&self) -> LexiconResult<Vec<DictionaryEntry>> {
        let mut entries = self.lock().entries.clone();
        entries.sort_by(|a, b| a.word.cmp(&b.word));
        Ok(entries)
    }

    async fn insert_entry(&self, entry: &DictionaryEntry) -> LexiconResult<()> {
        self.lock().entries.push(entry.clone());
        Ok(())
    }
}

impl DailyWordRepository for InMemoryLexicon {
    async fn latest_words(&self, limit: usize) -> LexiconResult<Vec<DailyWord>> {
        let mut words = self.lock().words.clone();
        words.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        words.truncate(limit);
        Ok(words)
    }

    async fn insert_word(&self, word: &NewDailyWord) -> LexiconResult<DailyWord> {
        Ok(publish(&mut self.lock(), word))
    }
}

impl DailyTipRepository for InMemoryLexicon {
    async fn active_tips(&self) -> LexiconResult<Vec<DailyTip>> {
        Ok(self
            .lock()
            .tips
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }
}

impl SeedRepository for InMemoryLexicon {
    async fn has_content(&self) -> LexiconResult<bool> {
        let state = self.lock();
        Ok(!state.entries.is_empty() || !state.words.is_empty() || !state.tips.is_empty())
    }

    async fn insert_seed(&self, seed: &LexiconSeed) -> LexiconResult<()> {
        let budget = *lock(&self.seed_failure);
        let mut written = 0;
        let mut write_row = || {
            written += 1;
            match budget {
                Some(rows) if written > rows => Err(LexiconError::Database(sqlx::Error::PoolClosed)),
                _ => Ok(()),
            }
        };

        // Staged on a copy so a failure leaves the lexicon untouched.
        let mut state = self.lock();
        let mut staged = state.clone();
        for entry in &seed.entries {
            write_row()?;
            staged.entries.push(entry.clone());
        }
        for word in &seed.words {
            write_row()?;
            publish(&mut staged, word);
        }
        for tip in &seed.tips {
            write_row()?;
            staged.tips.push(tip.clone());
        }

        *state = staged;
        Ok(())
    }
}
