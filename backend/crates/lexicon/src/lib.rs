//! Lexicon Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Dictionary entries, daily words, tips, selection logic
//! - `application/` - Use cases
//! - `infra/` - Postgres and in-memory repositories
//!
//! Daily challenges are keyed with `progress::models::ChallengeKey`, so a
//! challenge listed here can be passed straight to the progress tracker.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::LexiconConfig;
pub use application::daily_challenges::{DailyChallengesOutput, DailyChallengesUseCase};
pub use application::daily_tip::DailyTipUseCase;
pub use application::search_dictionary::SearchDictionaryUseCase;
pub use application::seed::{SeedLexiconUseCase, SeedReport};
pub use error::{LexiconError, LexiconResult};
pub use infra::{InMemoryLexicon, PgLexiconRepository};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::services::DictionaryFilter;
    pub use crate::domain::value_objects::*;
}

#[cfg(test)]
mod tests;
