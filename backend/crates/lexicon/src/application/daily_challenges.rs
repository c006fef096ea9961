//! Daily Challenges Use Case

use crate::application::config::LexiconConfig;
use crate::domain::entities::DailyWord;
use crate::domain::repository::DailyWordRepository;
use crate::error::LexiconResult;
use chrono::NaiveDate;
use progress::models::ChallengeKey;
use serde::Serialize;
use std::sync::Arc;

/// One completable challenge of a daily word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub key: ChallengeKey,
    pub text: String,
}

/// A daily word with its challenges keyed for `day`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWordChallenges {
    pub word: DailyWord,
    pub challenges: Vec<DailyChallenge>,
}

/// Output DTO for daily challenges
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallengesOutput {
    pub day: NaiveDate,
    pub words: Vec<DailyWordChallenges>,
}

impl DailyChallengesOutput {
    pub fn keys(&self) -> impl Iterator<Item = &ChallengeKey> {
        self.words
            .iter()
            .flat_map(|w| w.challenges.iter().map(|c| &c.key))
    }
}

/// Daily Challenges Use Case
pub struct DailyChallengesUseCase<W>
where
    W: DailyWordRepository,
{
    word_repo: Arc<W>,
    config: Arc<LexiconConfig>,
}

impl<W> DailyChallengesUseCase<W>
where
    W: DailyWordRepository,
{
    pub fn new(word_repo: Arc<W>, config: Arc<LexiconConfig>) -> Self {
        Self { word_repo, config }
    }

    pub async fn execute(&self, day: NaiveDate) -> LexiconResult<DailyChallengesOutput> {
        let words = self
            .word_repo
            .latest_words(self.config.daily_word_limit)
            .await?;

        let words: Vec<DailyWordChallenges> = words
            .into_iter()
            .map(|word| {
                let challenges = word
                    .challenges
                    .iter()
                    .enumerate()
                    .map(|(index, text)| DailyChallenge {
                        key: word.challenge_key(day, index),
                        text: text.clone(),
                    })
                    .collect();
                DailyWordChallenges { word, challenges }
            })
            .collect();

        tracing::debug!(day = %day, words = words.len(), "Loaded daily challenges");

        Ok(DailyChallengesOutput { day, words })
    }
}
