//! Command Handlers

use anyhow::Context;
use kernel::error::app_error::AppError;
use lexicon::domain::repository::{
    DailyTipRepository, DailyWordRepository, DictionaryRepository, SeedRepository,
};
use lexicon::models::{Difficulty, DictionaryFilter};
use lexicon::{
    DailyChallengesUseCase, DailyTipUseCase, LexiconConfig, LexiconError, SearchDictionaryUseCase,
    SeedLexiconUseCase,
};
use progress::models::UserProgress;
use progress::{ProgressConfig, ProgressError, ProgressStore, ProgressTracker};
use serde::Serialize;
use std::sync::Arc;

use crate::Commands;

pub struct App<S, L>
where
    S: ProgressStore,
    L: DictionaryRepository + DailyWordRepository + DailyTipRepository + SeedRepository,
{
    store: Arc<S>,
    lexicon: Arc<L>,
    progress_config: Arc<ProgressConfig>,
    lexicon_config: Arc<LexiconConfig>,
    json: bool,
}

impl<S, L> App<S, L>
where
    S: ProgressStore,
    L: DictionaryRepository + DailyWordRepository + DailyTipRepository + SeedRepository,
{
    pub fn new(
        store: Arc<S>,
        lexicon: Arc<L>,
        progress_config: Arc<ProgressConfig>,
        lexicon_config: Arc<LexiconConfig>,
        json: bool,
    ) -> Self {
        Self {
            store,
            lexicon,
            progress_config,
            lexicon_config,
            json,
        }
    }

    pub async fn run(&self, user: Option<&str>, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Search { term, difficulty } => self.search(term, difficulty).await,
            Commands::Seed => self.seed().await,
            Commands::Status | Commands::Daily | Commands::Complete { .. } => {
                let user = user.context("--user or VOCAB_USER_ID is required")?;
                self.with_session(user, command).await
            }
        }
    }

    async fn with_session(&self, user: &str, command: Commands) -> anyhow::Result<()> {
        let tracker = ProgressTracker::new(self.store.clone(), self.progress_config.clone());
        let mut events = tracker.subscribe();

        let progress = tracker.initialize(user).await.map_err(progress_failure)?;

        let result = match command {
            Commands::Complete { challenge_id } => {
                match tracker.complete_challenge(&challenge_id).await {
                    Ok(progress) => self.print_progress(&progress),
                    Err(err) => Err(progress_failure(err)),
                }
            }
            Commands::Daily => self.daily(&progress).await,
            _ => self.print_progress(&progress),
        };

        tracker.end_session();
        while let Ok(event) = events.try_recv() {
            tracing::debug!(?event, "Progress event");
        }

        result
    }

    async fn daily(&self, progress: &UserProgress) -> anyhow::Result<()> {
        let daily = DailyChallengesUseCase::new(self.lexicon.clone(), self.lexicon_config.clone())
            .execute(progress.day)
            .await
            .map_err(lexicon_failure)?;
        let tip = DailyTipUseCase::new(self.lexicon.clone())
            .execute(progress.day)
            .await
            .map_err(lexicon_failure)?;

        if self.json {
            return print_json(&serde_json::json!({
                "progress": progress,
                "daily": daily,
                "tip": tip,
            }));
        }

        println!("{}", status_line(progress));
        if let Some(tip) = tip {
            println!("\n{}: {}", tip.tip_type, tip.tip_text);
        }
        for entry in &daily.words {
            println!("\n{} - {}", entry.word.word, entry.word.definition);
            for challenge in &entry.challenges {
                let mark = if progress.is_completed(&challenge.key) {
                    "x"
                } else {
                    " "
                };
                println!("  [{mark}] {}  {}", challenge.key, challenge.text);
            }
        }
        Ok(())
    }

    async fn search(&self, term: Option<String>, difficulty: Option<u8>) -> anyhow::Result<()> {
        let difficulty = difficulty
            .map(|level| {
                Difficulty::new(level).ok_or(LexiconError::InvalidDifficulty(i32::from(level)))
            })
            .transpose()
            .map_err(lexicon_failure)?;

        let filter = DictionaryFilter::new(term, difficulty);
        let entries = SearchDictionaryUseCase::new(self.lexicon.clone())
            .execute(&filter)
            .await
            .map_err(lexicon_failure)?;

        if self.json {
            return print_json(&entries);
        }

        if entries.is_empty() {
            println!("No words found");
        }
        for entry in &entries {
            println!("{} ({}) - {}", entry.word, entry.difficulty, entry.definition);
        }
        Ok(())
    }

    async fn seed(&self) -> anyhow::Result<()> {
        let report = SeedLexiconUseCase::new(self.lexicon.clone())
            .execute()
            .await
            .map_err(lexicon_failure)?;

        if report.is_empty() {
            println!("Lexicon already populated");
        } else {
            println!(
                "Inserted {} dictionary entries, {} daily words, {} tips",
                report.entries, report.words, report.tips
            );
        }
        Ok(())
    }

    fn print_progress(&self, progress: &UserProgress) -> anyhow::Result<()> {
        if self.json {
            return print_json(progress);
        }

        println!("{}", status_line(progress));
        for key in &progress.completed_challenges {
            println!("  [x] {key}");
        }
        Ok(())
    }
}

fn status_line(progress: &UserProgress) -> String {
    format!(
        "{} on {}: streak {}, coins {}, {} completed today",
        progress.user_id,
        progress.day,
        progress.streak,
        progress.coins,
        progress.completed_count()
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Rolled-back completions are already logged by the tracker.
fn progress_failure(err: ProgressError) -> anyhow::Error {
    anyhow::anyhow!(AppError::from(err).user_message())
}

fn lexicon_failure(err: LexiconError) -> anyhow::Error {
    err.log();
    anyhow::anyhow!(AppError::from(err).user_message())
}
