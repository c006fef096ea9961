//! In-Memory Store Implementation
//!
//! Mutex-guarded store used by tests and offline sessions. Supports
//! injected failures and optional latency so in-flight behavior can be
//! observed.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::entities::{ChallengeCompletion, UserStats};
use crate::domain::repository::ProgressStore;
use crate::domain::value_objects::{ChallengeKey, UserId};
use crate::error::{ProgressError, ProgressResult};

#[derive(Default)]
struct MemoryState {
    stats: HashMap<UserId, UserStats>,
    completions: Vec<ChallengeCompletion>,
}

/// In-memory progress store
#[derive(Default)]
pub struct InMemoryProgressStore {
    state: Mutex<MemoryState>,
    failing_keys: Mutex<HashSet<ChallengeKey>>,
    unavailable: AtomicBool,
    latency: Option<Duration>,
    create_calls: AtomicUsize,
    record_calls: AtomicUsize,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every record write by `latency`
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Make writes for `key` fail as if the store were unreachable
    pub fn fail_record_of(&self, key: &ChallengeKey) {
        lock(&self.failing_keys).insert(key.clone());
    }

    pub fn clear_failures(&self) {
        lock(&self.failing_keys).clear();
        self.unavailable.store(false, Ordering::SeqCst);
    }

    /// Fail every call until cleared
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn record_calls(&self) -> usize {
        self.record_calls.load(Ordering::SeqCst)
    }

    /// Number of stats records held for `user_id` (0 or 1)
    pub fn stats_records(&self, user_id: &UserId) -> usize {
        usize::from(lock(&self.state).stats.contains_key(user_id))
    }

    pub fn completion_count(&self, user_id: &UserId) -> usize {
        lock(&self.state)
            .completions
            .iter()
            .filter(|c| &c.user_id == user_id)
            .count()
    }

    fn check_available(&self) -> ProgressResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProgressError::StoreUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ProgressStore for InMemoryProgressStore {
    async fn fetch_user_stats(&self, user_id: &UserId) -> ProgressResult<Option<UserStats>> {
        self.check_available()?;
        Ok(lock(&self.state).stats.get(user_id).cloned())
    }

    async fn create_user_stats(&self, user_id: &UserId) -> ProgressResult<bool> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut state = lock(&self.state);
        if state.stats.contains_key(user_id) {
            return Ok(false);
        }
        state
            .stats
            .insert(user_id.clone(), UserStats::new(user_id.clone()));

        tracing::debug!(user_id = %user_id, "User stats created");
        Ok(true)
    }

    async fn fetch_completed_challenges(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> ProgressResult<Vec<ChallengeKey>> {
        self.check_available()?;

        let state = lock(&self.state);
        let mut completions: Vec<&ChallengeCompletion> = state
            .completions
            .iter()
            .filter(|c| &c.user_id == user_id && c.completed_at >= since)
            .collect();
        completions.sort_by_key(|c| c.completed_at);

        Ok(completions
            .into_iter()
            .map(|c| c.challenge_key.clone())
            .collect())
    }

    async fn record_completed_challenge(
        &self,
        completion: &ChallengeCompletion,
    ) -> ProgressResult<()> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.check_available()?;
        if lock(&self.failing_keys).contains(&completion.challenge_key) {
            return Err(ProgressError::StoreUnavailable(format!(
                "write of {} rejected",
                completion.challenge_key
            )));
        }

        let mut state = lock(&self.state);
        let duplicate = state.completions.iter().any(|c| {
            c.user_id == completion.user_id && c.challenge_key == completion.challenge_key
        });
        if duplicate {
            return Err(ProgressError::AlreadyRecorded(
                completion.challenge_key.clone(),
            ));
        }

        let first_of_day = !state
            .completions
            .iter()
            .any(|c| c.user_id == completion.user_id && c.day == completion.day);

        let stats = state
            .stats
            .get_mut(&completion.user_id)
            .ok_or_else(|| {
                ProgressError::Internal(format!("no stats record for {}", completion.user_id))
            })?;
        stats.coins = stats.coins.saturating_add(completion.reward);
        stats.streak = stats.streak.saturating_add(u32::from(first_of_day));
        stats.updated_at = completion.completed_at;

        state.completions.push(completion.clone());
        Ok(())
    }
}
