//! Domain Entities
//!
//! Core records of the progress domain.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CompletionId, UserStatsId};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::value_objects::{ChallengeKey, UserId};

/// Remote stats record, one per user
#[derive(Debug, Clone)]
pub struct UserStats {
    pub id: UserStatsId,
    pub user_id: UserId,
    pub streak: u32,
    pub coins: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    /// Fresh record with zero streak and coins
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: UserStatsId::new(),
            user_id,
            streak: 0,
            coins: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One newly completed challenge, as written to the store
///
/// The store adds `reward` to the user's coins and bumps the streak when no
/// other completion is recorded for the same `day`.
#[derive(Debug, Clone)]
pub struct ChallengeCompletion {
    pub id: CompletionId,
    pub user_id: UserId,
    pub challenge_key: ChallengeKey,
    pub reward: u32,
    /// Local calendar day of `completed_at`
    pub day: NaiveDate,
    pub completed_at: DateTime<Utc>,
}

impl ChallengeCompletion {
    pub fn new(
        user_id: UserId,
        challenge_key: ChallengeKey,
        reward: u32,
        day: NaiveDate,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CompletionId::new(),
            user_id,
            challenge_key,
            reward,
            day,
            completed_at,
        }
    }
}

/// Read-only snapshot of a user's progress for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: UserId,
    /// Calendar day the snapshot was taken for
    pub day: NaiveDate,
    pub streak: u32,
    pub coins: u32,
    /// Completed today, optimistic completions included
    pub completed_challenges: BTreeSet<ChallengeKey>,
    /// Subset of `completed_challenges` still awaiting confirmation
    pub pending_challenges: BTreeSet<ChallengeKey>,
}

impl UserProgress {
    pub fn is_completed(&self, key: &ChallengeKey) -> bool {
        self.completed_challenges.contains(key)
    }

    pub fn is_pending(&self, key: &ChallengeKey) -> bool {
        self.pending_challenges.contains(key)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_challenges.len()
    }
}
