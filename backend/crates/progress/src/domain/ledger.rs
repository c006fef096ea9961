//! Progress Ledger
//!
//! Synchronous bookkeeping behind the optimistic-update protocol. The ledger
//! never talks to the store: it hands out the [`ChallengeCompletion`] to
//! persist and is told afterwards how the write settled.
//!
//! Invariants:
//! - a key is rewarded at most once, and never when the store already held it
//! - the streak grows by at most one per calendar day, carried by one live
//!   completion of that day
//! - rolling back a key removes exactly what that key contributed

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeSet, HashMap};

use crate::domain::challenge_status::ChallengeStatus;
use crate::domain::entities::{ChallengeCompletion, UserProgress, UserStats};
use crate::domain::value_objects::{ChallengeKey, UserId};

/// Where an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Recorded in the store before the session loaded
    Loaded,
    /// Completed in this session
    Local,
    /// Completed in this session, but the store already held the key
    Foreign,
}

#[derive(Debug, Clone)]
struct ChallengeEntry {
    status: ChallengeStatus,
    origin: Origin,
    /// Day the completion happened on
    day: NaiveDate,
    /// Coins this key added locally
    reward: u32,
    /// This key carries the streak increment of `day`
    holds_streak: bool,
}

impl ChallengeEntry {
    /// Counts as the day's activity for streak purposes
    fn marks_day(&self, day: NaiveDate) -> bool {
        self.day == day && self.status.is_live() && self.origin != Origin::Foreign
    }
}

/// In-memory progress of one user session
#[derive(Debug, Clone)]
pub struct ProgressLedger {
    user_id: UserId,
    streak: u32,
    coins: u32,
    entries: HashMap<ChallengeKey, ChallengeEntry>,
}

impl ProgressLedger {
    /// Build the ledger from the store's view of the user
    ///
    /// `completed` are the keys recorded since the start of `today`.
    pub fn load(
        stats: &UserStats,
        completed: impl IntoIterator<Item = ChallengeKey>,
        today: NaiveDate,
    ) -> Self {
        let entries = completed
            .into_iter()
            .map(|key| {
                let entry = ChallengeEntry {
                    status: ChallengeStatus::Completed,
                    origin: Origin::Loaded,
                    day: today,
                    reward: 0,
                    holds_streak: false,
                };
                (key, entry)
            })
            .collect();

        Self {
            user_id: stats.user_id.clone(),
            streak: stats.streak,
            coins: stats.coins,
            entries,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn status(&self, key: &ChallengeKey) -> ChallengeStatus {
        self.entries
            .get(key)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    /// Optimistically complete `key`
    ///
    /// Returns the completion to persist, or `None` when the key is already
    /// pending or completed.
    pub fn begin(
        &mut self,
        key: &ChallengeKey,
        today: NaiveDate,
        reward: u32,
        now: DateTime<Utc>,
    ) -> Option<ChallengeCompletion> {
        let status = self.status(key).begin()?;

        // Decided on the state before this completion is added.
        let first_today = self.day_marker(today, None).is_none();

        self.coins = self.coins.saturating_add(reward);
        if first_today {
            self.streak = self.streak.saturating_add(1);
        }

        self.entries.insert(
            key.clone(),
            ChallengeEntry {
                status,
                origin: Origin::Local,
                day: today,
                reward,
                holds_streak: first_today,
            },
        );

        Some(ChallengeCompletion::new(
            self.user_id.clone(),
            key.clone(),
            reward,
            today,
            now,
        ))
    }

    /// The store accepted the completion
    pub fn confirm(&mut self, key: &ChallengeKey) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        match entry.status.confirm() {
            Some(status) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// The store already held `key`: it stays completed, but whatever this
    /// session added for it is taken back
    pub fn withdraw(&mut self, key: &ChallengeKey) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(status) = entry.status.confirm() else {
            return false;
        };
        entry.status = status;
        entry.origin = Origin::Foreign;
        let day = entry.day;
        let reward = std::mem::take(&mut entry.reward);
        let holds_streak = std::mem::take(&mut entry.holds_streak);

        self.give_back(key, day, reward, holds_streak);
        true
    }

    /// The store rejected the completion: undo everything `key` contributed
    pub fn roll_back(&mut self, key: &ChallengeKey) -> bool {
        let reverted = self
            .entries
            .get(key)
            .and_then(|entry| entry.status.revert());
        if reverted.is_none() {
            return false;
        }

        if let Some(entry) = self.entries.remove(key) {
            self.give_back(key, entry.day, entry.reward, entry.holds_streak);
        }
        true
    }

    pub fn snapshot(&self, today: NaiveDate) -> UserProgress {
        let mut completed_challenges = BTreeSet::new();
        let mut pending_challenges = BTreeSet::new();

        for (key, entry) in &self.entries {
            if entry.day != today || !entry.status.is_live() {
                continue;
            }
            completed_challenges.insert(key.clone());
            if entry.status == ChallengeStatus::Pending {
                pending_challenges.insert(key.clone());
            }
        }

        UserProgress {
            user_id: self.user_id.clone(),
            day: today,
            streak: self.streak,
            coins: self.coins,
            completed_challenges,
            pending_challenges,
        }
    }

    fn day_marker(&self, day: NaiveDate, except: Option<&ChallengeKey>) -> Option<&ChallengeKey> {
        self.entries
            .iter()
            .filter(|(key, _)| Some(*key) != except)
            .find(|(_, entry)| entry.marks_day(day))
            .map(|(key, _)| key)
    }

    /// Remove `key`'s contribution. The streak increment of `day` moves to
    /// another completion of that day, or is taken back when none is left.
    fn give_back(&mut self, key: &ChallengeKey, day: NaiveDate, reward: u32, holds_streak: bool) {
        self.coins = self.coins.saturating_sub(reward);
        if !holds_streak {
            return;
        }

        match self.day_marker(day, Some(key)).cloned() {
            Some(heir) => {
                if let Some(entry) = self.entries.get_mut(&heir) {
                    entry.holds_streak = true;
                }
            }
            None => {
                self.streak = self.streak.saturating_sub(1);
            }
        }
    }
}
