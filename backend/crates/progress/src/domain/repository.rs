//! Repository Traits
//!
//! Interfaces for the remote progress store and the clock. Implementations
//! are in the infrastructure layer.

use crate::domain::entities::{ChallengeCompletion, UserStats};
use crate::domain::value_objects::{ChallengeKey, UserId};
use crate::error::ProgressResult;
use chrono::{DateTime, Utc};

/// Remote persistence for user stats and completed challenges
///
/// Every call may fail; the tracker converts failures into rollbacks.
#[trait_variant::make(ProgressStore: Send)]
pub trait LocalProgressStore {
    /// Fetch the stats record for a user, `None` if absent
    async fn fetch_user_stats(&self, user_id: &UserId) -> ProgressResult<Option<UserStats>>;

    /// Create a zeroed stats record if none exists
    ///
    /// Returns `true` when a record was created. Stores without an atomic
    /// create-if-absent primitive may create duplicates when two sessions
    /// start at the same time.
    async fn create_user_stats(&self, user_id: &UserId) -> ProgressResult<bool>;

    /// Challenge keys completed at or after `since`
    async fn fetch_completed_challenges(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> ProgressResult<Vec<ChallengeKey>>;

    /// Record a completion and apply its reward
    ///
    /// The streak grows by one when this is the user's first recorded
    /// completion on `completion.day`, decided atomically with the insert.
    /// Returns `ProgressError::AlreadyRecorded` when the key is already stored.
    async fn record_completed_challenge(&self, completion: &ChallengeCompletion)
    -> ProgressResult<()>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
