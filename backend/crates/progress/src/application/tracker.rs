//! Progress Tracker
//!
//! Session-scoped owner of a user's progress. Every completion is applied
//! locally first, then written to the store; a rejected write is rolled back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::application::config::ProgressConfig;
use crate::domain::entities::UserProgress;
use crate::domain::ledger::ProgressLedger;
use crate::domain::repository::{Clock, ProgressStore};
use crate::domain::services::{day_of, day_start};
use crate::domain::value_objects::{ChallengeKey, UserId};
use crate::error::{ProgressError, ProgressResult};
use crate::infra::clock::SystemClock;

/// Notification pushed to subscribers after state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    Initialized(UserProgress),
    Updated(UserProgress),
    CompletionFailed {
        challenge_id: ChallengeKey,
        message: String,
    },
    SessionEnded {
        user_id: UserId,
    },
}

struct Session {
    generation: u64,
    ledger: ProgressLedger,
}

#[derive(Default)]
struct TrackerState {
    session: Option<Session>,
    /// Bumped on every initialize so late settlements can be told apart
    generation: u64,
}

/// How a store write ended for the active session
enum Settlement {
    Confirmed(UserProgress),
    /// The store already held the key, so this session's award was withdrawn
    Withdrawn(UserProgress),
    RolledBack(UserProgress),
    /// The session changed while the write was in flight
    Stale,
}

/// Progress Tracker
pub struct ProgressTracker<S>
where
    S: ProgressStore,
{
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: Arc<ProgressConfig>,
    state: Mutex<TrackerState>,
    events: broadcast::Sender<ProgressEvent>,
}

impl<S> ProgressTracker<S>
where
    S: ProgressStore,
{
    pub fn new(store: Arc<S>, config: Arc<ProgressConfig>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>, config: Arc<ProgressConfig>) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            store,
            clock,
            config,
            state: Mutex::new(TrackerState::default()),
            events,
        }
    }

    /// Start (or reload) the session for `user_id`
    ///
    /// Creates the user's stats record when the store has none. Calling this
    /// again for the same user reloads from the store; another user is
    /// rejected until [`end_session`](Self::end_session).
    pub async fn initialize(&self, user_id: &str) -> ProgressResult<UserProgress> {
        let user_id = UserId::new(user_id)?;
        self.ensure_same_user(&user_id)?;

        let stats = match self.store.fetch_user_stats(&user_id).await? {
            Some(stats) => stats,
            None => {
                let created = self.store.create_user_stats(&user_id).await?;
                tracing::debug!(user_id = %user_id, created, "No stats record, created one");
                self.store
                    .fetch_user_stats(&user_id)
                    .await?
                    .ok_or_else(|| {
                        ProgressError::Internal(format!("stats for {user_id} missing after create"))
                    })?
            }
        };

        let now = self.clock.now();
        let today = self.today_at(now);
        let since = day_start(today, self.config.utc_offset);
        let completed = self
            .store
            .fetch_completed_challenges(&user_id, since)
            .await?;

        let ledger = ProgressLedger::load(&stats, completed, today);
        let snapshot = ledger.snapshot(today);

        {
            let mut state = self.lock();
            // Another user may have signed in while the store was loading.
            if let Some(active) = &state.session {
                if active.ledger.user_id() != &user_id {
                    return Err(ProgressError::SessionUserMismatch {
                        active: active.ledger.user_id().clone(),
                        requested: user_id,
                    });
                }
            }
            state.generation += 1;
            let generation = state.generation;
            state.session = Some(Session { generation, ledger });
        }

        tracing::info!(
            user_id = %user_id,
            streak = snapshot.streak,
            coins = snapshot.coins,
            completed_today = snapshot.completed_count(),
            "Progress session initialized"
        );
        self.emit(ProgressEvent::Initialized(snapshot.clone()));

        Ok(snapshot)
    }

    /// Complete a challenge, awarding coins and possibly the day's streak
    ///
    /// The local state is updated before the store write starts. Completing
    /// a pending or completed challenge is a no-op that returns the current
    /// state without touching the store. When the session is closed before
    /// the write settles, a recorded completion returns the closed session's
    /// final view of it.
    pub async fn complete_challenge(&self, challenge_id: &str) -> ProgressResult<UserProgress> {
        let key = ChallengeKey::new(challenge_id)?;
        let now = self.clock.now();
        let today = self.today_at(now);

        let (generation, completion, before, snapshot) = {
            let mut state = self.lock();
            let session = state
                .session
                .as_mut()
                .ok_or(ProgressError::NotInitialized)?;

            let before = (session.ledger.streak(), session.ledger.coins());
            let Some(completion) =
                session
                    .ledger
                    .begin(&key, today, self.config.challenge_reward, now)
            else {
                tracing::debug!(challenge_id = %key, "Challenge already completed");
                return Ok(session.ledger.snapshot(today));
            };
            (
                session.generation,
                completion,
                before,
                session.ledger.snapshot(today),
            )
        };

        tracing::info!(
            user_id = %completion.user_id,
            challenge_id = %key,
            reward = completion.reward,
            streak = snapshot.streak,
            "Challenge completed locally"
        );
        self.emit(ProgressEvent::Updated(snapshot.clone()));

        let result = self.store.record_completed_challenge(&completion).await;

        match self.settle(generation, &key, &result) {
            Settlement::Confirmed(snapshot) => {
                self.emit(ProgressEvent::Updated(snapshot.clone()));
                Ok(snapshot)
            }
            Settlement::Withdrawn(snapshot) => {
                tracing::info!(challenge_id = %key, "Challenge was already recorded, award withdrawn");
                self.emit(ProgressEvent::Updated(snapshot.clone()));
                Ok(snapshot)
            }
            Settlement::RolledBack(snapshot) => {
                let err = not_recorded(key.clone(), result);
                err.log();
                self.emit(ProgressEvent::CompletionFailed {
                    challenge_id: key,
                    message: err.to_string(),
                });
                self.emit(ProgressEvent::Updated(snapshot));
                Err(err)
            }
            Settlement::Stale => {
                tracing::debug!(challenge_id = %key, "Completion settled after session change");
                let mut view = snapshot;
                match result {
                    Ok(()) => {}
                    Err(ProgressError::AlreadyRecorded(_)) => {
                        (view.streak, view.coins) = before;
                    }
                    Err(_) => return Err(not_recorded(key, result)),
                }
                view.pending_challenges.remove(&key);
                Ok(view)
            }
        }
    }

    /// Snapshot of the session's progress for today
    pub fn current_state(&self) -> ProgressResult<UserProgress> {
        let today = self.today_at(self.clock.now());
        let state = self.lock();
        let session = state.session.as_ref().ok_or(ProgressError::NotInitialized)?;
        Ok(session.ledger.snapshot(today))
    }

    /// Current streak, 0 without a session
    pub fn streak(&self) -> u32 {
        self.lock()
            .session
            .as_ref()
            .map_or(0, |session| session.ledger.streak())
    }

    /// Current coin balance, 0 without a session
    pub fn coins(&self) -> u32 {
        self.lock()
            .session
            .as_ref()
            .map_or(0, |session| session.ledger.coins())
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.ledger.user_id().clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// Sign out: drop the local state
    ///
    /// Writes still in flight complete against the store but no longer touch
    /// local state. Returns `false` when no session was active.
    pub fn end_session(&self) -> bool {
        let ended = self.lock().session.take();
        match ended {
            Some(session) => {
                let user_id = session.ledger.user_id().clone();
                tracing::info!(user_id = %user_id, "Progress session ended");
                self.emit(ProgressEvent::SessionEnded { user_id });
                true
            }
            None => false,
        }
    }

    fn settle(
        &self,
        generation: u64,
        key: &ChallengeKey,
        result: &ProgressResult<()>,
    ) -> Settlement {
        let today = self.today_at(self.clock.now());
        let mut state = self.lock();
        let Some(session) = state
            .session
            .as_mut()
            .filter(|session| session.generation == generation)
        else {
            return Settlement::Stale;
        };

        match result {
            Ok(()) => {
                session.ledger.confirm(key);
                Settlement::Confirmed(session.ledger.snapshot(today))
            }
            Err(ProgressError::AlreadyRecorded(_)) => {
                session.ledger.withdraw(key);
                Settlement::Withdrawn(session.ledger.snapshot(today))
            }
            Err(_) => {
                session.ledger.roll_back(key);
                Settlement::RolledBack(session.ledger.snapshot(today))
            }
        }
    }

    fn ensure_same_user(&self, user_id: &UserId) -> ProgressResult<()> {
        let state = self.lock();
        match &state.session {
            Some(active) if active.ledger.user_id() != user_id => {
                Err(ProgressError::SessionUserMismatch {
                    active: active.ledger.user_id().clone(),
                    requested: user_id.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        day_of(now, self.config.utc_offset)
    }

    fn emit(&self, event: ProgressEvent) {
        // Sending only fails when nobody is subscribed.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_recorded(challenge_id: ChallengeKey, result: ProgressResult<()>) -> ProgressError {
    let source = match result {
        Err(err) => err,
        Ok(()) => ProgressError::Internal("write reported success".to_string()),
    };
    ProgressError::CompletionNotRecorded {
        challenge_id,
        source: Box::new(source),
    }
}
