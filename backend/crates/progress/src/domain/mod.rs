//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (UserStats, ChallengeCompletion, UserProgress)
//! - Domain value objects (UserId, ChallengeKey, ChallengeStatus)
//! - The progress ledger (optimistic bookkeeping)
//! - Domain services (daily window calculation)
//! - Repository traits (interfaces)

pub mod challenge_status;
pub mod entities;
pub mod ledger;
pub mod repository;
pub mod services;
pub mod value_objects;
