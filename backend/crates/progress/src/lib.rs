//! Progress Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Ledger, entities, store trait
//! - `application/` - Progress tracker and configuration
//! - `infra/` - Postgres and in-memory stores, clocks
//!
//! ## Consistency Model
//! - Completions are applied locally before the store write is awaited
//! - A rejected write removes exactly what that completion added
//! - Local and remote state converge on the next `initialize`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::ProgressConfig;
pub use application::tracker::{ProgressEvent, ProgressTracker};
pub use domain::repository::{Clock, ProgressStore};
pub use error::{ProgressError, ProgressResult};
pub use infra::{InMemoryProgressStore, ManualClock, PgProgressStore, SystemClock};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::challenge_status::*;
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryProgressStore as MemoryStore;
    pub use crate::infra::postgres::PgProgressStore as PgStore;
}
