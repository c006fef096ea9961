//! Infrastructure Layer
//!
//! Store implementations and the system clock.

pub mod clock;
pub mod memory;
pub mod postgres;

pub use clock::{ManualClock, SystemClock};
pub use memory::InMemoryProgressStore;
pub use postgres::PgProgressStore;
