//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryLexicon;
pub use postgres::PgLexiconRepository;
