//! Application Layer - Use Cases
//!
//! Orchestrates the progress ledger and the remote store.

pub mod config;
pub mod tracker;
