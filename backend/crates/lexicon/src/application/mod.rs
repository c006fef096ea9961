//! Application Layer - Use Cases

pub mod config;
pub mod daily_challenges;
pub mod daily_tip;
pub mod search_dictionary;
pub mod seed;
