//! Shared Kernel - Cross-crate minimal core
//!
//! This crate contains the vocabulary every backend crate agrees on:
//! - Unified error type, error classification and result aliases
//! - Typed record identifiers
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning for both progress tracking and the lexicon.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
