//! Domain Layer
//!
//! Contains:
//! - Entities (DictionaryEntry, DailyWord, DailyTip)
//! - Value objects (Difficulty, TipType)
//! - Selection services (dictionary filter, tip of the day)
//! - Repository traits

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
