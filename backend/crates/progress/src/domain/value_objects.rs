//! Domain Value Objects
//!
//! Immutable, validated identifiers for the progress domain.

use chrono::NaiveDate;
use derive_more::Display;
use serde::Serialize;

use crate::error::{ProgressError, ProgressResult};

/// Longest identifier accepted for users and challenges
pub const MAX_IDENTIFIER_LEN: usize = 128;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Opaque user identifier issued by the authentication backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap a raw identifier (surrounding whitespace is trimmed)
    pub fn new(raw: impl AsRef<str>) -> ProgressResult<Self> {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_IDENTIFIER_LEN {
            return Err(ProgressError::InvalidUserId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Period-qualified challenge identifier
///
/// Canonical form is `YYYY-MM-DD-word<ID>-<INDEX>`, so keys for different
/// days never collide and the completed set resets with the calendar.
/// Keys coming back from the store are accepted in any whitespace-free form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct ChallengeKey(String);

impl ChallengeKey {
    pub fn new(raw: impl AsRef<str>) -> ProgressResult<Self> {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > MAX_IDENTIFIER_LEN
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(ProgressError::InvalidChallengeId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build the canonical key for challenge `index` of daily word `word_id`
    pub fn for_day(day: NaiveDate, word_id: i64, index: usize) -> Self {
        Self(format!("{}-word{}-{}", day.format(DAY_FORMAT), word_id, index))
    }

    /// Date prefix of a canonical key
    pub fn day(&self) -> Option<NaiveDate> {
        let prefix = self.0.get(..10)?;
        NaiveDate::parse_from_str(prefix, DAY_FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_trims() {
        let id = UserId::new("  u1 ").unwrap();
        assert_eq!(id.as_str(), "u1");
        assert_eq!(id.to_string(), "u1");
    }

    #[test]
    fn test_user_id_rejects_empty() {
        assert!(matches!(
            UserId::new("   "),
            Err(ProgressError::InvalidUserId(_))
        ));
        assert!(UserId::new("x".repeat(MAX_IDENTIFIER_LEN + 1)).is_err());
    }

    #[test]
    fn test_challenge_key_validation() {
        assert!(ChallengeKey::new("2024-05-01-word3-0").is_ok());
        assert!(matches!(
            ChallengeKey::new(""),
            Err(ProgressError::InvalidChallengeId(_))
        ));
        assert!(ChallengeKey::new("2024-05-01 word3").is_err());
    }

    #[test]
    fn test_for_day_canonical_form() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let key = ChallengeKey::for_day(day, 3, 0);
        assert_eq!(key.as_str(), "2024-05-01-word3-0");
        assert_eq!(key.day(), Some(day));
    }

    #[test]
    fn test_day_of_non_canonical_key() {
        assert_eq!(ChallengeKey::new("legacy-7").unwrap().day(), None);
        assert_eq!(ChallengeKey::new("é").unwrap().day(), None);
    }

    #[test]
    fn test_serialize_transparent() {
        let key = ChallengeKey::new("2024-05-01-word3-1").unwrap();
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            r#""2024-05-01-word3-1""#
        );
    }
}
