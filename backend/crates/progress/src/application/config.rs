//! Application Configuration
//!
//! Configuration for the progress application layer.

use chrono::{FixedOffset, Local, Offset, Utc};

use crate::error::{ProgressError, ProgressResult};

/// Coins awarded per newly completed challenge
pub const DEFAULT_CHALLENGE_REWARD: u32 = 10;

/// Progress application configuration
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Coins added per newly completed challenge
    pub challenge_reward: u32,
    /// Offset defining the local calendar day for streaks and the daily window
    pub utc_offset: FixedOffset,
    /// Buffered events per subscriber before the slowest one lags
    pub event_capacity: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            challenge_reward: DEFAULT_CHALLENGE_REWARD,
            utc_offset: Utc.fix(),
            event_capacity: 64,
        }
    }
}

impl ProgressConfig {
    /// Create config for development (days follow the host's local offset)
    pub fn development() -> Self {
        Self {
            utc_offset: Local::now().offset().fix(),
            ..Default::default()
        }
    }

    /// Read overrides from the process environment
    pub fn from_env() -> ProgressResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`; unset variables keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ProgressResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("PROGRESS_CHALLENGE_REWARD") {
            config.challenge_reward = parse_var("PROGRESS_CHALLENGE_REWARD", &raw)?;
        }

        if let Some(raw) = lookup("PROGRESS_UTC_OFFSET_MINUTES") {
            let minutes: i32 = parse_var("PROGRESS_UTC_OFFSET_MINUTES", &raw)?;
            config.utc_offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| {
                    ProgressError::Config(format!(
                        "PROGRESS_UTC_OFFSET_MINUTES out of range: {minutes}"
                    ))
                })?;
        }

        if let Some(raw) = lookup("PROGRESS_EVENT_CAPACITY") {
            config.event_capacity = parse_var("PROGRESS_EVENT_CAPACITY", &raw)?;
            if config.event_capacity == 0 {
                return Err(ProgressError::Config(
                    "PROGRESS_EVENT_CAPACITY must be positive".to_string(),
                ));
            }
        }

        Ok(config)
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset.local_minus_utc() / 60
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> ProgressResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ProgressError::Config(format!("{name} has invalid value {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProgressConfig::default();
        assert_eq!(config.challenge_reward, 10);
        assert_eq!(config.utc_offset_minutes(), 0);
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn test_from_lookup_without_vars_is_default() {
        let config = ProgressConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.challenge_reward, DEFAULT_CHALLENGE_REWARD);
        assert_eq!(config.utc_offset_minutes(), 0);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ProgressConfig::from_lookup(lookup_from(&[
            ("PROGRESS_CHALLENGE_REWARD", "25"),
            ("PROGRESS_UTC_OFFSET_MINUTES", "-330"),
            ("PROGRESS_EVENT_CAPACITY", " 8 "),
        ]))
        .unwrap();

        assert_eq!(config.challenge_reward, 25);
        assert_eq!(config.utc_offset_minutes(), -330);
        assert_eq!(config.event_capacity, 8);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err =
            ProgressConfig::from_lookup(lookup_from(&[("PROGRESS_CHALLENGE_REWARD", "ten")]))
                .unwrap_err();
        assert!(matches!(err, ProgressError::Config(_)));

        let err =
            ProgressConfig::from_lookup(lookup_from(&[("PROGRESS_UTC_OFFSET_MINUTES", "1440")]))
                .unwrap_err();
        assert!(matches!(err, ProgressError::Config(_)));

        let err = ProgressConfig::from_lookup(lookup_from(&[("PROGRESS_EVENT_CAPACITY", "0")]))
            .unwrap_err();
        assert!(matches!(err, ProgressError::Config(_)));
    }
}
