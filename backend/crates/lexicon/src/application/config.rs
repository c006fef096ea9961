//! Application Configuration

use crate::error::{LexiconError, LexiconResult};

/// Lexicon application configuration
#[derive(Debug, Clone)]
pub struct LexiconConfig {
    /// Number of daily words shown per day
    pub daily_word_limit: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            daily_word_limit: 2,
        }
    }
}

impl LexiconConfig {
    pub fn development() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment
    pub fn from_env() -> LexiconResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LexiconResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("LEXICON_DAILY_WORD_LIMIT") {
            config.daily_word_limit = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| {
                    LexiconError::Config(format!("LEXICON_DAILY_WORD_LIMIT has invalid value {raw:?}"))
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_word_limit() {
        assert_eq!(LexiconConfig::default().daily_word_limit, 2);

        let config = LexiconConfig::from_lookup(|name| {
            (name == "LEXICON_DAILY_WORD_LIMIT").then(|| "5".to_string())
        })
        .unwrap();
        assert_eq!(config.daily_word_limit, 5);

        for bad in ["0", "-1", "two"] {
            let result = LexiconConfig::from_lookup(|_| Some(bad.to_string()));
            assert!(matches!(result, Err(LexiconError::Config(_))));
        }
    }
}
