//! Domain Value Objects

use derive_more::Display;
use serde::Serialize;

use crate::error::{LexiconError, LexiconResult};

/// Difficulty level of a dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Parse a stored or user-supplied level
    pub fn parse(level: i32) -> LexiconResult<Self> {
        u8::try_from(level)
            .ok()
            .and_then(Self::new)
            .ok_or(LexiconError::InvalidDifficulty(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Elementary",
            3 => "Intermediate",
            4 => "Advanced",
            _ => "Expert",
        }
    }

    pub fn all() -> impl Iterator<Item = Difficulty> {
        (Self::MIN..=Self::MAX).map(Difficulty)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of a daily tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipType {
    #[display("Learning Tip")]
    Learning,
    #[display("Motivation")]
    Motivation,
    #[display("Fun Fact")]
    FunFact,
    #[display("Challenge Tip")]
    ChallengeSpecific,
}

impl TipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipType::Learning => "learning",
            TipType::Motivation => "motivation",
            TipType::FunFact => "fun_fact",
            TipType::ChallengeSpecific => "challenge_specific",
        }
    }
}

impl std::str::FromStr for TipType {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "learning" => Ok(TipType::Learning),
            "motivation" => Ok(TipType::Motivation),
            "fun_fact" => Ok(TipType::FunFact),
            "challenge_specific" => Ok(TipType::ChallengeSpecific),
            other => Err(LexiconError::InvalidTipType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bounds() {
        assert!(Difficulty::new(1).is_some());
        assert!(Difficulty::new(5).is_some());
        assert!(Difficulty::new(0).is_none());
        assert!(Difficulty::new(6).is_none());

        assert!(matches!(
            Difficulty::parse(-1),
            Err(LexiconError::InvalidDifficulty(-1))
        ));
        assert_eq!(Difficulty::parse(3).unwrap().level(), 3);
    }

    #[test]
    fn test_difficulty_labels() {
        let labels: Vec<&str> = Difficulty::all().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            ["Beginner", "Elementary", "Intermediate", "Advanced", "Expert"]
        );
        assert_eq!(Difficulty::new(4).unwrap().to_string(), "Advanced");
    }

    #[test]
    fn test_tip_type_round_trip() {
        for tip_type in [
            TipType::Learning,
            TipType::Motivation,
            TipType::FunFact,
            TipType::ChallengeSpecific,
        ] {
            assert_eq!(tip_type.as_str().parse::<TipType>().unwrap(), tip_type);
        }
        assert!("gossip".parse::<TipType>().is_err());
        assert_eq!(TipType::FunFact.to_string(), "Fun Fact");
    }
}
