//! Challenge Status Value Object
//!
//! Per-identifier state machine for optimistic completion:
//!
//! ```text
//! Uncompleted --begin--> Pending --confirm--> Completed
//!      ^                    |
//!      +------revert--------+
//! ```
//!
//! `Completed` is terminal for the identifier within its period.

use serde::Serialize;
use std::fmt;

/// Completion status of one challenge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    /// Not completed (or rolled back)
    #[default]
    Uncompleted,

    /// Optimistically completed, awaiting the store's confirmation
    Pending,

    /// Confirmed by the store
    Completed,
}

impl ChallengeStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Uncompleted => "uncompleted",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Counts as completed from the user's point of view
    #[inline]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Pending | Self::Completed)
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Uncompleted -> Pending
    #[inline]
    pub const fn begin(self) -> Option<Self> {
        match self {
            Self::Uncompleted => Some(Self::Pending),
            _ => None,
        }
    }

    /// Pending -> Completed
    #[inline]
    pub const fn confirm(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Completed),
            _ => None,
        }
    }

    /// Pending -> Uncompleted
    #[inline]
    pub const fn revert(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Uncompleted),
            _ => None,
        }
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod transitions {
        use super::*;

        #[test]
        fn test_begin_only_from_uncompleted() {
            assert_eq!(
                ChallengeStatus::Uncompleted.begin(),
                Some(ChallengeStatus::Pending)
            );
            assert_eq!(ChallengeStatus::Pending.begin(), None);
            assert_eq!(ChallengeStatus::Completed.begin(), None);
        }

        #[test]
        fn test_confirm_only_from_pending() {
            assert_eq!(
                ChallengeStatus::Pending.confirm(),
                Some(ChallengeStatus::Completed)
            );
            assert_eq!(ChallengeStatus::Uncompleted.confirm(), None);
            assert_eq!(ChallengeStatus::Completed.confirm(), None);
        }

        #[test]
        fn test_revert_only_from_pending() {
            assert_eq!(
                ChallengeStatus::Pending.revert(),
                Some(ChallengeStatus::Uncompleted)
            );
            assert_eq!(ChallengeStatus::Completed.revert(), None);
            assert_eq!(ChallengeStatus::Uncompleted.revert(), None);
        }
    }

    mod predicates {
        use super::*;

        #[test]
        fn test_is_live() {
            assert!(!ChallengeStatus::Uncompleted.is_live());
            assert!(ChallengeStatus::Pending.is_live());
            assert!(ChallengeStatus::Completed.is_live());
        }

        #[test]
        fn test_is_terminal() {
            assert!(ChallengeStatus::Completed.is_terminal());
            assert!(!ChallengeStatus::Pending.is_terminal());
        }

        #[test]
        fn test_display_and_default() {
            assert_eq!(ChallengeStatus::Pending.to_string(), "pending");
            assert_eq!(ChallengeStatus::default(), ChallengeStatus::Uncompleted);
        }
    }
}
