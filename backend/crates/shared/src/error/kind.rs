//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used to decide how a failure is reported
//! to the user and whether the operation may be retried.

use serde::Serialize;

/// エラー種別の列挙体
///
/// 呼び出し側がエラーをどう扱うべきか（入力修正・再試行・報告）を分類します。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unavailable;
/// assert!(kind.is_retryable());
/// assert_eq!(kind.as_str(), "Unavailable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力値が不正（空の ID など）
    InvalidInput,
    /// 対象のレコードが存在しない
    NotFound,
    /// 既存の状態と競合（重複登録など）
    Conflict,
    /// 前提条件を満たしていない（セッション未初期化など）
    FailedPrecondition,
    /// 外部ストアが一時的に利用不可
    Unavailable,
    /// 外部ストアの応答がタイムアウト
    Timeout,
    /// 内部エラー
    Internal,
}

impl ErrorKind {
    /// 機械可読なコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.code(), "INVALID_INPUT");
    /// ```
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::FailedPrecondition => "FAILED_PRECONDITION",
            ErrorKind::Unavailable => "UNAVAILABLE",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::FailedPrecondition => "Failed Precondition",
            ErrorKind::Unavailable => "Unavailable",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// 再試行で解決する可能性があるか
    ///
    /// 一時的なストア障害のみ `true` を返します。
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Unavailable | ErrorKind::Timeout)
    }

    /// 呼び出し側の誤りかどうかを判定
    #[inline]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidInput
                | ErrorKind::NotFound
                | ErrorKind::Conflict
                | ErrorKind::FailedPrecondition
        )
    }

    /// サーバー側（ストア・内部）のエラーかどうか
    ///
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        !self.is_caller_error()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ErrorKind::InvalidInput.code(), "INVALID_INPUT");
        assert_eq!(ErrorKind::NotFound.code(), "NOT_FOUND");
        assert_eq!(ErrorKind::Conflict.code(), "CONFLICT");
        assert_eq!(ErrorKind::FailedPrecondition.code(), "FAILED_PRECONDITION");
        assert_eq!(ErrorKind::Unavailable.code(), "UNAVAILABLE");
        assert_eq!(ErrorKind::Timeout.code(), "TIMEOUT");
        assert_eq!(ErrorKind::Internal.code(), "INTERNAL");
    }

    #[test]
    fn test_serialize_matches_code() {
        let json = serde_json::to_string(&ErrorKind::FailedPrecondition).unwrap();
        assert_eq!(json, r#""FAILED_PRECONDITION""#);
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Unavailable.is_retryable());
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(!ErrorKind::InvalidInput.is_retryable());
        assert!(!ErrorKind::Internal.is_retryable());
    }

    #[test]
    fn test_caller_vs_server() {
        assert!(ErrorKind::InvalidInput.is_caller_error());
        assert!(ErrorKind::Conflict.is_caller_error());
        assert!(!ErrorKind::Unavailable.is_caller_error());
        assert!(ErrorKind::Internal.is_server_error());
        assert!(!ErrorKind::NotFound.is_server_error());
    }
}
