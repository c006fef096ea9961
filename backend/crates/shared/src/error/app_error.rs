//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// 進捗トラッカーと辞書の両方がユーザーへの報告に使う標準エラー型です。
///
/// ## Fields
/// * `kind` - エラーの分類（再試行可否の判定に使用）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `action` - ユーザーが取るべきアクション（オプション）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
/// use kernel::error::kind::ErrorKind;
///
/// let err = AppError::new(ErrorKind::Unavailable, "Could not record completion")
///     .with_action("Please retry");
/// assert!(err.is_retryable());
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// ユーザー向けアクションを設定
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::AppError;
    /// use kernel::error::kind::ErrorKind;
    /// let err = AppError::new(ErrorKind::FailedPrecondition, "Session not started")
    ///     .with_action("Please sign in again");
    /// assert_eq!(err.action(), Some("Please sign in again"));
    /// ```
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// 元のエラーを設定（デバッグ用）
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// 再試行可能かどうか
    #[inline]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// 呼び出し側のエラーかどうか
    #[inline]
    pub fn is_caller_error(&self) -> bool {
        self.kind.is_caller_error()
    }

    /// ユーザーに表示する短い案内文
    ///
    /// アクションが設定されていればメッセージに続けて表示します。
    pub fn user_message(&self) -> String {
        match &self.action {
            Some(action) => format!("{}. {}", self.message, action),
            None => self.message.to_string(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "Word not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Word not found");
        assert!(err.action().is_none());
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_user_message() {
        let err = AppError::new(ErrorKind::Unavailable, "Could not record completion")
            .with_action("Please retry");
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), "Could not record completion. Please retry");

        let err = AppError::new(ErrorKind::InvalidInput, "Challenge id is empty");
        assert_eq!(err.user_message(), "Challenge id is empty");
    }

    #[test]
    fn test_source_is_exposed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let err = AppError::new(ErrorKind::Timeout, "Store timed out").with_source(io_err);
        assert_eq!(err.source().map(|s| s.to_string()), Some("slow".to_string()));
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::NotFound, "Word not found");
        assert_eq!(err.to_string(), "[Not Found] Word not found");

        let err = AppError::new(ErrorKind::Unavailable, "Store down").with_action("Retry later");
        assert_eq!(err.to_string(), "[Unavailable] Store down (Action: Retry later)");
    }
}
