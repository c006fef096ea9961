//! Error classification for store drivers
//!
//! Each crate keeps its own error enum but classifies driver failures the
//! same way, so retry decisions agree across progress and lexicon.

use super::kind::ErrorKind;

/// Classify a sqlx error
///
/// Connection-level failures are `Unavailable` so callers may retry them.
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut => ErrorKind::Timeout,
        sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::WorkerCrashed => ErrorKind::Unavailable,
        sqlx::Error::Database(db_err) => postgres_code_kind(db_err.code().as_deref()),
        _ => ErrorKind::Internal,
    }
}

/// Classify a Postgres SQLSTATE
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
pub fn postgres_code_kind(code: Option<&str>) -> ErrorKind {
    match code {
        Some("23505" | "23503") => ErrorKind::Conflict,
        Some("23502" | "23514") => ErrorKind::InvalidInput,
        Some("57014") => ErrorKind::Timeout,
        Some("53000" | "53100" | "53200" | "53300") => ErrorKind::Unavailable,
        Some("57000" | "57P01" | "57P02" | "57P03") => ErrorKind::Unavailable,
        // Connection exceptions
        Some(code) if code.starts_with("08") => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_codes() {
        assert_eq!(postgres_code_kind(Some("23505")), ErrorKind::Conflict);
        assert_eq!(postgres_code_kind(Some("23514")), ErrorKind::InvalidInput);
        assert_eq!(postgres_code_kind(Some("57P01")), ErrorKind::Unavailable);
        assert_eq!(postgres_code_kind(Some("08006")), ErrorKind::Unavailable);
        assert_eq!(postgres_code_kind(Some("42P01")), ErrorKind::Internal);
        assert_eq!(postgres_code_kind(None), ErrorKind::Internal);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_errors() {
        assert_eq!(sqlx_error_kind(&sqlx::Error::PoolTimedOut), ErrorKind::Timeout);
        assert_eq!(sqlx_error_kind(&sqlx::Error::PoolClosed), ErrorKind::Unavailable);
        assert_eq!(sqlx_error_kind(&sqlx::Error::RowNotFound), ErrorKind::NotFound);
    }
}
