use crate::domain::errors::DomainError;

const CNT_ARTICLE_STATUS_CHECK: &str = "articles_status_check";

/// Translates a driver error into a persistence failure. `operation` names
/// what was being attempted; constraint violations add what was violated.
/// The driver error is always kept as the source.
pub fn map_sqlx(operation: &str, err: sqlx::Error) -> DomainError {
    let detail = match &err {
        sqlx::Error::Database(db_err) if db_err.constraint() == Some(CNT_ARTICLE_STATUS_CHECK) => {
            Some("status must be one of draft, published, pending, archived".to_string())
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23514") => Some(format!("check constraint violated: {}", db_err.message())),
            Some("23502") => Some(format!("required column missing: {}", db_err.message())),
            Some("22001") => Some(format!("value too long: {}", db_err.message())),
            _ => None,
        },
        _ => None,
    };

    let message = match detail {
        Some(detail) => format!("failed to {operation}: {detail}"),
        None => format!("failed to {operation}"),
    };
    DomainError::persistence(message, err)
}

/// True when `err` means the connection itself is unusable, so the next
/// operation has to open a new one.
pub fn is_connection_lost(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        // class 08 connection exception, 57P01..57P03 server shutdown/termination
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.starts_with("08") || code.starts_with("57P")),
        _ => false,
    }
}
