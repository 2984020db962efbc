use chrono::NaiveDate;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors raised by repositories.
///
/// Constraint violations are classified on conversion from [`sqlx::Error`]
/// so callers never inspect SQLSTATE codes themselves.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A field or reference rule rejected the input. The message is
    /// localized and safe to show to users.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A unique key already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// More projects were registered on one day than the number format holds.
    #[error("Project number sequence exhausted for {0}")]
    SequenceExhausted(NaiveDate),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    return StoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return StoreError::InvalidInput(
                        "関連するデータが見つかりません".to_string(),
                    );
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn non_database_errors_stay_database() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert_matches!(err, StoreError::Database(sqlx::Error::RowNotFound));
    }

    #[test]
    fn display_includes_cause() {
        let err = StoreError::from(sqlx::Error::Protocol("Database connection failed".into()));
        assert!(err.to_string().contains("Database connection failed"));
    }
}
