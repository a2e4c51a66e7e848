//! Translation of pool and Diesel failures into [`PersistenceError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Pool failures always mean the store is unreachable.
pub(super) fn map_pool_error(error: PoolError) -> PersistenceError {
    PersistenceError::connection(error.into_message())
}

/// Map a Diesel failure, logging the underlying cause at debug level.
///
/// Database details stay in the log; the returned error carries only a
/// category message.
pub(super) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            PersistenceError::invalid_argument("value violates a table constraint")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            warn!(
                message = info.message(),
                constraint_name = ?info.constraint_name(),
                "unexpected foreign key violation"
            );
            PersistenceError::query("foreign key violation")
        }
        DieselError::QueryBuilderError(_) => PersistenceError::query("database query error"),
        _ => PersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, PersistenceError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_diesel_errors_are_query_failures(#[case] error: DieselError) {
        assert_eq!(map_diesel_error(error).code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[case(DatabaseErrorKind::CheckViolation, ErrorCode::InvalidQuery)]
    #[case(DatabaseErrorKind::ClosedConnection, ErrorCode::InternalError)]
    #[case(DatabaseErrorKind::ForeignKeyViolation, ErrorCode::InternalError)]
    fn database_error_kinds_map_to_codes(#[case] kind: DatabaseErrorKind, #[case] code: ErrorCode) {
        let error = DieselError::DatabaseError(kind, Box::new(String::from("rejected")));
        assert_eq!(map_diesel_error(error).code(), code);
    }
}
