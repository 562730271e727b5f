//! Shared Diesel and pool error mapping for repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors through a repository-specific connection constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Constructors a repository error type offers to [`map_diesel_error`].
pub(super) struct DieselErrorTargets<E> {
    pub query: fn(&'static str) -> E,
    pub connection: fn(&'static str) -> E,
    pub unique: Option<fn(&'static str) -> E>,
}

/// Map Diesel failures, logging the database detail at debug level only.
pub(super) fn map_diesel_error<E>(error: DieselError, targets: &DieselErrorTargets<E>) -> E {
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
        DieselError::NotFound => (targets.query)("record not found"),
        DieselError::QueryBuilderError(_) => (targets.query)("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (targets.connection)("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => match targets.unique
        {
            Some(unique) => unique("unique constraint violated"),
            None => (targets.query)("database error"),
        },
        _ => (targets.query)("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query,
        Connection,
        Unique,
    }

    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom")))
    }

    fn targets(unique: bool) -> DieselErrorTargets<Mapped> {
        DieselErrorTargets {
            query: |_| Mapped::Query,
            connection: |_| Mapped::Connection,
            unique: unique.then_some((|_| Mapped::Unique) as fn(&'static str) -> Mapped),
        }
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), true, Mapped::Unique)]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), false, Mapped::Query)]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), true, Mapped::Connection)]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation), true, Mapped::Query)]
    #[case(DieselError::NotFound, true, Mapped::Query)]
    fn diesel_errors_map_to_port_variants(
        #[case] error: DieselError,
        #[case] unique: bool,
        #[case] expected: Mapped,
    ) {
        assert_eq!(map_diesel_error(error, &targets(unique)), expected);
    }

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }
}
