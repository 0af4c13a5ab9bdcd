//! Shared helpers for Diesel repository implementations.
//!
//! - Error mapping from pool and Diesel errors to [`ResourceRepositoryError`]
//! - Keyword patterns for `ILIKE` filters
//! - SQL functions used in ordering

use diesel::result::{DatabaseErrorKind, DatabaseErrorInformation, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::ResourceRepositoryError;

use super::pool::PoolError;

diesel::define_sql_function! {
    /// PostgreSQL `lower(text)`.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// What the failing statement was doing.
///
/// A foreign-key violation means a missing target on writes and a dependent
/// row on deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Read,
    Write,
    Delete,
}

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> ResourceRepositoryError {
    ResourceRepositoryError::connection(error.message().to_owned())
}

fn constraint_of(info: &dyn DatabaseErrorInformation) -> String {
    info.constraint_name()
        .map_or_else(|| "unknown".to_owned(), str::to_owned)
}

/// Map Diesel errors to repository errors.
pub(crate) fn map_diesel_error(
    error: DieselError,
    operation: Operation,
) -> ResourceRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                ?operation,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            ?operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ResourceRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            ResourceRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                ResourceRepositoryError::conflict(constraint_of(info.as_ref()))
            }
            DatabaseErrorKind::ForeignKeyViolation if operation == Operation::Delete => {
                ResourceRepositoryError::in_use(constraint_of(info.as_ref()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ResourceRepositoryError::missing_reference(constraint_of(info.as_ref()))
            }
            DatabaseErrorKind::ClosedConnection => {
                ResourceRepositoryError::connection("database connection error")
            }
            DatabaseErrorKind::CheckViolation => {
                // Domain validation mirrors every CHECK, so this is a drift bug.
                warn!(
                    constraint = info.constraint_name(),
                    "check constraint rejected a validated row"
                );
                ResourceRepositoryError::query("database error")
            }
            _ => ResourceRepositoryError::query("database error"),
        },
        _ => ResourceRepositoryError::query("database error"),
    }
}

/// `ILIKE` pattern matching `keyword` anywhere, with wildcards escaped.
pub(crate) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Convert listing bounds to SQL `LIMIT`/`OFFSET` values.
pub(crate) fn limit_offset(
    per_page: u32,
    offset: u64,
) -> Result<(i64, i64), ResourceRepositoryError> {
    let offset = i64::try_from(offset)
        .map_err(|_| ResourceRepositoryError::query("page offset out of range"))?;
    Ok((i64::from(per_page), offset))
}

/// Convert a `COUNT(*)` result.
pub(crate) fn row_total(count: i64) -> Result<u64, ResourceRepositoryError> {
    u64::try_from(count).map_err(|_| ResourceRepositoryError::query("negative row count"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Info {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
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
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    fn unique_violation_is_conflict_with_constraint() {
        let err = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, Some("departments_unique")),
            Operation::Write,
        );
        assert_eq!(err, ResourceRepositoryError::conflict("departments_unique"));
    }

    #[rstest]
    #[case(Operation::Write, false)]
    #[case(Operation::Delete, true)]
    fn foreign_key_meaning_depends_on_operation(
        #[case] operation: Operation,
        #[case] in_use: bool,
    ) {
        let err = map_diesel_error(
            database_error(
                DatabaseErrorKind::ForeignKeyViolation,
                Some("faculties_universities_fkey"),
            ),
            operation,
        );
        if in_use {
            assert!(matches!(err, ResourceRepositoryError::InUse { .. }));
        } else {
            assert!(matches!(err, ResourceRepositoryError::MissingReference { .. }));
        }
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let err = map_diesel_error(
            database_error(DatabaseErrorKind::ClosedConnection, None),
            Operation::Read,
        );
        assert!(matches!(err, ResourceRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn missing_constraint_name_is_reported_as_unknown() {
        let err = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, None),
            Operation::Write,
        );
        assert_eq!(err, ResourceRepositoryError::conflict("unknown"));
    }

    #[rstest]
    fn pool_errors_keep_driver_message() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case("sales", "%sales%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\", "%c:\\\\%")]
    fn keyword_wildcards_are_escaped(#[case] keyword: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(keyword), expected);
    }

    #[rstest]
    fn offsets_fit_sql_integers() {
        assert_eq!(limit_offset(20, 40).expect("in range"), (20, 40));
        assert!(limit_offset(20, u64::MAX).is_err());
    }
}
