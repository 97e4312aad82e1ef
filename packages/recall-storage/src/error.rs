#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Storage call timed out: {0}")]
	Timeout(String),
}

/// Postgres raises SQLSTATE 23503 when an insert references a missing parent
/// row; callers see that as a plain not-found.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
	matches!(
		err,
		sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503")
	)
}
