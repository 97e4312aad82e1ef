use std::{future::Future, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Error, Result, schema};

pub struct Db {
	pub pool: PgPool,
	vector_dim: u32,
	statement_timeout: Duration,
}
impl Db {
	pub async fn connect(cfg: &recall_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self {
			pool,
			vector_dim: cfg.vector_dim,
			statement_timeout: Duration::from_millis(cfg.statement_timeout_ms),
		})
	}

	pub fn vector_dim(&self) -> u32 {
		self.vector_dim
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema(self.vector_dim);
		let lock_id: i64 = 7_263_101;
		// Advisory locks are held per connection. Use a single transaction so
		// the lock is scoped to one connection and automatically released when
		// the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	/// Runs a storage future under the configured statement deadline, so a
	/// stuck connection surfaces as a distinct timeout instead of hanging the
	/// request.
	pub(crate) async fn with_deadline<T, F>(&self, operation: &str, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T, sqlx::Error>>,
	{
		match tokio::time::timeout(self.statement_timeout, fut).await {
			Ok(result) => Ok(result?),
			Err(_) => {
				tracing::warn!(
					operation,
					timeout_ms = self.statement_timeout.as_millis() as u64,
					"Storage call exceeded its deadline.",
				);

				Err(Error::Timeout(format!(
					"{operation} exceeded {}ms.",
					self.statement_timeout.as_millis()
				)))
			},
		}
	}
}
