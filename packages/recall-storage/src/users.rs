//! Minimal user rows. Authentication lives outside this crate; notes and
//! conversations only need the foreign-key target.

use crate::{Result, db::Db};

pub async fn insert_user(db: &Db, email: &str, password_hash: &str) -> Result<i64> {
	db.with_deadline(
		"insert_user",
		sqlx::query_scalar::<_, i64>(
			"INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
		)
		.bind(email)
		.bind(password_hash)
		.fetch_one(&db.pool),
	)
	.await
}

pub async fn user_exists(db: &Db, user_id: i64) -> Result<bool> {
	db.with_deadline(
		"user_exists",
		sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
			.bind(user_id)
			.fetch_one(&db.pool),
	)
	.await
}
