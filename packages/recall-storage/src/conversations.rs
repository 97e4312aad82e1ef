//! Conversation and message persistence.
//!
//! Message pages are newest-first at this boundary; callers needing
//! chronological order reverse explicitly. Cursor pagination walks backward
//! from the most recent message via `before_id`.

use crate::{
	Error, Result,
	db::Db,
	error::is_foreign_key_violation,
	models::{Conversation, Message},
};

const CONVERSATION_COLUMNS: &str = "id, user_id, title, created_at";
const MESSAGE_COLUMNS: &str = "id, conversation_id, role, content, created_at";

pub async fn insert_conversation(
	db: &Db,
	user_id: i64,
	title: Option<&str>,
) -> Result<Conversation> {
	let sql = format!(
		"\
INSERT INTO conversations (user_id, title)
VALUES ($1, $2)
RETURNING {CONVERSATION_COLUMNS}"
	);
	let result = db
		.with_deadline(
			"insert_conversation",
			sqlx::query_as::<_, Conversation>(&sql)
				.bind(user_id)
				.bind(title)
				.fetch_one(&db.pool),
		)
		.await;

	match result {
		Err(Error::Sqlx(err)) if is_foreign_key_violation(&err) =>
			Err(Error::NotFound(format!("User {user_id} does not exist."))),
		other => other,
	}
}

pub async fn fetch_conversation(db: &Db, conversation_id: i64) -> Result<Option<Conversation>> {
	let sql = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1");

	db.with_deadline(
		"fetch_conversation",
		sqlx::query_as::<_, Conversation>(&sql).bind(conversation_id).fetch_optional(&db.pool),
	)
	.await
}

pub async fn list_conversations(db: &Db, user_id: i64) -> Result<Vec<Conversation>> {
	let sql = format!(
		"SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE user_id = $1 ORDER BY id DESC"
	);

	db.with_deadline(
		"list_conversations",
		sqlx::query_as::<_, Conversation>(&sql).bind(user_id).fetch_all(&db.pool),
	)
	.await
}

pub async fn rename_conversation(
	db: &Db,
	conversation_id: i64,
	title: &str,
) -> Result<Option<Conversation>> {
	let sql = format!(
		"UPDATE conversations SET title = $2 WHERE id = $1 RETURNING {CONVERSATION_COLUMNS}"
	);

	db.with_deadline(
		"rename_conversation",
		sqlx::query_as::<_, Conversation>(&sql)
			.bind(conversation_id)
			.bind(title)
			.fetch_optional(&db.pool),
	)
	.await
}

/// Deletes the conversation; its messages cascade with it.
pub async fn delete_conversation(db: &Db, conversation_id: i64) -> Result<bool> {
	let result = db
		.with_deadline(
			"delete_conversation",
			sqlx::query("DELETE FROM conversations WHERE id = $1")
				.bind(conversation_id)
				.execute(&db.pool),
		)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// Appends a message. The database assigns the monotonic id that defines
/// canonical ordering, so concurrent writers never interleave out of commit
/// order.
pub async fn insert_message(
	db: &Db,
	conversation_id: i64,
	role: &str,
	content: &str,
) -> Result<Message> {
	let sql = format!(
		"\
INSERT INTO messages (conversation_id, role, content)
VALUES ($1, $2, $3)
RETURNING {MESSAGE_COLUMNS}"
	);
	let result = db
		.with_deadline(
			"insert_message",
			sqlx::query_as::<_, Message>(&sql)
				.bind(conversation_id)
				.bind(role)
				.bind(content)
				.fetch_one(&db.pool),
		)
		.await;

	match result {
		Err(Error::Sqlx(err)) if is_foreign_key_violation(&err) =>
			Err(Error::NotFound(format!("Conversation {conversation_id} does not exist."))),
		other => other,
	}
}

/// Newest-first page of up to `limit` messages with `id < before_id` when a
/// cursor is supplied.
pub async fn messages_page(
	db: &Db,
	conversation_id: i64,
	limit: u32,
	before_id: Option<i64>,
) -> Result<Vec<Message>> {
	let sql = format!(
		"\
SELECT {MESSAGE_COLUMNS}
FROM messages
WHERE conversation_id = $1 AND ($2::BIGINT IS NULL OR id < $2)
ORDER BY id DESC
LIMIT $3"
	);

	db.with_deadline(
		"messages_page",
		sqlx::query_as::<_, Message>(&sql)
			.bind(conversation_id)
			.bind(before_id)
			.bind(i64::from(limit))
			.fetch_all(&db.pool),
	)
	.await
}

/// All messages for a set of conversations, chronological, for nesting under
/// a conversation listing.
pub async fn messages_for_conversations(
	db: &Db,
	conversation_ids: &[i64],
) -> Result<Vec<Message>> {
	if conversation_ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!(
		"\
SELECT {MESSAGE_COLUMNS}
FROM messages
WHERE conversation_id = ANY($1)
ORDER BY id"
	);

	db.with_deadline(
		"messages_for_conversations",
		sqlx::query_as::<_, Message>(&sql)
			.bind(conversation_ids.to_vec())
			.fetch_all(&db.pool),
	)
	.await
}

pub async fn delete_message(db: &Db, message_id: i64) -> Result<bool> {
	let result = db
		.with_deadline(
			"delete_message",
			sqlx::query("DELETE FROM messages WHERE id = $1").bind(message_id).execute(&db.pool),
		)
		.await?;

	Ok(result.rows_affected() > 0)
}
