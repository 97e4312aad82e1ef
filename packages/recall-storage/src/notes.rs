//! Note and embedding persistence.
//!
//! Creating a note never embeds it; embedding is an explicit upsert so bulk
//! ingestion can defer or skip it and a failed provider call leaves a
//! visible unembedded note behind.

use crate::{
	Error, Result,
	db::Db,
	error::is_foreign_key_violation,
	models::{Embedding, Note},
	vector::{parse_pg_vector, vector_to_pg},
};

const NOTE_COLUMNS: &str = "id, user_id, title, content, source, created_at";

pub async fn insert_note(
	db: &Db,
	user_id: i64,
	title: Option<&str>,
	content: &str,
	source: Option<&str>,
) -> Result<Note> {
	let sql = format!(
		"\
INSERT INTO notes (user_id, title, content, source)
VALUES ($1, $2, $3, $4)
RETURNING {NOTE_COLUMNS}"
	);
	let result = db
		.with_deadline(
			"insert_note",
			sqlx::query_as::<_, Note>(&sql)
				.bind(user_id)
				.bind(title)
				.bind(content)
				.bind(source)
				.fetch_one(&db.pool),
		)
		.await;

	match result {
		Err(Error::Sqlx(err)) if is_foreign_key_violation(&err) =>
			Err(Error::NotFound(format!("User {user_id} does not exist."))),
		other => other,
	}
}

/// Upserts the embedding for a note. Exactly one row per note survives
/// concurrent calls; the last committed vector wins.
pub async fn save_embedding(db: &Db, note_id: i64, vector: &[f32]) -> Result<Embedding> {
	check_dimension(db, vector)?;

	let vec_text = vector_to_pg(vector);
	let result = db
		.with_deadline(
			"save_embedding",
			sqlx::query_as::<_, (i64, i64, String)>(
				"\
INSERT INTO embeddings (note_id, vec)
VALUES ($1, $2::text::vector)
ON CONFLICT (note_id) DO UPDATE
SET vec = EXCLUDED.vec
RETURNING id, note_id, vec::text",
			)
			.bind(note_id)
			.bind(vec_text.as_str())
			.fetch_one(&db.pool),
		)
		.await;
	let (id, note_id, vec_text) = match result {
		Err(Error::Sqlx(err)) if is_foreign_key_violation(&err) =>
			return Err(Error::NotFound(format!("Note {note_id} does not exist."))),
		other => other?,
	};

	Ok(Embedding { id, note_id, vector: parse_pg_vector(&vec_text)? })
}

pub async fn fetch_note(db: &Db, note_id: i64) -> Result<Option<Note>> {
	let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1");

	db.with_deadline(
		"fetch_note",
		sqlx::query_as::<_, Note>(&sql).bind(note_id).fetch_optional(&db.pool),
	)
	.await
}

pub async fn fetch_embedding(db: &Db, note_id: i64) -> Result<Option<Embedding>> {
	let row = db
		.with_deadline(
			"fetch_embedding",
			sqlx::query_as::<_, (i64, i64, String)>(
				"SELECT id, note_id, vec::text FROM embeddings WHERE note_id = $1",
			)
			.bind(note_id)
			.fetch_optional(&db.pool),
		)
		.await?;

	row.map(|(id, note_id, vec_text)| {
		Ok(Embedding { id, note_id, vector: parse_pg_vector(&vec_text)? })
	})
	.transpose()
}

pub async fn list_notes(db: &Db, user_id: i64) -> Result<Vec<Note>> {
	let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = $1 ORDER BY id DESC");

	db.with_deadline(
		"list_notes",
		sqlx::query_as::<_, Note>(&sql).bind(user_id).fetch_all(&db.pool),
	)
	.await
}

pub async fn update_note(
	db: &Db,
	note_id: i64,
	title: Option<&str>,
	content: Option<&str>,
) -> Result<Option<Note>> {
	let sql = format!(
		"\
UPDATE notes
SET
	title = COALESCE($2, title),
	content = COALESCE($3, content)
WHERE id = $1
RETURNING {NOTE_COLUMNS}"
	);

	db.with_deadline(
		"update_note",
		sqlx::query_as::<_, Note>(&sql)
			.bind(note_id)
			.bind(title)
			.bind(content)
			.fetch_optional(&db.pool),
	)
	.await
}

/// Deletes the note; its embedding cascades with it.
pub async fn delete_note(db: &Db, note_id: i64) -> Result<bool> {
	let result = db
		.with_deadline(
			"delete_note",
			sqlx::query("DELETE FROM notes WHERE id = $1").bind(note_id).execute(&db.pool),
		)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// Owner-scoped nearest-neighbor search, ascending L2 distance, ties broken
/// by note id so identical inputs return identical orderings.
pub async fn search_by_vector(
	db: &Db,
	user_id: i64,
	query: &[f32],
	top_k: u32,
) -> Result<Vec<Note>> {
	check_dimension(db, query)?;

	let vec_text = vector_to_pg(query);
	let sql = "\
SELECT n.id, n.user_id, n.title, n.content, n.source, n.created_at
FROM notes n
JOIN embeddings e ON e.note_id = n.id
WHERE n.user_id = $1
ORDER BY e.vec <-> $2::text::vector, n.id
LIMIT $3";

	db.with_deadline(
		"search_by_vector",
		sqlx::query_as::<_, Note>(sql)
			.bind(user_id)
			.bind(vec_text.as_str())
			.bind(i64::from(top_k))
			.fetch_all(&db.pool),
	)
	.await
}

fn check_dimension(db: &Db, vector: &[f32]) -> Result<()> {
	if vector.len() != db.vector_dim() as usize {
		return Err(Error::InvalidArgument(format!(
			"Vector dimension {} does not match configured dimension {}.",
			vector.len(),
			db.vector_dim(),
		)));
	}

	Ok(())
}
