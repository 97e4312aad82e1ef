use time::OffsetDateTime;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
	pub id: i64,
	pub user_id: i64,
	pub title: Option<String>,
	pub content: String,
	pub source: Option<String>,
	pub created_at: OffsetDateTime,
}

/// At most one per note; replaced in place on re-embedding.
#[derive(Clone, Debug)]
pub struct Embedding {
	pub id: i64,
	pub note_id: i64,
	pub vector: Vec<f32>,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Conversation {
	pub id: i64,
	pub user_id: i64,
	pub title: Option<String>,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Message {
	pub id: i64,
	pub conversation_id: i64,
	pub role: String,
	pub content: String,
	pub created_at: OffsetDateTime,
}
