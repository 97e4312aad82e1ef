//! Postgres-backed store implementations delegating to `recall-storage`.

use std::sync::Arc;

use crate::{BoxFuture, ConversationStore, NoteStore, Result};
use recall_domain::Role;
use recall_storage::{
	conversations, db::Db,
	models::{Conversation, Embedding, Message, Note},
	notes,
};

pub struct PgNoteStore {
	db: Arc<Db>,
}
impl PgNoteStore {
	pub fn new(db: Arc<Db>) -> Self {
		Self { db }
	}
}
impl NoteStore for PgNoteStore {
	fn create<'a>(
		&'a self,
		user_id: i64,
		title: Option<&'a str>,
		content: &'a str,
		source: Option<&'a str>,
	) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			Ok(notes::insert_note(&self.db, user_id, title, content, source).await?)
		})
	}

	fn save_embedding<'a>(
		&'a self,
		note_id: i64,
		vector: &'a [f32],
	) -> BoxFuture<'a, Result<Embedding>> {
		Box::pin(async move { Ok(notes::save_embedding(&self.db, note_id, vector).await?) })
	}

	fn get<'a>(&'a self, note_id: i64) -> BoxFuture<'a, Result<Option<Note>>> {
		Box::pin(async move { Ok(notes::fetch_note(&self.db, note_id).await?) })
	}

	fn embedding<'a>(&'a self, note_id: i64) -> BoxFuture<'a, Result<Option<Embedding>>> {
		Box::pin(async move { Ok(notes::fetch_embedding(&self.db, note_id).await?) })
	}

	fn list<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(async move { Ok(notes::list_notes(&self.db, user_id).await?) })
	}

	fn update<'a>(
		&'a self,
		note_id: i64,
		title: Option<&'a str>,
		content: Option<&'a str>,
	) -> BoxFuture<'a, Result<Option<Note>>> {
		Box::pin(async move { Ok(notes::update_note(&self.db, note_id, title, content).await?) })
	}

	fn delete<'a>(&'a self, note_id: i64) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(notes::delete_note(&self.db, note_id).await?) })
	}

	fn search_by_vector<'a>(
		&'a self,
		user_id: i64,
		query: &'a [f32],
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(async move {
			Ok(notes::search_by_vector(&self.db, user_id, query, top_k).await?)
		})
	}
}

pub struct PgConversationStore {
	db: Arc<Db>,
}
impl PgConversationStore {
	pub fn new(db: Arc<Db>) -> Self {
		Self { db }
	}
}
impl ConversationStore for PgConversationStore {
	fn create<'a>(
		&'a self,
		user_id: i64,
		title: Option<&'a str>,
	) -> BoxFuture<'a, Result<Conversation>> {
		Box::pin(async move {
			Ok(conversations::insert_conversation(&self.db, user_id, title).await?)
		})
	}

	fn get<'a>(&'a self, conversation_id: i64) -> BoxFuture<'a, Result<Option<Conversation>>> {
		Box::pin(async move {
			Ok(conversations::fetch_conversation(&self.db, conversation_id).await?)
		})
	}

	fn list_for_user<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Vec<Conversation>>> {
		Box::pin(async move { Ok(conversations::list_conversations(&self.db, user_id).await?) })
	}

	fn add_message<'a>(
		&'a self,
		conversation_id: i64,
		role: Role,
		content: &'a str,
	) -> BoxFuture<'a, Result<Message>> {
		Box::pin(async move {
			Ok(conversations::insert_message(&self.db, conversation_id, role.as_str(), content)
				.await?)
		})
	}

	fn messages_page<'a>(
		&'a self,
		conversation_id: i64,
		limit: u32,
		before_id: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<Message>>> {
		Box::pin(async move {
			Ok(conversations::messages_page(&self.db, conversation_id, limit, before_id).await?)
		})
	}

	fn messages_for<'a>(
		&'a self,
		conversation_ids: &'a [i64],
	) -> BoxFuture<'a, Result<Vec<Message>>> {
		Box::pin(async move {
			Ok(conversations::messages_for_conversations(&self.db, conversation_ids).await?)
		})
	}

	fn rename<'a>(
		&'a self,
		conversation_id: i64,
		title: &'a str,
	) -> BoxFuture<'a, Result<Option<Conversation>>> {
		Box::pin(async move {
			Ok(conversations::rename_conversation(&self.db, conversation_id, title).await?)
		})
	}

	fn delete<'a>(&'a self, conversation_id: i64) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			Ok(conversations::delete_conversation(&self.db, conversation_id).await?)
		})
	}

	fn delete_message<'a>(&'a self, message_id: i64) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(conversations::delete_message(&self.db, message_id).await?) })
	}
}
