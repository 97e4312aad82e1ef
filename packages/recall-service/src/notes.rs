//! Note CRUD and similarity search.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, RecallService, Result};
use recall_storage::models::Note;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
	pub user_id: i64,
	pub title: Option<String>,
	pub content: String,
	pub source: Option<String>,
	/// Embedding happens right after the row exists; disable for bulk flows
	/// that embed later.
	#[serde(default = "default_embed")]
	pub embed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
	pub note_id: i64,
	pub title: Option<String>,
	pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNotesRequest {
	pub user_id: i64,
	pub query: String,
	pub top_k: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteView {
	pub id: i64,
	pub user_id: i64,
	pub title: Option<String>,
	pub content: String,
	pub source: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl From<Note> for NoteView {
	fn from(note: Note) -> Self {
		Self {
			id: note.id,
			user_id: note.user_id,
			title: note.title,
			content: note.content,
			source: note.source,
			created_at: note.created_at,
		}
	}
}

impl RecallService {
	pub async fn create_note(&self, req: CreateNoteRequest) -> Result<NoteView> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Note content must be non-empty.".to_string(),
			});
		}

		let note = self
			.stores
			.notes
			.create(req.user_id, req.title.as_deref(), &req.content, req.source.as_deref())
			.await?;

		if req.embed {
			// The note row is already committed; a provider failure here
			// leaves it visible but unembedded rather than rolling it back.
			let vector = self.embed_text(&req.content).await.inspect_err(|err| {
				tracing::warn!(note_id = note.id, error = %err, "Note created but not embedded.");
			})?;

			self.stores.notes.save_embedding(note.id, &vector).await?;
		}

		Ok(note.into())
	}

	pub async fn get_note(&self, note_id: i64) -> Result<Option<NoteView>> {
		Ok(self.stores.notes.get(note_id).await?.map(NoteView::from))
	}

	pub async fn list_notes(&self, user_id: i64) -> Result<Vec<NoteView>> {
		Ok(self.stores.notes.list(user_id).await?.into_iter().map(NoteView::from).collect())
	}

	/// Partial update. A content change re-embeds the note, since stored
	/// vectors must describe stored text.
	pub async fn update_note(&self, req: UpdateNoteRequest) -> Result<Option<NoteView>> {
		if req.title.is_none() && req.content.is_none() {
			return Err(Error::InvalidRequest {
				message: "Update requires a title or content.".to_string(),
			});
		}
		if let Some(content) = req.content.as_ref()
			&& content.trim().is_empty()
		{
			return Err(Error::InvalidRequest {
				message: "Note content must be non-empty.".to_string(),
			});
		}

		let Some(note) =
			self.stores.notes.update(req.note_id, req.title.as_deref(), req.content.as_deref()).await?
		else {
			return Ok(None);
		};

		if let Some(content) = req.content.as_ref() {
			let vector = self.embed_text(content).await?;

			self.stores.notes.save_embedding(note.id, &vector).await?;
		}

		Ok(Some(note.into()))
	}

	pub async fn delete_note(&self, note_id: i64) -> Result<bool> {
		Ok(self.stores.notes.delete(note_id).await?)
	}

	/// Embeds the query text and returns the owner's nearest notes.
	pub async fn search_notes(&self, req: SearchNotesRequest) -> Result<Vec<NoteView>> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Search query must be non-empty.".to_string(),
			});
		}

		let vector = self.embed_text(query).await?;

		self.search_notes_by_vector(req.user_id, &vector, req.top_k).await
	}

	pub async fn search_notes_by_vector(
		&self,
		user_id: i64,
		vector: &[f32],
		top_k: Option<u32>,
	) -> Result<Vec<NoteView>> {
		let top_k = top_k.unwrap_or(self.cfg.chat.default_top_k);
		let notes = self.stores.notes.search_by_vector(user_id, vector, top_k).await?;

		Ok(notes.into_iter().map(NoteView::from).collect())
	}
}

fn default_embed() -> bool {
	true
}
