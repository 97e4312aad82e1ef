//! Bulk ingestion: raw extracted text becomes a series of embedded notes.

use serde::{Deserialize, Serialize};

use crate::{RecallService, Result};
use recall_domain::{chunking, text};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestTextRequest {
	pub user_id: i64,
	pub source_filename: String,
	pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestTextResponse {
	pub note_ids: Vec<i64>,
}

impl RecallService {
	/// Normalizes and chunks the text, then creates and embeds one note per
	/// chunk. Notes created before a failed embedding stay behind,
	/// unembedded; search skips them until a later embedding pass succeeds.
	pub async fn ingest_text(&self, req: IngestTextRequest) -> Result<IngestTextResponse> {
		let cleaned = text::normalize(&req.text);
		let chunks = chunking::chunk(
			&cleaned,
			self.cfg.chunking.max_chars,
			self.cfg.chunking.overlap_chars,
		)?;
		let mut note_ids = Vec::with_capacity(chunks.len());

		for (index, chunk) in chunks.iter().enumerate() {
			let title = format!("{} (part {})", req.source_filename, index + 1);
			let note = self
				.stores
				.notes
				.create(req.user_id, Some(&title), chunk, Some(&req.source_filename))
				.await?;

			note_ids.push(note.id);

			let vector = self.embed_text(chunk).await.inspect_err(|err| {
				tracing::warn!(
					note_id = note.id,
					source = req.source_filename.as_str(),
					error = %err,
					"Chunk ingested but not embedded.",
				);
			})?;

			self.stores.notes.save_embedding(note.id, &vector).await?;
		}

		tracing::info!(
			user_id = req.user_id,
			source = req.source_filename.as_str(),
			chunks = note_ids.len(),
			"Ingested text into notes.",
		);

		Ok(IngestTextResponse { note_ids })
	}
}
