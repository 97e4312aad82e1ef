//! Retrieval-grounded chat turns.
//!
//! A turn persists the user message, assembles the model context from the
//! conversation history plus the nearest notes, asks the completion provider,
//! then persists and returns the answer.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Error, RecallService, Result};
use recall_domain::{Role, text};
use recall_storage::models::Note;

/// Fixed answer for a blank prompt; no provider call, nothing persisted.
pub const NO_MESSAGE_ANSWER: &str = "I didn't receive any message.";

const SYSTEM_PROMPT: &str = "You are a helpful personal memory assistant. Answer the user's \
	question using the conversation history and, when present, the notes context. Cite notes by \
	their [NOTE id] label when you draw on them. If the notes do not cover the question, say so \
	and answer from general knowledge.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
	pub user_id: i64,
	/// `None` starts a fresh conversation titled from the prompt.
	pub conversation_id: Option<i64>,
	pub prompt: String,
	pub top_k: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatSource {
	pub note_id: i64,
	pub title: Option<String>,
	pub snippet: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
	pub conversation_id: Option<i64>,
	pub answer: String,
	pub sources: Vec<ChatSource>,
	pub message_id: Option<i64>,
}

impl RecallService {
	/// One full chat turn.
	pub async fn ask(&self, req: ChatRequest) -> Result<ChatResponse> {
		let prompt = req.prompt.trim();

		if prompt.is_empty() {
			return Ok(ChatResponse {
				conversation_id: req.conversation_id,
				answer: NO_MESSAGE_ANSWER.to_string(),
				sources: Vec::new(),
				message_id: None,
			});
		}

		let conversation = match req.conversation_id {
			Some(id) =>
				self.stores.conversations.get(id).await?.ok_or_else(|| Error::NotFound {
					message: format!("Conversation {id} does not exist."),
				})?,
			None => {
				let title = text::truncate_chars(prompt, self.cfg.chat.title_chars);

				self.stores.conversations.create(req.user_id, Some(title)).await?
			},
		};

		self.stores.conversations.add_message(conversation.id, Role::User, prompt).await?;

		// History includes the message just stored; the page arrives newest
		// first and is reversed into reading order.
		let mut history = self
			.stores
			.conversations
			.messages_page(conversation.id, self.cfg.chat.history_limit, None)
			.await?;

		history.reverse();

		let vector = self.embed_text(prompt).await?;
		let top_k = req.top_k.unwrap_or(self.cfg.chat.default_top_k);
		let notes = self.stores.notes.search_by_vector(req.user_id, &vector, top_k).await?;
		let sources = notes
			.iter()
			.map(|note| ChatSource {
				note_id: note.id,
				title: note.title.clone(),
				snippet: format!(
					"{}...",
					text::truncate_chars(&note.content, self.cfg.chat.snippet_chars)
				),
			})
			.collect();
		let mut messages = vec![json!({ "role": "system", "content": SYSTEM_PROMPT })];

		if let Some(context) = notes_context(&notes) {
			messages.push(json!({ "role": "system", "content": context }));
		}

		messages.extend(
			history
				.iter()
				.map(|message| json!({ "role": message.role, "content": message.content })),
		);

		let answer =
			self.providers.completion.complete(&self.cfg.providers.completion, &messages).await?;
		let stored = self
			.stores
			.conversations
			.add_message(conversation.id, Role::Assistant, &answer)
			.await?;

		tracing::info!(
			user_id = req.user_id,
			conversation_id = conversation.id,
			notes = notes.len(),
			"Answered chat turn.",
		);

		Ok(ChatResponse {
			conversation_id: Some(conversation.id),
			answer,
			sources,
			message_id: Some(stored.id),
		})
	}
}

/// Notes block for the model, or `None` when retrieval found nothing.
fn notes_context(notes: &[Note]) -> Option<String> {
	if notes.is_empty() {
		return None;
	}

	let blocks: Vec<String> =
		notes.iter().map(|note| format!("[NOTE {}]\n{}", note.id, note.content)).collect();

	Some(format!("--- NOTES CONTEXT ---\n{}", blocks.join("\n\n")))
}
