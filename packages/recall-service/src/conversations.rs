//! Conversation management and the message-to-note promotion path.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, RecallService, Result};
use recall_domain::Role;
use recall_storage::models::{Conversation, Message};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateConversationRequest {
	pub user_id: i64,
	pub title: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenameConversationRequest {
	pub conversation_id: i64,
	pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddMessageRequest {
	pub conversation_id: i64,
	pub role: Role,
	pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetMessagesRequest {
	pub conversation_id: i64,
	pub limit: Option<u32>,
	pub before_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddMessageToNoteRequest {
	pub user_id: i64,
	pub content: String,
	pub title: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddMessageToNoteResponse {
	pub note_id: i64,
	pub title: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationView {
	pub id: i64,
	pub user_id: i64,
	pub title: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl From<Conversation> for ConversationView {
	fn from(conversation: Conversation) -> Self {
		Self {
			id: conversation.id,
			user_id: conversation.user_id,
			title: conversation.title,
			created_at: conversation.created_at,
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationWithMessages {
	#[serde(flatten)]
	pub conversation: ConversationView,
	pub messages: Vec<MessageView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageView {
	pub id: i64,
	pub conversation_id: i64,
	pub role: String,
	pub content: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl From<Message> for MessageView {
	fn from(message: Message) -> Self {
		Self {
			id: message.id,
			conversation_id: message.conversation_id,
			role: message.role,
			content: message.content,
			created_at: message.created_at,
		}
	}
}

impl RecallService {
	pub async fn create_conversation(
		&self,
		req: CreateConversationRequest,
	) -> Result<ConversationView> {
		let conversation =
			self.stores.conversations.create(req.user_id, req.title.as_deref()).await?;

		Ok(conversation.into())
	}

	/// All conversations for a user, newest first, each with its messages in
	/// chronological order.
	pub async fn list_conversations(&self, user_id: i64) -> Result<Vec<ConversationWithMessages>> {
		let conversations = self.stores.conversations.list_for_user(user_id).await?;
		let ids: Vec<i64> = conversations.iter().map(|c| c.id).collect();
		let messages = self.stores.conversations.messages_for(&ids).await?;
		let mut nested: Vec<ConversationWithMessages> = conversations
			.into_iter()
			.map(|conversation| ConversationWithMessages {
				conversation: conversation.into(),
				messages: Vec::new(),
			})
			.collect();

		for message in messages {
			if let Some(entry) =
				nested.iter_mut().find(|entry| entry.conversation.id == message.conversation_id)
			{
				entry.messages.push(message.into());
			}
		}

		Ok(nested)
	}

	pub async fn add_message(&self, req: AddMessageRequest) -> Result<MessageView> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Message content must be non-empty.".to_string(),
			});
		}

		let message =
			self.stores.conversations.add_message(req.conversation_id, req.role, &req.content).await?;

		Ok(message.into())
	}

	/// Chronological messages for display. The store pages newest-first;
	/// this surface reverses for the reader.
	pub async fn get_messages(&self, req: GetMessagesRequest) -> Result<Vec<MessageView>> {
		let limit = req.limit.unwrap_or(self.cfg.chat.history_limit);
		let mut messages = self
			.stores
			.conversations
			.messages_page(req.conversation_id, limit, req.before_id)
			.await?;

		messages.reverse();

		Ok(messages.into_iter().map(MessageView::from).collect())
	}

	pub async fn rename_conversation(
		&self,
		req: RenameConversationRequest,
	) -> Result<Option<ConversationView>> {
		if req.title.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Conversation title must be non-empty.".to_string(),
			});
		}

		let renamed = self.stores.conversations.rename(req.conversation_id, &req.title).await?;

		Ok(renamed.map(ConversationView::from))
	}

	pub async fn delete_conversation(&self, conversation_id: i64) -> Result<bool> {
		Ok(self.stores.conversations.delete(conversation_id).await?)
	}

	pub async fn delete_message(&self, message_id: i64) -> Result<bool> {
		Ok(self.stores.conversations.delete_message(message_id).await?)
	}

	/// Promotes chat content into a searchable note: create, embed, store the
	/// vector.
	pub async fn add_message_to_note(
		&self,
		req: AddMessageToNoteRequest,
	) -> Result<AddMessageToNoteResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Note content must be non-empty.".to_string(),
			});
		}

		let note = self
			.stores
			.notes
			.create(req.user_id, req.title.as_deref(), &req.content, Some("chat"))
			.await?;
		let vector = self.embed_text(&req.content).await?;

		self.stores.notes.save_embedding(note.id, &vector).await?;

		Ok(AddMessageToNoteResponse { note_id: note.id, title: note.title })
	}
}
