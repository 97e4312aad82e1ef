//! Orchestration core: note CRUD and retrieval, bulk ingestion, conversation
//! management, and retrieval-grounded chat turns.
//!
//! Stores and providers sit behind object-safe traits so the Postgres and
//! HTTP implementations stay swappable for test doubles. Every stateful
//! collaborator is passed in explicitly; there is no ambient global state.

pub mod chat;
pub mod conversations;
pub mod ingest;
pub mod notes;
pub mod upload;

mod error;
mod stores;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use chat::{ChatRequest, ChatResponse, ChatSource, NO_MESSAGE_ANSWER};
pub use conversations::{
	AddMessageRequest, AddMessageToNoteRequest, AddMessageToNoteResponse, ConversationView,
	ConversationWithMessages, CreateConversationRequest, GetMessagesRequest, MessageView,
	RenameConversationRequest,
};
pub use error::{Error, Result};
pub use ingest::{IngestTextRequest, IngestTextResponse};
pub use notes::{CreateNoteRequest, NoteView, SearchNotesRequest, UpdateNoteRequest};
pub use stores::{PgConversationStore, PgNoteStore};
pub use upload::{Attachment, UploadRequest};

use recall_config::{CompletionProviderConfig, Config, EmbeddingProviderConfig};
use recall_domain::Role;
use recall_providers::{completion, embedding, extractor};
use recall_storage::{
	db::Db,
	models::{Conversation, Embedding, Message, Note},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait NoteStore
where
	Self: Send + Sync,
{
	fn create<'a>(
		&'a self,
		user_id: i64,
		title: Option<&'a str>,
		content: &'a str,
		source: Option<&'a str>,
	) -> BoxFuture<'a, Result<Note>>;

	fn save_embedding<'a>(&'a self, note_id: i64, vector: &'a [f32])
	-> BoxFuture<'a, Result<Embedding>>;

	fn get<'a>(&'a self, note_id: i64) -> BoxFuture<'a, Result<Option<Note>>>;

	fn embedding<'a>(&'a self, note_id: i64) -> BoxFuture<'a, Result<Option<Embedding>>>;

	fn list<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Vec<Note>>>;

	fn update<'a>(
		&'a self,
		note_id: i64,
		title: Option<&'a str>,
		content: Option<&'a str>,
	) -> BoxFuture<'a, Result<Option<Note>>>;

	fn delete<'a>(&'a self, note_id: i64) -> BoxFuture<'a, Result<bool>>;

	fn search_by_vector<'a>(
		&'a self,
		user_id: i64,
		query: &'a [f32],
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<Note>>>;
}

pub trait ConversationStore
where
	Self: Send + Sync,
{
	fn create<'a>(
		&'a self,
		user_id: i64,
		title: Option<&'a str>,
	) -> BoxFuture<'a, Result<Conversation>>;

	fn get<'a>(&'a self, conversation_id: i64) -> BoxFuture<'a, Result<Option<Conversation>>>;

	fn list_for_user<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Vec<Conversation>>>;

	fn add_message<'a>(
		&'a self,
		conversation_id: i64,
		role: Role,
		content: &'a str,
	) -> BoxFuture<'a, Result<Message>>;

	/// Newest-first page; `before_id` pages backward through older messages.
	fn messages_page<'a>(
		&'a self,
		conversation_id: i64,
		limit: u32,
		before_id: Option<i64>,
	) -> BoxFuture<'a, Result<Vec<Message>>>;

	/// Chronological messages across a set of conversations.
	fn messages_for<'a>(&'a self, conversation_ids: &'a [i64])
	-> BoxFuture<'a, Result<Vec<Message>>>;

	fn rename<'a>(
		&'a self,
		conversation_id: i64,
		title: &'a str,
	) -> BoxFuture<'a, Result<Option<Conversation>>>;

	fn delete<'a>(&'a self, conversation_id: i64) -> BoxFuture<'a, Result<bool>>;

	fn delete_message<'a>(&'a self, message_id: i64) -> BoxFuture<'a, Result<bool>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, Result<String>>;
}

pub trait FileExtractor
where
	Self: Send + Sync,
{
	/// Best effort; unsupported formats yield a sentinel string, never an
	/// error.
	fn extract(&self, bytes: &[u8], filename: &str) -> String;
}

#[derive(Clone)]
pub struct Stores {
	pub notes: Arc<dyn NoteStore>,
	pub conversations: Arc<dyn ConversationStore>,
}
impl Stores {
	pub fn postgres(db: Arc<Db>) -> Self {
		Self {
			notes: Arc::new(PgNoteStore::new(db.clone())),
			conversations: Arc::new(PgConversationStore::new(db)),
		}
	}
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
	pub extractor: Arc<dyn FileExtractor>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
		extractor: Arc<dyn FileExtractor>,
	) -> Self {
		Self { embedding, completion, extractor }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), completion: provider.clone(), extractor: provider }
	}
}

pub struct RecallService {
	pub cfg: Config,
	pub stores: Stores,
	pub providers: Providers,
}
impl RecallService {
	pub fn new(cfg: Config, db: Arc<Db>) -> Self {
		Self { cfg, stores: Stores::postgres(db), providers: Providers::default() }
	}

	pub fn with_parts(cfg: Config, stores: Stores, providers: Providers) -> Self {
		Self { cfg, stores, providers }
	}

	/// Embeds one text and enforces the configured vector dimension before
	/// anything touches storage.
	pub(crate) async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
		let texts = [text.to_string()];
		let embeddings = self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;
		let Some(vector) = embeddings.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != self.cfg.storage.postgres.vector_dim as usize {
			return Err(Error::Provider {
				message: format!(
					"Embedding vector dimension {} does not match configured dimension {}.",
					vector.len(),
					self.cfg.storage.postgres.vector_dim,
				),
			});
		}

		Ok(vector)
	}
}

struct DefaultProviders;
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}
impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(completion::complete(cfg, messages).await?) })
	}
}
impl FileExtractor for DefaultProviders {
	fn extract(&self, bytes: &[u8], filename: &str) -> String {
		extractor::extract_text(bytes, filename)
	}
}
