use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub chunking: Chunking,
	#[serde(default)]
	pub chat: Chat,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	#[serde(default = "default_statement_timeout_ms")]
	pub statement_timeout_ms: u64,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub completion: CompletionProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Character-window chunking used by bulk ingestion.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Chunking {
	pub max_chars: usize,
	pub overlap_chars: usize,
}
impl Default for Chunking {
	fn default() -> Self {
		Self { max_chars: 2_500, overlap_chars: 400 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Chat {
	/// Most recent messages loaded into the prompt window.
	pub history_limit: u32,
	/// Retrieved notes per turn when the caller does not override it.
	pub default_top_k: u32,
	/// Preview length for cited note snippets.
	pub snippet_chars: usize,
	/// Prefix of the first user message used as a new conversation title.
	pub title_chars: usize,
}
impl Default for Chat {
	fn default() -> Self {
		Self { history_limit: 1_000, default_top_k: 5, snippet_chars: 200, title_chars: 50 }
	}
}

fn default_statement_timeout_ms() -> u64 {
	10_000
}
