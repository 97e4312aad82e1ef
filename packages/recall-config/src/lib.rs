mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Chat, Chunking, CompletionProviderConfig, Config, EmbeddingProviderConfig, Postgres, Providers,
	Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.statement_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.statement_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.postgres.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.postgres.vector_dim."
				.to_string(),
		});
	}
	if cfg.chunking.max_chars == 0 {
		return Err(Error::Validation {
			message: "chunking.max_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.chunking.overlap_chars >= cfg.chunking.max_chars {
		return Err(Error::Validation {
			message: "chunking.overlap_chars must be less than chunking.max_chars.".to_string(),
		});
	}
	if cfg.chat.history_limit == 0 {
		return Err(Error::Validation {
			message: "chat.history_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.chat.default_top_k == 0 {
		return Err(Error::Validation {
			message: "chat.default_top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.chat.snippet_chars == 0 {
		return Err(Error::Validation {
			message: "chat.snippet_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.chat.title_chars == 0 {
		return Err(Error::Validation {
			message: "chat.title_chars must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("completion", &cfg.providers.completion.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}
	for (label, timeout) in [
		("embedding", cfg.providers.embedding.timeout_ms),
		("completion", cfg.providers.completion.timeout_ms),
	] {
		if timeout == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}

	Ok(())
}
