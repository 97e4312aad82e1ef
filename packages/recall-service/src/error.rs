pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Provider call timed out: {message}")]
	ProviderTimeout { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Storage call timed out: {message}")]
	StorageTimeout { message: String },
}
impl From<recall_storage::Error> for Error {
	fn from(err: recall_storage::Error) -> Self {
		use recall_storage::Error as Storage;

		match err {
			Storage::NotFound(message) => Self::NotFound { message },
			Storage::InvalidArgument(message) => Self::InvalidRequest { message },
			Storage::Timeout(message) => Self::StorageTimeout { message },
			Storage::Sqlx(err) => Self::Storage { message: err.to_string() },
		}
	}
}
impl From<recall_providers::Error> for Error {
	fn from(err: recall_providers::Error) -> Self {
		match err {
			recall_providers::Error::Timeout { message } => Self::ProviderTimeout { message },
			other => Self::Provider { message: other.to_string() },
		}
	}
}
impl From<recall_domain::Error> for Error {
	fn from(err: recall_domain::Error) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
