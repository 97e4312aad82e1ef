pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Provider call timed out: {message}")]
	Timeout { message: String },
	#[error(transparent)]
	Http(reqwest::Error),
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		// Deadline overruns stay distinguishable from outright failures.
		if err.is_timeout() {
			Self::Timeout { message: err.to_string() }
		} else {
			Self::Http(err)
		}
	}
}
