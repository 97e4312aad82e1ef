pub mod completion;
pub mod embedding;
pub mod extractor;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub(crate) fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidResponse {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_bearer_and_default_headers() {
		let mut defaults = Map::new();

		defaults.insert("x-request-source".to_string(), Value::String("recall".to_string()));

		let headers = auth_headers("sk-test", &defaults).expect("headers failed");

		assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
		assert_eq!(headers.get("x-request-source").unwrap(), "recall");
	}

	#[test]
	fn rejects_non_string_default_header() {
		let mut defaults = Map::new();

		defaults.insert("x-retries".to_string(), Value::from(3));

		assert!(auth_headers("sk-test", &defaults).is_err());
	}
}
