//! OpenAI-compatible chat completions endpoint.
//!
//! Message content may be a plain string or a content-block array (text plus
//! base64 image URLs for the upload path); both are passed through verbatim.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use recall_config::CompletionProviderConfig;

pub async fn complete(cfg: &CompletionProviderConfig, messages: &[Value]) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_response(json)
}

fn parse_completion_response(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(|content| content.to_string())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "role": "assistant", "content": "The sky is blue." } },
				{ "message": { "role": "assistant", "content": "ignored" } }
			]
		});

		assert_eq!(parse_completion_response(json).expect("parse failed"), "The sky is blue.");
	}

	#[test]
	fn rejects_empty_choices() {
		let json = serde_json::json!({ "choices": [] });

		assert!(matches!(
			parse_completion_response(json),
			Err(Error::InvalidResponse { .. })
		));
	}

	#[test]
	fn rejects_structured_content() {
		let json = serde_json::json!({
			"choices": [{ "message": { "content": { "parts": [] } } }]
		});

		assert!(parse_completion_response(json).is_err());
	}
}
