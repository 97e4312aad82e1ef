//! File-upload chat turns: attachments become model content blocks, the
//! conversation log keeps a human-readable summary instead of raw bytes.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{ChatResponse, Error, RecallService, Result};
use recall_domain::Role;

const DEFAULT_UPLOAD_PROMPT: &str = "Please analyze the attached file(s) in detail.";
const SYSTEM_PROMPT: &str = "You are a helpful personal memory assistant. The user has attached \
	one or more files. Analyze the attached content and answer their prompt about it.";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attachment {
	pub filename: String,
	pub mime: Option<String>,
	pub bytes: Vec<u8>,
}
impl Attachment {
	fn is_image(&self) -> bool {
		if self.mime.as_deref().is_some_and(|mime| mime.starts_with("image/")) {
			return true;
		}

		extension(&self.filename)
			.is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
	}

	fn image_mime(&self) -> String {
		if let Some(mime) = self.mime.as_deref()
			&& mime.starts_with("image/")
		{
			return mime.to_string();
		}

		match extension(&self.filename).map(|ext| ext.to_ascii_lowercase()).as_deref() {
			Some("png") => "image/png".to_string(),
			Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
			Some("gif") => "image/gif".to_string(),
			Some("webp") => "image/webp".to_string(),
			_ => "application/octet-stream".to_string(),
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadRequest {
	pub conversation_id: i64,
	pub prompt: String,
	pub attachments: Vec<Attachment>,
}

impl RecallService {
	/// One chat turn over attached files. No note retrieval; `sources` stays
	/// empty.
	pub async fn upload_and_ask(&self, req: UploadRequest) -> Result<ChatResponse> {
		if req.attachments.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Upload requires at least one attachment.".to_string(),
			});
		}

		let conversation =
			self.stores.conversations.get(req.conversation_id).await?.ok_or_else(|| {
				Error::NotFound {
					message: format!("Conversation {} does not exist.", req.conversation_id),
				}
			})?;
		let prompt = match req.prompt.trim() {
			"" => DEFAULT_UPLOAD_PROMPT,
			trimmed => trimmed,
		};
		let mut blocks = Vec::with_capacity(req.attachments.len() + 1);
		let mut log_lines = Vec::with_capacity(req.attachments.len());

		for attachment in &req.attachments {
			if attachment.is_image() {
				let data_url = format!(
					"data:{};base64,{}",
					attachment.image_mime(),
					STANDARD.encode(&attachment.bytes),
				);

				blocks.push(json!({ "type": "image_url", "image_url": { "url": data_url } }));
				log_lines.push(format!("- {} (image)", attachment.filename));
			} else {
				let extracted =
					self.providers.extractor.extract(&attachment.bytes, &attachment.filename);

				blocks.push(json!({
					"type": "text",
					"text": format!("FILE: {}\n\n{extracted}", attachment.filename),
				}));
				log_lines.push(format!("- {} (document extracted locally)", attachment.filename));
			}
		}

		blocks.push(json!({ "type": "text", "text": prompt }));

		// The conversation log records what was attached, never the bytes.
		let logged = format!("Attached files:\n{}\n\nPrompt:\n{prompt}", log_lines.join("\n"));

		self.stores.conversations.add_message(conversation.id, Role::User, &logged).await?;

		let messages: Vec<Value> = vec![
			json!({ "role": "system", "content": SYSTEM_PROMPT }),
			json!({ "role": "user", "content": blocks }),
		];
		let answer =
			self.providers.completion.complete(&self.cfg.providers.completion, &messages).await?;
		let stored = self
			.stores
			.conversations
			.add_message(conversation.id, Role::Assistant, &answer)
			.await?;

		tracing::info!(
			conversation_id = conversation.id,
			attachments = req.attachments.len(),
			"Answered upload turn.",
		);

		Ok(ChatResponse {
			conversation_id: Some(conversation.id),
			answer,
			sources: Vec::new(),
			message_id: Some(stored.id),
		})
	}
}

fn extension(filename: &str) -> Option<&str> {
	filename.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn attachment(filename: &str, mime: Option<&str>) -> Attachment {
		Attachment { filename: filename.to_string(), mime: mime.map(str::to_string), bytes: vec![] }
	}

	#[test]
	fn images_detected_by_extension_or_mime() {
		assert!(attachment("photo.PNG", None).is_image());
		assert!(attachment("photo.jpeg", None).is_image());
		assert!(attachment("scan", Some("image/tiff")).is_image());
		assert!(!attachment("notes.txt", Some("text/plain")).is_image());
		assert!(!attachment("archive.tar.gz", None).is_image());
	}

	#[test]
	fn image_mime_prefers_header_then_extension() {
		assert_eq!(attachment("x.png", Some("image/webp")).image_mime(), "image/webp");
		assert_eq!(attachment("x.JPG", None).image_mime(), "image/jpeg");
		assert_eq!(attachment("x", Some("image/gif")).image_mime(), "image/gif");
	}
}
