mod support;

use std::sync::Arc;

use recall_service::{
	Attachment, CreateConversationRequest, Error, Providers, RecallService, UploadRequest,
};
use support::{
	MemoryConversationStore, ScriptedEmbedding, StaticCompletion, StaticExtractor, memory_stores,
	test_config,
};

fn upload_service(
	completion: Arc<StaticCompletion>,
	extractor: StaticExtractor,
) -> (RecallService, Arc<MemoryConversationStore>) {
	let (stores, _, conversations) = memory_stores();
	let service = RecallService::with_parts(
		test_config(),
		stores,
		Providers::new(Arc::new(ScriptedEmbedding::new(&[])), completion, Arc::new(extractor)),
	);

	(service, conversations)
}

#[tokio::test]
async fn document_upload_sends_extracted_text_and_logs_the_attachment() {
	let completion = Arc::new(StaticCompletion::new("A quarterly report."));
	let (service, conversations) =
		upload_service(completion.clone(), StaticExtractor::new("revenue up 4%"));
	let conversation = service
		.create_conversation(CreateConversationRequest { user_id: 1, title: None })
		.await
		.unwrap();
	let response = service
		.upload_and_ask(UploadRequest {
			conversation_id: conversation.id,
			prompt: "summarize this".to_string(),
			attachments: vec![Attachment {
				filename: "report.pdf".to_string(),
				mime: Some("application/pdf".to_string()),
				bytes: vec![1, 2, 3],
			}],
		})
		.await
		.unwrap();

	assert_eq!(response.answer, "A quarterly report.");
	assert!(response.sources.is_empty());

	let messages = completion.last_messages();

	assert_eq!(messages.len(), 2);

	let blocks = messages[1]["content"].as_array().unwrap();

	assert_eq!(blocks.len(), 2);
	assert_eq!(blocks[0]["type"], "text");
	assert_eq!(blocks[0]["text"], "FILE: report.pdf\n\nrevenue up 4%");
	assert_eq!(blocks[1]["text"], "summarize this");

	// The log keeps a readable summary, never the bytes.
	let logged = conversations.message_contents(conversation.id);

	assert_eq!(logged.len(), 2);
	assert_eq!(logged[0].0, "user");
	assert_eq!(
		logged[0].1,
		"Attached files:\n- report.pdf (document extracted locally)\n\nPrompt:\nsummarize this",
	);
	assert_eq!(logged[1], ("assistant".to_string(), "A quarterly report.".to_string()));
}

#[tokio::test]
async fn image_upload_becomes_a_base64_data_url_block() {
	let completion = Arc::new(StaticCompletion::new("A cat."));
	let (service, conversations) = upload_service(completion.clone(), StaticExtractor::new(""));
	let conversation = service
		.create_conversation(CreateConversationRequest { user_id: 1, title: None })
		.await
		.unwrap();

	service
		.upload_and_ask(UploadRequest {
			conversation_id: conversation.id,
			prompt: String::new(),
			attachments: vec![Attachment {
				filename: "cat.png".to_string(),
				mime: None,
				bytes: b"fake".to_vec(),
			}],
		})
		.await
		.unwrap();

	let messages = completion.last_messages();
	let blocks = messages[1]["content"].as_array().unwrap();

	assert_eq!(blocks[0]["type"], "image_url");
	assert_eq!(blocks[0]["image_url"]["url"], "data:image/png;base64,ZmFrZQ==");
	// Blank prompt falls back to the default analysis request.
	assert_eq!(blocks[1]["text"], "Please analyze the attached file(s) in detail.");

	let logged = conversations.message_contents(conversation.id);

	assert!(logged[0].1.contains("- cat.png (image)"));
}

#[tokio::test]
async fn upload_requires_attachments_and_a_known_conversation() {
	let completion = Arc::new(StaticCompletion::new("unused"));
	let (service, _) = upload_service(completion.clone(), StaticExtractor::new(""));
	let conversation = service
		.create_conversation(CreateConversationRequest { user_id: 1, title: None })
		.await
		.unwrap();
	let empty = service
		.upload_and_ask(UploadRequest {
			conversation_id: conversation.id,
			prompt: "hello".to_string(),
			attachments: vec![],
		})
		.await;

	assert!(matches!(empty, Err(Error::InvalidRequest { .. })));

	let missing = service
		.upload_and_ask(UploadRequest {
			conversation_id: 404,
			prompt: "hello".to_string(),
			attachments: vec![Attachment {
				filename: "a.txt".to_string(),
				mime: None,
				bytes: vec![],
			}],
		})
		.await;

	assert!(matches!(missing, Err(Error::NotFound { .. })));
	assert!(completion.seen.lock().unwrap().is_empty());
}
