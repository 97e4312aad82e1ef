mod support;

use std::sync::Arc;

use recall_service::{
	CreateNoteRequest, Error, Providers, RecallService, SearchNotesRequest, UpdateNoteRequest,
};
use support::{
	FailingEmbedding, MemoryNoteStore, ScriptedEmbedding, StaticCompletion, StaticExtractor,
	memory_stores, test_config,
};

fn note_service(embedding: ScriptedEmbedding) -> (RecallService, Arc<MemoryNoteStore>) {
	let (stores, notes, _) = memory_stores();
	let service = RecallService::with_parts(
		test_config(),
		stores,
		Providers::new(
			Arc::new(embedding),
			Arc::new(StaticCompletion::new("unused")),
			Arc::new(StaticExtractor::new("")),
		),
	);

	(service, notes)
}

#[tokio::test]
async fn create_note_embeds_and_search_finds_it() {
	let embedding = ScriptedEmbedding::new(&[
		("I parked on level 3", [0.0, 1.0, 0.0, 0.0]),
		("the wifi password is hunter2", [1.0, 0.0, 0.0, 0.0]),
		("where did I park?", [0.0, 0.9, 0.0, 0.0]),
	]);
	let (service, notes) = note_service(embedding);
	let parked = service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: Some("parking".to_string()),
			content: "I parked on level 3".to_string(),
			source: None,
			embed: true,
		})
		.await
		.unwrap();

	service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: None,
			content: "the wifi password is hunter2".to_string(),
			source: None,
			embed: true,
		})
		.await
		.unwrap();

	assert_eq!(notes.embedded_note_ids(), vec![1, 2]);

	let found = service
		.search_notes(SearchNotesRequest {
			user_id: 1,
			query: "where did I park?".to_string(),
			top_k: Some(1),
		})
		.await
		.unwrap();

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].id, parked.id);
	assert_eq!(found[0].title.as_deref(), Some("parking"));
}

#[tokio::test]
async fn search_is_scoped_to_the_owner() {
	let embedding = ScriptedEmbedding::new(&[
		("my secret", [0.0, 1.0, 0.0, 0.0]),
		("secret?", [0.0, 1.0, 0.0, 0.0]),
	]);
	let (service, _) = note_service(embedding);

	service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: None,
			content: "my secret".to_string(),
			source: None,
			embed: true,
		})
		.await
		.unwrap();

	let other_user = service
		.search_notes(SearchNotesRequest { user_id: 2, query: "secret?".to_string(), top_k: None })
		.await
		.unwrap();

	assert!(other_user.is_empty());
}

#[tokio::test]
async fn create_note_rejects_blank_content() {
	let (service, notes) = note_service(ScriptedEmbedding::new(&[]));
	let result = service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: None,
			content: "  \n ".to_string(),
			source: None,
			embed: true,
		})
		.await;

	assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	assert!(notes.embedded_note_ids().is_empty());
}

#[tokio::test]
async fn embedding_failure_leaves_the_note_behind_unembedded() {
	let (stores, notes, _) = memory_stores();
	let service = RecallService::with_parts(
		test_config(),
		stores,
		Providers::new(
			Arc::new(FailingEmbedding),
			Arc::new(StaticCompletion::new("unused")),
			Arc::new(StaticExtractor::new("")),
		),
	);
	let result = service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: None,
			content: "remember this".to_string(),
			source: None,
			embed: true,
		})
		.await;

	assert!(matches!(result, Err(Error::Provider { .. })));

	// The row was committed first; only the embedding is missing.
	let listed = service.list_notes(1).await.unwrap();

	assert_eq!(listed.len(), 1);
	assert!(notes.embedded_note_ids().is_empty());
}

#[tokio::test]
async fn deferred_embedding_is_skipped_on_request() {
	let embedding = ScriptedEmbedding::new(&[]);
	let (service, notes) = note_service(embedding);

	service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: None,
			content: "embed me later".to_string(),
			source: None,
			embed: false,
		})
		.await
		.unwrap();

	assert!(notes.embedded_note_ids().is_empty());
}

#[tokio::test]
async fn content_update_re_embeds_but_title_update_does_not() {
	let embedding = ScriptedEmbedding::new(&[
		("v1", [1.0, 0.0, 0.0, 0.0]),
		("v2", [0.0, 1.0, 0.0, 0.0]),
	]);
	let (service, notes) = note_service(embedding);
	let note = service
		.create_note(CreateNoteRequest {
			user_id: 1,
			title: None,
			content: "v1".to_string(),
			source: None,
			embed: true,
		})
		.await
		.unwrap();

	assert_eq!(notes.embedding_of(note.id), Some(vec![1.0, 0.0, 0.0, 0.0]));

	service
		.update_note(UpdateNoteRequest {
			note_id: note.id,
			title: Some("renamed".to_string()),
			content: None,
		})
		.await
		.unwrap();

	assert_eq!(notes.embedding_of(note.id), Some(vec![1.0, 0.0, 0.0, 0.0]));

	let updated = service
		.update_note(UpdateNoteRequest {
			note_id: note.id,
			title: None,
			content: Some("v2".to_string()),
		})
		.await
		.unwrap()
		.unwrap();

	assert_eq!(updated.title.as_deref(), Some("renamed"));
	assert_eq!(updated.content, "v2");
	// The stored vector now describes the new content.
	assert_eq!(notes.embedding_of(note.id), Some(vec![0.0, 1.0, 0.0, 0.0]));
}

#[tokio::test]
async fn update_requires_a_field_and_rejects_blank_content() {
	let (service, _) = note_service(ScriptedEmbedding::new(&[]));
	let nothing =
		service.update_note(UpdateNoteRequest { note_id: 1, title: None, content: None }).await;

	assert!(matches!(nothing, Err(Error::InvalidRequest { .. })));

	let blank = service
		.update_note(UpdateNoteRequest {
			note_id: 1,
			title: None,
			content: Some(" ".to_string()),
		})
		.await;

	assert!(matches!(blank, Err(Error::InvalidRequest { .. })));
}

#[tokio::test]
async fn update_of_missing_note_returns_none() {
	let (service, _) = note_service(ScriptedEmbedding::new(&[]));
	let updated = service
		.update_note(UpdateNoteRequest {
			note_id: 404,
			title: Some("x".to_string()),
			content: None,
		})
		.await
		.unwrap();

	assert!(updated.is_none());
}

#[tokio::test]
async fn list_is_newest_first_and_delete_reports_outcome() {
	let (service, _) = note_service(ScriptedEmbedding::new(&[]));

	for content in ["one", "two", "three"] {
		service
			.create_note(CreateNoteRequest {
				user_id: 1,
				title: None,
				content: content.to_string(),
				source: None,
				embed: false,
			})
			.await
			.unwrap();
	}

	let listed = service.list_notes(1).await.unwrap();
	let ids: Vec<i64> = listed.iter().map(|note| note.id).collect();

	assert_eq!(ids, vec![3, 2, 1]);
	assert!(service.delete_note(2).await.unwrap());
	assert!(!service.delete_note(2).await.unwrap());
	assert_eq!(service.list_notes(1).await.unwrap().len(), 2);
}

#[tokio::test]
async fn blank_search_query_is_rejected_without_embedding_calls() {
	let embedding = ScriptedEmbedding::new(&[]);
	let (stores, _, _) = memory_stores();
	let embedding = Arc::new(embedding);
	let service = RecallService::with_parts(
		test_config(),
		stores,
		Providers::new(
			embedding.clone(),
			Arc::new(StaticCompletion::new("unused")),
			Arc::new(StaticExtractor::new("")),
		),
	);
	let result = service
		.search_notes(SearchNotesRequest { user_id: 1, query: "  ".to_string(), top_k: None })
		.await;

	assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	assert_eq!(embedding.calls(), 0);
}
