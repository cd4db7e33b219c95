//! Integration tests for the ingestion pipeline over the JSON-file store.
//!
//! These tests verify the complete flow of:
//! - Manual and live ingestion through one extraction contract
//! - Rule bootstrap and rule edits affecting subsequent extraction
//! - Transcript recording, stats aggregation, and search

use std::sync::Arc;

use hotmem_core::{MemoryStore, MemoryType, Rule, RuleCategory, RuleStore, TranscriptStore};
use hotmem_memory::{ExtractionEngine, IngestPipeline, JsonStore, MemoryQuery};

fn pipeline(store: &Arc<JsonStore>) -> IngestPipeline {
    IngestPipeline::new(
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::clone(store) as _,
    )
}

fn open_store(dir: &tempfile::TempDir) -> Arc<JsonStore> {
    Arc::new(JsonStore::open(dir.path()).unwrap())
}

/// Manual submission records one processed entry after extraction.
#[tokio::test]
async fn test_manual_ingestion_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    let report = pipeline
        .ingest_manual("note this: buy almond milk and organic vegetables")
        .await
        .unwrap();

    assert_eq!(report.matched_phrases, vec!["note this"]);
    assert_eq!(report.created(), 1);

    let memories = MemoryStore::list(store.as_ref()).await.unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(memories[0].content, "buy almond milk and organic vegetables");
    assert_eq!(memories[0].memory_type, MemoryType::Note);
    assert_eq!(memories[0].tags, vec!["note", "quick-note"]);

    let entries = TranscriptStore::list(store.as_ref()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].processed);
    assert!(!entries[0].live);
    assert_eq!(entries[0].matched_phrases, vec!["note this"]);
}

/// Live ingestion records the raw entry first, then fills in the matches.
#[tokio::test]
async fn test_live_ingestion_updates_recorded_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    let report = pipeline
        .ingest_live("remind me to call the dentist next week")
        .await
        .unwrap();

    assert_eq!(report.matched_phrases, vec!["remind me"]);
    assert_eq!(report.created(), 1);

    let entries = TranscriptStore::list(store.as_ref()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, report.entry_id);
    assert!(entries[0].live);
    assert!(entries[0].processed);
    assert_eq!(entries[0].matched_phrases, vec!["remind me"]);

    let memories = MemoryStore::list(store.as_ref()).await.unwrap();
    assert_eq!(memories[0].content, "to call the dentist next week");
    assert_eq!(memories[0].memory_type, MemoryType::Reminder);
    assert_eq!(memories[0].tags, vec!["reminder", "reminder", "action-item"]);
}

/// A match with no trailing content counts as matched but creates nothing.
#[tokio::test]
async fn test_matched_count_bounds_created_count() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    let report = pipeline.ingest_manual("remind me").await.unwrap();

    assert_eq!(report.matched_phrases.len(), 1);
    assert_eq!(report.created(), 0);
    assert!(report.matched_phrases.len() >= report.created());
    assert!(MemoryStore::list(store.as_ref()).await.unwrap().is_empty());

    // The transcript record still carries the match.
    let entries = TranscriptStore::list(store.as_ref()).await.unwrap();
    assert_eq!(entries[0].matched_phrases, vec!["remind me"]);
}

/// Extraction has no hidden state across calls.
#[tokio::test]
async fn test_extraction_is_idempotent_across_calls() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    let line = "look into latest rust async features";
    pipeline.ingest_manual(line).await.unwrap();
    pipeline.ingest_manual(line).await.unwrap();

    let memories = MemoryStore::list(store.as_ref()).await.unwrap();
    assert_eq!(memories.len(), 2);
    assert_eq!(memories[0].content, memories[1].content);
    assert_eq!(memories[0].memory_type, memories[1].memory_type);
    assert_eq!(memories[0].tags, memories[1].tags);
    assert_ne!(memories[0].id, memories[1].id);
}

/// Reordering the enabled subset changes only match order, never which
/// memories are created.
#[tokio::test]
async fn test_rule_order_determinism() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let engine = ExtractionEngine::new(Arc::clone(&store) as _);

    let a = Rule::new("note this", "create_note", RuleCategory::Note);
    let b = Rule::new("look into", "add_research", RuleCategory::Research);
    let line = "note this and look into workspaces";

    let forward = engine.extract(line, &[a.clone(), b.clone()]).await.unwrap();
    let backward = engine.extract(line, &[b.clone(), a.clone()]).await.unwrap();

    assert_eq!(forward.matched_phrases, vec!["note this", "look into"]);
    assert_eq!(backward.matched_phrases, vec!["look into", "note this"]);

    let mut forward_contents: Vec<_> =
        forward.memories.iter().map(|m| m.content.clone()).collect();
    let mut backward_contents: Vec<_> =
        backward.memories.iter().map(|m| m.content.clone()).collect();
    forward_contents.sort();
    backward_contents.sort();
    assert_eq!(forward_contents, backward_contents);
}

/// Rule edits through the store are visible to the very next extraction.
#[tokio::test]
async fn test_disabled_rule_is_invisible_to_next_ingestion() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    let mut rules = RuleStore::list(store.as_ref()).await.unwrap();
    let note_rule = rules
        .iter_mut()
        .find(|r| r.phrase == "note this")
        .unwrap();
    note_rule.enabled = false;
    let disabled = note_rule.clone();
    RuleStore::save(store.as_ref(), &disabled).await.unwrap();

    let report = pipeline.ingest_manual("note this: ignored").await.unwrap();

    assert!(report.matched_phrases.is_empty());
    assert_eq!(report.created(), 0);
}

#[tokio::test]
async fn test_stats_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    pipeline.ingest_manual("note this: one").await.unwrap();
    pipeline
        .ingest_live("remember this: two and look into three")
        .await
        .unwrap();
    pipeline.ingest_manual("no triggers here").await.unwrap();

    let stats = pipeline.stats().await.unwrap();
    assert_eq!(stats.total_memories, 3);
    assert_eq!(stats.total_transcripts, 3);
    assert_eq!(stats.hot_phrases_triggered, 3);

    let newest = MemoryStore::list(store.as_ref())
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.timestamp)
        .max();
    assert_eq!(stats.last_activity, newest);
}

#[tokio::test]
async fn test_search_over_extracted_memories() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let pipeline = pipeline(&store);

    pipeline.ingest_manual("note this: buy milk").await.unwrap();
    pipeline
        .ingest_manual("look into renewable energy stocks")
        .await
        .unwrap();

    let memories = MemoryStore::list(store.as_ref()).await.unwrap();

    let query = MemoryQuery {
        text: Some("energy".to_string()),
        ..MemoryQuery::default()
    };
    let hits = query.filter(&memories);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].memory_type, MemoryType::Research);

    let query = MemoryQuery {
        tags: vec!["quick-note".to_string()],
        ..MemoryQuery::default()
    };
    assert_eq!(query.filter(&memories)[0].content, "buy milk");
}
