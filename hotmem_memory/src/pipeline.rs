//! Unified ingestion pipeline for the manual and live paths.
//!
//! The two paths share one extraction contract and differ only in when the
//! transcript entry is recorded: the manual path records once after
//! extraction, the live path records the raw line first and fills in the
//! matches once extraction has run. Stores are injected, never ambient.

use chrono::{DateTime, Utc};
use hotmem_core::{MemoryStore, RuleStore, TranscriptEntry, TranscriptStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::extraction::ExtractionEngine;

/// What one ingestion call produced. Carries counts and ids only; readers
/// re-query the store for full objects.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub entry_id: Uuid,
    pub matched_phrases: Vec<String>,
    pub memory_ids: Vec<Uuid>,
}

impl IngestReport {
    /// Number of memories created by this ingestion event.
    #[must_use]
    pub fn created(&self) -> usize {
        self.memory_ids.len()
    }
}

/// Running totals surfaced to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_memories: usize,
    pub total_transcripts: usize,
    /// Sum of matched phrases over the retained transcript log.
    pub hot_phrases_triggered: usize,
    /// Creation instant of the newest memory, if any exist.
    pub last_activity: Option<DateTime<Utc>>,
}

/// One pipeline instance serves a whole process; extraction and store
/// writes for a given line run sequentially within the calling task.
pub struct IngestPipeline {
    rules: Arc<dyn RuleStore>,
    memories: Arc<dyn MemoryStore>,
    transcripts: Arc<dyn TranscriptStore>,
    engine: ExtractionEngine,
    processing_delay: Duration,
}

impl IngestPipeline {
    #[must_use]
    pub fn new(
        rules: Arc<dyn RuleStore>,
        memories: Arc<dyn MemoryStore>,
        transcripts: Arc<dyn TranscriptStore>,
    ) -> Self {
        let engine = ExtractionEngine::new(Arc::clone(&memories));
        Self {
            rules,
            memories,
            transcripts,
            engine,
            processing_delay: Duration::ZERO,
        }
    }

    /// Artificial manual-path delay, purely for perceived feedback. Zero
    /// (the default) skips it.
    #[must_use]
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Manual/batch submission: extract, then record one processed entry.
    pub async fn ingest_manual(&self, line: &str) -> anyhow::Result<IngestReport> {
        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        let extraction = self.extract(line).await?;

        let mut entry = TranscriptEntry::raw(line, false);
        entry.processed = true;
        entry.matched_phrases = extraction.matched_phrases.clone();
        self.transcripts.record(&entry).await?;

        Ok(Self::report(entry.id, extraction))
    }

    /// Live ingestion: record the raw line first so a record exists even if
    /// extraction fails, extract, then rewrite the entry with the matches.
    pub async fn ingest_live(&self, line: &str) -> anyhow::Result<IngestReport> {
        let mut entry = TranscriptEntry::raw(line, true);
        self.transcripts.record(&entry).await?;

        let extraction = self.extract(line).await?;

        entry.processed = true;
        entry.matched_phrases = extraction.matched_phrases.clone();
        self.transcripts.update(&entry).await?;

        Ok(Self::report(entry.id, extraction))
    }

    /// Aggregate counters for the info surface.
    pub async fn stats(&self) -> anyhow::Result<Stats> {
        let memories = self.memories.list().await?;
        let transcripts = self.transcripts.list().await?;

        Ok(Stats {
            total_memories: memories.len(),
            total_transcripts: transcripts.len(),
            hot_phrases_triggered: transcripts.iter().map(|t| t.matched_phrases.len()).sum(),
            last_activity: memories.iter().map(|m| m.timestamp).max(),
        })
    }

    /// Re-reads the rule set on every call so extraction always reflects
    /// the latest persisted state — no caching.
    async fn extract(&self, line: &str) -> anyhow::Result<crate::extraction::Extraction> {
        let rules = self.rules.list().await?;
        let extraction = self.engine.extract(line, &rules).await?;

        if !extraction.matched_phrases.is_empty() {
            info!(
                "Line matched {} phrases, created {} memories",
                extraction.matched_phrases.len(),
                extraction.memories.len()
            );
        }

        Ok(extraction)
    }

    fn report(entry_id: Uuid, extraction: crate::extraction::Extraction) -> IngestReport {
        IngestReport {
            entry_id,
            matched_phrases: extraction.matched_phrases,
            memory_ids: extraction.memories.iter().map(|m| m.id).collect(),
        }
    }
}
