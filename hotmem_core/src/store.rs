//! Store contracts for the three persisted collections.
//!
//! Every implementation works whole-collection: read the entire set, mutate,
//! write the entire set back. That pattern is not safe under concurrent
//! writers, so implementations must serialize access (single-writer
//! discipline); callers receive a consistent snapshot from `list`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Memory, Rule, TranscriptEntry};

/// Number of transcript entries a [`TranscriptStore`] retains. Oldest are
/// evicted first (insertion-order truncation, not LRU).
pub const TRANSCRIPT_CAP: usize = 100;

/// Read/write access to extracted memories.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// All memories in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Memory>>;

    /// Append one memory.
    async fn save(&self, memory: &Memory) -> anyhow::Result<()>;

    /// Remove a memory by id. Unknown ids are a no-op.
    async fn delete(&self, id: &Uuid) -> anyhow::Result<()>;
}

/// Read/write access to the configured trigger rules.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All rules in stored order. Until the first explicit save, this
    /// materializes the default rule set.
    async fn list(&self) -> anyhow::Result<Vec<Rule>>;

    /// Upsert by id: replace in place (preserving position), else append.
    /// No validation happens here; the rule editor refuses blank fields.
    async fn save(&self, rule: &Rule) -> anyhow::Result<()>;

    /// Remove a rule by id. Unknown ids are a no-op.
    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}

/// Ordered, size-bounded log of ingested transcript lines.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// All retained entries, most-recent-first.
    async fn list(&self) -> anyhow::Result<Vec<TranscriptEntry>>;

    /// Prepend unconditionally, then truncate to [`TRANSCRIPT_CAP`].
    async fn record(&self, entry: &TranscriptEntry) -> anyhow::Result<()>;

    /// Rewrite the entry with the same id in place. An id that has already
    /// been evicted is a no-op.
    async fn update(&self, entry: &TranscriptEntry) -> anyhow::Result<()>;
}
