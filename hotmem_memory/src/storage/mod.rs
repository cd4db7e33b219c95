//! JSON-file store for the three persisted collections.
//!
//! One file per collection under a local data directory. Every operation is
//! whole-collection: read the file, mutate the deserialized set, write the
//! file back. A single mutex serializes those read-modify-write cycles so
//! the pattern stays single-writer; one store instance is constructed per
//! process and shared by reference. Each write lands in a temp file that is
//! renamed into place, so a crash never leaves a partial record — the
//! previous whole-collection value survives instead.

use async_trait::async_trait;
use hotmem_core::{
    Memory, MemoryStore, Rule, RuleCategory, RuleStore, TRANSCRIPT_CAP, TranscriptEntry,
    TranscriptStore,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

const MEMORIES_FILE: &str = "memories.json";
const RULES_FILE: &str = "rules.json";
const TRANSCRIPTS_FILE: &str = "transcripts.json";

/// The default rule set, materialized by [`RuleStore::list`] until the first
/// explicit save persists a set.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    let defaults = [
        ("1", "note this", "create_note", RuleCategory::Note),
        ("2", "remember this", "create_memory", RuleCategory::Note),
        ("3", "look into", "add_research", RuleCategory::Research),
        ("4", "remind me", "create_reminder", RuleCategory::Reminder),
    ];

    defaults
        .into_iter()
        .map(|(id, phrase, action, category)| Rule {
            id: id.to_string(),
            phrase: phrase.to_string(),
            action: action.to_string(),
            category,
            enabled: true,
        })
        .collect()
}

/// File-backed store implementing all three collection contracts.
pub struct JsonStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!("JsonStore opened at {}", dir.display());
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Read one collection file. `None` means the file has never been
    /// written, which is distinct from an explicitly persisted empty set.
    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> anyhow::Result<Option<Vec<T>>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> anyhow::Result<()> {
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));
        std::fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[async_trait]
impl MemoryStore for JsonStore {
    async fn list(&self) -> anyhow::Result<Vec<Memory>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_collection(MEMORIES_FILE)?
            .unwrap_or_default())
    }

    async fn save(&self, memory: &Memory) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut memories: Vec<Memory> =
            self.read_collection(MEMORIES_FILE)?.unwrap_or_default();
        memories.push(memory.clone());
        self.write_collection(MEMORIES_FILE, &memories)
    }

    async fn delete(&self, id: &Uuid) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut memories: Vec<Memory> =
            self.read_collection(MEMORIES_FILE)?.unwrap_or_default();
        memories.retain(|m| m.id != *id);
        self.write_collection(MEMORIES_FILE, &memories)
    }
}

#[async_trait]
impl RuleStore for JsonStore {
    async fn list(&self) -> anyhow::Result<Vec<Rule>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_collection(RULES_FILE)?
            .unwrap_or_else(default_rules))
    }

    async fn save(&self, rule: &Rule) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        // The first save persists the materialized defaults along with the
        // mutation; after that the persisted set is authoritative.
        let mut rules: Vec<Rule> = self
            .read_collection(RULES_FILE)?
            .unwrap_or_else(default_rules);

        if let Some(existing) = rules.iter_mut().find(|r| r.id == rule.id) {
            *existing = rule.clone();
        } else {
            rules.push(rule.clone());
        }

        self.write_collection(RULES_FILE, &rules)
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut rules: Vec<Rule> = self
            .read_collection(RULES_FILE)?
            .unwrap_or_else(default_rules);
        rules.retain(|r| r.id != id);
        self.write_collection(RULES_FILE, &rules)
    }
}

#[async_trait]
impl TranscriptStore for JsonStore {
    async fn list(&self) -> anyhow::Result<Vec<TranscriptEntry>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_collection(TRANSCRIPTS_FILE)?
            .unwrap_or_default())
    }

    async fn record(&self, entry: &TranscriptEntry) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries: Vec<TranscriptEntry> =
            self.read_collection(TRANSCRIPTS_FILE)?.unwrap_or_default();
        entries.insert(0, entry.clone());
        entries.truncate(TRANSCRIPT_CAP);
        self.write_collection(TRANSCRIPTS_FILE, &entries)
    }

    async fn update(&self, entry: &TranscriptEntry) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries: Vec<TranscriptEntry> =
            self.read_collection(TRANSCRIPTS_FILE)?.unwrap_or_default();

        // An entry can already have been evicted by the cap; that is not an
        // error, the update just has nothing left to touch.
        let Some(existing) = entries.iter_mut().find(|e| e.id == entry.id) else {
            return Ok(());
        };
        *existing = entry.clone();

        self.write_collection(TRANSCRIPTS_FILE, &entries)
    }
}
