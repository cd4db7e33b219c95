//! Memory filtering for the search surface.

use chrono::{DateTime, Utc};
use hotmem_core::Memory;

/// Conjunction of optional filters over the memory collection. An empty
/// query matches everything.
#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    /// Case-insensitive substring matched against content and tags.
    pub text: Option<String>,
    /// Memories must carry at least one of these tags (exact match).
    pub tags: Vec<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl MemoryQuery {
    #[must_use]
    pub fn matches(&self, memory: &Memory) -> bool {
        let matches_text = self.text.as_ref().is_none_or(|needle| {
            let needle = needle.to_lowercase();
            memory.content.to_lowercase().contains(&needle)
                || memory
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        });

        let matches_tags =
            self.tags.is_empty() || self.tags.iter().any(|tag| memory.tags.contains(tag));

        let matches_from = self.from.is_none_or(|from| memory.timestamp >= from);
        let matches_to = self.to.is_none_or(|to| memory.timestamp <= to);

        matches_text && matches_tags && matches_from && matches_to
    }

    /// Apply the query to a memory list, preserving order.
    #[must_use]
    pub fn filter(&self, memories: &[Memory]) -> Vec<Memory> {
        memories
            .iter()
            .filter(|m| self.matches(m))
            .cloned()
            .collect()
    }
}
