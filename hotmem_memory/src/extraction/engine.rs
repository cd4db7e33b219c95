//! Extraction engine for hot-phrase memories.
//!
//! The engine evaluates one transcript line against the configured rules in
//! stored order and produces zero or more memories, persisting each one the
//! moment it is created. Matching is deliberately literal: a locale-naive,
//! case-insensitive substring search with no word-boundary requirement, so
//! behavior stays predictable and rule-order-deterministic.

use chrono::Utc;
use hotmem_core::{Memory, MemoryStore, Rule};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::extraction::actions;

/// Result of evaluating one line.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Literal rule phrases that matched, one per matching rule, in rule
    /// order. Includes matches whose trailing content was empty.
    pub matched_phrases: Vec<String>,
    /// Memories created, in rule order. Empty-content matches are dropped.
    pub memories: Vec<Memory>,
}

/// Engine turning transcript lines into memories via the supplied rule set.
pub struct ExtractionEngine {
    memories: Arc<dyn MemoryStore>,
}

impl ExtractionEngine {
    #[must_use]
    pub fn new(memories: Arc<dyn MemoryStore>) -> Self {
        Self { memories }
    }

    /// Evaluate `line` against `rules`.
    ///
    /// Disabled rules are filtered here again even when the caller already
    /// pre-filtered. The first occurrence of a phrase governs extraction;
    /// the memory content is everything after it, cleaned of surrounding
    /// whitespace and a leading separator. Each memory is persisted with its
    /// own store write, unbatched, so partial progress survives a crash
    /// mid-line; a store failure propagates uncaught.
    ///
    /// Empty line, empty rule set, or no matches all yield an empty
    /// [`Extraction`] — there is no error path for malformed input.
    pub async fn extract(&self, line: &str, rules: &[Rule]) -> anyhow::Result<Extraction> {
        let mut extraction = Extraction::default();

        for rule in rules.iter().filter(|r| r.enabled) {
            let Some((_, end)) = find_ignore_case(line, &rule.phrase) else {
                continue;
            };

            extraction.matched_phrases.push(rule.phrase.clone());

            let content = clean_content(&line[end..]);
            if content.is_empty() {
                debug!("Hot phrase '{}' matched with no trailing content", rule.phrase);
                continue;
            }

            let (memory_type, extra_tags) = actions::classify(&rule.action);
            let mut tags = vec![rule.category.as_str().to_string()];
            tags.extend(extra_tags.iter().map(ToString::to_string));

            let memory = Memory {
                id: Uuid::now_v7(),
                content: content.to_string(),
                timestamp: Utc::now(),
                tags,
                memory_type,
                hot_phrase: Some(rule.phrase.clone()),
            };

            debug!(
                "Hot phrase '{}' fired ({}): {}",
                rule.phrase, rule.action, memory.content
            );

            self.memories.save(&memory).await?;
            extraction.memories.push(memory);
        }

        Ok(extraction)
    }
}

/// Trailing content of a match: strip surrounding whitespace plus the
/// separator the speaker put between the phrase and the payload, as in
/// `"note this: buy milk"`.
fn clean_content(rest: &str) -> &str {
    rest.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ','))
        .trim_end()
}

/// Byte range of the first case-insensitive occurrence of `phrase` in
/// `line`, comparing char-by-char through lowercase expansion so offsets
/// always land on char boundaries of the original line.
fn find_ignore_case(line: &str, phrase: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = phrase.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        // An empty phrase trivially occurs at the start of any line.
        return Some((0, 0));
    }

    line.char_indices()
        .find_map(|(start, _)| match_at(line, start, &needle).map(|end| (start, end)))
}

/// End offset of a match of `needle` beginning at `start`, if any. A match
/// must consume whole characters of the line: a needle ending partway
/// through one character's lowercase expansion does not count.
fn match_at(line: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (offset, ch) in line[start..].char_indices() {
        for low in ch.to_lowercase() {
            if pos >= needle.len() || needle[pos] != low {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(start + offset + ch.len_utf8());
        }
    }
    None
}
