use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification a rule carries, independent of the type of the memories it
/// ends up producing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Note,
    Research,
    Reminder,
}

impl RuleCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Research => "research",
            Self::Reminder => "reminder",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Self::Note),
            "research" => Ok(Self::Research),
            "reminder" => Ok(Self::Reminder),
            _ => Err(anyhow::anyhow!("unknown rule category: {s}")),
        }
    }
}

/// Type of an extracted memory, derived from the rule's action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    Note,
    Research,
    Reminder,
    General,
}

impl MemoryType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Research => "research",
            Self::Reminder => "reminder",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemoryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Self::Note),
            "research" => Ok(Self::Research),
            "reminder" => Ok(Self::Reminder),
            "general" => Ok(Self::General),
            _ => Err(anyhow::anyhow!("unknown memory type: {s}")),
        }
    }
}

/// A configured trigger: phrase, action, category, enabled flag.
///
/// The phrase is matched case-insensitively as a plain substring. The action
/// is an open string; unrecognized actions fall back to a general memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub phrase: String,
    pub action: String,
    pub category: RuleCategory,
    pub enabled: bool,
}

impl Rule {
    /// Create an enabled rule with a fresh id.
    #[must_use]
    pub fn new(phrase: &str, action: &str, category: RuleCategory) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            phrase: phrase.to_string(),
            action: action.to_string(),
            category,
            enabled: true,
        }
    }
}

/// A structured artifact extracted from a transcript line.
///
/// Immutable after creation; the only mutation is explicit deletion through
/// the store. `hot_phrase` is a value-copy of the triggering rule's phrase,
/// kept for display only — later rule edits never alter it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Memory {
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub memory_type: MemoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_phrase: Option<String>,
}

/// One ingested transcript line plus metadata about what matched it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub processed: bool,
    pub matched_phrases: Vec<String>,
    /// Entry arrived over the live feed. Display metadata only.
    #[serde(default)]
    pub live: bool,
}

impl TranscriptEntry {
    /// A raw, not-yet-processed entry for a just-received line.
    #[must_use]
    pub fn raw(text: &str, live: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.to_string(),
            timestamp: Utc::now(),
            processed: false,
            matched_phrases: Vec::new(),
            live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_memory_type_round_trip() {
        for ty in [
            MemoryType::Note,
            MemoryType::Research,
            MemoryType::Reminder,
            MemoryType::General,
        ] {
            let parsed = MemoryType::from_str(ty.as_str()).expect("known type should parse");
            assert_eq!(parsed, ty);
        }
        assert!(MemoryType::from_str("episodic").is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_memory_serializes_type_field() {
        let memory = Memory {
            id: Uuid::now_v7(),
            content: "buy milk".to_string(),
            timestamp: Utc::now(),
            tags: vec!["note".to_string(), "quick-note".to_string()],
            memory_type: MemoryType::Note,
            hot_phrase: Some("note this".to_string()),
        };

        let json = serde_json::to_value(&memory).expect("memory should serialize");
        assert_eq!(json["type"], "note");
        assert_eq!(json["hot_phrase"], "note this");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_memory_hot_phrase_absent_when_none() {
        let memory = Memory {
            id: Uuid::now_v7(),
            content: "loose thought".to_string(),
            timestamp: Utc::now(),
            tags: vec![],
            memory_type: MemoryType::General,
            hot_phrase: None,
        };

        let json = serde_json::to_value(&memory).expect("memory should serialize");
        assert!(json.get("hot_phrase").is_none());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_transcript_entry_live_defaults_false() {
        let json = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "text": "hello",
            "timestamp": "2026-01-01T00:00:00Z",
            "processed": true,
            "matched_phrases": []
        }"#;

        let entry: TranscriptEntry =
            serde_json::from_str(json).expect("entry without live flag should deserialize");
        assert!(!entry.live);
    }

    #[test]
    fn test_rule_new_is_enabled_with_fresh_id() {
        let a = Rule::new("note this", "create_note", RuleCategory::Note);
        let b = Rule::new("note this", "create_note", RuleCategory::Note);

        assert!(a.enabled);
        assert_ne!(a.id, b.id);
    }
}
