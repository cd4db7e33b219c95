//! Fixed mapping from rule actions to memory classification.

use hotmem_core::MemoryType;

/// Resolve an action name to the memory type it produces and the tags
/// appended after the rule's category.
///
/// Actions are an open set: anything unrecognized, including the empty
/// string, falls back to a plain general memory with no extra tags.
#[must_use]
pub fn classify(action: &str) -> (MemoryType, &'static [&'static str]) {
    match action {
        "create_note" => (MemoryType::Note, &["quick-note"]),
        "create_memory" => (MemoryType::General, &["important"]),
        "add_research" => (MemoryType::Research, &["research", "todo"]),
        "create_reminder" => (MemoryType::Reminder, &["reminder", "action-item"]),
        _ => (MemoryType::General, &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actions() {
        assert_eq!(classify("create_note"), (MemoryType::Note, &["quick-note"][..]));
        assert_eq!(
            classify("create_memory"),
            (MemoryType::General, &["important"][..])
        );
        assert_eq!(
            classify("add_research"),
            (MemoryType::Research, &["research", "todo"][..])
        );
        assert_eq!(
            classify("create_reminder"),
            (MemoryType::Reminder, &["reminder", "action-item"][..])
        );
    }

    #[test]
    fn test_unknown_action_falls_back_to_general() {
        let (ty, tags) = classify("foo");
        assert_eq!(ty, MemoryType::General);
        assert!(tags.is_empty());

        let (ty, tags) = classify("");
        assert_eq!(ty, MemoryType::General);
        assert!(tags.is_empty());
    }
}
