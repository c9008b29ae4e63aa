//! In-memory filtering of loaded records.
//!
//! # Responsibility
//! - Free-text search over a module's searchable fields.
//! - Selector and tag filters that compose with search by logical AND.
//!
//! # Invariants
//! - Text matching is case-insensitive substring matching.
//! - An absent selector is the "all" sentinel and always matches.
//! - Tag filters require every selected tag (AND); an empty selection
//!   retains everything.

/// Case-insensitive substring match of `query` against any searchable
/// field. A blank query matches everything.
pub fn matches_text(query: &str, fields: &[Option<&str>]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    fields.iter().any(|field| {
        field
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

/// Selector filter: `None` is the "all" sentinel.
pub fn selector_matches<T: PartialEq>(selected: Option<&T>, value: &T) -> bool {
    match selected {
        Some(wanted) => wanted == value,
        None => true,
    }
}

/// AND-composed tag filter: every selected tag must be present.
/// Comparison is case-insensitive; zero selections is a no-op.
pub fn has_all_tags(record_tags: &[String], selected: &[String]) -> bool {
    selected.iter().all(|wanted| {
        record_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(wanted))
    })
}

#[cfg(test)]
mod tests {
    use super::{has_all_tags, matches_text, selector_matches};

    #[test]
    fn text_match_is_case_insensitive_across_fields() {
        assert!(matches_text("OIL", &[Some("Oil change"), None]));
        assert!(matches_text("change", &[Some("Oil change")]));
        assert!(!matches_text("brake", &[Some("Oil change"), Some("notes")]));
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches_text("", &[None]));
        assert!(matches_text("   ", &[Some("anything")]));
    }

    #[test]
    fn absent_selector_is_the_all_sentinel() {
        assert!(selector_matches(None, &"done"));
        assert!(selector_matches(Some(&"done"), &"done"));
        assert!(!selector_matches(Some(&"active"), &"done"));
    }

    #[test]
    fn tags_compose_with_and_semantics() {
        let tags = vec!["rust".to_string(), "home".to_string()];
        assert!(has_all_tags(&tags, &["rust".to_string()]));
        assert!(has_all_tags(&tags, &["RUST".to_string(), "home".to_string()]));
        assert!(!has_all_tags(&tags, &["rust".to_string(), "work".to_string()]));
    }

    #[test]
    fn zero_selected_tags_retains_all() {
        assert!(has_all_tags(&["rust".to_string()], &[]));
        assert!(has_all_tags(&[], &[]));
    }
}
