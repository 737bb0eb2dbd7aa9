//! Free-text search suggestions.
//!
//! [`suggest`] is a pure function over a corpus (names, emails, canned phrases
//! like "pending approval"); [`SuggestionCursor`] tracks the highlighted entry
//! while the user arrows through the list.

use std::collections::HashSet;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Corpus entries containing `query` (case-insensitive), in corpus order.
///
/// - duplicates and empty entries are dropped
/// - entries equal to the query (ignoring case) are excluded
/// - at most `limit` entries are returned
/// - a blank query yields nothing; any other query is matched as typed,
///   surrounding spaces included
pub fn suggest<S: AsRef<str>>(query: &str, corpus: &[S], limit: usize) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut seen = HashSet::new();
    corpus
        .iter()
        .map(|entry| entry.as_ref())
        .filter(|entry| !entry.is_empty() && seen.insert(*entry))
        .filter(|entry| {
            let lower = entry.to_lowercase();
            lower != needle && lower.contains(&needle)
        })
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Keyboard highlight over a suggestion list. Moving past either end wraps.
#[derive(Debug, Clone, Default)]
pub struct SuggestionCursor {
    suggestions: Vec<String>,
    focused: Option<usize>,
}

impl SuggestionCursor {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self {
            suggestions,
            focused: None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn move_next(&mut self) -> Option<&str> {
        if self.suggestions.is_empty() {
            return None;
        }
        let last = self.suggestions.len() - 1;
        self.focused = Some(match self.focused {
            Some(i) if i < last => i + 1,
            _ => 0,
        });
        self.current()
    }

    pub fn move_previous(&mut self) -> Option<&str> {
        if self.suggestions.is_empty() {
            return None;
        }
        let last = self.suggestions.len() - 1;
        self.focused = Some(match self.focused {
            Some(i) if i > 0 => i - 1,
            _ => last,
        });
        self.current()
    }

    pub fn current(&self) -> Option<&str> {
        self.focused
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    pub fn reset(&mut self) {
        self.focused = None;
    }
}
