// SPDX-License-Identifier: MIT

//! Event pattern matching

use std::borrow::Borrow;

/// Pattern for matching event names
/// Supports:
///   - Exact: "user.created"
///   - Wildcard: "user.*" matches "user.created", "user."
///   - Universal: "**" matches every event name
///
/// `*` matches zero or more characters anywhere in the name. There are no
/// segment-separator semantics: `"user.*"` also matches `"user.a.b"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Check if this pattern matches a concrete event name
    pub fn matches(&self, event_name: &str) -> bool {
        if self.0 == "**" {
            return true;
        }
        if !self.0.contains('*') {
            return self.0 == event_name;
        }

        let name: Vec<char> = event_name.chars().collect();
        let pattern: Vec<char> = self.0.chars().collect();
        match_chars(&name, &pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hashes like the underlying String, so &str lookups stay allocation-free.
impl Borrow<str> for EventPattern {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Recursive glob match with backtracking: `*` either consumes zero
/// characters (skip to the rest of the pattern) or one character of the name
/// (retry the same wildcard). A match requires both sides exhausted together.
fn match_chars(name: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some((&'*', rest)) => {
            match_chars(name, rest) || (!name.is_empty() && match_chars(&name[1..], pattern))
        }
        Some((literal, rest)) => match name.split_first() {
            Some((next, name_rest)) => next == literal && match_chars(name_rest, rest),
            None => false,
        },
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
