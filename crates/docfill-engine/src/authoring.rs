//! Template authoring: turning selected text into tokens.
//!
//! The authoring workflow is the reverse of filling: an operator selects a
//! span of document text and declares it a token. Each declaration becomes a
//! [`Replacement`] in an ordered, append-only log; exporting applies the log
//! against the container's parts with the token's canonical literal as the
//! substitution target.

use docfill_token::canonical_literal;
use serde::Serialize;

use crate::error::AuthoringError;
use crate::matcher::{strip_non_content, RunMatcher};
use crate::substitute::escape_markup;

/// A user-declared mapping from a literal span of document text to a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Log-assigned identifier, strictly increasing.
    pub id: u64,
    /// The selected document text to replace.
    pub original_text: String,
    /// The sanitized token key.
    pub tag: String,
    /// Optional human hint carried into the token.
    pub comment: String,
    /// Replace every occurrence, or only the first remaining one.
    pub replace_all: bool,
}

impl Replacement {
    /// The canonical token literal this replacement inserts.
    pub fn token_literal(&self) -> String {
        canonical_literal(&self.tag, &self.comment)
    }
}

/// Sanitizes a proposed key to the allowed identifier character set.
///
/// Letters, digits and `_` pass through; spaces and hyphens fold to `_`;
/// everything else drops. Returns `None` when nothing survives.
pub fn sanitize_key(proposed: &str) -> Option<String> {
    let mut key = String::with_capacity(proposed.len());
    for c in proposed.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            key.push(c);
        } else if c == ' ' || c == '-' {
            key.push('_');
        }
    }
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// The ordered, append-only log of authoring replacements.
///
/// Entries are only ever removed from the tail (`undo_last`) or as a whole
/// tag-group (`remove_tag_group`); there is no redo and no arbitrary
/// positional deletion.
#[derive(Debug, Clone, Default)]
pub struct AuthoringLog {
    entries: Vec<Replacement>,
    next_id: u64,
}

impl AuthoringLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new replacement and appends it to the log.
    ///
    /// Rejects an empty selection and an empty or unsanitizable key.
    pub fn create(
        &mut self,
        selected_text: &str,
        proposed_key: &str,
        comment: &str,
        replace_all: bool,
    ) -> Result<&Replacement, AuthoringError> {
        if selected_text.trim().is_empty() {
            return Err(AuthoringError::EmptySelection);
        }
        if proposed_key.trim().is_empty() {
            return Err(AuthoringError::EmptyKey);
        }
        let tag = sanitize_key(proposed_key)
            .ok_or_else(|| AuthoringError::InvalidKey(proposed_key.to_string()))?;
        self.next_id += 1;
        self.entries.push(Replacement {
            id: self.next_id,
            original_text: selected_text.to_string(),
            tag,
            comment: comment.trim().to_string(),
            replace_all,
        });
        Ok(self.entries.last().expect("entry was just pushed"))
    }

    /// Removes and returns the most recently created entry only.
    pub fn undo_last(&mut self) -> Option<Replacement> {
        self.entries.pop()
    }

    /// Removes every entry sharing the tag; returns how many were removed.
    pub fn remove_tag_group(&mut self, tag: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|r| r.tag != tag);
        before - self.entries.len()
    }

    /// Existing tags containing the partial key, case-insensitively.
    ///
    /// An exact match to the in-progress key is excluded. Purely advisory:
    /// the result constrains nothing.
    pub fn autocomplete(&self, partial: &str) -> Vec<&str> {
        let needle = partial.to_ascii_lowercase();
        let mut tags: Vec<&str> = Vec::new();
        for entry in &self.entries {
            let tag = entry.tag.as_str();
            if tag == partial || tags.contains(&tag) {
                continue;
            }
            if tag.to_ascii_lowercase().contains(&needle) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Entries in creation order.
    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    /// Number of entries in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies the log in order across a document's parts.
    ///
    /// Matching is run-tolerant with word boundaries required, so a
    /// selection adjacent to identifier characters is not a match. With
    /// `replace_all` an entry touches every occurrence in every part;
    /// otherwise exactly the first remaining occurrence, scanning parts in
    /// order. Returns the total number of occurrences replaced.
    pub fn apply(&self, parts: &mut [String]) -> usize {
        for part in parts.iter_mut() {
            *part = strip_non_content(part);
        }
        let mut total = 0;
        for entry in &self.entries {
            let target = escape_markup(&entry.token_literal());
            let matcher = RunMatcher::new(&entry.original_text).word_boundaries(true);
            if entry.replace_all {
                for part in parts.iter_mut() {
                    let (next, n) = matcher.replace_all(part, &target);
                    *part = next;
                    total += n;
                }
            } else {
                for part in parts.iter_mut() {
                    let (next, n) = matcher.replace_first(part, &target);
                    if n > 0 {
                        *part = next;
                        total += 1;
                        break;
                    }
                }
            }
        }
        total
    }
}
