//! Run-tolerant literal matching.
//!
//! The literal text of a token, as it appears in the converted document view,
//! is generally not contiguous in the container's internal parts: editors
//! split visually contiguous text across adjacent inline elements (proofing
//! markers, language tags, run boundaries). [`RunMatcher`] finds a literal
//! inside such markup-polluted text by consuming one literal character at a
//! time and skipping any complete tag spans between characters.
//!
//! The matcher is an explicit scan rather than a generated regex: it cannot
//! backtrack catastrophically on adversarial markup, and its behavior does
//! not depend on a pattern library's syntax.

use std::ops::Range;

/// Zero-width inline elements stripped before matching.
///
/// These are proofing and language annotations that carry no visible content
/// and are the most common cause of run splitting.
pub const NON_CONTENT_TAGS: &[&str] = &["w:proofErr", "w:noProof", "w:lang"];

/// Removes known zero-width empty elements from raw part text.
///
/// Only self-closing forms (`<w:noProof/>`, `<w:lang w:val="en-US"/>`) are
/// removed; everything else passes through byte for byte.
pub fn strip_non_content(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('>') else {
            // Unterminated angle bracket: not markup we can interpret.
            out.push_str(tail);
            return out;
        };
        let tag = &tail[..=close];
        if !is_non_content(tag) {
            out.push_str(tag);
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

fn is_non_content(tag: &str) -> bool {
    if !tag.ends_with("/>") {
        return false;
    }
    let name = tag[1..]
        .split(|c: char| c == ' ' || c == '/' || c == '>')
        .next()
        .unwrap_or("");
    NON_CONTENT_TAGS.contains(&name)
}

/// Finds a literal string inside markup-polluted text.
///
/// For a literal of N characters, a match consists of the N characters in
/// order, case-sensitive and exact, where each pair of adjacent characters
/// may be separated by any run of complete tag spans (`<` to `>`, at least
/// one character inside). Tags are tolerated only *between* literal characters:
/// a match starts at the first literal character and ends at the last.
///
/// # Example
///
/// ```rust
/// use docfill_engine::RunMatcher;
///
/// let matcher = RunMatcher::new("{name}");
/// let raw = "<w:t>{na</w:t><w:t>me}</w:t>";
/// let (out, n) = matcher.replace_all(raw, "Alice");
/// assert_eq!(n, 1);
/// assert_eq!(out, "<w:t>Alice</w:t>");
/// ```
#[derive(Debug, Clone)]
pub struct RunMatcher<'a> {
    literal: &'a str,
    word_boundaries: bool,
}

impl<'a> RunMatcher<'a> {
    /// Creates a matcher for the given literal.
    pub fn new(literal: &'a str) -> Self {
        Self {
            literal,
            word_boundaries: false,
        }
    }

    /// Requires matches to not sit flush against identifier characters.
    ///
    /// When enabled, a span is rejected if the character immediately before
    /// or after it is ASCII alphanumeric or `_`. Authoring uses this so a
    /// selection like `count` cannot match inside `discount`.
    pub fn word_boundaries(mut self, on: bool) -> Self {
        self.word_boundaries = on;
        self
    }

    /// Returns all non-overlapping match spans, left to right.
    pub fn find_all(&self, raw: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        if self.literal.is_empty() {
            return spans;
        }
        let mut i = 0;
        while i < raw.len() {
            if let Some(end) = self.match_at(raw, i) {
                if self.boundary_ok(raw, i, end) {
                    spans.push(i..end);
                    i = end;
                    continue;
                }
            }
            i += raw[i..].chars().next().map_or(1, char::len_utf8);
        }
        spans
    }

    /// Replaces every occurrence, returning the new text and the match count.
    ///
    /// When nothing matches the input is returned unchanged.
    pub fn replace_all(&self, raw: &str, replacement: &str) -> (String, usize) {
        self.splice(raw, &self.find_all(raw), replacement)
    }

    /// Replaces only the first occurrence; the count is 0 or 1.
    pub fn replace_first(&self, raw: &str, replacement: &str) -> (String, usize) {
        let spans = self.find_all(raw);
        self.splice(raw, &spans[..spans.len().min(1)], replacement)
    }

    /// Attempts a match anchored at `start`; returns the end of the span.
    fn match_at(&self, raw: &str, start: usize) -> Option<usize> {
        let mut chars = self.literal.chars();
        let first = chars.next()?;
        if !raw[start..].starts_with(first) {
            return None;
        }
        let mut pos = start + first.len_utf8();
        for c in chars {
            pos = skip_tag_runs(raw, pos);
            if !raw[pos..].starts_with(c) {
                return None;
            }
            pos += c.len_utf8();
        }
        Some(pos)
    }

    fn boundary_ok(&self, raw: &str, start: usize, end: usize) -> bool {
        if !self.word_boundaries {
            return true;
        }
        let before = raw[..start].chars().next_back();
        let after = raw[end..].chars().next();
        !is_word_char(before) && !is_word_char(after)
    }

    fn splice(&self, raw: &str, spans: &[Range<usize>], replacement: &str) -> (String, usize) {
        if spans.is_empty() {
            return (raw.to_string(), 0);
        }
        let mut out = String::with_capacity(raw.len());
        let mut last = 0;
        for span in spans {
            out.push_str(&raw[last..span.start]);
            out.push_str(replacement);
            last = span.end;
        }
        out.push_str(&raw[last..]);
        (out, spans.len())
    }
}

fn is_word_char(c: Option<char>) -> bool {
    matches!(c, Some(c) if c.is_ascii_alphanumeric() || c == '_')
}

/// Advances past consecutive complete tag spans starting at `pos`.
///
/// A tag span is `<`, at least one non-`>` character, then `>`. An empty
/// `<>` or an unterminated `<` is not a tag and stops the skip.
fn skip_tag_runs(raw: &str, mut pos: usize) -> usize {
    while raw[pos..].starts_with('<') {
        match raw[pos + 1..].find('>') {
            Some(rel) if rel > 0 => pos += 1 + rel + 1,
            _ => break,
        }
    }
    pos
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn literal() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    fn tag() -> impl Strategy<Value = String> {
        "[a-z:]{1,6}".prop_map(|name| format!("<{}/>", name))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn finds_literal_fragmented_by_tags(lit in literal(), tags in proptest::collection::vec(tag(), 0..4)) {
            // Interleave tags between the literal's characters.
            let chars: Vec<char> = lit.chars().collect();
            let mut raw = String::new();
            for (i, c) in chars.iter().enumerate() {
                raw.push(*c);
                if i + 1 < chars.len() {
                    if let Some(t) = tags.get(i) {
                        raw.push_str(t);
                    }
                }
            }
            let matcher = RunMatcher::new(&lit);
            let spans = matcher.find_all(&raw);
            prop_assert_eq!(spans, vec![0..raw.len()]);
        }

        #[test]
        fn replacement_removes_every_occurrence(lit in literal(), pad in "[0-9 ]{0,10}") {
            let raw = format!("{}{}{}{}{}", pad, lit, pad, lit, pad);
            let (out, n) = RunMatcher::new(&lit).replace_all(&raw, "#");
            prop_assert!(n >= 2);
            prop_assert!(!out.contains(&lit));
        }

        #[test]
        fn stripping_is_idempotent(raw in "[a-z<>/: ]{0,60}") {
            let once = strip_non_content(&raw);
            prop_assert_eq!(strip_non_content(&once), once);
        }
    }
}
