//! Placeholder token grammar and extraction.
//!
//! This crate provides the `{key}` / `{key|comment}` placeholder grammar used
//! by docfill templates, and the scanner that extracts an ordered token table
//! from a document's visible text.
//!
//! # Example
//!
//! ```rust
//! use docfill_token::TokenTable;
//!
//! let table = TokenTable::parse("{client|Full legal name} agrees to {amount}.");
//! assert_eq!(table.len(), 2);
//!
//! let client = table.get("client").unwrap();
//! assert_eq!(client.literal, "{client|Full legal name}");
//! assert_eq!(client.comment, "Full legal name");
//!
//! let amount = table.get("amount").unwrap();
//! assert_eq!(amount.comment, "");
//! ```
//!
//! # Grammar
//!
//! A token is `{KEY}` or `{KEY|COMMENT}`:
//! - KEY is one or more characters excluding `{`, `}`, `|`
//! - COMMENT is one or more characters excluding `}`
//!
//! Scanning is left-to-right, non-overlapping, and global. Keys are unique
//! within a table: the first occurrence of a key determines the stored
//! literal and comment, later occurrences of the same key are references to
//! the same token and are dropped, not errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Compiled token grammar. KEY excludes `{`, `}`, `|`; COMMENT excludes `}`.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}|]+)(?:\|([^}]+))?\}").expect("token grammar is valid"));

/// A placeholder declared in document text.
///
/// Tokens are derived from the source text, not owned: a table is recomputed
/// whenever the source changes, and tokens hold no mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The exact substring matched by the grammar, e.g. `{client|Full name}`.
    pub literal: String,
    /// The stable identifier, e.g. `client`.
    pub key: String,
    /// Optional human hint; empty when the token has no comment.
    pub comment: String,
}

impl Token {
    /// Returns true if this token carries a comment.
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    /// The canonical written form of this token.
    ///
    /// This is the string an authoring operation inserts into a document:
    /// `{key}` without a comment, `{key|comment}` with one.
    pub fn canonical_literal(&self) -> String {
        canonical_literal(&self.key, &self.comment)
    }
}

/// Builds the canonical written form of a token from its parts.
pub fn canonical_literal(key: &str, comment: &str) -> String {
    if comment.is_empty() {
        format!("{{{}}}", key)
    } else {
        format!("{{{}|{}}}", key, comment)
    }
}

/// An ordered, key-deduplicated table of tokens extracted from text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenTable {
    tokens: Vec<Token>,
}

impl TokenTable {
    /// Scans text for the token grammar and returns the token table.
    ///
    /// The scan is pure and idempotent: re-parsing identical input yields an
    /// identical table, which callers use to gate re-render work. Empty input
    /// produces an empty table.
    pub fn parse(text: &str) -> TokenTable {
        let mut tokens: Vec<Token> = Vec::new();
        for caps in TOKEN_RE.captures_iter(text) {
            let key = &caps[1];
            if tokens.iter().any(|t| t.key == key) {
                continue;
            }
            tokens.push(Token {
                literal: caps[0].to_string(),
                key: key.to_string(),
                comment: caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string(),
            });
        }
        TokenTable { tokens }
    }

    /// Number of distinct tokens in the table.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens were found.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Looks up a token by key.
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.key == key)
    }

    /// Returns true if the table contains the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The first token in document order, if any.
    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Iterates tokens in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.key.as_str())
    }

    /// Tokens sorted by literal length, longest first.
    ///
    /// Substitution iterates in this order so the longest/most-specific
    /// literal is replaced before any shorter literal whose pattern could
    /// partially corrupt it. The sort is stable: equal lengths keep document
    /// order.
    pub fn by_length_desc(&self) -> Vec<&Token> {
        let mut sorted: Vec<&Token> = self.tokens.iter().collect();
        sorted.sort_by_key(|t| std::cmp::Reverse(t.literal.len()));
        sorted
    }
}

impl<'a> IntoIterator for &'a TokenTable {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Grammar Tests ====================

    mod grammar {
        use super::*;

        #[test]
        fn plain_key() {
            let table = TokenTable::parse("hello {name}!");
            assert_eq!(table.len(), 1);
            let token = table.get("name").unwrap();
            assert_eq!(token.literal, "{name}");
            assert_eq!(token.comment, "");
        }

        #[test]
        fn key_with_comment() {
            let table = TokenTable::parse("{client|Full legal name}");
            let token = table.get("client").unwrap();
            assert_eq!(token.literal, "{client|Full legal name}");
            assert_eq!(token.comment, "Full legal name");
            assert!(token.has_comment());
        }

        #[test]
        fn comment_may_contain_pipe_and_brace() {
            let table = TokenTable::parse("{k|a|b {c}");
            let token = table.get("k").unwrap();
            assert_eq!(token.comment, "a|b {c");
        }

        #[test]
        fn empty_key_is_not_a_token() {
            assert!(TokenTable::parse("{}").is_empty());
            assert!(TokenTable::parse("{|comment}").is_empty());
        }

        #[test]
        fn unclosed_brace_is_not_a_token() {
            assert!(TokenTable::parse("{name").is_empty());
            assert!(TokenTable::parse("name}").is_empty());
        }

        #[test]
        fn nested_open_brace_restarts_scan() {
            // The inner brace starts a new candidate; `{b}` is the only match.
            let table = TokenTable::parse("{a{b}");
            assert_eq!(table.len(), 1);
            assert!(table.contains_key("b"));
        }

        #[test]
        fn keys_may_contain_spaces() {
            let table = TokenTable::parse("{client name}");
            assert!(table.contains_key("client name"));
        }

        #[test]
        fn empty_input() {
            assert!(TokenTable::parse("").is_empty());
        }

        #[test]
        fn text_without_tokens() {
            assert!(TokenTable::parse("no placeholders here").is_empty());
        }
    }

    // ==================== Table Semantics Tests ====================

    mod table {
        use super::*;

        #[test]
        fn preserves_document_order() {
            let table = TokenTable::parse("{b} then {a} then {c}");
            let keys: Vec<&str> = table.keys().collect();
            assert_eq!(keys, vec!["b", "a", "c"]);
        }

        #[test]
        fn first_occurrence_wins() {
            let table = TokenTable::parse("{name|first hint} and {name|second hint}");
            assert_eq!(table.len(), 1);
            assert_eq!(table.get("name").unwrap().comment, "first hint");
        }

        #[test]
        fn duplicate_without_comment_keeps_original() {
            let table = TokenTable::parse("{name} and {name|late hint}");
            assert_eq!(table.len(), 1);
            assert_eq!(table.get("name").unwrap().literal, "{name}");
        }

        #[test]
        fn keys_are_unique() {
            let table = TokenTable::parse("{a}{b}{a}{c}{b}{a}");
            assert_eq!(table.len(), 3);
            let keys: Vec<&str> = table.keys().collect();
            assert_eq!(keys, vec!["a", "b", "c"]);
        }

        #[test]
        fn reparse_is_idempotent() {
            let input = "{b|hint} mixed {a} text {b} and {c|x}";
            let first = TokenTable::parse(input);
            let second = TokenTable::parse(input);
            assert_eq!(first, second);
        }

        #[test]
        fn longest_first_ordering() {
            let table = TokenTable::parse("{name} and {full_name}");
            let sorted = table.by_length_desc();
            assert_eq!(sorted[0].key, "full_name");
            assert_eq!(sorted[1].key, "name");
        }

        #[test]
        fn longest_first_is_stable_on_ties() {
            let table = TokenTable::parse("{aa} {bb} {cc}");
            let keys: Vec<&str> = table.by_length_desc().iter().map(|t| t.key.as_str()).collect();
            assert_eq!(keys, vec!["aa", "bb", "cc"]);
        }

        #[test]
        fn first_token() {
            let table = TokenTable::parse("{greeting} {name}");
            assert_eq!(table.first().unwrap().key, "greeting");
            assert!(TokenTable::parse("").first().is_none());
        }
    }

    // ==================== Canonical Form Tests ====================

    mod canonical {
        use super::*;

        #[test]
        fn without_comment() {
            assert_eq!(canonical_literal("name", ""), "{name}");
        }

        #[test]
        fn with_comment() {
            assert_eq!(canonical_literal("name", "Full name"), "{name|Full name}");
        }

        #[test]
        fn roundtrips_through_parse() {
            let literal = canonical_literal("client", "Legal name");
            let table = TokenTable::parse(&literal);
            let token = table.get("client").unwrap();
            assert_eq!(token.literal, literal);
            assert_eq!(token.canonical_literal(), literal);
        }
    }
}
