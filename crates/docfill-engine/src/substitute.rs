//! Value substitution over one internal part.
//!
//! Substitution runs against the *original* container's part text, never the
//! converted display view, so the output document keeps every bit of
//! structure the source had. Each part (main body, headers, footers,
//! footnotes, endnotes) is processed independently with the same token table
//! and value set.

use docfill_token::TokenTable;

use crate::matcher::{strip_non_content, RunMatcher};
use crate::values::ValueSet;

/// Escapes the three reserved markup characters.
///
/// Values are inserted into raw XML text, so `&`, `<` and `>` must be
/// entity-escaped. Ampersand goes first so already-escaped output is not
/// double-escaped by the later passes.
pub fn escape_markup(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Applies a value set to one internal part and returns the substituted text.
///
/// Known zero-width elements are stripped first, then tokens are processed
/// longest-literal-first. For each token with at least one occurrence the
/// substitution string is the corresponding value, escaped and substituted
/// globally. An unfilled token substitutes its own literal, so it stays
/// visible as its placeholder text. Tokens that do not
/// occur in this part are skipped; that is normal, not an error.
pub fn apply_to_part(part: &str, table: &TokenTable, values: &ValueSet) -> String {
    let mut content = strip_non_content(part);
    for token in table.by_length_desc() {
        let raw = values.get(&token.key).unwrap_or(&token.literal);
        let replacement = escape_markup(raw);
        let (next, _) = RunMatcher::new(&token.literal).replace_all(&content, &replacement);
        content = next;
    }
    content
}
