//! Live preview projection.
//!
//! The preview operates on the *converted* text view, not on container
//! parts: it shows what the filled document will read like, with current
//! values where present and placeholder literals where not. No container is
//! touched; the projection is recomputed from scratch on every call.

use docfill_token::{Token, TokenTable};

use crate::values::ValueSet;

/// One token occurrence being rendered into a preview.
#[derive(Debug, Clone, Copy)]
pub struct PreviewField<'a> {
    /// The token this field renders.
    pub token: &'a Token,
    /// The filled value, or `None` when the field is unfilled.
    pub value: Option<&'a str>,
}

/// Projects current values onto the converted text.
///
/// Filled tokens show their value, unfilled tokens stay as their literal.
///
/// # Example
///
/// ```rust
/// use docfill_engine::{preview, ValueSet};
/// use docfill_token::TokenTable;
///
/// let text = "{client|Full name} agrees to {amount}.";
/// let table = TokenTable::parse(text);
/// let values = ValueSet::from_pairs([("client", "Acme"), ("amount", "$500")]);
/// assert_eq!(preview(text, &table, &values), "Acme agrees to $500.");
/// ```
pub fn preview(text: &str, table: &TokenTable, values: &ValueSet) -> String {
    preview_with(text, table, values, |field| match field.value {
        Some(value) => value.to_string(),
        None => field.token.literal.clone(),
    })
}

/// Projects values with a caller-provided field decorator.
///
/// The decorator receives each token and its filled value (if any) and
/// returns the rendered text; interactive callers use it for badge styling.
/// Tokens are processed longest-literal-first, matching the substitution
/// ordering.
pub fn preview_with<F>(text: &str, table: &TokenTable, values: &ValueSet, mut decorate: F) -> String
where
    F: FnMut(PreviewField<'_>) -> String,
{
    let mut out = text.to_string();
    for token in table.by_length_desc() {
        let value = values.get(&token.key);
        let rendered = decorate(PreviewField { token, value });
        out = out.replace(&token.literal, &rendered);
    }
    out
}
