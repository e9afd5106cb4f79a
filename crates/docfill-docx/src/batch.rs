//! Batch compilation: one template, many rows, one archive.

use docfill_engine::ValueSet;
use docfill_token::TokenTable;

use crate::container::write_zip;
use crate::error::DocxError;
use crate::merge;

/// Fallback member stem when a row's first token value is empty.
pub const FALLBACK_STEM: &str = "document";

/// Longest member stem kept from a row's first token value.
const STEM_MAX: usize = 24;

/// One rowset entry: a value set plus its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    /// 1-based row position, used as the member-name tie-breaker.
    pub index: usize,
    /// The row's values.
    pub values: ValueSet,
}

impl BatchRow {
    /// Creates a row with its 1-based position.
    pub fn new(index: usize, values: ValueSet) -> Self {
        Self { index, values }
    }
}

/// Deterministic archive member name for a row.
///
/// The stem is the row's value for the table's first token, stripped to
/// ASCII alphanumerics and truncated; `document` when that leaves nothing.
/// The 1-based row index is always appended so names never collide.
pub fn member_name(table: &TokenTable, row: &BatchRow) -> String {
    let stem = table
        .first()
        .and_then(|token| row.values.get(&token.key))
        .map(sanitize_stem)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    format!("{}_{}.docx", stem, row.index)
}

fn sanitize_stem(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(STEM_MAX)
        .collect()
}

/// Compiles a rowset against a template into one archive.
///
/// Each row is filled against a *fresh* container opened from the pristine
/// template bytes; a mutated container is never reused across rows. Any
/// row failure aborts the whole batch with no partial archive. An empty
/// template or rowset is refused before any work starts.
pub fn compile_batch(
    template: &[u8],
    table: &TokenTable,
    rows: &[BatchRow],
) -> Result<Vec<u8>, DocxError> {
    if template.is_empty() {
        return Err(DocxError::EmptyTemplate);
    }
    if rows.is_empty() {
        return Err(DocxError::EmptyRowset);
    }
    let mut members = Vec::with_capacity(rows.len());
    for row in rows {
        let bytes = merge::fill_document(template, table, &row.values)?;
        members.push((member_name(table, row), bytes));
    }
    write_zip(members.iter().map(|(name, bytes)| (name.as_str(), &bytes[..])))
}
