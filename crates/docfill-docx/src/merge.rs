//! Single-document merge orchestration.
//!
//! Tokens are detected in the converted text view; substitution runs per
//! internal part against the original container. A container that cannot be
//! opened fails the whole operation with no partial output; a part that
//! simply contains no tokens is left as it was.

use docfill_engine::{apply_to_part, AuthoringLog, ValueSet};
use docfill_token::TokenTable;

use crate::container::Container;
use crate::convert;
use crate::error::DocxError;

/// Detects the token table of a template document.
pub fn extract_tokens(bytes: &[u8]) -> Result<TokenTable, DocxError> {
    let container = Container::open(bytes)?;
    let text = convert::document_text(&container)?;
    Ok(TokenTable::parse(&text))
}

/// Fills a template with a value set and returns the merged document bytes.
///
/// Every substitution-target part is processed independently with the same
/// table and values. Unfilled tokens keep their placeholder text.
pub fn fill_document(
    bytes: &[u8],
    table: &TokenTable,
    values: &ValueSet,
) -> Result<Vec<u8>, DocxError> {
    let mut container = Container::open(bytes)?;
    for name in container.part_names() {
        let text = container.read_part(&name)?;
        let filled = apply_to_part(&text, table, values);
        container.write_part(&name, filled)?;
    }
    container.serialize()
}

/// Applies an authoring log to a document, turning selected text into
/// tokens.
///
/// Returns the reworked document bytes and the number of occurrences
/// replaced. Zero replacements is not an error: the caller decides whether
/// an unmatched selection is worth reporting.
pub fn apply_replacements(bytes: &[u8], log: &AuthoringLog) -> Result<(Vec<u8>, usize), DocxError> {
    let mut container = Container::open(bytes)?;
    let names = container.part_names();
    let mut parts = names
        .iter()
        .map(|name| container.read_part(name))
        .collect::<Result<Vec<_>, _>>()?;
    let replaced = log.apply(&mut parts);
    for (name, text) in names.iter().zip(parts) {
        container.write_part(name, text)?;
    }
    Ok((container.serialize()?, replaced))
}
