//! Error types for container and merge operations.

use thiserror::Error;

/// Errors from opening, converting, filling, or packaging documents.
#[derive(Debug, Error)]
pub enum DocxError {
    /// The source bytes cannot be opened as a valid container.
    ///
    /// Fatal for the current operation: no output is produced.
    #[error("not a valid document container: {0}")]
    MalformedContainer(String),

    /// The text converter cannot render a part's markup.
    #[error("could not extract document text: {0}")]
    ConversionFailure(String),

    /// A named internal part is missing from the container.
    #[error("part '{0}' not found in container")]
    PartNotFound(String),

    /// A named internal part is not valid UTF-8 text.
    #[error("part '{0}' is not valid UTF-8 text")]
    PartNotText(String),

    /// Guard condition: the template document is missing or empty.
    #[error("template document is empty")]
    EmptyTemplate,

    /// Guard condition: batch compilation was invoked with zero rows.
    #[error("rowset is empty")]
    EmptyRowset,

    /// The output container or archive could not be written.
    #[error("could not write output container: {0}")]
    WriteFailed(String),
}
