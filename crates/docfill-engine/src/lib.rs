//! Core engine for filling placeholder tokens in markup text.
//!
//! `docfill-engine` operates on the raw text of a document's internal parts.
//! Word processors routinely fragment a visually contiguous run of characters
//! across multiple inline markup elements, so a token that reads `{name}` on
//! screen rarely appears as the contiguous string `{name}` in the underlying
//! XML. The engine's job is to find and replace such fragmented literals
//! without disturbing the surrounding markup.
//!
//! The pieces:
//!
//! - [`matcher::RunMatcher`]: finds a literal string even when its characters
//!   are separated by inline tag markup.
//! - [`substitute::apply_to_part`]: applies a [`ValueSet`] to one internal
//!   part, longest literal first, escaping reserved markup characters.
//! - [`authoring::AuthoringLog`]: the reverse workflow that turns selected
//!   document text into new tokens.
//! - [`preview::preview`]: projects current values onto the converted text
//!   view without touching the container.
//!
//! All functions here are pure over explicit inputs (part text, token table,
//! value set); nothing reads or writes containers, and nothing holds ambient
//! state.

pub mod authoring;
pub mod error;
pub mod matcher;
pub mod preview;
pub mod substitute;
pub mod values;

pub use authoring::{AuthoringLog, Replacement};
pub use error::AuthoringError;
pub use matcher::{strip_non_content, RunMatcher};
pub use preview::{preview, preview_with, PreviewField};
pub use substitute::{apply_to_part, escape_markup};
pub use values::ValueSet;
