//! Document container access and merge orchestration for docfill.
//!
//! This crate connects the pure text engine to real document files:
//!
//! - [`Container`]: a document as a zip of named internal parts, with the
//!   part filter selecting substitution targets (body, headers, footers,
//!   footnotes, endnotes).
//! - [`convert`]: visible-text extraction from a part's markup, used for
//!   token detection and preview only.
//! - [`merge`]: single-document operations ([`extract_tokens`],
//!   [`fill_document`], [`apply_replacements`]).
//! - [`batch`]: the mail-merge compiler: one fresh container per row,
//!   deterministic member names, one output archive, no partial output on
//!   failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use docfill_docx::{extract_tokens, fill_document};
//! use docfill_engine::ValueSet;
//!
//! let bytes = std::fs::read("contract.docx")?;
//! let table = extract_tokens(&bytes)?;
//! let values = ValueSet::from_pairs([("client", "Acme")]);
//! let merged = fill_document(&bytes, &table, &values)?;
//! std::fs::write("contract_filled.docx", merged)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod container;
pub mod convert;
mod error;
pub mod merge;

pub use batch::{compile_batch, member_name, BatchRow, FALLBACK_STEM};
pub use container::{is_merge_part, write_zip, Container, MAIN_PART};
pub use convert::{document_text, part_text};
pub use error::DocxError;
pub use merge::{apply_replacements, extract_tokens, fill_document};
