//! # docfill - Mail-Merge for Word-Processing Documents
//!
//! `docfill` detects `{key|comment}` placeholder tokens in a document,
//! fills them from key/value data, and packages batch output:
//!
//! ```text
//! docfill tokens contract.docx
//! docfill blank contract.docx -o data.csv
//! docfill fill contract.docx --set client=Acme --set amount='$500'
//! docfill merge contract.docx --rows data.csv
//! docfill preview contract.docx --set client=Acme
//! docfill tokenize contract.docx --text "Acme Corp" --key client --all
//! ```
//!
//! The engine lives in the `docfill-token`, `docfill-engine`, and
//! `docfill-docx` crates; this crate is the command-line surface.

pub mod cli;
pub mod commands;
pub mod output;
pub mod rows;
