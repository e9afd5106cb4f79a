//! CSV rowset ingestion and blank data-template generation.
//!
//! The first record is the header row, mapping column names to token keys.
//! Missing or short cells default to the empty string, which the engine
//! treats as unfilled.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use docfill_docx::BatchRow;
use docfill_engine::ValueSet;
use docfill_token::TokenTable;

/// Reads a CSV rowset from a file.
pub fn read_rows_file(path: &Path) -> Result<Vec<BatchRow>> {
    let file =
        File::open(path).with_context(|| format!("could not open rowset {}", path.display()))?;
    read_rows(file).with_context(|| format!("could not parse rowset {}", path.display()))
}

/// Reads a CSV rowset: header row, then one `BatchRow` per data row.
///
/// Rows keep their 1-based positional index for member naming.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BatchRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let mut values = ValueSet::new();
        for (j, header) in headers.iter().enumerate() {
            values.set(header, record.get(j).unwrap_or(""));
        }
        rows.push(BatchRow::new(i + 1, values));
    }
    Ok(rows)
}

/// Produces a blank data-collection CSV whose headers are the token keys.
pub fn blank_rowset(table: &TokenTable) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(table.keys())?;
    wtr.into_inner().context("could not finish csv output")
}
