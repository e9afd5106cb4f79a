//! Command handlers.
//!
//! Each handler is a plain function over explicit inputs so the whole
//! surface is drivable from tests. Long operations (container open, per-part
//! substitution, packaging) run to completion before the handler returns;
//! nothing here spawns background work.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use console::Style;
use docfill_docx::{
    apply_replacements, compile_batch, document_text, extract_tokens, fill_document, Container,
};
use docfill_engine::{preview_with, AuthoringLog, ValueSet};
use docfill_token::TokenTable;

use crate::cli::{Cli, Command, OutputMode};
use crate::output::render_tokens;
use crate::rows::{blank_rowset, read_rows_file};

/// Fixed stem for default output names; a Unix timestamp is appended.
const EXPORT_PREFIX: &str = "docfill_export";

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tokens { template, output } => tokens(&template, output),
        Command::Blank { template, out } => blank(&template, out),
        Command::Fill {
            template,
            data,
            set,
            out,
            allow_unfilled,
        } => fill(&template, data.as_deref(), &set, out, allow_unfilled),
        Command::Merge {
            template,
            rows,
            out,
            allow_unfilled,
        } => merge(&template, &rows, out, allow_unfilled),
        Command::Preview {
            template,
            data,
            set,
        } => preview(&template, data.as_deref(), &set),
        Command::Tokenize {
            document,
            text,
            key,
            comment,
            all,
            out,
        } => tokenize(&document, &text, &key, &comment, all, out),
    }
}

fn tokens(template: &Path, mode: OutputMode) -> Result<()> {
    let table = extract_tokens(&read_template(template)?)?;
    print!("{}", render_tokens(&table, mode)?);
    Ok(())
}

fn blank(template: &Path, out: Option<PathBuf>) -> Result<()> {
    let table = extract_tokens(&read_template(template)?)?;
    if table.is_empty() {
        bail!("no tokens detected in {}", template.display());
    }
    let out = out.unwrap_or_else(|| PathBuf::from("docfill_data.csv"));
    fs::write(&out, blank_rowset(&table)?)
        .with_context(|| format!("could not write {}", out.display()))?;
    println!("wrote {} ({} columns)", out.display(), table.len());
    Ok(())
}

fn fill(
    template: &Path,
    data: Option<&Path>,
    set: &[String],
    out: Option<PathBuf>,
    allow_unfilled: bool,
) -> Result<()> {
    let bytes = read_template(template)?;
    let table = extract_tokens(&bytes)?;
    let values = load_values(data, set)?;

    let unfilled = values.unfilled_keys(&table);
    if !unfilled.is_empty() && !allow_unfilled {
        report_unfilled(unfilled.len(), &unfilled);
        bail!("pass --allow-unfilled to export with empty fields");
    }

    let merged = fill_document(&bytes, &table, &values)?;
    let out = out.unwrap_or_else(|| PathBuf::from(export_name("docx")));
    fs::write(&out, merged).with_context(|| format!("could not write {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

fn merge(template: &Path, rows: &Path, out: Option<PathBuf>, allow_unfilled: bool) -> Result<()> {
    let bytes = read_template(template)?;
    let table = extract_tokens(&bytes)?;
    let batch = read_rows_file(rows)?;
    if batch.is_empty() {
        bail!("rowset {} has no data rows", rows.display());
    }

    if !allow_unfilled {
        let empty: usize = batch
            .iter()
            .map(|row| row.values.unfilled_keys(&table).len())
            .sum();
        if empty > 0 {
            let keys = batch
                .first()
                .map(|row| row.values.unfilled_keys(&table))
                .unwrap_or_default();
            report_unfilled(empty, &keys);
            bail!("pass --allow-unfilled to export with empty fields");
        }
    }

    let archive = compile_batch(&bytes, &table, &batch)?;
    let out = out.unwrap_or_else(|| PathBuf::from(export_name("zip")));
    fs::write(&out, archive).with_context(|| format!("could not write {}", out.display()))?;
    println!("wrote {} ({} documents)", out.display(), batch.len());
    Ok(())
}

fn preview(template: &Path, data: Option<&Path>, set: &[String]) -> Result<()> {
    let bytes = read_template(template)?;
    let text = document_text(&Container::open(&bytes)?)?;
    let table = TokenTable::parse(&text);
    let values = load_values(data, set)?;

    let filled = Style::new().green().bold();
    let empty = Style::new().dim();
    let rendered = preview_with(&text, &table, &values, |field| match field.value {
        Some(value) => filled.apply_to(value).to_string(),
        None => empty.apply_to(field.token.literal.as_str()).to_string(),
    });
    print!("{}", rendered);
    Ok(())
}

fn tokenize(
    document: &Path,
    text: &str,
    key: &str,
    comment: &str,
    all: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let bytes = read_template(document)?;
    let mut log = AuthoringLog::new();
    let literal = log.create(text, key, comment, all)?.token_literal();

    let (reworked, replaced) = apply_replacements(&bytes, &log)?;
    if replaced == 0 {
        bail!("'{}' does not occur in {}", text, document.display());
    }

    let out = out.unwrap_or_else(|| PathBuf::from(export_name("docx")));
    fs::write(&out, reworked).with_context(|| format!("could not write {}", out.display()))?;
    println!(
        "replaced {} occurrence(s) with {}, wrote {}",
        replaced,
        literal,
        out.display()
    );
    Ok(())
}

fn read_template(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("template document {} is empty", path.display());
    }
    Ok(bytes)
}

/// Builds one value set from an optional values file plus inline pairs.
///
/// Inline `--set` pairs win over file values for the same key.
fn load_values(data: Option<&Path>, set: &[String]) -> Result<ValueSet> {
    let mut values = match data {
        Some(path) => values_from_file(path)?,
        None => ValueSet::new(),
    };
    for pair in set {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got '{}'", pair))?;
        values.set(key, value);
    }
    Ok(values)
}

fn values_from_file(path: &Path) -> Result<ValueSet> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension {
        "json" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("could not parse values from {}", path.display()))
        }
        "yaml" | "yml" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("could not parse values from {}", path.display()))
        }
        "csv" => {
            let rows = read_rows_file(path)?;
            rows.into_iter()
                .next()
                .map(|row| row.values)
                .with_context(|| format!("rowset {} has no data rows", path.display()))
        }
        other => bail!("unsupported values format '{}': use json, yaml, or csv", other),
    }
}

fn report_unfilled(count: usize, keys: &[&str]) {
    let warn = Style::new().yellow().bold();
    eprintln!(
        "{} {} field(s) are empty: {}",
        warn.apply_to("refused:"),
        count,
        keys.join(", ")
    );
}

fn export_name(extension: &str) -> String {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}_{}.{}", EXPORT_PREFIX, stamp, extension)
}
