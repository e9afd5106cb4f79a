//! Token listing output.
//!
//! Structured modes (json/yaml/csv) serialize the token table directly and
//! carry no styling; the text mode is the styled terminal listing.

use anyhow::{Context, Result};
use console::Style;
use docfill_token::{Token, TokenTable};

use crate::cli::OutputMode;

/// Renders a token table in the requested output mode.
pub fn render_tokens(table: &TokenTable, mode: OutputMode) -> Result<String> {
    let tokens: Vec<&Token> = table.iter().collect();
    match mode {
        OutputMode::Text => Ok(tokens_text(table)),
        OutputMode::Json => {
            let mut out = serde_json::to_string_pretty(&tokens)?;
            out.push('\n');
            Ok(out)
        }
        OutputMode::Yaml => Ok(serde_yaml::to_string(&tokens)?),
        OutputMode::Csv => tokens_csv(table),
    }
}

fn tokens_text(table: &TokenTable) -> String {
    if table.is_empty() {
        return "no tokens detected\n".to_string();
    }
    let key_style = Style::new().cyan().bold();
    let hint_style = Style::new().dim();
    let mut out = String::new();
    for token in table {
        if token.has_comment() {
            out.push_str(&format!(
                "{}  {}\n",
                key_style.apply_to(&token.key),
                hint_style.apply_to(&token.comment)
            ));
        } else {
            out.push_str(&format!("{}\n", key_style.apply_to(&token.key)));
        }
    }
    out
}

fn tokens_csv(table: &TokenTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["key", "comment", "literal"])?;
    for token in table {
        wtr.write_record([&token.key, &token.comment, &token.literal])?;
    }
    let bytes = wtr.into_inner().context("could not finish csv output")?;
    String::from_utf8(bytes).context("csv output was not utf-8")
}
