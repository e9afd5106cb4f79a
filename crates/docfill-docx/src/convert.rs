//! Text extraction from the container's markup.
//!
//! The converted text stands in for an external rich-text converter: it is
//! used only for token display and detection, never as the substitution
//! target. Substitution always runs against the original parts, because a
//! round-tripped conversion cannot guarantee structural fidelity.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::container::{Container, MAIN_PART};
use crate::error::DocxError;

/// Extracts the visible text of the main body part.
pub fn document_text(container: &Container) -> Result<String, DocxError> {
    let xml = container.read_part(MAIN_PART)?;
    part_text(&xml)
}

/// Extracts the visible text of one part's markup.
///
/// Text inside `w:t` elements is collected with entities decoded; paragraph
/// ends become newlines, explicit breaks and tabs become `\n` and `\t`.
/// Everything else (formatting, proofing, layout) is dropped.
pub fn part_text(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut text_depth = 0usize;
    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocxError::ConversionFailure(e.to_string()))?;
        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => text_depth += 1,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => text_depth = text_depth.saturating_sub(1),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:br" => out.push('\n'),
                b"w:tab" => out.push('\t'),
                _ => {}
            },
            Event::Text(t) if text_depth > 0 => {
                let text = t
                    .unescape()
                    .map_err(|e| DocxError::ConversionFailure(e.to_string()))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}
