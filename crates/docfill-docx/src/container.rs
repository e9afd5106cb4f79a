//! Container access: a document as a zip of named internal parts.
//!
//! The container is the substitution target. Opening reads every entry into
//! memory in archive order; substituted parts are written back over their
//! entries and the whole container is re-serialized, so untouched entries
//! (styles, media, relationships) survive byte for byte.

use std::io::{Cursor, Read, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use crate::error::DocxError;

/// Internal parts subject to token substitution: main body, headers,
/// footers, footnotes, and endnotes, optionally index-suffixed.
static MERGE_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^word/(document|header|footer|footnotes|endnotes)\d*\.xml$")
        .expect("part filter is valid")
});

/// The main body part, used for token detection and preview.
pub const MAIN_PART: &str = "word/document.xml";

/// Returns true if the named entry is a substitution target.
pub fn is_merge_part(name: &str) -> bool {
    MERGE_PART_RE.is_match(name)
}

#[derive(Debug)]
struct Entry {
    name: String,
    bytes: Vec<u8>,
}

/// An opened document container.
#[derive(Debug)]
pub struct Container {
    entries: Vec<Entry>,
}

impl Container {
    /// Opens document bytes as a container.
    ///
    /// Empty input is refused as [`DocxError::EmptyTemplate`]; bytes that do
    /// not parse as a zip archive fail with
    /// [`DocxError::MalformedContainer`].
    pub fn open(bytes: &[u8]) -> Result<Self, DocxError> {
        if bytes.is_empty() {
            return Err(DocxError::EmptyTemplate);
        }
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocxError::MalformedContainer(e.to_string()))?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| DocxError::MalformedContainer(e.to_string()))?;
            if file.is_dir() {
                continue;
            }
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)
                .map_err(|e| DocxError::MalformedContainer(e.to_string()))?;
            entries.push(Entry {
                name: file.name().to_string(),
                bytes,
            });
        }
        Ok(Self { entries })
    }

    /// Names of all entries, in archive order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Names of the substitution-target parts, in archive order.
    pub fn part_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| is_merge_part(&e.name))
            .map(|e| e.name.clone())
            .collect()
    }

    /// Reads a named part as text.
    pub fn read_part(&self, name: &str) -> Result<String, DocxError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| DocxError::PartNotFound(name.to_string()))?;
        String::from_utf8(entry.bytes.clone()).map_err(|_| DocxError::PartNotText(name.to_string()))
    }

    /// Replaces a named part's content.
    pub fn write_part(&mut self, name: &str, text: String) -> Result<(), DocxError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| DocxError::PartNotFound(name.to_string()))?;
        entry.bytes = text.into_bytes();
        Ok(())
    }

    /// Serializes the container back to document bytes.
    pub fn serialize(&self) -> Result<Vec<u8>, DocxError> {
        write_zip(self.entries.iter().map(|e| (e.name.as_str(), &e.bytes[..])))
    }
}

/// Packages named byte blobs into one zip stream, in iteration order.
pub fn write_zip<'a, I>(members: I) -> Result<Vec<u8>, DocxError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options: zip::write::SimpleFileOptions =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in members {
        writer
            .start_file(name, options)
            .map_err(|e| DocxError::WriteFailed(e.to_string()))?;
        writer
            .write_all(bytes)
            .map_err(|e| DocxError::WriteFailed(e.to_string()))?;
    }
    let cursor = writer
        .finish()
        .map_err(|e| DocxError::WriteFailed(e.to_string()))?;
    Ok(cursor.into_inner())
}
