//! PDF metadata (Info dictionary) reading.
//!
//! Entries are reported in the order the dictionary stores them, keys with
//! their leading slash (`/Title`). Text strings are decoded from UTF-16BE
//! when they carry a byte order mark, otherwise from UTF-8 with a Latin-1
//! fallback for legacy encodings.

use lopdf::{Dictionary, Document, Object};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One key/value pair of an Info dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoEntry {
    /// Key including the leading slash.
    pub key: String,
    /// Value rendered as text.
    pub value: String,
}

/// Metadata of one document, as printed by `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// Document the metadata was read from.
    pub path: PathBuf,
    /// Info dictionary entries; empty when the document has none.
    pub entries: Vec<InfoEntry>,
}

impl DocumentInfo {
    /// Read the metadata of `doc`, loaded from `path`.
    pub fn from_document(path: &Path, doc: &Document) -> Self {
        let entries = MetadataReader::new()
            .read(doc)
            .into_iter()
            .map(|(key, value)| InfoEntry { key, value })
            .collect();

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// Whether no metadata was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable report.
    ///
    /// ```text
    /// *** Metadata for report.pdf
    ///
    ///     /Title:  Quarterly report
    ///
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("*** Metadata for {}\n\n", self.path.display());
        if self.entries.is_empty() {
            out.push_str("    (No metadata found.)\n");
        } else {
            for entry in &self.entries {
                out.push_str(&format!("    {}:  {}\n", entry.key, entry.value));
            }
        }
        out
    }
}

/// Reader for document Info dictionaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataReader;

impl MetadataReader {
    /// Create a new metadata reader.
    pub fn new() -> Self {
        Self
    }

    /// Info dictionary entries of `doc` as `(key, value)` text pairs.
    ///
    /// Returns an empty list when the trailer has no usable `Info` entry.
    pub fn read(&self, doc: &Document) -> Vec<(String, String)> {
        let Some(info) = Self::info_dictionary(doc) else {
            return Vec::new();
        };

        info.iter()
            .map(|(key, value)| {
                (
                    format!("/{}", String::from_utf8_lossy(key)),
                    render_value(doc, value),
                )
            })
            .collect()
    }

    /// Whether the document has a non-empty Info dictionary.
    pub fn has_metadata(&self, doc: &Document) -> bool {
        Self::info_dictionary(doc).is_some_and(|info| !info.is_empty())
    }

    fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
        match doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

fn render_value(doc: &Document, value: &Object) -> String {
    match value {
        Object::String(bytes, _) => decode_text(bytes),
        Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => r.to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Null => "null".to_string(),
        Object::Reference(id) => match doc.get_object(*id) {
            // one level only
            Ok(Object::Reference(_)) | Err(_) => format!("{} {} R", id.0, id.1),
            Ok(resolved) => render_value(doc, resolved),
        },
        Object::Array(items) => {
            let rendered: Vec<String> = items.iter().map(|item| render_value(doc, item)).collect();
            format!("[{}]", rendered.join(" "))
        }
        Object::Dictionary(_) => "<<dictionary>>".to_string(),
        Object::Stream(_) => "<<stream>>".to_string(),
    }
}

/// Decode a PDF text string.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(b"\xFE\xFF") {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
