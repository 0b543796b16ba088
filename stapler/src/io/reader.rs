//! PDF reading and loading operations.
//!
//! [`PdfReader`] loads and checks a single file. [`DocumentStore`] sits on
//! top of it and keeps every document a command touches, so an input named
//! several times (`a.pdf:1 b.pdf a.pdf:3`) is parsed once.
//!
//! # Examples
//!
//! ```no_run
//! use stapler::io::DocumentStore;
//! use stapler::range::PageCounter;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = DocumentStore::new();
//! let pages = store.page_count(Path::new("document.pdf"))?;
//! println!("{pages} pages");
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, StaplerError};
use crate::range::PageCounter;
use crate::utils::{format_duration, format_file_size};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file, as given.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }

    /// One-line description for verbose output.
    pub fn summary(&self) -> String {
        format!(
            "{} ({} page(s), {}, loaded in {})",
            self.path.display(),
            self.page_count,
            format_file_size(self.file_size),
            format_duration(self.load_time)
        )
    }
}

/// PDF reader with configurable checks.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents without pages.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Check that `path` names an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns [`StaplerError::FileNotFound`] or [`StaplerError::NotAFile`].
    pub fn check_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(StaplerError::file_not_found(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(StaplerError::not_a_file(path.to_path_buf()));
        }
        Ok(())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or is not a file
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    /// - The PDF has no pages (unless verification is off)
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path(path)?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let doc = Document::load(&path_buf).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                StaplerError::encrypted_pdf(path_buf.clone())
            } else {
                StaplerError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if doc.trailer.has(b"Encrypt") {
            return Err(StaplerError::encrypted_pdf(path_buf));
        }

        if self.verify && doc.get_pages().is_empty() {
            return Err(StaplerError::failed_to_load_pdf(
                path_buf,
                "PDF has no pages",
            ));
        }

        Ok(LoadedPdf::new(doc, path_buf, start.elapsed()))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Documents loaded during one command, keyed by the path they were named by.
#[derive(Debug, Default)]
pub struct DocumentStore {
    reader: PdfReader,
    documents: HashMap<PathBuf, LoadedPdf>,
    /// Paths in order of first load.
    order: Vec<PathBuf>,
}

impl DocumentStore {
    /// Create an empty store using the default reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store using `reader`.
    pub fn with_reader(reader: PdfReader) -> Self {
        Self {
            reader,
            ..Self::default()
        }
    }

    /// Load `path` unless it is already loaded.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedPdf> {
        if !self.documents.contains_key(path) {
            let loaded = self.reader.load(path)?;
            self.order.push(path.to_path_buf());
            self.documents.insert(path.to_path_buf(), loaded);
        }

        self.get(path)
            .ok_or_else(|| StaplerError::other(format!("{} vanished from store", path.display())))
    }

    /// An already loaded document.
    pub fn get(&self, path: &Path) -> Option<&LoadedPdf> {
        self.documents.get(path)
    }

    /// Document for `path`, which must have been loaded before.
    ///
    /// # Errors
    ///
    /// Returns [`StaplerError::AssemblyFailed`] if it was not.
    pub fn document(&self, path: &Path) -> Result<&Document> {
        self.get(path).map(|loaded| &loaded.document).ok_or_else(|| {
            StaplerError::assembly_failed(format!("{} was not loaded", path.display()))
        })
    }

    /// Loaded documents in order of first load.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedPdf> {
        self.order.iter().filter_map(|path| self.documents.get(path))
    }

    /// Number of distinct documents loaded.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl PageCounter for DocumentStore {
    fn page_count(&mut self, path: &Path) -> Result<usize> {
        self.load(path).map(|loaded| loaded.page_count)
    }
}
