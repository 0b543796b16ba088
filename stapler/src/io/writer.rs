//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Compression levels
//! - Overwrite protection
//! - Output path resolution against the destination directory
//!
//! # Examples
//!
//! ```no_run
//! use stapler::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(mut doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&mut doc, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{CompressionLevel, Config, OverwriteMode};
use crate::error::{Result, StaplerError};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Compression that was applied.
    pub compression: CompressionLevel,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer using the compression level of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_options(WriteOptions {
            compression: config.compression,
            ..WriteOptions::default()
        })
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self::with_options(WriteOptions {
            atomic: false,
            ..WriteOptions::default()
        })
    }

    /// Save a PDF document to a file.
    ///
    /// The document is compressed in place according to the configured
    /// level before it is serialized.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output file cannot be created
    /// - Serialization or the final rename fails
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        match self.options.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => doc.compress(),
            CompressionLevel::Maximum => {
                doc.prune_objects();
                doc.compress();
                doc.renumber_objects();
            }
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        if let Err(err) = self.write_document(doc, &write_path) {
            if self.options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }
            return Err(err);
        }

        if self.options.atomic {
            std::fs::rename(&write_path, path).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                StaplerError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
            compression: self.options.compression,
        })
    }

    fn write_document(&self, doc: &mut Document, write_path: &Path) -> Result<()> {
        let file =
            std::fs::File::create(write_path).map_err(|e| StaplerError::FailedToCreateOutput {
                path: write_path.to_path_buf(),
                source: e,
            })?;

        let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| StaplerError::FailedToWrite {
                path: write_path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| StaplerError::FailedToWrite {
            path: write_path.to_path_buf(),
            source: e,
        })
    }

    /// Check that a file can be written to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or read-only.
    pub fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let metadata = std::fs::metadata(parent).map_err(|e| {
                StaplerError::FailedToCreateOutput {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;

            if !metadata.is_dir() {
                return Err(StaplerError::not_a_file(parent.to_path_buf()));
            }

            if metadata.permissions().readonly() {
                return Err(StaplerError::FailedToCreateOutput {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "output directory is not writable",
                    ),
                });
            }
        }

        Ok(())
    }

    /// Safely remove an output file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove_if_exists(&self, path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| StaplerError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Resolve an output path against the destination directory.
///
/// Absolute paths are kept; relative ones are joined onto `destdir`.
pub fn resolve_output_path(destdir: &Path, output: &Path) -> PathBuf {
    if output.is_absolute() {
        output.to_path_buf()
    } else {
        destdir.join(output)
    }
}

/// Refuse to replace an existing file unless `mode` allows it.
///
/// # Errors
///
/// Returns [`StaplerError::OutputExists`] for an existing path under
/// [`OverwriteMode::NoClobber`].
pub fn check_overwrite(path: &Path, mode: OverwriteMode) -> Result<()> {
    match mode {
        OverwriteMode::NoClobber if path.exists() => {
            Err(StaplerError::output_exists(path.to_path_buf()))
        }
        _ => Ok(()),
    }
}

/// Sibling temp file used for atomic writes.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
