//! Configuration module for stapler.
//!
//! The CLI turns its global flags into a [`Config`], validates it once and
//! hands it to every command. Per-command inputs (files, ranges, output)
//! are not part of the configuration; they travel in
//! [`crate::commands::Command`].

use anyhow::{Result, bail};

use crate::StaplerError;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

/// Compression level for written PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Write streams as they are.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
    /// Compress streams and drop unreachable objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = StaplerError;

    /// Parse "none", "standard" or "maximum", ignoring case.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(StaplerError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Refuse to write and report the existing file.
    #[default]
    NoClobber,
    /// Replace existing files.
    Force,
}

/// Runtime configuration shared by all commands.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory relative output paths are resolved against.
    pub destdir: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression applied to written documents.
    pub compression: CompressionLevel,

    /// Report every input and selected page.
    pub verbose: bool,

    /// Suppress everything but errors.
    pub quiet: bool,

    /// Build and report plans without writing files.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destdir: PathBuf::from("."),
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            verbose: false,
            quiet: false,
            dry_run: false,
        }
    }
}

impl Config {
    /// Configuration writing into `destdir` with defaults otherwise.
    pub fn with_destdir(destdir: impl Into<PathBuf>) -> Self {
        Self {
            destdir: destdir.into(),
            ..Self::default()
        }
    }

    /// Destination directory.
    pub fn destdir(&self) -> &Path {
        &self.destdir
    }

    /// Whether existing outputs may be replaced.
    pub fn force(&self) -> bool {
        self.overwrite_mode == OverwriteMode::Force
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The destination directory is empty, missing or not a directory
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.destdir.as_os_str().is_empty() {
            bail!("Destination directory cannot be empty");
        }

        if !self.destdir.exists() {
            bail!(
                "Destination directory does not exist: {}",
                self.destdir.display()
            );
        }

        if !self.destdir.is_dir() {
            bail!(
                "Destination is not a directory: {}",
                self.destdir.display()
            );
        }

        Ok(())
    }

    /// Check if informational output should be displayed.
    ///
    /// Returns false in quiet mode unless doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
