//! CLI argument parsing for stapler.
//!
//! This module defines the command-line interface structure using `clap`.
//! Options shared by every command are global, so they may appear before
//! or after the command name.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.to_config()?;
//! let command = cli.to_command();
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use stapler::commands::Command;
use stapler::config::{CompressionLevel, Config, OverwriteMode};
use stapler::error::{Result, StaplerError};
use stapler::range::InputToken;

/// Select, interleave, delete and split pages of PDF documents.
///
/// Inputs of zip, sel and del take an optional page range after a colon:
/// `file.pdf:1-3,7r90,9-`. Ranges may run backwards (`5-1`), stay open at
/// the end (`7-`) and carry a rotation suffix (`r90`, `r180`, `r270`, or
/// `R`, `D`, `L` for right, down and left).
#[derive(Parser, Debug)]
#[command(name = "stapler")]
#[command(version)]
#[command(about = "Select, interleave, delete and split pages of PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Directory output files are written to
    ///
    /// Relative output names are resolved against this directory.
    /// Absolute output paths are used as given.
    #[arg(
        short,
        long,
        global = true,
        env = "STAPLER_DESTDIR",
        default_value = ".",
        value_name = "DIR"
    )]
    pub destdir: PathBuf,

    /// Overwrite existing output files
    ///
    /// By default stapler refuses to replace a file that already exists.
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Report every input file and every page taken from it
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Build and show the page selection without writing any file
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Compression level for written PDFs
    ///
    /// - none: No compression
    /// - standard: Compress content streams (default)
    /// - maximum: Also drop unused objects and renumber
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Print results as JSON (info and dry runs)
    #[arg(long, global = true)]
    pub json: bool,
}

/// stapler commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interleave pages of two or more files
    ///
    /// Takes one page from each input in turn until all are used up.
    /// The last argument is the output file.
    ///
    /// Example:
    ///   stapler zip odd.pdf even.pdf:9-1 book.pdf
    Zip {
        /// Input files with optional ranges, then the output file
        #[arg(value_name = "FILE[:RANGE]... OUTPUT")]
        args: Vec<String>,
    },

    /// Concatenate selected pages of one or more files
    ///
    /// The last argument is the output file.
    ///
    /// Example:
    ///   stapler sel a.pdf:1-3 b.pdf c.pdf:7-r90 out.pdf
    #[command(name = "sel", visible_aliases = ["cat", "select"])]
    Select {
        /// Input files with optional ranges, then the output file
        #[arg(value_name = "FILE[:RANGE]... OUTPUT")]
        args: Vec<String>,
    },

    /// Concatenate files without the selected pages
    ///
    /// The last argument is the output file.
    ///
    /// Example:
    ///   stapler del scan.pdf:1,5-7 cleaned.pdf
    #[command(name = "del", visible_alias = "delete")]
    Delete {
        /// Input files with optional ranges, then the output file
        #[arg(value_name = "FILE[:RANGE]... OUTPUT")]
        args: Vec<String>,
    },

    /// Write every page of the input files to a file of its own
    ///
    /// Output files are named <name>_<page>.pdf, page numbers zero-padded
    /// to the width of the page count.
    #[command(visible_alias = "burst")]
    Split {
        /// Input files or glob patterns
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },

    /// Show the metadata of PDF files
    Info {
        /// Input files or glob patterns
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },
}

impl Cli {
    /// Convert the global options into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns [`StaplerError::InvalidConfig`] if the compression level is
    /// unknown or the configuration does not validate.
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else {
            OverwriteMode::NoClobber
        };

        let config = Config {
            destdir: self.destdir.clone(),
            overwrite_mode,
            compression,
            verbose: self.verbose,
            quiet: self.quiet,
            dry_run: self.dry_run,
        };

        config.validate().map_err(|e| {
            StaplerError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Build the library command from the parsed arguments.
    ///
    /// For zip, sel and del the last argument is the output file; missing
    /// inputs are reported when the command runs.
    pub fn to_command(&self) -> Command {
        match &self.command {
            Commands::Zip { args } => {
                let (inputs, output) = split_output(args);
                Command::Zip { inputs, output }
            }
            Commands::Select { args } => {
                let (inputs, output) = split_output(args);
                Command::Select { inputs, output }
            }
            Commands::Delete { args } => {
                let (inputs, output) = split_output(args);
                Command::Delete { inputs, output }
            }
            Commands::Split { files } => Command::Split {
                patterns: files.clone(),
            },
            Commands::Info { files } => Command::Info {
                patterns: files.clone(),
            },
        }
    }
}

/// Separate `file[:range]` inputs from the trailing output name.
fn split_output(args: &[String]) -> (Vec<InputToken>, PathBuf) {
    match args.split_last() {
        Some((output, inputs)) => (
            inputs.iter().map(|arg| InputToken::parse(arg)).collect(),
            PathBuf::from(output),
        ),
        None => (Vec::new(), PathBuf::new()),
    }
}
