//! Error types for stapler.
//!
//! Every failure a command can hit is a [`StaplerError`]. Range parsing and
//! page selection report their own kinds ([`StaplerError::InvalidRangeSyntax`],
//! [`StaplerError::PageOutOfRange`]); the command layer wraps whatever went
//! wrong underneath in [`StaplerError::CommandFailed`] so the CLI reports a
//! single uniform command error.
//!
//! # Error Categories
//!
//! - **Range Errors**: malformed expressions, pages outside a document
//! - **Input Errors**: missing inputs, unreadable or encrypted PDFs
//! - **Output Errors**: existing outputs, failed writes
//! - **Command Errors**: the wrapper carrying the command name

use std::io;
use std::path::PathBuf;

/// Result type alias for stapler operations.
pub type Result<T> = std::result::Result<T, StaplerError>;

/// Main error type for stapler operations.
#[derive(Debug, thiserror::Error)]
pub enum StaplerError {
    /// A range expression could not be parsed.
    #[error("Invalid range syntax '{expression}': {reason}")]
    InvalidRangeSyntax {
        /// The offending expression (or item of it).
        expression: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A page requested on the inclusive path does not exist.
    #[error("Page {page} not found in {}\n  Document has {page_count} page(s)", path.display())]
    PageOutOfRange {
        /// Document the page was requested from.
        path: PathBuf,
        /// Requested 1-based page number.
        page: usize,
        /// Number of pages the document has.
        page_count: usize,
    },

    /// A command was invoked without inputs or without an output.
    #[error("{message}")]
    MissingInput {
        /// Description of what is missing.
        message: String,
    },

    /// A command aborted; wraps the underlying cause.
    #[error("{command} failed: {source}")]
    CommandFailed {
        /// Name of the command that failed.
        command: String,
        /// Underlying error.
        #[source]
        source: Box<StaplerError>,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// A selection produced no pages, so there is nothing to write.
    #[error("No pages selected for {}", path.display())]
    EmptySelection {
        /// Output the selection was meant for.
        path: PathBuf,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Building the output page tree failed.
    #[error("Failed to assemble output document: {reason}")]
    AssemblyFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for StaplerError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for StaplerError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl StaplerError {
    /// Create an InvalidRangeSyntax error.
    pub fn invalid_range(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRangeSyntax {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create a PageOutOfRange error.
    pub fn page_out_of_range(path: PathBuf, page: usize, page_count: usize) -> Self {
        Self::PageOutOfRange {
            path,
            page,
            page_count,
        }
    }

    /// Create a MissingInput error.
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput {
            message: message.into(),
        }
    }

    /// Wrap `source` as the failure of `command`.
    ///
    /// Errors that are already command failures or missing-input errors are
    /// returned unchanged.
    pub fn command_failed(command: impl Into<String>, source: StaplerError) -> Self {
        match source {
            Self::CommandFailed { .. } | Self::MissingInput { .. } => source,
            source => Self::CommandFailed {
                command: command.into(),
                source: Box::new(source),
            },
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an AssemblyFailed error.
    pub fn assembly_failed(reason: impl Into<String>) -> Self {
        Self::AssemblyFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// The error underneath any [`StaplerError::CommandFailed`] wrapping.
    pub fn root_cause(&self) -> &StaplerError {
        match self {
            Self::CommandFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get the exit code for this error.
    ///
    /// A command failure exits with the code of the error it wraps.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidRangeSyntax { .. } => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::MissingInput { .. } => 1,
            Self::CommandFailed { source, .. } => source.exit_code(),
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::EmptySelection { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::AssemblyFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
