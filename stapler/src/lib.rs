//! stapler - Select, interleave, delete and split pages of PDF documents.
//!
//! The library is organized in phases that stay independent of each other:
//!
//! - [`range`] parses page-range expressions (`"1-3,5r90,7-"`) and binds
//!   them to input files and their page counts
//! - [`plan`] composes resolved inputs into ordered page selections
//!   (zip, select, delete, split)
//! - [`document`] assembles selections into new PDF documents and reads
//!   document metadata
//! - [`io`] loads and writes PDF files
//! - [`commands`] ties the phases together behind the CLI commands
//!
//! # Examples
//!
//! ## Building a plan
//!
//! ```
//! use stapler::plan::{self, Strategy};
//! use stapler::range::{InputSpec, parse};
//!
//! # fn example() -> stapler::Result<()> {
//! let odd = InputSpec::new("odd.pdf", parse("")?, 3);
//! let even = InputSpec::new("even.pdf", parse("3-1")?, 3);
//!
//! let plan = plan::compose(Strategy::Zip, &[odd, even])?;
//! let pages: Vec<usize> = plan.iter().map(|p| p.page).collect();
//! assert_eq!(pages, vec![1, 3, 2, 2, 3, 1]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Running a command
//!
//! ```no_run
//! use stapler::commands::{Command, run};
//! use stapler::config::Config;
//! use stapler::output::OutputFormatter;
//! use stapler::range::InputToken;
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::with_destdir("out");
//! let command = Command::Delete {
//!     inputs: vec![InputToken::parse("scan.pdf:1,3")],
//!     output: PathBuf::from("trimmed.pdf"),
//! };
//!
//! run(&command, &config, &OutputFormatter::from_config(&config))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod output;
pub mod plan;
pub mod range;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, StaplerError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
