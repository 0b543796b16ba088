//! The commands stapler understands.
//!
//! Each command resolves its inputs, composes a plan, assembles the output
//! documents and writes them. Nothing is written before every plan of the
//! invocation has been built. Failures below the command layer come back
//! wrapped in [`StaplerError::CommandFailed`] naming the command.
//!
//! # Examples
//!
//! ```no_run
//! use stapler::commands::{Command, run};
//! use stapler::config::Config;
//! use stapler::output::OutputFormatter;
//! use stapler::range::InputToken;
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let command = Command::Zip {
//!     inputs: vec![InputToken::parse("odd.pdf"), InputToken::parse("even.pdf:5-1")],
//!     output: PathBuf::from("book.pdf"),
//! };
//! let config = Config::default();
//! let outcome = run(&command, &config, &OutputFormatter::from_config(&config))?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::document::{DocumentInfo, PageAssembler};
use crate::error::{Result, StaplerError};
use crate::io::{DocumentStore, PdfReader, PdfWriter, check_overwrite, resolve_output_path};
use crate::output::{OutputFormatter, describe_page};
use crate::plan::{self, SelectionPlan, Strategy};
use crate::range::{InputSpec, InputToken, resolve, resolve_whole};
use crate::utils::{collect_paths_for_patterns, format_duration};

/// A fully parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interleave the selected pages of two or more inputs.
    Zip {
        /// `file[:range]` inputs in order.
        inputs: Vec<InputToken>,
        /// Output file, relative to the destination directory unless absolute.
        output: PathBuf,
    },
    /// Concatenate the selected pages of the inputs.
    Select {
        /// `file[:range]` inputs in order.
        inputs: Vec<InputToken>,
        /// Output file.
        output: PathBuf,
    },
    /// Concatenate the inputs without the selected pages.
    Delete {
        /// `file[:range]` inputs in order.
        inputs: Vec<InputToken>,
        /// Output file.
        output: PathBuf,
    },
    /// Write every page of the inputs to its own file.
    Split {
        /// Input files or glob patterns.
        patterns: Vec<String>,
    },
    /// Read the metadata of the inputs.
    Info {
        /// Input files or glob patterns.
        patterns: Vec<String>,
    },
}

impl Command {
    /// Name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zip { .. } => "zip",
            Self::Select { .. } => "sel",
            Self::Delete { .. } => "del",
            Self::Split { .. } => "split",
            Self::Info { .. } => "info",
        }
    }
}

/// A file a command wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Where it was written.
    pub path: PathBuf,
    /// Number of pages it holds.
    pub pages: usize,
    /// Size in bytes.
    pub size: u64,
}

/// A file a dry run would have written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOutput {
    /// Where it would be written.
    pub path: PathBuf,
    /// Pages it would hold.
    pub plan: SelectionPlan,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Outcome {
    /// Files were written.
    Written(Vec<WrittenFile>),
    /// Dry run: files that would have been written.
    Planned(Vec<PlannedOutput>),
    /// Metadata of each input.
    Info(Vec<DocumentInfo>),
}

/// Run `command`.
///
/// # Errors
///
/// Returns [`StaplerError::MissingInput`] when the command lacks inputs or
/// an output, and [`StaplerError::CommandFailed`] for everything else.
pub fn run(command: &Command, config: &Config, formatter: &OutputFormatter) -> Result<Outcome> {
    let name = command.name();
    let result = match command {
        Command::Zip { inputs, output } => {
            if inputs.len() < 2 {
                return Err(StaplerError::missing_input(
                    "zip needs at least two input files and an output filename.",
                ));
            }
            compose_into(Strategy::Zip, inputs, output, config, formatter)
        }
        Command::Select { inputs, output } => {
            require_inputs(inputs, output)?;
            compose_into(Strategy::Select, inputs, output, config, formatter)
        }
        Command::Delete { inputs, output } => {
            require_inputs(inputs, output)?;
            compose_into(Strategy::Delete, inputs, output, config, formatter)
        }
        Command::Split { patterns } => {
            require_patterns(patterns)?;
            split(patterns, config, formatter)
        }
        Command::Info { patterns } => {
            require_patterns(patterns)?;
            info(patterns)
        }
    };

    result.map_err(|err| StaplerError::command_failed(name, err))
}

fn require_inputs(inputs: &[InputToken], output: &Path) -> Result<()> {
    if inputs.is_empty() || output.as_os_str().is_empty() {
        return Err(StaplerError::missing_input(
            "Both input and output filenames are required.",
        ));
    }
    Ok(())
}

fn require_patterns(patterns: &[String]) -> Result<()> {
    if patterns.is_empty() {
        return Err(StaplerError::missing_input("No input files specified."));
    }
    Ok(())
}

/// zip, sel and del: one output built from all inputs.
fn compose_into(
    strategy: Strategy,
    inputs: &[InputToken],
    output: &Path,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<Outcome> {
    let output_path = resolve_output_path(config.destdir(), output);
    let writer = PdfWriter::from_config(config);
    check_overwrite(&output_path, config.overwrite_mode)?;
    writer.can_write(&output_path)?;

    let mut store = DocumentStore::new();
    let specs = resolve(inputs, &mut store)?;
    let plan = plan::compose(strategy, &specs)?;

    if formatter.is_verbose() {
        report_inputs(strategy, &specs, &store, formatter)?;
    }

    if plan.is_empty() {
        return Err(StaplerError::EmptySelection { path: output_path });
    }

    if config.dry_run {
        return Ok(Outcome::Planned(vec![PlannedOutput {
            path: output_path,
            plan,
        }]));
    }

    let mut document = PageAssembler::new().assemble(&store, &plan)?;
    let stats = writer.save(&mut document, &output_path)?;
    formatter.detail("Write time", &format_duration(stats.write_time));

    Ok(Outcome::Written(vec![WrittenFile {
        path: output_path,
        pages: plan.len(),
        size: stats.file_size,
    }]))
}

/// Verbose report: each input followed by the pages taken from it.
fn report_inputs(
    strategy: Strategy,
    specs: &[InputSpec],
    store: &DocumentStore,
    formatter: &OutputFormatter,
) -> Result<()> {
    for spec in specs {
        match store.get(spec.path()) {
            Some(loaded) => formatter.debug(&loaded.summary()),
            None => formatter.debug(&spec.path().display().to_string()),
        }
        for page in &plan::compose(strategy, std::slice::from_ref(spec))? {
            formatter.detail("page", &describe_page(page));
        }
    }
    Ok(())
}

fn split(patterns: &[String], config: &Config, formatter: &OutputFormatter) -> Result<Outcome> {
    let files = collect_paths_for_patterns(patterns)?;

    let mut store = DocumentStore::new();
    let specs = resolve_whole(&files, &mut store)?;

    let writer = PdfWriter::from_config(config);
    let mut seen = HashSet::new();
    let mut planned = Vec::new();
    for output in plan::split(&specs) {
        let path = resolve_output_path(config.destdir(), Path::new(&output.file_name));
        if !seen.insert(path.clone()) {
            return Err(StaplerError::other(format!(
                "Two inputs would both be split into {}",
                path.display()
            )));
        }
        check_overwrite(&path, config.overwrite_mode)?;
        writer.can_write(&path)?;
        planned.push(PlannedOutput {
            path,
            plan: output.plan,
        });
    }

    if config.dry_run {
        return Ok(Outcome::Planned(planned));
    }

    let assembler = PageAssembler::new();
    let documents = planned
        .iter()
        .map(|output| assembler.assemble(&store, &output.plan))
        .collect::<Result<Vec<_>>>()?;

    let mut written: Vec<WrittenFile> = Vec::with_capacity(planned.len());
    for (output, mut document) in planned.iter().zip(documents) {
        match writer.save(&mut document, &output.path) {
            Ok(stats) => {
                formatter.debug(&format!(
                    "{} (written in {})",
                    output.path.display(),
                    format_duration(stats.write_time)
                ));
                written.push(WrittenFile {
                    path: output.path.clone(),
                    pages: output.plan.len(),
                    size: stats.file_size,
                });
            }
            Err(err) => {
                for done in &written {
                    if let Err(cleanup) = writer.remove_if_exists(&done.path) {
                        formatter.warning(&format!(
                            "Could not remove {}: {cleanup}",
                            done.path.display()
                        ));
                    }
                }
                return Err(err);
            }
        }
    }

    formatter.debug(&format!(
        "{} page(s) in {} file(s) processed.",
        written.len(),
        specs.len()
    ));

    Ok(Outcome::Written(written))
}

fn info(patterns: &[String]) -> Result<Outcome> {
    let files = collect_paths_for_patterns(patterns)?;
    let mut store = DocumentStore::with_reader(PdfReader::without_verification());

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let loaded = store.load(path)?;
        documents.push(DocumentInfo::from_document(path, &loaded.document));
    }

    Ok(Outcome::Info(documents))
}
