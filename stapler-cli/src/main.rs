//! stapler - Select, interleave, delete and split pages of PDF documents.

mod cli;

use clap::Parser;
use std::process;

use crate::cli::Cli;
use stapler::commands::{self, Outcome, PlannedOutput, WrittenFile};
use stapler::error::StaplerError;
use stapler::output::{OutputFormatter, display_plan};
use stapler::utils::format_file_size;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
fn run(cli: Cli) -> Result<(), StaplerError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);
    let command = cli.to_command();

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", stapler::NAME, stapler::VERSION));
        formatter.blank_line();
    }

    let outcome = commands::run(&command, &config, &formatter)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| StaplerError::other(format!("Failed to serialize result: {e}")))?;
        formatter.output(&json);
        return Ok(());
    }

    report(&outcome, &formatter);
    Ok(())
}

/// Print a command's outcome for humans.
fn report(outcome: &Outcome, formatter: &OutputFormatter) {
    match outcome {
        Outcome::Info(documents) => {
            for info in documents {
                formatter.output(&info.render());
            }
        }
        Outcome::Planned(outputs) => {
            for output in outputs {
                formatter.info(&planned_header(output));
                display_plan(formatter, &output.plan);
            }
            formatter.blank_line();
            formatter.success("Dry run completed successfully");
            formatter.info("  Run without --dry-run to write the output");
        }
        Outcome::Written(files) => {
            formatter.success(&written_summary(files));
            if files.len() > 1 {
                for file in files {
                    formatter.detail("File", &file.path.display().to_string());
                }
            }
        }
    }
}

fn planned_header(output: &PlannedOutput) -> String {
    format!(
        "Would write {} ({} page(s))",
        output.path.display(),
        output.plan.len()
    )
}

/// One line for the files a command wrote.
fn written_summary(files: &[WrittenFile]) -> String {
    match files {
        [file] => format!(
            "Created {} ({} page(s), {})",
            file.path.display(),
            file.pages,
            format_file_size(file.size)
        ),
        files => {
            let total: u64 = files.iter().map(|f| f.size).sum();
            format!(
                "Created {} file(s) ({})",
                files.len(),
                format_file_size(total)
            )
        }
    }
}
