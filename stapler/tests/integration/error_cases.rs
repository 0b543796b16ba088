//! Integration tests for error handling and edge cases.

use rstest::rstest;
use stapler::commands::{Command, run};
use stapler::error::StaplerError;
use stapler::range::InputToken;
use std::path::PathBuf;

use crate::common::{Workspace, quiet};

fn select(inputs: &[String], output: &str) -> Command {
    Command::Select {
        inputs: inputs.iter().map(|arg| InputToken::parse(arg)).collect(),
        output: PathBuf::from(output),
    }
}

#[rstest]
#[case("0")]
#[case("abc")]
#[case("1r45")]
#[case("1,,2")]
#[case("-3")]
#[case("2-x")]
fn test_invalid_range_syntax(#[case] range: &str) {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 3);

    let err = run(&select(&[format!("{doc}:{range}")], "out.pdf"), &ws.config(), &quiet())
        .unwrap_err();

    assert!(
        matches!(err.root_cause(), StaplerError::InvalidRangeSyntax { .. }),
        "unexpected error for {range:?}: {err}"
    );
    assert!(!ws.join("out.pdf").exists());
}

#[test]
fn test_page_out_of_range_names_file() {
    let ws = Workspace::new();
    let doc = ws.pdf("short.pdf", 3);

    let err = run(&select(&[format!("{doc}:10")], "out.pdf"), &ws.config(), &quiet())
        .unwrap_err();

    match err.root_cause() {
        StaplerError::PageOutOfRange {
            path,
            page,
            page_count,
        } => {
            assert_eq!(path, &PathBuf::from(&doc));
            assert_eq!(*page, 10);
            assert_eq!(*page_count, 3);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_open_range_past_the_end() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 3);

    let err = run(&select(&[format!("{doc}:5-")], "out.pdf"), &ws.config(), &quiet())
        .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        StaplerError::PageOutOfRange { page: 5, .. }
    ));
}

#[test]
fn test_second_input_failure_writes_nothing() {
    let ws = Workspace::new();
    let good = ws.pdf("good.pdf", 2);
    let missing = ws.join("missing.pdf").display().to_string();

    let err = run(&select(&[good, missing], "out.pdf"), &ws.config(), &quiet()).unwrap_err();

    assert!(matches!(err.root_cause(), StaplerError::FileNotFound { .. }));
    assert!(!ws.join("out.pdf").exists());
}

#[test]
fn test_directory_input() {
    let ws = Workspace::new();
    std::fs::create_dir(ws.join("dir.pdf")).unwrap();
    let dir = ws.join("dir.pdf").display().to_string();

    let err = run(&select(&[dir], "out.pdf"), &ws.config(), &quiet()).unwrap_err();

    assert!(matches!(err.root_cause(), StaplerError::NotAFile { .. }));
}

#[test]
fn test_corrupt_input() {
    let ws = Workspace::new();
    std::fs::write(ws.join("broken.pdf"), b"%PDF-1.4\ngarbage").unwrap();
    let broken = ws.join("broken.pdf").display().to_string();

    let err = run(&select(&[broken], "out.pdf"), &ws.config(), &quiet()).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        StaplerError::FailedToLoadPdf { .. }
    ));
}

#[test]
fn test_missing_output_is_missing_input() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 1);

    let command = Command::Select {
        inputs: vec![InputToken::parse(&doc)],
        output: PathBuf::new(),
    };
    let err = run(&command, &ws.config(), &quiet()).unwrap_err();

    assert!(matches!(err, StaplerError::MissingInput { .. }));
    assert_eq!(
        err.to_string(),
        "Both input and output filenames are required."
    );
}

#[test]
fn test_command_failure_message_names_command() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 1);
    let missing = ws.join("nope.pdf").display().to_string();

    let command = Command::Zip {
        inputs: vec![InputToken::parse(&a), InputToken::parse(&missing)],
        output: PathBuf::from("out.pdf"),
    };
    let err = run(&command, &ws.config(), &quiet()).unwrap_err();

    assert!(err.to_string().starts_with("zip failed: File not found"));
    assert_eq!(err.exit_code(), 2);
}
