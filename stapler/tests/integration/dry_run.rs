//! Integration tests for dry-run mode.

use stapler::commands::{Command, Outcome, run};
use stapler::config::Config;
use stapler::range::InputToken;
use std::path::PathBuf;

use crate::common::{Workspace, quiet};

fn dry(ws: &Workspace) -> Config {
    Config {
        dry_run: true,
        ..ws.config()
    }
}

#[test]
fn test_dry_run_zip_reports_plan() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 2);
    let b = ws.pdf("b.pdf", 1);

    let command = Command::Zip {
        inputs: vec![InputToken::parse(&a), InputToken::parse(&format!("{b}:1L"))],
        output: PathBuf::from("out.pdf"),
    };
    let outcome = run(&command, &dry(&ws), &quiet()).unwrap();

    let Outcome::Planned(outputs) = outcome else {
        panic!("dry run wrote files");
    };
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].path, ws.join("out.pdf"));

    let pages: Vec<(String, usize, u16)> = outputs[0]
        .plan
        .iter()
        .map(|p| {
            (
                p.source.file_name().unwrap().to_string_lossy().into_owned(),
                p.page,
                p.rotation.as_degrees(),
            )
        })
        .collect();
    assert_eq!(
        pages,
        vec![
            ("a.pdf".to_string(), 1, 0),
            ("b.pdf".to_string(), 1, 270),
            ("a.pdf".to_string(), 2, 0),
        ]
    );
    assert!(!ws.join("out.pdf").exists());
}

#[test]
fn test_dry_run_split_lists_every_output() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 3);

    let outcome = run(&Command::Split { patterns: vec![doc] }, &dry(&ws), &quiet()).unwrap();

    let Outcome::Planned(outputs) = outcome else {
        panic!("dry run wrote files");
    };
    let names: Vec<PathBuf> = outputs.iter().map(|o| o.path.clone()).collect();
    assert_eq!(
        names,
        vec![ws.join("doc_1.pdf"), ws.join("doc_2.pdf"), ws.join("doc_3.pdf")]
    );
    assert!(names.iter().all(|path| !path.exists()));
}

#[test]
fn test_dry_run_still_validates_ranges() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 2);

    let command = Command::Select {
        inputs: vec![InputToken::parse(&format!("{doc}:3"))],
        output: PathBuf::from("out.pdf"),
    };

    assert!(run(&command, &dry(&ws), &quiet()).is_err());
}

#[test]
fn test_dry_run_plan_as_json() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 2);

    let command = Command::Select {
        inputs: vec![InputToken::parse(&format!("{doc}:2r90"))],
        output: PathBuf::from("out.pdf"),
    };
    let outcome = run(&command, &dry(&ws), &quiet()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["kind"], "planned");
    assert_eq!(json["items"][0]["plan"][0]["page"], 2);
    assert_eq!(json["items"][0]["plan"][0]["rotation"], 90);
    assert_eq!(json["items"][0]["plan"][0]["source"], doc);
}
