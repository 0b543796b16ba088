//! Integration tests for info.

use lopdf::{Object, dictionary};
use stapler::commands::{Command, Outcome, run};
use stapler::document::DocumentInfo;

use crate::common::{Workspace, quiet};

fn info(ws: &Workspace, patterns: Vec<String>) -> Vec<DocumentInfo> {
    match run(&Command::Info { patterns }, &ws.config(), &quiet()).unwrap() {
        Outcome::Info(documents) => documents,
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn test_info_renders_entries() {
    let ws = Workspace::new();
    let doc = ws.pdf_with_info(
        "meta.pdf",
        1,
        dictionary! {
            "Title" => Object::string_literal("Quarterly report"),
            "Author" => Object::string_literal("Finance"),
        },
    );

    let documents = info(&ws, vec![doc.clone()]);
    assert_eq!(documents.len(), 1);

    let rendered = documents[0].render();
    assert!(rendered.starts_with(&format!("*** Metadata for {doc}\n\n")));
    assert!(rendered.contains("    /Title:  Quarterly report\n"));
    assert!(rendered.contains("    /Author:  Finance\n"));
}

#[test]
fn test_info_decodes_utf16_titles() {
    let ws = Workspace::new();
    let mut title = vec![0xFE, 0xFF];
    for unit in "Größe".encode_utf16() {
        title.extend_from_slice(&unit.to_be_bytes());
    }
    let doc = ws.pdf_with_info(
        "utf16.pdf",
        1,
        dictionary! { "Title" => Object::String(title, lopdf::StringFormat::Hexadecimal) },
    );

    let documents = info(&ws, vec![doc]);
    assert_eq!(documents[0].entries[0].value, "Größe");
}

#[test]
fn test_info_without_metadata() {
    let ws = Workspace::new();
    let doc = ws.pdf("plain.pdf", 1);

    let documents = info(&ws, vec![doc]);
    assert!(documents[0].is_empty());
    assert!(documents[0].render().ends_with("    (No metadata found.)\n"));
}

#[test]
fn test_info_glob_lists_every_match() {
    let ws = Workspace::new();
    ws.pdf("b.pdf", 1);
    ws.pdf("a.pdf", 1);

    let documents = info(&ws, vec![format!("{}/*.pdf", ws.path().display())]);
    let names: Vec<_> = documents
        .iter()
        .map(|doc| doc.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf"]);
}

#[test]
fn test_info_json_shape() {
    let ws = Workspace::new();
    let doc = ws.pdf_with_info(
        "j.pdf",
        1,
        dictionary! { "Producer" => Object::string_literal("stapler") },
    );

    let outcome = run(&Command::Info { patterns: vec![doc] }, &ws.config(), &quiet()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["kind"], "info");
    assert_eq!(json["items"][0]["entries"][0]["key"], "/Producer");
    assert_eq!(json["items"][0]["entries"][0]["value"], "stapler");
}
