//! Integration tests for zip and sel.

use stapler::commands::{Command, Outcome, run};
use stapler::range::InputToken;
use std::path::PathBuf;

use crate::common::{Workspace, load, page_markers, page_rotations, quiet};

fn tokens(args: &[&str]) -> Vec<InputToken> {
    args.iter().map(|arg| InputToken::parse(arg)).collect()
}

#[test]
fn test_zip_odd_and_reversed_even_pages() {
    let ws = Workspace::new();
    let odd = ws.pdf("odd.pdf", 3);
    let even = ws.pdf("even.pdf", 3);

    let command = Command::Zip {
        inputs: tokens(&[&odd, &format!("{even}:3-1")]),
        output: PathBuf::from("book.pdf"),
    };
    run(&command, &ws.config(), &quiet()).unwrap();

    let doc = load(ws.join("book.pdf"));
    assert_eq!(
        page_markers(&doc),
        vec!["odd-1", "even-3", "odd-2", "even-2", "odd-3", "even-1"]
    );
}

#[test]
fn test_zip_uneven_inputs_appends_remainder() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 1);
    let b = ws.pdf("b.pdf", 4);
    let c = ws.pdf("c.pdf", 2);

    let command = Command::Zip {
        inputs: tokens(&[&a, &b, &c]),
        output: PathBuf::from("zipped.pdf"),
    };
    run(&command, &ws.config(), &quiet()).unwrap();

    let doc = load(ws.join("zipped.pdf"));
    assert_eq!(
        page_markers(&doc),
        vec!["a-1", "b-1", "c-1", "b-2", "c-2", "b-3", "b-4"]
    );
}

#[test]
fn test_select_open_ended_and_descending() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 6);

    let command = Command::Select {
        inputs: tokens(&[&format!("{doc}:5-,3-1")]),
        output: PathBuf::from("out.pdf"),
    };
    let outcome = run(&command, &ws.config(), &quiet()).unwrap();

    match outcome {
        Outcome::Written(files) => assert_eq!(files[0].pages, 5),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(
        page_markers(&load(ws.join("out.pdf"))),
        vec!["doc-5", "doc-6", "doc-3", "doc-2", "doc-1"]
    );
}

#[test]
fn test_select_rotation_suffixes() {
    let ws = Workspace::new();
    let doc = ws.pdf("rot.pdf", 4);

    let command = Command::Select {
        inputs: tokens(&[&format!("{doc}:1r90,2D,3L,4R")]),
        output: PathBuf::from("rotated.pdf"),
    };
    run(&command, &ws.config(), &quiet()).unwrap();

    let out = load(ws.join("rotated.pdf"));
    assert_eq!(page_rotations(&out), vec![90, 180, 270, 90]);
}

#[test]
fn test_select_from_several_files_keeps_input_order() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", 2);
    let b = ws.pdf("b.pdf", 2);

    let command = Command::Select {
        inputs: tokens(&[&format!("{b}:2"), &a, &format!("{b}:1")]),
        output: PathBuf::from("mixed.pdf"),
    };
    run(&command, &ws.config(), &quiet()).unwrap();

    assert_eq!(
        page_markers(&load(ws.join("mixed.pdf"))),
        vec!["b-2", "a-1", "a-2", "b-1"]
    );
}

#[test]
fn test_select_repeated_page() {
    let ws = Workspace::new();
    let doc = ws.pdf("dup.pdf", 2);

    let command = Command::Select {
        inputs: tokens(&[&format!("{doc}:1,1r180,1")]),
        output: PathBuf::from("dups.pdf"),
    };
    run(&command, &ws.config(), &quiet()).unwrap();

    let out = load(ws.join("dups.pdf"));
    assert_eq!(page_markers(&out), vec!["dup-1", "dup-1", "dup-1"]);
    assert_eq!(page_rotations(&out), vec![0, 180, 0]);
}

#[test]
fn test_select_materializes_inherited_attributes() {
    let ws = Workspace::new();
    let doc = ws.nested_pdf("tree.pdf", 4, 2);

    let command = Command::Select {
        inputs: tokens(&[&format!("{doc}:4,1,3r90")]),
        output: PathBuf::from("flat.pdf"),
    };
    run(&command, &ws.config(), &quiet()).unwrap();

    let out = load(ws.join("flat.pdf"));
    assert_eq!(page_markers(&out), vec!["tree-4", "tree-1", "tree-3"]);
    assert_eq!(page_rotations(&out), vec![90, 0, 180]);

    for id in out.get_pages().into_values() {
        let page = out.get_dictionary(id).unwrap();
        assert!(page.has(b"MediaBox"), "page lost its inherited MediaBox");
    }
}

#[test]
fn test_select_with_relative_destdir_output() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 1);
    std::fs::create_dir(ws.join("out")).unwrap();

    let config = stapler::Config::with_destdir(ws.join("out"));
    let command = Command::Select {
        inputs: tokens(&[&doc]),
        output: PathBuf::from("copy.pdf"),
    };
    run(&command, &config, &quiet()).unwrap();

    assert!(ws.join("out").join("copy.pdf").exists());
    assert!(!ws.join("copy.pdf").exists());
}
