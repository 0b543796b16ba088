//! Integration tests for split.

use stapler::commands::{Command, Outcome, run};
use stapler::config::Config;
use stapler::error::StaplerError;

use crate::common::{Workspace, load, page_markers, page_rotations, quiet};

fn split(patterns: &[String]) -> Command {
    Command::Split {
        patterns: patterns.to_vec(),
    }
}

#[test]
fn test_split_twelve_pages_pads_to_two_digits() {
    let ws = Workspace::new();
    let doc = ws.pdf("report.pdf", 12);

    let outcome = run(&split(&[doc]), &ws.config(), &quiet()).unwrap();
    let Outcome::Written(files) = outcome else {
        panic!("split wrote nothing");
    };

    assert_eq!(files.len(), 12);
    for (index, file) in files.iter().enumerate() {
        let expected = ws.join(&format!("report_{:02}.pdf", index + 1));
        assert_eq!(file.path, expected);
        assert_eq!(file.pages, 1);
        assert_eq!(
            page_markers(&load(&file.path)),
            vec![format!("report-{}", index + 1)]
        );
    }
}

#[test]
fn test_split_single_page_uses_one_digit() {
    let ws = Workspace::new();
    let doc = ws.pdf("one.pdf", 1);

    run(&split(&[doc]), &ws.config(), &quiet()).unwrap();

    assert!(ws.join("one_1.pdf").exists());
}

#[test]
fn test_split_keeps_inherited_rotation() {
    let ws = Workspace::new();
    let doc = ws.nested_pdf("tree.pdf", 3, 1);

    run(&split(&[doc]), &ws.config(), &quiet()).unwrap();

    assert_eq!(page_rotations(&load(ws.join("tree_1.pdf"))), vec![0]);
    assert_eq!(page_rotations(&load(ws.join("tree_3.pdf"))), vec![90]);
}

#[test]
fn test_split_glob_into_destdir() {
    let ws = Workspace::new();
    ws.pdf("a.pdf", 2);
    ws.pdf("b.pdf", 1);
    std::fs::create_dir(ws.join("pages")).unwrap();

    let config = Config::with_destdir(ws.join("pages"));
    let pattern = format!("{}/*.pdf", ws.path().display());
    run(&split(&[pattern]), &config, &quiet()).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(ws.join("pages"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a_1.pdf", "a_2.pdf", "b_1.pdf"]);
}

#[test]
fn test_split_force_replaces_existing_pages() {
    let ws = Workspace::new();
    let doc = ws.pdf("doc.pdf", 2);
    std::fs::write(ws.join("doc_2.pdf"), b"stale").unwrap();

    let err = run(&split(&[doc.clone()]), &ws.config(), &quiet()).unwrap_err();
    assert!(matches!(err.root_cause(), StaplerError::OutputExists { .. }));
    assert!(!ws.join("doc_1.pdf").exists());

    run(&split(&[doc]), &ws.forced_config(), &quiet()).unwrap();
    assert_eq!(page_markers(&load(ws.join("doc_2.pdf"))), vec!["doc-2"]);
}

#[test]
fn test_split_bad_input_writes_nothing() {
    let ws = Workspace::new();
    let good = ws.pdf("good.pdf", 2);
    std::fs::write(ws.join("bad.pdf"), b"not a pdf").unwrap();
    let bad = ws.join("bad.pdf").display().to_string();

    let err = run(&split(&[good, bad]), &ws.config(), &quiet()).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        StaplerError::FailedToLoadPdf { .. }
    ));
    assert_eq!(err.exit_code(), 3);
    assert!(!ws.join("good_1.pdf").exists());
}
