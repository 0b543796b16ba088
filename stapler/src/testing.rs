//! PDF builders shared by unit tests.

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};

/// Key stamped on every generated page so tests can tell pages apart.
pub const MARKER_KEY: &[u8] = b"StaplerMarker";

/// Build a document with `pages` pages. Page `n` carries the marker
/// `"<label>-<n>"`.
pub fn create_multi_page_pdf(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for n in 1..=pages {
        let page_id = doc.new_object_id();
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "StaplerMarker" => Object::string_literal(format!("{label}-{n}")),
        };
        doc.objects.insert(page_id, page.into());
        page_ids.push(page_id);
    }

    let catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<Object>>(),
        "Count" => pages as i64,
    };

    doc.objects.insert(catalog_id, catalog.into());
    doc.objects.insert(pages_id, pages_dict.into());
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated document to `dir/name` and return its path. The file
/// stem is used as the page marker label.
pub fn write_test_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    let label = Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name);

    let mut doc = create_multi_page_pdf(label, pages);
    doc.save(&path).unwrap();
    path
}

/// Markers of a document's pages in page order.
pub fn page_markers(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            match page.get(MARKER_KEY).unwrap() {
                Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
                other => panic!("unexpected marker {other:?}"),
            }
        })
        .collect()
}

/// `/Rotate` of a document's pages in page order, 0 when absent.
pub fn page_rotations(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"Rotate")
                .and_then(Object::as_i64)
                .unwrap_or(0)
        })
        .collect()
}
