//! Building output documents from selection plans.
//!
//! Every source document used by a plan is cloned once and its objects are
//! renumbered past everything already allocated, so objects of different
//! sources never collide. Pages are then emitted in plan order under a new
//! flat page tree. Only objects reachable from an emitted page are copied
//! into the output.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::error::{Result, StaplerError};
use crate::io::DocumentStore;
use crate::plan::{PlannedPage, SelectionPlan};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A source document prepared for copying.
struct ImportedSource {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

/// Assembles new documents out of pages of loaded ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageAssembler;

impl PageAssembler {
    /// Create a new page assembler.
    pub fn new() -> Self {
        Self
    }

    /// Build a document holding exactly the pages of `plan`, in order.
    ///
    /// Sources must already be loaded into `store`. The same source page
    /// may appear any number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The plan is empty
    /// - A source was not loaded or lacks a planned page
    /// - A page object is not a dictionary
    pub fn assemble(&self, store: &DocumentStore, plan: &SelectionPlan) -> Result<Document> {
        if plan.is_empty() {
            return Err(StaplerError::assembly_failed("no pages to assemble"));
        }

        let sources = plan.sources();
        let version = store.document(sources[0])?.version.clone();

        let mut output = Document::with_version(version);
        let catalog_id = output.new_object_id();
        let pages_id = output.new_object_id();

        let mut imported: HashMap<&Path, ImportedSource> = HashMap::new();
        for path in sources {
            let mut document = store.document(path)?.clone();
            document.renumber_objects_with(output.max_id + 1);
            output.max_id = document.max_id;

            let pages = document.get_pages();
            imported.insert(path, ImportedSource { document, pages });
        }

        let mut emitted: HashSet<ObjectId> = HashSet::new();
        let mut kids: Vec<Object> = Vec::with_capacity(plan.len());

        for planned in plan {
            let source = imported.get(planned.source.as_path()).ok_or_else(|| {
                StaplerError::assembly_failed(format!(
                    "{} was not imported",
                    planned.source.display()
                ))
            })?;

            let page_id = self.emit_page(&mut output, source, planned, pages_id, &mut emitted)?;
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        output.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        output.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_id,
            }),
        );
        output.trailer.set("Root", catalog_id);

        output.prune_objects();

        Ok(output)
    }

    /// Copy one planned page into `output` and return its new id.
    ///
    /// The first use of a source page keeps its (renumbered) id so that
    /// references back to it, such as annotation `/P` entries, stay valid.
    /// Repeated uses get fresh ids.
    fn emit_page(
        &self,
        output: &mut Document,
        source: &ImportedSource,
        planned: &PlannedPage,
        pages_id: ObjectId,
        emitted: &mut HashSet<ObjectId>,
    ) -> Result<ObjectId> {
        let page_number = u32::try_from(planned.page).unwrap_or(u32::MAX);
        let source_id = *source.pages.get(&page_number).ok_or_else(|| {
            StaplerError::page_out_of_range(
                planned.source.clone(),
                planned.page,
                source.pages.len(),
            )
        })?;

        let mut page = materialize_page(&source.document, source_id)?;

        let current = page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0);
        let rotate = (current + i64::from(planned.rotation.as_degrees())).rem_euclid(360);
        if rotate != 0 || page.has(b"Rotate") {
            page.set("Rotate", rotate);
        }
        page.set("Parent", pages_id);

        let page_id = if emitted.insert(source_id) {
            source_id
        } else {
            output.new_object_id()
        };

        let page = Object::Dictionary(page);
        output.objects.insert(page_id, page.clone());
        copy_references(output, &source.document, &page);

        Ok(page_id)
    }
}

/// Clone a page dictionary with inherited attributes made explicit and
/// without its `Parent` link.
fn materialize_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|e| StaplerError::assembly_failed(format!("Failed to get page: {e}")))?
        .clone();

    let mut visited = HashSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(node_id) = parent {
        if !visited.insert(node_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        for key in INHERITABLE {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key, value.clone());
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    page.remove(b"Parent");
    Ok(page)
}

/// Copy every object reachable from `obj` in `source` into `target`.
///
/// Objects already present in `target` are left alone, which also stops
/// the walk at pages that were emitted before.
fn copy_references(target: &mut Document, source: &Document, obj: &Object) {
    match obj {
        Object::Reference(ref_id) => {
            if !target.objects.contains_key(ref_id)
                && let Ok(referenced) = source.get_object(*ref_id)
            {
                target.objects.insert(*ref_id, referenced.clone());
                copy_references(target, source, referenced);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                copy_references(target, source, value);
            }
        }
        Object::Array(items) => {
            for item in items {
                copy_references(target, source, item);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                copy_references(target, source, value);
            }
        }
        _ => {}
    }
}
