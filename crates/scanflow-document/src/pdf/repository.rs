// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF repository — open, inspect, extract page ranges from, and save PDF
// documents using the `lopdf` crate.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};
use scanflow_core::error::{Result, ScanflowError};
use scanflow_core::types::{PdfDocumentInfo, PdfMetadata};
use tracing::{debug, info, instrument, warn};

/// Page trees deeper than this are treated as malformed.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A loaded source document.
///
/// Wraps `lopdf::Document`. The document is released when the repository is
/// dropped.
pub struct PdfRepository {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<PathBuf>,
    /// Size of the serialised document in bytes.
    file_size: u64,
    /// Page object ids in document order.
    page_ids: Vec<ObjectId>,
    page_set: HashSet<ObjectId>,
}

impl PdfRepository {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(ScanflowError::FileNotFound(path_ref.to_path_buf()));
        }

        info!("Opening PDF: {}", path_ref.display());

        let file_size = std::fs::metadata(path_ref)?.len();
        let document = Document::load(path_ref).map_err(|err| ScanflowError::InvalidPdf {
            path: path_ref.to_path_buf(),
            reason: err.to_string(),
        })?;

        let repo = Self::new(document, Some(path_ref.to_path_buf()), file_size);
        debug!(pages = repo.page_count(), file_size, "PDF loaded");
        Ok(repo)
    }

    /// Create a repository from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| ScanflowError::InvalidPdf {
            path: PathBuf::from("<memory>"),
            reason: err.to_string(),
        })?;

        let repo = Self::new(document, None, data.len() as u64);
        debug!(pages = repo.page_count(), "PDF loaded from bytes");
        Ok(repo)
    }

    fn new(document: Document, source_path: Option<PathBuf>, file_size: u64) -> Self {
        let page_ids: Vec<ObjectId> = document.page_iter().collect();
        let page_set = page_ids.iter().copied().collect();
        Self {
            document,
            source_path,
            file_size,
            page_ids,
            page_set,
        }
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    /// Return the source path if the repository was created via [`PdfRepository::load`].
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Summary of the loaded document. In-memory documents have an empty
    /// path and name.
    pub fn info(&self) -> PdfDocumentInfo {
        let file_path = self.source_path.clone().unwrap_or_default();
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        PdfDocumentInfo {
            file_path,
            file_name,
            page_count: self.page_count(),
            file_size: self.file_size,
        }
    }

    /// Read the `/Info` dictionary. Missing entries are `None`.
    pub fn metadata(&self) -> PdfMetadata {
        let mut meta = PdfMetadata {
            version: self.document.version.clone(),
            ..PdfMetadata::default()
        };

        let Some(info) = self.info_dictionary() else {
            return meta;
        };

        let text = |key: &[u8]| info.get(key).ok().and_then(text_string);
        meta.title = text(b"Title");
        meta.author = text(b"Author");
        meta.subject = text(b"Subject");
        meta.keywords = text(b"Keywords");
        meta.creator = text(b"Creator");
        meta.producer = text(b"Producer");
        meta.creation_date = text(b"CreationDate");
        meta.mod_date = text(b"ModDate");
        meta
    }

    fn info_dictionary(&self) -> Option<&Dictionary> {
        match self.document.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.document.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    // -- Extraction -----------------------------------------------------------

    /// Copy pages `[start_idx..=end_idx]` (0-indexed) into a new document.
    ///
    /// Only objects reachable from the copied pages (and `/Info`) are carried
    /// over, each exactly once, so the cost follows the size of the part and
    /// not the size of the source. Indices are clamped to the document. If
    /// nothing is left after clamping the result has no pages.
    #[instrument(skip(self))]
    pub fn extract_pages(&self, start_idx: u32, end_idx: u32) -> Result<ExtractedPdf> {
        let total = self.page_count();
        let wanted: &[ObjectId] = if total == 0 || start_idx > end_idx.min(total - 1) {
            &[]
        } else {
            &self.page_ids[start_idx as usize..=end_idx.min(total - 1) as usize]
        };

        let mut copier = PartBuilder::new(&self.document, &self.page_set);
        for page_id in wanted {
            copier.reserve_page(*page_id);
        }
        for page_id in wanted {
            copier.copy_page(*page_id)?;
        }
        if let Ok(info) = self.document.trailer.get(b"Info") {
            let mut info = info.clone();
            copier.remap(&mut info);
            copier.target.trailer.set("Info", info);
        }
        let extracted = copier.finish();

        debug!(
            pages = extracted.page_count(),
            objects = extracted.document.objects.len(),
            "Pages extracted"
        );
        Ok(extracted)
    }
}

/// Builds a part document by copying pages and everything they reference from
/// a source document into a fresh one with a flat page tree.
struct PartBuilder<'a> {
    source: &'a Document,
    /// Every page of the source; references to pages that are not copied
    /// become `null`.
    source_pages: &'a HashSet<ObjectId>,
    target: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    /// Source id to target id for every object copied or scheduled.
    ids: HashMap<ObjectId, ObjectId>,
    pending: Vec<ObjectId>,
}

impl<'a> PartBuilder<'a> {
    fn new(source: &'a Document, source_pages: &'a HashSet<ObjectId>) -> Self {
        let mut target = Document::with_version(source.version.clone());
        let pages_id = target.new_object_id();
        Self {
            source,
            source_pages,
            target,
            pages_id,
            kids: Vec::new(),
            ids: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Assign a target id to a page before any copying, so that references
    /// between copied pages resolve to their copies.
    fn reserve_page(&mut self, page_id: ObjectId) {
        let new_id = self.target.new_object_id();
        self.ids.insert(page_id, new_id);
        self.kids.push(Object::Reference(new_id));
    }

    fn copy_page(&mut self, page_id: ObjectId) -> Result<()> {
        let mut page = self
            .source
            .get_dictionary(page_id)
            .map_err(|err| ScanflowError::Pdf(format!("cannot read page {page_id:?}: {err}")))?
            .clone();

        for key in INHERITABLE_KEYS {
            if !page.has(key) {
                if let Some(value) = inherited(self.source, page_id, key) {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }
        page.remove(b"Parent");

        let mut page = Object::Dictionary(page);
        self.remap(&mut page);
        if let Object::Dictionary(dict) = &mut page {
            dict.set("Parent", Object::Reference(self.pages_id));
        }

        let new_id = self.ids[&page_id];
        self.target.objects.insert(new_id, page);
        self.drain();
        Ok(())
    }

    /// Copy every object scheduled by [`PartBuilder::remap`].
    fn drain(&mut self) {
        while let Some(old_id) = self.pending.pop() {
            let new_id = self.ids[&old_id];
            let object = match self.source.get_object(old_id) {
                Ok(object) => {
                    let mut object = object.clone();
                    self.remap(&mut object);
                    object
                }
                Err(err) => {
                    warn!(?old_id, %err, "Cannot resolve reference, using null");
                    Object::Null
                }
            };
            self.target.objects.insert(new_id, object);
        }
    }

    /// Rewrite references inside `object` to target ids, scheduling objects
    /// that have not been seen yet.
    fn remap(&mut self, object: &mut Object) {
        if let Object::Reference(old_id) = *object {
            *object = match self.ids.get(&old_id).copied() {
                Some(new_id) => Object::Reference(new_id),
                None if self.source_pages.contains(&old_id) => Object::Null,
                None => {
                    let new_id = self.target.new_object_id();
                    self.ids.insert(old_id, new_id);
                    self.pending.push(old_id);
                    Object::Reference(new_id)
                }
            };
            return;
        }

        match object {
            Object::Array(items) => items.iter_mut().for_each(|item| self.remap(item)),
            Object::Dictionary(dict) => self.remap_dictionary(dict),
            Object::Stream(stream) => self.remap_dictionary(&mut stream.dict),
            _ => {}
        }
    }

    fn remap_dictionary(&mut self, dict: &mut Dictionary) {
        for (_, value) in dict.iter_mut() {
            self.remap(value);
        }
    }

    fn finish(mut self) -> ExtractedPdf {
        self.drain();
        let count = self.kids.len() as i64;
        self.target.objects.insert(
            self.pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Count", Object::Integer(count)),
                ("Kids", Object::Array(self.kids)),
            ])),
        );

        let catalog_id = self.target.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.target.trailer.set("Root", Object::Reference(catalog_id));

        ExtractedPdf {
            document: self.target,
        }
    }
}

/// Nearest ancestor value of an inheritable page attribute.
fn inherited<'d>(document: &'d Document, page_id: ObjectId, key: &[u8]) -> Option<&'d Object> {
    let mut node = document.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = document.get_dictionary(parent).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
    }
    None
}

/// A document produced by [`PdfRepository::extract_pages`], not yet on disk.
pub struct ExtractedPdf {
    document: Document,
}

impl ExtractedPdf {
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Serialise to bytes with compressed streams.
    pub fn to_bytes(mut self) -> Result<Vec<u8>> {
        self.document.compress();
        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            ScanflowError::Pdf(format!("failed to serialise extracted pages: {}", err))
        })?;
        Ok(output)
    }

    /// Write to `path`, creating the parent directory when it is missing.
    ///
    /// Returns the written path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| ScanflowError::Save {
                    path: path.to_path_buf(),
                    reason: format!("cannot create {}: {err}", parent.display()),
                })?;
            }
        }

        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(|err| ScanflowError::Save {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        info!(bytes = bytes.len(), "Wrote {}", path.display());
        Ok(path.to_path_buf())
    }
}

/// Decode a PDF text string (PDFDocEncoding or UTF-16/UTF-8 with BOM).
fn text_string(object: &Object) -> Option<String> {
    let text = lopdf::decode_text_string(object).ok()?;
    let trimmed = text.trim_end_matches('\0').trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
