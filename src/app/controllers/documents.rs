use tracing::{debug, info};

use crate::app::domain::{Document, DocumentId};

/// Ordered set of open documents plus the active-document reference.
///
/// After every structural mutation there is at least one document and the
/// active id resolves to one of them.
pub struct DocumentStore {
    documents: Vec<Document>,
    active_id: Option<DocumentId>,
    next_id: u64,
}

impl DocumentStore {
    /// An empty store. The first document is created by the controller.
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active_id: None,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a blank `untitled.txt` document and make it active.
    pub fn create_document(&mut self) -> DocumentId {
        let id = self.allocate_id();
        self.documents.push(Document::new_untitled(id));
        self.active_id = Some(id);
        debug!(id = id.0, "created document");
        id
    }

    /// Open imported text. A document with the same name is overwritten in
    /// place instead of duplicated. Either way it becomes active.
    pub fn import_document(&mut self, name: String, content: String) -> DocumentId {
        if let Some(doc) = self.documents.iter_mut().find(|d| d.name == name) {
            doc.reimport(content);
            let id = doc.id;
            self.active_id = Some(id);
            info!(id = id.0, %name, "re-imported document");
            return id;
        }

        let id = self.allocate_id();
        let doc = Document::new_imported(id, name, content);
        info!(id = id.0, name = %doc.name, language = doc.language.display_name(), "imported document");
        self.documents.push(doc);
        self.active_id = Some(id);
        id
    }

    /// Remove a document. Activates the first remaining one if it was
    /// active, creating a fresh document when none remain.
    pub fn close_document(&mut self, id: DocumentId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.documents.remove(idx);
        debug!(id = id.0, "closed document");

        if self.documents.is_empty() {
            self.create_document();
        } else if self.active_id == Some(id) {
            self.active_id = Some(self.documents[0].id);
        }
    }

    pub fn update_content(&mut self, id: DocumentId, content: &str) {
        if let Some(doc) = self.document_mut(id)
            && doc.content != content
        {
            doc.content.clear();
            doc.content.push_str(content);
        }
    }

    pub fn set_active(&mut self, id: DocumentId) {
        if self.index_of(id).is_some() {
            self.active_id = Some(id);
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active_id
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.document(self.active_id?)
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<DocumentId> {
        self.documents.iter().find(|d| d.name == name).map(|d| d.id)
    }

    pub fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    /// The document after the active one, wrapping around. `None` when there
    /// is nothing to cycle to.
    pub fn next_document_id(&self) -> Option<DocumentId> {
        if self.documents.len() <= 1 {
            return None;
        }
        let idx = self.index_of(self.active_id?)?;
        let next_idx = (idx + 1) % self.documents.len();
        Some(self.documents[next_idx].id)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
