//! Document persistence seam
//!
//! The host owns its documents. The workflow only asks it to create new ones,
//! so the trait exposes creation and lookup and nothing that mutates.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{Document, DocumentDraft, DocumentId};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document and return it once the host acknowledged it.
    ///
    /// `DocumentDraft::Page` drafts are embedded in their parent journal.
    async fn create(&self, draft: DocumentDraft) -> AppResult<Document>;

    async fn get(&self, id: &DocumentId) -> AppResult<Option<Document>>;
}

/// Process-local store, used by tests and headless hosts.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing host document.
    pub async fn insert(&self, document: Document) {
        self.documents
            .write()
            .await
            .insert(document.id().clone(), document);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Pages embedded in `parent`.
    pub async fn pages_of(&self, parent: &DocumentId) -> Vec<Document> {
        self.documents
            .read()
            .await
            .values()
            .filter(|doc| matches!(doc, Document::JournalPage(page) if &page.parent == parent))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, draft: DocumentDraft) -> AppResult<Document> {
        let mut documents = self.documents.write().await;

        if let DocumentDraft::Page { parent, .. } = &draft {
            match documents.get(parent) {
                Some(Document::LegacyJournal(_)) => {}
                Some(other) => {
                    return Err(AppError::Store(format!(
                        "Cannot embed a page in {} '{}'",
                        other.kind(),
                        parent
                    )))
                }
                None => return Err(AppError::Store(format!("Parent journal '{}' not found", parent))),
            }
        }

        let id = DocumentId::generate();
        let document = draft.into_document(id.clone());
        documents.insert(id, document.clone());
        tracing::debug!(id = %document.id(), kind = document.kind(), "Created document");
        Ok(document)
    }

    async fn get(&self, id: &DocumentId) -> AppResult<Option<Document>> {
        Ok(self.documents.read().await.get(id).cloned())
    }
}
