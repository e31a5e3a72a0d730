//! Document Registry: the documents the backend knows about.

use crate::layout::global_context::AppContext;
use crate::shared::api::{ApiError, NexusApi};
use contracts::domain::a001_document::aggregate::{Document, DocumentId};
use leptos::prelude::*;
use std::collections::HashSet;

/// Ordered list of documents with unique ids.
///
/// Only ever replaced as a whole; the client never edits single entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
}

impl DocumentRegistry {
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut registry = Self::default();
        registry.replace(documents);
        registry
    }

    /// Replaces the contents. A repeated id keeps its first occurrence.
    pub fn replace(&mut self, documents: Vec<Document>) {
        let mut seen = HashSet::with_capacity(documents.len());
        self.documents = documents
            .into_iter()
            .filter(|doc| seen.insert(doc.id.clone()))
            .collect();
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| &doc.id == id)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.get(id).is_some()
    }
}

impl AppContext {
    /// Reloads the registry from `GET /files`.
    ///
    /// On failure the current registry stays as it is and the error goes
    /// back to the caller. On success, active ids that vanished from the
    /// registry are dropped from the active set.
    ///
    /// Refreshes may overlap. Only the most recently issued one updates the
    /// registry; an older one that resolves later returns its list without
    /// applying it.
    pub async fn refresh_documents<A>(&self, api: &A) -> Result<Vec<Document>, ApiError>
    where
        A: NexusApi + ?Sized,
    {
        let ticket = self
            .refresh_issued
            .try_update_value(|issued| {
                *issued += 1;
                *issued
            })
            .unwrap_or_default();

        let documents = match api.list_documents().await {
            Ok(documents) => documents,
            Err(e) => {
                log::error!("Error fetching files: {}", e);
                return Err(e);
            }
        };

        let registry = DocumentRegistry::from_documents(documents);
        let documents = registry.documents().to_vec();
        if self.refresh_issued.try_get_value() != Some(ticket) {
            log::debug!("Registry refresh #{} superseded, result dropped", ticket);
            return Ok(documents);
        }

        let pruned = self
            .active_sources
            .try_update(|active| active.retain_known(&registry))
            .unwrap_or_default();
        if !pruned.is_empty() {
            log::debug!("Deactivated {} missing source(s): {:?}", pruned.len(), pruned);
        }

        log::debug!("Registry refreshed: {} document(s)", documents.len());
        self.registry.set(registry);
        Ok(documents)
    }
}
