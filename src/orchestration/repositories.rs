//! External collaborators consulted by the orchestrator.
//!
//! The core never owns document or artifact storage; it resolves references
//! and requests artifact creation through these traits. The in-memory
//! implementations back tests and single-process embedders.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::error::OperationsResult;
use crate::models::identifiers::new_artifact_id;
use crate::models::{ArtifactRecord, Document};

/// Resolves an opaque document reference to its raw content
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// `Ok(None)` means the reference does not exist
    async fn resolve(&self, reference: &str) -> OperationsResult<Option<String>>;
}

/// Persists artifact records and hands back their ids
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    async fn create(&self, record: ArtifactRecord) -> OperationsResult<String>;
}

#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: DashMap<String, String>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw content under a reference, replacing any previous content
    pub fn insert(&self, reference: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(reference.into(), content.into());
    }

    /// Register a document under its own id as tagged JSON, returning the id
    pub fn insert_document(&self, document: &Document) -> OperationsResult<String> {
        let reference = document.id().to_string();
        let content = serde_json::to_string(document)?;
        self.documents.insert(reference.clone(), content);
        Ok(reference)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn resolve(&self, reference: &str) -> OperationsResult<Option<String>> {
        Ok(self
            .documents
            .get(reference)
            .map(|entry| entry.value().clone()))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryArtifactRepository {
    records: RwLock<Vec<(String, ArtifactRecord)>>,
}

impl InMemoryArtifactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, artifact_id: &str) -> Option<ArtifactRecord> {
        self.records
            .read()
            .iter()
            .find(|(id, _)| id == artifact_id)
            .map(|(_, record)| record.clone())
    }

    /// All records in creation order
    pub fn records(&self) -> Vec<ArtifactRecord> {
        self.records
            .read()
            .iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl ArtifactRepository for InMemoryArtifactRepository {
    async fn create(&self, record: ArtifactRecord) -> OperationsResult<String> {
        let artifact_id = new_artifact_id();
        self.records.write().push((artifact_id.clone(), record));
        Ok(artifact_id)
    }
}
