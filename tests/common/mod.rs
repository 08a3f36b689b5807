#![allow(dead_code)]

pub mod builders;
pub mod strategies;

pub use builders::*;

use async_trait::async_trait;
use std::sync::Arc;

use operations_core::config::{ConfigManager, OperationsConfig};
use operations_core::models::ArtifactRecord;
use operations_core::orchestration::{
    ArtifactRepository, InMemoryArtifactRepository, InMemoryDocumentRepository,
    OperationsOrchestrator,
};
use operations_core::services::InMemorySessionStore;
use operations_core::{OperationsError, OperationsResult};

/// Orchestrator wired to in-memory collaborators the test can inspect
pub struct TestHarness {
    pub orchestrator: OperationsOrchestrator,
    pub documents: Arc<InMemoryDocumentRepository>,
    pub artifacts: Arc<InMemoryArtifactRepository>,
}

pub fn harness() -> TestHarness {
    harness_with_config(OperationsConfig::default())
}

pub fn harness_with_config(config: OperationsConfig) -> TestHarness {
    operations_core::logging::init_structured_logging();

    let documents = Arc::new(InMemoryDocumentRepository::new());
    let artifacts = Arc::new(InMemoryArtifactRepository::new());

    let orchestrator = OperationsOrchestrator::new(
        ConfigManager::from_config(config).expect("valid test configuration"),
        documents.clone(),
        artifacts.clone(),
        Arc::new(InMemorySessionStore::new()),
    )
    .expect("orchestrator should build");

    TestHarness {
        orchestrator,
        documents,
        artifacts,
    }
}

/// Orchestrator whose artifact repository always fails
pub fn harness_with_failing_artifacts() -> (OperationsOrchestrator, Arc<InMemoryDocumentRepository>) {
    let documents = Arc::new(InMemoryDocumentRepository::new());
    let orchestrator = OperationsOrchestrator::new(
        ConfigManager::from_config(OperationsConfig::default()).expect("valid test configuration"),
        documents.clone(),
        Arc::new(FailingArtifactRepository),
        Arc::new(InMemorySessionStore::new()),
    )
    .expect("orchestrator should build");

    (orchestrator, documents)
}

#[derive(Debug, Default)]
pub struct FailingArtifactRepository;

#[async_trait]
impl ArtifactRepository for FailingArtifactRepository {
    async fn create(&self, _record: ArtifactRecord) -> OperationsResult<String> {
        Err(OperationsError::Repository {
            repository: "artifacts",
            reason: "artifact store unavailable".to_string(),
        })
    }
}
