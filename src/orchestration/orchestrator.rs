//! # Operations Orchestrator
//!
//! Single composition point over the wizard, the structural converter and the
//! coexistence analyzer.
//!
//! The orchestrator resolves external references before delegating, and on
//! every successful terminal output (a finalized SOP, a converted document or
//! a blueprint) requests exactly one artifact carrying the operation type,
//! every source reference consumed and the output reference. Errors from the
//! delegated components propagate unchanged. Artifact creation never fails
//! the primary operation; its result is reported as an [`ArtifactStatus`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::repositories::{ArtifactRepository, DocumentRepository};
use crate::config::ConfigManager;
use crate::error::{OperationsError, OperationsResult};
use crate::logging::{
    log_analysis_operation, log_artifact_operation, log_conversion_operation, log_error,
};
use crate::models::{
    ArtifactRecord, ArtifactStatus, CoexistenceBlueprint, ConversionType, Document,
    OperationType, SopDocument, WizardSession,
};
use crate::services::{
    CoexistenceAnalyzer, SessionStore, StructuralConverter, WizardSessionManager, WizardStart,
    WizardStepOutcome,
};

/// Output of a terminal operation together with its artifact outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcome<T> {
    pub output: T,
    pub artifact: ArtifactStatus,
}

/// Wizard step result; `artifact` is set only when the step finalized the SOP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardStepResult {
    pub step: WizardStepOutcome,
    pub artifact: Option<ArtifactStatus>,
}

pub struct OperationsOrchestrator {
    config: Arc<ConfigManager>,
    documents: Arc<dyn DocumentRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    wizard: WizardSessionManager,
    converter: StructuralConverter,
    analyzer: CoexistenceAnalyzer,
}

impl std::fmt::Debug for OperationsOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationsOrchestrator")
            .field("environment", &self.config.environment())
            .field("wizard", &self.wizard)
            .field("converter", &self.converter)
            .finish()
    }
}

impl OperationsOrchestrator {
    /// Wire the components against the given collaborators.
    ///
    /// Fails with `Configuration` when the configuration does not validate.
    pub fn new(
        config: Arc<ConfigManager>,
        documents: Arc<dyn DocumentRepository>,
        artifacts: Arc<dyn ArtifactRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> OperationsResult<Self> {
        let settings = config.config();
        settings.validate()?;

        let wizard = WizardSessionManager::new(sessions, settings.wizard.clone());
        let converter = StructuralConverter::new(settings.conversion.clone());

        info!(
            environment = %config.environment(),
            artifacts_enabled = settings.artifacts.enabled,
            "Operations orchestrator initialized"
        );

        Ok(Self {
            config,
            documents,
            artifacts,
            wizard,
            converter,
            analyzer: CoexistenceAnalyzer::new(),
        })
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    pub fn converter(&self) -> &StructuralConverter {
        &self.converter
    }

    pub fn analyzer(&self) -> &CoexistenceAnalyzer {
        &self.analyzer
    }

    pub async fn start_wizard(&self) -> OperationsResult<WizardStart> {
        self.wizard.start().await
    }

    /// Pass one input through to the wizard, recording an artifact when the
    /// input completes the session
    pub async fn run_wizard_step(&self, token: &str, input: &str) -> OperationsResult<WizardStepResult> {
        let step = self.wizard.process_step(token, input).await?;

        let artifact = match &step.sop {
            Some(sop) => Some(self.record_sop(token, sop).await),
            None => None,
        };

        Ok(WizardStepResult { step, artifact })
    }

    pub async fn complete_wizard(&self, token: &str) -> OperationsResult<OperationOutcome<SopDocument>> {
        let sop = self.wizard.complete(token).await?;
        let artifact = self.record_sop(token, &sop).await;

        Ok(OperationOutcome {
            output: sop,
            artifact,
        })
    }

    pub async fn cancel_wizard(&self, token: &str) -> OperationsResult<WizardStepOutcome> {
        self.wizard.cancel(token).await
    }

    pub async fn wizard_session(&self, token: &str) -> OperationsResult<WizardSession> {
        self.wizard.session(token).await
    }

    /// Resolve `reference` and convert its content in the given direction
    pub async fn convert(
        &self,
        direction: ConversionType,
        reference: &str,
    ) -> OperationsResult<OperationOutcome<Document>> {
        let content = self.resolve_document(reference).await?;

        let document = self
            .converter
            .analyze_file_from(Some(reference), &content, direction)
            .map_err(|err| {
                log_error(
                    "structural_converter",
                    &direction.to_string(),
                    &err.to_string(),
                    Some(reference),
                );
                err
            })?;

        log_conversion_operation(
            &direction.to_string(),
            Some(reference),
            document.id(),
            document.step_count(),
            "converted",
        );

        let operation = match direction {
            ConversionType::SopToWorkflow => OperationType::SopToWorkflow,
            ConversionType::WorkflowToSop => OperationType::WorkflowToSop,
        };
        let artifact = self
            .record_artifact(operation, vec![reference.to_string()], document.id(), &document)
            .await;

        Ok(OperationOutcome {
            output: document,
            artifact,
        })
    }

    /// Compare the referenced SOP and workflow and record the blueprint
    pub async fn analyze_coexistence(
        &self,
        sop_reference: &str,
        workflow_reference: &str,
    ) -> OperationsResult<OperationOutcome<CoexistenceBlueprint>> {
        let blueprint = self
            .analyzer
            .create_blueprint(
                sop_reference,
                workflow_reference,
                self.documents.as_ref(),
                &self.converter,
            )
            .await?;

        log_analysis_operation(
            &blueprint.analysis_id,
            sop_reference,
            workflow_reference,
            blueprint.alignment_score,
            blueprint.gaps_sop_only.len() + blueprint.gaps_workflow_only.len(),
        );

        let artifact = self
            .record_artifact(
                OperationType::CoexistenceAnalysis,
                vec![sop_reference.to_string(), workflow_reference.to_string()],
                &blueprint.blueprint_id,
                &blueprint,
            )
            .await;

        Ok(OperationOutcome {
            output: blueprint,
            artifact,
        })
    }

    async fn resolve_document(&self, reference: &str) -> OperationsResult<String> {
        self.documents
            .resolve(reference)
            .await?
            .ok_or_else(|| OperationsError::not_found("document", reference))
    }

    async fn record_sop(&self, token: &str, sop: &SopDocument) -> ArtifactStatus {
        self.record_artifact(
            OperationType::SopAuthoring,
            vec![token.to_string()],
            &sop.sop_id,
            sop,
        )
        .await
    }

    async fn record_artifact<T: Serialize>(
        &self,
        operation: OperationType,
        source_references: Vec<String>,
        output_reference: &str,
        output: &T,
    ) -> ArtifactStatus {
        let settings = &self.config.config().artifacts;
        if !settings.enabled {
            log_artifact_operation(&operation.to_string(), output_reference, None, "skipped");
            return ArtifactStatus::Skipped;
        }

        let result = self
            .create_artifact(operation, source_references, output_reference, output)
            .await;

        match result {
            Ok(artifact_id) => {
                log_artifact_operation(
                    &operation.to_string(),
                    output_reference,
                    Some(&artifact_id),
                    "created",
                );
                ArtifactStatus::Created { artifact_id }
            }
            Err(err) => {
                warn!(
                    operation = %operation,
                    output_reference = %output_reference,
                    error = %err,
                    "Artifact creation failed; operation result is kept"
                );
                ArtifactStatus::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn create_artifact<T: Serialize>(
        &self,
        operation: OperationType,
        source_references: Vec<String>,
        output_reference: &str,
        output: &T,
    ) -> OperationsResult<String> {
        let status = self.config.config().artifacts.record_status()?;
        let payload = serde_json::to_value(output)?;
        let record = ArtifactRecord::new(
            operation,
            source_references,
            output_reference,
            status,
            payload,
        );
        self.artifacts.create(record).await
    }
}
