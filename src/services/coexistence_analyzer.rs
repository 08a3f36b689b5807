//! # Coexistence Analyzer
//!
//! Compares a SOP and a workflow that nominally describe the same process.
//!
//! Both documents are reduced to ordered step labels (trimmed, compared
//! case-insensitively). Sequences of equal length are matched position by
//! position; sequences of different length fall back to text equality,
//! ignoring position, with each step used at most once.
//!
//! Gap lists are named after the document that lacks the step:
//! `gaps_workflow_only` holds SOP steps missing from the workflow and
//! `gaps_sop_only` holds workflow steps missing from the SOP. Opportunities
//! mirror `gaps_sop_only`.

use chrono::Utc;
use futures::try_join;
use tracing::debug;

use super::structural_converter::{ordered_actions, StructuralConverter};
use crate::error::{OperationsError, OperationsResult};
use crate::models::identifiers::{new_analysis_id, new_blueprint_id};
use crate::models::{AutomationOpportunity, CoexistenceBlueprint, SopDocument, WorkflowDocument};
use crate::orchestration::repositories::DocumentRepository;

/// Outcome of comparing two label sequences
#[derive(Debug, Clone, PartialEq)]
pub struct CoexistenceReport {
    pub matched: Vec<String>,
    pub gaps_sop_only: Vec<String>,
    pub gaps_workflow_only: Vec<String>,
    pub opportunities: Vec<AutomationOpportunity>,
    pub alignment_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoexistenceAnalyzer;

impl CoexistenceAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compare a SOP against a workflow
    pub fn analyze(&self, sop: &SopDocument, workflow: &WorkflowDocument) -> CoexistenceReport {
        compare_steps(&sop.steps, &ordered_actions(workflow))
    }

    /// Compare the documents and stamp the result as a new blueprint
    pub fn build_blueprint(
        &self,
        sop_reference: &str,
        workflow_reference: &str,
        sop: &SopDocument,
        workflow: &WorkflowDocument,
    ) -> CoexistenceBlueprint {
        let report = self.analyze(sop, workflow);

        CoexistenceBlueprint {
            blueprint_id: new_blueprint_id(),
            analysis_id: new_analysis_id(),
            sop_reference: sop_reference.to_string(),
            workflow_reference: workflow_reference.to_string(),
            matched_steps: report.matched,
            gaps_sop_only: report.gaps_sop_only,
            gaps_workflow_only: report.gaps_workflow_only,
            opportunities: report.opportunities,
            alignment_score: report.alignment_score,
            recommendations: report.recommendations,
            created_at: Utc::now(),
        }
    }

    /// Resolve both references and build a blueprint from their content
    pub async fn create_blueprint(
        &self,
        sop_reference: &str,
        workflow_reference: &str,
        documents: &dyn DocumentRepository,
        converter: &StructuralConverter,
    ) -> OperationsResult<CoexistenceBlueprint> {
        let (sop_content, workflow_content) = try_join!(
            resolve(documents, sop_reference),
            resolve(documents, workflow_reference)
        )?;

        let sop = converter.resolve_sop(sop_reference, &sop_content)?;
        let workflow = converter.resolve_workflow(workflow_reference, &workflow_content)?;

        let blueprint = self.build_blueprint(sop_reference, workflow_reference, &sop, &workflow);

        debug!(
            blueprint_id = %blueprint.blueprint_id,
            alignment_score = blueprint.alignment_score,
            "Coexistence blueprint created"
        );

        Ok(blueprint)
    }
}

async fn resolve(documents: &dyn DocumentRepository, reference: &str) -> OperationsResult<String> {
    documents
        .resolve(reference)
        .await?
        .ok_or_else(|| OperationsError::not_found("document", reference))
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Core comparison over raw step texts
pub fn compare_steps(sop_steps: &[String], workflow_steps: &[String]) -> CoexistenceReport {
    let sop_labels: Vec<String> = sop_steps.iter().map(|s| normalize(s)).collect();
    let workflow_labels: Vec<String> = workflow_steps.iter().map(|s| normalize(s)).collect();

    let mut sop_matched = vec![false; sop_labels.len()];
    let mut workflow_matched = vec![false; workflow_labels.len()];

    if sop_labels.len() == workflow_labels.len() {
        for (index, (sop_label, workflow_label)) in
            sop_labels.iter().zip(&workflow_labels).enumerate()
        {
            if sop_label == workflow_label {
                sop_matched[index] = true;
                workflow_matched[index] = true;
            }
        }
    } else {
        for (sop_index, sop_label) in sop_labels.iter().enumerate() {
            let candidate = (0..workflow_labels.len())
                .find(|&index| !workflow_matched[index] && workflow_labels[index] == *sop_label);
            if let Some(workflow_index) = candidate {
                sop_matched[sop_index] = true;
                workflow_matched[workflow_index] = true;
            }
        }
    }

    let pick = |steps: &[String], flags: &[bool], wanted: bool| -> Vec<String> {
        steps
            .iter()
            .zip(flags)
            .filter(|(_, matched)| **matched == wanted)
            .map(|(step, _)| step.trim().to_string())
            .collect()
    };

    let matched = pick(sop_steps, &sop_matched, true);
    let gaps_workflow_only = pick(sop_steps, &sop_matched, false);
    let gaps_sop_only = pick(workflow_steps, &workflow_matched, false);

    let opportunities = gaps_sop_only
        .iter()
        .map(|step| AutomationOpportunity {
            step: step.clone(),
            rationale: format!(
                "'{step}' runs in the workflow without a documented SOP step; candidate for workflow automation"
            ),
        })
        .collect::<Vec<_>>();

    let alignment_score = alignment_score(
        matched.len(),
        gaps_sop_only.len() + gaps_workflow_only.len(),
    );

    let recommendations = recommendations(&gaps_sop_only, &gaps_workflow_only, &opportunities);

    CoexistenceReport {
        matched,
        gaps_sop_only,
        gaps_workflow_only,
        opportunities,
        alignment_score,
        recommendations,
    }
}

/// `matched / |union|`, where the union counts every step once
fn alignment_score(matched: usize, unmatched: usize) -> f64 {
    let union = matched + unmatched;
    if union == 0 {
        // Two empty procedures have nothing to disagree about
        return 1.0;
    }
    matched as f64 / union as f64
}

fn recommendations(
    gaps_sop_only: &[String],
    gaps_workflow_only: &[String],
    opportunities: &[AutomationOpportunity],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !gaps_workflow_only.is_empty() {
        recommendations.push(format!(
            "Workflow is missing {} step(s) documented in the SOP: {}. Extend the workflow to cover them.",
            gaps_workflow_only.len(),
            gaps_workflow_only.join(", ")
        ));
    }

    if !gaps_sop_only.is_empty() {
        recommendations.push(format!(
            "SOP is missing {} step(s) present in the workflow: {}. Update the SOP to document them.",
            gaps_sop_only.len(),
            gaps_sop_only.join(", ")
        ));
    }

    if !opportunities.is_empty() {
        recommendations.push(format!(
            "{} automation candidate(s) identified. Review them for workflow automation.",
            opportunities.len()
        ));
    }

    recommendations
}
