//! # Structural Converter
//!
//! Direction-aware transform between SOP and workflow documents.
//!
//! The converter is a pure function of its input: it holds only the content
//! limits it was configured with, so any number of conversions can run
//! concurrently.
//!
//! ## Round trip
//!
//! For any SOP with at least one step,
//! `workflow_to_sop(&sop_to_workflow(&sop))?.steps == sop.steps`.
//! Step ids are synthesized and therefore not part of that equality.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::content::{sniff_content, ContentShape};
use crate::config::ConversionConfig;
use crate::error::{OperationsError, OperationsResult};
use crate::models::identifiers::new_workflow_step_id;
use crate::models::{
    ConversionType, Document, SopDocument, SopOrigin, WorkflowDocument, WorkflowStep,
};

#[derive(Debug, Clone, Default)]
pub struct StructuralConverter {
    limits: ConversionConfig,
}

impl StructuralConverter {
    pub fn new(limits: ConversionConfig) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ConversionConfig {
        &self.limits
    }

    /// Lift a SOP into a linear workflow: step *i* depends on step *i-1*
    pub fn sop_to_workflow(&self, sop: &SopDocument) -> WorkflowDocument {
        let mut workflow = WorkflowDocument::new(sop.title.clone(), sop.description.clone());
        workflow.conversion_type = Some(ConversionType::SopToWorkflow);
        workflow.source_document_id = Some(sop.sop_id.clone());

        let mut previous: Option<String> = None;
        for action in &sop.steps {
            let id = new_workflow_step_id();
            workflow.steps.push(WorkflowStep {
                id: id.clone(),
                action: action.clone(),
                depends_on: previous.replace(id),
            });
        }

        debug!(
            sop_id = %sop.sop_id,
            workflow_id = %workflow.workflow_id,
            step_count = workflow.steps.len(),
            "Converted SOP to workflow"
        );

        workflow
    }

    /// Walk the workflow's dependency chain and emit its actions as SOP steps
    pub fn workflow_to_sop(&self, workflow: &WorkflowDocument) -> OperationsResult<SopDocument> {
        let chain = linear_chain(workflow)?;
        let sop = sop_from_actions(
            workflow,
            chain.iter().map(|step| step.action.clone()).collect(),
        );

        debug!(
            workflow_id = %workflow.workflow_id,
            sop_id = %sop.sop_id,
            step_count = sop.steps.len(),
            "Converted workflow to SOP"
        );

        Ok(sop)
    }

    /// Classify raw content and convert it in the requested direction
    pub fn analyze_file(&self, raw: &str, direction: ConversionType) -> OperationsResult<Document> {
        self.analyze_file_from(None, raw, direction)
    }

    /// Same as [`analyze_file`](Self::analyze_file), recording where the content came from
    pub fn analyze_file_from(
        &self,
        reference: Option<&str>,
        raw: &str,
        direction: ConversionType,
    ) -> OperationsResult<Document> {
        let shape = sniff_content(raw, &self.limits)?;
        debug!(
            reference = reference,
            shape = shape.kind(),
            direction = %direction,
            "Analyzing file content"
        );

        match (shape, direction) {
            (ContentShape::Sop(sop), ConversionType::SopToWorkflow) => {
                Ok(Document::Workflow(self.sop_to_workflow(&sop)))
            }
            (ContentShape::Workflow(workflow), ConversionType::WorkflowToSop) => {
                Ok(Document::Sop(self.workflow_to_sop(&workflow)?))
            }
            (ContentShape::PlainText(lines), ConversionType::SopToWorkflow) => {
                let sop = import_plain_text(lines, reference);
                Ok(Document::Workflow(self.sop_to_workflow(&sop)))
            }
            (ContentShape::PlainText(lines), ConversionType::WorkflowToSop) => {
                let sop = import_plain_text(lines, reference);
                let mut workflow = self.sop_to_workflow(&sop);
                workflow.source_document_id = reference.map(str::to_string);
                Ok(Document::Sop(self.workflow_to_sop(&workflow)?))
            }
            (shape, direction) => Err(OperationsError::unsupported_content(format!(
                "{direction} expects {} content, found {}",
                expected_source(direction),
                shape.kind()
            ))),
        }
    }

    /// Read any supported content as a SOP.
    ///
    /// A workflow is read in chain order, or in listing order when its steps
    /// do not form a single chain, so resolution only fails on unusable content.
    pub fn resolve_sop(&self, reference: &str, raw: &str) -> OperationsResult<SopDocument> {
        match sniff_content(raw, &self.limits)? {
            ContentShape::Sop(sop) => Ok(sop),
            ContentShape::Workflow(workflow) => {
                Ok(sop_from_actions(&workflow, ordered_actions(&workflow)))
            }
            ContentShape::PlainText(lines) => Ok(import_plain_text(lines, Some(reference))),
        }
    }

    /// Read any supported content as a workflow
    pub fn resolve_workflow(&self, reference: &str, raw: &str) -> OperationsResult<WorkflowDocument> {
        match sniff_content(raw, &self.limits)? {
            ContentShape::Workflow(workflow) => Ok(workflow),
            ContentShape::Sop(sop) => Ok(self.sop_to_workflow(&sop)),
            ContentShape::PlainText(lines) => {
                Ok(self.sop_to_workflow(&import_plain_text(lines, Some(reference))))
            }
        }
    }
}

fn expected_source(direction: ConversionType) -> &'static str {
    match direction {
        ConversionType::SopToWorkflow => "sop",
        ConversionType::WorkflowToSop => "workflow",
    }
}

/// SOP carrying the workflow's title and lineage with the given steps
fn sop_from_actions(workflow: &WorkflowDocument, steps: Vec<String>) -> SopDocument {
    let mut sop = SopDocument::draft(
        workflow.title.clone(),
        workflow.description.clone(),
        steps,
        SopOrigin::Conversion {
            workflow_id: workflow.workflow_id.clone(),
        },
    );
    sop.conversion_type = Some(ConversionType::WorkflowToSop);
    sop.source_document_id = workflow
        .source_document_id
        .clone()
        .or_else(|| Some(workflow.workflow_id.clone()));
    sop
}

/// Workflow actions in chain order, or listing order when the chain is broken
pub fn ordered_actions(workflow: &WorkflowDocument) -> Vec<String> {
    match linear_chain(workflow) {
        Ok(chain) => chain.into_iter().map(|step| step.action.clone()).collect(),
        Err(err) => {
            debug!(
                workflow_id = %workflow.workflow_id,
                error = %err,
                "Workflow is not a single chain, using listing order"
            );
            workflow.steps.iter().map(|step| step.action.clone()).collect()
        }
    }
}

fn import_plain_text(lines: Vec<String>, reference: Option<&str>) -> SopDocument {
    SopDocument::draft(
        String::new(),
        None,
        lines,
        SopOrigin::Import {
            reference: reference.map(str::to_string),
        },
    )
}

/// Order workflow steps from the single root to the single leaf.
///
/// Fails when the steps do not form exactly one linear chain: no steps,
/// duplicate ids, dangling or self dependencies, branching, more than one
/// root, or a cycle.
pub fn linear_chain(workflow: &WorkflowDocument) -> OperationsResult<Vec<&WorkflowStep>> {
    if workflow.steps.is_empty() {
        return Err(OperationsError::structural(format!(
            "workflow '{}' has no steps",
            workflow.workflow_id
        )));
    }

    let mut by_id: HashMap<&str, &WorkflowStep> = HashMap::with_capacity(workflow.steps.len());
    for step in &workflow.steps {
        if by_id.insert(step.id.as_str(), step).is_some() {
            return Err(OperationsError::structural(format!(
                "duplicate step id '{}'",
                step.id
            )));
        }
    }

    let mut successors: HashMap<&str, &WorkflowStep> = HashMap::new();
    let mut roots = Vec::new();

    for step in &workflow.steps {
        match step.depends_on.as_deref() {
            None => roots.push(step),
            Some(predecessor) if predecessor == step.id => {
                return Err(OperationsError::structural(format!(
                    "step '{}' depends on itself",
                    step.id
                )));
            }
            Some(predecessor) => {
                if !by_id.contains_key(predecessor) {
                    return Err(OperationsError::structural(format!(
                        "step '{}' depends on unknown step '{predecessor}'",
                        step.id
                    )));
                }
                if successors.insert(predecessor, step).is_some() {
                    return Err(OperationsError::structural(format!(
                        "step '{predecessor}' has more than one successor"
                    )));
                }
            }
        }
    }

    let root = match roots.as_slice() {
        [root] => *root,
        [] => {
            return Err(OperationsError::structural(
                "dependency cycle: no step without a predecessor",
            ))
        }
        many => {
            return Err(OperationsError::structural(format!(
                "{} steps have no predecessor",
                many.len()
            )))
        }
    };

    let mut chain = Vec::with_capacity(workflow.steps.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(workflow.steps.len());
    let mut current = Some(root);

    while let Some(step) = current {
        if !visited.insert(step.id.as_str()) {
            return Err(OperationsError::structural(format!(
                "dependency cycle through step '{}'",
                step.id
            )));
        }
        chain.push(step);
        current = successors.get(step.id.as_str()).copied();
    }

    if chain.len() != workflow.steps.len() {
        return Err(OperationsError::structural(format!(
            "dependency cycle: {} of {} steps unreachable from the root",
            workflow.steps.len() - chain.len(),
            workflow.steps.len()
        )));
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sop(steps: &[&str]) -> SopDocument {
        SopDocument::draft(
            "Deploy Service",
            Some("Routine deployment".to_string()),
            steps.iter().map(|s| s.to_string()).collect(),
            SopOrigin::Import { reference: None },
        )
    }

    fn step(id: &str, action: &str, depends_on: Option<&str>) -> WorkflowStep {
        WorkflowStep {
            id: id.to_string(),
            action: action.to_string(),
            depends_on: depends_on.map(str::to_string),
        }
    }

    fn workflow(steps: Vec<WorkflowStep>) -> WorkflowDocument {
        let mut workflow = WorkflowDocument::new("Deploy", None);
        workflow.steps = steps;
        workflow
    }

    #[test]
    fn test_sop_to_workflow_builds_linear_chain() {
        let converter = StructuralConverter::default();
        let source = sop(&["Build", "Test", "Release"]);
        let workflow = converter.sop_to_workflow(&source);

        assert_eq!(workflow.steps.len(), 3);
        assert_eq!(workflow.steps[0].depends_on, None);
        assert_eq!(
            workflow.steps[1].depends_on.as_deref(),
            Some(workflow.steps[0].id.as_str())
        );
        assert_eq!(
            workflow.steps[2].depends_on.as_deref(),
            Some(workflow.steps[1].id.as_str())
        );
        assert_eq!(workflow.conversion_type, Some(ConversionType::SopToWorkflow));
        assert_eq!(workflow.source_document_id.as_deref(), Some(source.sop_id.as_str()));
        assert_eq!(workflow.title, "Deploy Service");
    }

    #[test]
    fn test_round_trip_preserves_steps() {
        let converter = StructuralConverter::default();
        let source = sop(&["Build", "Test", "Release"]);
        let back = converter
            .workflow_to_sop(&converter.sop_to_workflow(&source))
            .unwrap();

        assert_eq!(back.steps, source.steps);
        assert_eq!(back.conversion_type, Some(ConversionType::WorkflowToSop));
        assert_eq!(back.source_document_id.as_deref(), Some(source.sop_id.as_str()));
        assert_ne!(back.sop_id, source.sop_id);
    }

    #[test]
    fn test_workflow_to_sop_follows_dependencies_not_listing_order() {
        let converter = StructuralConverter::default();
        let shuffled = workflow(vec![
            step("c", "Release", Some("b")),
            step("a", "Build", None),
            step("b", "Test", Some("a")),
        ]);

        let sop = converter.workflow_to_sop(&shuffled).unwrap();
        assert_eq!(sop.steps, vec!["Build", "Test", "Release"]);
        assert_eq!(
            sop.source_document_id.as_deref(),
            Some(shuffled.workflow_id.as_str())
        );
    }

    #[test]
    fn test_multiple_roots_is_structural_error() {
        let converter = StructuralConverter::default();
        let broken = workflow(vec![step("a", "Build", None), step("b", "Test", None)]);
        assert!(matches!(
            converter.workflow_to_sop(&broken),
            Err(OperationsError::Structural { .. })
        ));
    }

    #[test]
    fn test_resolve_sop_reads_broken_workflow_in_listing_order() {
        let converter = StructuralConverter::default();
        let broken = workflow(vec![step("a", "Build", None), step("b", "Test", None)]);
        let raw = serde_json::to_string(&Document::Workflow(broken.clone())).unwrap();

        let sop = converter.resolve_sop("wf-ref", &raw).unwrap();
        assert_eq!(sop.steps, vec!["Build", "Test"]);
        assert_eq!(
            sop.source_document_id.as_deref(),
            Some(broken.workflow_id.as_str())
        );
    }

    #[test]
    fn test_ordered_actions_prefers_chain_order() {
        let shuffled = workflow(vec![
            step("b", "Test", Some("a")),
            step("a", "Build", None),
        ]);
        assert_eq!(ordered_actions(&shuffled), vec!["Build", "Test"]);

        let broken = workflow(vec![step("b", "Test", None), step("a", "Build", None)]);
        assert_eq!(ordered_actions(&broken), vec!["Test", "Build"]);
    }

    #[test]
    fn test_cycle_is_structural_error() {
        let converter = StructuralConverter::default();
        let cyclic = workflow(vec![
            step("a", "Build", Some("b")),
            step("b", "Test", Some("a")),
        ]);
        assert!(matches!(
            converter.workflow_to_sop(&cyclic),
            Err(OperationsError::Structural { .. })
        ));

        let detached_cycle = workflow(vec![
            step("root", "Start", None),
            step("a", "Build", Some("b")),
            step("b", "Test", Some("a")),
        ]);
        assert!(matches!(
            converter.workflow_to_sop(&detached_cycle),
            Err(OperationsError::Structural { .. })
        ));
    }

    #[test]
    fn test_branching_and_dangling_are_structural_errors() {
        let branching = workflow(vec![
            step("a", "Build", None),
            step("b", "Test", Some("a")),
            step("c", "Lint", Some("a")),
        ]);
        assert!(linear_chain(&branching).is_err());

        let dangling = workflow(vec![step("a", "Build", None), step("b", "Test", Some("zz"))]);
        assert!(linear_chain(&dangling).is_err());

        let self_loop = workflow(vec![step("a", "Build", Some("a"))]);
        assert!(linear_chain(&self_loop).is_err());

        assert!(linear_chain(&workflow(vec![])).is_err());
    }

    #[test]
    fn test_analyze_plain_text_to_workflow() {
        let converter = StructuralConverter::default();
        let document = converter
            .analyze_file_from(Some("doc-7"), "Build\n\nTest\n", ConversionType::SopToWorkflow)
            .unwrap();

        let workflow = document.as_workflow().unwrap();
        let actions: Vec<_> = workflow.steps.iter().map(|s| s.action.as_str()).collect();
        assert_eq!(actions, vec!["Build", "Test"]);
    }

    #[test]
    fn test_analyze_plain_text_to_sop_keeps_reference_lineage() {
        let converter = StructuralConverter::default();
        let document = converter
            .analyze_file_from(Some("doc-7"), "Build\nTest", ConversionType::WorkflowToSop)
            .unwrap();

        let sop = document.as_sop().unwrap();
        assert_eq!(sop.steps, vec!["Build", "Test"]);
        assert_eq!(sop.source_document_id.as_deref(), Some("doc-7"));
        assert_eq!(sop.conversion_type, Some(ConversionType::WorkflowToSop));
    }

    #[test]
    fn test_analyze_mismatched_structured_content() {
        let converter = StructuralConverter::default();
        let raw = serde_json::to_string(&sop(&["Build"])).unwrap();
        assert!(matches!(
            converter.analyze_file(&raw, ConversionType::WorkflowToSop),
            Err(OperationsError::UnsupportedContent { .. })
        ));
        assert!(converter
            .analyze_file(&raw, ConversionType::SopToWorkflow)
            .is_ok());
    }
}
