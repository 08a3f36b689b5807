use operations_core::models::{SopDocument, SopOrigin, WorkflowDocument, WorkflowStep};
use operations_core::orchestration::OperationsOrchestrator;
use operations_core::SopStatus;

pub fn sop_fixture(title: &str, steps: &[&str]) -> SopDocument {
    let mut sop = SopDocument::draft(
        title,
        None,
        steps.iter().map(|step| step.to_string()).collect(),
        SopOrigin::default(),
    );
    sop.status = SopStatus::Final;
    sop
}

/// Linear workflow with ids `s1..sN`, each depending on the previous one
pub fn workflow_fixture(title: &str, actions: &[&str]) -> WorkflowDocument {
    let mut workflow = WorkflowDocument::new(title, None);
    workflow.steps = actions
        .iter()
        .enumerate()
        .map(|(index, action)| WorkflowStep {
            id: format!("s{}", index + 1),
            action: action.to_string(),
            depends_on: (index > 0).then(|| format!("s{index}")),
        })
        .collect();
    workflow
}

/// Drive a full wizard session through the orchestrator and return its token
pub async fn author_sop(
    orchestrator: &OperationsOrchestrator,
    title: &str,
    description: &str,
    steps: &[&str],
) -> String {
    let token = orchestrator
        .start_wizard()
        .await
        .expect("wizard should start")
        .session_token;

    let inputs = [title, description]
        .into_iter()
        .chain(steps.iter().copied())
        .chain(["done"]);

    for input in inputs {
        orchestrator
            .run_wizard_step(&token, input)
            .await
            .expect("wizard input should be accepted");
    }

    token
}
