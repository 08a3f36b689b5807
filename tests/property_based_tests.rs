mod common;

use common::strategies::*;
use operations_core::models::{SopDocument, SopOrigin};
use operations_core::services::compare_steps;
use operations_core::state_machine::{WizardEvent, WizardState};
use operations_core::StructuralConverter;
use proptest::prelude::*;

proptest! {
    /// Property: SOP -> workflow -> SOP preserves step text and order
    #[test]
    fn sop_workflow_round_trip_preserves_steps(steps in steps_strategy(25)) {
        let converter = StructuralConverter::default();
        let sop = SopDocument::draft("Procedure", None, steps.clone(), SopOrigin::default());

        let workflow = converter.sop_to_workflow(&sop);
        prop_assert_eq!(workflow.steps.len(), steps.len());

        let back = converter.workflow_to_sop(&workflow).unwrap();
        prop_assert_eq!(back.steps, steps);
    }

    /// Property: alignment score stays in [0, 1] and is 1.0 exactly when no gaps exist
    #[test]
    fn alignment_score_is_bounded(sop in labels_strategy(8), workflow in labels_strategy(8)) {
        let report = compare_steps(&sop, &workflow);

        prop_assert!((0.0..=1.0).contains(&report.alignment_score));
        let no_gaps = report.gaps_sop_only.is_empty() && report.gaps_workflow_only.is_empty();
        prop_assert_eq!(report.alignment_score == 1.0, no_gaps);
    }

    /// Property: every step is either matched or reported as a gap, exactly once
    #[test]
    fn comparison_accounts_for_every_step(sop in labels_strategy(8), workflow in labels_strategy(8)) {
        let report = compare_steps(&sop, &workflow);

        prop_assert_eq!(report.matched.len() + report.gaps_workflow_only.len(), sop.len());
        prop_assert_eq!(report.matched.len() + report.gaps_sop_only.len(), workflow.len());
        prop_assert_eq!(report.opportunities.len(), report.gaps_sop_only.len());
    }

    /// Property: ordinary text while collecting steps always becomes a step, verbatim
    #[test]
    fn step_text_is_appended_verbatim(text in step_text_strategy()) {
        let event = WizardEvent::from_input(WizardState::CollectingSteps, &text).unwrap();
        prop_assert_eq!(event, WizardEvent::AddStep(text.trim().to_string()));
    }
}
