//! ReportAggregator - turns a completed workflow into a ReportDocument.

use crate::domain::workflow::{WorkflowError, WorkflowState};

use super::{ModuleReport, ReportDocument};

/// Pure aggregation of workflow state; no I/O, no side effects.
pub struct ReportAggregator;

impl ReportAggregator {
    /// Builds the canonical report for a complete workflow.
    ///
    /// Every selected module yields an entry, in selection order. A module
    /// with no recorded answers yields an empty answer list.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteWorkflow` if any selected module is still unvisited.
    pub fn build(state: &WorkflowState) -> Result<ReportDocument, WorkflowError> {
        if !state.is_complete() {
            return Err(WorkflowError::IncompleteWorkflow {
                session_id: state.id(),
                visited: state.cursor(),
                total: state.selected_modules().len(),
            });
        }

        let module_reports = state
            .selected_modules()
            .iter()
            .map(|&module_id| ModuleReport {
                module_id,
                answers: state
                    .answers_for(module_id)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default(),
            })
            .collect();

        Ok(ReportDocument {
            subject_name: state.subject_name().to_string(),
            assessment_date: state.assessment_date(),
            module_reports,
        })
    }
}
