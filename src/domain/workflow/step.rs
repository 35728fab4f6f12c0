//! WorkflowStep - the per-session flow state machine.
//!
//! ```text
//! Selecting ──select──► InModule(0) ──submit──► InModule(1) ── ... ──► Complete
//!     └───────────────── (empty selection) ─────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Position of a workflow in its module sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum WorkflowStep {
    /// No modules chosen yet.
    Selecting,
    /// The module at this index of the selection is in focus.
    InModule(usize),
    /// Every selected module has been visited.
    Complete,
}

impl WorkflowStep {
    /// Derives the step for a cursor over a selection of `total` modules.
    pub fn at(cursor: usize, total: usize) -> Self {
        if cursor >= total {
            WorkflowStep::Complete
        } else {
            WorkflowStep::InModule(cursor)
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, WorkflowStep::Complete)
    }
}

impl StateMachine for WorkflowStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WorkflowStep::*;
        match (self, target) {
            (Selecting, InModule(0)) | (Selecting, Complete) => true,
            (InModule(i), InModule(j)) => *j == i + 1,
            (InModule(_), Complete) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WorkflowStep::*;
        match self {
            Selecting => vec![InModule(0), Complete],
            InModule(i) => vec![InModule(i + 1), Complete],
            Complete => vec![],
        }
    }
}
