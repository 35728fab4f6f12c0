//! WorkflowState - the per-session record of a module-sequenced assessment.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::domain::foundation::{ModuleId, SessionId, StateMachine, Timestamp, ValidationError};

use super::{WorkflowError, WorkflowStep};

/// Outcome of submitting answers for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub step: WorkflowStep,
    /// Module now in focus, `None` once complete.
    pub next_module: Option<ModuleId>,
    /// True when the submission repeated the previous one and changed nothing.
    pub replayed: bool,
}

/// State of one assessment workflow.
///
/// # Invariants
///
/// - `selected_modules` is unique and kept in selection order
/// - `cursor` never decreases and never exceeds `selected_modules.len()`
/// - answers are only ever recorded for the module at `cursor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    id: SessionId,
    subject_name: String,
    assessment_date: NaiveDate,
    selected_modules: Vec<ModuleId>,
    cursor: usize,
    answers: BTreeMap<ModuleId, Vec<String>>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl WorkflowState {
    /// Starts a workflow, moving it out of `Selecting`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the subject name is blank
    /// - `DuplicateModule` if a module appears twice in the selection
    pub fn new(
        id: SessionId,
        subject_name: impl Into<String>,
        assessment_date: NaiveDate,
        selected_modules: Vec<ModuleId>,
    ) -> Result<Self, WorkflowError> {
        let subject_name = subject_name.into().trim().to_string();
        if subject_name.is_empty() {
            return Err(ValidationError::empty_field("subject_name").into());
        }

        let mut seen = HashSet::new();
        if let Some(dup) = selected_modules.iter().find(|m| !seen.insert(**m)) {
            return Err(WorkflowError::DuplicateModule(*dup));
        }

        WorkflowStep::Selecting.transition_to(WorkflowStep::at(0, selected_modules.len()))?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            subject_name,
            assessment_date,
            selected_modules,
            cursor: 0,
            answers: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn assessment_date(&self) -> NaiveDate {
        self.assessment_date
    }

    pub fn selected_modules(&self) -> &[ModuleId] {
        &self.selected_modules
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn step(&self) -> WorkflowStep {
        WorkflowStep::at(self.cursor, self.selected_modules.len())
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.selected_modules.len()
    }

    /// The module in focus, or `None` once complete.
    pub fn current_module(&self) -> Option<ModuleId> {
        self.selected_modules.get(self.cursor).copied()
    }

    /// The most recently visited module.
    pub fn previous_module(&self) -> Option<ModuleId> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.selected_modules.get(i).copied())
    }

    /// Recorded answers for a module; `None` means no answer recorded.
    pub fn answers_for(&self, module: ModuleId) -> Option<&[String]> {
        self.answers.get(&module).map(Vec::as_slice)
    }

    /// Records answers for the module in focus, replacing any earlier submission.
    pub fn record_answers(
        &mut self,
        module: ModuleId,
        answers: Vec<String>,
    ) -> Result<(), WorkflowError> {
        let current = self.current_module();
        if current != Some(module) {
            return Err(WorkflowError::InvalidModule {
                session_id: self.id,
                module,
                expected: current,
            });
        }

        if self.answers.get(&module) != Some(&answers) {
            self.answers.insert(module, answers);
            self.updated_at = Timestamp::now();
        }
        Ok(())
    }

    /// Advances the cursor past `from_cursor`.
    ///
    /// Repeating an advance that already happened is a no-op, so a retried
    /// request cannot skip a module.
    pub fn advance_from(&mut self, from_cursor: usize) -> Result<WorkflowStep, WorkflowError> {
        if self.cursor == from_cursor + 1 {
            return Ok(self.step());
        }

        if self.cursor != from_cursor || self.is_complete() {
            return Err(match self.selected_modules.get(from_cursor) {
                Some(&module) => WorkflowError::InvalidModule {
                    session_id: self.id,
                    module,
                    expected: self.current_module(),
                },
                None => ValidationError::invalid_format(
                    "cursor",
                    format!(
                        "cursor {} is outside the selection of {} modules",
                        from_cursor,
                        self.selected_modules.len()
                    ),
                )
                .into(),
            });
        }

        let next = self
            .step()
            .transition_to(WorkflowStep::at(self.cursor + 1, self.selected_modules.len()))?;
        self.cursor += 1;
        self.updated_at = Timestamp::now();
        Ok(next)
    }

    /// Records answers for the module in focus and advances past it.
    ///
    /// An identical resubmission for the module just left is accepted as a
    /// replay and changes nothing.
    ///
    /// # Errors
    ///
    /// `InvalidModule` for any other module; state is left unchanged.
    pub fn submit(
        &mut self,
        module: ModuleId,
        answers: Vec<String>,
    ) -> Result<Submission, WorkflowError> {
        if self.current_module() != Some(module)
            && self.previous_module() == Some(module)
            && self.answers_for(module) == Some(answers.as_slice())
        {
            return Ok(Submission {
                step: self.step(),
                next_module: self.current_module(),
                replayed: true,
            });
        }

        let cursor = self.cursor;
        self.record_answers(module, answers)?;
        let step = self.advance_from(cursor)?;
        Ok(Submission {
            step,
            next_module: self.current_module(),
            replayed: false,
        })
    }

    /// True when the state has not changed since `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        self.updated_at.is_before(cutoff)
    }
}
