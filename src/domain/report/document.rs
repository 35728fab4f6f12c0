//! ReportDocument - canonical, ordered view of a completed assessment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ModuleId;

/// Answers collected for a single module.
///
/// An empty `answers` list means the module was assessed with no findings,
/// which is different from the module being absent from the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub module_id: ModuleId,
    pub answers: Vec<String>,
}

impl ModuleReport {
    pub fn has_findings(&self) -> bool {
        !self.answers.is_empty()
    }
}

/// The report built from a completed workflow. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub subject_name: String,
    pub assessment_date: NaiveDate,
    pub module_reports: Vec<ModuleReport>,
}

impl ReportDocument {
    /// ISO-8601 date string used by both exporters.
    pub fn assessment_date_iso(&self) -> String {
        self.assessment_date.format("%Y-%m-%d").to_string()
    }
}
