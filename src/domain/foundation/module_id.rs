//! ModuleId enum naming the assessable product modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The closed set of modules an assessment can cover.
///
/// The wire form is the snake_case identifier (`fsm`, `web_hybrid`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Fsm,
    DlpProtector,
    DlpIrr,
    DlpIcap,
    DlpEsg,
    WebAppliance,
    WebHybrid,
}

impl ModuleId {
    /// Returns all module ids in catalogue order.
    pub fn all() -> &'static [ModuleId] {
        &[
            ModuleId::Fsm,
            ModuleId::DlpProtector,
            ModuleId::DlpIrr,
            ModuleId::DlpIcap,
            ModuleId::DlpEsg,
            ModuleId::WebAppliance,
            ModuleId::WebHybrid,
        ]
    }

    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Fsm => "fsm",
            ModuleId::DlpProtector => "dlp_protector",
            ModuleId::DlpIrr => "dlp_irr",
            ModuleId::DlpIcap => "dlp_icap",
            ModuleId::DlpEsg => "dlp_esg",
            ModuleId::WebAppliance => "web_appliance",
            ModuleId::WebHybrid => "web_hybrid",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleId::Fsm => "Forcepoint Security Manager",
            ModuleId::DlpProtector => "DLP Protector",
            ModuleId::DlpIrr => "DLP IRR",
            ModuleId::DlpIcap => "DLP ICAP",
            ModuleId::DlpEsg => "DLP ESG",
            ModuleId::WebAppliance => "Web Appliance",
            ModuleId::WebHybrid => "Web Hybrid",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("module", format!("unknown module id '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_7_modules() {
        assert_eq!(ModuleId::all().len(), 7);
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for module in ModuleId::all() {
            assert_eq!(module.as_str().parse::<ModuleId>().unwrap(), *module);
        }
    }

    #[test]
    fn from_str_rejects_unknown_ids() {
        assert!("dlp".parse::<ModuleId>().is_err());
        assert!("FSM".parse::<ModuleId>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_wire_form() {
        let json = serde_json::to_string(&ModuleId::WebHybrid).unwrap();
        assert_eq!(json, "\"web_hybrid\"");

        let parsed: ModuleId = serde_json::from_str("\"dlp_icap\"").unwrap();
        assert_eq!(parsed, ModuleId::DlpIcap);
    }

    #[test]
    fn display_uses_wire_form() {
        assert_eq!(ModuleId::Fsm.to_string(), "fsm");
        assert_eq!(ModuleId::Fsm.display_name(), "Forcepoint Security Manager");
    }
}
