//! Report document template.
//!
//! The template is loaded from YAML at start-up and declares the input schema
//! the document exporter must satisfy:
//!
//! ```yaml
//! template:
//!   title: Health Check Report
//!   placeholder: Not provided
//!   required_fields: [subject_name, assessment_date, prepared_by]
//!   header: |
//!     # {{title}}
//!     **Customer:** {{subject_name}}
//!   module_section: |
//!     ## {{module_title}}
//!     {{findings}}
//! ```
//!
//! `{{name}}` markers are substituted from a flat field map. Text values are
//! inserted as literal markdown text, so answers and names can never add
//! headings, links, list items or raw HTML. A marker naming a field the input
//! does not supply fails the render.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::ports::ExportError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

fn default_placeholder() -> Option<String> {
    Some("Not provided".to_string())
}

/// A single render input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// User or report text; escaped on insertion.
    Text(String),
    /// Markdown assembled by the exporter from already-escaped parts.
    Markdown(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn markdown(value: impl Into<String>) -> Self {
        Self::Markdown(value.into())
    }

    fn to_markdown(&self) -> String {
        match self {
            Self::Text(text) => escape_markdown(text),
            Self::Markdown(markdown) => markdown.clone(),
        }
    }
}

/// Flat field map used as render input.
pub type Fields = BTreeMap<String, FieldValue>;

/// Parsed document template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportTemplate {
    pub title: String,

    /// Substituted for required fields the report does not supply.
    /// `null` disables substitution so missing required fields fail the render.
    #[serde(default = "default_placeholder")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required_fields: Vec<String>,

    /// Markdown for the title page.
    pub header: String,

    /// Markdown rendered once per module; each starts a new page.
    pub module_section: String,
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    template: Option<ReportTemplate>,
}

/// Load and validate the document template from a YAML file.
pub fn load_template(path: impl AsRef<Path>) -> Result<ReportTemplate, ConfigError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::read(&origin, e.to_string()))?;

    let template = parse_template(&content, &origin)?;
    tracing::info!(
        path = %origin,
        required_fields = template.required_fields.len(),
        "Loaded report template"
    );
    Ok(template)
}

/// Parse and validate template YAML; `origin` names the source in errors.
pub fn parse_template(content: &str, origin: &str) -> Result<ReportTemplate, ConfigError> {
    let file: TemplateFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(origin, e.to_string()))?;
    let template = file
        .template
        .ok_or_else(|| ConfigError::missing_section(origin, "template"))?;

    if let Some(blank) = template.required_fields.iter().find(|f| f.trim().is_empty()) {
        return Err(ConfigError::invalid_entry(
            origin,
            format!("required field name '{}' is blank", blank),
        ));
    }
    for (section, body) in [
        ("header", &template.header),
        ("module_section", &template.module_section),
    ] {
        markers(body).map_err(|e| ConfigError::invalid_entry(origin, format!("{}: {}", section, e)))?;
    }

    Ok(template)
}

impl ReportTemplate {
    /// Fill every required field absent from `fields` with the placeholder.
    pub fn apply_placeholders(&self, fields: &mut Fields) {
        if let Some(placeholder) = &self.placeholder {
            for field in &self.required_fields {
                fields
                    .entry(field.clone())
                    .or_insert_with(|| FieldValue::text(placeholder.clone()));
            }
        }
    }

    /// Render the title page and one page per module section.
    ///
    /// # Errors
    ///
    /// `MissingField` if a required field, or any field a marker names, is
    /// absent from the input.
    pub fn render(&self, document: &Fields, sections: &[Fields]) -> Result<Vec<String>, ExportError> {
        if let Some(missing) = self
            .required_fields
            .iter()
            .find(|f| !document.contains_key(f.as_str()))
        {
            return Err(ExportError::missing_field(missing.as_str()));
        }

        let mut pages = Vec::with_capacity(sections.len() + 1);
        pages.push(substitute(&self.header, document, None)?);
        for section in sections {
            pages.push(substitute(&self.module_section, section, Some(document))?);
        }
        Ok(pages)
    }
}

/// Field names referenced by `{{...}}` markers, in order.
fn markers(body: &str) -> Result<Vec<&str>, String> {
    let mut names = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let end = after
            .find(CLOSE)
            .ok_or_else(|| "unterminated '{{' marker".to_string())?;
        let name = after[..end].trim();
        if name.is_empty() {
            return Err("empty '{{}}' marker".to_string());
        }
        names.push(name);
        rest = &after[end + CLOSE.len()..];
    }
    Ok(names)
}

/// Replace markers with field values; `fallback` is consulted for names `fields` lacks.
fn substitute(body: &str, fields: &Fields, fallback: Option<&Fields>) -> Result<String, ExportError> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let end = after
            .find(CLOSE)
            .ok_or_else(|| ExportError::render("unterminated '{{' marker"))?;
        let name = after[..end].trim();
        let value = fields
            .get(name)
            .or_else(|| fallback.and_then(|f| f.get(name)))
            .ok_or_else(|| ExportError::missing_field(name))?;
        out.push_str(&value.to_markdown());
        rest = &after[end + CLOSE.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Render `value` as literal inline markdown text.
///
/// Every ASCII punctuation character is backslash-escaped and line breaks
/// collapse to a single space, which is how a soft break renders anyway.
pub fn escape_markdown(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + value.len() / 4);
    let mut pending_space = false;
    for ch in value.trim().chars() {
        if ch == '\n' || ch == '\r' {
            pending_space = true;
            continue;
        }
        if pending_space {
            if !out.ends_with(' ') {
                out.push(' ');
            }
            pending_space = false;
        }
        if ch.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
template:
  title: Health Check Report
  required_fields: [subject_name, prepared_by]
  header: |
    # {{title}}
    Customer: {{ subject_name }}
    Prepared by: {{prepared_by}}
  module_section: |
    ## {{module_title}} for {{subject_name}}
    {{findings}}
"#;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::text(*v)))
            .collect()
    }

    #[test]
    fn parses_template_with_default_placeholder() {
        let template = parse_template(YAML, "t.yaml").unwrap();
        assert_eq!(template.title, "Health Check Report");
        assert_eq!(template.placeholder.as_deref(), Some("Not provided"));
        assert_eq!(template.required_fields, vec!["subject_name", "prepared_by"]);
    }

    #[test]
    fn missing_template_section_is_fatal() {
        let err = parse_template("other: {}\n", "t.yaml").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSection {
                section: "template",
                ..
            }
        ));
    }

    #[test]
    fn unterminated_marker_is_rejected_at_load() {
        let yaml = "template:\n  title: x\n  header: '# {{title'\n  module_section: ''\n";
        let err = parse_template(yaml, "t.yaml").unwrap_err();
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn placeholders_fill_only_absent_required_fields() {
        let template = parse_template(YAML, "t.yaml").unwrap();
        let mut doc = fields(&[("subject_name", "Acme Corp")]);

        template.apply_placeholders(&mut doc);

        assert_eq!(doc["subject_name"], FieldValue::text("Acme Corp"));
        assert_eq!(doc["prepared_by"], FieldValue::text("Not provided"));
    }

    #[test]
    fn render_produces_header_then_one_page_per_section() {
        let template = parse_template(YAML, "t.yaml").unwrap();
        let doc = fields(&[
            ("title", "Health Check Report"),
            ("subject_name", "Acme Corp"),
            ("prepared_by", "J. Smith"),
        ]);
        let section = |title: &str, findings: &str| {
            let mut f = fields(&[("module_title", title)]);
            f.insert("findings".into(), FieldValue::markdown(findings));
            f
        };
        let sections = vec![section("FSM", "- ok"), section("Web Hybrid", "- reboot")];

        let pages = template.render(&doc, &sections).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Customer: Acme Corp"));
        assert!(pages[1].starts_with("## FSM for Acme Corp"));
        assert!(pages[2].contains("- reboot"));
    }

    #[test]
    fn render_fails_on_absent_required_field() {
        let template = parse_template(YAML, "t.yaml").unwrap();
        let doc = fields(&[("title", "T"), ("subject_name", "Acme Corp")]);

        let err = template.render(&doc, &[]).unwrap_err();
        assert!(matches!(err, ExportError::MissingField { field } if field == "prepared_by"));
    }

    #[test]
    fn render_fails_on_unknown_marker() {
        let template = parse_template(YAML, "t.yaml").unwrap();
        let doc = fields(&[("subject_name", "Acme"), ("prepared_by", "x")]);

        let err = template.render(&doc, &[]).unwrap_err();
        assert!(matches!(err, ExportError::MissingField { field } if field == "title"));
    }

    #[test]
    fn null_placeholder_disables_filling() {
        let yaml = "template:\n  title: x\n  placeholder: null\n  required_fields: [a]\n  header: ''\n  module_section: ''\n";
        let template = parse_template(yaml, "t.yaml").unwrap();
        let mut doc = Fields::new();
        template.apply_placeholders(&mut doc);

        assert!(template.render(&doc, &[]).is_err());
    }

    #[test]
    fn text_values_are_escaped_as_literal_markdown() {
        let out = substitute("{{v}}", &fields(&[("v", "<script>&")]), None).unwrap();
        assert_eq!(out, "\\<script\\>\\&");
    }

    #[test]
    fn markdown_structure_in_text_is_neutralised() {
        assert_eq!(escape_markdown("ok\n\n## Web Hybrid"), "ok \\#\\# Web Hybrid");
        assert_eq!(escape_markdown("1. first"), "1\\. first");
        assert_eq!(escape_markdown("a | b"), "a \\| b");
        assert_eq!(escape_markdown("\\input{x}"), "\\\\input\\{x\\}");
    }

    #[test]
    fn markdown_values_are_inserted_verbatim() {
        let mut f = Fields::new();
        f.insert("v".into(), FieldValue::markdown("- *a*"));
        assert_eq!(substitute("{{v}}", &f, None).unwrap(), "- *a*");
    }
}
