//! Export adapters - spreadsheet and document renderers for the report pipeline.

mod csv_exporter;
mod document_exporter;
mod document_renderer;
mod template;

pub use csv_exporter::{CsvSpreadsheetExporter, ANSWER_DELIMITER, CSV_HEADERS, NO_ANSWERS_SENTINEL};
pub use document_exporter::TemplateDocumentExporter;
pub use document_renderer::DocumentRenderer;
pub use template::{escape_markdown, load_template, parse_template, FieldValue, Fields, ReportTemplate};
