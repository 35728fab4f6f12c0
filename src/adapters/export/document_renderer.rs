//! Markdown page rendering to HTML (pulldown-cmark) and PDF (Pandoc).

use std::process::Stdio;
use std::time::Duration;

use pulldown_cmark::{html, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::ExportError;

/// Raw HTML block that forces the following page onto a new sheet when printed.
const HTML_PAGE_BREAK: &str = "<div class=\"page-break\"></div>";

/// Pandoc raw-attribute block; inline raw TeX and HTML are disabled.
const PDF_PAGE_BREAK: &str = "```{=latex}\n\\newpage\n```";

/// Pandoc markdown without raw TeX or HTML pass-through.
const PANDOC_INPUT_FORMAT: &str = "markdown-raw_tex-raw_html";

/// Converts rendered template pages into a paginated document.
///
/// HTML is pure Rust and always available. PDF shells out to Pandoc and
/// returns `ServiceUnavailable` when it is not installed.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,
    pdf_timeout_secs: u64,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: 30,
        }
    }

    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    fn join_pages(pages: &[String], page_break: &str) -> String {
        pages.join(&format!("\n\n{}\n\n", page_break))
    }

    /// Render pages to a self-contained HTML document.
    pub fn to_html(&self, title: &str, pages: &[String]) -> String {
        let markdown = Self::join_pages(pages, HTML_PAGE_BREAK);
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;

        let mut body = String::new();
        html::push_html(&mut body, Parser::new_ext(&markdown, options));

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="assessment-report">
{body}
    </article>
</body>
</html>"#,
            title = html_escape(title),
            css = REPORT_CSS,
            body = body
        )
    }

    async fn check_pandoc(&self) -> bool {
        Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Render pages to PDF through Pandoc.
    pub async fn to_pdf(&self, title: &str, pages: &[String]) -> Result<Vec<u8>, ExportError> {
        if !self.check_pandoc().await {
            return Err(ExportError::service_unavailable(
                "Pandoc is not installed. PDF export requires Pandoc.",
            ));
        }

        let markdown = Self::join_pages(pages, PDF_PAGE_BREAK);
        let mut child = Command::new(self.pandoc_command())
            .args([
                "-f",
                PANDOC_INPUT_FORMAT,
                "-t",
                "pdf",
                "--pdf-engine=xelatex",
                "-V",
                "geometry:margin=1in",
                "-M",
            ])
            .arg(format!("title={}", title))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::render(format!("Failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ExportError::render(format!("Failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::render(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::render(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const REPORT_CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: #1f2937;
    max-width: 900px;
    margin: 0 auto;
    padding: 2rem;
}

h1 {
    font-size: 2rem;
    border-bottom: 2px solid #2563eb;
    padding-bottom: 0.5rem;
}

h2 {
    font-size: 1.5rem;
    border-bottom: 1px solid #e5e7eb;
    padding-bottom: 0.25rem;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th, td {
    padding: 0.5rem;
    text-align: left;
    border: 1px solid #e5e7eb;
}

.page-break {
    break-after: page;
    page-break-after: always;
}

@media screen {
    .page-break {
        border-top: 1px dashed #e5e7eb;
        margin: 2rem 0;
    }
}

@media print {
    body {
        font-size: 12pt;
        padding: 0;
    }
}
"#;
