//! HTML table rendering
//!
//! Builds `<table>` markup from a [`TableModel`] and provides an in-memory
//! mount point plus a standalone report page for the CLI.

use super::TableMount;
use crate::error::ViewerResult;
use crate::table::TableModel;
use std::fmt::Write as _;

/// Escape text for element content and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<table>` with a `<thead>` header row and one `<tbody>` row per model row
pub fn render_table(table: &TableModel) -> String {
    let mut s = String::from("<table><thead><tr>");
    for label in &table.header {
        let _ = write!(s, "<th>{}</th>", escape(label));
    }
    s.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        s.push_str("<tr>");
        for cell in row {
            let _ = write!(s, "<td>{}</td>", escape(cell));
        }
        s.push_str("</tr>");
    }
    s.push_str("</tbody></table>");
    s
}

/// In-memory table mount point
///
/// Holds the markup of the last table; each `replace` discards the previous
/// content entirely.
#[derive(Debug, Default)]
pub struct HtmlMount {
    content: Option<String>,
    replacements: usize,
}

impl HtmlMount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount point that starts with existing markup
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            replacements: 0,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of times the content was replaced
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl TableMount for HtmlMount {
    fn replace(&mut self, table: &TableModel) -> ViewerResult<()> {
        self.content = Some(render_table(table));
        self.replacements += 1;
        Ok(())
    }
}

const PAGE_STYLE: &str = "body{margin:0;padding:24px;font-family:system-ui,-apple-system,Segoe UI,Arial,sans-serif;color:#111827;background:#ffffff} \
h1{font-size:20px;font-weight:600} \
table{border-collapse:collapse;margin-top:16px} \
th,td{padding:6px 10px;border:1px solid #e5e7eb;text-align:left} \
th{background:#f3f4f6} \
#chart{margin-top:16px}";

/// Standalone report page with the `table` and optional `chart` mount points filled
pub fn render_page(title: &str, table_html: &str, chart_svg: Option<&str>) -> String {
    let mut s = String::new();
    s.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    s.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    let _ = write!(s, "<title>{}</title>", escape(title));
    let _ = write!(s, "<style>{}</style></head><body>\n", PAGE_STYLE);
    let _ = writeln!(s, "<h1>{}</h1>", escape(title));
    if let Some(svg) = chart_svg {
        let _ = writeln!(s, "<div id=\"chart\">{}</div>", svg);
    }
    let _ = writeln!(s, "<div id=\"table\">{}</div>", table_html);
    s.push_str("</body></html>\n");
    s
}
