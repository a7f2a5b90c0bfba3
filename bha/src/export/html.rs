//! Self-contained HTML report: a static dashboard shell with the full JSON
//! payload embedded in a script tag for client-side tooling to read.

use super::{json::JsonExporter, Exporter, ExportFormat};
use crate::error::Result;
use crate::model::{AnalysisResult, ExportOptions, Suggestion};

pub struct HtmlExporter;

impl Exporter for HtmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn format_name(&self) -> &'static str {
        "HTML"
    }

    fn export_to_string(
        &self,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<String> {
        let mut json_options = options.clone();
        json_options.pretty_print = false;
        let payload = JsonExporter.export_to_string(analysis, suggestions, &json_options)?;

        let theme_class = if options.html_dark_mode { "theme-dark" } else { "theme-light" };
        let title = html_escape(&options.html_title);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem; }}
  .theme-dark body {{ background: #1e1e1e; color: #ddd; }}
  nav.tabs {{ display: flex; gap: 1rem; border-bottom: 1px solid #888; margin-bottom: 1rem; }}
  nav.tabs button {{ background: none; border: none; padding: 0.5rem 1rem; cursor: pointer; }}
  section.tab {{ display: none; }}
  section.tab.active {{ display: block; }}
</style>
</head>
<body>
<h1>{title}</h1>
<nav class="tabs">
  <button data-tab="files">Files</button>
  <button data-tab="include-tree">Include Tree</button>
  <button data-tab="timeline">Timeline</button>
  <button data-tab="treemap">Treemap</button>
  <button data-tab="templates">Templates</button>
  <button data-tab="suggestions">Suggestions</button>
  <button data-tab="dependencies">Dependencies</button>
</nav>
<section id="files" class="tab active"></section>
<section id="include-tree" class="tab"></section>
<section id="timeline" class="tab"></section>
<section id="treemap" class="tab"></section>
<section id="templates" class="tab"></section>
<section id="suggestions" class="tab"></section>
<section id="dependencies" class="tab"></section>
<script id="bha-data" type="application/json">
{payload}
</script>
</body>
</html>
"#
        ))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
