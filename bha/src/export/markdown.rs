//! Human-readable Markdown report: summary table, top-files table, and one
//! section per suggestion.

use super::{filtered_files, filtered_suggestions, Exporter, ExportFormat};
use crate::error::Result;
use crate::model::{AnalysisResult, ExportOptions, Suggestion};
use std::fmt::Write as _;

pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn format_name(&self) -> &'static str {
        "Markdown"
    }

    fn export_to_string(
        &self,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", options.html_title);
        out.push('\n');

        out.push_str("## Summary\n\n");
        out.push_str("| Metric | Value |\n|---|---|\n");
        let _ = writeln!(out, "| Total files | {} |", analysis.performance.total_files);
        let _ = writeln!(
            out,
            "| Total compile time (ms) | {:.1} |",
            analysis.performance.total_build_time.as_millis_f64()
        );
        let _ = writeln!(
            out,
            "| Parallelism efficiency | {:.2} |",
            analysis.performance.parallelism_efficiency
        );
        let _ = writeln!(out, "| Unique headers | {} |", analysis.dependencies.unique_headers);
        let _ = writeln!(out, "| Suggestions | {} |", suggestions.len());
        out.push('\n');

        out.push_str("## Top Files\n\n");
        out.push_str("| Rank | File | Time (ms) | % of build |\n|---|---|---|---|\n");
        for file in filtered_files(analysis, options).into_iter().take(10) {
            let _ = writeln!(
                out,
                "| {} | {} | {:.1} | {:.1}% |",
                file.rank,
                file.path.display(),
                file.compile_time.as_millis_f64(),
                file.time_percent
            );
        }
        out.push('\n');

        if options.include_dependencies {
            out.push_str("## Dependency Stats\n\n");
            let _ = writeln!(out, "- Total includes: {}", analysis.dependencies.total_includes);
            let _ = writeln!(out, "- Unique headers: {}", analysis.dependencies.unique_headers);
            let _ = writeln!(out, "- Max include depth: {}", analysis.dependencies.max_include_depth);
            let _ = writeln!(
                out,
                "- Circular dependencies: {}",
                analysis.dependencies.circular_dependencies.len()
            );
            out.push('\n');
        }

        if options.include_suggestions {
            out.push_str("## Suggestions\n\n");
            for s in filtered_suggestions(suggestions, options) {
                let _ = writeln!(out, "### {} ({})", s.title, s.priority.as_str());
                let _ = writeln!(
                    out,
                    "*Confidence: {:.0}% · Estimated savings: {:.1}ms · {}:{}*",
                    s.confidence * 100.0,
                    s.estimated_savings.as_millis_f64(),
                    s.target_file.path.display(),
                    s.target_file.line_start
                );
                out.push('\n');
                let _ = writeln!(out, "{}", s.description);
                out.push('\n');
                if let Some(before) = &s.before_code {
                    out.push_str("```cpp\n");
                    out.push_str(&before.code);
                    out.push_str("\n```\n\n");
                }
                if let Some(after) = &s.after_code {
                    out.push_str("```cpp\n");
                    out.push_str(&after.code);
                    out.push_str("\n```\n\n");
                }
                out.push_str("---\n\n");
            }
        }

        Ok(out)
    }
}
