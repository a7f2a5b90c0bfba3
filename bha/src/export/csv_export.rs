//! Two-section CSV export: a Files table and a Suggestions table, each
//! RFC-4180-escaped via the `csv` crate.

use super::{filtered_files, filtered_suggestions, Exporter, ExportFormat};
use crate::error::Result;
use crate::model::{AnalysisResult, ExportOptions, Suggestion};

pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }

    fn export_to_string(
        &self,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<String> {
        let mut out = String::new();

        out.push_str("# Files\n");
        out.push_str(&files_section(analysis, options)?);

        if options.include_suggestions {
            out.push('\n');
            out.push_str("# Suggestions\n");
            out.push_str(&suggestions_section(suggestions, options)?);
        }

        Ok(out)
    }
}

fn files_section(analysis: &AnalysisResult, options: &ExportOptions) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record([
        "path",
        "rank",
        "total_time_ms",
        "frontend_time_ms",
        "backend_time_ms",
        "time_percent",
        "direct_includes",
        "transitive_includes",
    ])?;
    for file in filtered_files(analysis, options) {
        writer.write_record([
            file.path.display().to_string(),
            file.rank.to_string(),
            format!("{:.3}", file.compile_time.as_millis_f64()),
            format!("{:.3}", file.frontend_time.as_millis_f64()),
            format!("{:.3}", file.backend_time.as_millis_f64()),
            format!("{:.3}", file.time_percent),
            file.direct_includes.to_string(),
            file.transitive_includes.to_string(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| crate::error::Error::io_error(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn suggestions_section(suggestions: &[Suggestion], options: &ExportOptions) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record([
        "type",
        "priority",
        "confidence",
        "title",
        "target_file",
        "target_line",
        "estimated_savings_ms",
        "is_safe",
        "description",
    ])?;
    for s in filtered_suggestions(suggestions, options) {
        writer.write_record([
            s.suggestion_type.as_str().to_string(),
            s.priority.as_str().to_string(),
            format!("{:.2}", s.confidence),
            s.title.clone(),
            s.target_file.path.display().to_string(),
            s.target_file.line_start.to_string(),
            format!("{:.3}", s.estimated_savings.as_millis_f64()),
            s.is_safe.to_string(),
            s.description.clone(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| crate::error::Error::io_error(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileAction, FileTarget, Impact, Priority, SuggestionType};

    fn sample_suggestion_with_comma() -> Suggestion {
        Suggestion {
            id: "BHA-0001".into(),
            suggestion_type: SuggestionType::PchOptimization,
            priority: Priority::High,
            confidence: 0.9,
            title: "Title, with a comma".into(),
            description: "desc with \"quotes\"".into(),
            rationale: String::new(),
            estimated_savings: crate::model::NanoDuration::from_millis(10.0),
            estimated_savings_percent: 1.0,
            target_file: FileTarget::new("a.h", FileAction::AddInclude),
            secondary_files: Vec::new(),
            before_code: None,
            after_code: None,
            implementation_steps: Vec::new(),
            impact: Impact::default(),
            caveats: Vec::new(),
            verification: String::new(),
            documentation_link: None,
            is_safe: true,
        }
    }

    #[test]
    fn has_two_sections_with_header_comments() {
        let trace = crate::test_support::empty_trace();
        let analysis = crate::analysis::run_full_analysis(&trace, &Default::default());
        let exporter = CsvExporter;
        let rendered = exporter
            .export_to_string(&analysis, &[sample_suggestion_with_comma()], &ExportOptions::default())
            .unwrap();
        assert!(rendered.contains("# Files"));
        assert!(rendered.contains("# Suggestions"));
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let trace = crate::test_support::empty_trace();
        let analysis = crate::analysis::run_full_analysis(&trace, &Default::default());
        let exporter = CsvExporter;
        let rendered = exporter
            .export_to_string(&analysis, &[sample_suggestion_with_comma()], &ExportOptions::default())
            .unwrap();
        assert!(rendered.contains("\"Title, with a comma\""));
        assert!(rendered.contains("\"\"quotes\"\""));
    }
}
