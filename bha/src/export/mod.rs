//! Format-agnostic export pipeline: one [`Exporter`] implementation per
//! output format, sharing the filtering rules in [`ExportOptions`].

pub mod csv_export;
pub mod html;
pub mod json;
pub mod markdown;
pub mod sarif;

use crate::error::{Error, Result};
use crate::model::{AnalysisResult, ExportOptions, Suggestion};
use std::io::Write;
use std::path::Path;

/// Output formats the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
    Csv,
    Markdown,
    Sarif,
}

impl ExportFormat {
    pub fn from_str_loose(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "sarif" => Ok(ExportFormat::Sarif),
            other => Err(Error::invalid_argument(format!("unknown export format '{other}'"))),
        }
    }

    /// Infers a format from an output file's extension.
    pub fn from_extension(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::invalid_argument("output path has no extension"))?;
        Self::from_str_loose(ext)
    }
}

/// Progress reported at stage boundaries: `(current, total, stage)`.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(usize, usize, &str);

/// A writer for one export format.
pub trait Exporter {
    fn format(&self) -> ExportFormat;
    fn file_extension(&self) -> &'static str;
    fn format_name(&self) -> &'static str;

    fn export_to_string(
        &self,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<String>;

    fn export_to_writer(
        &self,
        writer: &mut dyn Write,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<()> {
        let rendered = self.export_to_string(analysis, suggestions, options)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn export_to_file(
        &self,
        path: &Path,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
        mut progress: Option<ProgressCallback<'_>>,
    ) -> Result<()> {
        if let Some(cb) = progress.as_deref_mut() {
            cb(0, 2, "render");
        }
        let rendered = self.export_to_string(analysis, suggestions, options)?;
        if let Some(cb) = progress.as_deref_mut() {
            cb(1, 2, "write");
        }

        let file = std::fs::File::create(path)
            .map_err(|e| Error::from(e).with_context(path.display().to_string()))?;

        if options.compress {
            let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            encoder.write_all(rendered.as_bytes())?;
            encoder.finish()?;
        } else {
            let mut file = file;
            file.write_all(rendered.as_bytes())?;
        }

        if let Some(cb) = progress {
            cb(2, 2, "done");
        }
        Ok(())
    }
}

/// Returns the exporter implementation for `format`.
pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Json => Box::new(json::JsonExporter),
        ExportFormat::Html => Box::new(html::HtmlExporter),
        ExportFormat::Csv => Box::new(csv_export::CsvExporter),
        ExportFormat::Markdown => Box::new(markdown::MarkdownExporter),
        ExportFormat::Sarif => Box::new(sarif::SarifExporter),
    }
}

/// Applies the `min_compile_time`/`max_files` filters shared by every
/// format that renders a file list.
pub(crate) fn filtered_files<'a>(
    analysis: &'a AnalysisResult,
    options: &ExportOptions,
) -> Vec<&'a crate::model::FileAnalysisResult> {
    let mut files: Vec<_> = analysis
        .files
        .iter()
        .filter(|f| f.compile_time >= options.min_compile_time)
        .collect();
    if options.max_files > 0 {
        files.truncate(options.max_files);
    }
    files
}

/// Applies the `min_confidence`/`max_suggestions` filters shared by every
/// format that renders suggestions.
pub(crate) fn filtered_suggestions<'a>(
    suggestions: &'a [Suggestion],
    options: &ExportOptions,
) -> Vec<&'a Suggestion> {
    let mut kept: Vec<_> = suggestions
        .iter()
        .filter(|s| s.confidence >= options.min_confidence)
        .collect();
    if options.max_suggestions > 0 {
        kept.truncate(options.max_suggestions);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension_recognizes_every_known_suffix() {
        assert_eq!(ExportFormat::from_extension(Path::new("r.json")).unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_extension(Path::new("r.html")).unwrap(), ExportFormat::Html);
        assert_eq!(ExportFormat::from_extension(Path::new("r.htm")).unwrap(), ExportFormat::Html);
        assert_eq!(ExportFormat::from_extension(Path::new("r.csv")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_extension(Path::new("r.md")).unwrap(), ExportFormat::Markdown);
    }

    #[test]
    fn unknown_extension_is_an_invalid_argument_error() {
        let err = ExportFormat::from_extension(Path::new("r.xyz")).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidArgument);
    }
}
