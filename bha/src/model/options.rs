//! Caller-supplied knobs for analysis, suggestion generation and export.

use super::scalar::NanoDuration;
use super::suggestion::{Priority, SuggestionType};
use crate::heuristics::HeuristicsConfig;

/// Options controlling the analyzer pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// 0 means "implementation-chosen".
    pub max_threads: usize,
    pub min_duration_threshold: NanoDuration,
    pub analyze_templates: bool,
    pub analyze_includes: bool,
    pub analyze_symbols: bool,
    pub verbose: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_threads: 0,
            min_duration_threshold: NanoDuration::from_millis(10.0),
            analyze_templates: true,
            analyze_includes: true,
            analyze_symbols: true,
            verbose: false,
        }
    }
}

/// Options controlling suggestion generation, filtering and ranking.
#[derive(Debug, Clone)]
pub struct SuggesterOptions {
    pub max_suggestions: usize,
    pub min_priority: Priority,
    pub min_confidence: f64,
    pub include_unsafe: bool,
    pub enabled_types: Vec<SuggestionType>,
    pub heuristics: HeuristicsConfig,
}

impl Default for SuggesterOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 100,
            min_priority: Priority::Low,
            min_confidence: 0.5,
            include_unsafe: false,
            enabled_types: Vec::new(),
            heuristics: HeuristicsConfig::default(),
        }
    }
}

/// Options controlling export format, filtering, and presentation.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub pretty_print: bool,
    pub include_metadata: bool,
    pub compress: bool,
    pub include_file_details: bool,
    pub include_dependencies: bool,
    pub include_templates: bool,
    pub include_symbols: bool,
    pub include_suggestions: bool,
    pub include_timing: bool,
    pub min_compile_time: NanoDuration,
    pub min_confidence: f64,
    /// 0 means unlimited.
    pub max_files: usize,
    /// 0 means unlimited.
    pub max_suggestions: usize,
    pub html_interactive: bool,
    pub html_offline: bool,
    pub html_dark_mode: bool,
    pub html_title: String,
    pub json_schema_version: String,
    pub json_streaming: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty_print: true,
            include_metadata: true,
            compress: false,
            include_file_details: true,
            include_dependencies: true,
            include_templates: true,
            include_symbols: true,
            include_suggestions: true,
            include_timing: true,
            min_compile_time: NanoDuration::ZERO,
            min_confidence: 0.0,
            max_files: 0,
            max_suggestions: 0,
            html_interactive: true,
            html_offline: false,
            html_dark_mode: false,
            html_title: "Build Hotspot Analysis".to_string(),
            json_schema_version: "1.0.0".to_string(),
            json_streaming: false,
        }
    }
}
