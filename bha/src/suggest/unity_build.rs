//! Recommends grouping small translation units into unity (jumbo) build
//! batches when header parsing dominates build time.

use super::base_suggestion;
use crate::heuristics::HeuristicsConfig;
use crate::model::{AnalysisResult, FileAction, FileTarget, Priority, Suggestion, SuggestionType};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let cfg = &heuristics.unity_build;
    let total_files = analysis.performance.total_files;
    if total_files < cfg.min_files_threshold {
        return Vec::new();
    }

    let total_time = analysis.performance.total_build_time;
    let header_ratio = if total_time.as_nanos() > 0 {
        analysis.dependencies.total_include_time.as_nanos() as f64 / total_time.as_nanos() as f64
    } else {
        0.0
    };
    if header_ratio < cfg.header_parsing_ratio {
        return Vec::new();
    }

    let units_estimate = total_files.div_ceil(cfg.files_per_unit).max(1);
    let estimated_savings = crate::model::NanoDuration(
        (analysis.dependencies.total_include_time.as_nanos() as f64 * 0.6) as i64,
    );

    let mut suggestion = base_suggestion(
        SuggestionType::UnityBuild,
        Priority::Medium,
        0.45,
        "Group translation units into unity build batches",
        format!(
            "Header parsing accounts for {:.0}% of build time across {} files; batching ~{} files per unity translation unit amortizes that cost.",
            header_ratio * 100.0,
            total_files,
            cfg.files_per_unit
        ),
        "A unity build parses each shared header once per batch instead of once per file.".to_string(),
        estimated_savings,
        header_ratio * 100.0 * 0.6,
        FileTarget::new("CMakeLists.txt", FileAction::Modify),
        false,
    );
    suggestion.implementation_steps = vec![
        format!("Partition the {total_files} translation units into roughly {units_estimate} batches of {} files.", cfg.files_per_unit),
        "Generate one .cpp per batch that #includes its member files.".to_string(),
        "Exclude files with conflicting static/anonymous-namespace symbols from sharing a batch.".to_string(),
    ];
    suggestion.caveats = vec![
        "Unity builds can surface previously-hidden ODR violations between batched files.".to_string(),
        "Incremental rebuilds become coarser-grained.".to_string(),
    ];
    vec![suggestion]
}
