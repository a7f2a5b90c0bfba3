//! Recommends splitting large, heavily-depended-on headers into smaller
//! units so translation units that need only part of it pay less.

use super::{base_suggestion, savings_percent};
use crate::heuristics::HeuristicsConfig;
use crate::model::{AnalysisResult, FileAction, FileTarget, Priority, Suggestion, SuggestionType};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let cfg = &heuristics.headers;
    let total = analysis.performance.total_build_time;

    analysis
        .dependencies
        .headers
        .iter()
        .filter(|h| h.including_file_count() >= cfg.min_includers_for_split)
        .filter(|h| h.total_parse_time.as_millis_f64() >= cfg.min_parse_time_ms)
        .map(|h| {
            let ms = h.total_parse_time.as_millis_f64();
            let priority = if ms >= cfg.time.critical_ms {
                Priority::Critical
            } else if ms >= cfg.time.high_ms {
                Priority::High
            } else if ms >= cfg.time.medium_ms {
                Priority::Medium
            } else {
                Priority::Low
            };

            let mut suggestion = base_suggestion(
                SuggestionType::HeaderSplit,
                priority,
                0.5,
                format!("Split {} into focused headers", h.path.display()),
                format!(
                    "{} costs {:.1}ms total across {} including files; most of them likely use only a fraction of what it declares.",
                    h.path.display(),
                    ms,
                    h.including_file_count()
                ),
                "A header that bundles unrelated declarations forces every includer to pay for all of them.".to_string(),
                half(h.total_parse_time),
                savings_percent(half(h.total_parse_time), total),
                FileTarget::new(h.path.clone(), FileAction::Modify),
                false,
            );
            suggestion.implementation_steps = vec![
                "Group declarations by the subsystem that uses them.".to_string(),
                "Extract each group into its own header and have the original re-include them for compatibility.".to_string(),
            ];
            suggestion
        })
        .collect()
}

/// Splitting rarely eliminates all of a header's cost for every includer,
/// only the portion each one doesn't need.
fn half(d: crate::model::NanoDuration) -> crate::model::NanoDuration {
    crate::model::NanoDuration(d.as_nanos() / 2)
}
