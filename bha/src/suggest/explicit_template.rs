//! Recommends explicit template instantiation for templates that are
//! instantiated often enough to dominate build time.

use super::{base_suggestion, savings_percent};
use crate::heuristics::HeuristicsConfig;
use crate::model::{AnalysisResult, FileAction, FileTarget, Priority, Suggestion, SuggestionType};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let cfg = &heuristics.templates;
    let total = analysis.performance.total_build_time;

    analysis
        .templates
        .templates
        .iter()
        .filter(|t| {
            t.instantiation_count >= cfg.min_instantiation_count
                && t.total_time.as_millis_f64() >= cfg.min_total_time_ms
        })
        .map(|t| {
            let priority = if t.time_percent >= cfg.high_priority_percent {
                Priority::High
            } else {
                Priority::Medium
            };
            let location = t.locations.first().cloned().unwrap_or_default();

            let mut suggestion = base_suggestion(
                SuggestionType::ExplicitTemplate,
                priority,
                0.6,
                format!("Explicitly instantiate {}", t.signature),
                format!(
                    "{} is instantiated {} times for {:.1}ms total; explicit instantiation in one translation unit avoids repeating the work in every includer.",
                    t.signature, t.instantiation_count, t.total_time.as_millis_f64()
                ),
                "Implicit template instantiation repeats codegen in every translation unit that uses the specialization.".to_string(),
                t.total_time,
                savings_percent(t.total_time, total),
                FileTarget::new(location.path, FileAction::Modify),
                true,
            );
            suggestion.implementation_steps = vec![
                format!("Add `template {};` for {} in one .cpp file.", t.signature, t.signature),
                "Declare `extern template ...;` in the header to suppress implicit instantiation elsewhere.".to_string(),
            ];
            suggestion
        })
        .collect()
}
