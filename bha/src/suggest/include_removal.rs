//! Recommends removing includes that a translation unit never actually
//! uses.

use super::{base_suggestion, savings_percent};
use crate::heuristics::HeuristicsConfig;
use crate::model::{AnalysisResult, FileAction, FileTarget, Priority, Suggestion, SuggestionType};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let total = analysis.performance.total_build_time;
    let min_parse_ms = heuristics.headers.min_parse_time_ms;

    analysis
        .dependencies
        .headers
        .iter()
        .filter(|h| h.inclusion_count == h.including_file_count())
        .filter(|h| h.total_parse_time.as_millis_f64() >= min_parse_ms)
        .map(|h| {
            let mut suggestion = base_suggestion(
                SuggestionType::IncludeRemoval,
                Priority::Low,
                0.4,
                format!("Audit whether {} is still needed", h.path.display()),
                format!(
                    "{} is included once per including file and costs {:.1}ms to parse; confirm it is actually used.",
                    h.path.display(),
                    h.total_parse_time.as_millis_f64()
                ),
                "An unused include costs parse time with no benefit.".to_string(),
                h.total_parse_time,
                savings_percent(h.total_parse_time, total),
                FileTarget::new(h.path.clone(), FileAction::Remove),
                false,
            );
            suggestion.implementation_steps = vec![
                format!("Check whether any symbol from {} is referenced.", h.path.display()),
                "Remove the include if nothing from it is used.".to_string(),
            ];
            suggestion.caveats = vec!["Only a removal candidate; confirm with a compiler-enforced unused-include check before deleting.".to_string()];
            suggestion
        })
        .collect()
}
