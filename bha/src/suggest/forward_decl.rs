//! Recommends forward-declaring headers that are included widely but each
//! inclusion pays a nontrivial, avoidable parse cost.

use super::{base_suggestion, savings_percent};
use crate::heuristics::HeuristicsConfig;
use crate::model::{AnalysisResult, FileAction, FileTarget, Priority, Suggestion, SuggestionType};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let cfg = &heuristics.forward_decl;
    let total = analysis.performance.total_build_time;
    let pch_paths: std::collections::HashSet<_> =
        analysis.pch.candidates.iter().map(|c| c.path.clone()).collect();

    analysis
        .dependencies
        .headers
        .iter()
        .filter(|h| !pch_paths.contains(&h.path))
        .filter(|h| {
            h.including_file_count() >= cfg.min_usage_sites
                && h.total_parse_time.as_millis_f64() / h.inclusion_count.max(1) as f64
                    >= cfg.min_parse_time_ms
        })
        .map(|h| {
            let avg_ms = h.total_parse_time.as_millis_f64() / h.inclusion_count.max(1) as f64;
            let priority = if avg_ms >= cfg.min_parse_time_ms * 4.0 {
                Priority::High
            } else {
                Priority::Medium
            };

            let mut suggestion = base_suggestion(
                SuggestionType::ForwardDeclaration,
                priority,
                0.55,
                format!("Forward-declare types from {}", h.path.display()),
                format!(
                    "{} is included by {} files at {:.1}ms per inclusion; a forward declaration avoids the full header when only pointers or references are used.",
                    h.path.display(),
                    h.including_file_count(),
                    avg_ms
                ),
                "Including a header only to name a pointer or reference type forces a full parse that a forward declaration avoids.".to_string(),
                h.total_parse_time,
                savings_percent(h.total_parse_time, total),
                FileTarget::new(h.path.clone(), FileAction::Modify),
                false,
            );
            suggestion.implementation_steps = vec![
                format!("Replace `#include \"{}\"` with a forward declaration where only pointers/references are used.", h.path.display()),
                "Move the include into the .cpp file that needs the complete type.".to_string(),
            ];
            suggestion.caveats = vec![
                "Only safe where the including translation unit never dereferences, constructs, or sizes the type.".to_string(),
            ];
            suggestion
        })
        .collect()
}
