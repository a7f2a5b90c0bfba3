//! Recommends adding widely-included, expensive headers to a precompiled
//! header.

use super::{base_suggestion, savings_percent};
use crate::heuristics::HeuristicsConfig;
use crate::model::{
    AnalysisResult, FileAction, FileTarget, Priority, Suggestion, SuggestionType,
};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let cfg = &heuristics.pch;
    let total = analysis.performance.total_build_time;

    analysis
        .pch
        .candidates
        .iter()
        .filter(|c| {
            c.including_files >= cfg.min_include_count
                && c.total_parse_time.as_millis_f64() >= cfg.min_aggregate_time_ms
        })
        .map(|c| {
            let time_ratio = if total.as_nanos() > 0 {
                c.total_parse_time.as_nanos() as f64 / total.as_nanos() as f64
            } else {
                0.0
            };
            let priority = if c.including_files >= cfg.priority.critical_includes
                || time_ratio >= cfg.priority.critical_time_ratio
            {
                Priority::Critical
            } else if c.including_files >= cfg.priority.high_includes
                || time_ratio >= cfg.priority.high_time_ratio
            {
                Priority::High
            } else {
                Priority::Medium
            };

            let confidence = if c.stable { 0.85 } else { 0.6 };

            let mut suggestion = base_suggestion(
                SuggestionType::PchOptimization,
                priority,
                confidence,
                format!("Add {} to the precompiled header", c.path.display()),
                format!(
                    "{} is included by {} translation units and costs {:.1}ms to parse on average.",
                    c.path.display(),
                    c.including_files,
                    c.average_parse_time.as_millis_f64()
                ),
                "Headers included by many translation units amortize parse cost best when precompiled.".to_string(),
                c.estimated_savings,
                savings_percent(c.estimated_savings, total),
                FileTarget::new(c.path.clone(), FileAction::AddInclude),
                true,
            );
            suggestion.implementation_steps = vec![
                format!("Add `#include \"{}\"` to the precompiled header source.", c.path.display()),
                "Rebuild and confirm the precompiled header picks up the new dependency.".to_string(),
            ];
            suggestion.impact.total_files_affected = c.including_files;
            suggestion.impact.cumulative_savings = c.estimated_savings;
            suggestion.verification = "Re-run the build trace and confirm the header's total parse time drops to near zero.".to_string();
            suggestion
        })
        .collect()
}
