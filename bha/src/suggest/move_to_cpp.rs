//! Recommends moving bloated inline function bodies out of headers and
//! into a single translation unit.

use super::base_suggestion;
use crate::heuristics::HeuristicsConfig;
use crate::model::{
    AnalysisResult, FileAction, FileTarget, Linkage, NanoDuration, Priority, Suggestion,
    SuggestionType, SymbolKind,
};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let threshold = heuristics.codegen.inline_warning_threshold_ms;

    analysis
        .symbols
        .symbols
        .iter()
        .filter(|s| s.linkage == Linkage::Inline)
        .filter(|s| matches!(s.kind, SymbolKind::Function | SymbolKind::Method))
        .filter(|s| s.bloat_score >= threshold / 10.0)
        .map(|s| {
            let priority = if s.bloat_score >= threshold * 2.0 {
                Priority::High
            } else {
                Priority::Medium
            };
            let target = s.defined_in.first().cloned().unwrap_or_default();

            let mut suggestion = base_suggestion(
                SuggestionType::MoveToCpp,
                priority,
                0.5,
                format!("Move {} out of the header", s.name),
                format!(
                    "{} is inline with a bloat score of {:.1}; every translation unit that includes its header re-parses and re-instantiates it.",
                    s.name, s.bloat_score
                ),
                "Non-trivial inline functions gain nothing from inlining across translation units but cost every one of them parse time.".to_string(),
                NanoDuration::ZERO,
                0.0,
                FileTarget::new(target, FileAction::Modify),
                false,
            );
            suggestion.implementation_steps = vec![
                format!("Move the definition of {} to the matching .cpp file.", s.name),
                "Leave only the declaration in the header.".to_string(),
            ];
            suggestion
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SymbolAnalysisResult, SymbolStat};

    fn analysis_with_symbol(bloat_score: f64) -> AnalysisResult {
        AnalysisResult {
            symbols: SymbolAnalysisResult {
                symbols: vec![SymbolStat {
                    name: "Widget::render".into(),
                    kind: SymbolKind::Method,
                    linkage: Linkage::Inline,
                    defined_in: vec!["widget.h".into()],
                    usage_count: 3,
                    bloat_score,
                    odr_violation: false,
                }],
                total_symbols: 1,
                unused_symbols: 0,
                odr_violations: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn low_bloat_inline_is_ignored() {
        let analysis = analysis_with_symbol(1.0);
        assert!(generate(&analysis, &HeuristicsConfig::default()).is_empty());
    }

    #[test]
    fn high_bloat_inline_is_flagged() {
        let analysis = analysis_with_symbol(50.0);
        let suggestions = generate(&analysis, &HeuristicsConfig::default());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggestion_type, SuggestionType::MoveToCpp);
    }
}
