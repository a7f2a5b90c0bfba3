//! Generates actionable optimization suggestions from an [`AnalysisResult`].
//!
//! Each generator is a pure function over the analysis and the tunable
//! [`HeuristicsConfig`]; [`generate_suggestions`] runs all of them, assigns
//! stable ids, and applies the caller's filtering and ranking policy.

pub mod explicit_template;
pub mod fingerprint;
pub mod forward_decl;
pub mod header_split;
pub mod include_removal;
pub mod move_to_cpp;
pub mod pch;
pub mod unity_build;

use crate::heuristics::HeuristicsConfig;
use crate::model::{
    AnalysisResult, CodeExample, FileTarget, Impact, NanoDuration, Priority, Suggestion,
    SuggestionType, SuggesterOptions,
};

type GeneratorFn = fn(&AnalysisResult, &HeuristicsConfig) -> Vec<Suggestion>;

/// An ordered set of suggestion generators.
pub struct SuggesterRegistry {
    generators: Vec<GeneratorFn>,
}

impl SuggesterRegistry {
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    pub fn register(&mut self, generator: GeneratorFn) -> &mut Self {
        self.generators.push(generator);
        self
    }

    pub fn default_pipeline() -> Self {
        let mut registry = Self::new();
        registry
            .register(pch::generate)
            .register(forward_decl::generate)
            .register(header_split::generate)
            .register(include_removal::generate)
            .register(move_to_cpp::generate)
            .register(explicit_template::generate)
            .register(unity_build::generate)
            .register(fingerprint::generate);
        registry
    }

    pub fn collect(&self, analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
        self.generators
            .iter()
            .flat_map(|generate| generate(analysis, heuristics))
            .collect()
    }
}

impl Default for SuggesterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the full suggestion pipeline and applies priority/confidence/safety
/// filtering, enabled-type filtering, and priority-then-savings ranking.
pub fn generate_suggestions(analysis: &AnalysisResult, options: &SuggesterOptions) -> Vec<Suggestion> {
    let mut all = SuggesterRegistry::default_pipeline().collect(analysis, &options.heuristics);
    for (idx, suggestion) in all.iter_mut().enumerate() {
        suggestion.id = format!("BHA-{:04}", idx + 1);
    }

    let mut filtered: Vec<Suggestion> = all
        .into_iter()
        .filter(|s| s.priority <= options.min_priority)
        .filter(|s| s.confidence >= options.min_confidence)
        .filter(|s| options.include_unsafe || s.is_safe)
        .filter(|s| options.enabled_types.is_empty() || options.enabled_types.contains(&s.suggestion_type))
        .collect();

    filtered.sort_by(|a, b| a.priority.cmp(&b.priority).then(b.estimated_savings.cmp(&a.estimated_savings)));
    filtered.truncate(options.max_suggestions);
    filtered
}

/// Builds a `Suggestion` with the common bookkeeping fields defaulted; the
/// id is assigned later by [`generate_suggestions`].
pub(crate) fn base_suggestion(
    suggestion_type: SuggestionType,
    priority: Priority,
    confidence: f64,
    title: impl Into<String>,
    description: impl Into<String>,
    rationale: impl Into<String>,
    estimated_savings: NanoDuration,
    estimated_savings_percent: f64,
    target_file: FileTarget,
    is_safe: bool,
) -> Suggestion {
    Suggestion {
        id: String::new(),
        suggestion_type,
        priority,
        confidence,
        title: title.into(),
        description: description.into(),
        rationale: rationale.into(),
        estimated_savings,
        estimated_savings_percent,
        target_file,
        secondary_files: Vec::new(),
        before_code: None,
        after_code: None,
        implementation_steps: Vec::new(),
        impact: Impact::default(),
        caveats: Vec::new(),
        verification: String::new(),
        documentation_link: None,
        is_safe,
    }
}

pub(crate) fn savings_percent(savings: NanoDuration, total: NanoDuration) -> f64 {
    if total.as_nanos() > 0 {
        100.0 * savings.as_nanos() as f64 / total.as_nanos() as f64
    } else {
        0.0
    }
}

pub(crate) fn code_example(file: impl Into<std::path::PathBuf>, line: usize, code: impl Into<String>) -> CodeExample {
    CodeExample {
        file: file.into(),
        line,
        code: code.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisOptions, FileAction};

    fn trace_with_hot_pch_candidate() -> crate::model::BuildTrace {
        let mut trace = crate::test_support::empty_trace();
        for idx in 0..12 {
            trace.units.push(crate::model::CompilationUnit {
                source_file: format!("u{idx}.cpp").into(),
                metrics: crate::model::FileMetrics {
                    total_time: NanoDuration::from_millis(200.0),
                    ..Default::default()
                },
                includes: vec![crate::model::IncludeInfo {
                    header: "shared.h".into(),
                    parse_time: NanoDuration::from_millis(60.0),
                    ..Default::default()
                }],
                ..Default::default()
            });
        }
        trace
    }

    #[test]
    fn pipeline_produces_ranked_filtered_suggestions() {
        let trace = trace_with_hot_pch_candidate();
        let analysis = crate::analysis::run_full_analysis(&trace, &AnalysisOptions::default());
        let suggestions = generate_suggestions(&analysis, &SuggesterOptions::default());
        assert!(!suggestions.is_empty());
        for w in suggestions.windows(2) {
            assert!(w[0].priority <= w[1].priority);
        }
        for s in &suggestions {
            assert!(!s.id.is_empty());
        }
    }

    #[test]
    fn min_confidence_filters_out_low_confidence_suggestions() {
        let trace = trace_with_hot_pch_candidate();
        let analysis = crate::analysis::run_full_analysis(&trace, &AnalysisOptions::default());
        let mut options = SuggesterOptions::default();
        options.min_confidence = 1.1;
        let suggestions = generate_suggestions(&analysis, &options);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn enabled_types_restricts_output() {
        let trace = trace_with_hot_pch_candidate();
        let analysis = crate::analysis::run_full_analysis(&trace, &AnalysisOptions::default());
        let mut options = SuggesterOptions::default();
        options.enabled_types = vec![SuggestionType::PchOptimization];
        let suggestions = generate_suggestions(&analysis, &options);
        assert!(suggestions.iter().all(|s| s.suggestion_type == SuggestionType::PchOptimization));
    }

    #[test]
    fn base_suggestion_leaves_id_blank_for_later_assignment() {
        let s = base_suggestion(
            SuggestionType::PchOptimization,
            Priority::Medium,
            0.5,
            "t",
            "d",
            "r",
            NanoDuration::ZERO,
            0.0,
            FileTarget::new("x.h", FileAction::AddInclude),
            true,
        );
        assert!(s.id.is_empty());
    }
}
