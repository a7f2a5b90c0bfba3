//! Structural suggestion families that don't warrant their own module:
//! each recognizes a distinct shape in the analysis and, at most, emits
//! one suggestion per build.

use super::{base_suggestion, savings_percent};
use crate::heuristics::HeuristicsConfig;
use crate::model::{
    AnalysisResult, FileAction, FileTarget, Linkage, NanoDuration, Priority, Suggestion,
    SuggestionType, SymbolKind,
};

pub fn generate(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    suggestions.extend(module_migration(analysis));
    suggestions.extend(inline_reduction(analysis, heuristics));
    suggestions.extend(compilation_firewall(analysis, heuristics));
    suggestions.extend(dependency_inversion(analysis, heuristics));
    suggestions.extend(symbol_visibility(analysis));
    suggestions.extend(pimpl_pattern(analysis, heuristics));
    suggestions
}

/// When headers dominate build time broadly, migrating the hottest ones to
/// C++20 modules removes repeated textual parsing entirely.
fn module_migration(analysis: &AnalysisResult) -> Option<Suggestion> {
    let total = analysis.performance.total_build_time;
    if total.as_nanos() == 0 {
        return None;
    }
    let ratio = analysis.dependencies.total_include_time.as_nanos() as f64 / total.as_nanos() as f64;
    if ratio < 0.5 || analysis.dependencies.headers.is_empty() {
        return None;
    }

    let mut suggestion = base_suggestion(
        SuggestionType::ModuleMigration,
        Priority::Low,
        0.35,
        "Consider migrating hot headers to C++20 modules",
        format!(
            "Header parsing is {:.0}% of total build time; modules parse a header's interface once per build instead of once per translation unit.",
            ratio * 100.0
        ),
        "Modules replace textual inclusion with a binary interface, eliminating repeated re-parsing.".to_string(),
        analysis.dependencies.total_include_time,
        savings_percent(analysis.dependencies.total_include_time, total),
        FileTarget::new("CMakeLists.txt", FileAction::Modify),
        false,
    );
    suggestion.caveats = vec!["Requires compiler and build-system module support; a larger migration than other suggestions here.".to_string()];
    Some(suggestion)
}

/// Aggregate inline/template bloat into a single structural suggestion
/// rather than one per symbol.
fn inline_reduction(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Option<Suggestion> {
    let mut bloated: Vec<_> = analysis
        .symbols
        .symbols
        .iter()
        .filter(|s| matches!(s.linkage, Linkage::Inline | Linkage::Template))
        .filter(|s| s.bloat_score >= heuristics.codegen.inline_warning_threshold_ms)
        .collect();
    if bloated.is_empty() {
        return None;
    }
    bloated.sort_by(|a, b| b.bloat_score.partial_cmp(&a.bloat_score).unwrap());

    let mut suggestion = base_suggestion(
        SuggestionType::InlineReduction,
        Priority::Medium,
        0.45,
        "Reduce inline and template bloat",
        format!(
            "{} inline/template symbols exceed the bloat threshold; the top offender is {}.",
            bloated.len(),
            bloated[0].name
        ),
        "Aggressive inlining and template reuse multiply codegen across translation units.".to_string(),
        NanoDuration::ZERO,
        0.0,
        FileTarget::new(bloated[0].defined_in.first().cloned().unwrap_or_default(), FileAction::Modify),
        false,
    );
    suggestion.implementation_steps = vec![
        "Review the highest bloat-score symbols for unnecessary inlining or template instantiation.".to_string(),
    ];
    Some(suggestion)
}

/// A header included by many files that also costs a lot to parse is a
/// natural point to introduce a compilation firewall.
fn compilation_firewall(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Option<Suggestion> {
    let candidate = analysis
        .dependencies
        .headers
        .iter()
        .filter(|h| h.including_file_count() >= heuristics.headers.min_includers_for_split * 2)
        .filter(|h| h.total_parse_time.as_millis_f64() >= heuristics.headers.time.high_ms)
        .max_by(|a, b| a.impact_score.partial_cmp(&b.impact_score).unwrap())?;

    let mut suggestion = base_suggestion(
        SuggestionType::CompilationFirewall,
        Priority::High,
        0.4,
        format!("Introduce a compilation firewall around {}", candidate.path.display()),
        format!(
            "{} reaches {} translation units; isolating its implementation details behind a stable interface stops changes there from cascading rebuilds.",
            candidate.path.display(),
            candidate.including_file_count()
        ),
        "A widely-depended-on header couples every includer to its implementation details.".to_string(),
        candidate.total_parse_time,
        savings_percent(candidate.total_parse_time, analysis.performance.total_build_time),
        FileTarget::new(candidate.path.clone(), FileAction::Modify),
        false,
    );
    suggestion.caveats = vec!["A structural change; expect to touch every includer's build dependency graph.".to_string()];
    Some(suggestion)
}

/// A header that is both heavily included and itself expensive suggests a
/// missing abstraction boundary: invert the dependency instead of
/// deepening it.
fn dependency_inversion(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Option<Suggestion> {
    let candidate = analysis
        .dependencies
        .headers
        .iter()
        .filter(|h| h.including_file_count() >= heuristics.headers.min_includers_for_split)
        .filter(|h| h.impact_score > 0.0)
        .max_by(|a, b| a.impact_score.partial_cmp(&b.impact_score).unwrap())?;
    if candidate.including_file_count() < heuristics.pch.priority.high_includes {
        return None;
    }

    let mut suggestion = base_suggestion(
        SuggestionType::DependencyInversion,
        Priority::Medium,
        0.35,
        format!("Invert the dependency on {}", candidate.path.display()),
        format!(
            "{} is a high-fan-in header; depending on an abstract interface instead lets includers avoid its concrete cost.",
            candidate.path.display()
        ),
        "High fan-in combined with high parse cost is a sign the header should be behind an interface, not included directly.".to_string(),
        NanoDuration::ZERO,
        0.0,
        FileTarget::new(candidate.path.clone(), FileAction::Modify),
        false,
    );
    suggestion.implementation_steps = vec!["Extract an abstract interface and depend on it instead of the concrete header.".to_string()];
    Some(suggestion)
}

/// External symbols that are referenced from only their own defining unit
/// are candidates for tightening visibility.
fn symbol_visibility(analysis: &AnalysisResult) -> Option<Suggestion> {
    let candidates: Vec<_> = analysis
        .symbols
        .symbols
        .iter()
        .filter(|s| s.linkage == Linkage::External)
        .filter(|s| !s.odr_violation)
        .filter(|s| s.usage_count <= 1)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let mut suggestion = base_suggestion(
        SuggestionType::SymbolVisibility,
        Priority::Low,
        0.3,
        "Tighten visibility of rarely-used external symbols",
        format!(
            "{} external symbols are referenced from at most one translation unit and could be marked internal.",
            candidates.len()
        ),
        "External linkage symbols that nothing outside their own unit uses still bloat the symbol table and slow the linker.".to_string(),
        NanoDuration::ZERO,
        0.0,
        FileTarget::new(candidates[0].defined_in.first().cloned().unwrap_or_default(), FileAction::Modify),
        false,
    );
    suggestion.implementation_steps = vec!["Mark each candidate `static` or move it into an anonymous namespace.".to_string()];
    Some(suggestion)
}

/// A type with a large, widely-included header footprint benefits from
/// the pointer-to-implementation pattern.
fn pimpl_pattern(analysis: &AnalysisResult, heuristics: &HeuristicsConfig) -> Option<Suggestion> {
    let hot_headers: std::collections::HashSet<_> = analysis
        .dependencies
        .headers
        .iter()
        .filter(|h| h.including_file_count() >= heuristics.headers.min_includers_for_split)
        .map(|h| h.path.clone())
        .collect();

    let candidate = analysis
        .symbols
        .symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::TypeClass)
        .find(|s| s.defined_in.iter().any(|p| hot_headers.contains(p)))?;

    let mut suggestion = base_suggestion(
        SuggestionType::PimplPattern,
        Priority::Medium,
        0.35,
        format!("Apply the PIMPL pattern to {}", candidate.name),
        format!(
            "{} lives in a widely-included header; hiding its private members behind a pointer-to-implementation removes them from the public interface includers pay to parse.",
            candidate.name
        ),
        "A class defined in a hot header forces every includer to re-parse its private implementation details.".to_string(),
        NanoDuration::ZERO,
        0.0,
        FileTarget::new(candidate.defined_in.first().cloned().unwrap_or_default(), FileAction::Modify),
        false,
    );
    suggestion.caveats = vec!["Adds an indirection and a heap allocation per instance.".to_string()];
    Some(suggestion)
}
