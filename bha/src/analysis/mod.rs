//! The analyzer pipeline: a registry of independent, pure analyzers whose
//! partial results are merged into one composite [`AnalysisResult`].

pub mod dependency_analyzer;
pub mod file_analyzer;
pub mod pch_analyzer;
pub mod performance_analyzer;
pub mod symbol_analyzer;
pub mod template_analyzer;

use crate::model::scalar::normalize_path;
use crate::model::{AnalysisOptions, AnalysisResult, BuildTrace, DependencyAnalysisResult};
use rustc_hash::FxHashSet;
use std::time::Instant;

type AnalyzerFn = fn(&BuildTrace, &AnalysisOptions) -> AnalysisResult;

struct RegisteredAnalyzer {
    name: &'static str,
    run: AnalyzerFn,
}

/// An ordered set of analyzers to run over a trace. Built with
/// [`AnalyzerRegistry::default_pipeline`] or assembled explicitly for
/// tests that want to exercise a single analyzer through the merge path.
pub struct AnalyzerRegistry {
    analyzers: Vec<RegisteredAnalyzer>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, run: AnalyzerFn) -> &mut Self {
        self.analyzers.push(RegisteredAnalyzer { name, run });
        self
    }

    /// The standard pipeline, gated by the options flags that disable
    /// optional analysis passes.
    pub fn default_pipeline(options: &AnalysisOptions) -> Self {
        let mut registry = Self::new();
        registry.register("files", file_analyzer::analyze as AnalyzerFn);
        registry.register("performance", performance_analyzer::analyze as AnalyzerFn);
        if options.analyze_includes {
            registry.register("dependencies", dependency_analyzer::analyze as AnalyzerFn);
            registry.register("pch", pch_analyzer::analyze as AnalyzerFn);
        }
        if options.analyze_templates {
            registry.register("templates", template_analyzer::analyze as AnalyzerFn);
        }
        if options.analyze_symbols {
            registry.register("symbols", symbol_analyzer::analyze as AnalyzerFn);
        }
        registry
    }

    /// Runs every registered analyzer and merges their partial results.
    /// An analyzer whose pass panics is logged and skipped rather than
    /// aborting the whole run.
    pub fn run(&self, trace: &BuildTrace, options: &AnalysisOptions) -> AnalysisResult {
        let started = Instant::now();
        let mut result = AnalysisResult::default();

        for analyzer in &self.analyzers {
            tracing::debug!(analyzer = analyzer.name, "running analyzer");
            match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                (analyzer.run)(trace, options)
            })) {
                Ok(partial) => merge(&mut result, partial),
                Err(_) => {
                    tracing::warn!(analyzer = analyzer.name, "analyzer panicked, skipping");
                }
            }
        }

        result.analysis_time = Some(chrono::Utc::now());
        result.analysis_duration =
            crate::model::NanoDuration(started.elapsed().as_nanos() as i64);
        result
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the standard analyzer pipeline over `trace`.
pub fn run_full_analysis(trace: &BuildTrace, options: &AnalysisOptions) -> AnalysisResult {
    AnalyzerRegistry::default_pipeline(options).run(trace, options)
}

fn merge(base: &mut AnalysisResult, partial: AnalysisResult) {
    if !partial.files.is_empty() {
        base.files = partial.files;
    }
    if partial.performance.total_build_time.as_nanos() != 0 {
        base.performance = partial.performance;
    }
    if !partial.dependencies.headers.is_empty() || partial.dependencies.total_includes > 0 {
        merge_dependencies(&mut base.dependencies, partial.dependencies);
    }
    if !partial.templates.templates.is_empty() {
        base.templates = partial.templates;
    }
    if !partial.symbols.symbols.is_empty() {
        base.symbols = partial.symbols;
    }
    if !partial.pch.candidates.is_empty() {
        base.pch = partial.pch;
    }
}

fn merge_dependencies(base: &mut DependencyAnalysisResult, partial: DependencyAnalysisResult) {
    if base.headers.is_empty() {
        *base = partial;
        return;
    }

    let existing: FxHashSet<String> = base.headers.iter().map(|h| normalize_path(&h.path)).collect();
    for header in partial.headers {
        if !existing.contains(&normalize_path(&header.path)) {
            base.headers.push(header);
        }
    }
    base.total_includes += partial.total_includes;
    base.unique_headers = base.headers.len();
    base.max_include_depth = base.max_include_depth.max(partial.max_include_depth);
    base.total_include_time = base.total_include_time + partial.total_include_time;
    for cycle in partial.circular_dependencies {
        if !base.circular_dependencies.contains(&cycle) {
            base.circular_dependencies.push(cycle);
        }
    }
}
