//! Aggregated facts produced by the analyzer pipeline.

use super::scalar::{NanoDuration, SourceLocation, Timestamp};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One translation unit's contribution to the build, ranked by compile time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnalysisResult {
    pub path: PathBuf,
    pub compile_time: NanoDuration,
    pub frontend_time: NanoDuration,
    pub backend_time: NanoDuration,
    pub time_percent: f64,
    pub rank: usize,
    pub direct_includes: usize,
    pub transitive_includes: usize,
}

/// Build-wide timing and memory summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceAnalysisResult {
    pub total_files: usize,
    pub total_build_time: NanoDuration,
    pub sequential_time: NanoDuration,
    pub parallelism_efficiency: f64,
    pub p50_compile_time: NanoDuration,
    pub p90_compile_time: NanoDuration,
    pub p99_compile_time: NanoDuration,
    pub average_compile_time: NanoDuration,
    pub slowest_files: Vec<FileAnalysisResult>,
    pub total_peak_memory: u64,
    pub average_peak_memory: u64,
}

/// Aggregated per-header facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderStat {
    pub path: PathBuf,
    pub total_parse_time: NanoDuration,
    pub inclusion_count: usize,
    pub including_files: Vec<PathBuf>,
    pub impact_score: f64,
}

impl HeaderStat {
    pub fn including_file_count(&self) -> usize {
        self.including_files.len()
    }
}

/// Dependency-graph-wide statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyAnalysisResult {
    pub headers: Vec<HeaderStat>,
    pub total_includes: usize,
    pub unique_headers: usize,
    pub max_include_depth: usize,
    pub total_include_time: NanoDuration,
    pub circular_dependencies: Vec<Vec<PathBuf>>,
}

/// Aggregated per-template-signature facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateStat {
    pub signature: String,
    pub name: String,
    pub total_time: NanoDuration,
    pub instantiation_count: usize,
    pub locations: Vec<SourceLocation>,
    pub time_percent: f64,
}

/// Template-instantiation-wide statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateAnalysisResult {
    pub templates: Vec<TemplateStat>,
    pub total_instantiations: usize,
    pub total_time: NanoDuration,
    pub template_time_percent: f64,
}

/// Classification of a symbol's declared form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Function,
    Method,
    Constructor,
    Destructor,
    Operator,
    TypeClass,
    TemplateFunction,
    TemplateClass,
    MacroOrConstant,
    Variable,
}

/// Inferred linkage of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Linkage {
    Internal,
    Inline,
    Template,
    External,
}

/// Aggregated facts about one defined symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolStat {
    pub name: String,
    pub kind: SymbolKind,
    pub linkage: Linkage,
    pub defined_in: Vec<PathBuf>,
    pub usage_count: usize,
    pub bloat_score: f64,
    pub odr_violation: bool,
}

/// Symbol-table-wide statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolAnalysisResult {
    pub symbols: Vec<SymbolStat>,
    pub total_symbols: usize,
    pub unused_symbols: usize,
    pub odr_violations: usize,
}

/// A PCH candidate header with its score and estimated savings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PchCandidate {
    pub path: PathBuf,
    pub inclusion_count: usize,
    pub including_files: usize,
    pub total_parse_time: NanoDuration,
    pub average_parse_time: NanoDuration,
    pub stable: bool,
    pub pch_score: f64,
    pub estimated_savings: NanoDuration,
}

/// PCH-candidacy-wide statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PchAnalysisResult {
    pub candidates: Vec<PchCandidate>,
    pub potential_savings: NanoDuration,
}

/// The composite result of running the full analyzer pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub performance: PerformanceAnalysisResult,
    pub files: Vec<FileAnalysisResult>,
    pub dependencies: DependencyAnalysisResult,
    pub templates: TemplateAnalysisResult,
    pub symbols: SymbolAnalysisResult,
    pub pch: PchAnalysisResult,
    pub analysis_time: Option<Timestamp>,
    pub analysis_duration: NanoDuration,
}
