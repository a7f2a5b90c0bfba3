//! The trace data model: immutable value types describing one build.

use super::scalar::{NanoDuration, SourceLocation, Timestamp};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Compiler front end that produced a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompilerType {
    #[default]
    Unknown,
    Clang,
    Gcc,
    Msvc,
    IntelClassic,
    IntelOneApi,
    Nvcc,
    ArmClang,
    AppleClang,
}

impl CompilerType {
    pub fn as_str(self) -> &'static str {
        match self {
            CompilerType::Unknown => "Unknown",
            CompilerType::Clang => "Clang",
            CompilerType::Gcc => "GCC",
            CompilerType::Msvc => "MSVC",
            CompilerType::IntelClassic => "Intel ICC",
            CompilerType::IntelOneApi => "Intel ICX",
            CompilerType::Nvcc => "NVCC",
            CompilerType::ArmClang => "ARM Clang",
            CompilerType::AppleClang => "Apple Clang",
        }
    }
}

/// Build system that invoked the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildSystemType {
    #[default]
    Unknown,
    CMake,
    Ninja,
    Make,
    MsBuild,
    Bazel,
    Buck2,
    Meson,
    SCons,
    Xcode,
}

/// Breakdown of compilation time by phase. Any field may be zero when the
/// upstream parser did not report it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub preprocessing: NanoDuration,
    pub parsing: NanoDuration,
    pub semantic_analysis: NanoDuration,
    pub template_instantiation: NanoDuration,
    pub code_generation: NanoDuration,
    pub optimization: NanoDuration,
}

impl TimeBreakdown {
    pub fn total(&self) -> NanoDuration {
        self.preprocessing
            + self.parsing
            + self.semantic_analysis
            + self.template_instantiation
            + self.code_generation
            + self.optimization
    }
}

/// Peak/phase-specific memory usage, all in bytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub peak: u64,
    pub frontend_peak: u64,
    pub backend_peak: u64,
    pub max_stack: u64,
    pub parsing_bytes: u64,
    pub semantic_bytes: u64,
    pub codegen_bytes: u64,
    pub ggc_memory: u64,
}

impl MemoryMetrics {
    pub fn has_data(&self) -> bool {
        self.peak > 0 || self.frontend_peak > 0 || self.backend_peak > 0 || self.max_stack > 0
    }
}

/// Per-file compile metrics for a single translation unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub total_time: NanoDuration,
    pub frontend_time: NanoDuration,
    pub backend_time: NanoDuration,
    pub breakdown: TimeBreakdown,
    pub memory: MemoryMetrics,
    pub preprocessed_lines: usize,
    pub expansion_ratio: f64,
    pub direct_includes: usize,
    pub transitive_includes: usize,
    pub max_include_depth: usize,
}

/// One occurrence of a header being included in a translation unit. The
/// same header appearing N times produces N records; repetition is
/// semantically meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeInfo {
    pub header: PathBuf,
    pub parse_time: NanoDuration,
    pub depth: usize,
    pub included_by: Vec<PathBuf>,
    pub symbols_used: Vec<String>,
}

/// A template instantiation observed in a translation unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateInstantiation {
    pub name: String,
    pub full_signature: String,
    pub type_arguments: Vec<String>,
    pub time: NanoDuration,
    pub location: SourceLocation,
    pub count: usize,
}

/// Git repository state at build time. Optional; analyzers never require it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitInfo {
    pub commit_hash: String,
    pub branch: String,
    pub author: String,
    pub email: String,
    pub commit_time: Timestamp,
    pub message: String,
    pub is_dirty: bool,
}

/// A single invocation of the compiler on one source file, produced fully
/// formed by the external parser and immutable thereafter from the
/// engine's view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub source_file: PathBuf,
    pub metrics: FileMetrics,
    pub includes: Vec<IncludeInfo>,
    pub templates: Vec<TemplateInstantiation>,
    pub symbols_defined: Vec<String>,
    pub command_line: Vec<String>,
}

/// Complete build trace data from a single build: the engine's input value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildTrace {
    pub id: String,
    pub timestamp: Timestamp,
    pub total_time: NanoDuration,
    pub compiler: CompilerType,
    pub compiler_version: String,
    pub build_system: BuildSystemType,
    pub configuration: String,
    pub platform: String,
    pub git_info: Option<GitInfo>,
    pub units: Vec<CompilationUnit>,
}

impl BuildTrace {
    pub fn file_count(&self) -> usize {
        self.units.len()
    }

    /// The authoritative total build time: `total_time` when reported,
    /// otherwise the sum of all unit total times.
    pub fn effective_total_time(&self) -> NanoDuration {
        if self.total_time.as_nanos() > 0 {
            self.total_time
        } else {
            self.units.iter().map(|u| u.metrics.total_time).sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_breakdown_totals_all_phases() {
        let b = TimeBreakdown {
            preprocessing: NanoDuration(1),
            parsing: NanoDuration(2),
            semantic_analysis: NanoDuration(3),
            template_instantiation: NanoDuration(4),
            code_generation: NanoDuration(5),
            optimization: NanoDuration(6),
        };
        assert_eq!(b.total(), NanoDuration(21));
    }

    #[test]
    fn effective_total_time_falls_back_to_unit_sum() {
        let mut trace = empty_trace();
        trace.units.push(unit_with_total(NanoDuration(100)));
        trace.units.push(unit_with_total(NanoDuration(200)));
        assert_eq!(trace.effective_total_time(), NanoDuration(300));

        trace.total_time = NanoDuration(1_000);
        assert_eq!(trace.effective_total_time(), NanoDuration(1_000));
    }

    fn unit_with_total(total: NanoDuration) -> CompilationUnit {
        CompilationUnit {
            metrics: FileMetrics {
                total_time: total,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub(crate) fn empty_trace() -> BuildTrace {
        BuildTrace {
            id: "t".into(),
            timestamp: chrono::Utc::now(),
            total_time: NanoDuration::ZERO,
            compiler: CompilerType::Clang,
            compiler_version: "18.0".into(),
            build_system: BuildSystemType::Ninja,
            configuration: "Release".into(),
            platform: "linux-x86_64".into(),
            git_info: None,
            units: Vec::new(),
        }
    }
}
