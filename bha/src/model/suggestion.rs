//! Optimization suggestions produced by the suggestion engine.

use super::scalar::NanoDuration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of optimization a suggestion recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionType {
    ForwardDeclaration,
    HeaderSplit,
    PchOptimization,
    PimplPattern,
    IncludeRemoval,
    MoveToCpp,
    ExplicitTemplate,
    UnityBuild,
    ModuleMigration,
    InlineReduction,
    CompilationFirewall,
    DependencyInversion,
    SymbolVisibility,
}

impl SuggestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionType::ForwardDeclaration => "Forward Declaration",
            SuggestionType::HeaderSplit => "Header Split",
            SuggestionType::PchOptimization => "PCH Optimization",
            SuggestionType::PimplPattern => "PIMPL Pattern",
            SuggestionType::IncludeRemoval => "Include Removal",
            SuggestionType::MoveToCpp => "Move to CPP",
            SuggestionType::ExplicitTemplate => "Explicit Template",
            SuggestionType::UnityBuild => "Unity Build",
            SuggestionType::ModuleMigration => "Module Migration",
            SuggestionType::InlineReduction => "Inline Reduction",
            SuggestionType::CompilationFirewall => "Compilation Firewall",
            SuggestionType::DependencyInversion => "Dependency Inversion",
            SuggestionType::SymbolVisibility => "Symbol Visibility",
        }
    }
}

/// Priority level for a suggestion. Ordered `Critical < High < Medium < Low`
/// so that ascending sort puts the most urgent suggestions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Action a `FileTarget` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileAction {
    Modify,
    AddInclude,
    Remove,
    Create,
}

impl FileAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FileAction::Modify => "MODIFY",
            FileAction::AddInclude => "ADD_INCLUDE",
            FileAction::Remove => "REMOVE",
            FileAction::Create => "CREATE",
        }
    }
}

/// A specific file location that a suggestion targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTarget {
    pub path: PathBuf,
    pub line_start: usize,
    pub line_end: usize,
    pub action: FileAction,
    pub note: Option<String>,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
        Self {
            path: path.into(),
            line_start: 0,
            line_end: 0,
            action,
            note: None,
        }
    }

    pub fn has_line_range(&self) -> bool {
        self.line_start > 0
    }
}

/// A before/after code snippet shown to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeExample {
    pub file: PathBuf,
    pub line: usize,
    pub code: String,
}

/// Expected impact of applying a suggestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Impact {
    pub files_benefiting: Vec<PathBuf>,
    pub total_files_affected: usize,
    pub cumulative_savings: NanoDuration,
    pub rebuild_files_count: usize,
}

/// A complete, actionable optimization suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub suggestion_type: SuggestionType,
    pub priority: Priority,
    pub confidence: f64,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub estimated_savings: NanoDuration,
    pub estimated_savings_percent: f64,
    pub target_file: FileTarget,
    pub secondary_files: Vec<FileTarget>,
    pub before_code: Option<CodeExample>,
    pub after_code: Option<CodeExample>,
    pub implementation_steps: Vec<String>,
    pub impact: Impact,
    pub caveats: Vec<String>,
    pub verification: String,
    pub documentation_link: Option<String>,
    pub is_safe: bool,
}
