//! Named, research-backed thresholds tunable without touching generator
//! code. Defaults are drawn from ClangBuildAnalyzer, Microsoft C++ Build
//! Insights, and Chromium's jumbo/unity build practice.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub max_files_to_report: usize,
    pub max_templates_to_report: usize,
    pub max_headers_to_report: usize,
    pub max_header_chain_depth: usize,
    pub min_file_time_ms: f64,
    pub max_name_length: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_files_to_report: 10,
            max_templates_to_report: 30,
            max_headers_to_report: 10,
            max_header_chain_depth: 5,
            min_file_time_ms: 10.0,
            max_name_length: 70,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PchPriorityThresholds {
    pub critical_includes: usize,
    pub high_includes: usize,
    pub critical_time_ratio: f64,
    pub high_time_ratio: f64,
}

impl Default for PchPriorityThresholds {
    fn default() -> Self {
        Self {
            critical_includes: 50,
            high_includes: 20,
            critical_time_ratio: 0.05,
            high_time_ratio: 0.02,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PchConfig {
    pub min_include_count: usize,
    pub min_aggregate_time_ms: f64,
    pub priority: PchPriorityThresholds,
}

impl Default for PchConfig {
    fn default() -> Self {
        Self {
            min_include_count: 10,
            min_aggregate_time_ms: 500.0,
            priority: PchPriorityThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub min_instantiation_count: usize,
    pub min_total_time_ms: f64,
    pub high_priority_percent: f64,
    pub recursive_depth_warning: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            min_instantiation_count: 5,
            min_total_time_ms: 100.0,
            high_priority_percent: 10.0,
            recursive_depth_warning: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeGenConfig {
    pub long_codegen_threshold_ms: f64,
    pub inline_warning_threshold_ms: f64,
}

impl Default for CodeGenConfig {
    fn default() -> Self {
        Self {
            long_codegen_threshold_ms: 500.0,
            inline_warning_threshold_ms: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTimeThresholds {
    pub critical_ms: f64,
    pub high_ms: f64,
    pub medium_ms: f64,
    pub low_ms: f64,
}

impl Default for HeaderTimeThresholds {
    fn default() -> Self {
        Self {
            critical_ms: 2000.0,
            high_ms: 1000.0,
            medium_ms: 500.0,
            low_ms: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub min_parse_time_ms: f64,
    pub min_includers_for_split: usize,
    pub time: HeaderTimeThresholds,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            min_parse_time_ms: 100.0,
            min_includers_for_split: 5,
            time: HeaderTimeThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnityBuildConfig {
    pub files_per_unit: usize,
    pub min_files_threshold: usize,
    pub header_parsing_ratio: f64,
}

impl Default for UnityBuildConfig {
    fn default() -> Self {
        Self {
            files_per_unit: 50,
            min_files_threshold: 10,
            header_parsing_ratio: 0.45,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardDeclConfig {
    pub min_parse_time_ms: f64,
    pub min_usage_sites: usize,
}

impl Default for ForwardDeclConfig {
    fn default() -> Self {
        Self {
            min_parse_time_ms: 50.0,
            min_usage_sites: 3,
        }
    }
}

/// The full set of tunable thresholds. No generator reads a literal
/// threshold; every heuristic decision flows through this struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    pub analysis: AnalysisConfig,
    pub pch: PchConfig,
    pub templates: TemplateConfig,
    pub codegen: CodeGenConfig,
    pub headers: HeaderConfig,
    pub unity_build: UnityBuildConfig,
    pub forward_decl: ForwardDeclConfig,
}

impl HeuristicsConfig {
    /// Loads an override bundle from a TOML file, falling back to
    /// `HeuristicsConfig::default()` for any field left unset.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| crate::error::Error::from(e).with_context(path.display().to_string()))?;
        let config: HeuristicsConfig = toml::from_str(&text)?;
        Ok(config)
    }
}
