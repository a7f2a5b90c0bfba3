//! The versioned, bit-exact JSON export format.

use super::{filtered_files, filtered_suggestions, Exporter, ExportFormat};
use crate::error::Result;
use crate::model::{AnalysisResult, ExportOptions, Suggestion, SymbolKind};
use serde::Serialize;

pub struct JsonExporter;

#[derive(Serialize)]
struct Report {
    #[serde(rename = "$schema")]
    schema: String,
    schema_version: String,
    bha_version: String,
    generated_at: String,
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<JsonFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<Dependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    templates: Option<Templates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbols: Option<Symbols>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<JsonSuggestion>>,
}

#[derive(Serialize)]
struct Summary {
    total_files: usize,
    total_compile_time_ms: f64,
    analysis_duration_ms: f64,
    suggestions_count: usize,
}

#[derive(Serialize)]
struct JsonFile {
    path: String,
    total_time_ms: f64,
    frontend_time_ms: f64,
    backend_time_ms: f64,
    lines_of_code: usize,
    include_count: usize,
}

#[derive(Serialize)]
struct Dependencies {
    total_includes: usize,
    unique_headers: usize,
    max_depth: usize,
    circular_dependencies_count: usize,
    headers: Vec<JsonHeader>,
    graph: Graph,
}

#[derive(Serialize)]
struct JsonHeader {
    path: String,
    inclusion_count: usize,
    including_files: usize,
    parse_time_ms: f64,
    impact_score: f64,
    included_by: Vec<String>,
}

#[derive(Serialize)]
struct Graph {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
}

#[derive(Serialize)]
struct GraphNode {
    id: String,
    #[serde(rename = "type")]
    node_type: &'static str,
}

#[derive(Serialize)]
struct GraphLink {
    source: String,
    target: String,
    #[serde(rename = "type")]
    link_type: &'static str,
}

#[derive(Serialize)]
struct Templates {
    total_instantiations: usize,
    total_time_ms: f64,
    templates: Vec<JsonTemplate>,
}

#[derive(Serialize)]
struct JsonTemplate {
    name: String,
    #[serde(rename = "type")]
    signature: String,
    count: usize,
    time_ms: f64,
    time_percent: f64,
}

#[derive(Serialize)]
struct Symbols {
    total_symbols: usize,
    unused_symbols: usize,
    symbols: Vec<JsonSymbol>,
}

#[derive(Serialize)]
struct JsonSymbol {
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    defined_in: Vec<String>,
    usage_count: usize,
}

#[derive(Serialize)]
struct JsonSuggestion {
    #[serde(rename = "type")]
    suggestion_type: &'static str,
    title: String,
    description: String,
    target_file: String,
    target_line: usize,
    confidence: f64,
    priority: &'static str,
    estimated_savings_ms: f64,
    auto_applicable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    before_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after_code: Option<String>,
}

fn symbol_kind_str(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Function => "function",
        SymbolKind::Method => "method",
        SymbolKind::Constructor => "constructor",
        SymbolKind::Destructor => "destructor",
        SymbolKind::Operator => "operator",
        SymbolKind::TypeClass => "type",
        SymbolKind::TemplateFunction => "template_function",
        SymbolKind::TemplateClass => "template_class",
        SymbolKind::MacroOrConstant => "macro_or_constant",
        SymbolKind::Variable => "variable",
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn export_to_string(
        &self,
        analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<String> {
        let files = filtered_files(analysis, options);
        let kept_suggestions = if options.include_suggestions {
            filtered_suggestions(suggestions, options)
        } else {
            Vec::new()
        };

        let summary = Summary {
            total_files: files.len(),
            total_compile_time_ms: analysis.performance.total_build_time.as_millis_f64(),
            analysis_duration_ms: analysis.analysis_duration.as_millis_f64(),
            suggestions_count: kept_suggestions.len(),
        };

        let report = Report {
            schema: format!(
                "https://bha.dev/schemas/analysis-v{}.json",
                options.json_schema_version
            ),
            schema_version: options.json_schema_version.clone(),
            bha_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary,
            files: options.include_file_details.then(|| {
                files
                    .iter()
                    .map(|f| JsonFile {
                        path: f.path.display().to_string(),
                        total_time_ms: f.compile_time.as_millis_f64(),
                        frontend_time_ms: f.frontend_time.as_millis_f64(),
                        backend_time_ms: f.backend_time.as_millis_f64(),
                        lines_of_code: 0,
                        include_count: f.direct_includes,
                    })
                    .collect()
            }),
            dependencies: options.include_dependencies.then(|| build_dependencies(analysis)),
            templates: options.include_templates.then(|| Templates {
                total_instantiations: analysis.templates.total_instantiations,
                total_time_ms: analysis.templates.total_time.as_millis_f64(),
                templates: analysis
                    .templates
                    .templates
                    .iter()
                    .map(|t| JsonTemplate {
                        name: t.name.clone(),
                        signature: t.signature.clone(),
                        count: t.instantiation_count,
                        time_ms: t.total_time.as_millis_f64(),
                        time_percent: t.time_percent,
                    })
                    .collect(),
            }),
            symbols: options.include_symbols.then(|| Symbols {
                total_symbols: analysis.symbols.total_symbols,
                unused_symbols: analysis.symbols.unused_symbols,
                symbols: analysis
                    .symbols
                    .symbols
                    .iter()
                    .map(|s| JsonSymbol {
                        name: s.name.clone(),
                        kind: symbol_kind_str(s.kind),
                        defined_in: s.defined_in.iter().map(|p| p.display().to_string()).collect(),
                        usage_count: s.usage_count,
                    })
                    .collect(),
            }),
            suggestions: options.include_suggestions.then(|| {
                kept_suggestions
                    .iter()
                    .map(|s| JsonSuggestion {
                        suggestion_type: s.suggestion_type.as_str(),
                        title: s.title.clone(),
                        description: s.description.clone(),
                        target_file: s.target_file.path.display().to_string(),
                        target_line: s.target_file.line_start,
                        confidence: s.confidence,
                        priority: s.priority.as_str(),
                        estimated_savings_ms: s.estimated_savings.as_millis_f64(),
                        auto_applicable: s.is_safe,
                        before_code: s.before_code.as_ref().map(|c| c.code.clone()),
                        after_code: s.after_code.as_ref().map(|c| c.code.clone()),
                    })
                    .collect()
            }),
        };

        let rendered = if options.pretty_print {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(rendered)
    }
}

fn build_dependencies(analysis: &AnalysisResult) -> Dependencies {
    let headers: Vec<JsonHeader> = analysis
        .dependencies
        .headers
        .iter()
        .map(|h| JsonHeader {
            path: h.path.display().to_string(),
            inclusion_count: h.inclusion_count,
            including_files: h.including_file_count(),
            parse_time_ms: h.total_parse_time.as_millis_f64(),
            impact_score: h.impact_score,
            included_by: h.including_files.iter().map(|p| p.display().to_string()).collect(),
        })
        .collect();

    let mut nodes = Vec::new();
    let mut links = Vec::new();
    let mut seen_sources = std::collections::HashSet::new();
    for header in &analysis.dependencies.headers {
        nodes.push(GraphNode {
            id: header.path.display().to_string(),
            node_type: "header",
        });
        for includer in &header.including_files {
            let includer_id = includer.display().to_string();
            if seen_sources.insert(includer_id.clone()) {
                nodes.push(GraphNode {
                    id: includer_id.clone(),
                    node_type: "source",
                });
            }
            links.push(GraphLink {
                source: includer_id,
                target: header.path.display().to_string(),
                link_type: "includes",
            });
        }
    }

    Dependencies {
        total_includes: analysis.dependencies.total_includes,
        unique_headers: analysis.dependencies.unique_headers,
        max_depth: analysis.dependencies.max_include_depth,
        circular_dependencies_count: analysis.dependencies.circular_dependencies.len(),
        headers,
        graph: Graph { nodes, links },
    }
}
