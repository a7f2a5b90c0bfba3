//! End-to-end scenarios exercising the public pipeline: trace in, analysis
//! and suggestions out, exported to every format.

use bha::model::{
    AnalysisOptions, BuildSystemType, BuildTrace, CompilationUnit, CompilerType, ExportOptions,
    FileMetrics, IncludeInfo, NanoDuration, Priority, Suggestion, SuggesterOptions, SuggestionType,
    TemplateInstantiation,
};
use bha::graph::{
    calculate_depth, find_critical_path, find_cycles, strongly_connected_components,
    topological_sort, topological_sort_checked, DependencyGraph, EdgeType,
};
use bha::export::{exporter_for, ExportFormat};
use std::path::PathBuf;

fn empty_trace() -> BuildTrace {
    BuildTrace {
        id: "scenario".into(),
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

// S1 — Empty trace.
#[test]
fn s1_empty_trace_yields_empty_analysis_and_succeeds_on_export() {
    let trace = empty_trace();
    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());

    assert!(analysis.files.is_empty());
    assert_eq!(analysis.performance.total_files, 0);
    assert!(analysis.dependencies.headers.is_empty());
    assert_eq!(analysis.dependencies.total_includes, 0);

    let exporter = exporter_for(ExportFormat::Json);
    let rendered = exporter
        .export_to_string(&analysis, &[], &ExportOptions::default())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["summary"]["total_files"], 0);
}

// S2 — Single unit, single header.
#[test]
fn s2_single_unit_single_header() {
    let mut trace = empty_trace();
    trace.units.push(CompilationUnit {
        source_file: PathBuf::from("main.cpp"),
        metrics: FileMetrics {
            total_time: NanoDuration::from_millis(1000.0),
            ..Default::default()
        },
        includes: vec![IncludeInfo {
            header: PathBuf::from("h.h"),
            parse_time: NanoDuration::from_millis(100.0),
            depth: 1,
            ..Default::default()
        }],
        ..Default::default()
    });

    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());
    assert_eq!(analysis.files.len(), 1);
    assert_eq!(analysis.files[0].rank, 1);
    assert!((analysis.files[0].time_percent - 100.0).abs() < 1e-9);

    assert_eq!(analysis.dependencies.headers.len(), 1);
    assert_eq!(analysis.dependencies.headers[0].inclusion_count, 1);
    assert_eq!(analysis.dependencies.headers[0].including_file_count(), 1);

    assert!(analysis.pch.candidates.is_empty());
}

// S3 — PCH candidate trigger.
#[test]
fn s3_widely_shared_header_becomes_a_pch_candidate() {
    let mut trace = empty_trace();
    for idx in 0..5 {
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from(format!("u{idx}.cpp")),
            includes: vec![IncludeInfo {
                header: PathBuf::from("common.h"),
                parse_time: NanoDuration::from_millis(100.0),
                ..Default::default()
            }],
            ..Default::default()
        });
    }

    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());
    assert_eq!(analysis.pch.candidates.len(), 1);
    let candidate = &analysis.pch.candidates[0];
    assert_eq!(candidate.inclusion_count, 5);
    assert_eq!(candidate.including_files, 5);
    assert!(candidate.pch_score > 0.0);
    assert!(candidate.total_parse_time >= NanoDuration::from_millis(500.0));
    let estimated_ms = candidate.estimated_savings.as_millis_f64();
    assert!((estimated_ms - 400.0).abs() < 1e-6);
}

// S4 — Template aggregation across units.
#[test]
fn s4_template_instantiations_aggregate_by_signature() {
    let mut trace = empty_trace();
    trace.units.push(CompilationUnit {
        source_file: PathBuf::from("a.cpp"),
        templates: vec![TemplateInstantiation {
            name: "vector".into(),
            full_signature: "std::vector<int>".into(),
            time: NanoDuration::from_millis(500.0),
            count: 2,
            ..Default::default()
        }],
        ..Default::default()
    });
    trace.units.push(CompilationUnit {
        source_file: PathBuf::from("b.cpp"),
        templates: vec![TemplateInstantiation {
            name: "vector".into(),
            full_signature: "std::vector<int>".into(),
            time: NanoDuration::from_millis(400.0),
            count: 3,
            ..Default::default()
        }],
        ..Default::default()
    });

    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());
    assert_eq!(analysis.templates.templates.len(), 1);
    let t = &analysis.templates.templates[0];
    assert_eq!(t.instantiation_count, 5);
    assert_eq!(t.total_time, NanoDuration::from_millis(900.0));
}

// S5 — Cycle detection over a small graph.
#[test]
fn s5_three_node_cycle_is_detected_by_every_algorithm() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("A", "B", EdgeType::DirectInclude, None);
    graph.add_edge("B", "C", EdgeType::DirectInclude, None);
    graph.add_edge("C", "A", EdgeType::DirectInclude, None);

    assert!(bha::graph::has_cycle(&graph));
    assert!(topological_sort_checked(&graph).is_err());
    assert!(topological_sort(&graph).len() < graph.node_count());

    let cycles = find_cycles(&graph);
    assert_eq!(cycles.len(), 1);

    let sccs = strongly_connected_components(&graph);
    assert_eq!(sccs.len(), 1);
    let mut members = sccs[0].clone();
    members.sort();
    assert_eq!(members, vec!["A".to_string(), "B".to_string(), "C".to_string()]);
}

// S6 — Suggestion priority/savings ordering.
#[test]
fn s6_suggestions_sort_by_priority_then_descending_savings() {
    let mut suggestions = vec![
        suggestion(Priority::Low, 500.0),
        suggestion(Priority::High, 10.0),
        suggestion(Priority::High, 200.0),
    ];
    suggestions.sort_by(|a, b| a.priority.cmp(&b.priority).then(b.estimated_savings.cmp(&a.estimated_savings)));

    assert_eq!(suggestions[0].priority, Priority::High);
    assert_eq!(suggestions[0].estimated_savings, NanoDuration::from_millis(200.0));
    assert_eq!(suggestions[1].priority, Priority::High);
    assert_eq!(suggestions[1].estimated_savings, NanoDuration::from_millis(10.0));
    assert_eq!(suggestions[2].priority, Priority::Low);
}

fn suggestion(priority: Priority, savings_ms: f64) -> Suggestion {
    Suggestion {
        id: String::new(),
        suggestion_type: SuggestionType::PchOptimization,
        priority,
        confidence: 0.9,
        title: "t".into(),
        description: "d".into(),
        rationale: "r".into(),
        estimated_savings: NanoDuration::from_millis(savings_ms),
        estimated_savings_percent: 0.0,
        target_file: bha::model::FileTarget::new("x.h", bha::model::FileAction::AddInclude),
        secondary_files: Vec::new(),
        before_code: None,
        after_code: None,
        implementation_steps: Vec::new(),
        impact: bha::model::Impact::default(),
        caveats: Vec::new(),
        verification: String::new(),
        documentation_link: None,
        is_safe: true,
    }
}

// Property 4 — depth monotonicity in a small DAG.
#[test]
fn depth_is_monotonic_along_a_chain() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("root.cpp", "mid.h", EdgeType::DirectInclude, None);
    graph.add_edge("mid.h", "leaf.h", EdgeType::DirectInclude, None);

    let leaf_depth = calculate_depth(&graph, "leaf.h");
    let mid_depth = calculate_depth(&graph, "mid.h");
    let root_depth = calculate_depth(&graph, "root.cpp");

    assert!(mid_depth >= 1 + leaf_depth);
    assert!(root_depth >= 1 + mid_depth);
}

// Property 5 — the critical path's total weight equals the maximum distance.
#[test]
fn critical_path_weight_matches_the_maximum_distance() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b", EdgeType::DirectInclude, None);
    graph.add_edge("b", "c", EdgeType::DirectInclude, None);
    graph.add_edge("a", "c", EdgeType::DirectInclude, None);

    let mut weights = rustc_hash::FxHashMap::default();
    weights.insert("a".to_string(), 10.0);
    weights.insert("b".to_string(), 5.0);
    weights.insert("c".to_string(), 1.0);

    let path = find_critical_path(&graph, &weights);
    assert_eq!(path, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
}

// Property 12 — exporter round-trip: file/suggestion counts survive JSON export.
#[test]
fn json_export_round_trips_file_and_suggestion_counts() {
    let mut trace = empty_trace();
    for idx in 0..3 {
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from(format!("f{idx}.cpp")),
            metrics: FileMetrics {
                total_time: NanoDuration::from_millis(50.0 + idx as f64),
                ..Default::default()
            },
            ..Default::default()
        });
    }
    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());
    let mut options = SuggesterOptions::default();
    options.min_confidence = 0.0;
    let suggestions = bha::generate_suggestions(&analysis, &options);

    let mut export_options = ExportOptions::default();
    export_options.max_suggestions = 0;
    let exporter = exporter_for(ExportFormat::Json);
    let rendered = exporter
        .export_to_string(&analysis, &suggestions, &export_options)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["files"].as_array().unwrap().len(), analysis.files.len());
    assert_eq!(
        value["suggestions"].as_array().unwrap().len(),
        suggestions.len()
    );
}

// Property 13 — JSON schema stability: exactly the documented top-level keys.
#[test]
fn json_export_has_exactly_the_documented_top_level_keys() {
    let trace = empty_trace();
    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());
    let exporter = exporter_for(ExportFormat::Json);
    let rendered = exporter
        .export_to_string(&analysis, &[], &ExportOptions::default())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    keys.sort();

    let mut expected = vec![
        "$schema",
        "schema_version",
        "bha_version",
        "generated_at",
        "summary",
        "files",
        "dependencies",
        "templates",
        "symbols",
        "suggestions",
    ];
    expected.sort();
    assert_eq!(keys, expected);
}

// Every format produces output for a non-trivial trace without error.
#[test]
fn every_export_format_succeeds_on_a_populated_trace() {
    let mut trace = empty_trace();
    trace.units.push(CompilationUnit {
        source_file: PathBuf::from("main.cpp"),
        metrics: FileMetrics {
            total_time: NanoDuration::from_millis(1200.0),
            ..Default::default()
        },
        includes: vec![IncludeInfo {
            header: PathBuf::from("widget.h"),
            parse_time: NanoDuration::from_millis(80.0),
            ..Default::default()
        }],
        ..Default::default()
    });

    let analysis = bha::run_full_analysis(&trace, &AnalysisOptions::default());
    let suggestions = bha::generate_suggestions(&analysis, &SuggesterOptions::default());

    for format in [
        ExportFormat::Json,
        ExportFormat::Html,
        ExportFormat::Csv,
        ExportFormat::Markdown,
        ExportFormat::Sarif,
    ] {
        let exporter = exporter_for(format);
        let rendered = exporter
            .export_to_string(&analysis, &suggestions, &ExportOptions::default())
            .unwrap();
        assert!(!rendered.is_empty(), "{} produced empty output", exporter.format_name());
    }
}
