//! Aggregates per-header inclusion facts across every translation unit and
//! builds the include graph used for circular-dependency detection.

use crate::graph::{find_cycles, DependencyGraph, EdgeType};
use crate::model::{
    AnalysisOptions, AnalysisResult, BuildTrace, DependencyAnalysisResult, HeaderStat, NanoDuration,
};
use crate::model::scalar::normalize_path;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

pub fn analyze(trace: &BuildTrace, _options: &AnalysisOptions) -> AnalysisResult {
    struct Accum {
        path: PathBuf,
        total_parse_time: NanoDuration,
        inclusion_count: usize,
        including_files: Vec<PathBuf>,
    }

    let mut by_header: FxHashMap<String, Accum> = FxHashMap::default();
    let mut graph = DependencyGraph::new();
    let mut total_includes = 0usize;
    let mut max_include_depth = 0usize;
    let mut total_include_time = NanoDuration::ZERO;

    for unit in &trace.units {
        let source_key = normalize_path(&unit.source_file);
        total_includes += unit.includes.len();
        for include in &unit.includes {
            max_include_depth = max_include_depth.max(include.depth);
            total_include_time = total_include_time + include.parse_time;

            let key = normalize_path(&include.header);
            graph.add_edge(&source_key, &key, EdgeType::DirectInclude, None);
            for includer in &include.included_by {
                graph.add_edge(&normalize_path(includer), &key, EdgeType::DirectInclude, None);
            }

            let entry = by_header.entry(key).or_insert_with(|| Accum {
                path: include.header.clone(),
                total_parse_time: NanoDuration::ZERO,
                inclusion_count: 0,
                including_files: Vec::new(),
            });
            entry.total_parse_time = entry.total_parse_time + include.parse_time;
            entry.inclusion_count += 1;
            if !entry.including_files.contains(&unit.source_file) {
                entry.including_files.push(unit.source_file.clone());
            }
        }
    }

    let mut headers: Vec<HeaderStat> = by_header
        .into_values()
        .map(|a| {
            let impact_score =
                a.total_parse_time.as_nanos() as f64 * (a.inclusion_count as f64).sqrt();
            HeaderStat {
                path: a.path,
                total_parse_time: a.total_parse_time,
                inclusion_count: a.inclusion_count,
                including_files: a.including_files,
                impact_score,
            }
        })
        .collect();

    headers.sort_by(|a, b| b.impact_score.partial_cmp(&a.impact_score).unwrap());
    let unique_headers = headers.len();

    let circular_dependencies = find_cycles(&graph)
        .into_iter()
        .map(|cycle| cycle.into_iter().map(PathBuf::from).collect())
        .collect();

    AnalysisResult {
        dependencies: DependencyAnalysisResult {
            headers,
            total_includes,
            unique_headers,
            max_include_depth,
            total_include_time,
            circular_dependencies,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompilationUnit, IncludeInfo};
    use std::path::PathBuf;

    #[test]
    fn single_header_from_single_unit() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from("main.cpp"),
            includes: vec![IncludeInfo {
                header: PathBuf::from("h.h"),
                parse_time: NanoDuration::from_millis(100.0),
                depth: 1,
                ..Default::default()
            }],
            ..Default::default()
        });

        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.dependencies.headers.len(), 1);
        assert_eq!(result.dependencies.headers[0].inclusion_count, 1);
        assert_eq!(result.dependencies.headers[0].including_files.len(), 1);
    }

    #[test]
    fn repeated_inclusion_in_same_unit_counts_each_occurrence() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from("main.cpp"),
            includes: vec![
                IncludeInfo {
                    header: PathBuf::from("h.h"),
                    parse_time: NanoDuration::from_millis(10.0),
                    ..Default::default()
                },
                IncludeInfo {
                    header: PathBuf::from("h.h"),
                    parse_time: NanoDuration::from_millis(10.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.dependencies.headers[0].inclusion_count, 2);
        assert_eq!(result.dependencies.headers[0].including_files.len(), 1);
    }

    #[test]
    fn mutually_including_headers_are_reported_as_a_cycle() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from("a.h"),
            includes: vec![IncludeInfo {
                header: PathBuf::from("b.h"),
                parse_time: NanoDuration::from_millis(1.0),
                ..Default::default()
            }],
            ..Default::default()
        });
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from("b.h"),
            includes: vec![IncludeInfo {
                header: PathBuf::from("a.h"),
                parse_time: NanoDuration::from_millis(1.0),
                ..Default::default()
            }],
            ..Default::default()
        });

        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.dependencies.circular_dependencies.len(), 1);
    }

    #[test]
    fn ordering_is_descending_by_impact_score() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(CompilationUnit {
            source_file: PathBuf::from("a.cpp"),
            includes: vec![
                IncludeInfo {
                    header: PathBuf::from("hot.h"),
                    parse_time: NanoDuration::from_millis(500.0),
                    ..Default::default()
                },
                IncludeInfo {
                    header: PathBuf::from("cold.h"),
                    parse_time: NanoDuration::from_millis(1.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.dependencies.headers[0].path, PathBuf::from("hot.h"));
    }
}
