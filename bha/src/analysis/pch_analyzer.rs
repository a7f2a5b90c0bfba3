//! Identifies headers that are strong precompiled-header candidates:
//! widely included, expensive to parse, and stable.

use crate::model::scalar::normalize_path;
use crate::model::{AnalysisOptions, AnalysisResult, BuildTrace, NanoDuration, PchAnalysisResult, PchCandidate};
use rustc_hash::FxHashMap;
use std::path::PathBuf;

const MIN_INCLUDING_FILES: usize = 3;

const STABLE_SUBSTRINGS: &[&str] = &[
    "_fwd", "fwd_", "forward", "_types", "types_", "_defs", "config", "version", "platform",
    "stdafx", "pch", "precompile",
];

pub fn analyze(trace: &BuildTrace, options: &AnalysisOptions) -> AnalysisResult {
    struct Accum {
        path: PathBuf,
        total_parse_time: NanoDuration,
        inclusion_count: usize,
        including_files: Vec<PathBuf>,
    }

    let mut by_header: FxHashMap<String, Accum> = FxHashMap::default();

    for unit in &trace.units {
        for include in &unit.includes {
            let key = normalize_path(&include.header);
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

    let mut candidates: Vec<PchCandidate> = by_header
        .into_values()
        .filter(|a| {
            a.including_files.len() >= MIN_INCLUDING_FILES
                && a.total_parse_time >= options.min_duration_threshold
        })
        .map(|a| {
            let including_files = a.including_files.len();
            let average_parse_time =
                NanoDuration(a.total_parse_time.as_nanos() / a.inclusion_count.max(1) as i64);
            let stable = is_stable(&a.path);

            let total_ms = a.total_parse_time.as_millis_f64();
            let avg_ms = average_parse_time.as_millis_f64();
            let repetition_factor = if including_files > 0 {
                1.0 + ((a.inclusion_count as f64 / including_files as f64).ln()).max(0.0)
            } else {
                1.0
            };
            let raw = (0.5 * (total_ms + 1.0).ln()
                + 0.25 * (including_files as f64 + 1.0).ln()
                + 0.25 * (avg_ms + 1.0).ln())
                * repetition_factor;
            let pch_score = raw * if stable { 1.5 } else { 1.0 };
            let estimated_savings = NanoDuration(
                (average_parse_time.as_nanos() as i64) * (a.inclusion_count.saturating_sub(1)) as i64,
            );

            PchCandidate {
                path: a.path,
                inclusion_count: a.inclusion_count,
                including_files,
                total_parse_time: a.total_parse_time,
                average_parse_time,
                stable,
                pch_score,
                estimated_savings,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.pch_score.partial_cmp(&a.pch_score).unwrap());

    let potential_savings: NanoDuration = candidates.iter().map(|c| c.estimated_savings).sum();

    AnalysisResult {
        pch: PchAnalysisResult {
            candidates,
            potential_savings,
        },
        ..Default::default()
    }
}

fn is_stable(path: &PathBuf) -> bool {
    let s = path.to_string_lossy().to_ascii_lowercase();
    if s.starts_with("/usr/include") || s.starts_with("/usr/lib") || s.contains("c++/") {
        return true;
    }
    STABLE_SUBSTRINGS.iter().any(|pat| s.contains(pat))
}
