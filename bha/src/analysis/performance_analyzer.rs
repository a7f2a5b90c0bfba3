//! Computes build-wide timing percentiles, parallelism efficiency and
//! memory aggregates. Owns the entire `performance` partial; the merge
//! rule replaces `performance` wholesale with whichever analyzer's
//! partial carries a nonzero `total_build_time`, so file analysis and
//! performance analysis must not both populate it.

use crate::model::{
    AnalysisOptions, AnalysisResult, FileAnalysisResult, NanoDuration, PerformanceAnalysisResult,
};
use crate::model::BuildTrace;

pub fn analyze(trace: &BuildTrace, options: &AnalysisOptions) -> AnalysisResult {
    let total = trace.effective_total_time();
    let total_ns = total.as_nanos().max(1) as f64;

    let mut kept: Vec<FileAnalysisResult> = trace
        .units
        .iter()
        .filter(|u| u.metrics.total_time >= options.min_duration_threshold)
        .map(|u| FileAnalysisResult {
            path: u.source_file.clone(),
            compile_time: u.metrics.total_time,
            frontend_time: u.metrics.frontend_time,
            backend_time: u.metrics.backend_time,
            time_percent: 100.0 * u.metrics.total_time.as_nanos() as f64 / total_ns,
            rank: 0,
            direct_includes: u.metrics.direct_includes,
            transitive_includes: u.metrics.transitive_includes,
        })
        .collect();
    kept.sort_by(|a, b| b.compile_time.cmp(&a.compile_time));
    for (idx, file) in kept.iter_mut().enumerate() {
        file.rank = idx + 1;
    }

    let mut ascending: Vec<NanoDuration> = kept.iter().map(|f| f.compile_time).collect();
    ascending.sort();

    let percentile = |p: f64| -> NanoDuration {
        if ascending.is_empty() {
            return NanoDuration::ZERO;
        }
        let idx = ((p / 100.0) * (ascending.len() as f64 - 1.0)).floor() as usize;
        ascending[idx.min(ascending.len() - 1)]
    };

    let sum: NanoDuration = ascending.iter().copied().sum();
    let average = if ascending.is_empty() {
        NanoDuration::ZERO
    } else {
        NanoDuration(sum.as_nanos() / ascending.len() as i64)
    };

    let sequential: NanoDuration = trace.units.iter().map(|u| u.metrics.total_time).sum();
    let efficiency = if total.as_nanos() > 0 {
        sequential.as_nanos() as f64 / total.as_nanos() as f64
    } else {
        0.0
    };

    let total_peak_memory: u64 = trace.units.iter().map(|u| u.metrics.memory.peak).sum();
    let average_peak_memory = if trace.units.is_empty() {
        0
    } else {
        total_peak_memory / trace.units.len() as u64
    };

    let slowest_files = kept.iter().take(10).cloned().collect();

    // When the trace carries zero total time, report it as the smallest
    // representable nonzero duration so this partial always wins the merge;
    // a build with truly zero duration has nothing else to aggregate.
    let total_build_time = if total.as_nanos() > 0 {
        total
    } else {
        NanoDuration(1)
    };

    AnalysisResult {
        performance: PerformanceAnalysisResult {
            total_files: trace.file_count(),
            total_build_time,
            sequential_time: sequential,
            parallelism_efficiency: efficiency,
            p50_compile_time: percentile(50.0),
            p90_compile_time: percentile(90.0),
            p99_compile_time: percentile(99.0),
            average_compile_time: average,
            slowest_files,
            total_peak_memory,
            average_peak_memory,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompilationUnit, FileMetrics};
    use std::path::PathBuf;

    fn trace_with(times_ms: &[f64]) -> BuildTrace {
        let mut trace = crate::test_support::empty_trace();
        for (idx, &ms) in times_ms.iter().enumerate() {
            trace.units.push(CompilationUnit {
                source_file: PathBuf::from(format!("f{idx}.cpp")),
                metrics: FileMetrics {
                    total_time: NanoDuration::from_millis(ms),
                    ..Default::default()
                },
                ..Default::default()
            });
        }
        trace
    }

    #[test]
    fn percentiles_are_monotonic() {
        let trace = trace_with(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert!(result.performance.p50_compile_time <= result.performance.p90_compile_time);
        assert!(result.performance.p90_compile_time <= result.performance.p99_compile_time);
    }

    #[test]
    fn total_build_time_is_nonzero_so_merge_keeps_this_partial() {
        let trace = trace_with(&[100.0]);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert!(result.performance.total_build_time.as_nanos() > 0);
    }

    #[test]
    fn slowest_files_capped_at_ten() {
        let times: Vec<f64> = (1..=15).map(|n| n as f64 * 10.0).collect();
        let trace = trace_with(&times);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.performance.slowest_files.len(), 10);
        assert_eq!(result.performance.slowest_files[0].compile_time, NanoDuration::from_millis(150.0));
    }

    #[test]
    fn parallelism_efficiency_reflects_overlap() {
        let mut trace = trace_with(&[100.0, 100.0]);
        trace.total_time = NanoDuration::from_millis(100.0);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert!((result.performance.parallelism_efficiency - 2.0).abs() < 1e-9);
    }
}
