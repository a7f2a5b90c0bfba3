//! Ranks translation units by compile time. Build-wide percentiles and
//! aggregate memory/parallelism figures are owned by the performance
//! analyzer, which replaces this analyzer's empty `performance` partial
//! during the merge (see the analyzer registry's merge rule).

use crate::model::{AnalysisOptions, AnalysisResult, FileAnalysisResult, NanoDuration};
use crate::model::BuildTrace;
use rayon::prelude::*;

pub fn analyze(trace: &BuildTrace, options: &AnalysisOptions) -> AnalysisResult {
    let total = trace.effective_total_time();
    let total_ns = total.as_nanos().max(1) as f64;

    // Per-unit percent/threshold computation is independent across units;
    // rayon fans it out, then the deterministic sort below restores a
    // stable, thread-count-independent ranking.
    let mut kept: Vec<FileAnalysisResult> = trace
        .units
        .par_iter()
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

    AnalysisResult {
        files: kept,
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
    fn ranks_descending_by_compile_time() {
        let trace = trace_with(&[100.0, 300.0, 200.0]);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.files[0].rank, 1);
        assert_eq!(result.files[0].compile_time, NanoDuration::from_millis(300.0));
        assert_eq!(result.files[2].rank, 3);
        for w in result.files.windows(2) {
            assert!(w[0].compile_time >= w[1].compile_time);
        }
    }

    #[test]
    fn drops_files_below_threshold() {
        let trace = trace_with(&[5.0, 50.0]);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn single_unit_gets_full_time_percent() {
        let trace = trace_with(&[1000.0]);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.files.len(), 1);
        assert!((result.files[0].time_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_trace_yields_no_files() {
        let trace = trace_with(&[]);
        let result = analyze(&trace, &AnalysisOptions::default());
        assert!(result.files.is_empty());
    }
}
