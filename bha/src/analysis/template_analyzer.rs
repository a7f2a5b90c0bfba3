//! Aggregates template instantiations by their full signature.

use crate::model::{AnalysisOptions, AnalysisResult, BuildTrace, NanoDuration, TemplateAnalysisResult, TemplateStat};
use rustc_hash::FxHashMap;

pub fn analyze(trace: &BuildTrace, _options: &AnalysisOptions) -> AnalysisResult {
    struct Accum {
        name: String,
        total_time: NanoDuration,
        instantiation_count: usize,
        locations: Vec<crate::model::SourceLocation>,
    }

    let mut by_signature: FxHashMap<String, Accum> = FxHashMap::default();

    for unit in &trace.units {
        for t in &unit.templates {
            let entry = by_signature
                .entry(t.full_signature.clone())
                .or_insert_with(|| Accum {
                    name: t.name.clone(),
                    total_time: NanoDuration::ZERO,
                    instantiation_count: 0,
                    locations: Vec::new(),
                });
            entry.total_time = entry.total_time + t.time;
            entry.instantiation_count += t.count;
            entry.locations.push(t.location.clone());
        }
    }

    let total_time: NanoDuration = by_signature.values().map(|a| a.total_time).sum();
    let total_ns = total_time.as_nanos().max(1) as f64;

    let mut templates: Vec<TemplateStat> = by_signature
        .into_iter()
        .map(|(signature, a)| TemplateStat {
            time_percent: 100.0 * a.total_time.as_nanos() as f64 / total_ns,
            signature,
            name: a.name,
            total_time: a.total_time,
            instantiation_count: a.instantiation_count,
            locations: a.locations,
        })
        .collect();

    templates.sort_by(|a, b| b.total_time.cmp(&a.total_time));

    let total_instantiations = templates.iter().map(|t| t.instantiation_count).sum();
    let trace_total_ns = trace.effective_total_time().as_nanos().max(1) as f64;
    let template_time_percent = 100.0 * total_time.as_nanos() as f64 / trace_total_ns;

    AnalysisResult {
        templates: TemplateAnalysisResult {
            templates,
            total_instantiations,
            total_time,
            template_time_percent,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompilationUnit, TemplateInstantiation};

    #[test]
    fn aggregates_instantiations_across_units_by_signature() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(CompilationUnit {
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
            templates: vec![TemplateInstantiation {
                name: "vector".into(),
                full_signature: "std::vector<int>".into(),
                time: NanoDuration::from_millis(400.0),
                count: 3,
                ..Default::default()
            }],
            ..Default::default()
        });

        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.templates.templates.len(), 1);
        let stat = &result.templates.templates[0];
        assert_eq!(stat.instantiation_count, 5);
        assert_eq!(stat.total_time, NanoDuration::from_millis(900.0));
    }

    #[test]
    fn sorted_descending_by_total_time() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(CompilationUnit {
            templates: vec![
                TemplateInstantiation {
                    full_signature: "Small<int>".into(),
                    time: NanoDuration::from_millis(10.0),
                    count: 1,
                    ..Default::default()
                },
                TemplateInstantiation {
                    full_signature: "Big<int>".into(),
                    time: NanoDuration::from_millis(1000.0),
                    count: 1,
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.templates.templates[0].signature, "Big<int>");
    }
}
