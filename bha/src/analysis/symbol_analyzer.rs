//! Builds a symbol index over defined symbols and template names,
//! classifying each by kind/linkage and estimating reuse and bloat.

use crate::model::{
    AnalysisOptions, AnalysisResult, BuildTrace, Linkage, SymbolAnalysisResult, SymbolKind,
    SymbolStat,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;

pub fn analyze(trace: &BuildTrace, _options: &AnalysisOptions) -> AnalysisResult {
    struct Accum {
        kind: SymbolKind,
        linkage: Linkage,
        defined_in: Vec<PathBuf>,
        usage_units: FxHashSet<PathBuf>,
    }

    let mut symbols: FxHashMap<String, Accum> = FxHashMap::default();

    for unit in &trace.units {
        for sym in &unit.symbols_defined {
            let kind = classify_kind(sym);
            let linkage = classify_linkage(sym, kind);
            let entry = symbols.entry(sym.clone()).or_insert_with(|| Accum {
                kind,
                linkage,
                defined_in: Vec::new(),
                usage_units: FxHashSet::default(),
            });
            if !entry.defined_in.contains(&unit.source_file) {
                entry.defined_in.push(unit.source_file.clone());
            }
        }
    }

    // (a) template instantiations: the instantiating unit is a user of the
    // matching symbol.
    for unit in &trace.units {
        for t in &unit.templates {
            if let Some(entry) = symbols.get_mut(&t.name) {
                entry.usage_units.insert(unit.source_file.clone());
            }
        }
    }

    // (b) any unit including a file that defines a symbol is a user of it.
    let mut definers_by_file: FxHashMap<PathBuf, Vec<String>> = FxHashMap::default();
    for (name, accum) in &symbols {
        for file in &accum.defined_in {
            definers_by_file
                .entry(file.clone())
                .or_default()
                .push(name.clone());
        }
    }
    for unit in &trace.units {
        for include in &unit.includes {
            if let Some(names) = definers_by_file.get(&include.header) {
                for name in names {
                    if let Some(entry) = symbols.get_mut(name) {
                        entry.usage_units.insert(unit.source_file.clone());
                    }
                }
            }
        }
    }

    // Template instantiation time, correlated by name, feeds the bloat score.
    let mut template_time_ms: FxHashMap<String, f64> = FxHashMap::default();
    for unit in &trace.units {
        for t in &unit.templates {
            *template_time_ms.entry(t.name.clone()).or_insert(0.0) += t.time.as_millis_f64();
        }
    }

    let mut unused_symbols = 0usize;
    let mut odr_violations = 0usize;

    let mut stats: Vec<SymbolStat> = symbols
        .into_iter()
        .map(|(name, accum)| {
            let usage_count = accum.usage_units.len();
            if usage_count == 0 {
                unused_symbols += 1;
            }
            let odr_violation = accum.linkage == Linkage::External && accum.defined_in.len() > 1;
            if odr_violation {
                odr_violations += 1;
            }

            let bloat_score = if matches!(accum.linkage, Linkage::Inline | Linkage::Template) {
                let multiplier = match accum.kind {
                    SymbolKind::TemplateClass => 2.0,
                    SymbolKind::TemplateFunction => 1.5,
                    _ => 1.0,
                };
                let time_ms = template_time_ms.get(&name).copied().unwrap_or(0.0);
                accum.defined_in.len() as f64 * (1.0 + time_ms / 100.0) * multiplier
            } else {
                0.0
            };

            SymbolStat {
                name,
                kind: accum.kind,
                linkage: accum.linkage,
                defined_in: accum.defined_in,
                usage_count,
                bloat_score,
                odr_violation,
            }
        })
        .collect();

    stats.sort_by(|a, b| a.name.cmp(&b.name));
    let total_symbols = stats.len();

    AnalysisResult {
        symbols: SymbolAnalysisResult {
            symbols: stats,
            total_symbols,
            unused_symbols,
            odr_violations,
        },
        ..Default::default()
    }
}

fn classify_kind(sym: &str) -> SymbolKind {
    let trimmed = sym.trim();
    if trimmed.contains('<') {
        return if trimmed.contains("class") || trimmed.contains("struct") {
            SymbolKind::TemplateClass
        } else {
            SymbolKind::TemplateFunction
        };
    }
    if starts_with_any(trimmed, &["class ", "struct ", "enum ", "union "]) {
        return SymbolKind::TypeClass;
    }
    if trimmed.contains("::") && trimmed.contains('(') {
        if let Some(name) = method_name(trimmed) {
            if name.starts_with('~') {
                return SymbolKind::Destructor;
            }
            if name.starts_with("operator") {
                return SymbolKind::Operator;
            }
            if let Some(class_name) = class_name_before_method(trimmed) {
                if class_name == name {
                    return SymbolKind::Constructor;
                }
            }
        }
        return SymbolKind::Method;
    }
    if trimmed.contains('(') {
        return SymbolKind::Function;
    }
    if trimmed.chars().any(|c| c.is_alphabetic())
        && trimmed.chars().all(|c| !c.is_lowercase())
    {
        return SymbolKind::MacroOrConstant;
    }
    SymbolKind::Variable
}

fn starts_with_any(s: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| s.starts_with(p))
}

fn method_name(sym: &str) -> Option<&str> {
    let before_paren = sym.split('(').next()?;
    before_paren.rsplit("::").next()
}

fn class_name_before_method(sym: &str) -> Option<&str> {
    let before_paren = sym.split('(').next()?;
    let mut parts: Vec<&str> = before_paren.split("::").collect();
    parts.pop()?;
    parts.pop()
}

fn classify_linkage(sym: &str, kind: SymbolKind) -> Linkage {
    let trimmed = sym.trim();
    if trimmed.starts_with("static ") || trimmed.contains("(anonymous namespace)") {
        return Linkage::Internal;
    }
    if trimmed.contains("inline ") || trimmed.contains("constexpr ") {
        return Linkage::Inline;
    }
    if matches!(kind, SymbolKind::TemplateClass | SymbolKind::TemplateFunction) {
        return Linkage::Template;
    }
    Linkage::External
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_template_class() {
        assert_eq!(classify_kind("template<class T> class Box<T>"), SymbolKind::TemplateClass);
    }

    #[test]
    fn classifies_type() {
        assert_eq!(classify_kind("struct Widget"), SymbolKind::TypeClass);
    }

    #[test]
    fn classifies_constructor() {
        assert_eq!(classify_kind("Widget::Widget()"), SymbolKind::Constructor);
    }

    #[test]
    fn classifies_destructor() {
        assert_eq!(classify_kind("Widget::~Widget()"), SymbolKind::Destructor);
    }

    #[test]
    fn classifies_function() {
        assert_eq!(classify_kind("int compute()"), SymbolKind::Function);
    }

    #[test]
    fn classifies_macro_constant() {
        assert_eq!(classify_kind("MAX_SIZE"), SymbolKind::MacroOrConstant);
    }

    #[test]
    fn classifies_variable_by_default() {
        assert_eq!(classify_kind("g_counter"), SymbolKind::Variable);
    }

    #[test]
    fn internal_linkage_from_static_prefix() {
        assert_eq!(classify_linkage("static void helper()", SymbolKind::Function), Linkage::Internal);
    }

    #[test]
    fn unused_symbols_have_zero_usage() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(crate::model::CompilationUnit {
            source_file: "a.cpp".into(),
            symbols_defined: vec!["int unused_fn()".into()],
            ..Default::default()
        });
        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.symbols.unused_symbols, 1);
    }

    #[test]
    fn multi_definition_external_symbol_flags_odr_violation() {
        let mut trace = crate::test_support::empty_trace();
        trace.units.push(crate::model::CompilationUnit {
            source_file: "a.cpp".into(),
            symbols_defined: vec!["int shared_fn()".into()],
            ..Default::default()
        });
        trace.units.push(crate::model::CompilationUnit {
            source_file: "b.cpp".into(),
            symbols_defined: vec!["int shared_fn()".into()],
            ..Default::default()
        });
        let result = analyze(&trace, &AnalysisOptions::default());
        assert_eq!(result.symbols.odr_violations, 1);
    }
}
