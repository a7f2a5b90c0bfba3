//! SARIF 2.1.0 export of suggestions, for consumption by code-scanning
//! dashboards that already understand the format.

use super::{filtered_suggestions, Exporter, ExportFormat};
use crate::error::Result;
use crate::model::{AnalysisResult, ExportOptions, Priority, Suggestion};
use serde::Serialize;

pub struct SarifExporter;

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool {
    driver: Driver,
}

#[derive(Serialize)]
struct Driver {
    name: &'static str,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: &'static str,
    rules: Vec<Rule>,
}

#[derive(Serialize)]
struct Rule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: TextMessage,
}

#[derive(Serialize)]
struct TextMessage {
    text: String,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: &'static str,
    message: TextMessage,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Location {
    #[serde(rename = "physicalLocation")]
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
struct ArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
struct Region {
    #[serde(rename = "startLine")]
    start_line: usize,
}

fn sarif_level(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical | Priority::High => "error",
        Priority::Medium => "warning",
        Priority::Low => "note",
    }
}

impl Exporter for SarifExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Sarif
    }

    fn file_extension(&self) -> &'static str {
        "sarif"
    }

    fn format_name(&self) -> &'static str {
        "SARIF"
    }

    fn export_to_string(
        &self,
        _analysis: &AnalysisResult,
        suggestions: &[Suggestion],
        options: &ExportOptions,
    ) -> Result<String> {
        let kept = filtered_suggestions(suggestions, options);

        let mut rule_ids = std::collections::BTreeSet::new();
        let mut rules = Vec::new();
        for s in &kept {
            let id = s.suggestion_type.as_str().to_string();
            if rule_ids.insert(id.clone()) {
                rules.push(Rule {
                    id: id.clone(),
                    name: id,
                    short_description: TextMessage {
                        text: s.suggestion_type.as_str().to_string(),
                    },
                });
            }
        }

        let results = kept
            .iter()
            .map(|s| SarifResult {
                rule_id: s.suggestion_type.as_str().to_string(),
                level: sarif_level(s.priority),
                message: TextMessage {
                    text: s.description.clone(),
                },
                locations: vec![Location {
                    physical_location: PhysicalLocation {
                        artifact_location: ArtifactLocation {
                            uri: s.target_file.path.display().to_string(),
                        },
                        region: Region {
                            start_line: s.target_file.line_start.max(1),
                        },
                    },
                }],
            })
            .collect();

        let log = SarifLog {
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            version: "2.1.0",
            runs: vec![Run {
                tool: Tool {
                    driver: Driver {
                        name: "bha",
                        version: env!("CARGO_PKG_VERSION").to_string(),
                        information_uri: "https://bha.dev",
                        rules,
                    },
                },
                results,
            }],
        };

        let rendered = if options.pretty_print {
            serde_json::to_string_pretty(&log)?
        } else {
            serde_json::to_string(&log)?
        };
        Ok(rendered)
    }
}
