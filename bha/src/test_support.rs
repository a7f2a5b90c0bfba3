//! Shared fixture builders for unit tests across modules.

#![cfg(test)]

use crate::model::{BuildSystemType, BuildTrace, CompilerType};

pub fn empty_trace() -> BuildTrace {
    BuildTrace {
        id: "t".into(),
        timestamp: chrono::Utc::now(),
        total_time: crate::model::NanoDuration::ZERO,
        compiler: CompilerType::Clang,
        compiler_version: "18.0".into(),
        build_system: BuildSystemType::Ninja,
        configuration: "Release".into(),
        platform: "linux-x86_64".into(),
        git_info: None,
        units: Vec::new(),
    }
}
