//! Structured error type shared by every fallible operation in the engine.

use std::fmt;
use thiserror::Error;

/// Closed set of error categories an operation can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    ParseError,
    IoError,
    ConfigError,
    AnalysisError,
    PluginError,
    GitError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidArgument => "InvalidArgument",
            ErrorCode::NotFound => "NotFound",
            ErrorCode::ParseError => "ParseError",
            ErrorCode::IoError => "IoError",
            ErrorCode::ConfigError => "ConfigError",
            ErrorCode::AnalysisError => "AnalysisError",
            ErrorCode::PluginError => "PluginError",
            ErrorCode::GitError => "GitError",
            ErrorCode::InternalError => "InternalError",
        };
        f.write_str(s)
    }
}

/// Tagged error carrying a code, a message and optional free-form context.
///
/// `Display` renders `[<Code>] <message> (context: <context>)`, omitting the
/// parenthetical when no context has been attached.
#[derive(Error, Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub context: Option<String>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let next = context.into();
        self.context = Some(match self.context.take() {
            Some(existing) => format!("{existing}; {next}"),
            None => next,
        });
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn analysis_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AnalysisError, message)
    }

    pub fn plugin_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PluginError, message)
    }

    pub fn git_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GitError, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "[{}] {} (context: {})", self.code, self.message, ctx),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::parse_error(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::config_error(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::io_error(e.to_string())
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_without_context() {
        let e = Error::not_found("missing trace file");
        assert_eq!(e.to_string(), "[NotFound] missing trace file");
    }

    #[test]
    fn renders_with_context() {
        let e = Error::not_found("missing trace file").with_context("trace.json");
        assert_eq!(
            e.to_string(),
            "[NotFound] missing trace file (context: trace.json)"
        );
    }

    #[test]
    fn appends_additional_context() {
        let e = Error::parse_error("bad json")
            .with_context("trace.json")
            .with_context("line 4");
        assert_eq!(
            e.to_string(),
            "[ParseError] bad json (context: trace.json; line 4)"
        );
    }
}
