//! Immutable value types shared by every subsystem.
//!
//! All entities here are plain data: mutation only happens during assembly
//! by the owning subsystem (the analyzer that builds an `AnalysisResult`,
//! the suggester that builds a `Suggestion`, etc).

pub mod analysis;
pub mod options;
pub mod scalar;
pub mod suggestion;
pub mod trace;

pub use analysis::*;
pub use options::*;
pub use scalar::*;
pub use suggestion::*;
pub use trace::*;
