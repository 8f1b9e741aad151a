//! Human-readable output for the single-pair tool.

mod console;
mod diagnostics;


pub use console::ConsoleReport;
pub use diagnostics::{Diagnostics, Evidence, IssueDiagnostic, SemanticVerdict};
