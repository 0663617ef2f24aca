//! Shared domain-neutral types.

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
