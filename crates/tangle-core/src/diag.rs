//! Soft-failure diagnostics.
//!
//! Nothing here ever becomes an `Err` or a panic: a malformed binding
//! degrades a single widget, not the whole document. Conditions are reported
//! to a sink and resolved with a safe default at the point of detection.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// Aborts the whole `set_values` batch that contained it.
    #[error("setting unknown variable: {0}")]
    SettingUnknownVariable(String),

    /// Resolved with the always-empty-string formatter.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

/// Console-like sink for diagnostics.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink: forwards to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        log::warn!("tangle: {diagnostic}");
    }
}

/// Swallows everything (the "absent console" case).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}
