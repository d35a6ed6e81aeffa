//! Error types surfaced to callers.

use std::fmt::Write;

use inspect_diagnostic::emitter::{tally, DiagnosticEmitter};
use inspect_diagnostic::{Diagnostic, ErrorCode};
use inspect_ir::InvalidSubject;

/// A case list rejected at construction time.
///
/// Carries every error found, not just the first.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.diagnostics))]
pub struct BuildError {
    diagnostics: Vec<Diagnostic>,
}

impl BuildError {
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        BuildError { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if some diagnostic carries `code`.
    pub fn has(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|diag| diag.code == code)
    }

    /// Emit every diagnostic followed by a summary line.
    pub fn report(&self, emitter: &mut dyn DiagnosticEmitter) {
        emitter.emit_all(&self.diagnostics);
        let (errors, warnings) = tally(&self.diagnostics);
        emitter.emit_summary(errors, warnings);
        emitter.flush();
    }
}

fn render(diagnostics: &[Diagnostic]) -> String {
    let mut out = format!(
        "case list rejected with {} error{}",
        diagnostics.len(),
        if diagnostics.len() == 1 { "" } else { "s" }
    );
    for diag in diagnostics {
        let _ = write!(out, "\n{diag}");
    }
    out
}

/// A dispatch that could not run to completion.
///
/// Ordinary match failure is never an error; see
/// [`Outcome::NoMatch`](crate::Outcome::NoMatch).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The subject (or a part of it) cannot be inspected.
    #[error(transparent)]
    InvalidSubject(#[from] InvalidSubject),
    /// No case matched and the inspector is strict.
    #[error("no case matched a `{type_name}` subject")]
    NoMatch { type_name: &'static str },
}
