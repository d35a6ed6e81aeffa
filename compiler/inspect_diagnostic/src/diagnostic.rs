//! Core diagnostic types for case-list validation.
//!
//! Defines [`Diagnostic`] and [`Severity`], plus one constructor per pattern
//! problem so every phase phrases the same problem the same way.

use std::fmt;

use inspect_ir::Location;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic with all context needed to fix a case list.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Where in the case list the problem is.
    pub location: Location,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Text suggestions for fixing the problem.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            location: Location::case_list(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Add a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Change the severity, keeping everything else.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        write!(f, "\n  --> {}", self.location)?;
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }
        Ok(())
    }
}

// Pattern problems

/// A name bound more than once within one case.
pub fn duplicate_binding(location: Location, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3001)
        .with_message(format!("`{name}` is bound more than once in the same case"))
        .at(location)
        .with_suggestion(format!("rename one of the `{name}` bindings"))
}

pub fn arity_mismatch(location: Location, expected: usize, found: usize) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3002)
        .with_message(format!(
            "structural pattern has {found} element{}, but the subject has {expected}",
            if found == 1 { "" } else { "s" }
        ))
        .at(location)
}

/// Structural pattern applied to something that has no components.
pub fn not_decomposable(location: Location, kind: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3003)
        .with_message(format!("structural pattern applied to a {kind} subject"))
        .at(location)
        .with_note("only tuples and sequences decompose into components")
}

pub fn not_a_union(location: Location, kind: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3004)
        .with_message(format!("alternative pattern applied to a {kind} subject"))
        .at(location)
        .with_note("alternative patterns need a tagged union")
}

/// Index selector naming no alternative. `valid` lists the declared
/// discriminants, which need not be contiguous.
pub fn index_out_of_domain(location: Location, index: usize, valid: &[usize]) -> Diagnostic {
    let listed: Vec<String> = valid.iter().map(ToString::to_string).collect();
    Diagnostic::error(ErrorCode::E3005)
        .with_message(format!("no alternative has index {index}"))
        .at(location)
        .with_note(format!("valid indices are {}", listed.join(", ")))
}

/// Type selector naming a type no alternative carries.
pub fn type_out_of_domain(location: Location, type_name: &str, domain: &[&str]) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3006)
        .with_message(format!("no alternative carries type `{type_name}`"))
        .at(location)
        .with_note(format!("alternatives are: {}", domain.join(", ")))
}

/// Type selector matching several alternatives of the same payload type.
pub fn ambiguous_type(location: Location, type_name: &str, indices: &[usize]) -> Diagnostic {
    let listed: Vec<String> = indices.iter().map(ToString::to_string).collect();
    Diagnostic::error(ErrorCode::E3007)
        .with_message(format!(
            "type `{type_name}` is carried by more than one alternative"
        ))
        .at(location)
        .with_note(format!("alternatives {} all carry it", listed.join(", ")))
        .with_suggestion("select by index instead")
}

pub fn empty_concept(location: Location, concept: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3008)
        .with_message(format!("no alternative satisfies `{concept}`"))
        .at(location)
}

/// Or-pattern whose branches bind different sets of names.
pub fn or_binding_mismatch(location: Location, expected: &[&str], found: &[&str]) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3009)
        .with_message("or-pattern branches bind different names")
        .at(location)
        .with_note(format!(
            "the first branch binds {{{}}}, this one binds {{{}}}",
            expected.join(", "),
            found.join(", ")
        ))
}

/// Case list that leaves some values uncovered.
pub fn non_exhaustive(missing: &[String]) -> Diagnostic {
    let diag = Diagnostic::error(ErrorCode::E3010)
        .with_message("case list is not exhaustive")
        .with_suggestion("add a case for the missing values, or end with `_`");
    missing.iter().fold(diag, |diag, witness| {
        diag.with_note(format!("not covered: {witness}"))
    })
}

/// A case no value can reach.
///
/// Always carries `W3001`; the severity decides whether it blocks
/// construction.
pub fn redundant_case(location: Location, severity: Severity) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3001)
        .with_severity(severity)
        .with_message("unreachable case")
        .at(location)
        .with_note("every value it matches is matched by an earlier case")
}

#[cfg(test)]
mod tests;
