//! Case lists and first-match dispatch.

use std::fmt;
use std::marker::PhantomData;

use inspect_diagnostic::diagnostic as diag;
use inspect_diagnostic::{Diagnostic, Severity};
use inspect_ir::{Location, Pattern, Subject};
use scoped_arena::Scope;

use crate::bindings::{Bindings, MatchResult};
use crate::compile::{lower_case, CompiledPattern};
use crate::config::{Exhaustiveness, InspectConfig, LintLevel};
use crate::errors::{BuildError, DispatchError};
use crate::usefulness;

type Guard = Box<dyn Fn(&Bindings<'_>) -> bool + Send + Sync>;
type Action<R> = Box<dyn Fn(&Bindings<'_>) -> R + Send + Sync>;

struct Case<R> {
    pattern: CompiledPattern,
    guard: Option<Guard>,
    action: Action<R>,
}

/// Result of a dispatch that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<R> {
    /// Case `case` was selected and its action returned `value`.
    Matched { case: usize, value: R },
    /// No case applied; nothing ran.
    NoMatch,
}

impl<R> Outcome<R> {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Matched { .. })
    }

    /// Index of the selected case.
    pub fn case(&self) -> Option<usize> {
        match self {
            Outcome::Matched { case, .. } => Some(*case),
            Outcome::NoMatch => None,
        }
    }

    /// The action's result.
    pub fn value(self) -> Option<R> {
        match self {
            Outcome::Matched { value, .. } => Some(value),
            Outcome::NoMatch => None,
        }
    }
}

/// An ordered, validated case list over subjects of type `T`, producing `R`.
///
/// Built once and shared freely: dispatch takes `&self` and keeps all
/// per-call state on the caller's stack.
pub struct Inspector<T, R> {
    cases: Vec<Case<R>>,
    config: InspectConfig,
    warnings: Vec<Diagnostic>,
    subject: PhantomData<fn(&T)>,
}

impl<T: Subject, R> Inspector<T, R> {
    pub fn builder() -> InspectorBuilder<T, R> {
        InspectorBuilder {
            config: InspectConfig::default(),
            cases: Vec::new(),
            subject: PhantomData,
        }
    }

    /// Run the first applicable case on `subject`.
    pub fn dispatch(&self, subject: &T) -> Result<Outcome<R>, DispatchError> {
        self.select(subject, |_, case, bindings| (case.action)(bindings))
    }

    /// Select a case without running its action; `f` receives the case index
    /// and its bindings instead.
    pub fn dispatch_with<U>(
        &self,
        subject: &T,
        f: impl FnOnce(usize, &Bindings<'_>) -> U,
    ) -> Result<Outcome<U>, DispatchError> {
        self.select(subject, |index, _, bindings| f(index, bindings))
    }

    /// Diagnostics of warning severity produced while building.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn config(&self) -> InspectConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(subject = subject.type_name()))]
    fn select<U>(
        &self,
        subject: &T,
        run: impl FnOnce(usize, &Case<R>, &Bindings<'_>) -> U,
    ) -> Result<Outcome<U>, DispatchError> {
        let subject: &dyn Subject = subject;
        let scope = Scope::new();

        for (index, case) in self.cases.iter().enumerate() {
            tracing::trace!(case = index, pattern = %case.pattern.pattern(), "trying case");
            let bindings = match case.pattern.matches(subject, &scope)? {
                MatchResult::Success(bindings) => bindings,
                MatchResult::Failure => continue,
            };
            if let Some(guard) = &case.guard {
                if !guard(&bindings) {
                    tracing::trace!(case = index, "guard rejected");
                    continue;
                }
            }
            tracing::trace!(case = index, "case selected");
            return Ok(Outcome::Matched {
                case: index,
                value: run(index, case, &bindings),
            });
        }

        match self.config.exhaustiveness {
            Exhaustiveness::Optional => {
                tracing::trace!("no case matched");
                Ok(Outcome::NoMatch)
            }
            Exhaustiveness::Strict => Err(DispatchError::NoMatch {
                type_name: subject.type_name(),
            }),
        }
    }
}

impl<T, R> fmt::Debug for Inspector<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("subject", &std::any::type_name::<T>())
            .field("cases", &self.cases.len())
            .field("config", &self.config)
            .field("warnings", &self.warnings.len())
            .finish()
    }
}

/// Collects cases, then validates them all at once in [`build`](Self::build).
pub struct InspectorBuilder<T, R> {
    config: InspectConfig,
    cases: Vec<(Pattern, Option<Guard>, Action<R>)>,
    subject: PhantomData<fn(&T)>,
}

impl<T: Subject, R> InspectorBuilder<T, R> {
    #[must_use]
    pub fn with_config(mut self, config: InspectConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a case.
    #[must_use]
    pub fn case(
        mut self,
        pattern: Pattern,
        action: impl Fn(&Bindings<'_>) -> R + Send + Sync + 'static,
    ) -> Self {
        self.cases.push((pattern, None, Box::new(action)));
        self
    }

    /// Add a case that only applies when `guard` holds for its bindings.
    #[must_use]
    pub fn case_if(
        mut self,
        pattern: Pattern,
        guard: impl Fn(&Bindings<'_>) -> bool + Send + Sync + 'static,
        action: impl Fn(&Bindings<'_>) -> R + Send + Sync + 'static,
    ) -> Self {
        self.cases
            .push((pattern, Some(Box::new(guard)), Box::new(action)));
        self
    }

    /// Validate every case against `T`'s shape and run coverage analysis.
    pub fn build(self) -> Result<Inspector<T, R>, BuildError> {
        let shape = T::shape();
        let mut diagnostics = Vec::new();

        let cases: Vec<Case<R>> = self
            .cases
            .into_iter()
            .enumerate()
            .map(|(index, (pattern, guard, action))| Case {
                pattern: lower_case(&pattern, &shape, index, &mut diagnostics),
                guard,
                action,
            })
            .collect();

        // Coverage is meaningless over patterns that failed validation.
        if !diagnostics.iter().any(Diagnostic::is_error) {
            let rows: Vec<_> = cases
                .iter()
                .map(|case| (&case.pattern.root, case.guard.is_some()))
                .collect();
            let coverage = usefulness::check(&shape, &rows);

            let severity = match self.config.redundancy {
                LintLevel::Allow => None,
                LintLevel::Warn => Some(Severity::Warning),
                LintLevel::Deny => Some(Severity::Error),
            };
            if let Some(severity) = severity {
                for &index in &coverage.redundant {
                    tracing::warn!(case = index, subject = std::any::type_name::<T>(), "unreachable case");
                    diagnostics.push(diag::redundant_case(Location::case(index), severity));
                }
            }

            if self.config.exhaustiveness == Exhaustiveness::Strict
                && shape.is_known()
                && !coverage.missing.is_empty()
            {
                diagnostics.push(diag::non_exhaustive(&coverage.missing));
            }
        }

        let (errors, warnings): (Vec<_>, Vec<_>) =
            diagnostics.into_iter().partition(Diagnostic::is_error);
        if !errors.is_empty() {
            return Err(BuildError::new(errors));
        }

        tracing::debug!(
            subject = std::any::type_name::<T>(),
            cases = cases.len(),
            warnings = warnings.len(),
            "inspector built"
        );
        Ok(Inspector {
            cases,
            config: self.config,
            warnings,
            subject: PhantomData,
        })
    }
}
