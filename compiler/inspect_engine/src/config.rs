//! Dispatch policy.

/// What happens when no case matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Exhaustiveness {
    /// No match is an ordinary outcome.
    #[default]
    Optional,
    /// The case list must cover every value. Checked when the inspector is
    /// built if the subject shape is known, otherwise reported per dispatch.
    Strict,
}

/// How a lint is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LintLevel {
    Allow,
    #[default]
    Warn,
    /// Treat as a construction error.
    Deny,
}

/// Configuration for building an inspector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InspectConfig {
    pub exhaustiveness: Exhaustiveness,
    /// Level for cases no value can reach.
    pub redundancy: LintLevel,
}

impl InspectConfig {
    /// Strict exhaustiveness, redundant cases still warn.
    pub fn strict() -> Self {
        InspectConfig {
            exhaustiveness: Exhaustiveness::Strict,
            ..InspectConfig::default()
        }
    }

    #[must_use]
    pub fn with_exhaustiveness(mut self, exhaustiveness: Exhaustiveness) -> Self {
        self.exhaustiveness = exhaustiveness;
        self
    }

    #[must_use]
    pub fn with_redundancy(mut self, redundancy: LintLevel) -> Self {
        self.redundancy = redundancy;
        self
    }
}
