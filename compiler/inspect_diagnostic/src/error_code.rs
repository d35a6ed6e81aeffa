//! Error codes for all pattern diagnostics.
//!
//! Codes live in the E3xxx range (pattern errors); warnings use W3xxx.
//! The first digit matches the pattern phase so codes stay searchable.

use std::fmt;

/// Error codes for all pattern diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// The same name is bound twice in one case
    E3001,
    /// Structural pattern arity differs from the subject's arity
    E3002,
    /// Structural pattern on a subject that does not decompose
    E3003,
    /// Alternative pattern on a subject that is not a union
    E3004,
    /// Index selector outside the discriminant domain
    E3005,
    /// Type selector naming a type outside the discriminant domain
    E3006,
    /// Type selector matching more than one alternative
    E3007,
    /// Concept selector satisfied by no alternative
    E3008,
    /// Or-pattern branches bind different names
    E3009,
    /// Case list does not cover every value (strict mode)
    E3010,
    /// Case can never be selected (warning)
    W3001,
}

impl ErrorCode {
    /// All error codes, for iteration and lookup.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E3007,
        ErrorCode::E3008,
        ErrorCode::E3009,
        ErrorCode::E3010,
        ErrorCode::W3001,
    ];

    /// Get the code as a string (e.g., "E3001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::W3001 => "W3001",
        }
    }

    /// One-line description, for `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "duplicate binding name in one case",
            ErrorCode::E3002 => "structural pattern arity mismatch",
            ErrorCode::E3003 => "structural pattern on a non-decomposable subject",
            ErrorCode::E3004 => "alternative pattern on a subject that is not a union",
            ErrorCode::E3005 => "index selector outside the discriminant domain",
            ErrorCode::E3006 => "type selector outside the discriminant domain",
            ErrorCode::E3007 => "ambiguous type selector",
            ErrorCode::E3008 => "concept selector satisfied by no alternative",
            ErrorCode::E3009 => "or-pattern branches bind different names",
            ErrorCode::E3010 => "non-exhaustive case list",
            ErrorCode::W3001 => "unreachable case",
        }
    }

    /// Check if this is a warning code (W3xxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W3001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string like `"E3001"` or `"w3001"` (case-insensitive).
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
