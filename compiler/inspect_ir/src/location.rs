//! Locations inside a case list.
//!
//! Patterns have no source text, so diagnostics point at a case index plus
//! the path of steps taken from the root of that case's pattern.

use std::fmt;

use crate::pattern::Name;

/// One step from a pattern node to one of its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Component `n` of a structural pattern.
    Element(usize),
    /// The nested pattern of an alternative pattern (selector rendered).
    Alternative(String),
    /// The nested pattern of a binding pattern.
    Binding(Name),
    /// The nested pattern of an extractor pattern.
    Extractor(String),
    /// Branch `n` of an or-pattern.
    Branch(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Element(index) => write!(f, "[{index}]"),
            PathStep::Alternative(selector) => f.write_str(selector),
            PathStep::Binding(name) => write!(f, "{name} @"),
            PathStep::Extractor(name) => write!(f, "({name}!)"),
            PathStep::Branch(index) => write!(f, "|{index}"),
        }
    }
}

/// Where a diagnostic applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    /// Index of the case in declaration order, if the diagnostic is about one.
    pub case: Option<usize>,
    /// Steps from the root of the case's pattern.
    pub path: Vec<PathStep>,
}

impl Location {
    /// The whole case list.
    pub fn case_list() -> Self {
        Location::default()
    }

    /// The root pattern of case `index`.
    pub fn case(index: usize) -> Self {
        Location {
            case: Some(index),
            path: Vec::new(),
        }
    }

    /// This location extended by one step.
    #[must_use]
    pub fn child(&self, step: PathStep) -> Self {
        let mut path = self.path.clone();
        path.push(step);
        Location {
            case: self.case,
            path,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.case {
            Some(index) => write!(f, "case {index}")?,
            None => f.write_str("case list")?,
        }
        if !self.path.is_empty() {
            f.write_str(", at ")?;
            for (i, step) in self.path.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{step}")?;
            }
        }
        Ok(())
    }
}
