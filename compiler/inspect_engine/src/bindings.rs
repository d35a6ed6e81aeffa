//! Binding environments.
//!
//! A successful match yields one flat environment per case. Names are
//! resolved to slots when the pattern is compiled, so matching only writes
//! references into a slot vector; lookup by name happens when a guard or an
//! action asks for a value.

use std::any::Any;
use std::fmt;

use inspect_ir::{downcast, Name, Subject};
use smallvec::SmallVec;

/// Slot storage for one match attempt. Most cases bind a handful of names.
pub(crate) type Slots<'s> = SmallVec<[Option<&'s dyn Subject>; 4]>;

/// Names bound by a successful match, each referring into the subject (or
/// into a value an extractor produced during the same dispatch).
///
/// The lifetime ties every binding to the dispatch call that produced it.
pub struct Bindings<'s> {
    names: &'s [Name],
    slots: Slots<'s>,
}

impl<'s> Bindings<'s> {
    pub(crate) fn new(names: &'s [Name], slots: Slots<'s>) -> Self {
        Bindings { names, slots }
    }

    /// The value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&'s dyn Subject> {
        let slot = self.names.iter().position(|bound| &**bound == name)?;
        self.slots.get(slot).copied().flatten()
    }

    /// The value bound to `name`, if its dynamic type is `T`.
    ///
    /// Looks through boxes and other forwarding subjects.
    pub fn get_as<T: Any>(&self, name: &str) -> Option<&'s T> {
        downcast::<T>(self.get(name)?)
    }

    /// Bound names and values, in order of first appearance in the pattern.
    pub fn iter(&self) -> impl Iterator<Item = (&'s str, &'s dyn Subject)> + '_ {
        self.names
            .iter()
            .zip(&self.slots)
            .filter_map(|(name, slot)| slot.map(|value| (&**name, value)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Bindings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Outcome of matching one pattern against one subject.
#[derive(Debug)]
pub enum MatchResult<'s> {
    Success(Bindings<'s>),
    Failure,
}

impl<'s> MatchResult<'s> {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    pub fn into_bindings(self) -> Option<Bindings<'s>> {
        match self {
            MatchResult::Success(bindings) => Some(bindings),
            MatchResult::Failure => None,
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
