//! Capabilities plugged into patterns.
//!
//! Constant patterns delegate equality to a [`ConstantPattern`], extractor
//! patterns delegate to an [`Extract`]. Both are chosen when the pattern is
//! constructed: `Pattern::constant` picks `PartialEq` on the subject type,
//! `Pattern::constant_as` picks `PartialEq<S>` on the constant's type, and
//! `Pattern::constant_with` takes an explicit function. Nothing is resolved by
//! name at match time.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::pattern::{short_type_name, Name};
use crate::shape::Shape;
use crate::subject::{downcast, downcast_view, Subject};

/// Equality capability of a constant pattern.
pub trait ConstantPattern: fmt::Debug + Send + Sync {
    /// Returns `true` if the subject equals the constant.
    fn matches(&self, subject: &dyn Subject) -> bool;

    /// Rendering of the constant for diagnostics.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// A constant compared through `C: PartialEq<S>` with subjects of type `S`.
///
/// Subjects of any other dynamic type never match.
pub struct Literal<C, S = C> {
    value: C,
    subject: PhantomData<fn(&S)>,
}

impl<C, S> Literal<C, S> {
    pub fn new(value: C) -> Self {
        Literal {
            value,
            subject: PhantomData,
        }
    }

    pub fn value(&self) -> &C {
        &self.value
    }
}

impl<C: fmt::Debug, S> fmt::Debug for Literal<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<C, S> ConstantPattern for Literal<C, S>
where
    C: PartialEq<S> + fmt::Debug + Send + Sync + 'static,
    S: Any,
{
    fn matches(&self, subject: &dyn Subject) -> bool {
        downcast::<S>(subject).is_some_and(|s| self.value == *s)
    }
}

/// A constant compared with a caller-supplied equality.
pub struct EqWith<C, F> {
    value: C,
    eq: F,
}

impl<C, F> EqWith<C, F>
where
    F: Fn(&C, &dyn Subject) -> bool,
{
    pub fn new(value: C, eq: F) -> Self {
        EqWith { value, eq }
    }
}

impl<C: fmt::Debug, F> fmt::Debug for EqWith<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<C, F> ConstantPattern for EqWith<C, F>
where
    C: fmt::Debug + Send + Sync,
    F: Fn(&C, &dyn Subject) -> bool + Send + Sync,
{
    fn matches(&self, subject: &dyn Subject) -> bool {
        (self.eq)(&self.value, subject)
    }
}

/// The result of a successful extraction.
pub enum Extracted<'a> {
    /// A part of the subject.
    Borrowed(&'a dyn Subject),
    /// A value computed from the subject. The engine keeps it alive for the
    /// rest of the dispatch call and binds it by reference.
    Owned(Box<dyn Subject>),
}

impl fmt::Debug for Extracted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extracted::Borrowed(value) => f.debug_tuple("Borrowed").field(value).finish(),
            Extracted::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
        }
    }
}

/// Extraction capability of an extractor pattern.
pub trait Extract: fmt::Debug + Send + Sync {
    /// Name shown in diagnostics and pattern rendering.
    fn name(&self) -> &str;

    /// Run the extractor. `None` is an ordinary match failure.
    fn extract<'a>(&self, subject: &'a dyn Subject) -> Option<Extracted<'a>>;

    /// Static shape of the extracted value, for validating the nested pattern.
    fn output_shape(&self) -> Shape {
        Shape::Unknown
    }
}

/// Derived-type test on open polymorphic values.
///
/// Present iff the subject's dynamic type is exactly `T`, or the value
/// declares `T` as a base view. Cross-casts are absent.
pub struct Downcast<T> {
    target: PhantomData<fn() -> T>,
}

impl<T> Downcast<T> {
    pub fn new() -> Self {
        Downcast {
            target: PhantomData,
        }
    }
}

impl<T> Default for Downcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Downcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Downcast<{}>", short_type_name(std::any::type_name::<T>()))
    }
}

impl<T: Subject> Extract for Downcast<T> {
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<T>())
    }

    fn extract<'a>(&self, subject: &'a dyn Subject) -> Option<Extracted<'a>> {
        downcast_view::<T>(subject).map(|value| Extracted::Borrowed(value as &dyn Subject))
    }

    fn output_shape(&self) -> Shape {
        T::shape()
    }
}

/// Extractor computing an owned value from any subject.
pub struct ExtractFn<O, F> {
    name: Name,
    extract: F,
    output: PhantomData<fn() -> O>,
}

impl<O, F> ExtractFn<O, F>
where
    F: Fn(&dyn Subject) -> Option<O>,
{
    pub fn new(name: impl Into<Name>, extract: F) -> Self {
        ExtractFn {
            name: name.into(),
            extract,
            output: PhantomData,
        }
    }
}

impl<O, F> fmt::Debug for ExtractFn<O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExtractFn").field(&self.name).finish()
    }
}

impl<O, F> Extract for ExtractFn<O, F>
where
    O: Subject,
    F: Fn(&dyn Subject) -> Option<O> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn extract<'a>(&self, subject: &'a dyn Subject) -> Option<Extracted<'a>> {
        (self.extract)(subject).map(|value| Extracted::Owned(Box::new(value)))
    }

    fn output_shape(&self) -> Shape {
        O::shape()
    }
}

/// Extractor computing an owned value from subjects of type `S`.
pub struct ExtractAs<S, O, F> {
    name: Name,
    extract: F,
    types: PhantomData<fn(&S) -> O>,
}

impl<S, O, F> ExtractAs<S, O, F>
where
    F: Fn(&S) -> Option<O>,
{
    pub fn new(name: impl Into<Name>, extract: F) -> Self {
        ExtractAs {
            name: name.into(),
            extract,
            types: PhantomData,
        }
    }
}

impl<S, O, F> fmt::Debug for ExtractAs<S, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExtractAs").field(&self.name).finish()
    }
}

impl<S, O, F> Extract for ExtractAs<S, O, F>
where
    S: Any,
    O: Subject,
    F: Fn(&S) -> Option<O> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn extract<'a>(&self, subject: &'a dyn Subject) -> Option<Extracted<'a>> {
        let input = downcast::<S>(subject)?;
        (self.extract)(input).map(|value| Extracted::Owned(Box::new(value)))
    }

    fn output_shape(&self) -> Shape {
        O::shape()
    }
}

/// Extractor borrowing a part of subjects of type `S`.
pub struct Project<S, O, F> {
    name: Name,
    project: F,
    types: PhantomData<fn(&S) -> &O>,
}

impl<S, O, F> Project<S, O, F>
where
    F: for<'a> Fn(&'a S) -> Option<&'a O>,
{
    pub fn new(name: impl Into<Name>, project: F) -> Self {
        Project {
            name: name.into(),
            project,
            types: PhantomData,
        }
    }
}

impl<S, O, F> fmt::Debug for Project<S, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Project").field(&self.name).finish()
    }
}

impl<S, O, F> Extract for Project<S, O, F>
where
    S: Any,
    O: Subject,
    F: for<'a> Fn(&'a S) -> Option<&'a O> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn extract<'a>(&self, subject: &'a dyn Subject) -> Option<Extracted<'a>> {
        let input = downcast::<S>(subject)?;
        (self.project)(input).map(|part| Extracted::Borrowed(part as &dyn Subject))
    }

    fn output_shape(&self) -> Shape {
        O::shape()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
