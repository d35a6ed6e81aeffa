//! Pattern trees.
//!
//! A [`Pattern`] is built once and never mutated. The engine validates it
//! against a subject [`Shape`](crate::Shape) and lowers it before any
//! dispatch, so nothing here is checked eagerly.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::capability::{
    ConstantPattern, Downcast, EqWith, Extract, ExtractAs, ExtractFn, Literal, Project,
};
use crate::shape::AltInfo;
use crate::subject::Subject;

/// A binding name.
pub type Name = Arc<str>;

/// An immutable pattern tree.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches anything, binds nothing.
    Wildcard,
    /// Matches anything and binds the name to the whole subject.
    Identifier(Name),
    /// Matches iff the equality capability accepts the subject.
    Constant(Arc<dyn ConstantPattern>),
    /// Matches a subject decomposing into the same number of components,
    /// each matching the corresponding sub-pattern.
    Structural(Vec<Pattern>),
    /// Matches a union whose active alternative satisfies the selector and
    /// whose payload matches `inner`.
    Alternative { selector: Selector, inner: Box<Pattern> },
    /// Matches when `inner` matches, also binding the name to the subject.
    Binding { name: Name, inner: Box<Pattern> },
    /// Matches when the extractor yields a value that `inner` matches.
    Extractor {
        extractor: Arc<dyn Extract>,
        inner: Box<Pattern>,
    },
    /// Matches when any alternative matches, tried left to right.
    Or(Vec<Pattern>),
}

impl Pattern {
    pub fn wildcard() -> Self {
        Pattern::Wildcard
    }

    pub fn ident(name: impl Into<Name>) -> Self {
        Pattern::Identifier(name.into())
    }

    /// A constant compared with `PartialEq` against subjects of the same type.
    pub fn constant<T>(value: T) -> Self
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Pattern::Constant(Arc::new(Literal::<T>::new(value)))
    }

    /// A constant compared with `C: PartialEq<S>` against subjects of type `S`.
    pub fn constant_as<S, C>(value: C) -> Self
    where
        S: Any,
        C: PartialEq<S> + fmt::Debug + Send + Sync + 'static,
    {
        Pattern::Constant(Arc::new(Literal::<C, S>::new(value)))
    }

    /// A constant compared with a custom equality.
    pub fn constant_with<C, F>(value: C, eq: F) -> Self
    where
        C: fmt::Debug + Send + Sync + 'static,
        F: Fn(&C, &dyn Subject) -> bool + Send + Sync + 'static,
    {
        Pattern::Constant(Arc::new(EqWith::new(value, eq)))
    }

    pub fn tuple(elements: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Structural(elements.into_iter().collect())
    }

    pub fn alt(selector: Selector, inner: Pattern) -> Self {
        Pattern::Alternative {
            selector,
            inner: Box::new(inner),
        }
    }

    /// Alternative at a fixed discriminant index.
    pub fn index(index: usize, inner: Pattern) -> Self {
        Self::alt(Selector::Index(index), inner)
    }

    /// Alternative whose payload type is `T`.
    pub fn of_type<T: Any>(inner: Pattern) -> Self {
        Self::alt(Selector::of::<T>(), inner)
    }

    /// Alternative whose payload type satisfies a concept.
    pub fn concept(concept: Concept, inner: Pattern) -> Self {
        Self::alt(Selector::Concept(concept), inner)
    }

    /// Whatever alternative is active.
    pub fn any_alt(inner: Pattern) -> Self {
        Self::alt(Selector::Any, inner)
    }

    pub fn bind(name: impl Into<Name>, inner: Pattern) -> Self {
        Pattern::Binding {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    pub fn extractor(extractor: Arc<dyn Extract>, inner: Pattern) -> Self {
        Pattern::Extractor {
            extractor,
            inner: Box::new(inner),
        }
    }

    /// Extractor producing an owned value from any subject.
    pub fn extract<O, F>(name: impl Into<Name>, extract: F, inner: Pattern) -> Self
    where
        O: Subject,
        F: Fn(&dyn Subject) -> Option<O> + Send + Sync + 'static,
    {
        Self::extractor(Arc::new(ExtractFn::new(name, extract)), inner)
    }

    /// Extractor producing an owned value from subjects of type `S`.
    pub fn extract_as<S, O, F>(name: impl Into<Name>, extract: F, inner: Pattern) -> Self
    where
        S: Any,
        O: Subject,
        F: Fn(&S) -> Option<O> + Send + Sync + 'static,
    {
        Self::extractor(Arc::new(ExtractAs::new(name, extract)), inner)
    }

    /// Extractor borrowing a part of subjects of type `S`.
    pub fn project<S, O, F>(name: impl Into<Name>, project: F, inner: Pattern) -> Self
    where
        S: Any,
        O: Subject,
        F: for<'a> Fn(&'a S) -> Option<&'a O> + Send + Sync + 'static,
    {
        Self::extractor(Arc::new(Project::new(name, project)), inner)
    }

    /// Derived-type test: matches when the subject's dynamic type is `T`
    /// (or `T` is a declared base view of it).
    pub fn downcast<T: Subject>(inner: Pattern) -> Self {
        Self::extractor(Arc::new(Downcast::<T>::new()), inner)
    }

    pub fn or(alternatives: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Or(alternatives.into_iter().collect())
    }

    /// Returns `true` if this pattern matches every value without looking at it.
    pub fn is_irrefutable(&self) -> bool {
        match self {
            Pattern::Wildcard | Pattern::Identifier(_) => true,
            Pattern::Binding { inner, .. } => inner.is_irrefutable(),
            Pattern::Or(alts) => alts.iter().any(Pattern::is_irrefutable),
            _ => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str("_"),
            Pattern::Identifier(name) => f.write_str(name),
            Pattern::Constant(constant) => f.write_str(&constant.describe()),
            Pattern::Structural(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Pattern::Alternative { selector, inner } => write!(f, "{selector} {inner}"),
            Pattern::Binding { name, inner } => write!(f, "{name} @ {inner}"),
            Pattern::Extractor { extractor, inner } => {
                write!(f, "({}!) {inner}", extractor.name())
            }
            Pattern::Or(alts) => {
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
        }
    }
}

/// Discriminant selector of an alternative pattern.
#[derive(Clone, Debug)]
pub enum Selector {
    /// Any alternative (`<auto>`).
    Any,
    /// The alternative at a fixed index.
    Index(usize),
    /// The alternative whose payload type is the given type.
    Type(TypeSelector),
    /// Alternatives whose payload type satisfies a named predicate.
    Concept(Concept),
}

impl Selector {
    /// Select by payload type.
    pub fn of<T: Any>() -> Self {
        Selector::Type(TypeSelector::of::<T>())
    }

    /// Test the selector against one alternative.
    pub fn accepts(&self, info: &AltInfo) -> bool {
        match self {
            Selector::Any => true,
            Selector::Index(index) => info.index == *index,
            Selector::Type(ty) => info.type_id == ty.type_id,
            Selector::Concept(concept) => concept.accepts(info),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Any => f.write_str("<auto>"),
            Selector::Index(index) => write!(f, "<{index}>"),
            Selector::Type(ty) => write!(f, "<{}>", ty.short_name()),
            Selector::Concept(concept) => write!(f, "<{}>", concept.name),
        }
    }
}

/// A type-identity selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeSelector {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl TypeSelector {
    pub fn of<T: Any>() -> Self {
        TypeSelector {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The type name without its module path.
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }
}

/// A named predicate over alternatives.
///
/// Stands in for a constraint on the alternative's type: `Integral`,
/// `Numeric`, or anything else a caller can decide from an [`AltInfo`].
#[derive(Clone, Copy)]
pub struct Concept {
    pub name: &'static str,
    test: fn(&AltInfo) -> bool,
}

impl Concept {
    pub const fn new(name: &'static str, test: fn(&AltInfo) -> bool) -> Self {
        Concept { name, test }
    }

    pub fn accepts(&self, info: &AltInfo) -> bool {
        (self.test)(info)
    }
}

impl fmt::Debug for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Concept").field(&self.name).finish()
    }
}

/// Strip the module path from a type name, keeping generic arguments intact.
///
/// `alloc::string::String` becomes `String`; `core::option::Option<i64>`
/// becomes `Option<i64>`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let head_end = full.find('<').unwrap_or(full.len());
    match full[..head_end].rfind("::") {
        Some(sep) => &full[sep + 2..],
        None => full,
    }
}
