//! Subject capabilities.
//!
//! The engine never looks inside a value on its own. It asks the value, through
//! [`Subject`], for the active alternative of a tagged union, for its ordered
//! components, or for the value an indirection forwards to. Everything it gets
//! back is a borrow of the subject's storage.

use std::any::{Any, TypeId};
use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::shape::{AltInfo, AltShape, Shape, ShapeOf};

/// Ordered component references of a decomposable subject.
///
/// Inline capacity covers the common pair/triple/quad cases.
pub type Components<'a> = SmallVec<[&'a dyn Subject; 4]>;

/// The active alternative of a tagged union.
#[derive(Clone, Copy, Debug)]
pub struct Active<'a> {
    /// Discriminant index of the active alternative.
    pub index: usize,
    /// The active payload.
    pub payload: &'a dyn Subject,
}

impl<'a> Active<'a> {
    pub fn new(index: usize, payload: &'a dyn Subject) -> Self {
        Active { index, payload }
    }
}

/// A subject that cannot be inspected at all.
///
/// Raised when the discriminant or components of a value in an invalidated
/// state are requested (e.g. a union left without an active alternative).
/// This is never an ordinary non-match: no pattern can apply to such a value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid subject `{type_name}`: {reason}")]
pub struct InvalidSubject {
    pub type_name: &'static str,
    pub reason: String,
}

impl InvalidSubject {
    pub fn new(type_name: &'static str, reason: impl Into<String>) -> Self {
        InvalidSubject {
            type_name,
            reason: reason.into(),
        }
    }

    /// A tagged union with no active alternative.
    #[cold]
    pub fn valueless(type_name: &'static str) -> Self {
        Self::new(type_name, "tagged union has no active alternative")
    }
}

/// Object-safe access to `Any` for every subject.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value that can be inspected.
///
/// All accessors have defaults describing an opaque scalar, so leaf types only
/// need `impl Subject for MyType {}` plus a [`Subject::shape`] if they want
/// construction-time validation.
pub trait Subject: Any + AsAny + fmt::Debug {
    /// Static description of this type.
    fn shape() -> Shape
    where
        Self: Sized,
    {
        Shape::Unknown
    }

    /// Name of the concrete type, for diagnostics and dynamic selectors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The active alternative, for tagged unions.
    ///
    /// `Ok(None)` means the value is not a union.
    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        Ok(None)
    }

    /// The ordered components, for decomposable values.
    ///
    /// `Ok(None)` means the value does not decompose.
    fn components(&self) -> Result<Option<Components<'_>>, InvalidSubject> {
        Ok(None)
    }

    /// The value this one forwards to (boxes, handles to polymorphic objects).
    fn dynamic(&self) -> Option<&dyn Subject> {
        None
    }

    /// A view of this value as one of its declared base types.
    fn view(&self, target: TypeId) -> Option<&dyn Any> {
        let _ = target;
        None
    }
}

/// Follow the forwarding chain to the innermost value.
pub fn innermost(subject: &dyn Subject) -> &dyn Subject {
    let mut current = subject;
    while let Some(next) = current.dynamic() {
        current = next;
    }
    current
}

/// Downcast to the exact dynamic type `T`.
pub fn downcast<T: Any>(subject: &dyn Subject) -> Option<&T> {
    innermost(subject).as_any().downcast_ref::<T>()
}

/// Downcast to `T`, accepting either the exact dynamic type or a base view.
///
/// Cross-casts are never attempted: a value only answers for the base types
/// it declares through [`Subject::view`].
pub fn downcast_view<T: Any>(subject: &dyn Subject) -> Option<&T> {
    let inner = innermost(subject);
    if let Some(exact) = inner.as_any().downcast_ref::<T>() {
        return Some(exact);
    }
    inner
        .view(TypeId::of::<T>())
        .and_then(|base| base.downcast_ref::<T>())
}

// Scalars

macro_rules! scalar_subject {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Subject for $ty {
                fn shape() -> Shape {
                    Shape::Scalar
                }
            }
        )*
    };
}

scalar_subject!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    bool,
    char,
    String,
    &'static str,
);

// Tuples

impl Subject for () {
    fn shape() -> Shape {
        Shape::Tuple(Vec::new())
    }

    fn components(&self) -> Result<Option<Components<'_>>, InvalidSubject> {
        Ok(Some(SmallVec::new()))
    }
}

macro_rules! tuple_subject {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Subject),+> Subject for ($($name,)+) {
            fn shape() -> Shape {
                Shape::Tuple(vec![$(ShapeOf::of::<$name>()),+])
            }

            fn components(&self) -> Result<Option<Components<'_>>, InvalidSubject> {
                Ok(Some(smallvec![$(&self.$idx as &dyn Subject),+]))
            }
        }
    };
}

tuple_subject!(A: 0);
tuple_subject!(A: 0, B: 1);
tuple_subject!(A: 0, B: 1, C: 2);
tuple_subject!(A: 0, B: 1, C: 2, D: 3);
tuple_subject!(A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_subject!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

// Closed unions

impl<T: Subject> Subject for Option<T> {
    fn shape() -> Shape {
        Shape::Union(vec![
            AltShape::new(AltInfo::new::<()>(0, "None"), ShapeOf::of::<()>()),
            AltShape::new(AltInfo::new::<T>(1, "Some"), ShapeOf::of::<T>()),
        ])
    }

    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        Ok(Some(match self {
            None => Active::new(0, &()),
            Some(value) => Active::new(1, value),
        }))
    }
}

impl<T: Subject, E: Subject> Subject for Result<T, E> {
    fn shape() -> Shape {
        Shape::Union(vec![
            AltShape::new(AltInfo::new::<T>(0, "Ok"), ShapeOf::of::<T>()),
            AltShape::new(AltInfo::new::<E>(1, "Err"), ShapeOf::of::<E>()),
        ])
    }

    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        Ok(Some(match self {
            Ok(value) => Active::new(0, value),
            Err(error) => Active::new(1, error),
        }))
    }
}

// Sequences and open values

impl<T: Subject> Subject for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence
    }

    fn components(&self) -> Result<Option<Components<'_>>, InvalidSubject> {
        Ok(Some(self.iter().map(|item| item as &dyn Subject).collect()))
    }
}

impl Subject for Box<dyn Subject> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        (**self).active()
    }

    fn components(&self) -> Result<Option<Components<'_>>, InvalidSubject> {
        (**self).components()
    }

    fn dynamic(&self) -> Option<&dyn Subject> {
        Some(&**self)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
