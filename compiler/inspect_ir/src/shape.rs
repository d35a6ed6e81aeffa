//! Static subject shapes.
//!
//! A [`Shape`] is what the pattern builder knows about a subject type before
//! any value exists: its arity if it is a tuple, its discriminant domain if it
//! is a closed union. `Shape::Unknown` turns every static check off and defers
//! the corresponding decision to match time.

use std::any::{Any, TypeId};
use std::fmt;

use crate::pattern::short_type_name;
use crate::subject::{innermost, Subject};

/// Static description of a subject type.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Nothing is known statically (open polymorphic values).
    Unknown,
    /// A leaf value with no components and no alternatives.
    Scalar,
    /// A homogeneous sequence whose arity is only known at match time.
    Sequence,
    /// A fixed-arity product.
    Tuple(Vec<ShapeOf>),
    /// A closed tagged union; alternatives are listed in discriminant order.
    Union(Vec<AltShape>),
}

impl Shape {
    /// Returns `true` unless the shape is [`Shape::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Shape::Unknown)
    }

    /// Arity of a tuple shape.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Shape::Tuple(elements) => Some(elements.len()),
            _ => None,
        }
    }

    /// Alternatives of a union shape.
    pub fn alternatives(&self) -> Option<&[AltShape]> {
        match self {
            Shape::Union(alts) => Some(alts),
            _ => None,
        }
    }

    /// Short human-readable kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Unknown => "unknown",
            Shape::Scalar => "scalar",
            Shape::Sequence => "sequence",
            Shape::Tuple(_) => "tuple",
            Shape::Union(_) => "union",
        }
    }
}

/// A lazily computed shape.
///
/// Recursive subject types would otherwise describe themselves forever.
#[derive(Clone, Copy)]
pub struct ShapeOf(fn() -> Shape);

impl ShapeOf {
    /// The shape of subject type `T`.
    pub fn of<T: Subject>() -> Self {
        ShapeOf(T::shape)
    }

    /// A shape given by an arbitrary thunk.
    pub fn from_fn(thunk: fn() -> Shape) -> Self {
        ShapeOf(thunk)
    }

    /// A shape about which nothing is known.
    pub fn unknown() -> Self {
        ShapeOf(|| Shape::Unknown)
    }

    /// Compute the shape.
    pub fn get(self) -> Shape {
        (self.0)()
    }
}

impl fmt::Debug for ShapeOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShapeOf(..)")
    }
}

/// One alternative of a union shape.
#[derive(Clone, Debug)]
pub struct AltShape {
    pub info: AltInfo,
    pub payload: ShapeOf,
}

impl AltShape {
    pub fn new(info: AltInfo, payload: ShapeOf) -> Self {
        AltShape { info, payload }
    }
}

/// Identity of one alternative: its index, display name and payload type.
///
/// Selectors are tested against this, both statically (against the domain of
/// a union shape) and dynamically (against an active payload).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AltInfo {
    /// Discriminant index.
    pub index: usize,
    /// Display name (`Some`, `Circle`, or the type name for dynamic payloads).
    pub name: &'static str,
    /// Payload type.
    pub type_id: TypeId,
    /// Payload type name.
    pub type_name: &'static str,
}

impl AltInfo {
    /// Describe alternative `index` carrying a payload of type `T`.
    pub fn new<T: Any>(index: usize, name: &'static str) -> Self {
        AltInfo {
            index,
            name,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Describe an active payload from its dynamic type.
    pub fn of_payload(index: usize, payload: &dyn Subject) -> Self {
        let inner = innermost(payload);
        let type_name = inner.type_name();
        AltInfo {
            index,
            name: type_name,
            type_id: inner.as_any().type_id(),
            type_name,
        }
    }

    /// The payload type name without its module path.
    pub fn short_type_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }

    /// Returns `true` if the payload type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}
