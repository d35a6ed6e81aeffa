//! Subject types shared by unit tests.

use inspect_ir::{Active, AltInfo, AltShape, Components, InvalidSubject, Shape, ShapeOf, Subject};
use smallvec::smallvec;

/// Width and height; decomposes like a pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Size {
    pub(crate) w: f64,
    pub(crate) h: f64,
}

impl Subject for Size {
    fn shape() -> Shape {
        Shape::Tuple(vec![ShapeOf::of::<f64>(), ShapeOf::of::<f64>()])
    }

    fn components(&self) -> Result<Option<Components<'_>>, InvalidSubject> {
        Ok(Some(smallvec![&self.w as &dyn Subject, &self.h as &dyn Subject]))
    }
}

/// A closed union with three alternatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Figure {
    Circle(f64),
    Rect(Size),
    Empty,
}

impl Subject for Figure {
    fn shape() -> Shape {
        Shape::Union(vec![
            AltShape::new(AltInfo::new::<f64>(0, "Circle"), ShapeOf::of::<f64>()),
            AltShape::new(AltInfo::new::<Size>(1, "Rect"), ShapeOf::of::<Size>()),
            AltShape::new(AltInfo::new::<()>(2, "Empty"), ShapeOf::of::<()>()),
        ])
    }

    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        Ok(Some(match self {
            Figure::Circle(radius) => Active::new(0, radius),
            Figure::Rect(size) => Active::new(1, size),
            Figure::Empty => Active::new(2, &()),
        }))
    }
}

/// A union that lost its active alternative.
#[derive(Debug)]
pub(crate) struct Valueless;

impl Subject for Valueless {
    fn shape() -> Shape {
        Shape::Union(vec![AltShape::new(
            AltInfo::new::<i32>(0, "Value"),
            ShapeOf::of::<i32>(),
        )])
    }

    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        Err(InvalidSubject::valueless("Valueless"))
    }
}
