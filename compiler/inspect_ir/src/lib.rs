//! Inspect IR - pattern trees and subject capabilities.
//!
//! This crate contains the data model shared by the dispatch engine and its
//! diagnostics:
//! - [`Subject`]: the capabilities a value must expose to be inspected
//!   (active alternative, components, dynamic forwarding, base views)
//! - [`Shape`]: the static description of a subject type (arity and
//!   discriminant domain), used for construction-time validation
//! - [`Pattern`]: immutable pattern trees with their [`Selector`]s
//! - Capabilities plugged into patterns: [`ConstantPattern`] for equality and
//!   [`Extract`] for extractors and downcasts
//! - [`Location`]: a path into a case's pattern tree, used in diagnostics
//!
//! # Design Philosophy
//!
//! - **Reference semantics**: every accessor hands out borrows of the
//!   subject's own storage. Only extractors may produce new values.
//! - **Static where possible**: equality and extraction capabilities are
//!   chosen when a pattern is constructed, never looked up while matching.
//! - **Lazy shapes**: payload and element shapes are `fn() -> Shape` thunks so
//!   recursive subject types can describe themselves.

mod capability;
mod location;
mod pattern;
mod shape;
mod subject;

pub use capability::{
    ConstantPattern, Downcast, EqWith, Extract, ExtractAs, ExtractFn, Extracted, Literal, Project,
};
pub use location::{Location, PathStep};
pub use pattern::{Concept, Name, Pattern, Selector, TypeSelector};
pub use shape::{AltInfo, AltShape, Shape, ShapeOf};
pub use subject::{
    downcast, downcast_view, innermost, Active, AsAny, Components, InvalidSubject, Subject,
};
