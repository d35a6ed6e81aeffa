//! Diagnostic system for case-list construction.
//!
//! Every problem found while validating a case list is reported as a
//! [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - A [`Location`](inspect_ir::Location) (which case, where in its pattern)
//! - Notes (why it's wrong) and suggestions (how to fix)
//!
//! Construction reports all problems at once rather than stopping at the
//! first, so a caller fixing a case list sees the full picture.

pub mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
