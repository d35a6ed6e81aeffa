//! First-match pattern dispatch.
//!
//! An [`Inspector`] holds an ordered list of cases, each a [`Pattern`], an
//! optional guard and an action. Dispatching a subject runs the first case
//! whose pattern matches and whose guard holds, with the pattern's names
//! bound by reference into the subject.
//!
//! ```text
//! let inspector = Inspector::<(i64, i64), &str>::builder()
//!     .case_if(
//!         Pattern::tuple([Pattern::ident("x"), Pattern::ident("y")]),
//!         |env| env.get_as::<i64>("x") == env.get_as::<i64>("y"),
//!         |_| "equal",
//!     )
//!     .case(Pattern::wildcard(), |_| "other")
//!     .build()?;
//! assert_eq!(inspector.dispatch(&(1, 1))?.value(), Some("equal"));
//! ```
//!
//! Every pattern is validated against the subject's static [`Shape`] once,
//! when the inspector is built. Coverage analysis runs at the same time:
//! unreachable cases are reported, and in strict mode a case list that
//! misses a value of a closed union is rejected.

mod bindings;
mod compile;
mod config;
mod errors;
#[cfg(test)]
mod fixtures;
mod inspector;
mod matcher;
mod stack;
mod usefulness;

use std::sync::Once;

pub use bindings::{Bindings, MatchResult};
pub use compile::{compile, CompiledPattern};
pub use config::{Exhaustiveness, InspectConfig, LintLevel};
pub use errors::{BuildError, DispatchError};
pub use inspector::{Inspector, InspectorBuilder, Outcome};

pub use inspect_ir::{Concept, InvalidSubject, Pattern, Selector, Shape, Subject};
pub use scoped_arena::Scope;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only runs once per process.
/// Use `RUST_LOG=inspect_engine=trace` to see every case tried.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
