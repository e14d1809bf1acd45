//! Navigation dispatch onto an external view hierarchy.
//!
//! A [`Route`] pairs a [`RouteKind`] (present, push, pop, pop-to-root,
//! dismiss) with an optional target view. The UI layer implements
//! [`ViewHierarchy`] for its own view handles; the router only checks
//! preconditions and forwards the transition.
//!
//! Missing preconditions are programmer errors. [`Route::try_navigate`]
//! reports them as [`RouteError`]; [`Route::navigate`] panics.

mod error;
mod types;

pub use error::RouteError;
pub use types::{Completion, Route, RouteKind, ViewHierarchy};
