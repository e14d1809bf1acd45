//! Precondition failures for navigation.
//!
//! These indicate a programming mistake in the calling screen rather than a
//! runtime condition; [`Route::navigate`](super::Route::navigate) turns them
//! into a panic.

use thiserror::Error;

/// Why a route could not be performed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Push/pop requested from a view outside any navigation stack.
    #[error("Navigation stack isn't available")]
    MissingNavigationStack,

    /// Present/push requested without a target view.
    #[error("Target view is missing")]
    MissingTarget,

    /// Pop-by-count asked to go further back than the stack allows.
    #[error("Not enough views to pop {requested} (stack holds {available})")]
    NotEnoughViews {
        /// Levels requested.
        requested: usize,
        /// Views on the stack.
        available: usize,
    },
}
