//! Locus Core Library
//!
//! Small mobile-client utilities with an authorization-gated location
//! tracker at the center:
//! - [`location`]: tracker, bounded history and the provider contract
//! - [`fetch`]: typed JSON GET helper
//! - [`router`]: navigation dispatch onto an external view hierarchy

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod fetch;
pub mod location;
pub mod router;

pub use api::LocusCore;
