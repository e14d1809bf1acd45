//! Flutter-Rust bridge wrapper for locus-core.
//!
//! This crate serves as a thin wrapper that exposes `locus-core` to the
//! Flutter app via Cargokit. The Dart side plays the platform location
//! service: it drains [`api::PlatformCommand`]s and reports authorization
//! changes and sample batches back.

pub mod api;
mod provider;

pub use locus_core::*;
