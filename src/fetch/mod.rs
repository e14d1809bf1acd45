//! Typed JSON fetching over HTTP.
//!
//! A small helper around `reqwest` that performs one GET per call and
//! decodes the body into any `serde` type. Failures are reported as exactly
//! one [`FetchError`] kind: transport, missing data, or decode.
//!
//! ```rust,ignore
//! use locus_core::fetch::JsonFetcher;
//!
//! #[derive(serde::Deserialize)]
//! struct Forecast { summary: String }
//!
//! let forecast: Forecast = JsonFetcher::new()
//!     .get("https://api.example.com/forecast")
//!     .await?;
//! ```

mod client;
mod error;

pub use client::{decode, get, JsonFetcher};
pub use error::{FetchError, FetchResult};
