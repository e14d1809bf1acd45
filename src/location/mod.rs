//! Location tracking for Locus.
//!
//! Provides an authorization-gated tracker over a platform location service:
//! - An authorization state machine (`Unconfigured` → `Requesting` → `Granted`/`Denied`)
//! - A bounded, most-recent-first history of delivered samples (20 by default)
//! - Pass-through update parameters (activity, accuracy, distance filter)
//!
//! # Architecture
//!
//! ```text
//! Application (composition root)
//!     │  start / stop / setters / queries
//!     ▼
//! LocationTracker ── Mutex ──> state + config + HistoryBuffer
//!     │  request / enable / disable / apply_parameters
//!     ▼
//! LocationProvider (platform)
//!     │  ingest(batch) / authorization_changed(status)
//!     └──────────────> LocationTracker (directly or via sample_channel)
//! ```
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use locus_core::location::testing::RecordingProvider;
//! use locus_core::location::{
//!     AuthorizationMode, LocationSample, LocationTracker, ProviderStatus, TrackerState,
//! };
//!
//! let provider = Arc::new(RecordingProvider::with_status(ProviderStatus::NotDetermined));
//! let tracker = LocationTracker::new(Arc::clone(&provider));
//!
//! tracker.set_authorization_mode(AuthorizationMode::WhenInUse);
//! tracker.set_capacity(3).unwrap();
//! tracker.start().unwrap(); // issues the permission prompt and returns
//!
//! // Later, the platform reports the user's answer.
//! provider.set_status(ProviderStatus::AuthorizedWhenInUse);
//! assert_eq!(
//!     tracker.authorization_changed(ProviderStatus::AuthorizedWhenInUse),
//!     TrackerState::Granted,
//! );
//!
//! tracker.ingest(vec![LocationSample::new(1.0, 1.0), LocationSample::new(2.0, 2.0)]);
//! assert_eq!(tracker.current_location().unwrap().latitude, 2.0);
//! assert_eq!(tracker.recent_locations().unwrap().len(), 2);
//! ```

mod error;
mod history;
mod provider;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
mod tracker;
pub mod types;

pub use error::{LocationError, Result};
pub use history::HistoryBuffer;
pub use provider::LocationProvider;
pub use tracker::{sample_channel, LocationTracker, SampleReceiver, SampleSender};
pub use types::{
    ActivityType, AuthorizationMode, AuthorizationStatus, LocationSample, ProviderStatus,
    TrackerConfig, TrackerState, UpdateParameters, DEFAULT_CAPACITY,
};
