//! API bridging layer that exposes locus-core functionality.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use flutter_rust_bridge::frb;
pub use locus_core::location::{ActivityType, AuthorizationMode, ProviderStatus, TrackerState};
use locus_core::location::LocationSample;
use locus_core::LocusCore;

pub use crate::provider::PlatformCommand;
use crate::provider::BridgeProvider;

/// A location fix as exchanged with Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub horizontal_accuracy: Option<f64>,
}

impl From<LocationPoint> for LocationSample {
    fn from(point: LocationPoint) -> Self {
        let timestamp = DateTime::from_timestamp_millis(point.timestamp_ms).unwrap_or_else(|| {
            log::warn!(
                "Timestamp {}ms out of range, using current time",
                point.timestamp_ms
            );
            Utc::now()
        });
        let mut sample = Self::at(point.latitude, point.longitude, timestamp);
        sample.horizontal_accuracy = point.horizontal_accuracy;
        sample
    }
}

impl From<&LocationSample> for LocationPoint {
    fn from(sample: &LocationSample) -> Self {
        Self {
            latitude: sample.latitude,
            longitude: sample.longitude,
            timestamp_ms: sample.timestamp.timestamp_millis(),
            horizontal_accuracy: sample.horizontal_accuracy,
        }
    }
}

/// Location tracker (FFI wrapper).
///
/// The Dart side owns the platform plugin: it polls
/// [`take_platform_commands`](Self::take_platform_commands) after each call,
/// forwards plugin callbacks to [`authorization_changed`](Self::authorization_changed)
/// and [`deliver_locations`](Self::deliver_locations).
#[frb(opaque)]
pub struct LocusTracker {
    core: LocusCore<Arc<BridgeProvider>>,
    provider: Arc<BridgeProvider>,
}

impl LocusTracker {
    /// Creates a tracker; `initial_status` is the platform status at launch.
    #[must_use]
    pub fn new(initial_status: ProviderStatus) -> Self {
        let provider = Arc::new(BridgeProvider::new(initial_status));
        Self {
            core: LocusCore::new(Arc::clone(&provider)),
            provider,
        }
    }

    /// Creates a tracker from a JSON configuration.
    pub fn from_json_config(initial_status: ProviderStatus, json: String) -> Result<Self, String> {
        let provider = Arc::new(BridgeProvider::new(initial_status));
        let core = LocusCore::from_json_config(Arc::clone(&provider), &json)
            .map_err(|e| e.to_string())?;
        Ok(Self { core, provider })
    }

    #[frb(sync)]
    pub fn set_authorization_mode(&self, mode: AuthorizationMode) {
        self.core.tracker().set_authorization_mode(mode);
    }

    #[frb(sync)]
    pub fn set_max_locations(&self, count: usize) -> Result<(), String> {
        self.core
            .tracker()
            .set_capacity(count)
            .map_err(|e| e.to_string())
    }

    #[frb(sync)]
    pub fn set_activity_type(&self, activity_type: ActivityType) {
        self.core.tracker().set_activity_type(activity_type);
    }

    #[frb(sync)]
    pub fn set_desired_accuracy(&self, meters: f64) {
        self.core.tracker().set_desired_accuracy(meters);
    }

    #[frb(sync)]
    pub fn set_distance_filter(&self, meters: f64) {
        self.core.tracker().set_distance_filter(meters);
    }

    /// Starts tracking; see `LocationTracker::start`.
    #[frb(sync)]
    pub fn start(&self) -> Result<(), String> {
        self.core.tracker().start().map_err(|e| e.to_string())
    }

    #[frb(sync)]
    pub fn stop(&self) {
        self.core.tracker().stop();
    }

    #[frb(sync)]
    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.core.tracker().state()
    }

    #[frb(sync)]
    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.core.tracker().is_updating()
    }

    /// Reports a platform authorization change.
    #[frb(sync)]
    pub fn authorization_changed(&self, status: ProviderStatus) -> TrackerState {
        self.provider.set_status(status);
        self.core.tracker().authorization_changed(status)
    }

    /// Hands a batch of platform fixes to the tracker.
    #[frb(sync)]
    pub fn deliver_locations(&self, points: Vec<LocationPoint>) {
        self.core
            .tracker()
            .ingest(points.into_iter().map(LocationSample::from));
    }

    /// Returns the history most-recent-first.
    #[frb(sync)]
    pub fn recent_locations(&self) -> Result<Vec<LocationPoint>, String> {
        self.core
            .tracker()
            .recent_locations()
            .map(|samples| samples.iter().map(LocationPoint::from).collect())
            .map_err(|e| e.to_string())
    }

    #[frb(sync)]
    pub fn current_location(&self) -> Result<LocationPoint, String> {
        self.core
            .tracker()
            .current_location()
            .map(|sample| LocationPoint::from(&sample))
            .map_err(|e| e.to_string())
    }

    /// Drains the commands the Dart plugin must execute.
    #[frb(sync)]
    #[must_use]
    pub fn take_platform_commands(&self) -> Vec<PlatformCommand> {
        self.provider.take_commands()
    }
}
