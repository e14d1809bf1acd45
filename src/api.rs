//! Application context tying the library's services together.

use std::sync::Arc;

use crate::fetch::JsonFetcher;
use crate::location::{LocationProvider, LocationTracker, Result, TrackerConfig};

/// Services owned by the application's composition root.
///
/// There is no process-wide instance: the application builds one context at
/// startup and hands clones of the tracker handle to whatever needs it.
/// Tests build as many independent contexts as they like.
pub struct LocusCore<P: LocationProvider> {
    tracker: Arc<LocationTracker<P>>,
    fetcher: JsonFetcher,
}

impl<P: LocationProvider> LocusCore<P> {
    /// Creates a context with a default-configured tracker.
    ///
    /// # Examples
    ///
    /// ```
    /// use locus_core::location::testing::RecordingProvider;
    /// use locus_core::location::TrackerState;
    /// use locus_core::LocusCore;
    ///
    /// let core = LocusCore::new(RecordingProvider::default());
    /// assert_eq!(core.tracker().state(), TrackerState::Unconfigured);
    /// ```
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            tracker: Arc::new(LocationTracker::new(provider)),
            fetcher: JsonFetcher::new(),
        }
    }

    /// Creates a context whose tracker uses `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(provider: P, config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            tracker: Arc::new(LocationTracker::with_config(provider, config)?),
            fetcher: JsonFetcher::new(),
        })
    }

    /// Creates a context from a JSON tracker configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the configuration invalid.
    pub fn from_json_config(provider: P, json: &str) -> Result<Self> {
        Self::with_config(provider, TrackerConfig::from_json(json)?)
    }

    /// Returns the location tracker.
    #[must_use]
    pub const fn tracker(&self) -> &Arc<LocationTracker<P>> {
        &self.tracker
    }

    /// Returns the JSON fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &JsonFetcher {
        &self.fetcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::testing::RecordingProvider;
    use crate::location::{
        AuthorizationMode, LocationError, LocationSample, ProviderStatus, TrackerState,
    };

    #[test]
    fn contexts_are_independent() {
        let first = LocusCore::new(RecordingProvider::default());
        let second = LocusCore::new(RecordingProvider::default());

        first.tracker().ingest(vec![LocationSample::new(1.0, 1.0)]);

        assert_eq!(first.tracker().location_count(), 1);
        assert_eq!(
            second.tracker().current_location(),
            Err(LocationError::LocationsEmpty)
        );
    }

    #[test]
    fn from_json_config_applies_mode_and_capacity() {
        let core = LocusCore::from_json_config(
            RecordingProvider::with_status(ProviderStatus::NotDetermined),
            r#"{"capacity": 2, "authorization_mode": "when_in_use"}"#,
        )
        .unwrap();

        assert_eq!(core.tracker().state(), TrackerState::Undetermined);
        assert_eq!(core.tracker().config().capacity, 2);
        assert_eq!(
            core.tracker().config().authorization_mode,
            Some(AuthorizationMode::WhenInUse)
        );
    }

    #[test]
    fn from_json_config_rejects_zero_capacity() {
        let result = LocusCore::from_json_config(RecordingProvider::default(), r#"{"capacity": 0}"#);
        assert!(matches!(result, Err(LocationError::InvalidCapacity(0))));
    }

    #[test]
    fn tracker_handle_is_shared() {
        let core = LocusCore::new(RecordingProvider::default());
        let handle = Arc::clone(core.tracker());

        handle.ingest(vec![LocationSample::new(3.0, 4.0)]);

        assert_eq!(core.tracker().location_count(), 1);
    }
}
