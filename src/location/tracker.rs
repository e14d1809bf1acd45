//! Authorization-gated location tracker with bounded history.

// Provider calls are made while the lock is held so that a transition is
// atomic with respect to setters and ingestion.
#![allow(clippy::significant_drop_tightening)]

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::error::{LocationError, Result};
use super::history::HistoryBuffer;
use super::provider::LocationProvider;
use super::types::{
    ActivityType, AuthorizationMode, AuthorizationStatus, LocationSample, ProviderStatus,
    TrackerConfig, TrackerState, UpdateParameters, DEFAULT_CAPACITY,
};

/// Sending half of a sample channel, held by the provider.
pub type SampleSender = mpsc::Sender<Vec<LocationSample>>;

/// Receiving half of a sample channel, drained by
/// [`LocationTracker::spawn_ingestion`].
pub type SampleReceiver = mpsc::Receiver<Vec<LocationSample>>;

/// Creates a bounded channel for delivering sample batches.
///
/// A `bound` of zero is treated as one.
#[must_use]
pub fn sample_channel(bound: usize) -> (SampleSender, SampleReceiver) {
    mpsc::channel(bound.max(1))
}

struct TrackerInner {
    state: TrackerState,
    updating: bool,
    mode: Option<AuthorizationMode>,
    capacity: NonZeroUsize,
    parameters: UpdateParameters,
    history: HistoryBuffer,
}

/// Gates a [`LocationProvider`] behind an authorization state machine and
/// keeps the most recent samples it delivers.
///
/// All state lives behind a single mutex, so a tracker can be shared
/// through an [`Arc`] between the provider's delivery path and application
/// code.
///
/// # Example
///
/// ```
/// use locus_core::location::testing::RecordingProvider;
/// use locus_core::location::{
///     AuthorizationMode, LocationError, LocationSample, LocationTracker, ProviderStatus,
///     TrackerState,
/// };
///
/// let tracker = LocationTracker::new(RecordingProvider::with_status(ProviderStatus::NotDetermined));
/// assert_eq!(tracker.start(), Err(LocationError::AuthorizationModeNotSet));
///
/// tracker.set_authorization_mode(AuthorizationMode::WhenInUse);
/// tracker.start().unwrap();
/// assert_eq!(tracker.state(), TrackerState::Requesting);
///
/// tracker.ingest(vec![LocationSample::new(37.7749, -122.4194)]);
/// assert_eq!(tracker.current_location().unwrap().latitude, 37.7749);
/// ```
pub struct LocationTracker<P: LocationProvider> {
    provider: P,
    inner: Mutex<TrackerInner>,
}

impl<P: LocationProvider> LocationTracker<P> {
    /// Creates a tracker with the default configuration.
    ///
    /// If the provider already reports access as granted, updates are
    /// enabled immediately.
    pub fn new(provider: P) -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::build(provider, TrackerConfig::default(), capacity)
    }

    /// Creates a tracker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvalidCapacity`] if `config.capacity` is zero.
    pub fn with_config(provider: P, config: TrackerConfig) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or(LocationError::InvalidCapacity(config.capacity))?;
        Ok(Self::build(provider, config, capacity))
    }

    fn build(provider: P, config: TrackerConfig, capacity: NonZeroUsize) -> Self {
        provider.apply_parameters(&config.parameters);

        let mut state = idle_state(config.authorization_mode);
        let mut updating = false;
        match AuthorizationStatus::from(provider.authorization_status()) {
            AuthorizationStatus::Granted => {
                state = TrackerState::Granted;
                match provider.enable_updates() {
                    Ok(()) => {
                        info!("Location access already granted, updates enabled");
                        updating = true;
                    }
                    Err(e) => warn!("Failed to enable location updates at startup: {e}"),
                }
            }
            AuthorizationStatus::Denied => state = TrackerState::Denied,
            AuthorizationStatus::Undetermined => {}
        }

        Self {
            provider,
            inner: Mutex::new(TrackerInner {
                state,
                updating,
                mode: config.authorization_mode,
                capacity,
                parameters: config.parameters,
                history: HistoryBuffer::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Recovering poisoned location tracker lock");
            poisoned.into_inner()
        })
    }

    /// Returns the underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    // ------------------------------------------------------------------
    // Authorization
    // ------------------------------------------------------------------

    /// Validates authorization and starts updates.
    ///
    /// When the user has not been asked yet, a permission request for the
    /// configured mode is issued and `Ok` is returned without waiting for
    /// the answer; call `start` again once the answer is known, or rely on
    /// [`authorization_changed`](Self::authorization_changed).
    ///
    /// # Errors
    ///
    /// - [`LocationError::AuthorizationModeNotSet`] if no mode is configured
    ///   and the user has not been asked. No request is issued.
    /// - [`LocationError::AuthorizationDenied`] if access is denied or restricted.
    /// - [`LocationError::Provider`] if the request or enable call failed.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.lock();

        match AuthorizationStatus::from(self.provider.authorization_status()) {
            AuthorizationStatus::Undetermined => {
                let Some(mode) = inner.mode else {
                    inner.state = TrackerState::Unconfigured;
                    return Err(LocationError::AuthorizationModeNotSet);
                };
                self.provider.request_authorization(mode)?;
                debug!("Requested {mode:?} location authorization");
                inner.state = TrackerState::Requesting;
                Ok(())
            }
            AuthorizationStatus::Granted => {
                inner.state = TrackerState::Granted;
                self.provider.enable_updates()?;
                inner.updating = true;
                info!("Location updates started");
                Ok(())
            }
            AuthorizationStatus::Denied => {
                inner.state = TrackerState::Denied;
                self.halt_updates(&mut inner);
                Err(LocationError::AuthorizationDenied)
            }
        }
    }

    /// Disables updates. Always safe to call, any number of times.
    ///
    /// A pending permission request no longer starts updates when it is
    /// answered; the tracker returns to its idle state until `start` is
    /// called again.
    pub fn stop(&self) {
        let mut inner = self.lock();
        self.provider.disable_updates();
        if inner.state == TrackerState::Requesting {
            inner.state = idle_state(inner.mode);
            debug!("Pending authorization request no longer starts updates");
        }
        if inner.updating {
            inner.updating = false;
            info!("Location updates stopped");
        }
    }

    /// Applies a status change reported by the provider.
    ///
    /// A grant that answers a pending request enables updates, since the
    /// caller already asked to start. Losing access disables updates.
    /// Returns the resulting state.
    pub fn authorization_changed(&self, status: ProviderStatus) -> TrackerState {
        let mut inner = self.lock();
        let previous = inner.state;

        match AuthorizationStatus::from(status) {
            AuthorizationStatus::Granted => {
                inner.state = TrackerState::Granted;
                if previous == TrackerState::Requesting && !inner.updating {
                    match self.provider.enable_updates() {
                        Ok(()) => {
                            inner.updating = true;
                            info!("Location access granted, updates started");
                        }
                        Err(e) => warn!("Failed to enable location updates after grant: {e}"),
                    }
                }
            }
            AuthorizationStatus::Denied => {
                inner.state = TrackerState::Denied;
                self.halt_updates(&mut inner);
            }
            AuthorizationStatus::Undetermined => {
                if previous != TrackerState::Requesting {
                    inner.state = idle_state(inner.mode);
                }
                self.halt_updates(&mut inner);
            }
        }

        if inner.state != previous {
            debug!("Tracker state {previous:?} -> {:?}", inner.state);
        }
        inner.state
    }

    fn halt_updates(&self, inner: &mut TrackerInner) {
        if inner.updating {
            self.provider.disable_updates();
            inner.updating = false;
            info!("Location access lost, updates stopped");
        }
    }

    /// Returns the tracker state.
    pub fn state(&self) -> TrackerState {
        self.lock().state
    }

    /// Returns true while the provider is expected to deliver samples.
    pub fn is_updating(&self) -> bool {
        self.lock().updating
    }

    /// Queries the provider for its current authorization status.
    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.provider.authorization_status().into()
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Sets the permission tier requested by the next `start`.
    ///
    /// Does not change an already issued or resolved authorization.
    pub fn set_authorization_mode(&self, mode: AuthorizationMode) {
        let mut inner = self.lock();
        inner.mode = Some(mode);
        if inner.state == TrackerState::Unconfigured {
            inner.state = TrackerState::Undetermined;
        }
    }

    /// Sets the history capacity, applied on the next ingestion.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvalidCapacity`] if `capacity` is zero.
    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(LocationError::InvalidCapacity(capacity))?;
        self.lock().capacity = capacity;
        Ok(())
    }

    /// Sets the activity hint forwarded to the provider.
    pub fn set_activity_type(&self, activity_type: ActivityType) {
        self.update_parameters(|p| p.activity_type = activity_type);
    }

    /// Sets the desired accuracy (meters) forwarded to the provider.
    pub fn set_desired_accuracy(&self, meters: f64) {
        self.update_parameters(|p| p.desired_accuracy = meters);
    }

    /// Sets the distance filter (meters) forwarded to the provider.
    pub fn set_distance_filter(&self, meters: f64) {
        self.update_parameters(|p| p.distance_filter = meters);
    }

    fn update_parameters(&self, change: impl FnOnce(&mut UpdateParameters)) {
        let mut inner = self.lock();
        change(&mut inner.parameters);
        self.provider.apply_parameters(&inner.parameters);
    }

    /// Returns a snapshot of the current configuration.
    pub fn config(&self) -> TrackerConfig {
        let inner = self.lock();
        TrackerConfig {
            capacity: inner.capacity.get(),
            authorization_mode: inner.mode,
            parameters: inner.parameters,
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Appends a batch of samples in arrival order and evicts the oldest
    /// samples beyond the configured capacity.
    pub fn ingest<I>(&self, batch: I)
    where
        I: IntoIterator<Item = LocationSample>,
    {
        let mut inner = self.lock();
        let capacity = inner.capacity;
        let evicted = inner.history.append(batch, capacity);
        debug!(
            "Ingested location batch: {} held, {evicted} evicted",
            inner.history.len()
        );
    }

    /// Returns the history most-recent-first.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::LocationsEmpty`] if nothing has been ingested.
    pub fn recent_locations(&self) -> Result<Vec<LocationSample>> {
        let inner = self.lock();
        if inner.history.is_empty() {
            return Err(LocationError::LocationsEmpty);
        }
        Ok(inner.history.recent())
    }

    /// Returns the most recently arrived sample.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::LocationsEmpty`] if nothing has been ingested.
    pub fn current_location(&self) -> Result<LocationSample> {
        self.lock()
            .history
            .latest()
            .cloned()
            .ok_or(LocationError::LocationsEmpty)
    }

    /// Returns the number of samples held.
    pub fn location_count(&self) -> usize {
        self.lock().history.len()
    }

    /// Spawns a task that ingests every batch received on `receiver`.
    ///
    /// The task ends once every [`SampleSender`] is dropped. Must be called
    /// from within a tokio runtime.
    pub fn spawn_ingestion(self: &Arc<Self>, mut receiver: SampleReceiver) -> JoinHandle<()>
    where
        P: 'static,
    {
        let tracker = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(batch) = receiver.recv().await {
                tracker.ingest(batch);
            }
            debug!("Sample channel closed, ingestion task exiting");
        })
    }
}

const fn idle_state(mode: Option<AuthorizationMode>) -> TrackerState {
    match mode {
        Some(_) => TrackerState::Undetermined,
        None => TrackerState::Unconfigured,
    }
}
