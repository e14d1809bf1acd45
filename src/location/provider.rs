//! Contract between the tracker and the platform location service.

use super::error::Result;
use super::types::{AuthorizationMode, ProviderStatus, UpdateParameters};

/// A platform location service.
///
/// The tracker calls these methods while holding its internal lock, so an
/// implementation must not call back into the tracker synchronously from
/// inside them. Sample batches and status changes are delivered later via
/// [`LocationTracker::ingest`](super::LocationTracker::ingest) and
/// [`LocationTracker::authorization_changed`](super::LocationTracker::authorization_changed).
pub trait LocationProvider: Send + Sync {
    /// Returns the current raw authorization status.
    fn authorization_status(&self) -> ProviderStatus;

    /// Asks the user for permission. Returns as soon as the prompt is issued.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Provider`](super::LocationError::Provider)
    /// if the request could not be issued.
    fn request_authorization(&self, mode: AuthorizationMode) -> Result<()>;

    /// Starts delivering location updates.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Provider`](super::LocationError::Provider)
    /// if updates could not be enabled.
    fn enable_updates(&self) -> Result<()>;

    /// Stops delivering location updates. Safe to call repeatedly.
    fn disable_updates(&self);

    /// Applies activity, accuracy and distance filter settings.
    fn apply_parameters(&self, parameters: &UpdateParameters);
}

impl<P: LocationProvider + ?Sized> LocationProvider for std::sync::Arc<P> {
    fn authorization_status(&self) -> ProviderStatus {
        (**self).authorization_status()
    }

    fn request_authorization(&self, mode: AuthorizationMode) -> Result<()> {
        (**self).request_authorization(mode)
    }

    fn enable_updates(&self) -> Result<()> {
        (**self).enable_updates()
    }

    fn disable_updates(&self) {
        (**self).disable_updates();
    }

    fn apply_parameters(&self, parameters: &UpdateParameters) {
        (**self).apply_parameters(parameters);
    }
}
