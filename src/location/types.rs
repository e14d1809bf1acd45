//! Location data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{LocationError, Result};

/// Number of samples retained when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 20;

/// Permission tier requested from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationMode {
    /// Foreground access only.
    WhenInUse,
    /// Foreground and background access.
    Always,
}

/// Raw authorization status as reported by the platform provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// Access is blocked by policy (parental controls, MDM).
    Restricted,
    /// The user declined access.
    Denied,
    /// Foreground access granted.
    AuthorizedWhenInUse,
    /// Foreground and background access granted.
    AuthorizedAlways,
}

/// Authorization status as seen by the tracker.
///
/// `Restricted` and `Denied` collapse into [`AuthorizationStatus::Denied`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationStatus {
    Undetermined,
    Granted,
    Denied,
}

impl From<ProviderStatus> for AuthorizationStatus {
    fn from(status: ProviderStatus) -> Self {
        match status {
            ProviderStatus::NotDetermined => Self::Undetermined,
            ProviderStatus::Restricted | ProviderStatus::Denied => Self::Denied,
            ProviderStatus::AuthorizedWhenInUse | ProviderStatus::AuthorizedAlways => {
                Self::Granted
            }
        }
    }
}

/// Authorization lifecycle of a [`LocationTracker`](super::LocationTracker).
///
/// ```text
/// Unconfigured --set mode--> Undetermined --start--> Requesting
///      |                          |                     |
///      +-------- start (granted) -+---------------------+--> Granted
///      +-------- start (denied) --+---------------------+--> Denied
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerState {
    /// No authorization mode configured and the user has not been asked.
    Unconfigured,
    /// A mode is configured but no request has been issued.
    Undetermined,
    /// A permission request was issued and the user has not answered.
    Requesting,
    /// Location access is granted.
    Granted,
    /// Location access is denied or restricted.
    Denied,
}

impl TrackerState {
    /// Returns true once the provider has reported a final answer.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Granted | Self::Denied)
    }
}

/// Activity hint forwarded to the provider to tune power usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    #[default]
    Other,
    AutomotiveNavigation,
    Fitness,
    OtherNavigation,
    Airborne,
}

/// Parameters passed through to the provider untouched.
///
/// The tracker does not interpret these values; the provider validates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParameters {
    /// Activity hint.
    pub activity_type: ActivityType,

    /// Desired accuracy in meters. [`Self::BEST_ACCURACY`] asks for the best available.
    pub desired_accuracy: f64,

    /// Minimum movement in meters before a new sample is delivered.
    /// [`Self::NO_DISTANCE_FILTER`] delivers every change.
    pub distance_filter: f64,
}

impl UpdateParameters {
    /// Sentinel accuracy meaning "best the hardware can do".
    pub const BEST_ACCURACY: f64 = -1.0;

    /// Sentinel distance filter meaning "report all movement".
    pub const NO_DISTANCE_FILTER: f64 = -1.0;
}

impl Default for UpdateParameters {
    fn default() -> Self {
        Self {
            activity_type: ActivityType::default(),
            desired_accuracy: Self::BEST_ACCURACY,
            distance_filter: Self::NO_DISTANCE_FILTER,
        }
    }
}

/// Tracker configuration.
///
/// Capacity changes take effect on the next ingestion; the authorization
/// mode takes effect on the next `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Maximum number of samples kept in history (at least 1).
    pub capacity: usize,

    /// Permission tier to request, if any.
    pub authorization_mode: Option<AuthorizationMode>,

    /// Provider pass-through parameters.
    pub parameters: UpdateParameters,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            authorization_mode: None,
            parameters: UpdateParameters::default(),
        }
    }
}

impl TrackerConfig {
    /// Checks that the configuration can be used by a tracker.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvalidCapacity`] if `capacity` is zero.
    pub const fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(LocationError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Config`] for malformed JSON and
    /// [`LocationError::InvalidCapacity`] for a zero capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use locus_core::location::{AuthorizationMode, TrackerConfig};
    ///
    /// let config = TrackerConfig::from_json(r#"{"capacity": 5, "authorization_mode": "always"}"#).unwrap();
    /// assert_eq!(config.capacity, 5);
    /// assert_eq!(config.authorization_mode, Some(AuthorizationMode::Always));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One timestamped position observation delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// When the position was observed (UTC).
    pub timestamp: DateTime<Utc>,

    /// Horizontal accuracy radius in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,

    /// Altitude in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,

    /// Speed in meters/second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    /// Course over ground in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
}

impl LocationSample {
    /// Creates a sample observed now.
    ///
    /// # Examples
    ///
    /// ```
    /// use locus_core::location::LocationSample;
    ///
    /// let sample = LocationSample::new(37.7749, -122.4194);
    /// assert_eq!(sample.latitude, 37.7749);
    /// assert!(sample.altitude.is_none());
    /// ```
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self::at(latitude, longitude, Utc::now())
    }

    /// Creates a sample observed at `timestamp`.
    #[must_use]
    pub const fn at(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            horizontal_accuracy: None,
            altitude: None,
            speed: None,
            course: None,
        }
    }

    /// Sets the horizontal accuracy radius.
    #[must_use]
    pub const fn with_accuracy(mut self, meters: f64) -> Self {
        self.horizontal_accuracy = Some(meters);
        self
    }

    /// Returns true if both coordinates are finite and within range.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status_maps_restricted_to_denied() {
        assert_eq!(
            AuthorizationStatus::from(ProviderStatus::Restricted),
            AuthorizationStatus::Denied
        );
        assert_eq!(
            AuthorizationStatus::from(ProviderStatus::Denied),
            AuthorizationStatus::Denied
        );
    }

    #[test]
    fn provider_status_maps_both_grants() {
        assert_eq!(
            AuthorizationStatus::from(ProviderStatus::AuthorizedWhenInUse),
            AuthorizationStatus::Granted
        );
        assert_eq!(
            AuthorizationStatus::from(ProviderStatus::AuthorizedAlways),
            AuthorizationStatus::Granted
        );
    }

    #[test]
    fn provider_status_default_is_not_determined() {
        assert_eq!(ProviderStatus::default(), ProviderStatus::NotDetermined);
        assert_eq!(
            AuthorizationStatus::from(ProviderStatus::default()),
            AuthorizationStatus::Undetermined
        );
    }

    #[test]
    fn only_granted_and_denied_are_resolved() {
        assert!(TrackerState::Granted.is_resolved());
        assert!(TrackerState::Denied.is_resolved());
        assert!(!TrackerState::Requesting.is_resolved());
        assert!(!TrackerState::Undetermined.is_resolved());
        assert!(!TrackerState::Unconfigured.is_resolved());
    }

    #[test]
    fn tracker_config_default_values() {
        let config = TrackerConfig::default();

        assert_eq!(config.capacity, 20);
        assert_eq!(config.authorization_mode, None);
        assert_eq!(config.parameters.activity_type, ActivityType::Other);
        assert_eq!(
            config.parameters.desired_accuracy,
            UpdateParameters::BEST_ACCURACY
        );
        assert_eq!(
            config.parameters.distance_filter,
            UpdateParameters::NO_DISTANCE_FILTER
        );
    }

    #[test]
    fn tracker_config_rejects_zero_capacity() {
        let config = TrackerConfig {
            capacity: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(config.validate(), Err(LocationError::InvalidCapacity(0)));
    }

    #[test]
    fn tracker_config_from_json_fills_defaults() {
        let config = TrackerConfig::from_json(r#"{"capacity": 3}"#).unwrap();

        assert_eq!(config.capacity, 3);
        assert_eq!(config.authorization_mode, None);
        assert_eq!(config.parameters, UpdateParameters::default());
    }

    #[test]
    fn tracker_config_from_json_parses_parameters() {
        let json = r#"{
            "authorization_mode": "when_in_use",
            "parameters": {"activity_type": "fitness", "distance_filter": 10.0}
        }"#;
        let config = TrackerConfig::from_json(json).unwrap();

        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(
            config.authorization_mode,
            Some(AuthorizationMode::WhenInUse)
        );
        assert_eq!(config.parameters.activity_type, ActivityType::Fitness);
        assert_eq!(config.parameters.distance_filter, 10.0);
        assert_eq!(
            config.parameters.desired_accuracy,
            UpdateParameters::BEST_ACCURACY
        );
    }

    #[test]
    fn tracker_config_from_json_rejects_zero_capacity() {
        let result = TrackerConfig::from_json(r#"{"capacity": 0}"#);
        assert_eq!(result, Err(LocationError::InvalidCapacity(0)));
    }

    #[test]
    fn tracker_config_from_json_rejects_garbage() {
        let result = TrackerConfig::from_json("{capacity:");
        assert!(matches!(result, Err(LocationError::Config(_))));
    }

    #[test]
    fn tracker_config_json_roundtrip() {
        let config = TrackerConfig {
            capacity: 7,
            authorization_mode: Some(AuthorizationMode::Always),
            parameters: UpdateParameters {
                activity_type: ActivityType::Airborne,
                desired_accuracy: 100.0,
                distance_filter: 50.0,
            },
        };

        let json = config.to_json().unwrap();
        let recovered = TrackerConfig::from_json(&json).unwrap();

        assert_eq!(recovered, config);
    }

    #[test]
    fn sample_json_omits_missing_metadata() {
        let sample = LocationSample::new(37.7749, -122.4194).with_accuracy(5.0);
        let json = serde_json::to_string(&sample).unwrap();

        assert!(json.contains("horizontal_accuracy"));
        assert!(!json.contains("altitude"));
        assert!(!json.contains("speed"));
        assert!(!json.contains("course"));
    }

    #[test]
    fn sample_coordinate_validation() {
        assert!(LocationSample::new(90.0, -180.0).has_valid_coordinates());
        assert!(!LocationSample::new(91.0, 0.0).has_valid_coordinates());
        assert!(!LocationSample::new(0.0, 180.5).has_valid_coordinates());
        assert!(!LocationSample::new(f64::NAN, 0.0).has_valid_coordinates());
        assert!(!LocationSample::new(0.0, f64::INFINITY).has_valid_coordinates());
    }
}
