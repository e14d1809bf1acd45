//! Scripted in-memory provider for tests.
//!
//! Only compiled with the `test-utils` feature or under `cfg(test)`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::error::{LocationError, Result};
use super::provider::LocationProvider;
use super::types::{AuthorizationMode, ProviderStatus, UpdateParameters};

/// A call the tracker made on a [`RecordingProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    RequestAuthorization(AuthorizationMode),
    EnableUpdates,
    DisableUpdates,
    ApplyParameters(UpdateParameters),
}

#[derive(Debug, Default)]
struct Script {
    status: ProviderStatus,
    fail_requests: bool,
    fail_enable: bool,
    calls: Vec<ProviderCall>,
}

/// Provider whose status is set by the test and which records every call.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    script: Mutex<Script>,
}

impl RecordingProvider {
    /// Creates a provider reporting `status`.
    #[must_use]
    pub fn with_status(status: ProviderStatus) -> Self {
        let provider = Self::default();
        provider.set_status(status);
        provider
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Changes the status reported from now on.
    pub fn set_status(&self, status: ProviderStatus) {
        self.script().status = status;
    }

    /// Makes `request_authorization` fail.
    pub fn fail_requests(&self, fail: bool) {
        self.script().fail_requests = fail;
    }

    /// Makes `enable_updates` fail.
    pub fn fail_enable(&self, fail: bool) {
        self.script().fail_enable = fail;
    }

    /// Returns every recorded call in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.script().calls.clone()
    }

    /// Returns the recorded authorization requests.
    #[must_use]
    pub fn requests(&self) -> Vec<AuthorizationMode> {
        self.script()
            .calls
            .iter()
            .filter_map(|call| match call {
                ProviderCall::RequestAuthorization(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    /// Returns how many times updates were enabled.
    #[must_use]
    pub fn enable_count(&self) -> usize {
        self.count(&ProviderCall::EnableUpdates)
    }

    /// Returns how many times updates were disabled.
    #[must_use]
    pub fn disable_count(&self) -> usize {
        self.count(&ProviderCall::DisableUpdates)
    }

    /// Returns the most recently applied parameters.
    #[must_use]
    pub fn last_parameters(&self) -> Option<UpdateParameters> {
        self.script().calls.iter().rev().find_map(|call| match call {
            ProviderCall::ApplyParameters(parameters) => Some(*parameters),
            _ => None,
        })
    }

    /// Forgets all recorded calls.
    pub fn clear_calls(&self) {
        self.script().calls.clear();
    }

    fn count(&self, wanted: &ProviderCall) -> usize {
        self.script().calls.iter().filter(|c| *c == wanted).count()
    }
}

impl LocationProvider for RecordingProvider {
    fn authorization_status(&self) -> ProviderStatus {
        self.script().status
    }

    fn request_authorization(&self, mode: AuthorizationMode) -> Result<()> {
        let mut script = self.script();
        if script.fail_requests {
            return Err(LocationError::Provider("request rejected".to_string()));
        }
        script.calls.push(ProviderCall::RequestAuthorization(mode));
        Ok(())
    }

    fn enable_updates(&self) -> Result<()> {
        let mut script = self.script();
        if script.fail_enable {
            return Err(LocationError::Provider("updates unavailable".to_string()));
        }
        script.calls.push(ProviderCall::EnableUpdates);
        Ok(())
    }

    fn disable_updates(&self) {
        self.script().calls.push(ProviderCall::DisableUpdates);
    }

    fn apply_parameters(&self, parameters: &UpdateParameters) {
        self.script()
            .calls
            .push(ProviderCall::ApplyParameters(*parameters));
    }
}
