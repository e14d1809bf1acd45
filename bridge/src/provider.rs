//! Location provider backed by the Flutter side.
//!
//! The platform plugin lives in Dart, so provider calls cannot be made
//! directly. They are queued as [`PlatformCommand`]s which Dart drains and
//! executes; Dart pushes the resulting status back.

use std::sync::{Mutex, MutexGuard, PoisonError};

use locus_core::location::{
    ActivityType, AuthorizationMode, LocationProvider, ProviderStatus, Result, UpdateParameters,
};

/// An instruction for the platform location plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCommand {
    /// Show the permission prompt for `mode`.
    RequestAuthorization { mode: AuthorizationMode },
    /// Start delivering location updates.
    EnableUpdates,
    /// Stop delivering location updates.
    DisableUpdates,
    /// Reconfigure the location plugin.
    ApplyParameters {
        activity_type: ActivityType,
        desired_accuracy: f64,
        distance_filter: f64,
    },
}

#[derive(Debug)]
pub struct BridgeProvider {
    status: Mutex<ProviderStatus>,
    commands: Mutex<Vec<PlatformCommand>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BridgeProvider {
    pub fn new(status: ProviderStatus) -> Self {
        Self {
            status: Mutex::new(status),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Records the status last reported by the platform.
    pub fn set_status(&self, status: ProviderStatus) {
        *lock(&self.status) = status;
    }

    /// Removes and returns all queued commands, oldest first.
    pub fn take_commands(&self) -> Vec<PlatformCommand> {
        std::mem::take(&mut *lock(&self.commands))
    }

    fn queue(&self, command: PlatformCommand) {
        log::debug!("Queued platform command {command:?}");
        lock(&self.commands).push(command);
    }
}

impl LocationProvider for BridgeProvider {
    fn authorization_status(&self) -> ProviderStatus {
        *lock(&self.status)
    }

    fn request_authorization(&self, mode: AuthorizationMode) -> Result<()> {
        self.queue(PlatformCommand::RequestAuthorization { mode });
        Ok(())
    }

    fn enable_updates(&self) -> Result<()> {
        self.queue(PlatformCommand::EnableUpdates);
        Ok(())
    }

    fn disable_updates(&self) {
        self.queue(PlatformCommand::DisableUpdates);
    }

    fn apply_parameters(&self, parameters: &UpdateParameters) {
        self.queue(PlatformCommand::ApplyParameters {
            activity_type: parameters.activity_type,
            desired_accuracy: parameters.desired_accuracy,
            distance_filter: parameters.distance_filter,
        });
    }
}
