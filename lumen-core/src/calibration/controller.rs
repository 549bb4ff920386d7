//! Calibration controller
//!
//! Owns the live calibration bounds and the raw-to-output mapping. The
//! controller is the only writer of the store; the sampling loop and the
//! command dispatcher drive it through the methods below.

use crate::calibration::{BoundsError, CalibrationBounds, CalibrationStore};
use crate::config::{DeploymentConfig, MappingMode};
use crate::traits::NvBytes;

/// Calibration states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// No stored configuration; deployment defaults in effect
    Unconfigured,
    /// Bounds equal the last validated and persisted pair
    Configured,
}

/// Store-side view of the calibration, as reported by SHOW
///
/// `bounds` are the deployment defaults when `configured` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedCalibration {
    pub configured: bool,
    pub bounds: CalibrationBounds,
}

/// Live calibration state plus its backing store
pub struct CalibrationController<M: NvBytes> {
    store: CalibrationStore<M>,
    deployment: DeploymentConfig,
    state: CalibrationState,
    bounds: CalibrationBounds,
}

impl<M: NvBytes> CalibrationController<M> {
    /// Boot-time load
    ///
    /// A stored configuration enters `Configured` with the loaded bounds;
    /// otherwise the controller starts `Unconfigured` on the deployment
    /// defaults. The caller surfaces the operator warning in that case.
    pub fn boot(mut store: CalibrationStore<M>, deployment: DeploymentConfig) -> Self {
        let (state, bounds) = match store.load() {
            Some(bounds) => (CalibrationState::Configured, bounds),
            None => (CalibrationState::Unconfigured, deployment.default_bounds),
        };

        Self {
            store,
            deployment,
            state,
            bounds,
        }
    }

    /// Current state
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Whether a stored configuration was in effect
    pub fn is_configured(&self) -> bool {
        self.state == CalibrationState::Configured
    }

    /// Live in-memory bounds
    pub fn bounds(&self) -> CalibrationBounds {
        self.bounds
    }

    /// Deployment parameters this controller was booted with
    pub fn deployment(&self) -> &DeploymentConfig {
        &self.deployment
    }

    /// Validate and commit a candidate pair
    ///
    /// On success the pair is persisted and becomes the live bounds in one
    /// step. On failure neither the store nor the live bounds change.
    pub fn configure(&mut self, min: i32, max: i32) -> Result<CalibrationBounds, BoundsError> {
        let bounds = CalibrationBounds::validate(min, max)?;

        self.store.save(bounds);
        self.bounds = bounds;
        self.state = CalibrationState::Configured;

        Ok(bounds)
    }

    /// Drop the stored configuration
    ///
    /// Always succeeds and is idempotent. The live bounds revert to the
    /// deployment's reset pair; a later boot uses `default_bounds` instead.
    pub fn reset(&mut self) -> CalibrationBounds {
        self.store.erase();
        self.bounds = self.deployment.reset_bounds;
        self.state = CalibrationState::Unconfigured;

        self.bounds
    }

    /// Diagnostic read-through of the store, for SHOW
    ///
    /// Reports what the store holds right now, not the live bounds; the
    /// two can disagree if the medium changed behind the controller's back.
    /// Neither the live bounds nor the state are touched.
    pub fn persisted(&mut self) -> PersistedCalibration {
        match self.store.load() {
            Some(bounds) => PersistedCalibration {
                configured: true,
                bounds,
            },
            None => PersistedCalibration {
                configured: false,
                bounds: self.deployment.default_bounds,
            },
        }
    }

    /// Map a raw reading through the calibrated linear interpolation
    ///
    /// Truncating integer math, no clamping: readings outside the
    /// calibrated window produce out-of-range outputs on purpose, as a
    /// visible miscalibration signal. The input span is never empty: live
    /// bounds are either validated or an ordered deployment pair.
    pub fn map_reading(&self, raw: u16) -> i32 {
        let CalibrationBounds { min, max } = self.bounds;

        match self.deployment.mode {
            MappingMode::Percentage => linear_map(raw as i32, min as i32, max as i32, 0, 100),
            MappingMode::Scaled => linear_map(
                raw as i32,
                0,
                self.deployment.raw_full_scale as i32,
                min as i32,
                max as i32,
            ),
        }
    }

    /// Consume the controller and return the store
    pub fn into_store(self) -> CalibrationStore<M> {
        self.store
    }
}

/// Linear interpolation of `x` from `[in_min, in_max]` to `[out_min, out_max]`
fn linear_map(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use super::*;
    use crate::calibration::testnv::{RamNv, SharedNv};
    use crate::calibration::{MAX_OFFSET, MIN_OFFSET};

    fn boot_empty() -> CalibrationController<RamNv> {
        CalibrationController::boot(
            CalibrationStore::new(RamNv::new()),
            DeploymentConfig::PERCENT_12BIT,
        )
    }

    #[test]
    fn test_boot_empty_store_uses_defaults() {
        let controller = boot_empty();
        assert_eq!(controller.state(), CalibrationState::Unconfigured);
        assert_eq!(controller.bounds(), CalibrationBounds::new(0, 0xFFF));
    }

    #[test]
    fn test_boot_ignores_garbage_bound_bytes() {
        // Flag clear, bound region full of garbage: defaults still win
        let mut medium = RamNv::new();
        medium.bytes[MIN_OFFSET] = 0xDE;
        medium.bytes[MIN_OFFSET + 1] = 0xAD;
        medium.bytes[MAX_OFFSET] = 0xBE;
        medium.bytes[MAX_OFFSET + 1] = 0xEF;

        let controller = CalibrationController::boot(
            CalibrationStore::new(medium),
            DeploymentConfig::PERCENT_12BIT,
        );
        assert_eq!(controller.state(), CalibrationState::Unconfigured);
        assert_eq!(controller.bounds(), CalibrationBounds::new(0, 0xFFF));
    }

    #[test]
    fn test_boot_configured_store_uses_stored_bounds() {
        let mut store = CalibrationStore::new(RamNv::new());
        store.save(CalibrationBounds::new(50, 200));

        let controller =
            CalibrationController::boot(store, DeploymentConfig::PERCENT_12BIT);
        assert_eq!(controller.state(), CalibrationState::Configured);
        assert_eq!(controller.bounds(), CalibrationBounds::new(50, 200));
    }

    #[test]
    fn test_configure_commits_and_persists() {
        let mut controller = boot_empty();

        let bounds = controller.configure(50, 200).unwrap();
        assert_eq!(bounds, CalibrationBounds::new(50, 200));
        assert_eq!(controller.state(), CalibrationState::Configured);

        let mut store = controller.into_store();
        assert_eq!(store.load(), Some(CalibrationBounds::new(50, 200)));
    }

    #[test]
    fn test_configure_rejection_changes_nothing() {
        let mut controller = boot_empty();
        controller.configure(50, 200).unwrap();

        for (min, max, expected) in [
            (200, 50, BoundsError::Disordered),
            (100, 100, BoundsError::Disordered),
            (-1, 100, BoundsError::Negative),
            (0, 4096, BoundsError::AboveLimit),
        ] {
            assert_eq!(controller.configure(min, max), Err(expected));
            assert_eq!(controller.state(), CalibrationState::Configured);
            assert_eq!(controller.bounds(), CalibrationBounds::new(50, 200));
        }

        let mut store = controller.into_store();
        assert_eq!(store.load(), Some(CalibrationBounds::new(50, 200)));
    }

    #[test]
    fn test_rejection_performs_no_sync() {
        let mut controller = boot_empty();
        let _ = controller.configure(200, 50);
        assert_eq!(controller.into_store().into_medium().syncs, 0);
    }

    #[test]
    fn test_reset_reverts_to_reset_bounds() {
        let mut controller = boot_empty();
        controller.configure(50, 200).unwrap();

        let bounds = controller.reset();
        assert_eq!(bounds, CalibrationBounds::new(0, 0xFF));
        assert_eq!(controller.state(), CalibrationState::Unconfigured);

        let mut store = controller.into_store();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut controller = boot_empty();

        let first = controller.reset();
        let second = controller.reset();
        assert_eq!(first, second);
        assert_eq!(controller.state(), CalibrationState::Unconfigured);
        assert_eq!(controller.bounds(), CalibrationBounds::new(0, 0xFF));
    }

    #[test]
    fn test_mapping_linearity_full_scale() {
        let mut controller = boot_empty();
        controller.configure(0, 4095).unwrap();

        assert_eq!(controller.map_reading(0), 0);
        assert_eq!(controller.map_reading(4095), 100);
        assert_eq!(controller.map_reading(2048), 50);
    }

    #[test]
    fn test_mapping_does_not_clamp() {
        let mut controller = boot_empty();
        controller.configure(1000, 2000).unwrap();

        // Below the window: negative output
        assert!(controller.map_reading(500) < 0);
        // Above the window: over 100
        assert!(controller.map_reading(3000) > 100);
    }

    #[test]
    fn test_mapping_scaled_mode() {
        let mut store = CalibrationStore::new(RamNv::new());
        store.save(CalibrationBounds::new(100, 300));

        let controller = CalibrationController::boot(store, DeploymentConfig::SCALED_8BIT);

        assert_eq!(controller.map_reading(0), 100);
        assert_eq!(controller.map_reading(255), 300);
        // Midpoint truncates toward the low end
        assert_eq!(controller.map_reading(128), 200);
    }

    #[test]
    fn test_persisted_reflects_store_not_memory() {
        let shared = RefCell::new(RamNv::new());

        let mut controller = CalibrationController::boot(
            CalibrationStore::new(SharedNv(&shared)),
            DeploymentConfig::PERCENT_12BIT,
        );
        controller.configure(10, 20).unwrap();

        // Mutate the medium behind the controller's back
        {
            let mut medium = shared.borrow_mut();
            medium.bytes[MIN_OFFSET..MIN_OFFSET + 2].copy_from_slice(&40u16.to_le_bytes());
            medium.bytes[MAX_OFFSET..MAX_OFFSET + 2].copy_from_slice(&80u16.to_le_bytes());
        }

        // SHOW trusts the store; the live bounds keep the stale pair
        let view = controller.persisted();
        assert!(view.configured);
        assert_eq!(view.bounds, CalibrationBounds::new(40, 80));
        assert_eq!(controller.bounds(), CalibrationBounds::new(10, 20));
        assert_eq!(controller.state(), CalibrationState::Configured);
    }

    #[test]
    fn test_persisted_unconfigured_reports_defaults() {
        let mut controller = boot_empty();
        let view = controller.persisted();
        assert!(!view.configured);
        assert_eq!(view.bounds, CalibrationBounds::new(0, 0xFFF));
    }

    #[test]
    fn test_calibration_session_scenario() {
        // Boot with an empty store, calibrate, show, reset, reboot
        let shared = RefCell::new(RamNv::new());
        let deployment = DeploymentConfig::PERCENT_12BIT;

        let mut controller =
            CalibrationController::boot(CalibrationStore::new(SharedNv(&shared)), deployment);
        assert!(!controller.is_configured());
        assert_eq!(controller.map_reading(4095), 100);

        controller.configure(50, 200).unwrap();
        let view = controller.persisted();
        assert_eq!(view.bounds, CalibrationBounds::new(50, 200));

        controller.reset();
        drop(controller);

        let controller =
            CalibrationController::boot(CalibrationStore::new(SharedNv(&shared)), deployment);
        assert!(!controller.is_configured());
        assert_eq!(controller.bounds(), deployment.default_bounds);
    }
}
