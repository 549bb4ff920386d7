//! Deployment configuration
//!
//! A deployment fixes the direction of the linear map, the raw domain of
//! its ADC, and the bounds used while no calibration is stored. These are
//! per-board parameters, not universal constants.

use crate::calibration::CalibrationBounds;

/// Direction of the calibrated linear map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingMode {
    /// Bounds are the expected input window; output is a 0-100 percentage
    Percentage,
    /// Input is the full raw domain; bounds are the output window
    Scaled,
}

/// Per-deployment calibration parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeploymentConfig {
    /// Mapping direction
    pub mode: MappingMode,
    /// Highest raw reading the deployment's ADC can produce
    pub raw_full_scale: u16,
    /// Bounds used at boot when no calibration is stored
    pub default_bounds: CalibrationBounds,
    /// Bounds applied in-session by a RESET
    ///
    /// Deliberately a separate parameter: the observed deployments reset to
    /// (0, 0xFF) while booting unconfigured with (0, 0xFFF). A reboot after
    /// RESET lands back on `default_bounds`.
    pub reset_bounds: CalibrationBounds,
}

impl DeploymentConfig {
    /// Reference deployment: 12-bit ADC, percentage output
    pub const PERCENT_12BIT: Self = Self {
        mode: MappingMode::Percentage,
        raw_full_scale: 0xFFF,
        default_bounds: CalibrationBounds::new(0x00, 0xFFF),
        reset_bounds: CalibrationBounds::new(0x00, 0xFF),
    };

    /// Inverse deployment: 8-bit raw domain scaled into the bounds window
    pub const SCALED_8BIT: Self = Self {
        mode: MappingMode::Scaled,
        raw_full_scale: 0xFF,
        default_bounds: CalibrationBounds::new(0x00, 0xFF),
        reset_bounds: CalibrationBounds::new(0x00, 0xFF),
    };
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::PERCENT_12BIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_ordered() {
        for preset in [DeploymentConfig::PERCENT_12BIT, DeploymentConfig::SCALED_8BIT] {
            assert!(preset.default_bounds.min < preset.default_bounds.max);
            assert!(preset.reset_bounds.min < preset.reset_bounds.max);
            assert!(preset.raw_full_scale > 0);
        }
    }

    #[test]
    fn test_default_is_reference_deployment() {
        assert_eq!(DeploymentConfig::default(), DeploymentConfig::PERCENT_12BIT);
    }
}
