//! Tuning shared by every AI controller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Distances and cadences that drive the decision cycle.
///
/// Distances are half-widths of square boxes measured in tiles; intervals
/// are measured in controller ticks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// How close a target must be for the ship to chase it.
    pub chase_distance: i32,
    /// How close a target must be for the ship to shoot at it.
    pub attack_distance: i32,
    /// Extra tiles added to the chase distance when scanning for a closer target.
    pub retarget_margin: i32,
    /// Roster sizes above this value switch retargeting to the proximity scan.
    pub crowded_fleet_size: usize,
    /// Ticks between decision cycles.
    pub replan_interval: u64,
    /// Ticks between fresh wander directions.
    pub wander_interval: u64,
    /// Ticks between forced target reselection while wandering.
    pub wander_retarget_interval: u64,
    /// Ticks between forced target reselection while chasing.
    pub chase_retarget_interval: u64,
    /// Ticks between forced target reselection while attacking.
    pub attack_retarget_interval: u64,
}

impl ControllerConfig {
    /// Half-width of the box scanned when looking for a closer target.
    #[must_use]
    pub const fn retarget_distance(&self) -> i32 {
        self.chase_distance.saturating_add(self.retarget_margin)
    }

    /// Checks that every distance and interval is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("chase_distance", self.chase_distance),
            ("attack_distance", self.attack_distance),
        ];
        for (field, value) in distances {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDistance { field, value });
            }
        }
        if self.retarget_margin < 0 {
            return Err(ConfigError::NegativeDistance {
                field: "retarget_margin",
                value: self.retarget_margin,
            });
        }

        let intervals = [
            ("replan_interval", self.replan_interval),
            ("wander_interval", self.wander_interval),
            ("wander_retarget_interval", self.wander_retarget_interval),
            ("chase_retarget_interval", self.chase_retarget_interval),
            ("attack_retarget_interval", self.attack_retarget_interval),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { field });
            }
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            chase_distance: 9,
            attack_distance: 4,
            retarget_margin: 5,
            crowded_fleet_size: 3,
            replan_interval: 10,
            wander_interval: 30,
            wander_retarget_interval: 300,
            chase_retarget_interval: 600,
            attack_retarget_interval: 300,
        }
    }
}

/// Reasons a [`ControllerConfig`] is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A distance that must be positive was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositiveDistance {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was supplied.
        value: i32,
    },
    /// A distance that may be zero was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeDistance {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was supplied.
        value: i32,
    },
    /// A tick interval was zero.
    #[error("{field} must be at least one tick")]
    ZeroInterval {
        /// Name of the offending field.
        field: &'static str,
    },
}
