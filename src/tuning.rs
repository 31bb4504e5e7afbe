//! Data-driven simulation tuning
//!
//! Every physical constant the simulation uses, grouped per entity. Defaults
//! mirror `crate::consts`; a `ResetSpec` may override any of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Arena jump parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub jump_velocity: f64,
    pub gravity: f64,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            jump_velocity: ARENA_JUMP_VELOCITY,
            gravity: GRAVITY,
        }
    }
}

/// Spinner motion and collision parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerTuning {
    /// Resting height of the spinner center
    pub rest_height: f64,
    pub jump_velocity: f64,
    pub gravity: f64,
    /// Length of one collision window (seconds)
    pub collision_duration: f64,
    /// Displacement strength before the first re-roll
    pub decay_multiplier: f64,
    /// Range `[min, max)` re-rolled strengths are drawn from
    pub decay_multiplier_range: (f64, f64),
    /// Spinner age (seconds) after which strength is re-rolled on each new collision
    pub re_randomize_after: f64,
    /// Per-tick scale applied to the collision offset while at rest
    pub offset_decay: f64,
    /// Bounding radius of the arena
    pub bound_radius: f64,
    /// Downward translation per tick once out of bounds
    pub fall_per_tick: f64,
}

impl Default for SpinnerTuning {
    fn default() -> Self {
        Self {
            rest_height: REST_HEIGHT,
            jump_velocity: SPINNER_JUMP_VELOCITY,
            gravity: GRAVITY,
            collision_duration: COLLISION_DURATION,
            decay_multiplier: DECAY_MULTIPLIER_START,
            decay_multiplier_range: (DECAY_MULTIPLIER_START, DECAY_MULTIPLIER_MAX),
            re_randomize_after: RE_RANDOMIZE_AFTER,
            offset_decay: OFFSET_DECAY,
            bound_radius: ARENA_BOUND_RADIUS,
            fall_per_tick: FALL_PER_TICK,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub spinner: SpinnerTuning,
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning { field, value })
    }
}

impl Tuning {
    /// Reject values that would produce NaN positions or a collision window that never ends
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.jump_velocity", self.arena.jump_velocity)?;
        positive("arena.gravity", self.arena.gravity)?;

        let s = &self.spinner;
        non_negative("spinner.rest_height", s.rest_height)?;
        positive("spinner.jump_velocity", s.jump_velocity)?;
        positive("spinner.gravity", s.gravity)?;
        positive("spinner.collision_duration", s.collision_duration)?;
        non_negative("spinner.decay_multiplier", s.decay_multiplier)?;
        non_negative("spinner.re_randomize_after", s.re_randomize_after)?;
        positive("spinner.bound_radius", s.bound_radius)?;
        non_negative("spinner.fall_per_tick", s.fall_per_tick)?;

        let (lo, hi) = s.decay_multiplier_range;
        non_negative("spinner.decay_multiplier_range.0", lo)?;
        if !(hi.is_finite() && hi > lo) {
            return Err(ConfigError::InvalidTuning {
                field: "spinner.decay_multiplier_range.1",
                value: hi,
            });
        }
        if !(s.offset_decay > 0.0 && s.offset_decay < 1.0) {
            return Err(ConfigError::InvalidTuning {
                field: "spinner.offset_decay",
                value: s.offset_decay,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_empty_multiplier_range_rejected() {
        let mut tuning = Tuning::default();
        tuning.spinner.decay_multiplier_range = (0.3, 0.3);
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidTuning { .. })
        ));
    }

    #[test]
    fn test_offset_decay_must_shrink() {
        let mut tuning = Tuning::default();
        tuning.spinner.offset_decay = 1.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"arena": {"gravity": 20.0}}"#).unwrap();
        assert_eq!(tuning.arena.gravity, 20.0);
        assert_eq!(tuning.arena.jump_velocity, ARENA_JUMP_VELOCITY);
        assert_eq!(tuning.spinner, SpinnerTuning::default());
    }
}
