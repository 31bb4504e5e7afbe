//! Cast description used to (re)build the simulation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SPINNER_RADIUS;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Fixed orbit/spin/role parameters of one spinner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerSpec {
    pub is_player: bool,
    pub orbit_radius_x: f64,
    pub orbit_radius_z: f64,
    pub orbit_angular_speed: f64,
    pub spin_rate: f64,
    /// Collision radius
    pub radius: f64,
}

impl Default for SpinnerSpec {
    fn default() -> Self {
        Self {
            is_player: false,
            orbit_radius_x: 2.0,
            orbit_radius_z: 2.0,
            orbit_angular_speed: 1.0,
            spin_rate: 20.0,
            radius: SPINNER_RADIUS,
        }
    }
}

impl SpinnerSpec {
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let fields = [
            ("orbit_radius_x", self.orbit_radius_x),
            ("orbit_radius_z", self.orbit_radius_z),
            ("orbit_angular_speed", self.orbit_angular_speed),
            ("spin_rate", self.spin_rate),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteOrbit {
                    index,
                    field,
                    value,
                });
            }
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius {
                index,
                value: self.radius,
            });
        }
        Ok(())
    }
}

/// Everything needed to rebuild the arena and its spinners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetSpec {
    /// Seed for collision strength re-rolls
    #[serde(default)]
    pub seed: u64,
    pub spinners: Vec<SpinnerSpec>,
    #[serde(default)]
    pub tuning: Tuning,
}

impl Default for ResetSpec {
    /// The two-spinner duel: the player on a wide fast ellipse, the rival on a
    /// tight counter-rotating one.
    fn default() -> Self {
        Self {
            seed: 0,
            spinners: vec![
                SpinnerSpec {
                    is_player: true,
                    orbit_radius_x: 3.0,
                    orbit_radius_z: 2.0,
                    orbit_angular_speed: 5.0,
                    spin_rate: 20.0,
                    radius: SPINNER_RADIUS,
                },
                SpinnerSpec {
                    is_player: false,
                    orbit_radius_x: 2.0,
                    orbit_radius_z: -1.0,
                    orbit_angular_speed: 3.0,
                    spin_rate: -20.0,
                    radius: SPINNER_RADIUS,
                },
            ],
            tuning: Tuning::default(),
        }
    }
}

impl ResetSpec {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spinners.len() < 2 {
            return Err(ConfigError::TooFewSpinners(self.spinners.len()));
        }
        for (index, spec) in self.spinners.iter().enumerate() {
            spec.validate(index)?;
        }
        self.tuning.validate()
    }

    /// Parse and validate a JSON description
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
