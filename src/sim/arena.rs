//! The arena bowl and its jump

use serde::{Deserialize, Serialize};

use crate::tuning::ArenaTuning;
use crate::{flight_time, projectile_height};

/// The arena floor. Its only motion is a vertical hop that lifts every
/// spinner resting on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Vertical translation applied to the whole arena
    pub base_height_offset: f64,
    pub active: bool,
    pub jumping: bool,
    pub jump_elapsed: f64,
    pub jump_initial_velocity: f64,
    pub gravity: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(&ArenaTuning::default())
    }
}

impl Arena {
    pub fn new(tuning: &ArenaTuning) -> Self {
        Self {
            base_height_offset: 0.0,
            active: true,
            jumping: false,
            jump_elapsed: 0.0,
            jump_initial_velocity: tuning.jump_velocity,
            gravity: tuning.gravity,
        }
    }

    /// Seconds from launch until the arena is back at rest
    pub fn flight_time(&self) -> f64 {
        flight_time(self.jump_initial_velocity, self.gravity)
    }

    /// Lowest height a spinner resting at `rest_height` may occupy
    pub fn floor_height(&self, rest_height: f64) -> f64 {
        rest_height.max(self.base_height_offset + rest_height)
    }

    /// Start a hop. Returns false if inactive or already airborne.
    pub fn trigger_jump(&mut self) -> bool {
        if !self.active || self.jumping {
            return false;
        }
        self.jumping = true;
        self.jump_elapsed = 0.0;
        true
    }

    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        if !self.jumping {
            self.base_height_offset = 0.0;
            return;
        }

        self.jump_elapsed += dt;
        if self.jump_elapsed > self.flight_time() {
            self.jumping = false;
            self.jump_elapsed = 0.0;
            self.base_height_offset = 0.0;
            log::debug!("Arena landed");
        } else {
            self.base_height_offset =
                projectile_height(self.jump_initial_velocity, self.gravity, self.jump_elapsed)
                    .max(0.0);
        }
    }
}
