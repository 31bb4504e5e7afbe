//! Collision detection and displacement between spinners
//!
//! A hit does not bounce anything. It opens a short window during which the
//! spinner's orbit center is shoved away from the other body in growing,
//! log-damped steps; once the window closes the shove relaxes back toward
//! the nominal orbit a little every tick.

use glam::{DMat4, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::translation_of;
use crate::tuning::SpinnerTuning;

/// Another body a spinner can collide with this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: u32,
    pub position: DVec3,
    pub radius: f64,
}

/// Two bodies touch when their centers are at most `threshold` apart
#[inline]
pub fn is_colliding(a: DVec3, b: DVec3, threshold: f64) -> bool {
    a.distance(b) <= threshold
}

/// Displacement applied on a tick `elapsed` seconds into a collision window of
/// length `duration`. Grows from `strength` toward `2 * strength`, concave.
#[inline]
pub fn step_multiplier(elapsed: f64, duration: f64, strength: f64) -> f64 {
    strength * (elapsed / duration + 1.0).log2() + strength
}

/// Per-spinner collision response state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    /// True while the displacement window is open
    pub active: bool,
    /// Push direction, fixed for one collision (zero if the centers coincided)
    pub direction: DVec3,
    /// Time into the current window, always within `[0, max_duration]`
    pub elapsed: f64,
    pub max_duration: f64,
    /// Displacement strength of the current window
    pub decay_multiplier: f64,
    /// Range new strengths are drawn from
    pub multiplier_range: (f64, f64),
    /// Spinner age after which strength is re-rolled on each new collision
    pub re_randomize_after: f64,
    /// Per-tick relaxation factor applied while at rest
    pub offset_decay: f64,
    /// Accumulated pure translation; identity at rest
    pub offset: DMat4,
}

impl Default for CollisionState {
    fn default() -> Self {
        Self::new(&SpinnerTuning::default())
    }
}

impl CollisionState {
    pub fn new(tuning: &SpinnerTuning) -> Self {
        Self {
            active: false,
            direction: DVec3::ZERO,
            elapsed: 0.0,
            max_duration: tuning.collision_duration,
            decay_multiplier: tuning.decay_multiplier,
            multiplier_range: tuning.decay_multiplier_range,
            re_randomize_after: tuning.re_randomize_after,
            offset_decay: tuning.offset_decay,
            offset: DMat4::IDENTITY,
        }
    }

    /// Current displacement of the orbit center
    pub fn offset_translation(&self) -> DVec3 {
        translation_of(&self.offset)
    }

    /// Open a new window pushing along `separation` (this center minus the other's).
    /// `age` is the spinner's elapsed time, used to decide whether to re-roll strength.
    pub fn begin<R: Rng>(&mut self, separation: DVec3, age: f64, rng: &mut R) {
        self.active = true;
        self.elapsed = 0.0;
        self.direction = separation.normalize_or_zero();
        if age > self.re_randomize_after {
            let (lo, hi) = self.multiplier_range;
            self.decay_multiplier = rng.random_range(lo..hi);
        }
    }

    /// Advance an open window by `dt`, extending the offset. Closes the window
    /// once it has run its full length.
    pub fn accumulate(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        if self.elapsed >= self.max_duration {
            self.active = false;
            self.elapsed = 0.0;
            return;
        }

        self.elapsed = (self.elapsed + dt).min(self.max_duration);
        let m = step_multiplier(self.elapsed, self.max_duration, self.decay_multiplier);
        self.offset = DMat4::from_translation(self.direction * m) * self.offset;
    }

    /// Relax the offset toward the nominal orbit (horizontal only)
    pub fn decay(&mut self) {
        let c = self.offset_translation();
        self.offset = DMat4::from_translation(DVec3::new(
            c.x * self.offset_decay,
            0.0,
            c.z * self.offset_decay,
        ));
    }

    /// One tick of collision handling for a body at `position` with `radius`.
    ///
    /// Returns the push direction when a new collision started this tick.
    pub fn step<R: Rng>(
        &mut self,
        position: DVec3,
        radius: f64,
        neighbors: &[Neighbor],
        dt: f64,
        age: f64,
        rng: &mut R,
    ) -> Option<DVec3> {
        let hit = neighbors
            .iter()
            .find(|n| is_colliding(position, n.position, radius + n.radius));

        let mut started = None;
        if let Some(other) = hit {
            if !self.active {
                self.begin(position - other.position, age, rng);
                started = Some(self.direction);
            }
        }

        if self.active {
            self.accumulate(dt);
        } else if hit.is_none() {
            self.decay();
        }
        started
    }
}
