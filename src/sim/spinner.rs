//! A spinning top riding an elliptical orbit around the arena center

use glam::{DMat4, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionState, Neighbor};
use super::setup::SpinnerSpec;
use crate::audio::{CollisionEvent, CollisionSink};
use crate::tuning::SpinnerTuning;
use crate::{projectile_height, translation_of};

/// One spinner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spinner {
    pub id: u32,
    pub is_player: bool,
    /// Semi-axis along X (sign flips the starting side)
    pub orbit_radius_x: f64,
    /// Semi-axis along Z (sign flips the orbit direction)
    pub orbit_radius_z: f64,
    pub orbit_angular_speed: f64,
    /// Rotation about the local Y axis (radians/sec)
    pub spin_rate: f64,
    /// Collision radius
    pub radius: f64,
    pub elapsed_time: f64,
    pub running: bool,
    pub jumping: bool,
    pub jump_elapsed: f64,
    pub jump_initial_velocity: f64,
    pub gravity: f64,
    pub rest_height: f64,
    /// Distance from the origin past which the spinner leaves the arena
    pub bound_radius: f64,
    pub fall_per_tick: f64,
    /// Once set, only a reset brings the spinner back
    pub out_of_bounds: bool,
    pub collision: CollisionState,
    /// Last computed pose (translation + spin about Y)
    pub transform: DMat4,
}

impl Spinner {
    pub fn new(id: u32, spec: &SpinnerSpec, tuning: &SpinnerTuning) -> Self {
        let mut spinner = Self {
            id,
            is_player: spec.is_player,
            orbit_radius_x: spec.orbit_radius_x,
            orbit_radius_z: spec.orbit_radius_z,
            orbit_angular_speed: spec.orbit_angular_speed,
            spin_rate: spec.spin_rate,
            radius: spec.radius,
            elapsed_time: 0.0,
            running: true,
            jumping: false,
            jump_elapsed: 0.0,
            jump_initial_velocity: tuning.jump_velocity,
            gravity: tuning.gravity,
            rest_height: tuning.rest_height,
            bound_radius: tuning.bound_radius,
            fall_per_tick: tuning.fall_per_tick,
            out_of_bounds: false,
            collision: CollisionState::new(tuning),
            transform: DMat4::IDENTITY,
        };
        spinner.transform = spinner.orbit_pose(0.0, spinner.rest_height);
        spinner
    }

    /// World position of the spinner center
    pub fn position(&self) -> DVec3 {
        translation_of(&self.transform)
    }

    pub fn height(&self) -> f64 {
        self.position().y
    }

    pub fn as_neighbor(&self) -> Neighbor {
        Neighbor {
            id: self.id,
            position: self.position(),
            radius: self.radius,
        }
    }

    /// Nominal orbit translation at time `t` and height `h`
    pub fn orbit_pose(&self, t: f64, h: f64) -> DMat4 {
        let angle = self.orbit_angular_speed * t;
        DMat4::from_translation(DVec3::new(
            self.orbit_radius_x * angle.cos(),
            h,
            self.orbit_radius_z * angle.sin(),
        ))
    }

    /// Start a hop. Returns false if paused, out of bounds or already airborne.
    pub fn trigger_jump(&mut self) -> bool {
        if !self.running || self.out_of_bounds || self.jumping {
            return false;
        }
        self.jumping = true;
        self.jump_elapsed = 0.0;
        true
    }

    /// Height for this tick from the jump arc, landing when it dips below rest
    fn advance_jump(&mut self, dt: f64) -> f64 {
        if !self.jumping {
            return self.rest_height;
        }
        self.jump_elapsed += dt;
        let h = self.rest_height
            + projectile_height(self.jump_initial_velocity, self.gravity, self.jump_elapsed);
        if h < self.rest_height {
            self.jumping = false;
            self.jump_elapsed = 0.0;
            return self.rest_height;
        }
        h
    }

    /// Advance one tick.
    ///
    /// `neighbors` are the other bodies as they stood at the start of the
    /// tick; `arena_floor` is the lowest height the arena allows right now.
    pub fn update<R: Rng>(
        &mut self,
        neighbors: &[Neighbor],
        dt: f64,
        arena_floor: f64,
        rng: &mut R,
        sink: &mut dyn CollisionSink,
    ) {
        if !self.running {
            return;
        }
        if self.out_of_bounds {
            self.transform =
                DMat4::from_translation(DVec3::new(0.0, -self.fall_per_tick, 0.0)) * self.transform;
            return;
        }

        let floor = arena_floor.max(self.rest_height);
        let h = self.advance_jump(dt).max(floor);

        self.elapsed_time += dt;
        let t = self.elapsed_time;

        let mut pose = self.orbit_pose(t, h) * self.collision.offset;
        if pose.w_axis.y < floor {
            pose.w_axis.y = floor;
        }

        // Detection compares last tick's pose against the neighbor snapshot
        let previous = self.position();
        let others: Vec<Neighbor> = neighbors
            .iter()
            .copied()
            .filter(|n| n.id != self.id)
            .collect();
        if let Some(direction) =
            self.collision
                .step(previous, self.radius, &others, dt, self.elapsed_time, rng)
        {
            log::debug!(
                "Spinner {} hit at t={:.3}, pushed {:?}",
                self.id,
                t,
                direction
            );
            sink.on_collision(CollisionEvent {
                spinner_id: self.id,
                position: previous,
                direction,
                time: t,
            });
        }

        self.transform = pose * DMat4::from_rotation_y(self.spin_rate * t);

        if self.position().length() > self.bound_radius {
            self.out_of_bounds = true;
            log::warn!("Spinner {} left the arena at t={:.2}", self.id, t);
        }
    }
}
