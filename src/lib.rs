//! Spinner Arena - spinning tops orbiting a circular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orbits, jumps, collisions, registry)
//! - `tuning`: Data-driven physical constants
//! - `audio`: Collision cue sinks
//! - `renderer`: GPU-ready snapshots of simulation state
//! - `settings`: Cosmetic preferences (colors, volume)

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{Settings, SettingsCommand};
pub use tuning::Tuning;

use glam::{DMat4, DVec3};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Resting height of a spinner's center above the arena
    pub const REST_HEIGHT: f64 = 1.5;
    /// Default collision radius of a spinner
    pub const SPINNER_RADIUS: f64 = 1.5;
    /// Distance from the origin past which a spinner leaves the arena
    pub const ARENA_BOUND_RADIUS: f64 = 10.0;

    pub const SPINNER_JUMP_VELOCITY: f64 = 15.0;
    pub const ARENA_JUMP_VELOCITY: f64 = 10.0;
    pub const GRAVITY: f64 = 30.0;

    /// Collision window length (seconds)
    pub const COLLISION_DURATION: f64 = 0.1;
    /// Displacement strength used until the first re-roll
    pub const DECAY_MULTIPLIER_START: f64 = 0.08;
    /// Upper bound (exclusive) of re-rolled displacement strength
    pub const DECAY_MULTIPLIER_MAX: f64 = 0.38;
    /// Spinner age after which collision strength is re-rolled
    pub const RE_RANDOMIZE_AFTER: f64 = 3.0;
    /// Per-tick pull of the collision offset back toward the orbit
    pub const OFFSET_DECAY: f64 = 0.99;
    /// Downward distance per tick once out of bounds
    pub const FALL_PER_TICK: f64 = 1.0;
}

/// Height of a symmetric projectile launched upward at `velocity`
#[inline]
pub fn projectile_height(velocity: f64, gravity: f64, t: f64) -> f64 {
    velocity * t - 0.5 * gravity * t * t
}

/// Time for a symmetric projectile to return to its launch height
#[inline]
pub fn flight_time(velocity: f64, gravity: f64) -> f64 {
    2.0 * velocity / gravity
}

/// Translation component of an affine transform
#[inline]
pub fn translation_of(transform: &DMat4) -> DVec3 {
    transform.w_axis.truncate()
}
