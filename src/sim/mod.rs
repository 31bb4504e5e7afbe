//! Deterministic simulation module
//!
//! All motion and collision logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (cast order)
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod clock;
pub mod collision;
pub mod registry;
pub mod setup;
pub mod spinner;

pub use arena::Arena;
pub use clock::{Driver, SimClock};
pub use collision::{CollisionState, Neighbor, is_colliding, step_multiplier};
pub use registry::{Registry, TickInput};
pub use setup::{ResetSpec, SpinnerSpec};
pub use spinner::Spinner;
