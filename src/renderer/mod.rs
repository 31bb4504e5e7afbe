//! Renderer-facing view of the simulation
//!
//! Drawing happens in the host; this module only packs state into GPU-ready records.

pub mod instance;

pub use instance::{FrameSnapshot, SpinnerInstance};
