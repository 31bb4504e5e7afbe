//! Per-spinner instance records for GPU upload

use bytemuck::{Pod, Zeroable};

use crate::settings::{Color, Settings};
use crate::sim::{Registry, Spinner};

pub const FLAG_PLAYER: u32 = 1;
pub const FLAG_OUT_OF_BOUNDS: u32 = 1 << 1;
pub const FLAG_COLLIDING: u32 = 1 << 2;
pub const FLAG_OUTLINED: u32 = 1 << 3;

/// One spinner as the instance buffer sees it
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpinnerInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    pub base_color: Color,
    pub top_color: Color,
    pub flags: u32,
    pub _pad: [u32; 3],
}

impl SpinnerInstance {
    pub fn new(spinner: &Spinner, base_color: Color, top_color: Color, outlined: bool) -> Self {
        let mut flags = 0;
        if spinner.is_player {
            flags |= FLAG_PLAYER;
        }
        if spinner.out_of_bounds {
            flags |= FLAG_OUT_OF_BOUNDS;
        }
        if spinner.collision.active {
            flags |= FLAG_COLLIDING;
        }
        if outlined {
            flags |= FLAG_OUTLINED;
        }
        Self {
            model: spinner.transform.as_mat4().to_cols_array_2d(),
            base_color,
            top_color,
            flags,
            _pad: [0; 3],
        }
    }
}

/// Everything the renderer reads after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Vertical translation of the arena mesh
    pub arena_offset: f32,
    pub arena_color: Color,
    pub spinners: Vec<SpinnerInstance>,
}

impl FrameSnapshot {
    pub fn capture(registry: &Registry, settings: &Settings) -> Self {
        let spinners = registry
            .spinners
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let paint = settings.paint(i);
                SpinnerInstance::new(s, paint.base, paint.top, settings.outlined)
            })
            .collect();
        Self {
            arena_offset: registry.arena.base_height_offset as f32,
            arena_color: settings.arena,
            spinners,
        }
    }

    /// Raw bytes for an instance buffer upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.spinners)
    }
}
