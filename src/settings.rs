//! Cosmetic settings
//!
//! Colors, outline mode and volume. None of this feeds back into the
//! simulation; the input layer changes it only through `SettingsCommand`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioCue;
use crate::error::ConfigError;

pub type Color = [f32; 4];

/// Two-tone paint of one spinner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinnerPaint {
    /// Lower cone
    pub base: Color,
    /// Upper disk
    pub top: Color,
}

/// Which half of a spinner a color applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintPart {
    Base,
    Top,
}

/// Default palette, cycled when the cast is larger than the palette
pub mod colors {
    use super::{Color, SpinnerPaint};

    pub const ARENA: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PALETTE: [SpinnerPaint; 2] = [
        SpinnerPaint {
            base: [0.69, 0.42, 0.1, 1.0],
            top: [0.42, 0.69, 0.1, 1.0],
        },
        SpinnerPaint {
            base: [1.0, 0.42, 0.1, 1.0],
            top: [0.1, 0.1, 0.3, 1.0],
        },
    ];
}

/// A single cosmetic change requested by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SettingsCommand {
    SetSpinnerColor {
        index: usize,
        part: PaintPart,
        color: Color,
    },
    SetArenaColor(Color),
    ToggleOutline,
    SetMasterVolume(f32),
    SetSfxVolume(f32),
    ToggleMute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-spinner paint, by cast position
    pub spinners: Vec<SpinnerPaint>,
    pub arena: Color,
    /// Draw wireframe outlines instead of shaded meshes
    pub outlined: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spinners: colors::PALETTE.to_vec(),
            arena: colors::ARENA,
            outlined: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

fn clamp_color(color: Color) -> Color {
    color.map(|c| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 })
}

impl Settings {
    /// Paint for the spinner at cast position `index`
    pub fn paint(&self, index: usize) -> SpinnerPaint {
        if index < self.spinners.len() {
            self.spinners[index]
        } else {
            colors::PALETTE[index % colors::PALETTE.len()]
        }
    }

    pub fn apply(&mut self, command: SettingsCommand) {
        match command {
            SettingsCommand::SetSpinnerColor { index, part, color } => {
                while self.spinners.len() <= index {
                    let next = self.paint(self.spinners.len());
                    self.spinners.push(next);
                }
                let paint = &mut self.spinners[index];
                match part {
                    PaintPart::Base => paint.base = clamp_color(color),
                    PaintPart::Top => paint.top = clamp_color(color),
                }
            }
            SettingsCommand::SetArenaColor(color) => self.arena = clamp_color(color),
            SettingsCommand::ToggleOutline => self.outlined = !self.outlined,
            SettingsCommand::SetMasterVolume(vol) => self.master_volume = vol.clamp(0.0, 1.0),
            SettingsCommand::SetSfxVolume(vol) => self.sfx_volume = vol.clamp(0.0, 1.0),
            SettingsCommand::ToggleMute => self.muted = !self.muted,
        }
    }

    /// Push the volume settings into a cue player
    pub fn configure_audio(&self, cue: &mut AudioCue) {
        cue.set_master_volume(self.master_volume);
        cue.set_sfx_volume(self.sfx_volume);
        cue.set_muted(self.muted);
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings, falling back to defaults if the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
