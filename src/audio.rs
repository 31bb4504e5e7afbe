//! Collision cues
//!
//! The simulation fires one `CollisionEvent` per newly detected collision into
//! a `CollisionSink`. Playback itself belongs to the host; the sinks here
//! either drop, record, or forward the cue through `log`.

use glam::DVec3;

/// A newly detected collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Spinner that detected the hit
    pub spinner_id: u32,
    /// Position of that spinner when the hit was detected
    pub position: DVec3,
    /// Direction it gets pushed
    pub direction: DVec3,
    /// Spinner age at detection
    pub time: f64,
}

/// Fire-and-forget receiver of collision cues
pub trait CollisionSink {
    fn on_collision(&mut self, event: CollisionEvent);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CollisionSink for NullSink {
    fn on_collision(&mut self, _event: CollisionEvent) {}
}

/// Records cues in arrival order
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<CollisionEvent>,
}

impl EventLog {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl CollisionSink for EventLog {
    fn on_collision(&mut self, event: CollisionEvent) {
        self.events.push(event);
    }
}

/// Volume-aware cue player for hosts without an audio backend
#[derive(Debug, Clone)]
pub struct AudioCue {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioCue {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCue {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues actually played (audible ones only)
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play the clash cue for `event`
    pub fn play(&mut self, event: &CollisionEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!(
            "Clash cue for spinner {} at volume {:.2}",
            event.spinner_id,
            vol
        );
    }
}

impl CollisionSink for AudioCue {
    fn on_collision(&mut self, event: CollisionEvent) {
        self.play(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> CollisionEvent {
        CollisionEvent {
            spinner_id: 1,
            position: DVec3::ZERO,
            direction: DVec3::X,
            time: 0.5,
        }
    }

    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::default();
        log.on_collision(event());
        log.on_collision(CollisionEvent {
            spinner_id: 2,
            ..event()
        });
        assert_eq!(log.len(), 2);
        assert_eq!(log.events[1].spinner_id, 2);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_muted_cue_is_silent() {
        let mut cue = AudioCue::new();
        cue.on_collision(event());
        assert_eq!(cue.played(), 1);
        cue.set_muted(true);
        cue.on_collision(event());
        assert_eq!(cue.played(), 1);
    }

    #[test]
    fn test_volume_clamped() {
        let mut cue = AudioCue::new();
        cue.set_master_volume(-2.0);
        cue.on_collision(event());
        assert_eq!(cue.played(), 0);
    }
}
