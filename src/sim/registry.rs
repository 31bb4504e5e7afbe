//! The live simulation: one arena, an ordered cast of spinners
//!
//! Each tick updates the arena first, then every spinner in cast order. All
//! spinners detect collisions against positions captured at the start of the
//! tick, so the outcome does not depend on update order.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::collision::Neighbor;
use super::setup::ResetSpec;
use super::spinner::Spinner;
use crate::audio::{CollisionEvent, CollisionSink};
use crate::error::ConfigError;

/// Discrete commands from the input controller, batched per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause/resume everything ("sit still")
    pub toggle_running: bool,
    /// Spinners to launch, by id
    pub jump: Vec<u32>,
    /// Launch the player's spinner
    pub player_jump: bool,
    /// Launch the arena
    pub arena_jump: bool,
    /// Rebuild from the current cast description
    pub reset: bool,
}

/// Counts cues on their way to the host's sink
struct CountingSink<'a> {
    inner: &'a mut dyn CollisionSink,
    count: u64,
}

impl CollisionSink for CountingSink<'_> {
    fn on_collision(&mut self, event: CollisionEvent) {
        self.count += 1;
        self.inner.on_collision(event);
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    pub arena: Arena,
    /// Cast, in update order (ids ascending)
    pub spinners: Vec<Spinner>,
    spec: ResetSpec,
    rng: Pcg32,
    running: bool,
    collisions: u64,
    time_ticks: u64,
}

impl Registry {
    pub fn new(spec: ResetSpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        let (arena, spinners, rng) = Self::build(&spec);
        Ok(Self {
            arena,
            spinners,
            spec,
            rng,
            running: true,
            collisions: 0,
            time_ticks: 0,
        })
    }

    fn build(spec: &ResetSpec) -> (Arena, Vec<Spinner>, Pcg32) {
        let arena = Arena::new(&spec.tuning.arena);
        let spinners = spec
            .spinners
            .iter()
            .zip(1u32..)
            .map(|(s, id)| Spinner::new(id, s, &spec.tuning.spinner))
            .collect();
        (arena, spinners, Pcg32::seed_from_u64(spec.seed))
    }

    /// Replace the arena and every spinner. An invalid spec leaves the current
    /// simulation untouched.
    pub fn reset(&mut self, spec: ResetSpec) -> Result<(), ConfigError> {
        *self = Self::new(spec)?;
        log::info!(
            "Simulation reset: {} spinners, seed {}",
            self.spinners.len(),
            self.spec.seed
        );
        Ok(())
    }

    /// Rebuild from the cast description currently in use
    pub fn restart(&mut self) {
        let (arena, spinners, rng) = Self::build(&self.spec);
        self.arena = arena;
        self.spinners = spinners;
        self.rng = rng;
        self.running = true;
        self.collisions = 0;
        self.time_ticks = 0;
        log::info!("Simulation restarted");
    }

    pub fn spec(&self) -> &ResetSpec {
        &self.spec
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pause or resume every entity at once
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
        self.arena.active = running;
        for spinner in &mut self.spinners {
            spinner.running = running;
        }
        log::info!("Simulation {}", if running { "resumed" } else { "paused" });
    }

    pub fn toggle_running(&mut self) -> bool {
        self.set_running(!self.running);
        self.running
    }

    pub fn spinner(&self, id: u32) -> Option<&Spinner> {
        self.spinners.iter().find(|s| s.id == id)
    }

    pub fn player(&self) -> Option<&Spinner> {
        self.spinners.iter().find(|s| s.is_player)
    }

    pub fn trigger_jump(&mut self, id: u32) -> bool {
        let jumped = self
            .spinners
            .iter_mut()
            .find(|s| s.id == id)
            .is_some_and(Spinner::trigger_jump);
        if jumped {
            log::info!("Spinner {} jumps", id);
        }
        jumped
    }

    pub fn trigger_player_jump(&mut self) -> bool {
        match self.player().map(|s| s.id) {
            Some(id) => self.trigger_jump(id),
            None => false,
        }
    }

    pub fn trigger_arena_jump(&mut self) -> bool {
        let jumped = self.arena.trigger_jump();
        if jumped {
            log::info!("Arena jumps");
        }
        jumped
    }

    /// New collisions since the last reset
    pub fn collision_count(&self) -> u64 {
        self.collisions
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Apply one frame's commands. Reset wins over everything else.
    pub fn apply(&mut self, input: &TickInput) {
        if input.reset {
            self.restart();
            return;
        }
        if input.toggle_running {
            self.toggle_running();
        }
        for &id in &input.jump {
            self.trigger_jump(id);
        }
        if input.player_jump {
            self.trigger_player_jump();
        }
        if input.arena_jump {
            self.trigger_arena_jump();
        }
    }

    /// Advance the whole simulation by `dt`
    pub fn tick(&mut self, dt: f64, sink: &mut dyn CollisionSink) {
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Ignoring tick with invalid dt {}", dt);
            return;
        }
        self.arena.update(dt);
        let floor = self
            .arena
            .floor_height(self.spec.tuning.spinner.rest_height);

        // Bodies that left the arena no longer take part in collisions
        let snapshot: Vec<Neighbor> = self
            .spinners
            .iter()
            .filter(|s| !s.out_of_bounds)
            .map(Spinner::as_neighbor)
            .collect();

        let mut counted = CountingSink {
            inner: sink,
            count: 0,
        };
        for spinner in &mut self.spinners {
            spinner.update(&snapshot, dt, floor, &mut self.rng, &mut counted);
        }
        self.collisions += counted.count;
        if self.running {
            self.time_ticks += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{EventLog, NullSink};
    use crate::consts::SIM_DT;
    use crate::sim::setup::SpinnerSpec;
    use glam::DVec3;

    fn duel() -> Registry {
        Registry::new(ResetSpec::default()).unwrap()
    }

    #[test]
    fn test_ids_follow_cast_order() {
        let reg = duel();
        let ids: Vec<u32> = reg.spinners.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(reg.player().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_invalid_reset_keeps_state() {
        let mut reg = duel();
        reg.tick(SIM_DT, &mut NullSink);
        let before = reg.spinners.clone();

        let mut bad = ResetSpec::default();
        bad.spinners[0].orbit_radius_x = f64::NAN;
        assert!(reg.reset(bad).is_err());
        assert_eq!(reg.spinners, before);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut reg = duel();
        reg.trigger_arena_jump();
        reg.tick(SIM_DT, &mut NullSink);
        assert!(!reg.toggle_running());

        let arena = reg.arena.clone();
        let spinners = reg.spinners.clone();
        for _ in 0..10 {
            reg.tick(SIM_DT, &mut NullSink);
        }
        assert_eq!(reg.arena, arena);
        assert_eq!(reg.spinners, spinners);
        assert!(!reg.trigger_player_jump());

        assert!(reg.toggle_running());
        reg.tick(SIM_DT, &mut NullSink);
        assert_ne!(reg.spinners, spinners);
    }

    #[test]
    fn test_arena_jump_lifts_spinners() {
        let mut reg = duel();
        assert!(reg.trigger_arena_jump());
        for _ in 0..20 {
            reg.tick(SIM_DT, &mut NullSink);
        }
        let floor = reg.arena.floor_height(1.5);
        assert!(floor > 1.5);
        for s in &reg.spinners {
            assert!(s.height() >= floor - 1e-9);
        }
    }

    #[test]
    fn test_detection_is_order_independent() {
        // Two spinners parked facing each other must push apart symmetrically
        let parked = |x: f64| SpinnerSpec {
            orbit_radius_x: x,
            orbit_radius_z: 0.0,
            orbit_angular_speed: 0.0,
            spin_rate: 0.0,
            ..SpinnerSpec::default()
        };
        let spec = ResetSpec {
            spinners: vec![parked(1.0), parked(-1.0)],
            ..ResetSpec::default()
        };
        let mut reg = Registry::new(spec).unwrap();
        let mut cues = EventLog::default();
        reg.tick(SIM_DT, &mut cues);

        assert_eq!(cues.len(), 2);
        let a = reg.spinners[0].collision.offset_translation();
        let b = reg.spinners[1].collision.offset_translation();
        assert!(a.x > 0.0);
        assert!((a + b).length() < 1e-12);
        assert_eq!(cues.events[0].direction, DVec3::X);
        assert_eq!(cues.events[1].direction, -DVec3::X);
    }

    #[test]
    fn test_apply_commands() {
        let mut reg = duel();
        reg.apply(&TickInput {
            jump: vec![2],
            arena_jump: true,
            ..Default::default()
        });
        assert!(reg.spinner(2).is_some_and(|s| s.jumping));
        assert!(!reg.spinner(1).is_some_and(|s| s.jumping));
        assert!(reg.arena.jumping);

        reg.apply(&TickInput {
            reset: true,
            toggle_running: true,
            ..Default::default()
        });
        assert!(reg.is_running());
        assert!(!reg.arena.jumping);
        assert!(!reg.spinner(2).is_some_and(|s| s.jumping));
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut reg = duel();
        reg.trigger_arena_jump();
        reg.tick(SIM_DT, &mut NullSink);

        let arena = reg.arena.clone();
        let spinners = reg.spinners.clone();
        let ticks = reg.time_ticks();
        for dt in [f64::NAN, f64::INFINITY, -1.0, 0.0] {
            reg.tick(dt, &mut NullSink);
        }
        assert_eq!(reg.arena, arena);
        assert_eq!(reg.spinners, spinners);
        assert_eq!(reg.time_ticks(), ticks);

        reg.tick(SIM_DT, &mut NullSink);
        assert!(reg.spinners.iter().all(|s| s.position().is_finite()));
        assert!(reg.arena.base_height_offset.is_finite());
    }

    #[test]
    fn test_reset_adopts_new_spec() {
        let mut reg = duel();
        reg.reset(ResetSpec::with_seed(9)).unwrap();
        assert_eq!(reg.spec().seed, 9);
        assert_eq!(reg.time_ticks(), 0);
    }

    #[test]
    fn test_unknown_spinner_cannot_jump() {
        let mut reg = duel();
        assert!(!reg.trigger_jump(42));
    }
}
