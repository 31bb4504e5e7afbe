//! Simulation clock and fixed-step driver
//!
//! The host calls `Driver::advance` once per display frame with the wall-clock
//! delta; the driver converts that into whole `SIM_DT` ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Elapsed simulated time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Seconds simulated so far (only grows while running)
    pub elapsed: f64,
    pub running: bool,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            running: true,
        }
    }
}

impl SimClock {
    /// Advance by `dt`, returning the delta actually applied (0 while paused)
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !self.running || dt <= 0.0 {
            return 0.0;
        }
        self.elapsed += dt;
        dt
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct Driver {
    pub clock: SimClock,
    step: f64,
    accumulator: f64,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl Driver {
    pub fn new(step: f64) -> Self {
        Self {
            clock: SimClock::default(),
            step,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn set_running(&mut self, running: bool) {
        self.clock.running = running;
        if !running {
            self.accumulator = 0.0;
        }
    }

    /// Feed one frame's worth of wall-clock time; calls `on_tick(dt)` for each
    /// fixed step and returns the number of steps taken.
    pub fn advance(&mut self, frame_dt: f64, mut on_tick: impl FnMut(f64)) -> u32 {
        if !self.clock.running || !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            let dt = self.clock.tick(self.step);
            on_tick(dt);
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut clock = SimClock::default();
        clock.tick(0.5);
        clock.running = false;
        assert_eq!(clock.tick(0.5), 0.0);
        assert_eq!(clock.elapsed, 0.5);
    }

    #[test]
    fn test_driver_accumulates_partial_frames() {
        let mut driver = Driver::new(0.01);
        let mut ticks = 0;
        assert_eq!(driver.advance(0.005, |_| ticks += 1), 0);
        assert_eq!(driver.advance(0.006, |_| ticks += 1), 1);
        assert_eq!(ticks, 1);
        assert!((driver.clock.elapsed - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_driver_caps_substeps() {
        let mut driver = Driver::new(0.001);
        let steps = driver.advance(10.0, |_| {});
        assert_eq!(steps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_driver_pause() {
        let mut driver = Driver::default();
        driver.set_running(false);
        assert_eq!(driver.advance(1.0, |_| panic!("ticked while paused")), 0);
        assert_eq!(driver.clock.elapsed, 0.0);
    }
}
