use spinner_arena::audio::{EventLog, NullSink};
use spinner_arena::consts::SIM_DT;
use spinner_arena::sim::{Registry, ResetSpec, SpinnerSpec};

#[test]
fn duel_runs_ten_seconds() {
    let mut registry = Registry::new(ResetSpec::default()).unwrap();
    assert!(registry.arena.active);
    assert!(registry.spinners.iter().all(|s| s.running));

    let mut cues = EventLog::default();
    for _ in 0..600 {
        registry.tick(SIM_DT, &mut cues);
        for s in &registry.spinners {
            assert!(!s.out_of_bounds, "spinner {} left the arena", s.id);
            assert!(s.height() >= 1.5, "spinner {} sank to {}", s.id, s.height());
            assert!(s.position().is_finite());
            assert!(s.collision.elapsed <= s.collision.max_duration);
        }
    }

    assert!(!cues.is_empty(), "orbits overlap, spinners must clash");
    assert_eq!(registry.collision_count(), cues.len() as u64);
    assert_eq!(registry.time_ticks(), 600);
}

#[test]
fn reset_is_idempotent() {
    let mut registry = Registry::new(ResetSpec::with_seed(5)).unwrap();
    for _ in 0..400 {
        registry.tick(SIM_DT, &mut NullSink);
    }

    registry.reset(ResetSpec::with_seed(5)).unwrap();
    let first = registry.clone();
    registry.reset(ResetSpec::with_seed(5)).unwrap();

    assert_eq!(registry.arena, first.arena);
    assert_eq!(registry.spinners, first.spinners);
    assert_eq!(registry.collision_count(), 0);
    for s in &registry.spinners {
        assert_eq!(s.collision.decay_multiplier, 0.08);
        assert_eq!(s.elapsed_time, 0.0);
        assert!(!s.out_of_bounds);
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = Registry::new(ResetSpec::with_seed(77)).unwrap();
    let mut b = Registry::new(ResetSpec::with_seed(77)).unwrap();
    for i in 0..480 {
        if i == 200 {
            a.trigger_player_jump();
            b.trigger_player_jump();
        }
        a.tick(SIM_DT, &mut NullSink);
        b.tick(SIM_DT, &mut NullSink);
    }
    assert_eq!(a.spinners, b.spinners);
    assert_eq!(a.collision_count(), b.collision_count());
}

#[test]
fn out_of_bounds_survives_until_reset() {
    let spec = ResetSpec {
        spinners: vec![
            SpinnerSpec {
                orbit_radius_x: 11.0,
                orbit_radius_z: 11.0,
                ..SpinnerSpec::default()
            },
            SpinnerSpec {
                orbit_radius_x: -4.0,
                orbit_radius_z: 4.0,
                ..SpinnerSpec::default()
            },
        ],
        ..ResetSpec::default()
    };
    let mut registry = Registry::new(spec.clone()).unwrap();
    registry.tick(SIM_DT, &mut NullSink);
    assert!(registry.spinners[0].out_of_bounds);

    for _ in 0..120 {
        registry.tick(SIM_DT, &mut NullSink);
        assert!(registry.spinners[0].out_of_bounds);
        assert!(!registry.spinners[1].out_of_bounds);
    }
    assert!(registry.spinners[0].height() < -100.0);

    registry.reset(spec).unwrap();
    assert!(!registry.spinners[0].out_of_bounds);
}
