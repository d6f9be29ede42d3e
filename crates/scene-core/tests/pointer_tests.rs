// Host-side tests for the damped pointer and scroll trackers.

use glam::Vec2;
use scene_core::{DampedScalar, SmoothPointer, POINTER_DAMPING};

#[test]
fn pointer_approaches_target_monotonically() {
    let mut pointer = SmoothPointer::new();
    let target = Vec2::new(0.8, -0.6);
    pointer.set_target(target);

    let mut prev = (pointer.current() - target).length();
    for n in 1..=200 {
        pointer.update();
        let dist = (pointer.current() - target).length();
        assert!(
            dist <= prev + 1e-7,
            "distance grew at update {n}: {prev} -> {dist}"
        );
        prev = dist;
    }
}

#[test]
fn pointer_satisfies_geometric_convergence_bound() {
    let mut pointer = SmoothPointer::new();
    let target = Vec2::new(1.0, 0.5);
    pointer.set_target(target);

    for n in 1..=80 {
        pointer.update();
        let bound = target.length() * (1.0 - POINTER_DAMPING).powi(n) * 1.01 + 1e-5;
        let dist = (pointer.current() - target).length();
        assert!(
            dist <= bound,
            "update {n}: distance {dist} exceeds bound {bound}"
        );
    }
    // Settled well inside tolerance after a few more frames.
    for _ in 0..40 {
        pointer.update();
    }
    let dist = (pointer.current() - target).length();
    assert!(dist < 1e-3 * target.length(), "still {dist} from target");
}

#[test]
fn pointer_never_overshoots() {
    let mut pointer = SmoothPointer::new();
    let target = Vec2::new(1.0, 0.0);
    pointer.set_target(target);
    for _ in 0..500 {
        pointer.update();
        let c = pointer.current();
        // Stays on the segment from start to target.
        assert!((0.0..=1.0).contains(&c.x), "overshoot: {c:?}");
        assert!(c.y.abs() < 1e-6);
    }
}

#[test]
fn pointer_retargets_mid_flight() {
    let mut pointer = SmoothPointer::new();
    pointer.set_target(Vec2::new(1.0, 1.0));
    for _ in 0..10 {
        pointer.update();
    }
    let before = pointer.current();
    pointer.set_target(Vec2::new(-1.0, -1.0));
    pointer.update();
    let after = pointer.current();
    assert!(after.x < before.x && after.y < before.y, "did not turn toward new target");
}

#[test]
fn damped_scalar_matches_pointer_behavior() {
    let mut scalar = DampedScalar::new(POINTER_DAMPING);
    scalar.set_target(100.0);
    let mut prev = 0.0f32;
    for _ in 0..200 {
        scalar.update();
        assert!(scalar.value() >= prev, "scalar moved backwards");
        assert!(scalar.value() <= 100.0, "scalar overshot");
        prev = scalar.value();
    }
    assert!((100.0 - scalar.value()) < 0.1);
}
