// Host-side tests for frame timing bookkeeping.

use scene_core::FrameClock;

#[test]
fn elapsed_is_monotonic_and_dt_non_negative() {
    let mut clock = FrameClock::new();
    let mut prev_elapsed = 0.0f32;
    for _ in 0..100 {
        let timing = clock.tick();
        assert!(timing.elapsed >= prev_elapsed, "elapsed went backwards");
        assert!(timing.dt >= 0.0, "negative dt");
        assert!(timing.dt <= timing.elapsed + 1e-6, "dt larger than elapsed");
        prev_elapsed = timing.elapsed;
    }
}
