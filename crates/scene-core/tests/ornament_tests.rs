// Host-side tests for the decorative animators.

use glam::{Vec2, Vec3};
use rand::prelude::*;

use scene_core::{
    LightTrail, NodeSwarm, NoiseField, WireSphere, SWARM_NODE_COUNT, TRAIL_SEGMENTS,
};

#[test]
fn trail_geometry_is_precomputed_and_immutable() {
    let mut trail = LightTrail::new(0.0, 4.0, -2.0, [0.5, 0.4, 1.0]);
    assert_eq!(trail.points().len(), TRAIL_SEGMENTS + 1);
    let before: Vec<Vec3> = trail.points().to_vec();

    for frame in 0..500 {
        trail.step(frame as f32 * 0.016);
    }
    assert_eq!(trail.points(), &before[..], "trail geometry changed under step");
}

#[test]
fn trail_opacity_oscillates_within_band() {
    let mut trail = LightTrail::new(1.0, 3.5, -2.0, [1.0, 1.0, 1.0]);
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for frame in 0..2000 {
        trail.step(frame as f32 * 0.016);
        lo = lo.min(trail.opacity());
        hi = hi.max(trail.opacity());
        assert!((0.05..=0.55).contains(&trail.opacity()));
    }
    assert!(lo < 0.2 && hi > 0.4, "opacity barely moved: [{lo}, {hi}]");
}

#[test]
fn wire_sphere_step_is_a_pure_function_of_time() {
    let mut a = WireSphere::new(1.5, 1.0, Vec3::new(-3.0, 2.0, -1.0));
    let mut b = WireSphere::new(1.5, 1.0, Vec3::new(-3.0, 2.0, -1.0));
    for frame in 0..100 {
        a.step(frame as f32 * 0.016);
    }
    // Only the latest time matters, not the call history.
    b.step(99.0 * 0.016);
    assert_eq!(a.transform(), b.transform());
}

#[test]
fn wire_sphere_breathes_and_spins() {
    let mut sphere = WireSphere::new(0.0, 1.0, Vec3::ZERO);
    sphere.step(0.0);
    let at_zero = *sphere.transform();
    sphere.step(10.0);
    let later = *sphere.transform();
    assert_ne!(at_zero.scale, later.scale);
    assert!(later.rotation.x > at_zero.rotation.x);
}

#[test]
fn swarm_scale_perturbation_stays_within_ten_percent() {
    let mut rng = StdRng::seed_from_u64(8);
    let base_scale = 0.09;
    let mut swarm = NodeSwarm::new(SWARM_NODE_COUNT, 3.2, base_scale, [1.0, 1.0, 1.0], &mut rng);
    let noise = NoiseField::from_seed(8);

    for frame in 0..1000 {
        swarm.step(frame as f32 * 0.016, &noise, Vec2::new(10.0, 10.0));
        for inst in swarm.instances() {
            assert!(
                inst.scale >= base_scale * 0.9 - 1e-6 && inst.scale <= base_scale * 1.1 + 1e-6,
                "node scale out of band: {}",
                inst.scale
            );
        }
    }
}

#[test]
fn swarm_rotation_tracks_time_when_pointer_is_far() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut swarm = NodeSwarm::new(16, 3.0, 0.09, [1.0, 1.0, 1.0], &mut rng);
    let noise = NoiseField::from_seed(2);

    // Pointer far outside the interaction radius: zero interaction.
    swarm.step(7.5, &noise, Vec2::new(100.0, 100.0));
    for inst in swarm.instances() {
        assert!((inst.rotation - 7.5).abs() < 1e-6, "rotation {} != t", inst.rotation);
    }
}

#[test]
fn swarm_nodes_lean_toward_a_near_pointer() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut swarm = NodeSwarm::new(24, 2.0, 0.09, [1.0, 1.0, 1.0], &mut rng);
    let noise = NoiseField::from_seed(4);

    swarm.step(1.0, &noise, Vec2::new(100.0, 100.0));
    let undisturbed: Vec<[f32; 3]> = swarm.instances().iter().map(|i| i.pos).collect();

    swarm.step(1.0, &noise, Vec2::new(0.5, 0.5));
    let moved = swarm
        .instances()
        .iter()
        .zip(&undisturbed)
        .filter(|(a, b)| a.pos != **b)
        .count();
    assert!(moved > 0, "near pointer displaced no nodes");
}

#[test]
fn swarm_instance_count_matches_node_count() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut swarm = NodeSwarm::new(36, 3.2, 0.09, [1.0, 1.0, 1.0], &mut rng);
    let noise = NoiseField::from_seed(6);
    assert_eq!(swarm.instances().len(), 36);
    swarm.step(5.0, &noise, Vec2::ZERO);
    assert_eq!(swarm.instances().len(), 36);
}
