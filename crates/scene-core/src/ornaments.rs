use bytemuck::Zeroable;
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;

use crate::constants::*;
use crate::noise::NoiseField;

/// Instance data shared by the sprite pipeline (particles and swarm nodes).
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub rotation: f32,
    pub _pad: [f32; 3],
}

/// Translation/rotation/scale owned by a single ornament.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl OrnamentTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(
                glam::EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}

/// Slowly breathing, spinning wireframe sphere. Pure function of elapsed time
/// and the per-instance phase index; owns nothing but its transform.
pub struct WireSphere {
    phase_index: f32,
    base_scale: f32,
    base_y: f32,
    transform: OrnamentTransform,
}

impl WireSphere {
    pub fn new(phase_index: f32, base_scale: f32, position: Vec3) -> Self {
        Self {
            phase_index,
            base_scale,
            base_y: position.y,
            transform: OrnamentTransform {
                position,
                rotation: Vec3::ZERO,
                scale: base_scale,
            },
        }
    }

    pub fn step(&mut self, t: f32) {
        let phase = self.phase_index;
        self.transform.scale =
            self.base_scale + (t * SPHERE_BREATHE_RATE + phase).sin() * SPHERE_BREATHE_AMPLITUDE;
        self.transform.rotation.x = t * SPHERE_SPIN_RATE_X + phase;
        self.transform.rotation.y = t * SPHERE_SPIN_RATE_Y + phase * SPHERE_PHASE_Y_SCALE;
        self.transform.position.y = self.base_y
            + (t * SPHERE_BOB_RATE + phase * SPHERE_BOB_PHASE_SCALE).sin() * SPHERE_BOB_AMPLITUDE;
    }

    pub fn transform(&self) -> &OrnamentTransform {
        &self.transform
    }
}

/// Closed multi-lobe curve whose geometry is computed once; only the material
/// opacity oscillates per frame.
pub struct LightTrail {
    points: Vec<Vec3>,
    color: [f32; 3],
    color_index: f32,
    opacity: f32,
}

impl LightTrail {
    pub fn new(color_index: f32, base_radius: f32, z: f32, color: [f32; 3]) -> Self {
        let mut points = Vec::with_capacity(TRAIL_SEGMENTS + 1);
        for s in 0..=TRAIL_SEGMENTS {
            let theta = s as f32 / TRAIL_SEGMENTS as f32 * TRAIL_SWEEP;
            let r = base_radius
                + (theta * 3.0 + color_index).sin() * TRAIL_LOBE_MAJOR
                + (theta * 5.0).cos() * TRAIL_LOBE_MINOR;
            points.push(Vec3::new(
                r * theta.cos(),
                r * theta.sin() * 0.6,
                z + (theta * 2.0 + color_index).sin() * TRAIL_DEPTH_WOBBLE,
            ));
        }
        Self {
            points,
            color,
            color_index,
            opacity: TRAIL_OPACITY_BASE,
        }
    }

    pub fn step(&mut self, t: f32) {
        self.opacity =
            TRAIL_OPACITY_BASE + (t * TRAIL_PULSE_RATE + self.color_index).sin() * TRAIL_OPACITY_SPAN;
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Instanced node swarm: fixed trig base placement, per-node noise seed, one
/// shared instance buffer rewritten index-addressed every frame.
pub struct NodeSwarm {
    base_positions: Vec<Vec3>,
    seeds: Vec<f32>,
    base_scale: f32,
    color: [f32; 3],
    instances: Vec<SpriteInstance>,
}

impl NodeSwarm {
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        radius: f32,
        base_scale: f32,
        color: [f32; 3],
        rng: &mut R,
    ) -> Self {
        let mut base_positions = Vec::with_capacity(count);
        let mut seeds = Vec::with_capacity(count);
        for i in 0..count {
            let angle = i as f32 * GOLDEN_ANGLE;
            let ring = ((i + 1) as f32 / count as f32).sqrt() * radius;
            base_positions.push(Vec3::new(
                angle.cos() * ring,
                angle.sin() * ring * 0.7,
                (i % 5) as f32 * 0.3 - 0.6,
            ));
            seeds.push(rng.gen::<f32>() * 100.0);
        }
        let instances = vec![SpriteInstance::zeroed(); count];
        Self {
            base_positions,
            seeds,
            base_scale,
            color,
            instances,
        }
    }

    pub fn step(&mut self, t: f32, noise: &NoiseField, pointer: Vec2) {
        let max_disp = SWARM_MAX_DISPLACEMENT / 100.0;
        for i in 0..self.base_positions.len() {
            let seed = self.seeds[i];
            let n = noise.noise2(t * SWARM_NOISE_TIME_SCALE + seed, seed * SWARM_SEED_Y_SCALE);
            let scale = self.base_scale
                * (1.0 + (n * SWARM_SCALE_JITTER).clamp(-SWARM_SCALE_JITTER, SWARM_SCALE_JITTER));

            let base = self.base_positions[i];
            let dist = base.truncate().distance(pointer);
            let interaction = (1.0 - dist / SWARM_INTERACTION_RADIUS).max(0.0);
            let eased = 1.0 - (1.0 - interaction).powi(3);

            let displacement = (eased * max_disp).min(max_disp);
            let target = Vec3::new(pointer.x, pointer.y, base.z);
            let pos = base.lerp(target, displacement * 0.1);

            self.instances[i] = SpriteInstance {
                pos: pos.to_array(),
                scale,
                color: [self.color[0], self.color[1], self.color[2], 1.0],
                rotation: t + eased * SWARM_ROT_INTERACTION_GAIN,
                _pad: [0.0; 3],
            };
        }
    }

    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }
}
