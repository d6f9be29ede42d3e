use glam::Vec3;

// Shared visual tuning constants used by the simulation core and the native frontend.

// Scene layout
pub const CAMERA_Z: f32 = 14.0; // camera eye distance on +Z looking at origin
pub const BACKGROUND_BOUNDS: [f32; 3] = [9.0, 5.5, 4.0]; // half-extents of the particle cuboid
pub const HERO_BOUNDS: [f32; 3] = [8.0, 4.5, 3.0];

// Particle motion
pub const PARTICLE_VELOCITY_RANGE: f32 = 0.01; // per-axis initial velocity, world units per frame
pub const DRIFT_TIME_SCALE: f32 = 0.12; // noise time coordinate rate for x/y drift
pub const DRIFT_TIME_SCALE_Z: f32 = 0.08;
pub const DRIFT_INDEX_SCALE: f32 = 7.3; // per-particle noise offset so neighbours decorrelate
pub const DRIFT_AMPLITUDE: [f32; 3] = [0.006, 0.006, 0.004];

// Pointer interaction
pub const POINTER_DAMPING: f32 = 0.08; // ~8% closure per frame
pub const POINTER_WORLD_SCALE: f32 = 6.0; // device-normalized [-1,1] to world units
pub const POINTER_THRESHOLD: f32 = 1.8; // per-axis influence window, world units
pub const POINTER_INFLUENCE: f32 = 0.02;
pub const POINTER_INFLUENCE_CAP: f32 = 0.03; // keeps a pointer parked on a particle from launching it

// Hero alpha shaping
pub const ALPHA_FLOOR: f32 = 0.2;
pub const ALPHA_CEIL: f32 = 1.0;

// Scroll parallax and group transform
pub const SCROLL_DAMPING: f32 = 0.08;
pub const SCROLL_PARALLAX_SCALE: f32 = 0.002; // scroll pixels to world units
pub const GROUP_ROT_RATE: f32 = 0.02; // radians per second
pub const PARALLAX_DIVISOR: f32 = 100.0; // max_parallax is expressed in source pixels

// Wireframe sphere ornaments
pub const SPHERE_BREATHE_RATE: f32 = 0.8;
pub const SPHERE_BREATHE_AMPLITUDE: f32 = 0.15;
pub const SPHERE_SPIN_RATE_X: f32 = 0.21;
pub const SPHERE_SPIN_RATE_Y: f32 = 0.17;
pub const SPHERE_PHASE_Y_SCALE: f32 = 0.4;
pub const SPHERE_BOB_RATE: f32 = 0.6;
pub const SPHERE_BOB_AMPLITUDE: f32 = 0.35;
pub const SPHERE_BOB_PHASE_SCALE: f32 = 1.7;

// Light trails
pub const TRAIL_SEGMENTS: usize = 100;
pub const TRAIL_SWEEP: f32 = 12.566_371; // two full turns (4*pi)
pub const TRAIL_LOBE_MAJOR: f32 = 0.4;
pub const TRAIL_LOBE_MINOR: f32 = 0.18;
pub const TRAIL_DEPTH_WOBBLE: f32 = 0.4;
pub const TRAIL_PULSE_RATE: f32 = 0.9;
pub const TRAIL_OPACITY_BASE: f32 = 0.3;
pub const TRAIL_OPACITY_SPAN: f32 = 0.2;

// Instanced node swarm
pub const SWARM_NODE_COUNT: usize = 36;
pub const SWARM_RADIUS: f32 = 3.2;
pub const SWARM_NODE_SCALE: f32 = 0.09;
pub const SWARM_SCALE_JITTER: f32 = 0.1; // perturbation clamped to +/-10% of base scale
pub const SWARM_INTERACTION_RADIUS: f32 = 2.4;
pub const SWARM_MAX_DISPLACEMENT: f32 = 20.0;
pub const SWARM_NOISE_TIME_SCALE: f32 = 0.5;
pub const SWARM_SEED_Y_SCALE: f32 = 0.1;
pub const SWARM_ROT_INTERACTION_GAIN: f32 = 3.0;
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

// Default palettes for the two scene presets: (rgb, weight)
pub const BACKGROUND_PALETTE: [([f32; 3], f32); 4] = [
    ([0.545, 0.361, 0.965], 4.0), // violet
    ([0.388, 0.400, 0.945], 3.0), // indigo
    ([0.133, 0.827, 0.933], 2.0), // cyan
    ([0.900, 0.900, 1.000], 1.0), // near-white
];

pub const HERO_PALETTE: [([f32; 3], f32); 3] = [
    ([0.545, 0.361, 0.965], 3.0),
    ([0.204, 0.827, 0.600], 2.0), // emerald
    ([0.950, 0.950, 1.000], 1.0),
];

// Hero text exclusion rectangle (world units, centered on the headline)
pub const HERO_EXCLUSION_CENTER: [f32; 2] = [0.0, 0.6];
pub const HERO_EXCLUSION_HALF_EXTENT: [f32; 2] = [3.4, 1.2];
pub const HERO_ALPHA_RADIUS: f32 = 5.0; // distance at which hero particles reach full alpha

#[inline]
pub fn background_bounds_vec3() -> Vec3 {
    Vec3::from(BACKGROUND_BOUNDS)
}

#[inline]
pub fn hero_bounds_vec3() -> Vec3 {
    Vec3::from(HERO_BOUNDS)
}
