use anyhow::Context;
use glam::{Mat4, Vec2, Vec3};
use rand::prelude::*;
use smallvec::{smallvec, SmallVec};

use crate::constants::*;
use crate::noise::NoiseField;
use crate::ornaments::{LightTrail, NodeSwarm, SpriteInstance, WireSphere};
use crate::particles::{ExclusionZone, FieldConfig, PaletteEntry, ParticleField};
use crate::pointer::{DampedScalar, SmoothPointer};
use crate::profile::DeviceProfile;

/// Last-value-wins external signals. Each is written by its own input path
/// and read once per tick; the simulation never mutates them.
#[derive(Clone, Copy, Debug)]
pub struct SceneSignals {
    pub reduced_motion: bool,
    pub tab_visible: bool,
    pub scroll_y: f32,
}

impl Default for SceneSignals {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            tab_visible: true,
            scroll_y: 0.0,
        }
    }
}

/// Owns the device profile, the gating signals and the per-frame
/// orchestration over the particle field and ornaments.
pub struct SceneDirector {
    profile: DeviceProfile,
    signals: SceneSignals,
    raw_pointer: Vec2,
    pointer: SmoothPointer,
    parallax: DampedScalar,
    noise: NoiseField,
    field: ParticleField,
    spheres: SmallVec<[WireSphere; 4]>,
    trails: SmallVec<[LightTrail; 3]>,
    swarm: Option<NodeSwarm>,
    group_rotation: f32,
    group_translation: Vec2,
}

impl SceneDirector {
    /// Site-wide backdrop preset: the full cuboid of drifting particles with
    /// sphere and trail ornaments, no exclusion rect, no alpha tracking.
    pub fn background(profile: DeviceProfile, seed: u64) -> anyhow::Result<Self> {
        let mut rng = StdRng::seed_from_u64(mix_seed(seed, 1));
        let config = FieldConfig {
            count: profile.particle_count,
            size: profile.particle_size,
            bounds: background_bounds_vec3(),
            velocity_range: PARTICLE_VELOCITY_RANGE,
            drift_amplitude: Vec3::from(DRIFT_AMPLITUDE),
            palette: BACKGROUND_PALETTE
                .iter()
                .map(|&(color, weight)| PaletteEntry { color, weight })
                .collect(),
            exclusion: None,
            pointer_threshold: POINTER_THRESHOLD,
            pointer_influence: POINTER_INFLUENCE,
            pointer_cap: POINTER_INFLUENCE_CAP,
        };
        let field = ParticleField::new(config, &mut rng)
            .context("building background particle field")?;

        let spheres = smallvec![
            WireSphere::new(0.0, 1.1, Vec3::new(-5.5, 2.2, -2.0)),
            WireSphere::new(2.1, 0.8, Vec3::new(5.8, -1.6, -2.5)),
            WireSphere::new(4.2, 0.6, Vec3::new(2.4, 3.0, -3.5)),
        ];
        let trails = smallvec![
            LightTrail::new(0.0, 4.4, -2.0, BACKGROUND_PALETTE[0].0),
            LightTrail::new(1.0, 3.6, -2.8, BACKGROUND_PALETTE[2].0),
        ];

        Ok(Self::assemble(
            profile,
            NoiseField::from_seed(mix_seed(seed, 2)),
            field,
            spheres,
            trails,
            None,
        ))
    }

    /// Home hero preset: text exclusion rect, per-particle alpha and the
    /// pointer-reactive node swarm.
    pub fn hero(profile: DeviceProfile, seed: u64) -> anyhow::Result<Self> {
        let mut rng = StdRng::seed_from_u64(mix_seed(seed, 1));
        let config = FieldConfig {
            count: profile.particle_count,
            size: profile.particle_size,
            bounds: hero_bounds_vec3(),
            velocity_range: PARTICLE_VELOCITY_RANGE,
            drift_amplitude: Vec3::from(DRIFT_AMPLITUDE),
            palette: HERO_PALETTE
                .iter()
                .map(|&(color, weight)| PaletteEntry { color, weight })
                .collect(),
            exclusion: Some(ExclusionZone {
                center: Vec2::from(HERO_EXCLUSION_CENTER),
                half_extent: Vec2::from(HERO_EXCLUSION_HALF_EXTENT),
                alpha_radius: HERO_ALPHA_RADIUS,
            }),
            pointer_threshold: POINTER_THRESHOLD,
            pointer_influence: POINTER_INFLUENCE,
            pointer_cap: POINTER_INFLUENCE_CAP,
        };
        let field =
            ParticleField::new(config, &mut rng).context("building hero particle field")?;

        let spheres = smallvec![
            WireSphere::new(1.3, 0.9, Vec3::new(-4.6, 1.8, -1.5)),
            WireSphere::new(3.7, 0.7, Vec3::new(4.9, -2.0, -2.2)),
        ];
        let trails = smallvec![LightTrail::new(0.5, 3.8, -1.8, HERO_PALETTE[1].0)];
        let swarm = NodeSwarm::new(
            SWARM_NODE_COUNT,
            SWARM_RADIUS,
            SWARM_NODE_SCALE,
            HERO_PALETTE[0].0,
            &mut rng,
        );

        Ok(Self::assemble(
            profile,
            NoiseField::from_seed(mix_seed(seed, 2)),
            field,
            spheres,
            trails,
            Some(swarm),
        ))
    }

    fn assemble(
        profile: DeviceProfile,
        noise: NoiseField,
        field: ParticleField,
        spheres: SmallVec<[WireSphere; 4]>,
        trails: SmallVec<[LightTrail; 3]>,
        swarm: Option<NodeSwarm>,
    ) -> Self {
        Self {
            profile,
            signals: SceneSignals::default(),
            raw_pointer: Vec2::ZERO,
            pointer: SmoothPointer::new(),
            parallax: DampedScalar::new(SCROLL_DAMPING),
            noise,
            field,
            spheres,
            trails,
            swarm,
            group_rotation: 0.0,
            group_translation: Vec2::ZERO,
        }
    }

    // ---------------- signal setters ----------------

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.signals.reduced_motion = reduced;
    }

    pub fn set_tab_visible(&mut self, visible: bool) {
        self.signals.tab_visible = visible;
    }

    pub fn set_scroll_offset(&mut self, scroll_y: f32) {
        self.signals.scroll_y = scroll_y;
    }

    /// Store the latest raw pointer sample in device-normalized coordinates.
    /// Applied to the damped tracker at the next executed tick.
    pub fn set_pointer_target(&mut self, target: Vec2) {
        self.raw_pointer = target;
    }

    // ---------------- per-frame orchestration ----------------

    /// Run one frame of simulation. Returns false without touching any state
    /// when a gate holds; there is no catch-up on resume.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        if self.signals.reduced_motion
            || !self.signals.tab_visible
            || self.profile.disable_animations
        {
            return false;
        }

        self.pointer.set_target(self.raw_pointer);
        self.pointer.update();

        self.parallax
            .set_target(self.signals.scroll_y * self.profile.parallax_strength);
        self.parallax.update();

        let pointer_world = self.pointer.current() * POINTER_WORLD_SCALE;
        self.field.advance(elapsed, &self.noise, Some(pointer_world));

        for sphere in &mut self.spheres {
            sphere.step(elapsed);
        }
        for trail in &mut self.trails {
            trail.step(elapsed);
        }
        if let Some(swarm) = &mut self.swarm {
            swarm.step(elapsed, &self.noise, pointer_world);
        }

        self.group_rotation = elapsed * GROUP_ROT_RATE;
        let max_t = self.profile.max_parallax / PARALLAX_DIVISOR;
        let p = self.pointer.current();
        self.group_translation = Vec2::new(
            (p.x * self.profile.parallax_strength).clamp(-max_t, max_t),
            (-p.y * self.profile.parallax_strength
                - self.parallax.value() * SCROLL_PARALLAX_SCALE * PARALLAX_DIVISOR)
                .clamp(-max_t, max_t),
        );
        true
    }

    // ---------------- frame output ----------------

    /// Group transform applied to the whole scene: slow constant rotation
    /// plus the clamped pointer/scroll parallax translation.
    pub fn group_transform(&self) -> Mat4 {
        Mat4::from_translation(self.group_translation.extend(0.0))
            * Mat4::from_rotation_y(self.group_rotation)
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn signals(&self) -> &SceneSignals {
        &self.signals
    }

    pub fn pointer(&self) -> &SmoothPointer {
        &self.pointer
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn spheres(&self) -> &[WireSphere] {
        &self.spheres
    }

    pub fn trails(&self) -> &[LightTrail] {
        &self.trails
    }

    pub fn swarm_instances(&self) -> &[SpriteInstance] {
        self.swarm.as_ref().map_or(&[], |s| s.instances())
    }

    pub fn group_translation(&self) -> Vec2 {
        self.group_translation
    }
}

// Derive independent sub-seeds from the base seed so the field and the noise
// permutation can be reseeded separately.
#[inline]
fn mix_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
