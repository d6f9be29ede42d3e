use glam::{Vec2, Vec3};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::{ALPHA_CEIL, ALPHA_FLOOR, DRIFT_INDEX_SCALE, DRIFT_TIME_SCALE, DRIFT_TIME_SCALE_Z};
use crate::noise::NoiseField;

/// One weighted color choice for particle assignment.
#[derive(Clone, Copy, Debug)]
pub struct PaletteEntry {
    pub color: [f32; 3],
    pub weight: f32,
}

/// Rectangle (in the x/y plane) that initial hero particles avoid, plus the
/// focus point used for the per-particle alpha falloff.
#[derive(Clone, Copy, Debug)]
pub struct ExclusionZone {
    pub center: Vec2,
    pub half_extent: Vec2,
    pub alpha_radius: f32,
}

impl ExclusionZone {
    pub fn contains(&self, p: Vec2) -> bool {
        (p.x - self.center.x).abs() < self.half_extent.x
            && (p.y - self.center.y).abs() < self.half_extent.y
    }
}

/// Static configuration for one particle field instance.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub count: usize,
    pub size: f32,
    /// Half-extents of the wraparound cuboid.
    pub bounds: Vec3,
    /// Per-axis initial velocity range, world units per frame.
    pub velocity_range: f32,
    pub drift_amplitude: Vec3,
    pub palette: SmallVec<[PaletteEntry; 4]>,
    /// Present only in the hero variant; enables alpha tracking.
    pub exclusion: Option<ExclusionZone>,
    pub pointer_threshold: f32,
    pub pointer_influence: f32,
    pub pointer_cap: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("particle palette must not be empty")]
    EmptyPalette,
    #[error("particle palette weights must be positive and finite")]
    InvalidWeights,
}

const EXCLUSION_ATTEMPTS: usize = 10;

/// Fixed-size particle set advanced in place every frame.
///
/// Buffers are structure-of-arrays, allocated once at construction; indices
/// stay stable for the lifetime of the field so external per-particle state
/// (colors, sizes) remains valid across frames.
pub struct ParticleField {
    config: FieldConfig,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    palette_indices: Vec<u32>,
    alphas: Option<Vec<f32>>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Result<Self, FieldError> {
        if config.palette.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        let weights: Vec<f32> = config.palette.iter().map(|e| e.weight).collect();
        let dist = WeightedIndex::new(&weights).map_err(|_| FieldError::InvalidWeights)?;

        let mut positions = Vec::with_capacity(config.count);
        let mut velocities = Vec::with_capacity(config.count);
        let mut palette_indices = Vec::with_capacity(config.count);
        let mut alphas = config.exclusion.map(|_| Vec::with_capacity(config.count));

        for _ in 0..config.count {
            let mut pos = sample_position(&config.bounds, rng);
            if let Some(zone) = &config.exclusion {
                // Reject-and-retry away from the text rectangle; keep the
                // last sample if every attempt lands inside.
                let mut attempts = 1;
                while attempts < EXCLUSION_ATTEMPTS && zone.contains(pos.truncate()) {
                    pos = sample_position(&config.bounds, rng);
                    attempts += 1;
                }
            }
            positions.push(pos);

            let r = config.velocity_range;
            velocities.push(Vec3::new(
                rng.gen_range(-r..=r),
                rng.gen_range(-r..=r),
                rng.gen_range(-r..=r),
            ));
            palette_indices.push(dist.sample(rng) as u32);
            if let Some(alphas) = &mut alphas {
                alphas.push(ALPHA_CEIL);
            }
        }

        Ok(Self {
            config,
            positions,
            velocities,
            palette_indices,
            alphas,
        })
    }

    /// Advance every particle by one frame.
    ///
    /// `elapsed` is seconds since scene start (noise sampling coordinate, not
    /// a timestep); `pointer` is the damped pointer in world units, if any.
    /// After this returns, every coordinate lies within the configured bounds.
    pub fn advance(&mut self, elapsed: f32, noise: &NoiseField, pointer: Option<Vec2>) {
        let bounds = self.config.bounds;
        let amp = self.config.drift_amplitude;
        let threshold = self.config.pointer_threshold;
        let influence = self.config.pointer_influence;
        let cap = self.config.pointer_cap;
        let zone = self.config.exclusion;

        for (idx, pos) in self.positions.iter_mut().enumerate() {
            *pos += self.velocities[idx];

            // Three independent samples at offset coordinates so neighbouring
            // particles and axes decorrelate.
            let off = idx as f32 * DRIFT_INDEX_SCALE;
            let tx = elapsed * DRIFT_TIME_SCALE + off;
            let tz = elapsed * DRIFT_TIME_SCALE_Z;
            pos.x += noise.noise2(tx, 0.0) * amp.x;
            pos.y += noise.noise2(0.0, tx) * amp.y;
            pos.z += noise.noise2(tz + off, tz) * amp.z;

            if let Some(p) = pointer {
                let dx = pos.x - p.x;
                let dy = pos.y - p.y;
                if dx.abs() < threshold && dy.abs() < threshold {
                    pos.x += dx.signum() * (dx.abs() * influence).min(cap);
                    pos.y += dy.signum() * (dy.abs() * influence).min(cap);
                }
            }

            // Hard teleport to the opposite face, never a reflect. Runs after
            // all position writes so the bounds invariant holds on return.
            wrap_axis(&mut pos.x, bounds.x);
            wrap_axis(&mut pos.y, bounds.y);
            wrap_axis(&mut pos.z, bounds.z);

            if let (Some(alphas), Some(zone)) = (&mut self.alphas, &zone) {
                let dist = pos.truncate().distance(zone.center);
                alphas[idx] = (dist / zone.alpha_radius).clamp(ALPHA_FLOOR, ALPHA_CEIL);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn size(&self) -> f32 {
        self.config.size
    }

    pub fn bounds(&self) -> Vec3 {
        self.config.bounds
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn color_of(&self, idx: usize) -> [f32; 3] {
        self.config.palette[self.palette_indices[idx] as usize].color
    }

    pub fn palette_indices(&self) -> &[u32] {
        &self.palette_indices
    }

    pub fn alpha_of(&self, idx: usize) -> f32 {
        self.alphas.as_ref().map_or(ALPHA_CEIL, |a| a[idx])
    }
}

#[inline]
fn sample_position<R: Rng + ?Sized>(bounds: &Vec3, rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-bounds.x..=bounds.x),
        rng.gen_range(-bounds.y..=bounds.y),
        rng.gen_range(-bounds.z..=bounds.z),
    )
}

#[inline]
fn wrap_axis(v: &mut f32, bound: f32) {
    if *v > bound {
        *v = -bound;
    } else if *v < -bound {
        *v = bound;
    }
}
