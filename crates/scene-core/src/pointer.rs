use glam::Vec2;

use crate::constants::POINTER_DAMPING;

/// Exponentially damped 2D pointer tracker.
///
/// `set_target` may be called any number of times per frame (last value wins);
/// `update` must run exactly once per rendered frame, after the targets for
/// that frame, so the damping constant keeps its meaning.
#[derive(Clone, Copy, Debug)]
pub struct SmoothPointer {
    current: Vec2,
    target: Vec2,
    factor: f32,
}

impl SmoothPointer {
    pub fn new() -> Self {
        Self::with_factor(POINTER_DAMPING)
    }

    pub fn with_factor(factor: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            factor,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advance `current` toward `target` by the damping factor.
    pub fn update(&mut self) {
        self.current += (self.target - self.current) * self.factor;
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}

impl Default for SmoothPointer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar sibling of [`SmoothPointer`], used for the scroll-parallax value.
#[derive(Clone, Copy, Debug)]
pub struct DampedScalar {
    current: f32,
    target: f32,
    factor: f32,
}

impl DampedScalar {
    pub fn new(factor: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            factor,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn update(&mut self) {
        self.current += (self.target - self.current) * self.factor;
    }

    pub fn value(&self) -> f32 {
        self.current
    }
}
