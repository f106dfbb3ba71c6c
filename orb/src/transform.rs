//! Per-frame transform state: aspect correction, fixed view, model spin.

use glam::{Mat4, Vec4};

/// Spin rate in radians per wall-clock second.
pub const SPIN_RATE: f32 = 0.4;

/// Scaling that shrinks the larger screen axis so the sphere keeps a
/// circular silhouette in a non-square window.
pub fn aspect_matrix(width: u32, height: u32) -> Mat4 {
    let a = width as f32 / height as f32;
    Mat4::from_diagonal(Vec4::new((1.0 / a).min(1.0), a.min(1.0), 1.0, 1.0))
}

/// Fixed view-projection: the camera looks along -X with +Z up.
///
/// Row form (0,1,0,0), (0,0,1,0), (-1,0,0,1), (0,0,0,1): clip x = world
/// y, clip y = world z, depth = 1 - world x. No perspective divide.
pub fn view_projection() -> Mat4 {
    Mat4::from_cols_array_2d(&[
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0, 1.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
    .transpose()
}

/// Model transform: rotation about +Z by `theta` radians.
pub fn model_matrix(theta: f32) -> Mat4 {
    Mat4::from_rotation_z(theta)
}

/// Rotation accumulator driven by wall-clock deltas.
///
/// Starts disabled at angle zero; disabling freezes the angle without
/// resetting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin {
    /// Current rotation angle in radians.
    pub theta: f32,
    /// Whether `advance` accumulates.
    pub enabled: bool,
}

impl Spin {
    /// Flip accumulation on or off; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Advance by `dt` wall-clock seconds when enabled.
    pub fn advance(&mut self, dt: f32) {
        if self.enabled {
            self.theta += SPIN_RATE * dt;
        }
    }

    /// Model matrix at the current angle.
    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.theta)
    }
}
