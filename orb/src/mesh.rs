//! Unit-sphere tessellation into an indexed triangle mesh.

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};

/// Default tessellation factor.
pub const DEFAULT_TESS: u32 = 50;

/// Interleaved vertex record as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position on the unit sphere.
    pub position: [f32; 3],
    /// Outward normal; equals the position on a unit sphere.
    pub normal: [f32; 3],
    /// Texture coordinate: u = longitude fraction, v = 1 - latitude fraction.
    pub uv: [f32; 2],
}

/// Errors from the mesh builder.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// Tessellation factor below the 2-segment minimum.
    #[error("tessellation factor {0} is below the minimum of 2")]
    TooFewSegments(u32),
}

/// Host-side sphere mesh: a row-major vertex grid plus triangle-list indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    /// (N/2 + 1) rows x (N + 1) columns of vertices, row-major.
    pub vertices: Vec<Vertex>,
    /// Triangle list; every entry is an offset into `vertices`.
    pub indices: Vec<u32>,
    /// Tessellation factor the mesh was built with.
    pub tess: u32,
}

impl SphereMesh {
    /// Number of latitude rows in the vertex grid.
    pub fn rows(&self) -> u32 {
        self.tess / 2 + 1
    }

    /// Number of longitude columns in the vertex grid.
    pub fn cols(&self) -> u32 {
        self.tess + 1
    }

    /// Linear index of grid cell (i, j).
    pub fn grid_index(&self, i: u32, j: u32) -> u32 {
        i * self.cols() + j
    }
}

/// Build the unit-sphere mesh for tessellation factor `n`.
///
/// `n` counts longitudinal segments; latitude uses `n / 2` strips, so an
/// odd `n` truncates the strip count. Latitude row i runs from the +Z
/// pole (i = 0) to the -Z pole (i = n/2); longitude column j runs the
/// full turn, with j = 0 and j = n landing on the same meridian. The
/// seam column is duplicated so texture coordinates can wrap: both ends
/// share position and normal but carry u = 0 and u = 1.
///
/// Pure and deterministic; call it again to rebuild at another factor.
pub fn tessellate(n: u32) -> Result<SphereMesh, MeshError> {
    if n < 2 {
        return Err(MeshError::TooFewSegments(n));
    }
    let half = n / 2;
    let cols = n + 1;

    let mut vertices = Vec::with_capacity(((half + 1) * cols) as usize);
    for i in 0..=half {
        // Polar angle from the +Z pole; rows 0 and n/2 collapse to the poles.
        let ti = PI * i as f32 / half as f32;
        let (si, ci) = ti.sin_cos();
        for j in 0..=n {
            let tj = 2.0 * PI * j as f32 / n as f32;
            let (sj, cj) = tj.sin_cos();
            let p = [si * cj, si * sj, ci];
            vertices.push(Vertex {
                position: p,
                normal: p,
                uv: [j as f32 / n as f32, 1.0 - i as f32 / half as f32],
            });
        }
    }

    // Two triangles per quad, except in the pole strips where one of the
    // two would repeat the collapsed pole vertex with zero area.
    let mut indices = Vec::with_capacity((n * half.saturating_sub(1) * 6) as usize);
    for i in 0..half {
        for j in 0..n {
            let a = i * cols + j;
            let b = (i + 1) * cols + j;
            let c = i * cols + j + 1;
            let d = (i + 1) * cols + j + 1;
            if i != 0 {
                indices.extend_from_slice(&[a, b, c]);
            }
            if i != half - 1 {
                indices.extend_from_slice(&[c, b, d]);
            }
        }
    }

    Ok(SphereMesh { vertices, indices, tess: n })
}
