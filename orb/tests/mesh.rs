use std::collections::HashMap;

use orb::mesh::{tessellate, MeshError};

const EPS: f32 = 1e-6;

fn len3(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[test]
fn rejects_too_few_segments() {
    assert_eq!(tessellate(0), Err(MeshError::TooFewSegments(0)));
    assert_eq!(tessellate(1), Err(MeshError::TooFewSegments(1)));
}

#[test]
fn default_factor_counts() {
    let m = tessellate(50).unwrap();
    assert_eq!(m.vertices.len(), 26 * 51);
    assert_eq!(m.indices.len(), 50 * 24 * 6);
}

#[test]
fn index_length_matches_closed_form() {
    for n in [2u32, 3, 4, 5, 8, 20, 50, 51] {
        let m = tessellate(n).unwrap();
        let expected = n * (n / 2).saturating_sub(1) * 6;
        assert_eq!(m.indices.len() as u32, expected, "n={n}");
        assert_eq!(m.vertices.len() as u32, (n / 2 + 1) * (n + 1), "n={n}");
    }
}

#[test]
fn all_indices_in_range() {
    let m = tessellate(50).unwrap();
    let count = m.vertices.len() as u32;
    assert!(m.indices.iter().all(|&ix| ix < count));
}

#[test]
fn positions_are_unit_length_and_equal_normals() {
    let m = tessellate(50).unwrap();
    for v in &m.vertices {
        assert!((len3(v.position) - 1.0).abs() < EPS);
        assert_eq!(v.position, v.normal);
    }
}

#[test]
fn uv_stays_in_unit_square() {
    let m = tessellate(50).unwrap();
    for v in &m.vertices {
        assert!((0.0..=1.0).contains(&v.uv[0]));
        assert!((0.0..=1.0).contains(&v.uv[1]));
    }
}

#[test]
fn seam_columns_coincide_except_u() {
    let n = 50u32;
    let m = tessellate(n).unwrap();
    for i in 0..m.rows() {
        let first = m.vertices[m.grid_index(i, 0) as usize];
        let last = m.vertices[m.grid_index(i, n) as usize];
        for k in 0..3 {
            assert!((first.position[k] - last.position[k]).abs() < EPS, "row {i}");
            assert!((first.normal[k] - last.normal[k]).abs() < EPS, "row {i}");
        }
        assert_eq!(last.uv[0] - first.uv[0], 1.0);
        assert_eq!(first.uv[1], last.uv[1]);
    }
}

#[test]
fn pole_rows_collapse_to_the_poles() {
    let n = 50u32;
    let m = tessellate(n).unwrap();
    let bottom = m.rows() - 1;
    for j in 0..m.cols() {
        let top = m.vertices[m.grid_index(0, j) as usize];
        assert!(top.position[0].abs() < EPS && top.position[1].abs() < EPS);
        assert!((top.position[2] - 1.0).abs() < EPS);
        let bot = m.vertices[m.grid_index(bottom, j) as usize];
        assert!(bot.position[0].abs() < EPS && bot.position[1].abs() < EPS);
        assert!((bot.position[2] + 1.0).abs() < EPS);
    }
}

#[test]
fn minimal_factor_collapses_to_pole_rows() {
    let m = tessellate(2).unwrap();
    assert_eq!(m.vertices.len(), 6);
    assert!(m.indices.is_empty());
    for j in 0..3 {
        assert!((m.vertices[j].position[2] - 1.0).abs() < EPS);
        assert!((m.vertices[3 + j].position[2] + 1.0).abs() < EPS);
    }
}

#[test]
fn odd_factor_truncates_latitude() {
    let m = tessellate(5).unwrap();
    assert_eq!(m.vertices.len(), 3 * 6);
    assert_eq!(m.indices.len(), 30);
}

#[test]
fn equator_ring_hits_cardinal_points() {
    let m = tessellate(4).unwrap();
    assert_eq!(m.vertices.len(), 15);
    assert_eq!(m.indices.len(), 24);
    let cardinal: [[f32; 3]; 5] = [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
        [1.0, 0.0, 0.0],
    ];
    for (j, want) in cardinal.iter().enumerate() {
        let v = m.vertices[m.grid_index(1, j as u32) as usize];
        for k in 0..3 {
            assert!((v.position[k] - want[k]).abs() < EPS, "j={j} k={k}");
        }
    }
}

#[test]
fn builder_is_deterministic() {
    assert_eq!(tessellate(20).unwrap(), tessellate(20).unwrap());
}

#[test]
fn edges_shared_by_at_most_two_triangles() {
    let n = 12u32;
    let m = tessellate(n).unwrap();
    let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
    for t in m.indices.chunks(3) {
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            *edges.entry(key).or_insert(0) += 1;
        }
    }
    let (rows, cols) = (m.rows(), m.cols());
    // Strictly interior: not a pole row, not a seam column.
    let interior = |ix: u32| {
        let (i, j) = (ix / cols, ix % cols);
        i > 0 && i < rows - 1 && j > 0 && j < cols - 1
    };
    for (&(a, b), &count) in &edges {
        assert!(count <= 2, "edge ({a},{b}) in {count} triangles");
        if interior(a) && interior(b) {
            assert_eq!(count, 2, "interior edge ({a},{b})");
        }
    }
}

#[test]
fn emitted_triangles_have_nonzero_area() {
    let m = tessellate(50).unwrap();
    for t in m.indices.chunks(3) {
        let a = m.vertices[t[0] as usize].position;
        let b = m.vertices[t[1] as usize].position;
        let c = m.vertices[t[2] as usize].position;
        assert!(len3(cross(sub(b, a), sub(c, a))) > 1e-6);
    }
}

#[test]
fn winding_is_outward() {
    let m = tessellate(50).unwrap();
    let mut vol6 = 0.0f64;
    for t in m.indices.chunks(3) {
        let a = m.vertices[t[0] as usize].position;
        let b = m.vertices[t[1] as usize].position;
        let c = m.vertices[t[2] as usize].position;
        let bc = [
            (b[1] as f64) * (c[2] as f64) - (b[2] as f64) * (c[1] as f64),
            (b[2] as f64) * (c[0] as f64) - (b[0] as f64) * (c[2] as f64),
            (b[0] as f64) * (c[1] as f64) - (b[1] as f64) * (c[0] as f64),
        ];
        vol6 += (a[0] as f64) * bc[0] + (a[1] as f64) * bc[1] + (a[2] as f64) * bc[2];
    }
    let volume = vol6 / 6.0;
    // Inscribed volume approaches 4*pi/3 from below.
    assert!(volume > 4.0, "signed volume {volume}");
    assert!(volume < 4.19, "signed volume {volume}");
}
