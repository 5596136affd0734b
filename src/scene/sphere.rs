//! UV sphere generation.

use std::f32::consts::{PI, TAU};

/// Interleaved vertex shared by every mesh pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit outward normal.
    pub normal: [f32; 3],
    /// Texture coordinate; `v` runs from 1 at the north pole to 0 at the
    /// south pole.
    pub uv: [f32; 2],
}

/// Minimum number of segments around the equator.
pub const MIN_WIDTH_SEGMENTS: u32 = 3;
/// Minimum number of segments from pole to pole.
pub const MIN_HEIGHT_SEGMENTS: u32 = 2;

/// CPU-side sphere mesh: `(w + 1) × (h + 1)` vertices (the seam column is
/// duplicated for UV continuity) and two triangles per quad, with the
/// degenerate triangles at the poles skipped.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Radius the mesh was built with.
    pub radius: f32,
    /// Segment counts `(width, height)` after clamping.
    pub segments: (u32, u32),
}

impl SphereMesh {
    /// Build a sphere centered at the origin. Segment counts below the
    /// minimum are raised to it.
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(MIN_WIDTH_SEGMENTS);
        let h = height_segments.max(MIN_HEIGHT_SEGMENTS);

        let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(h as usize + 1);

        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            let (sin_v, cos_v) = (v * PI).sin_cos();
            let mut row = Vec::with_capacity(w as usize + 1);

            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let (sin_u, cos_u) = (u * TAU).sin_cos();
                let position =
                    [-radius * cos_u * sin_v, radius * cos_v, radius * sin_u * sin_v];
                let normal = glam::Vec3::from_array(position)
                    .normalize_or(glam::Vec3::Y)
                    .to_array();

                row.push(vertices.len() as u32);
                vertices.push(MeshVertex {
                    position,
                    normal,
                    uv: [u, 1.0 - v],
                });
            }
            grid.push(row);
        }

        let mut indices = Vec::with_capacity((6 * w * (h - 1)) as usize);
        for iy in 0..h as usize {
            for ix in 0..w as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            vertices,
            indices,
            radius,
            segments: (w, h),
        }
    }

    /// Number of indices (for `draw_indexed`).
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = SphereMesh::new(1.5, 32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        assert_eq!(mesh.indices.len(), 6 * 32 * 31);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn vertices_lie_on_the_radius_with_unit_normals() {
        let mesh = SphereMesh::new(0.5, 64, 64);
        for v in &mesh.vertices {
            let p = glam::Vec3::from_array(v.position);
            let n = glam::Vec3::from_array(v.normal);
            assert!((p.length() - 0.5).abs() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(p.normalize().dot(n) > 0.9999);
        }
    }

    #[test]
    fn uvs_in_unit_square() {
        let mesh = SphereMesh::new(1.0, 8, 6);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
        assert_eq!(mesh.vertices[0].uv[1], 1.0);
        assert_eq!(mesh.vertices.last().map(|v| v.uv[1]), Some(0.0));
    }

    #[test]
    fn no_degenerate_triangles() {
        let mesh = SphereMesh::new(1.0, 12, 8);
        for tri in mesh.indices.chunks_exact(3) {
            let p: Vec<glam::Vec3> = tri
                .iter()
                .map(|&i| glam::Vec3::from_array(mesh.vertices[i as usize].position))
                .collect();
            let area = (p[1] - p[0]).cross(p[2] - p[0]).length();
            assert!(area > 1e-6);
        }
    }

    #[test]
    fn segment_counts_are_clamped() {
        let mesh = SphereMesh::new(1.0, 0, 1);
        assert_eq!(mesh.segments, (3, 2));
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert_eq!(mesh.indices.len(), 6 * 3);
    }

    #[test]
    fn first_row_is_north_pole() {
        let mesh = SphereMesh::new(2.0, 4, 4);
        for v in &mesh.vertices[..5] {
            assert!((v.position[1] - 2.0).abs() < 1e-6);
        }
    }
}
