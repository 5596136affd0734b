//! GPU-resident meshes and the per-object uniform.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::scene::{SceneObject, SphereMesh};

/// Vertex + index buffers for one indexed mesh.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Upload a sphere mesh.
    pub fn from_sphere(device: &wgpu::Device, label: &str, mesh: &SphereMesh) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        }
    }

    /// Bind buffers and issue the indexed draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Per-object uniform, mirrored by `ObjectUniform` in
/// `modules/camera.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// Object-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Material parameters (meaning depends on the shader).
    pub params: [f32; 4],
    /// x: 1.0 = visualize normals.
    pub flags: [f32; 4],
}

impl ObjectUniform {
    /// Uniform for `object` with the given material parameters.
    pub fn new(object: &SceneObject, params: [f32; 4], show_normals: bool) -> Self {
        Self {
            model: object.model_matrix().to_cols_array_2d(),
            params,
            flags: [if show_normals { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            params: [0.0; 4],
            flags: [0.0; 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(size_of::<ObjectUniform>(), 96);
    }

    #[test]
    fn model_matrix_translates() {
        let object = SceneObject {
            position: Vec3::new(0.38, 0.22, 0.7),
            radius: 0.5,
            segments: 64,
            visible: true,
        };
        let u = ObjectUniform::new(&object, [0.1, 1.0, 2.0, 1.02], true);
        assert_eq!(u.model[3], [0.38, 0.22, 0.7, 1.0]);
        assert_eq!(u.params, [0.1, 1.0, 2.0, 1.02]);
        assert_eq!(u.flags[0], 1.0);
    }
}
