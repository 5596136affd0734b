//! Six-face environment capture around the mini-sphere.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::mipmap::MipGenerator;
use crate::camera::core::CameraUniform;
use crate::error::GlintError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{CubeTarget, RenderTarget};
use crate::options::EnvironmentOptions;

/// Look direction and up vector for each cube face, in layer order
/// +X, -X, +Y, -Y, +Z, -Z.
const FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::NEG_Y),
    (Vec3::NEG_Z, Vec3::NEG_Y),
];

/// View-projection for cube face `face` seen from `position`.
///
/// The projection flips Y so that rendered rows line up with the cube
/// sampling convention (row 0 is the top of each face in texture space).
pub fn face_view_proj(position: Vec3, face: usize, near: f32, far: f32) -> Mat4 {
    let (dir, up) = FACES[face % 6];
    let projection = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
        * Mat4::perspective_rh(90f32.to_radians(), 1.0, near, far);
    projection * Mat4::look_to_rh(position, dir, up)
}

/// Cube edge length for a requested resolution, limited to what the device
/// can allocate.
fn cube_size(requested: u32, max: u32) -> u32 {
    let size = requested.clamp(1, max.max(1));
    if size != requested {
        log::warn!(
            "environment resolution {requested} unsupported, using {size} \
             (device max {max})"
        );
    }
    size
}

/// Cube camera: renders the scene into a [`CubeTarget`] once per frame and
/// regenerates its mips.
pub struct EnvProbe {
    target: CubeTarget,
    depth: RenderTarget,
    mipmaps: MipGenerator,
    face_buffers: [wgpu::Buffer; 6],
    face_bind_groups: [wgpu::BindGroup; 6],
    near: f32,
    far: f32,
}

impl EnvProbe {
    /// Allocate the cube target, its depth buffer and the per-face camera
    /// uniforms (laid out with `camera_layout`).
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if the mip shader fails to compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
        options: &EnvironmentOptions,
    ) -> Result<Self, GlintError> {
        let device = &context.device;
        let size = cube_size(
            options.resolution,
            device.limits().max_texture_dimension_2d,
        );
        let target = CubeTarget::new(device, size);
        let depth = RenderTarget::depth(
            device,
            "Environment Depth",
            target.size,
            target.size,
        );
        let mipmaps = MipGenerator::new(device, shader_composer, &target)?;

        let face_buffers: [wgpu::Buffer; 6] = std::array::from_fn(|_| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Environment Face Camera Buffer"),
                contents: bytemuck::bytes_of(&CameraUniform::new()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            })
        });
        let face_bind_groups = std::array::from_fn(|face| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Environment Face Camera Bind Group"),
                layout: camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: face_buffers[face].as_entire_binding(),
                }],
            })
        });

        log::debug!(
            "environment cube {}x{} with {} mip levels",
            target.size,
            target.size,
            target.mip_count()
        );

        Ok(Self {
            target,
            depth,
            mipmaps,
            face_buffers,
            face_bind_groups,
            near: options.near,
            far: options.far,
        })
    }

    /// Cube view over every face and mip, for sampling.
    pub fn cube_view(&self) -> &wgpu::TextureView {
        &self.target.cube_view
    }

    /// Apply new environment options. Returns `true` when the cube was
    /// reallocated and views bound elsewhere must be refreshed.
    pub fn apply_options(
        &mut self,
        device: &wgpu::Device,
        options: &EnvironmentOptions,
    ) -> bool {
        self.near = options.near;
        self.far = options.far;
        let size = cube_size(
            options.resolution,
            device.limits().max_texture_dimension_2d,
        );
        if size == self.target.size {
            return false;
        }
        self.target = CubeTarget::new(device, size);
        self.depth = RenderTarget::depth(
            device,
            "Environment Depth",
            self.target.size,
            self.target.size,
        );
        self.mipmaps.bind_target(device, &self.target);
        log::debug!("environment cube resized to {}", self.target.size);
        true
    }

    /// Render all six faces from `position`, then rebuild the mip chain.
    ///
    /// `draw` records the scene into each face pass given that face's
    /// camera bind group.
    pub fn capture<F>(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        position: Vec3,
        time: f32,
        clear_color: wgpu::Color,
        draw: F,
    ) where
        F: Fn(&mut wgpu::RenderPass<'_>, &wgpu::BindGroup),
    {
        for (face, buffer) in self.face_buffers.iter().enumerate() {
            let mut uniform = CameraUniform::new();
            uniform.set_view_proj(
                face_view_proj(position, face, self.near, self.far),
                position,
            );
            uniform.time = time;
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&uniform));
        }

        for (face, bind_group) in self.face_bind_groups.iter().enumerate() {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Environment Face Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target.level_views[0][face],
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
            draw(&mut pass, bind_group);
        }

        self.mipmaps.generate(encoder, &self.target);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    /// Face index and (s, t) texel coordinates a cube sampler picks for
    /// `dir`, t growing downward.
    fn cube_lookup(dir: Vec3) -> (usize, f32, f32) {
        let a = dir.abs();
        let (face, sc, tc, ma) = if a.x >= a.y && a.x >= a.z {
            if dir.x > 0.0 {
                (0, -dir.z, -dir.y, a.x)
            } else {
                (1, dir.z, -dir.y, a.x)
            }
        } else if a.y >= a.z {
            if dir.y > 0.0 {
                (2, dir.x, dir.z, a.y)
            } else {
                (3, dir.x, -dir.z, a.y)
            }
        } else if dir.z > 0.0 {
            (4, dir.x, -dir.y, a.z)
        } else {
            (5, -dir.x, -dir.y, a.z)
        };
        (face, (sc / ma + 1.0) * 0.5, (tc / ma + 1.0) * 0.5)
    }

    /// Framebuffer-relative coordinates (0..1, y down) at which `dir`
    /// lands when rendering `face`.
    fn rendered_at(position: Vec3, face: usize, dir: Vec3) -> (f32, f32) {
        let clip = face_view_proj(position, face, 0.1, 10.0)
            * Vec4::from((position + dir, 1.0));
        let ndc = clip.truncate() / clip.w;
        ((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5)
    }

    #[test]
    fn faces_match_cube_sampling() {
        let position = Vec3::new(0.38, 0.22, 0.7);
        let dirs = [
            Vec3::new(1.0, 0.3, -0.5),
            Vec3::new(-1.0, -0.2, 0.4),
            Vec3::new(0.25, 1.0, 0.6),
            Vec3::new(-0.1, -1.0, 0.35),
            Vec3::new(0.45, -0.15, 1.0),
            Vec3::new(-0.3, 0.5, -1.0),
        ];
        for dir in dirs {
            let (face, s, t) = cube_lookup(dir);
            let (x, y) = rendered_at(position, face, dir);
            assert!(
                (x - s).abs() < 1e-4 && (y - t).abs() < 1e-4,
                "face {face}: rendered ({x}, {y}) vs sampled ({s}, {t})"
            );
        }
    }

    #[test]
    fn cube_size_respects_device_limit() {
        assert_eq!(cube_size(256, 2048), 256);
        assert_eq!(cube_size(8192, 2048), 2048);
        assert_eq!(cube_size(0, 2048), 1);
    }

    #[test]
    fn face_centers_are_in_front() {
        for (face, (dir, _)) in FACES.iter().enumerate() {
            let clip = face_view_proj(Vec3::ZERO, face, 0.1, 10.0)
                * Vec4::from((*dir, 1.0));
            assert!(clip.w > 0.0);
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }
}
