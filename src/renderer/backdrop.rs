//! Animated noise-textured backdrop sphere.

use wgpu::util::DeviceExt;

use super::mesh::{GpuMesh, ObjectUniform};
use super::pipeline_util;
use crate::error::GlintError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::{LightingUniform, Scene};

/// Draws the large backdrop sphere with its time-driven noise material.
///
/// Group 0 is the camera (supplied per draw so the same renderer serves
/// the main view and each environment cube face); group 1 holds the
/// object transform and the scene lights.
pub struct BackdropRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    object_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    visible: bool,
}

impl BackdropRenderer {
    /// Build the pipeline, upload the mesh and allocate the uniforms.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if the backdrop shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
        scene: &Scene,
    ) -> Result<Self, GlintError> {
        let device = &context.device;
        let shader = shader_composer.compose(
            device,
            "Backdrop Shader",
            include_str!("../../assets/shaders/raster/backdrop.wgsl"),
            "backdrop.wgsl",
        )?;

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Backdrop Bind Group Layout"),
                entries: &[
                    pipeline_helpers::vertex_uniform_buffer(0),
                    pipeline_helpers::uniform_buffer(1),
                ],
            });

        let pipeline = pipeline_util::create_mesh_pipeline(
            device,
            "Backdrop",
            &shader,
            &[camera_layout, &layout],
        );

        let object_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Backdrop Object Buffer"),
                contents: bytemuck::bytes_of(&ObjectUniform::new(
                    &scene.backdrop,
                    [0.0; 4],
                    false,
                )),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lighting_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::bytes_of(&scene.lights.to_uniform()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Backdrop Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            pipeline,
            mesh: GpuMesh::from_sphere(
                device,
                "Backdrop",
                &scene.backdrop.build_mesh(),
            ),
            object_buffer,
            lighting_buffer,
            bind_group,
            visible: scene.backdrop.visible,
        })
    }

    /// Push the per-frame object and lighting uniforms.
    pub fn update(&mut self, queue: &wgpu::Queue, scene: &Scene, show_normals: bool) {
        let object = ObjectUniform::new(&scene.backdrop, [0.0; 4], show_normals);
        let lights: LightingUniform = scene.lights.to_uniform();
        queue.write_buffer(&self.object_buffer, 0, bytemuck::bytes_of(&object));
        queue.write_buffer(&self.lighting_buffer, 0, bytemuck::bytes_of(&lights));
        self.visible = scene.backdrop.visible;
    }

    /// Regenerate the mesh after a radius or segment change.
    pub fn rebuild_mesh(&mut self, device: &wgpu::Device, scene: &Scene) {
        log::debug!(
            "rebuilding backdrop mesh (radius {}, {} segments)",
            scene.backdrop.radius,
            scene.backdrop.segments
        );
        self.mesh =
            GpuMesh::from_sphere(device, "Backdrop", &scene.backdrop.build_mesh());
    }

    /// Record the draw into an open pass.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        if !self.visible {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(1, &self.bind_group, &[]);
        self.mesh.draw(pass);
    }
}
