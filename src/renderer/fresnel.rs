//! Environment-mapped fresnel mini-sphere.

use wgpu::util::DeviceExt;

use super::mesh::{GpuMesh, ObjectUniform};
use super::pipeline_util;
use crate::error::GlintError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::Scene;

/// Draws the mini-sphere, sampling the captured environment cube for
/// reflection and chromatic refraction.
pub struct FresnelRenderer {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    mesh: GpuMesh,
    object_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
    params: [f32; 4],
    visible: bool,
}

impl FresnelRenderer {
    /// Build the pipeline and bind the environment cube view.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if the fresnel shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
        scene: &Scene,
        fresnel_params: [f32; 4],
        env_view: &wgpu::TextureView,
    ) -> Result<Self, GlintError> {
        let device = &context.device;
        let shader = shader_composer.compose(
            device,
            "Fresnel Shader",
            include_str!("../../assets/shaders/raster/fresnel.wgsl"),
            "fresnel.wgsl",
        )?;

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Fresnel Bind Group Layout"),
                entries: &[
                    pipeline_helpers::vertex_uniform_buffer(0),
                    pipeline_helpers::texture_cube(1),
                    pipeline_helpers::filtering_sampler(2),
                ],
            });

        let pipeline = pipeline_util::create_mesh_pipeline(
            device,
            "Fresnel",
            &shader,
            &[camera_layout, &layout],
        );

        let object_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Fresnel Object Buffer"),
                contents: bytemuck::bytes_of(&ObjectUniform::new(
                    &scene.mini_sphere,
                    fresnel_params,
                    false,
                )),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let sampler =
            pipeline_helpers::trilinear_sampler(device, "Environment Sampler");
        let bind_group = Self::create_bind_group(
            device,
            &layout,
            &object_buffer,
            env_view,
            &sampler,
        );

        Ok(Self {
            pipeline,
            layout,
            mesh: GpuMesh::from_sphere(
                device,
                "Mini Sphere",
                &scene.mini_sphere.build_mesh(),
            ),
            object_buffer,
            sampler,
            bind_group,
            params: fresnel_params,
            visible: scene.mini_sphere.visible,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        object_buffer: &wgpu::Buffer,
        env_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Fresnel Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(env_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Set bias, scale, power and refraction ratio.
    pub fn set_params(&mut self, params: [f32; 4]) {
        self.params = params;
    }

    /// Push the per-frame object uniform.
    pub fn update(&mut self, queue: &wgpu::Queue, scene: &Scene, show_normals: bool) {
        let object =
            ObjectUniform::new(&scene.mini_sphere, self.params, show_normals);
        queue.write_buffer(&self.object_buffer, 0, bytemuck::bytes_of(&object));
        self.visible = scene.mini_sphere.visible;
    }

    /// Regenerate the mesh after a radius or segment change.
    pub fn rebuild_mesh(&mut self, device: &wgpu::Device, scene: &Scene) {
        log::debug!(
            "rebuilding mini-sphere mesh (radius {}, {} segments)",
            scene.mini_sphere.radius,
            scene.mini_sphere.segments
        );
        self.mesh = GpuMesh::from_sphere(
            device,
            "Mini Sphere",
            &scene.mini_sphere.build_mesh(),
        );
    }

    /// Rebind after the environment cube was recreated.
    pub fn set_env_view(&mut self, device: &wgpu::Device, env_view: &wgpu::TextureView) {
        self.bind_group = Self::create_bind_group(
            device,
            &self.layout,
            &self.object_buffer,
            env_view,
            &self.sampler,
        );
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
