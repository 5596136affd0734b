//! Mip chain generation for the environment cube.

use crate::error::GlintError;
use crate::gpu::pipeline_helpers;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{CubeTarget, SCENE_COLOR_FORMAT};

/// Fills mip levels 1.. of a [`CubeTarget`] by repeated 2x downsampling of
/// each face.
pub struct MipGenerator {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// `bind_groups[n][face]` samples level `n` to render level `n + 1`.
    bind_groups: Vec<[wgpu::BindGroup; 6]>,
}

impl MipGenerator {
    /// Build the downsample pipeline and the bind groups for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if the downsample shader fails to
    /// compose.
    pub fn new(
        device: &wgpu::Device,
        shader_composer: &mut ShaderComposer,
        target: &CubeTarget,
    ) -> Result<Self, GlintError> {
        let shader = shader_composer.compose(
            device,
            "Mip Downsample Shader",
            include_str!("../../assets/shaders/screen/mip_downsample.wgsl"),
            "mip_downsample.wgsl",
        )?;

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mip Downsample Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            });

        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            device,
            "Mip Downsample",
            &shader,
            SCENE_COLOR_FORMAT,
            None,
            &[&layout],
        );
        let sampler = pipeline_helpers::linear_sampler(device, "Mip Sampler");

        let mut generator = Self {
            pipeline,
            layout,
            sampler,
            bind_groups: Vec::new(),
        };
        generator.bind_target(device, target);
        Ok(generator)
    }

    /// Recreate the per-level bind groups for a new cube target.
    pub fn bind_target(&mut self, device: &wgpu::Device, target: &CubeTarget) {
        let levels = target.level_views.len().saturating_sub(1);
        self.bind_groups = target.level_views[..levels]
            .iter()
            .map(|faces| {
                std::array::from_fn(|face| {
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Mip Downsample Bind Group"),
                        layout: &self.layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: wgpu::BindingResource::TextureView(
                                    &faces[face],
                                ),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::Sampler(
                                    &self.sampler,
                                ),
                            },
                        ],
                    })
                })
            })
            .collect();
    }

    /// Record one downsample pass per face for every level below the top.
    pub fn generate(&self, encoder: &mut wgpu::CommandEncoder, target: &CubeTarget) {
        for (level, groups) in self.bind_groups.iter().enumerate() {
            let Some(dst) = target.level_views.get(level + 1) else {
                break;
            };
            for (face, bind_group) in groups.iter().enumerate() {
                let mut pass =
                    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Mip Downsample Pass"),
                        color_attachments: &[Some(
                            wgpu::RenderPassColorAttachment {
                                view: &dst[face],
                                resolve_target: None,
                                depth_slice: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Clear(
                                        wgpu::Color::TRANSPARENT,
                                    ),
                                    store: wgpu::StoreOp::Store,
                                },
                            },
                        )],
                        ..Default::default()
                    });
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }
    }
}
