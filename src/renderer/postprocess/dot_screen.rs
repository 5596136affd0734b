use crate::error::GlintError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::PostProcessingOptions;

/// Height of the dot grid domain; the width follows the viewport aspect so
/// dots stay round.
const GRID_HEIGHT: f32 = 256.0;

/// Mirrors `DotScreenUniform` in `screen/dot_screen.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DotScreenUniform {
    /// Grid origin offset.
    pub center: [f32; 2],
    /// Size of the grid domain the [0,1] uv range is stretched over.
    pub t_size: [f32; 2],
    /// Grid rotation in radians.
    pub angle: f32,
    /// Grid frequency.
    pub scale: f32,
    /// Blend between source (0) and effect (1).
    pub strength: f32,
    /// 1.0 when the output is an sRGB surface.
    pub output_srgb: f32,
}

impl DotScreenUniform {
    /// Uniform for the given options and output viewport.
    pub fn new(
        options: &PostProcessingOptions,
        width: u32,
        height: u32,
        output_srgb: bool,
    ) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Self {
            center: [0.5, 0.5],
            t_size: [GRID_HEIGHT * aspect, GRID_HEIGHT],
            angle: options.angle,
            scale: options.scale,
            // disabled = plain copy
            strength: if options.dot_screen { options.strength } else { 0.0 },
            output_srgb: if output_srgb { 1.0 } else { 0.0 },
        }
    }

    /// CPU mirror of the shader's `pattern(uv)`.
    pub fn pattern(&self, uv: [f32; 2]) -> f32 {
        let (s, c) = self.angle.sin_cos();
        let tx = uv[0] * self.t_size[0] - self.center[0];
        let ty = uv[1] * self.t_size[1] - self.center[1];
        let px = (c * tx - s * ty) * self.scale;
        let py = (s * tx + c * ty) * self.scale;
        px.sin() * py.sin() * 4.0
    }
}

/// Full-screen dot-screen pass: samples the scene color target and writes
/// the final image to the output view.
pub struct DotScreenPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    /// Current uniform values.
    pub params: DotScreenUniform,
    output_srgb: bool,
}

impl DotScreenPass {
    /// Build the pass reading from `input_view`.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if the shader fails to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        input_view: &wgpu::TextureView,
        options: &PostProcessingOptions,
    ) -> Result<Self, GlintError> {
        let device = &context.device;
        let output_srgb = context.format().is_srgb();
        let params = DotScreenUniform::new(
            options,
            context.config.width,
            context.config.height,
            output_srgb,
        );

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dot Screen Params Buffer"),
            size: size_of::<DotScreenUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        context
            .queue
            .write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&params));

        let sampler = pipeline_helpers::linear_sampler(device, "Dot Screen Sampler");

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Dot Screen Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                    pipeline_helpers::uniform_buffer(2),
                ],
            });

        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            input_view,
            &sampler,
            &uniform_buffer,
        );

        let shader = shader_composer.compose(
            device,
            "Dot Screen Shader",
            include_str!("../../../assets/shaders/screen/dot_screen.wgsl"),
            "dot_screen.wgsl",
        )?;
        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            device,
            "Dot Screen",
            &shader,
            context.format(),
            None,
            &[&bind_group_layout],
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            uniform_buffer,
            params,
            output_srgb,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        input_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Dot Screen Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(input_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Push new effect parameters for the current viewport.
    pub fn apply_options(
        &mut self,
        queue: &wgpu::Queue,
        options: &PostProcessingOptions,
        width: u32,
        height: u32,
    ) {
        self.params =
            DotScreenUniform::new(options, width, height, self.output_srgb);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.params),
        );
    }

    /// Rebind after the input texture was recreated.
    pub fn rebind_input(
        &mut self,
        device: &wgpu::Device,
        input_view: &wgpu::TextureView,
    ) {
        self.bind_group = Self::create_bind_group(
            device,
            &self.bind_group_layout,
            input_view,
            &self.sampler,
            &self.uniform_buffer,
        );
    }

    /// Draw the full-screen triangle into `output_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Dot Screen Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(size_of::<DotScreenUniform>(), 32);
    }

    #[test]
    fn grid_follows_viewport_aspect() {
        let u = DotScreenUniform::new(
            &PostProcessingOptions::default(),
            1600,
            800,
            false,
        );
        assert_eq!(u.t_size, [512.0, 256.0]);
        assert_eq!(u.scale, 4.0);
        assert_eq!(u.angle, 1.57);
    }

    #[test]
    fn disabled_effect_is_a_plain_copy() {
        let options = PostProcessingOptions {
            dot_screen: false,
            ..Default::default()
        };
        let u = DotScreenUniform::new(&options, 800, 600, true);
        assert_eq!(u.strength, 0.0);
        assert_eq!(u.output_srgb, 1.0);
    }

    #[test]
    fn pattern_vanishes_at_grid_origin_and_is_bounded() {
        let u = DotScreenUniform::new(
            &PostProcessingOptions::default(),
            256,
            256,
            false,
        );
        let origin = [0.5 / 256.0, 0.5 / 256.0];
        assert!(u.pattern(origin).abs() < 1e-4);
        for i in 0..64 {
            let t = i as f32 / 63.0;
            let p = u.pattern([t, 1.0 - t * 0.5]);
            assert!(p.abs() <= 4.0 + 1e-4);
        }
    }
}
