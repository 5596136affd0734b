//! Bind group layout entries, samplers and the full-screen pipeline shared
//! by every pass.

const FRAGMENT: wgpu::ShaderStages = wgpu::ShaderStages::FRAGMENT;

fn entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    ty: wgpu::BindingType,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty,
        count: None,
    }
}

fn filterable_texture(
    binding: u32,
    view_dimension: wgpu::TextureViewDimension,
) -> wgpu::BindGroupLayoutEntry {
    entry(
        binding,
        FRAGMENT,
        wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension,
            multisampled: false,
        },
    )
}

/// Filterable 2D color texture, fragment stage.
pub fn texture_2d(binding: u32) -> wgpu::BindGroupLayoutEntry {
    filterable_texture(binding, wgpu::TextureViewDimension::D2)
}

/// Filterable cube texture, fragment stage.
pub fn texture_cube(binding: u32) -> wgpu::BindGroupLayoutEntry {
    filterable_texture(binding, wgpu::TextureViewDimension::Cube)
}

/// Filtering sampler, fragment stage.
pub fn filtering_sampler(binding: u32) -> wgpu::BindGroupLayoutEntry {
    entry(
        binding,
        FRAGMENT,
        wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
    )
}

fn uniform(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    entry(
        binding,
        visibility,
        wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
    )
}

/// Uniform buffer read by the fragment stage only.
pub fn uniform_buffer(binding: u32) -> wgpu::BindGroupLayoutEntry {
    uniform(binding, FRAGMENT)
}

/// Uniform buffer read by both vertex and fragment stages (camera,
/// per-object transforms).
pub fn vertex_uniform_buffer(binding: u32) -> wgpu::BindGroupLayoutEntry {
    uniform(binding, wgpu::ShaderStages::VERTEX_FRAGMENT)
}

/// Full-screen triangle pipeline: `vs_main` / `fs_main`, no vertex buffers,
/// no depth, one color target.
pub fn create_screen_space_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} Pipeline Layout")),
        bind_group_layouts,
        push_constant_ranges: &[],
    });
    let targets = [Some(wgpu::ColorTargetState {
        format,
        blend,
        write_mask: wgpu::ColorWrites::ALL,
    })];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &targets,
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn clamped_linear_sampler(
    device: &wgpu::Device,
    label: &str,
    mipmap_filter: wgpu::FilterMode,
) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter,
        ..Default::default()
    })
}

/// Bilinear, clamp-to-edge. Screen passes and mip downsampling.
pub fn linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    clamped_linear_sampler(device, label, wgpu::FilterMode::Nearest)
}

/// Trilinear, clamp-to-edge. Environment cube lookups.
pub fn trilinear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    clamped_linear_sampler(device, label, wgpu::FilterMode::Linear)
}
