//! Off-screen render targets: 2D color, depth, and a mip-mapped cube.

/// Color format of the off-screen scene target and the environment cube.
pub const SCENE_COLOR_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Rgba8UnormSrgb;

/// Depth format shared by every depth-tested pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Number of mip levels in a full chain for a `size`-texel square texture.
#[must_use]
pub fn mip_level_count(size: u32) -> u32 {
    u32::BITS - size.max(1).leading_zeros()
}

/// A render-target texture and its default view.
///
/// Created with `RENDER_ATTACHMENT | TEXTURE_BINDING | COPY_SRC` usage so it
/// can be rendered into and then sampled by a later pass or read back.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Depth attachment in [`DEPTH_FORMAT`].
    #[must_use]
    pub fn depth(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Texture width in texels.
    pub fn width(&self) -> u32 {
        self.texture.width()
    }

    /// Texture height in texels.
    pub fn height(&self) -> u32 {
        self.texture.height()
    }
}

/// Six-layer cube render target with a full mip chain.
///
/// `level_views[level][face]` are single-layer 2D views used as render
/// attachments (and as the downsample source for the next level);
/// `cube_view` covers every layer and level for sampling.
pub struct CubeTarget {
    /// The underlying 6-layer GPU texture.
    pub texture: wgpu::Texture,
    /// Cube view over all faces and mips.
    pub cube_view: wgpu::TextureView,
    /// Per-level, per-face 2D views.
    pub level_views: Vec<[wgpu::TextureView; 6]>,
    /// Edge length of mip level 0.
    pub size: u32,
}

impl CubeTarget {
    /// Create a cube target with `size`² faces in [`SCENE_COLOR_FORMAT`].
    #[must_use]
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let size = size.max(1);
        let mip_count = mip_level_count(size);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Environment Cube"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SCENE_COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let cube_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Environment Cube View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let level_views = (0..mip_count)
            .map(|level| {
                std::array::from_fn(|face| {
                    texture.create_view(&wgpu::TextureViewDescriptor {
                        label: Some("Environment Cube Face"),
                        dimension: Some(wgpu::TextureViewDimension::D2),
                        base_mip_level: level,
                        mip_level_count: Some(1),
                        base_array_layer: face as u32,
                        array_layer_count: Some(1),
                        ..Default::default()
                    })
                })
            })
            .collect();

        Self {
            texture,
            cube_view,
            level_views,
            size,
        }
    }

    /// Number of mip levels.
    pub fn mip_count(&self) -> u32 {
        self.level_views.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_lengths() {
        assert_eq!(mip_level_count(1), 1);
        assert_eq!(mip_level_count(2), 2);
        assert_eq!(mip_level_count(256), 9);
        assert_eq!(mip_level_count(300), 9);
        assert_eq!(mip_level_count(0), 1);
    }
}
