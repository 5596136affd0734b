//! Device, queue and presentation surface.

use std::fmt;

/// Why the GPU context could not be brought up.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window or canvas handle could not back a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the requested limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter reports no usable configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::UnsupportedSurface => {
                f.write_str("adapter cannot present to this surface")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Core wgpu state shared by every renderer.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Command queue.
    pub queue: wgpu::Queue,
    /// Presentation surface.
    pub surface: wgpu::Surface<'static>,
    /// Swapchain format and size.
    pub config: wgpu::SurfaceConfiguration,
    /// Off-screen scene target size as a multiple of the swapchain
    /// (2 = 2x supersampling).
    pub render_scale: u32,
}

/// WebGL2 caps on the web; wgpu defaults elsewhere.
fn required_limits() -> wgpu::Limits {
    if cfg!(target_arch = "wasm32") {
        wgpu::Limits::downlevel_webgl2_defaults()
    } else {
        wgpu::Limits::default()
    }
}

/// Pick an sRGB swapchain format when the surface offers one so the
/// dot-screen pass can write linear color and let the hardware encode.
fn choose_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
}

impl RenderContext {
    /// Bring up an adapter, device and surface for `window`.
    ///
    /// # Errors
    ///
    /// Any step of the wgpu bring-up can fail; see [`RenderContextError`].
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        let info = adapter.get_info();

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Glint Device"),
                required_features: wgpu::Features::empty(),
                required_limits: required_limits(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let caps = surface.get_capabilities(&adapter);
        let format =
            choose_format(&caps).ok_or(RenderContextError::UnsupportedSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let mut config =
            Self::surface_config(format, initial_size.0, initial_size.1);
        config.alpha_mode = alpha_mode;
        surface.configure(&device, &config);

        log::info!(
            "GPU adapter: {} ({:?}), surface format {format:?}",
            info.name,
            info.backend,
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            render_scale: 1,
        })
    }

    fn surface_config(
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        }
    }

    /// Output format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Scene target width.
    pub fn render_width(&self) -> u32 {
        self.config.width * self.render_scale
    }

    /// Scene target height.
    pub fn render_height(&self) -> u32 {
        self.config.height * self.render_scale
    }

    /// Width over height of the output.
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Resize the output. Zero-sized requests (minimized window) are
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain image.
    ///
    /// # Errors
    ///
    /// Surface errors pass through.
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Fresh encoder for one frame.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish and submit `encoder`.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}
