//! The glint rendering engine and its frame loop.

/// Commands accepted by [`GlintEngine::execute`].
pub mod command;
mod input;
mod options;

use self::command::GlintCommand;
use crate::camera::controller::CameraController;
use crate::error::GlintError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::backdrop::BackdropRenderer;
use crate::renderer::env_probe::EnvProbe;
use crate::renderer::fresnel::FresnelRenderer;
use crate::renderer::postprocess::PostProcessStack;
use crate::scene::Scene;
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit
const TARGET_FPS: u32 = 300;

/// The rendering engine for the glint demo.
///
/// Owns the GPU context, the scene (animated backdrop sphere and fresnel
/// mini-sphere), the camera, the environment cube capture and the
/// dot-screen post-process.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to update and present. Call
/// [`resize`](Self::resize) when the window size changes. Input is
/// forwarded via [`handle_input`](Self::handle_input) or, for key presses,
/// [`handle_key_press`](Self::handle_key_press).
///
/// A frame runs, in order:
/// 1. clock tick and camera update,
/// 2. environment capture from the mini-sphere position (backdrop only),
/// 3. main pass into the off-screen color + depth target,
/// 4. dot-screen resolve to the output view.
pub struct GlintEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    _shader_composer: ShaderComposer,

    /// Camera and its active rotation mode.
    pub camera_controller: CameraController,
    /// Raw input to command translation.
    pub input: InputProcessor,
    scene: Scene,
    backdrop: BackdropRenderer,
    fresnel: FresnelRenderer,
    env_probe: EnvProbe,
    post_process: PostProcessStack,
    /// Runtime options.
    options: Options,
    /// Currently applied options preset name, if any.
    active_preset: Option<String>,
    /// Per-frame timing and FPS tracking.
    frame_timing: FrameTiming,
}

impl GlintEngine {
    /// Engine rendering to a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError`] if GPU initialization or shader composition
    /// fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, GlintError> {
        let context = RenderContext::new(window, size).await?;
        Self::from_context(context, scale_factor, options)
    }

    fn from_context(
        mut context: RenderContext,
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, GlintError> {
        // 2x supersampling on standard-DPI displays
        if scale_factor < 2.0 {
            context.render_scale = 2;
        }

        let mut shader_composer = ShaderComposer::new()?;
        let camera_controller = CameraController::new(&context, &options);
        let scene = Scene::from_options(&options);

        let backdrop = BackdropRenderer::new(
            &context,
            &camera_controller.layout,
            &mut shader_composer,
            &scene,
        )?;
        let env_probe = EnvProbe::new(
            &context,
            &camera_controller.layout,
            &mut shader_composer,
            &options.environment,
        )?;
        let fresnel = FresnelRenderer::new(
            &context,
            &camera_controller.layout,
            &mut shader_composer,
            &scene,
            options.mini_sphere.fresnel_params(),
            env_probe.cube_view(),
        )?;
        let post_process = PostProcessStack::new(
            &context,
            &mut shader_composer,
            &options.post_processing,
        )?;

        log::info!(
            "glint engine ready: {}x{} (render scale {}), {:?} rotation",
            context.config.width,
            context.config.height,
            context.render_scale,
            options.controls.rotation_mode
        );

        Ok(Self {
            context,
            _shader_composer: shader_composer,
            camera_controller,
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            scene,
            backdrop,
            fresnel,
            env_probe,
            post_process,
            options,
            active_preset: None,
            frame_timing: FrameTiming::new(TARGET_FPS),
        })
    }

    /// Per-frame state update: clock, camera, and uniform uploads.
    pub fn update(&mut self) {
        let time = self.scene.tick();
        self.camera_controller.rig.update(self.frame_timing.delta());
        self.camera_controller.update_gpu(&self.context.queue, time);

        let show_normals = self.options.debug.show_normals;
        self.backdrop
            .update(&self.context.queue, &self.scene, show_normals);
        self.fresnel
            .update(&self.context.queue, &self.scene, show_normals);
    }

    /// Render the six environment faces around the mini-sphere. Only the
    /// backdrop is drawn, so the sphere never reflects itself.
    fn encode_env_capture(&self, encoder: &mut wgpu::CommandEncoder) {
        let backdrop = &self.backdrop;
        self.env_probe.capture(
            encoder,
            &self.context.queue,
            self.scene.mini_sphere.position,
            self.scene.clock.time,
            self.scene.clear_color,
            |pass, camera| backdrop.draw(pass, camera),
        );
    }

    /// Encode the main geometry render pass.
    fn encode_scene_pass(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.post_process.scene_color.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.scene.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.post_process.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        let camera = &self.camera_controller.bind_group;
        self.backdrop.draw(&mut rp, camera);
        self.fresnel.draw(&mut rp, camera);
    }

    /// Capture, scene pass and post-process targeting the given view.
    /// Returns the encoder so the caller can submit it.
    fn render_to_view(
        &self,
        view: &wgpu::TextureView,
    ) -> wgpu::CommandEncoder {
        let mut encoder = self.context.create_encoder();
        self.encode_env_capture(&mut encoder);
        self.encode_scene_pass(&mut encoder);
        self.post_process.render(&mut encoder, view);
        encoder
    }

    /// Execute one frame: update, render, and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired. `Lost` / `Outdated` are recovered by calling
    /// [`resize`](Self::resize) with the current size.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.update();

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.render_to_view(&view);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface, camera projection and off-screen targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.rig.resize(width, height);
            self.post_process.resize(&self.context);
        }
    }

    /// Reconfigure the surface with its current size (after `Lost` or
    /// `Outdated`).
    pub fn reconfigure(&mut self) {
        let (width, height) = (self.context.config.width, self.context.config.height);
        self.resize(width, height);
    }

    /// Change the supersampling factor (1 = native).
    pub fn set_render_scale(&mut self, scale: u32) {
        let scale = scale.clamp(1, 4);
        if scale != self.context.render_scale {
            self.context.render_scale = scale;
            self.post_process.resize(&self.context);
            log::debug!("render scale set to {scale}");
        }
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Apply a single command.
    pub fn execute(&mut self, cmd: GlintCommand) {
        match cmd {
            GlintCommand::ResetCamera => self.reset_camera(),
            GlintCommand::ToggleRotationMode => {
                let mode = self.camera_controller.rig.toggle_mode();
                self.options.controls.rotation_mode = mode;
                log::debug!("rotation mode: {mode:?}");
            }
            GlintCommand::PointerMoved { x, y } => {
                let ndc = self.camera_controller.rig.pointer_moved(x, y);
                if self.options.debug.log_pointer {
                    log::trace!("pointer ({x}, {y}) -> ({}, {})", ndc.x, ndc.y);
                }
            }
            GlintCommand::RotateCamera { delta } => {
                self.camera_controller.rig.rotate(delta);
            }
            GlintCommand::PanCamera { delta } => {
                self.camera_controller.rig.pan(delta);
            }
            GlintCommand::Zoom { delta } => self.camera_controller.rig.zoom(delta),
            GlintCommand::ToggleDotScreen => {
                let enabled = self.post_process.toggle_dot_screen(&self.context);
                self.options.post_processing.dot_screen = enabled;
                log::debug!("dot screen {}", if enabled { "on" } else { "off" });
            }
            GlintCommand::TogglePanel => {}
        }
    }

    /// Return the camera to the configured position.
    pub fn reset_camera(&mut self) {
        self.camera_controller.rig.reset(&self.options);
    }
}
