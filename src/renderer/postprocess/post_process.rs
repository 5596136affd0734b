use super::dot_screen::DotScreenPass;
use crate::error::GlintError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{RenderTarget, SCENE_COLOR_FORMAT};
use crate::options::PostProcessingOptions;

/// Owns the off-screen scene color + depth targets and the dot-screen pass
/// that resolves them to the screen.
pub struct PostProcessStack {
    /// Main pass color target (render resolution).
    pub scene_color: RenderTarget,
    /// Main pass depth target (render resolution).
    pub depth: RenderTarget,
    /// Final full-screen pass.
    pub dot_screen: DotScreenPass,
    options: PostProcessingOptions,
}

impl PostProcessStack {
    /// Allocate the targets at the context's render size.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if the dot-screen shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        options: &PostProcessingOptions,
    ) -> Result<Self, GlintError> {
        let (scene_color, depth) = Self::create_targets(context);
        let dot_screen = DotScreenPass::new(
            context,
            shader_composer,
            &scene_color.view,
            options,
        )?;
        Ok(Self {
            scene_color,
            depth,
            dot_screen,
            options: options.clone(),
        })
    }

    fn create_targets(context: &RenderContext) -> (RenderTarget, RenderTarget) {
        let width = context.render_width();
        let height = context.render_height();
        let color = RenderTarget::new(
            &context.device,
            "Scene Color Target",
            width,
            height,
            SCENE_COLOR_FORMAT,
        );
        let depth = RenderTarget::depth(
            &context.device,
            "Scene Depth Target",
            width,
            height,
        );
        (color, depth)
    }

    /// Recreate the targets for the context's current render size.
    pub fn resize(&mut self, context: &RenderContext) {
        if self.scene_color.width() == context.render_width()
            && self.scene_color.height() == context.render_height()
        {
            self.refresh_params(context);
            return;
        }
        let (color, depth) = Self::create_targets(context);
        self.scene_color = color;
        self.depth = depth;
        self.dot_screen
            .rebind_input(&context.device, &self.scene_color.view);
        self.refresh_params(context);
        log::debug!(
            "scene targets resized to {}x{}",
            self.scene_color.width(),
            self.scene_color.height()
        );
    }

    /// Push new post-processing options.
    pub fn apply_options(
        &mut self,
        context: &RenderContext,
        options: &PostProcessingOptions,
    ) {
        self.options = options.clone();
        self.refresh_params(context);
    }

    /// Flip the dot-screen effect on or off. Returns the new state.
    pub fn toggle_dot_screen(&mut self, context: &RenderContext) -> bool {
        self.options.dot_screen = !self.options.dot_screen;
        self.refresh_params(context);
        self.options.dot_screen
    }

    /// Current post-processing options (including runtime toggles).
    pub fn options(&self) -> &PostProcessingOptions {
        &self.options
    }

    fn refresh_params(&mut self, context: &RenderContext) {
        self.dot_screen.apply_options(
            &context.queue,
            &self.options,
            context.config.width,
            context.config.height,
        );
    }

    /// Resolve the scene color target into `final_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        final_view: &wgpu::TextureView,
    ) {
        self.dot_screen.render(encoder, final_view);
    }
}
