//! Standalone demo window backed by winit.
//!
//! Native builds open a window sized to 75% of the primary monitor; web
//! builds attach to the page's `<canvas class="webgl">`. When the `gui`
//! feature is enabled, a wry webview panel is created alongside the
//! viewport for the schema-driven options UI.
//!
//! ```no_run
//! # use glint::{Options, Viewer};
//! Viewer::builder()
//!     .with_options(Options::preset("drift").unwrap_or_default())
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::{
    error::GlintError, options::Options, GlintCommand, GlintEngine,
    InputEvent, MouseButton,
};

/// CSS selector of the canvas the web build renders into.
pub const DEFAULT_CANVAS_SELECTOR: &str = ".webgl";

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    preset: Option<String>,
    title: String,
    canvas_selector: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Glint", default
    /// options, `.webgl` canvas).
    fn new() -> Self {
        Self {
            options: None,
            preset: None,
            title: "Glint".into(),
            canvas_selector: DEFAULT_CANVAS_SELECTOR.into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Name of the preset the options came from, shown as selected in the
    /// options panel.
    #[must_use]
    pub fn with_preset_name(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the canvas selector used by web builds.
    #[must_use]
    pub fn with_canvas_selector(mut self, selector: impl Into<String>) -> Self {
        self.canvas_selector = selector.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            preset: self.preset,
            title: self.title,
            canvas_selector: self.canvas_selector,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window (or canvas) running the demo.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    preset: Option<String>,
    title: String,
    canvas_selector: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. On native targets this
    /// blocks until the window is closed; on the web it returns after
    /// handing the loop to the browser.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), GlintError> {
        #[cfg(all(target_os = "linux", feature = "gui"))]
        gtk::init().map_err(|e| GlintError::Viewer(e.to_string()))?;

        let event_loop = EventLoop::<ViewerEvent>::with_user_event()
            .build()
            .map_err(|e| GlintError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            preset: self.preset,
            title: self.title,
            canvas_selector: self.canvas_selector,
            proxy: event_loop.create_proxy(),
            #[cfg(feature = "gui")]
            panel: crate::gui::panel::PanelController::new(),
        };

        run_app(event_loop, app)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_app(
    event_loop: EventLoop<ViewerEvent>,
    mut app: ViewerApp,
) -> Result<(), GlintError> {
    event_loop
        .run_app(&mut app)
        .map_err(|e| GlintError::Viewer(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn run_app(
    event_loop: EventLoop<ViewerEvent>,
    app: ViewerApp,
) -> Result<(), GlintError> {
    use winit::platform::web::EventLoopExtWebSys;
    event_loop.spawn_app(app);
    Ok(())
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Events delivered to the loop from outside winit.
enum ViewerEvent {
    /// Asynchronous engine construction finished.
    EngineReady(Box<Result<GlintEngine, GlintError>>),
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<GlintEngine>,
    options: Option<Options>,
    preset: Option<String>,
    title: String,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    canvas_selector: String,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: EventLoopProxy<ViewerEvent>,
    #[cfg(feature = "gui")]
    panel: crate::gui::panel::PanelController,
}

/// Compute the wgpu surface size: always the full window dimensions.
///
/// The webview options panel overlays the right edge of the window; the
/// surface must cover the entire window to avoid stretching.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    #[cfg(not(target_arch = "wasm32"))]
    fn window_attributes(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<winit::window::WindowAttributes, GlintError> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = Window::default_attributes().with_title(&self.title);
        Ok(if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            attrs.with_inner_size(winit::dpi::LogicalSize::new(
                logical_w, logical_h,
            ))
        } else {
            attrs
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn window_attributes(
        &self,
        _event_loop: &ActiveEventLoop,
    ) -> Result<winit::window::WindowAttributes, GlintError> {
        use winit::platform::web::WindowAttributesExtWebSys;
        let canvas = crate::web::find_canvas(&self.canvas_selector)?;
        let (w, h) = crate::web::canvas_client_size(&canvas);
        Ok(Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(w, h))
            .with_canvas(Some(canvas)))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn create_engine(&mut self, window: Arc<Window>) {
        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let scale = window.scale_factor();
        let options = self.options.take().unwrap_or_default();
        let result = pollster::block_on(GlintEngine::new(
            window,
            (vp_w, vp_h),
            scale,
            options,
        ));
        self.on_engine_ready(result);
    }

    #[cfg(target_arch = "wasm32")]
    fn create_engine(&mut self, window: Arc<Window>) {
        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let scale = window.scale_factor();
        let options = self.options.take().unwrap_or_default();
        let proxy = self.proxy.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result =
                GlintEngine::new(window, (vp_w, vp_h), scale, options).await;
            if proxy
                .send_event(ViewerEvent::EngineReady(Box::new(result)))
                .is_err()
            {
                log::error!("event loop closed before the engine was ready");
            }
        });
    }

    fn on_engine_ready(&mut self, result: Result<GlintEngine, GlintError>) {
        let mut engine = match result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                return;
            }
        };
        let Some(window) = self.window.clone() else {
            return;
        };
        if let Some(name) = self.preset.take() {
            engine.set_active_preset(name);
        }

        #[cfg(feature = "gui")]
        {
            let inner = window.inner_size();
            self.panel
                .init_webview(&window, inner.width, inner.height, &engine);
        }

        window.request_redraw();
        self.engine = Some(engine);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        #[cfg(all(target_os = "linux", feature = "gui"))]
        while gtk::events_pending() {
            let _ = gtk::main_iteration_do(false);
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        #[cfg(feature = "gui")]
        self.panel.drain_and_apply(engine, &window);

        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("render error: out of GPU memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }

        #[cfg(feature = "gui")]
        self.panel.push_stats_if_due(std::time::Instant::now(), engine);

        window.request_redraw();
    }

    fn handle_key(&mut self, key: &str) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        let Some(cmd) = engine.handle_key_press(key) else {
            return;
        };

        #[cfg(feature = "gui")]
        {
            if cmd == GlintCommand::TogglePanel {
                if let Some(window) = &self.window {
                    self.panel.toggle(window);
                }
            } else {
                self.panel.push_options(engine);
            }
        }
        #[cfg(not(feature = "gui"))]
        if cmd == GlintCommand::TogglePanel {
            log::debug!("no options panel in this build");
        }
    }
}

impl ApplicationHandler<ViewerEvent> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self
            .window_attributes(event_loop)
            .and_then(|attrs| {
                event_loop
                    .create_window(attrs)
                    .map_err(|e| GlintError::Viewer(e.to_string()))
            }) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window.clone());
        self.create_engine(window);
        if self.engine.is_none() && cfg!(not(target_arch = "wasm32")) {
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::EngineReady(result) => {
                self.on_engine_ready(*result);
                if self.engine.is_none() {
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
                #[cfg(feature = "gui")]
                if let Some(window) = &self.window {
                    self.panel.apply_layout(window);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let render_scale = if scale_factor < 2.0 { 2 } else { 1 };
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let Some(engine) = &mut self.engine {
                    engine.set_render_scale(render_scale);
                    if let Some(inner) = inner {
                        let (vp_w, vp_h) = viewport_size(inner);
                        engine.resize(vp_w, vp_h);
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }

                #[cfg(feature = "gui")]
                if let Some(window) = &self.window {
                    self.panel.update_peek(position.x as f32, window);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorLeft);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::from_wheel(delta));
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.handle_key(&format!("{code:?}"));
            }

            _ => (),
        }
    }
}
