//! Options methods for GlintEngine

use super::GlintEngine;
use crate::options::Options;

impl GlintEngine {
    /// Current options, including runtime toggles.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the last applied preset, if any.
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Record which preset the startup options came from.
    pub fn set_active_preset(&mut self, name: String) {
        self.active_preset = Some(name);
    }

    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to every subsystem.
    pub fn apply_options(&mut self) {
        self.apply_scene();
        self.apply_environment();
        self.camera_controller.rig.apply_options(&self.options);
        self.post_process
            .apply_options(&self.context, &self.options.post_processing);
        self.input
            .set_key_bindings(self.options.keybindings.clone());
    }

    /// Rebuild meshes whose radius or segment count changed.
    fn apply_scene(&mut self) {
        let changes = self.scene.apply_options(&self.options);
        if changes.backdrop {
            self.backdrop.rebuild_mesh(&self.context.device, &self.scene);
        }
        if changes.mini_sphere {
            self.fresnel.rebuild_mesh(&self.context.device, &self.scene);
        }
        self.fresnel
            .set_params(self.options.mini_sphere.fresnel_params());
    }

    /// Reallocate the environment cube if its resolution changed.
    fn apply_environment(&mut self) {
        if self
            .env_probe
            .apply_options(&self.context.device, &self.options.environment)
        {
            self.fresnel
                .set_env_view(&self.context.device, self.env_probe.cube_view());
        }
    }

    /// Load a named preset (from `assets/presets/` or the built-ins).
    /// Returns true on success.
    pub fn load_preset(&mut self, name: &str) -> bool {
        match Options::preset(name) {
            Ok(opts) => {
                log::info!("Loaded preset '{name}'");
                self.set_options(opts);
                self.camera_controller.rig.reset(&self.options);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load preset '{name}': {e}");
                false
            }
        }
    }
}
