//! Centralized demo options with TOML preset support.
//!
//! Every tweakable setting (scene layout, camera, controls, lighting,
//! post-processing, environment capture, debug toggles, keybindings) lives
//! here. Options serialize to/from TOML for presets stored in
//! `assets/presets/`; the two built-in presets are also compiled in so they
//! resolve without a filesystem (web builds).

mod backdrop;
mod camera;
mod controls;
mod debug;
mod environment;
mod keybindings;
mod lighting;
mod mini_sphere;
mod post_processing;

use std::path::{Path, PathBuf};

pub use backdrop::BackdropOptions;
pub use camera::CameraOptions;
pub use controls::{ControlsOptions, RotationMode};
pub use debug::DebugOptions;
pub use environment::EnvironmentOptions;
pub use keybindings::{KeyAction, KeybindingOptions};
pub use lighting::LightingOptions;
pub use mini_sphere::MiniSphereOptions;
pub use post_processing::PostProcessingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GlintError;

/// Directory searched for preset files, relative to the working directory.
pub const PRESETS_DIR: &str = "assets/presets";

/// Presets compiled into the binary: `(name, toml)`.
const BUILTIN_PRESETS: &[(&str, &str)] = &[
    ("classic", include_str!("../../assets/presets/classic.toml")),
    ("drift", include_str!("../../assets/presets/drift.toml")),
];

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[backdrop]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera placement and projection.
    pub camera: CameraOptions,
    /// Mini-sphere placement and fresnel material.
    pub mini_sphere: MiniSphereOptions,
    /// Backdrop sphere size and animation speed.
    pub backdrop: BackdropOptions,
    /// Camera interaction.
    pub controls: ControlsOptions,
    /// Light intensities.
    pub lighting: LightingOptions,
    /// Dot-screen parameters.
    pub post_processing: PostProcessingOptions,
    /// Environment cube capture.
    #[schemars(skip)]
    pub environment: EnvironmentOptions,
    /// Debug visualization options.
    pub debug: DebugOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, GlintError> {
        toml::from_str(content)
            .map_err(|e| GlintError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Io`] if the file cannot be read, or
    /// [`GlintError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, GlintError> {
        let content = std::fs::read_to_string(path).map_err(GlintError::Io)?;
        Self::from_toml(&content)
    }

    /// List available preset names: TOML file stems in `dir` plus the
    /// built-in presets, sorted and deduplicated.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_PRESETS
            .iter()
            .map(|(name, _)| (*name).to_owned())
            .collect();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }

    /// Resolve a preset by name: `assets/presets/<name>.toml` if present,
    /// otherwise the compiled-in copy.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::UnknownPreset`] if neither exists, or a parse
    /// error from the file found.
    pub fn preset(name: &str) -> Result<Self, GlintError> {
        let path = PathBuf::from(PRESETS_DIR).join(format!("{name}.toml"));
        if path.is_file() {
            return Self::load(&path);
        }
        Self::builtin_preset(name)
    }

    /// Parse one of the compiled-in presets.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::UnknownPreset`] for names not compiled in.
    pub fn builtin_preset(name: &str) -> Result<Self, GlintError> {
        BUILTIN_PRESETS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| GlintError::UnknownPreset(name.to_owned()))
            .and_then(|(_, content)| Self::from_toml(content))
    }

    /// Resolve a command-line argument: a path to a `.toml` file, or a
    /// preset name.
    ///
    /// # Errors
    ///
    /// Propagates load and lookup failures.
    pub fn from_arg(arg: &str) -> Result<Self, GlintError> {
        let path = Path::new(arg);
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::load(path)
        } else {
            Self::preset(arg)
        }
    }

    /// Set `self[section][field] = value` through the JSON representation.
    ///
    /// Unknown sections or values that fail to deserialize leave the
    /// options unchanged. Returns whether anything changed.
    pub fn set_field(
        &mut self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> bool {
        let Ok(mut root) = serde_json::to_value(&*self) else {
            return false;
        };
        let Some(target) = root
            .get_mut(section)
            .and_then(serde_json::Value::as_object_mut)
        else {
            return false;
        };
        if !target.contains_key(field) {
            return false;
        }
        let _ = target.insert(field.to_owned(), value);
        match serde_json::from_value::<Self>(root) {
            Ok(updated) if updated != *self => {
                *self = updated;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[backdrop]
radius = 1.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.backdrop.radius, 1.0);
        // Everything else should be default
        assert_eq!(opts.backdrop.segments, 32);
        assert_eq!(opts.camera.fovy, 70.0);
        assert_eq!(opts.post_processing.scale, 4.0);
        assert_eq!(opts.controls.rotation_mode, RotationMode::Orbit);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[backdrop\nradius = ").unwrap_err();
        assert!(matches!(err, GlintError::OptionsParse(_)));
    }

    #[test]
    fn builtin_presets_parse() {
        let classic = Options::builtin_preset("classic").unwrap();
        assert_eq!(classic.backdrop.radius, 1.5);
        assert_eq!(classic.backdrop.time_step, 0.007);
        assert_eq!(classic.controls.rotation_mode, RotationMode::Orbit);
        assert!(classic.controls.enable_damping);

        let drift = Options::builtin_preset("drift").unwrap();
        assert_eq!(drift.backdrop.radius, 1.0);
        assert_eq!(drift.backdrop.time_step, 0.003);
        assert_eq!(drift.controls.rotation_mode, RotationMode::PointerLook);
    }

    #[test]
    fn classic_preset_matches_defaults() {
        assert_eq!(
            Options::builtin_preset("classic").unwrap(),
            Options::default()
        );
    }

    #[test]
    fn unknown_preset_is_reported() {
        let err = Options::builtin_preset("nope").unwrap_err();
        assert!(matches!(err, GlintError::UnknownPreset(name) if name == "nope"));
    }

    #[test]
    fn list_presets_includes_builtins() {
        let names = Options::list_presets(Path::new("does/not/exist"));
        assert_eq!(names, vec!["classic".to_owned(), "drift".to_owned()]);
    }

    #[test]
    fn list_presets_finds_user_files() {
        let dir = std::env::temp_dir()
            .join(format!("glint-presets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("mine.toml"), "[backdrop]\nradius = 2.0\n").unwrap();
        std::fs::write(dir.join("drift.toml"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();

        let names = Options::list_presets(&dir);
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(names, vec!["classic", "drift", "mine"]);
    }

    #[test]
    fn set_field_merges_json() {
        let mut opts = Options::default();
        assert!(opts.set_field("mini_sphere", "x", serde_json::json!(1.5)));
        assert_eq!(opts.mini_sphere.x, 1.5);

        assert!(opts.set_field(
            "controls",
            "rotation_mode",
            serde_json::json!("pointer_look")
        ));
        assert_eq!(opts.controls.rotation_mode, RotationMode::PointerLook);

        // Same value: no change
        assert!(!opts.set_field("mini_sphere", "x", serde_json::json!(1.5)));
        // Wrong type, unknown section, unknown field: ignored
        assert!(!opts.set_field("mini_sphere", "x", serde_json::json!("far")));
        assert!(!opts.set_field("nope", "x", serde_json::json!(1.0)));
        assert!(!opts.set_field("camera", "w", serde_json::json!(1.0)));
        assert_eq!(opts.mini_sphere.x, 1.5);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("Backslash"),
            Some(KeyAction::TogglePanel)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
        assert_eq!(
            opts.keybindings.key_for(KeyAction::ToggleDotScreen),
            Some("KeyP")
        );
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // GUI folders
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("mini_sphere"));
        assert!(props.contains_key("backdrop"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("post_processing"));
        assert!(props.contains_key("debug"));

        // Skipped sections should be absent
        assert!(!props.contains_key("environment"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("x").is_some());
        assert!(camera.get("z").is_some());
        assert!(camera.get("znear").is_none());

        let mini = &props["mini_sphere"]["properties"];
        assert_eq!(mini["x"]["minimum"], serde_json::json!(-5.0));
        assert_eq!(mini["x"]["maximum"], serde_json::json!(5.0));
        assert!(mini.get("segments").is_none());
    }
}
