//! `glint` demo binary.
//!
//! ```text
//! glint                 # classic preset
//! glint drift           # named preset (assets/presets/ or built-in)
//! glint my_scene.toml   # options file
//! ```

use std::path::Path;
use std::process::ExitCode;

use glint::options::PRESETS_DIR;
use glint::{Options, Viewer};

const DEFAULT_PRESET: &str = "classic";

/// Options for the command-line argument, plus the preset name when the
/// argument named one.
fn resolve_options(arg: Option<String>) -> Option<(Options, Option<String>)> {
    let Some(arg) = arg else {
        let options = Options::preset(DEFAULT_PRESET).unwrap_or_default();
        return Some((options, Some(DEFAULT_PRESET.to_owned())));
    };
    match Options::from_arg(&arg) {
        Ok(options) => {
            log::info!("using options from '{arg}'");
            let is_file = Path::new(&arg)
                .extension()
                .is_some_and(|ext| ext == "toml");
            Some((options, (!is_file).then_some(arg)))
        }
        Err(e) => {
            log::error!("{e}");
            log::error!(
                "available presets: {}",
                Options::list_presets(Path::new(PRESETS_DIR)).join(", ")
            );
            None
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let Some((options, preset)) = resolve_options(std::env::args().nth(1))
    else {
        return ExitCode::FAILURE;
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(name) = preset {
        builder = builder.with_preset_name(name);
    }
    match builder.build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
