use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::GlintError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import glint::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition: (source, file_path).
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
        file_path: "modules/fullscreen.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/noise.wgsl"),
        file_path: "modules/noise.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

fn composer_error(file_path: &str, e: &ComposerError) -> GlintError {
    GlintError::Shader(format!("{file_path}: {e}"))
}

impl ShaderComposer {
    /// Build a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, GlintError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| composer_error(m.file_path, &e))?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import` directives)
    /// into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, GlintError> {
        let naga_module = self.compose_naga(source, file_path)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`GlintError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, GlintError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| composer_error(file_path, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_shader_sources() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                include_str!("../../assets/shaders/raster/backdrop.wgsl"),
                "backdrop.wgsl",
            ),
            (
                include_str!("../../assets/shaders/raster/fresnel.wgsl"),
                "fresnel.wgsl",
            ),
            (
                include_str!("../../assets/shaders/screen/dot_screen.wgsl"),
                "dot_screen.wgsl",
            ),
            (
                include_str!("../../assets/shaders/screen/mip_downsample.wgsl"),
                "mip_downsample.wgsl",
            ),
        ]
    }

    #[test]
    fn test_all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in all_shader_sources() {
            if let Err(e) = composer.compose_naga(source, file_path) {
                panic!("shader '{file_path}' failed to compose: {e}");
            }
        }
    }

    #[test]
    fn composed_shaders_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in all_shader_sources() {
            let module = composer.compose_naga(source, file_path).unwrap();
            let mut validator = naga::valid::Validator::new(
                naga::valid::ValidationFlags::all(),
                naga::valid::Capabilities::empty(),
            );
            if let Err(e) = validator.validate(&module) {
                panic!("shader '{file_path}' failed validation: {e:?}");
            }
        }
    }
}
