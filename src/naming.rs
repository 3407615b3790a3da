//! Module names, package names and archive paths.
//!
//! These strings key the external shader cache and the on-disk archive, so
//! they depend on feature codes only, never on payload values.

use std::path::PathBuf;

use crate::cases::MaterialCase;
use crate::shader_gen::{ShaderCase, ShaderFamily};

pub const DEFAULT_PACKAGE_PREFIX: &str = "r1.shaders";

/// Name of the deferred emission pass module.
pub const DEFERRED_EMISSION_MODULE: &str = "Emission";

/// Extension of module files in a shader archive.
pub const MODULE_EXTENSION: &str = "p";

pub fn module_name(case: &ShaderCase) -> String {
    match case {
        ShaderCase::ForwardUnlitOpaque(c) | ShaderCase::DeferredGeometry(c) => c.code(),
        ShaderCase::ForwardUnlitTranslucent(c) | ShaderCase::ForwardLitEmission(c) => c.code(),
        ShaderCase::ForwardLitTranslucent(p) => p.code(),
        ShaderCase::ForwardLitSpecularOnly(p) => p.code(),
        ShaderCase::ForwardRefractive(c) => c.code(),
        ShaderCase::DeferredLight(l) => l.code(),
        ShaderCase::DeferredEmission => DEFERRED_EMISSION_MODULE.to_string(),
        ShaderCase::ShadowDepth(c) => c.code(),
    }
}

/// Maps families to packages under a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packaging {
    prefix: String,
}

impl Packaging {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn package_name(&self, family: ShaderFamily) -> String {
        format!("{}.{}", self.prefix, family.segment())
    }

    /// Relative path of a module inside an archive, e.g.
    /// `r1/shaders/forward/lit/LD_AU_AlC_NV.p`.
    pub fn archive_path(&self, family: ShaderFamily, module: &str) -> PathBuf {
        let mut path: PathBuf = self.package_name(family).split('.').collect();
        path.push(format!("{module}.{MODULE_EXTENSION}"));
        path
    }
}

impl Default for Packaging {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::{LitCase, TranslucentRegular};
    use crate::features::{
        Albedo, Alpha, Emissive, Environment, LightCase, LightContribution, LightKind, Normal,
        Specular, TextureRef,
    };

    fn translucent(color: [f32; 4], texture: &str) -> TranslucentRegular {
        TranslucentRegular {
            albedo: Albedo::textured(color, 0.25, TextureRef::new(texture)),
            alpha: Alpha::one_minus_dot(0.75),
            emissive: Emissive::None,
            environment: Environment::None,
            normal: Normal::Vertex,
            specular: Specular::None,
        }
    }

    #[test]
    fn lit_name_is_light_code_then_material_code() {
        let case = ShaderCase::ForwardLitTranslucent(LitCase {
            light: LightCase::new(LightKind::Spherical, LightContribution::Regular),
            material: translucent([1.0; 4], "a"),
        });
        assert_eq!(module_name(&case), "LS_AT_AlOMD_NV");
    }

    #[test]
    fn emission_passes_are_named_without_a_light() {
        assert_eq!(module_name(&ShaderCase::DeferredEmission), DEFERRED_EMISSION_MODULE);
        let mut material = translucent([1.0; 4], "a");
        material.emissive = Emissive::constant(0.5);
        assert_eq!(
            module_name(&ShaderCase::ForwardLitEmission(material)),
            "AT_AlOMD_EC_NV"
        );
    }

    #[test]
    fn payload_does_not_affect_name() {
        let a = ShaderCase::ForwardUnlitTranslucent(translucent([1.0, 0.0, 0.0, 1.0], "red"));
        let b = ShaderCase::ForwardUnlitTranslucent(translucent([0.0, 0.0, 1.0, 1.0], "blue"));
        assert_ne!(a, b);
        assert_eq!(module_name(&a), module_name(&b));
    }

    #[test]
    fn archive_path_mirrors_package() {
        let packaging = Packaging::new("game.shaders");
        let path = packaging.archive_path(ShaderFamily::DeferredLight, "LPSMB");
        assert_eq!(
            path,
            PathBuf::from("game")
                .join("shaders")
                .join("deferred")
                .join("light")
                .join("LPSMB.p")
        );
    }
}
