//! Shader module synthesis.
//!
//! `synthesize` turns one case into the text of one Parasol module. It is a
//! single linear pass with no retained state:
//!
//! header → imports → fragment declarations → values → discard → outputs →
//! program binding → footer
//!
//! Dispatch over feature variants is an exhaustive `match` in each emitter, so
//! every enumerated case synthesizes.

mod deferred;
mod depth;
mod forward;
mod framing;
mod light_emit;
mod material_emit;
mod writer;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cases::{
    self, CaseCatalog, CompatibilityRules, DepthCase, LitCase, MaterialCase, OpaqueRegular,
    TranslucentRefractive, TranslucentRegular, TranslucentSpecularOnly,
};
use crate::features::LightCase;
use crate::naming::{self, Packaging};

pub use framing::STANDARD_IMPORTS;

/// Program family, i.e. rendering path, a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderFamily {
    ForwardUnlit,
    ForwardLit,
    ForwardRefractive,
    DeferredGeometry,
    DeferredLight,
    ShadowDepth,
}

impl ShaderFamily {
    pub const ALL: [ShaderFamily; 6] = [
        ShaderFamily::ForwardUnlit,
        ShaderFamily::ForwardLit,
        ShaderFamily::ForwardRefractive,
        ShaderFamily::DeferredGeometry,
        ShaderFamily::DeferredLight,
        ShaderFamily::ShadowDepth,
    ];

    /// Package segment, e.g. `forward.lit`.
    pub fn segment(self) -> &'static str {
        match self {
            ShaderFamily::ForwardUnlit => "forward.unlit",
            ShaderFamily::ForwardLit => "forward.lit",
            ShaderFamily::ForwardRefractive => "forward.refractive",
            ShaderFamily::DeferredGeometry => "deferred.geometry",
            ShaderFamily::DeferredLight => "deferred.light",
            ShaderFamily::ShadowDepth => "shadow.depth",
        }
    }
}

impl fmt::Display for ShaderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// One unit of synthesis: a case together with the program it is generated for.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderCase {
    ForwardUnlitOpaque(OpaqueRegular),
    ForwardUnlitTranslucent(TranslucentRegular),
    ForwardLitTranslucent(LitCase<TranslucentRegular>),
    /// Emission pass of an emissive lit translucent material.
    ForwardLitEmission(TranslucentRegular),
    ForwardLitSpecularOnly(LitCase<TranslucentSpecularOnly>),
    ForwardRefractive(TranslucentRefractive),
    DeferredGeometry(OpaqueRegular),
    DeferredLight(LightCase),
    /// Fullscreen emission pass over the G-buffer.
    DeferredEmission,
    ShadowDepth(DepthCase),
}

impl ShaderCase {
    pub fn family(&self) -> ShaderFamily {
        match self {
            ShaderCase::ForwardUnlitOpaque(_) | ShaderCase::ForwardUnlitTranslucent(_) => {
                ShaderFamily::ForwardUnlit
            }
            ShaderCase::ForwardLitTranslucent(_)
            | ShaderCase::ForwardLitEmission(_)
            | ShaderCase::ForwardLitSpecularOnly(_) => ShaderFamily::ForwardLit,
            ShaderCase::ForwardRefractive(_) => ShaderFamily::ForwardRefractive,
            ShaderCase::DeferredGeometry(_) => ShaderFamily::DeferredGeometry,
            ShaderCase::DeferredLight(_) | ShaderCase::DeferredEmission => {
                ShaderFamily::DeferredLight
            }
            ShaderCase::ShadowDepth(_) => ShaderFamily::ShadowDepth,
        }
    }

    /// Vertex attributes a mesh needs to be drawn with this module.
    pub fn requirements(&self) -> MeshRequirements {
        fn of(m: &impl MaterialCase) -> MeshRequirements {
            MeshRequirements {
                uv: m.requires_uv(),
                tangents: m.requires_tangents(),
            }
        }

        match self {
            ShaderCase::ForwardUnlitOpaque(c) | ShaderCase::DeferredGeometry(c) => of(c),
            ShaderCase::ForwardUnlitTranslucent(c) | ShaderCase::ForwardLitEmission(c) => of(c),
            ShaderCase::ForwardLitTranslucent(p) => of(&p.material),
            ShaderCase::ForwardLitSpecularOnly(p) => of(&p.material),
            ShaderCase::ForwardRefractive(c) => of(c),
            // Light volumes and fullscreen quads only carry positions.
            ShaderCase::DeferredLight(_) | ShaderCase::DeferredEmission => {
                MeshRequirements::default()
            }
            ShaderCase::ShadowDepth(c) => MeshRequirements {
                uv: c.requires_uv(),
                tangents: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeshRequirements {
    pub uv: bool,
    pub tangents: bool,
}

/// A generated module. Immutable once built; identified by package and name.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderModule {
    pub family: ShaderFamily,
    pub package: String,
    pub name: String,
    pub requirements: MeshRequirements,
    pub source: String,
}

impl ShaderModule {
    /// `package.name`, the key the shader cache stores compiled programs under.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

pub fn synthesize(case: &ShaderCase, packaging: &Packaging) -> ShaderModule {
    let family = case.family();
    let name = naming::module_name(case);
    let package = packaging.package_name(family);
    let header = framing::ModuleHeader {
        family,
        package: &package,
        name: &name,
    };

    let source = match case {
        ShaderCase::ForwardUnlitOpaque(c) => forward::unlit_opaque(&header, c),
        ShaderCase::ForwardUnlitTranslucent(c) => forward::unlit_translucent(&header, c),
        ShaderCase::ForwardLitTranslucent(p) => forward::lit_translucent(&header, p),
        ShaderCase::ForwardLitEmission(c) => forward::lit_translucent_emission(&header, c),
        ShaderCase::ForwardLitSpecularOnly(p) => forward::lit_specular_only(&header, p),
        ShaderCase::ForwardRefractive(c) => forward::refractive(&header, c),
        ShaderCase::DeferredGeometry(c) => deferred::geometry(&header, c),
        ShaderCase::DeferredLight(l) => deferred::light(&header, l),
        ShaderCase::DeferredEmission => deferred::emission(&header),
        ShaderCase::ShadowDepth(c) => depth::shadow_depth(&header, c),
    };

    ShaderModule {
        family,
        requirements: case.requirements(),
        package,
        name,
        source,
    }
}

/// Every case of the requested families, in `ShaderFamily::ALL` order.
pub fn shader_cases(
    catalog: &CaseCatalog,
    rules: &impl CompatibilityRules,
    families: &[ShaderFamily],
) -> Vec<ShaderCase> {
    let mut out = Vec::new();

    for family in ShaderFamily::ALL {
        if !families.contains(&family) {
            continue;
        }
        let before = out.len();
        match family {
            ShaderFamily::ForwardUnlit => {
                out.extend(
                    cases::opaque_regular(catalog, rules)
                        .into_iter()
                        .map(ShaderCase::ForwardUnlitOpaque),
                );
                out.extend(
                    cases::translucent_regular(catalog, rules)
                        .into_iter()
                        .map(ShaderCase::ForwardUnlitTranslucent),
                );
            }
            ShaderFamily::ForwardLit => {
                let regular = cases::translucent_regular(catalog, rules);
                out.extend(
                    regular
                        .iter()
                        .filter(|m| !m.emissive.is_none())
                        .cloned()
                        .map(ShaderCase::ForwardLitEmission),
                );
                out.extend(
                    cases::lit_pairs(&catalog.lights, &regular)
                        .into_iter()
                        .map(ShaderCase::ForwardLitTranslucent),
                );
                let specular_only = cases::translucent_specular_only(catalog);
                out.extend(
                    cases::lit_pairs(&catalog.lights, &specular_only)
                        .into_iter()
                        .map(ShaderCase::ForwardLitSpecularOnly),
                );
            }
            ShaderFamily::ForwardRefractive => {
                out.extend(
                    cases::translucent_refractive(catalog)
                        .into_iter()
                        .map(ShaderCase::ForwardRefractive),
                );
            }
            ShaderFamily::DeferredGeometry => {
                out.extend(
                    cases::opaque_regular(catalog, rules)
                        .into_iter()
                        .map(ShaderCase::DeferredGeometry),
                );
            }
            ShaderFamily::DeferredLight => {
                out.extend(catalog.lights.iter().copied().map(ShaderCase::DeferredLight));
                out.push(ShaderCase::DeferredEmission);
            }
            ShaderFamily::ShadowDepth => {
                out.extend(
                    cases::depth_cases(catalog, rules)
                        .into_iter()
                        .map(ShaderCase::ShadowDepth),
                );
            }
        }
        debug!("{family}: {} cases", out.len() - before);
    }

    out
}
