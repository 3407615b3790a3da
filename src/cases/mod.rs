//! Material, light and pairing cases, and their enumeration.
//!
//! A case is one validated selection per sub-feature axis. Cases are plain
//! values: the enumerator builds them, the synthesizer reads them.

pub mod catalog;
pub mod enumerate;
pub mod validator;

pub use catalog::CaseCatalog;
pub use enumerate::{
    depth_cases, lit_pairs, opaque_regular, translucent_refractive, translucent_regular,
    translucent_specular_only,
};
pub use validator::{CompatibilityRules, StandardRules};

use crate::features::{
    Albedo, Alpha, Depth, Emissive, Environment, Feature, LightCase, Normal, Refractive,
    ShadowMap, Specular, join_codes,
};

/// Behavior common to every material shape.
pub trait MaterialCase {
    /// Sub-features in axis order.
    fn features(&self) -> Vec<&dyn Feature>;

    fn normal(&self) -> &Normal;

    /// Material feature code, e.g. `AT_DA_EM_ERM_NM_SM`.
    fn code(&self) -> String {
        join_codes(&self.features())
    }

    /// Meshes rendered with this material need UV coordinates.
    fn requires_uv(&self) -> bool {
        self.features().iter().any(|f| f.requires_uv())
    }

    /// Meshes rendered with this material need tangent vectors.
    fn requires_tangents(&self) -> bool {
        self.normal().requires_tangents()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueRegular {
    pub albedo: Albedo,
    pub depth: Depth,
    pub emissive: Emissive,
    pub environment: Environment,
    pub normal: Normal,
    pub specular: Specular,
}

impl MaterialCase for OpaqueRegular {
    fn features(&self) -> Vec<&dyn Feature> {
        vec![
            &self.albedo,
            &self.depth,
            &self.emissive,
            &self.environment,
            &self.normal,
            &self.specular,
        ]
    }

    fn normal(&self) -> &Normal {
        &self.normal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslucentRegular {
    pub albedo: Albedo,
    pub alpha: Alpha,
    pub emissive: Emissive,
    pub environment: Environment,
    pub normal: Normal,
    pub specular: Specular,
}

impl MaterialCase for TranslucentRegular {
    fn features(&self) -> Vec<&dyn Feature> {
        vec![
            &self.albedo,
            &self.alpha,
            &self.emissive,
            &self.environment,
            &self.normal,
            &self.specular,
        ]
    }

    fn normal(&self) -> &Normal {
        &self.normal
    }
}

/// Translucent surface that only contributes specular highlights.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslucentSpecularOnly {
    pub alpha: Alpha,
    pub normal: Normal,
    pub specular: Specular,
}

impl MaterialCase for TranslucentSpecularOnly {
    fn features(&self) -> Vec<&dyn Feature> {
        vec![&self.alpha, &self.normal, &self.specular]
    }

    fn normal(&self) -> &Normal {
        &self.normal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslucentRefractive {
    pub normal: Normal,
    pub refractive: Refractive,
}

impl MaterialCase for TranslucentRefractive {
    fn features(&self) -> Vec<&dyn Feature> {
        vec![&self.normal, &self.refractive]
    }

    fn normal(&self) -> &Normal {
        &self.normal
    }
}

/// A light paired with a material it illuminates.
#[derive(Debug, Clone, PartialEq)]
pub struct LitCase<M> {
    pub light: LightCase,
    pub material: M,
}

impl<M: MaterialCase> LitCase<M> {
    /// `<light code>_<material code>`.
    pub fn code(&self) -> String {
        format!("{}_{}", self.light.code(), self.material.code())
    }
}

/// Shadow map rendering of an opaque surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthCase {
    pub albedo: Albedo,
    pub depth: Depth,
    pub shadow: ShadowMap,
}

impl DepthCase {
    /// `<shadow code>_<albedo code>_<depth code>`.
    pub fn code(&self) -> String {
        join_codes(&[&self.shadow, &self.albedo, &self.depth])
    }

    pub fn requires_uv(&self) -> bool {
        self.depth.discards() && self.albedo.requires_uv()
    }
}
