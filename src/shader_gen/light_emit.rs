//! Light declaration and value emitters, shared by the forward-lit and
//! deferred-light families.
//!
//! Light values read `position_eye` and `n`, and `specular` with
//! `specular_exponent` when a specular term is emitted. They bind
//! `light_diffuse` and/or `light_specular`.

use super::writer::SourceWriter;
use crate::features::{LightCase, LightKind, ShadowMap};

/// Which light terms the surface consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LightTerms {
    pub diffuse: bool,
    pub specular: bool,
}

impl LightTerms {
    pub(crate) fn new(light: &LightCase, material_diffuse: bool, material_specular: bool) -> Self {
        Self {
            diffuse: material_diffuse,
            specular: material_specular && !light.is_diffuse_only(),
        }
    }
}

pub(crate) fn light_decls(w: &mut SourceWriter, light: &LightCase) {
    match light.kind {
        LightKind::Directional => {
            w.line("parameter p_light : DirectionalLight.t;");
        }
        LightKind::Spherical => {
            w.line("parameter p_light : SphericalLight.t;");
        }
        LightKind::Projective { shadow } => {
            w.line("parameter p_light : ProjectiveLight.t;");
            w.line("parameter t_light_projection : sampler_2d;");
            w.line("parameter m_eye_to_light_clip : matrix_4x4f;");
            match shadow {
                None => {}
                Some(ShadowMap::Basic) => {
                    w.line("parameter p_shadow : ShadowBasic.t;");
                    w.line("parameter t_shadow_basic : sampler_2d;");
                }
                Some(ShadowMap::Variance) => {
                    w.line("parameter p_shadow : ShadowVariance.t;");
                    w.line("parameter t_shadow_variance : sampler_2d;");
                }
            }
        }
    }
}

pub(crate) fn light_values(w: &mut SourceWriter, light: &LightCase, terms: LightTerms) {
    match light.kind {
        LightKind::Directional => {
            w.line("value light_vectors = DirectionalLight.vectors (p_light, position_eye, n);");
            w.line("value light_color = p_light.color;");
            w.line("value light_attenuation = 1.0;");
        }
        LightKind::Spherical => {
            w.line("value light_vectors = SphericalLight.vectors (p_light, position_eye, n);");
            w.line("value light_color = p_light.color;");
            w.line(
                "value light_attenuation = SphericalLight.attenuation (p_light, light_vectors.distance);",
            );
        }
        LightKind::Projective { shadow } => {
            w.line(
                "value position_light_clip = M4.multiply_vector (m_eye_to_light_clip, new vector_4f (position_eye, 1.0));",
            );
            w.line("value light_vectors = ProjectiveLight.vectors (p_light, position_eye, n);");
            w.line(
                "value light_color = V3.multiply (p_light.color, ProjectiveLight.texel (t_light_projection, position_light_clip));",
            );
            match shadow {
                None => {
                    w.line(
                        "value light_attenuation = ProjectiveLight.attenuation (p_light, light_vectors.distance);",
                    );
                }
                Some(map) => {
                    w.line(
                        "value light_attenuation_base = ProjectiveLight.attenuation (p_light, light_vectors.distance);",
                    );
                    shadow_values(w, map);
                    w.line("value light_attenuation = F.multiply (light_attenuation_base, light_shadow);");
                }
            }
        }
    }

    if terms.diffuse {
        w.line(
            "value light_diffuse = Light.diffuse (light_color, p_light.intensity, light_vectors, light_attenuation);",
        );
    }
    if terms.specular {
        w.line(
            "value light_specular = Light.specular (light_color, p_light.intensity, light_vectors, specular, specular_exponent, light_attenuation);",
        );
    }
}

/// Binds `light_shadow`, the fraction of light reaching the fragment.
fn shadow_values(w: &mut SourceWriter, map: ShadowMap) {
    match map {
        ShadowMap::Basic => {
            w.line(
                "value light_shadow = ShadowBasic.factor (t_shadow_basic, p_shadow, position_light_clip);",
            );
        }
        ShadowMap::Variance => {
            w.line(
                "value light_shadow = ShadowVariance.factor (t_shadow_variance, p_shadow, position_light_clip);",
            );
        }
    }
}
