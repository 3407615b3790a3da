//! Per-feature declaration and value emitters for material sub-features.
//!
//! Each axis has a `*_decls` emitter writing into the declaration section and
//! a `*_values` emitter writing into the value section, with one match arm per
//! variant. Value emitters rely on the bindings made before them:
//!
//! - `position_eye` and `n` are bound first;
//! - `specular` before the environment;
//! - `albedo` before `surface` and before the depth discard.

use super::writer::SourceWriter;
use crate::cases::{OpaqueRegular, TranslucentRegular};
use crate::features::{Albedo, Alpha, Depth, Emissive, Environment, Normal, Refractive, Specular};

/// The axes opaque and translucent regular materials have in common.
pub(crate) struct RegularSurface<'a> {
    pub albedo: &'a Albedo,
    pub emissive: &'a Emissive,
    pub environment: &'a Environment,
    pub normal: &'a Normal,
    pub specular: &'a Specular,
    /// The program reads `emission`.
    pub reads_emission: bool,
    /// The program reads `specular` and `specular_exponent`.
    pub reads_specular: bool,
}

impl RegularSurface<'_> {
    /// Restricts the bound terms to the ones the program reads. A specular
    /// color sampled by the environment is bound regardless.
    pub(crate) fn reading(mut self, emission: bool, specular: bool) -> Self {
        self.reads_emission = emission;
        self.reads_specular = specular;
        self
    }

    fn binds_specular_color(&self) -> bool {
        self.reads_specular || self.environment.samples_specular_map()
    }
}

impl<'a> From<&'a OpaqueRegular> for RegularSurface<'a> {
    fn from(case: &'a OpaqueRegular) -> Self {
        Self {
            albedo: &case.albedo,
            emissive: &case.emissive,
            environment: &case.environment,
            normal: &case.normal,
            specular: &case.specular,
            reads_emission: true,
            reads_specular: true,
        }
    }
}

impl<'a> From<&'a TranslucentRegular> for RegularSurface<'a> {
    fn from(case: &'a TranslucentRegular) -> Self {
        Self {
            albedo: &case.albedo,
            emissive: &case.emissive,
            environment: &case.environment,
            normal: &case.normal,
            specular: &case.specular,
            reads_emission: true,
            reads_specular: true,
        }
    }
}

pub(crate) fn regular_decls(w: &mut SourceWriter, s: &RegularSurface<'_>) {
    normal_decls(w, s.normal);
    albedo_decls(w, s.albedo);
    if s.reads_emission {
        emissive_decls(w, s.emissive);
    }
    if s.binds_specular_color() {
        specular_decls(w, s.specular);
    }
    environment_decls(w, s.environment);
}

/// Binds `n`, `albedo`, the emissive and specular values the program reads,
/// the environment and finally `surface`.
pub(crate) fn regular_values(w: &mut SourceWriter, s: &RegularSurface<'_>) {
    normal_values(w, s.normal);
    albedo_values(w, s.albedo);
    if s.reads_emission {
        emissive_values(w, s.emissive);
    }
    if s.reads_specular {
        specular_values(w, s.specular);
    } else if s.environment.samples_specular_map() {
        specular_color_values(w, s.specular);
    }
    environment_values(w, s.environment, s.specular);
    surface_values(w, s.environment);
}

/// Interpolated positions from the vertex stage, plus UVs when sampled.
pub(crate) fn surface_inputs(w: &mut SourceWriter, requires_uv: bool) {
    w.line("in f_position_eye : vector_4f;");
    w.line("in f_position_clip : vector_4f;");
    if requires_uv {
        w.line("in f_uv : vector_2f;");
    }
}

pub(crate) fn position_values(w: &mut SourceWriter) {
    w.line("value position_eye = f_position_eye [x y z];");
}

pub(crate) fn normal_decls(w: &mut SourceWriter, normal: &Normal) {
    match normal {
        Normal::Vertex => {
            w.line("in f_normal_eye : vector_3f;");
        }
        Normal::Mapped { .. } => {
            w.line("in f_normal_model : vector_3f;");
            w.line("in f_tangent : vector_3f;");
            w.line("in f_bitangent : vector_3f;");
            w.line("parameter m_normal : matrix_3x3f;");
            w.line("parameter t_normal : sampler_2d;");
        }
    }
}

pub(crate) fn normal_values(w: &mut SourceWriter, normal: &Normal) {
    match normal {
        Normal::Vertex => {
            w.line("value n = V3.normalize (f_normal_eye);");
        }
        Normal::Mapped { .. } => {
            w.line("value n_sample = Normals.unpack (t_normal, f_uv);");
            w.line(
                "value n = Normals.transform (n_sample, f_tangent, f_bitangent, f_normal_model, m_normal);",
            );
        }
    }
}

pub(crate) fn albedo_decls(w: &mut SourceWriter, albedo: &Albedo) {
    match albedo {
        Albedo::Untextured { .. } => {
            w.line("parameter p_albedo : Albedo.t;");
        }
        Albedo::Textured { .. } => {
            w.line("parameter p_albedo : Albedo.t;");
            w.line("parameter t_albedo : sampler_2d;");
        }
    }
}

pub(crate) fn albedo_values(w: &mut SourceWriter, albedo: &Albedo) {
    match albedo {
        Albedo::Untextured { .. } => {
            w.line("value albedo = Albedo.untextured (p_albedo);");
        }
        Albedo::Textured { .. } => {
            w.line("value albedo = Albedo.textured (t_albedo, f_uv, p_albedo);");
        }
    }
}

pub(crate) fn alpha_decls(w: &mut SourceWriter, alpha: &Alpha) {
    match alpha {
        Alpha::Constant { .. } | Alpha::OneMinusDot { .. } => {
            w.line("parameter p_opacity : float;");
        }
    }
}

/// Binds `opacity`.
pub(crate) fn alpha_values(w: &mut SourceWriter, alpha: &Alpha) {
    match alpha {
        Alpha::Constant { .. } => {
            w.line("value opacity = p_opacity;");
        }
        Alpha::OneMinusDot { .. } => {
            w.line("value view = V3.normalize (V3.negate (position_eye));");
            w.line("value opacity = F.multiply (p_opacity, F.subtract (1.0, V3.dot (view, n)));");
        }
    }
}

pub(crate) fn emissive_decls(w: &mut SourceWriter, emissive: &Emissive) {
    match emissive {
        Emissive::None => {}
        Emissive::Constant { .. } => {
            w.line("parameter p_emission : Emission.t;");
        }
        Emissive::Mapped { .. } => {
            w.line("parameter p_emission : Emission.t;");
            w.line("parameter t_emission : sampler_2d;");
        }
    }
}

pub(crate) fn emissive_values(w: &mut SourceWriter, emissive: &Emissive) {
    match emissive {
        Emissive::None => {}
        Emissive::Constant { .. } => {
            w.line("value emission = p_emission.amount;");
        }
        Emissive::Mapped { .. } => {
            w.line("value emission = Emission.mapped (p_emission, t_emission, f_uv);");
        }
    }
}

pub(crate) fn specular_decls(w: &mut SourceWriter, specular: &Specular) {
    match specular {
        Specular::None => {}
        Specular::Constant { .. } => {
            w.line("parameter p_specular : Specular.t;");
        }
        Specular::Mapped { .. } => {
            w.line("parameter p_specular : Specular.t;");
            w.line("parameter t_specular : sampler_2d;");
        }
    }
}

/// Binds `specular` only.
pub(crate) fn specular_color_values(w: &mut SourceWriter, specular: &Specular) {
    match specular {
        Specular::None => {}
        Specular::Constant { .. } => {
            w.line("value specular = p_specular.color;");
        }
        Specular::Mapped { .. } => {
            w.line("value specular = Specular.mapped (p_specular, t_specular, f_uv);");
        }
    }
}

/// Binds `specular` and `specular_exponent`.
pub(crate) fn specular_values(w: &mut SourceWriter, specular: &Specular) {
    specular_color_values(w, specular);
    if !specular.is_none() {
        w.line("value specular_exponent = p_specular.exponent;");
    }
}

pub(crate) fn environment_decls(w: &mut SourceWriter, environment: &Environment) {
    match environment {
        Environment::None => {}
        Environment::Reflection { .. } | Environment::ReflectionMapped { .. } => {
            w.line("parameter p_environment : Environment.t;");
            w.line("parameter t_environment : sampler_cube;");
            w.line("parameter m_view_inverse : matrix_4x4f;");
        }
    }
}

/// Binds `env` and `env_mix`.
pub(crate) fn environment_values(w: &mut SourceWriter, environment: &Environment, specular: &Specular) {
    match environment {
        Environment::None => {}
        Environment::Reflection { .. } => {
            w.line("value env = Environment.reflection (t_environment, m_view_inverse, position_eye, n);");
            w.line("value env_mix = p_environment.mix;");
        }
        Environment::ReflectionMapped { .. } => {
            if specular.is_none() {
                unreachable!("reflection-mapped environment paired with no specular term");
            }
            w.line("value env = Environment.reflection (t_environment, m_view_inverse, position_eye, n);");
            w.line("value env_mix = F.multiply (p_environment.mix, Specular.intensity (specular));");
        }
    }
}

/// Binds `surface`: the albedo, mixed toward the environment when present.
pub(crate) fn surface_values(w: &mut SourceWriter, environment: &Environment) {
    match environment {
        Environment::None => {
            w.line("value surface = albedo;");
        }
        Environment::Reflection { .. } | Environment::ReflectionMapped { .. } => {
            w.line("value surface = V4.interpolate (albedo, new vector_4f (env, 1.0), env_mix);");
        }
    }
}

pub(crate) fn depth_decls(w: &mut SourceWriter, depth: &Depth) {
    match depth {
        Depth::Constant => {}
        Depth::Alpha { .. } => {
            w.line("parameter p_alpha_depth : float;");
        }
    }
}

/// Must follow `albedo_values`.
pub(crate) fn depth_discard(w: &mut SourceWriter, depth: &Depth) {
    match depth {
        Depth::Constant => {}
        Depth::Alpha { .. } => {
            w.line("discard (F.lesser (albedo [w], p_alpha_depth));");
        }
    }
}

pub(crate) fn refractive_decls(w: &mut SourceWriter, refractive: &Refractive) {
    w.line("parameter p_refraction : Refraction.t;");
    w.line("parameter t_refraction_scene : sampler_2d;");
    if refractive.is_masked() {
        w.line("parameter t_refraction_scene_mask : sampler_2d;");
    }
    if refractive.uses_delta() {
        w.line("parameter t_refraction_delta : sampler_2d;");
    }
}

/// Binds `rgba` to the refracted scene color.
pub(crate) fn refractive_values(w: &mut SourceWriter, refractive: &Refractive) {
    match refractive {
        Refractive::UnmaskedNormals { .. } => {
            w.line(
                "value rgba = Refraction.normals_unmasked (t_refraction_scene, p_refraction, f_position_clip, n);",
            );
        }
        Refractive::MaskedNormals { .. } => {
            w.line(
                "value rgba = Refraction.normals_masked (t_refraction_scene, t_refraction_scene_mask, p_refraction, f_position_clip, n);",
            );
        }
        Refractive::UnmaskedDelta { .. } => {
            w.line("value delta = Refraction.delta (t_refraction_delta, f_uv);");
            w.line(
                "value rgba = Refraction.delta_unmasked (t_refraction_scene, p_refraction, f_position_clip, delta);",
            );
        }
        Refractive::MaskedDelta { .. } => {
            w.line("value delta = Refraction.delta (t_refraction_delta, f_uv);");
            w.line(
                "value rgba = Refraction.delta_masked (t_refraction_scene, t_refraction_scene_mask, p_refraction, f_position_clip, delta);",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TextureRef;

    fn emit(f: impl FnOnce(&mut SourceWriter)) -> String {
        let mut w = SourceWriter::new();
        f(&mut w);
        w.finish()
    }

    #[test]
    fn none_variants_emit_nothing() {
        assert!(emit(|w| emissive_decls(w, &Emissive::None)).is_empty());
        assert!(emit(|w| specular_values(w, &Specular::None)).is_empty());
        assert!(emit(|w| environment_values(w, &Environment::None, &Specular::None)).is_empty());
        assert!(emit(|w| depth_discard(w, &Depth::Constant)).is_empty());
    }

    #[test]
    fn surface_without_lighting_skips_unread_terms() {
        fn surface<'a>(
            environment: &'a Environment,
            rest: &'a (Albedo, Emissive, Normal, Specular),
        ) -> RegularSurface<'a> {
            RegularSurface {
                albedo: &rest.0,
                emissive: &rest.1,
                environment,
                normal: &rest.2,
                specular: &rest.3,
                reads_emission: true,
                reads_specular: true,
            }
        }
        let rest = (
            Albedo::untextured([1.0; 4]),
            Emissive::constant(0.5),
            Normal::Vertex,
            Specular::mapped([1.0; 3], 8.0, TextureRef::new("s")),
        );
        let plain = Environment::None;
        let mapped_env = Environment::reflection_mapped(0.5, TextureRef::new("sky"));

        let unlit = emit(|w| regular_values(w, &surface(&plain, &rest).reading(false, false)));
        assert!(!unlit.contains("emission"));
        assert!(!unlit.contains("specular"));

        // The environment still needs the specular color, but not the exponent.
        let unlit_env = emit(|w| regular_values(w, &surface(&mapped_env, &rest).reading(false, false)));
        assert!(unlit_env.contains("value specular = Specular.mapped"));
        assert!(!unlit_env.contains("specular_exponent"));

        let lit = emit(|w| regular_values(w, &surface(&plain, &rest)));
        assert!(lit.contains("value emission = p_emission.amount;"));
        assert!(lit.contains("value specular_exponent = p_specular.exponent;"));
    }

    #[test]
    fn mapped_normal_unpacks_from_texture() {
        let text = emit(|w| normal_values(w, &Normal::mapped(TextureRef::new("n"))));
        assert!(text.starts_with("value n_sample = Normals.unpack"));
        assert!(text.contains("value n = Normals.transform"));
    }

    #[test]
    fn alpha_depth_discards_on_albedo_alpha() {
        let text = emit(|w| depth_discard(w, &Depth::alpha(0.5)));
        assert_eq!(text, "discard (F.lesser (albedo [w], p_alpha_depth));\n");
    }

    #[test]
    #[should_panic(expected = "no specular term")]
    fn reflection_mapped_without_specular_is_a_defect() {
        let env = Environment::reflection_mapped(0.5, TextureRef::new("sky"));
        let _ = emit(|w| environment_values(w, &env, &Specular::None));
    }

    #[test]
    fn masked_delta_declares_mask_and_delta() {
        let text = emit(|w| {
            refractive_decls(
                w,
                &Refractive::MaskedDelta {
                    scale: 0.1,
                    texture: TextureRef::new("d"),
                },
            )
        });
        assert!(text.contains("t_refraction_scene_mask"));
        assert!(text.contains("t_refraction_delta"));
    }
}
