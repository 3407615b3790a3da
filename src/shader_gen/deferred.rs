//! Deferred rendering families.
//!
//! The geometry pass writes four G-buffer targets:
//!
//! | location | output          | contents                          |
//! |----------|-----------------|-----------------------------------|
//! | 0        | `out_albedo`    | surface rgb, emission in alpha     |
//! | 1        | `out_normal`    | compressed eye-space normal        |
//! | 2        | `out_specular`  | specular rgb, exponent / 256       |
//! | 3        | `out_eye_depth` | eye-space z                        |
//!
//! Each light pass reads them back and shades one light. Emission is added
//! once per frame by a separate fullscreen pass, never by a light pass.

use super::{
    framing::{self, ModuleHeader},
    light_emit::{self, LightTerms},
    material_emit::{self, RegularSurface},
    writer::SourceWriter,
};
use crate::cases::{MaterialCase, OpaqueRegular};
use crate::features::LightCase;

/// Specular exponents are stored divided by this in the G-buffer.
const SPECULAR_EXPONENT_SCALE: &str = "256.0";

pub(crate) fn geometry(header: &ModuleHeader<'_>, case: &OpaqueRegular) -> String {
    let surface = RegularSurface::from(case);
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, case.requires_uv());
    material_emit::regular_decls(&mut w, &surface);
    material_emit::depth_decls(&mut w, &case.depth);
    w.line("out out_albedo : vector_4f as 0;");
    w.line("out out_normal : vector_2f as 1;");
    w.line("out out_specular : vector_4f as 2;");
    w.line("out out_eye_depth : float as 3;");
    w.line("out depth out_depth : float;");

    framing::begin_values(&mut w);
    material_emit::position_values(&mut w);
    material_emit::regular_values(&mut w, &surface);
    if case.emissive.is_none() {
        w.line("value g_albedo = new vector_4f (surface [x y z], 0.0);");
    } else {
        w.line("value g_albedo = new vector_4f (surface [x y z], emission);");
    }
    w.line("value g_normal = Normals.compress (n);");
    if case.specular.is_none() {
        w.line("value g_specular = new vector_4f (0.0, 0.0, 0.0, 0.0);");
    } else {
        w.line(format!(
            "value g_specular = new vector_4f (specular, F.divide (specular_exponent, {SPECULAR_EXPONENT_SCALE}));"
        ));
    }
    material_emit::depth_discard(&mut w, &case.depth);

    framing::begin_outputs(&mut w);
    w.line("out out_albedo = g_albedo;");
    w.line("out out_normal = g_normal;");
    w.line("out out_specular = g_specular;");
    w.line("out out_eye_depth = f_position_eye [z];");
    w.line("out out_depth = Standard.depth (f_position_clip);");

    framing::end_module(&mut w, framing::surface_vertex_stage(&case.normal));
    w.finish()
}

pub(crate) fn light(header: &ModuleHeader<'_>, light: &LightCase) -> String {
    // The G-buffer always carries a specular term; surfaces without one stored zero.
    let terms = LightTerms::new(light, true, true);
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    w.line("in f_position_clip : vector_4f;");
    w.line("parameter t_map_albedo : sampler_2d;");
    w.line("parameter t_map_normal : sampler_2d;");
    w.line("parameter t_map_specular : sampler_2d;");
    w.line("parameter t_map_eye_depth : sampler_2d;");
    w.line("parameter p_viewport : Viewport.t;");
    w.line("parameter m_projection_inverse : matrix_4x4f;");
    light_emit::light_decls(&mut w, light);
    w.line("out out_0 : vector_4f as 0;");

    framing::begin_values(&mut w);
    w.line("value screen_uv = Viewport.screen_uv (p_viewport, f_position_clip);");
    w.line("value g_albedo = S.texture (t_map_albedo, screen_uv);");
    w.line("value g_specular = S.texture (t_map_specular, screen_uv);");
    w.line("value n = Normals.decompress (S.texture (t_map_normal, screen_uv) [x y]);");
    w.line("value eye_depth = S.texture (t_map_eye_depth, screen_uv) [x];");
    w.line(
        "value position_eye = Reconstruction.eye_position (m_projection_inverse, screen_uv, eye_depth);",
    );
    w.line("value specular = g_specular [x y z];");
    w.line(format!(
        "value specular_exponent = F.multiply (g_specular [w], {SPECULAR_EXPONENT_SCALE});"
    ));
    light_emit::light_values(&mut w, light, terms);
    w.line("value lit_diffuse = V3.multiply (g_albedo [x y z], light_diffuse);");
    if terms.specular {
        w.line("value lit = V3.add (lit_diffuse, light_specular);");
    } else {
        w.line("value lit = lit_diffuse;");
    }
    w.line("value rgba = new vector_4f (lit, 1.0);");

    framing::begin_outputs(&mut w);
    w.line("out out_0 = rgba;");

    framing::end_module(&mut w, framing::light_vertex_stage(light));
    w.finish()
}

/// Fullscreen pass adding the emission stored in the albedo target's alpha.
pub(crate) fn emission(header: &ModuleHeader<'_>) -> String {
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    w.line("in f_position_clip : vector_4f;");
    w.line("parameter t_map_albedo : sampler_2d;");
    w.line("parameter p_viewport : Viewport.t;");
    w.line("out out_0 : vector_4f as 0;");

    framing::begin_values(&mut w);
    w.line("value screen_uv = Viewport.screen_uv (p_viewport, f_position_clip);");
    w.line("value g_albedo = S.texture (t_map_albedo, screen_uv);");
    w.line("value emission = g_albedo [w];");
    w.line("value lit_emission = V3.multiply_scalar (g_albedo [x y z], emission);");
    w.line("value rgba = new vector_4f (lit_emission, 1.0);");

    framing::begin_outputs(&mut w);
    w.line("out out_0 = rgba;");

    framing::end_module(&mut w, framing::FULLSCREEN_VERTEX_STAGE);
    w.finish()
}
