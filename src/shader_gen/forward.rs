//! Forward rendering families: unlit, lit and refractive.
//!
//! Forward programs write one RGBA output; opaque ones also write depth.
//!
//! A lit translucent surface is drawn as one emission pass plus one additive
//! pass per light. Light passes never read the emission term.

use super::{
    framing::{self, ModuleHeader},
    light_emit::{self, LightTerms},
    material_emit::{self, RegularSurface},
    writer::SourceWriter,
};
use crate::cases::{
    LitCase, MaterialCase, OpaqueRegular, TranslucentRefractive, TranslucentRegular,
    TranslucentSpecularOnly,
};

fn output_decls(w: &mut SourceWriter, writes_depth: bool) {
    w.line("out out_0 : vector_4f as 0;");
    if writes_depth {
        w.line("out depth out_depth : float;");
    }
}

fn output_values(w: &mut SourceWriter, writes_depth: bool) {
    w.line("out out_0 = rgba;");
    if writes_depth {
        w.line("out out_depth = Standard.depth (f_position_clip);");
    }
}

/// Nested `V3.add` over `terms`, left to right.
fn sum_v3(terms: &[&str]) -> String {
    let mut iter = terms.iter();
    let Some(first) = iter.next() else {
        return "new vector_3f (0.0, 0.0, 0.0)".to_string();
    };
    iter.fold(first.to_string(), |acc, t| format!("V3.add ({acc}, {t})"))
}

pub(crate) fn unlit_opaque(header: &ModuleHeader<'_>, case: &OpaqueRegular) -> String {
    let surface = RegularSurface::from(case).reading(false, false);
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, case.requires_uv());
    material_emit::regular_decls(&mut w, &surface);
    material_emit::depth_decls(&mut w, &case.depth);
    output_decls(&mut w, true);

    framing::begin_values(&mut w);
    material_emit::position_values(&mut w);
    material_emit::regular_values(&mut w, &surface);
    w.line("value rgba = new vector_4f (surface [x y z], 1.0);");
    material_emit::depth_discard(&mut w, &case.depth);

    framing::begin_outputs(&mut w);
    output_values(&mut w, true);

    framing::end_module(&mut w, framing::surface_vertex_stage(&case.normal));
    w.finish()
}

pub(crate) fn unlit_translucent(header: &ModuleHeader<'_>, case: &TranslucentRegular) -> String {
    let surface = RegularSurface::from(case).reading(false, false);
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, case.requires_uv());
    material_emit::regular_decls(&mut w, &surface);
    material_emit::alpha_decls(&mut w, &case.alpha);
    output_decls(&mut w, false);

    framing::begin_values(&mut w);
    material_emit::position_values(&mut w);
    material_emit::regular_values(&mut w, &surface);
    material_emit::alpha_values(&mut w, &case.alpha);
    w.line("value rgba = new vector_4f (surface [x y z], opacity);");

    framing::begin_outputs(&mut w);
    output_values(&mut w, false);

    framing::end_module(&mut w, framing::surface_vertex_stage(&case.normal));
    w.finish()
}

pub(crate) fn lit_translucent(header: &ModuleHeader<'_>, case: &LitCase<TranslucentRegular>) -> String {
    let material = &case.material;
    let surface = RegularSurface::from(material).reading(false, true);
    let terms = LightTerms::new(&case.light, true, !material.specular.is_none());
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, material.requires_uv());
    material_emit::regular_decls(&mut w, &surface);
    material_emit::alpha_decls(&mut w, &material.alpha);
    light_emit::light_decls(&mut w, &case.light);
    output_decls(&mut w, false);

    framing::begin_values(&mut w);
    material_emit::position_values(&mut w);
    material_emit::regular_values(&mut w, &surface);
    material_emit::alpha_values(&mut w, &material.alpha);
    light_emit::light_values(&mut w, &case.light, terms);

    w.line("value lit_diffuse = V3.multiply (surface [x y z], light_diffuse);");
    let mut lit_terms = vec!["lit_diffuse"];
    if terms.specular {
        lit_terms.push("light_specular");
    }
    w.line(format!("value lit = {};", sum_v3(&lit_terms)));
    w.line("value rgba = new vector_4f (lit, opacity);");

    framing::begin_outputs(&mut w);
    output_values(&mut w, false);

    framing::end_module(&mut w, framing::surface_vertex_stage(&material.normal));
    w.finish()
}

/// Emission pass of an emissive lit translucent surface, drawn once
/// regardless of how many lights reach it.
pub(crate) fn lit_translucent_emission(
    header: &ModuleHeader<'_>,
    case: &TranslucentRegular,
) -> String {
    assert!(
        !case.emissive.is_none(),
        "emission pass generated for a surface without emission"
    );
    let surface = RegularSurface::from(case).reading(true, false);
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, case.requires_uv());
    material_emit::regular_decls(&mut w, &surface);
    material_emit::alpha_decls(&mut w, &case.alpha);
    output_decls(&mut w, false);

    framing::begin_values(&mut w);
    material_emit::position_values(&mut w);
    material_emit::regular_values(&mut w, &surface);
    material_emit::alpha_values(&mut w, &case.alpha);
    w.line("value lit_emission = V3.multiply_scalar (surface [x y z], emission);");
    w.line("value rgba = new vector_4f (lit_emission, opacity);");

    framing::begin_outputs(&mut w);
    output_values(&mut w, false);

    framing::end_module(&mut w, framing::surface_vertex_stage(&case.normal));
    w.finish()
}

pub(crate) fn lit_specular_only(
    header: &ModuleHeader<'_>,
    case: &LitCase<TranslucentSpecularOnly>,
) -> String {
    let material = &case.material;
    let terms = LightTerms::new(&case.light, false, !material.specular.is_none());
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, material.requires_uv());
    material_emit::normal_decls(&mut w, &material.normal);
    material_emit::specular_decls(&mut w, &material.specular);
    material_emit::alpha_decls(&mut w, &material.alpha);
    light_emit::light_decls(&mut w, &case.light);
    output_decls(&mut w, false);

    framing::begin_values(&mut w);
    material_emit::position_values(&mut w);
    material_emit::normal_values(&mut w, &material.normal);
    material_emit::specular_values(&mut w, &material.specular);
    material_emit::alpha_values(&mut w, &material.alpha);
    light_emit::light_values(&mut w, &case.light, terms);
    if terms.specular {
        w.line("value rgba = new vector_4f (light_specular, opacity);");
    } else {
        // A diffuse-only light leaves a specular-only surface unlit.
        w.line("value rgba = new vector_4f (0.0, 0.0, 0.0, 0.0);");
    }

    framing::begin_outputs(&mut w);
    output_values(&mut w, false);

    framing::end_module(&mut w, framing::surface_vertex_stage(&material.normal));
    w.finish()
}

pub(crate) fn refractive(header: &ModuleHeader<'_>, case: &TranslucentRefractive) -> String {
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, case.requires_uv());
    material_emit::normal_decls(&mut w, &case.normal);
    material_emit::refractive_decls(&mut w, &case.refractive);
    output_decls(&mut w, false);

    framing::begin_values(&mut w);
    material_emit::normal_values(&mut w, &case.normal);
    material_emit::refractive_values(&mut w, &case.refractive);

    framing::begin_outputs(&mut w);
    output_values(&mut w, false);

    framing::end_module(&mut w, framing::surface_vertex_stage(&case.normal));
    w.finish()
}
