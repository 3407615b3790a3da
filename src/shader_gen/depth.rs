//! Shadow map depth programs.

use super::{
    framing::{self, ModuleHeader},
    material_emit,
    writer::SourceWriter,
};
use crate::cases::DepthCase;
use crate::features::ShadowMap;

pub(crate) fn shadow_depth(header: &ModuleHeader<'_>, case: &DepthCase) -> String {
    let discards = case.depth.discards();
    let mut w = SourceWriter::new();
    framing::begin_module(&mut w, header);

    material_emit::surface_inputs(&mut w, case.requires_uv());
    if discards {
        material_emit::albedo_decls(&mut w, &case.albedo);
    }
    material_emit::depth_decls(&mut w, &case.depth);
    match case.shadow {
        ShadowMap::Basic => {}
        ShadowMap::Variance => {
            w.line("out out_0 : vector_2f as 0;");
        }
    }
    w.line("out depth out_depth : float;");

    framing::begin_values(&mut w);
    if discards {
        material_emit::albedo_values(&mut w, &case.albedo);
    }
    w.line("value fragment_depth = Standard.depth (f_position_clip);");
    match case.shadow {
        ShadowMap::Basic => {}
        ShadowMap::Variance => {
            w.line("value moments = ShadowVariance.moments (fragment_depth);");
        }
    }
    material_emit::depth_discard(&mut w, &case.depth);

    framing::begin_outputs(&mut w);
    match case.shadow {
        ShadowMap::Basic => {}
        ShadowMap::Variance => {
            w.line("out out_0 = moments;");
        }
    }
    w.line("out out_depth = fragment_depth;");

    framing::end_module(&mut w, "Standard.standard");
    w.finish()
}
