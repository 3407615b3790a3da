//! Module, shader and program framing shared by every family.

use super::{ShaderFamily, writer::SourceWriter};
use crate::features::{LightCase, LightKind, Normal};

/// Imports emitted verbatim at the top of every module.
pub const STANDARD_IMPORTS: &[&str] = &[
    "import parasol.Float as F;",
    "import parasol.Matrix3x3f as M3;",
    "import parasol.Matrix4x4f as M4;",
    "import parasol.Sampler2D as S;",
    "import parasol.SamplerCube as SC;",
    "import parasol.Vector2f as V2;",
    "import parasol.Vector3f as V3;",
    "import parasol.Vector4f as V4;",
    "",
    "import r1.core.Albedo;",
    "import r1.core.DirectionalLight;",
    "import r1.core.Emission;",
    "import r1.core.Environment;",
    "import r1.core.Light;",
    "import r1.core.Normals;",
    "import r1.core.ProjectiveLight;",
    "import r1.core.Reconstruction;",
    "import r1.core.Refraction;",
    "import r1.core.ShadowBasic;",
    "import r1.core.ShadowVariance;",
    "import r1.core.Specular;",
    "import r1.core.SphericalLight;",
    "import r1.core.Standard;",
    "import r1.core.Viewport;",
];

pub(crate) struct ModuleHeader<'a> {
    pub family: ShaderFamily,
    pub package: &'a str,
    pub name: &'a str,
}

pub(crate) fn begin_module(w: &mut SourceWriter, header: &ModuleHeader<'_>) {
    w.line(format!("-- {} {}", header.family, header.name));
    w.line("-- Generated by r1-shadergen. Do not edit.");
    w.blank();
    w.line(format!("package {};", header.package));
    w.blank();
    w.line(format!("module {} is", header.name));
    w.indent();
    w.blank();
    for import in STANDARD_IMPORTS {
        if import.is_empty() {
            w.blank();
        } else {
            w.line(import);
        }
    }
    w.blank();
    w.line("shader fragment f is");
    w.indent();
}

/// Closes the declaration section and opens the value section.
pub(crate) fn begin_values(w: &mut SourceWriter) {
    w.dedent();
    w.line("with");
    w.indent();
}

pub(crate) fn begin_outputs(w: &mut SourceWriter) {
    w.dedent();
    w.line("as");
    w.indent();
}

/// Closes the fragment shader, binds it to `vertex` in program `p` and closes
/// the module.
pub(crate) fn end_module(w: &mut SourceWriter, vertex: &str) {
    w.dedent();
    w.line("end;");
    w.blank();
    w.line("shader program p is");
    w.indent();
    w.line(format!("vertex {vertex};"));
    w.line("fragment f;");
    w.dedent();
    w.line("end;");
    w.dedent();
    w.blank();
    w.line("end;");
}

/// Vertex stage for surface programs: tangent-space normal mapping needs the
/// stage that forwards tangents and bitangents.
pub(crate) fn surface_vertex_stage(normal: &Normal) -> &'static str {
    match normal {
        Normal::Vertex => "Standard.standard",
        Normal::Mapped { .. } => "Standard.standard_NorM",
    }
}

pub(crate) const FULLSCREEN_VERTEX_STAGE: &str = "Standard.fullscreen";

/// Directional lights cover the screen; the others are drawn as volumes.
pub(crate) fn light_vertex_stage(light: &LightCase) -> &'static str {
    match light.kind {
        LightKind::Directional => FULLSCREEN_VERTEX_STAGE,
        LightKind::Spherical | LightKind::Projective { .. } => "Standard.light_volume",
    }
}
