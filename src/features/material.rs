//! Material sub-feature axes.

use super::{Feature, TextureRef};

fn assert_unit_range(what: &str, v: f32) {
    assert!(
        (0.0..=1.0).contains(&v),
        "{what} must be within [0, 1], got {v}"
    );
}

/// How the base surface color is determined.
#[derive(Debug, Clone, PartialEq)]
pub enum Albedo {
    Untextured {
        color: [f32; 4],
    },
    /// `color` interpolated toward the texture sample by `mix`.
    Textured {
        color: [f32; 4],
        mix: f32,
        texture: TextureRef,
    },
}

impl Albedo {
    pub fn untextured(color: [f32; 4]) -> Self {
        Self::Untextured { color }
    }

    pub fn textured(color: [f32; 4], mix: f32, texture: TextureRef) -> Self {
        assert_unit_range("albedo mix", mix);
        Self::Textured {
            color,
            mix,
            texture,
        }
    }
}

impl Feature for Albedo {
    fn code(&self) -> &'static str {
        match self {
            Self::Untextured { .. } => "AU",
            Self::Textured { .. } => "AT",
        }
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Textured { .. })
    }
}

/// Opacity of translucent materials.
#[derive(Debug, Clone, PartialEq)]
pub enum Alpha {
    Constant { opacity: f32 },
    /// Opacity scaled by `1 - dot(view, normal)`; surfaces facing the viewer
    /// are more transparent than grazing ones.
    OneMinusDot { opacity: f32 },
}

impl Alpha {
    pub fn constant(opacity: f32) -> Self {
        assert_unit_range("opacity", opacity);
        Self::Constant { opacity }
    }

    pub fn one_minus_dot(opacity: f32) -> Self {
        assert_unit_range("opacity", opacity);
        Self::OneMinusDot { opacity }
    }
}

impl Feature for Alpha {
    fn code(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "AlC",
            Self::OneMinusDot { .. } => "AlOMD",
        }
    }
}

/// How opaque materials write depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Depth {
    Constant,
    /// Fragments whose albedo alpha is below `threshold` are discarded.
    Alpha { threshold: f32 },
}

impl Depth {
    pub fn alpha(threshold: f32) -> Self {
        assert_unit_range("alpha depth threshold", threshold);
        Self::Alpha { threshold }
    }

    pub fn discards(&self) -> bool {
        matches!(self, Self::Alpha { .. })
    }
}

impl Feature for Depth {
    fn code(&self) -> &'static str {
        match self {
            Self::Constant => "DC",
            Self::Alpha { .. } => "DA",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Emissive {
    None,
    Constant { level: f32 },
    Mapped { level: f32, texture: TextureRef },
}

impl Emissive {
    pub fn constant(level: f32) -> Self {
        assert_unit_range("emission level", level);
        Self::Constant { level }
    }

    pub fn mapped(level: f32, texture: TextureRef) -> Self {
        assert_unit_range("emission level", level);
        Self::Mapped { level, texture }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl Feature for Emissive {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Constant { .. } => "EC",
            Self::Mapped { .. } => "EM",
        }
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

/// Environment mapping via a cube texture.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    None,
    Reflection {
        mix: f32,
        texture: TextureRef,
    },
    /// Reflection whose mix factor is modulated by the specular map.
    ReflectionMapped {
        mix: f32,
        texture: TextureRef,
    },
}

impl Environment {
    pub fn reflection(mix: f32, texture: TextureRef) -> Self {
        assert_unit_range("environment mix", mix);
        Self::Reflection { mix, texture }
    }

    pub fn reflection_mapped(mix: f32, texture: TextureRef) -> Self {
        assert_unit_range("environment mix", mix);
        Self::ReflectionMapped { mix, texture }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn samples_specular_map(&self) -> bool {
        matches!(self, Self::ReflectionMapped { .. })
    }
}

impl Feature for Environment {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Reflection { .. } => "ER",
            Self::ReflectionMapped { .. } => "ERM",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normal {
    /// Interpolated vertex normals.
    Vertex,
    /// Tangent-space normal map.
    Mapped { texture: TextureRef },
}

impl Normal {
    pub fn mapped(texture: TextureRef) -> Self {
        Self::Mapped { texture }
    }

    /// Tangent-space mapping needs per-vertex tangents and bitangents.
    pub fn requires_tangents(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

impl Feature for Normal {
    fn code(&self) -> &'static str {
        match self {
            Self::Vertex => "NV",
            Self::Mapped { .. } => "NM",
        }
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Specular {
    None,
    Constant {
        color: [f32; 3],
        exponent: f32,
    },
    Mapped {
        color: [f32; 3],
        exponent: f32,
        texture: TextureRef,
    },
}

impl Specular {
    pub fn constant(color: [f32; 3], exponent: f32) -> Self {
        assert!(exponent >= 0.0, "specular exponent must be >= 0, got {exponent}");
        Self::Constant { color, exponent }
    }

    pub fn mapped(color: [f32; 3], exponent: f32, texture: TextureRef) -> Self {
        assert!(exponent >= 0.0, "specular exponent must be >= 0, got {exponent}");
        Self::Mapped {
            color,
            exponent,
            texture,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

impl Feature for Specular {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Constant { .. } => "SC",
            Self::Mapped { .. } => "SM",
        }
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

/// Screen-space refraction of the already rendered scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Refractive {
    /// Offsets derived from the surface normal.
    UnmaskedNormals { scale: f32 },
    /// As `UnmaskedNormals`, restricted by the refraction mask.
    MaskedNormals { scale: f32 },
    /// Offsets read from a delta texture.
    UnmaskedDelta { scale: f32, texture: TextureRef },
    MaskedDelta { scale: f32, texture: TextureRef },
}

impl Refractive {
    pub fn is_masked(&self) -> bool {
        matches!(self, Self::MaskedNormals { .. } | Self::MaskedDelta { .. })
    }

    pub fn uses_delta(&self) -> bool {
        matches!(self, Self::UnmaskedDelta { .. } | Self::MaskedDelta { .. })
    }
}

impl Feature for Refractive {
    fn code(&self) -> &'static str {
        match self {
            Self::UnmaskedNormals { .. } => "RUN",
            Self::MaskedNormals { .. } => "RMN",
            Self::UnmaskedDelta { .. } => "RUD",
            Self::MaskedDelta { .. } => "RMD",
        }
    }

    fn requires_uv(&self) -> bool {
        self.uses_delta()
    }
}
