//! Light sub-feature axes.

use std::fmt;

use super::Feature;

/// Shadow mapping technique used by projective lights and shadow-depth programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowMap {
    Basic,
    Variance,
}

impl Feature for ShadowMap {
    fn code(&self) -> &'static str {
        match self {
            Self::Basic => "SMB",
            Self::Variance => "SMV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Directional,
    Spherical,
    Projective { shadow: Option<ShadowMap> },
}

impl LightKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Directional => "LD",
            Self::Spherical => "LS",
            Self::Projective { shadow: None } => "LP",
            Self::Projective {
                shadow: Some(ShadowMap::Basic),
            } => "LPSMB",
            Self::Projective {
                shadow: Some(ShadowMap::Variance),
            } => "LPSMV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightContribution {
    Regular,
    /// The light contributes no specular term.
    DiffuseOnly,
}

/// One light configuration a shader is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightCase {
    pub kind: LightKind,
    pub contribution: LightContribution,
}

impl LightCase {
    pub fn new(kind: LightKind, contribution: LightContribution) -> Self {
        Self { kind, contribution }
    }

    pub fn is_diffuse_only(&self) -> bool {
        self.contribution == LightContribution::DiffuseOnly
    }

    pub fn shadow(&self) -> Option<ShadowMap> {
        match self.kind {
            LightKind::Projective { shadow } => shadow,
            LightKind::Directional | LightKind::Spherical => None,
        }
    }

    /// Feature code, e.g. `LPSMV` or `LDDO`.
    pub fn code(&self) -> String {
        match self.contribution {
            LightContribution::Regular => self.kind.code().to_string(),
            LightContribution::DiffuseOnly => format!("{}DO", self.kind.code()),
        }
    }

    /// Every kind crossed with every contribution, kind outermost.
    pub fn all() -> Vec<LightCase> {
        let kinds = [
            LightKind::Directional,
            LightKind::Spherical,
            LightKind::Projective { shadow: None },
            LightKind::Projective {
                shadow: Some(ShadowMap::Basic),
            },
            LightKind::Projective {
                shadow: Some(ShadowMap::Variance),
            },
        ];
        let contributions = [LightContribution::Regular, LightContribution::DiffuseOnly];

        kinds
            .into_iter()
            .flat_map(|kind| {
                contributions
                    .into_iter()
                    .map(move |contribution| LightCase::new(kind, contribution))
            })
            .collect()
    }
}

impl fmt::Display for LightCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
