use crate::features::{
    Albedo, Alpha, Depth, Emissive, Environment, LightCase, Normal, Refractive, ShadowMap,
    Specular, TextureRef,
};

/// The per-axis variant lists every enumeration draws from.
///
/// Built once by the caller and passed by reference; the enumerator never
/// reaches for global state.
#[derive(Debug, Clone)]
pub struct CaseCatalog {
    pub albedo: Vec<Albedo>,
    pub alpha: Vec<Alpha>,
    pub depth: Vec<Depth>,
    pub emissive: Vec<Emissive>,
    pub environment: Vec<Environment>,
    pub normal: Vec<Normal>,
    pub specular: Vec<Specular>,
    /// Specular axis for specular-only materials, which must have a specular term.
    pub specular_only: Vec<Specular>,
    pub refractive: Vec<Refractive>,
    pub lights: Vec<LightCase>,
    pub shadow_maps: Vec<ShadowMap>,
}

impl CaseCatalog {
    /// One instance of every variant of every axis.
    pub fn standard() -> Self {
        let texture = |name: &str| TextureRef::new(name);
        let white4 = [1.0, 1.0, 1.0, 1.0];
        let white3 = [1.0, 1.0, 1.0];

        Self {
            albedo: vec![
                Albedo::untextured(white4),
                Albedo::textured(white4, 1.0, texture("albedo")),
            ],
            alpha: vec![Alpha::constant(0.5), Alpha::one_minus_dot(1.0)],
            depth: vec![Depth::Constant, Depth::alpha(0.5)],
            emissive: vec![
                Emissive::None,
                Emissive::constant(0.5),
                Emissive::mapped(1.0, texture("emissive")),
            ],
            environment: vec![
                Environment::None,
                Environment::reflection(0.5, texture("environment")),
                Environment::reflection_mapped(0.5, texture("environment")),
            ],
            normal: vec![Normal::Vertex, Normal::mapped(texture("normal"))],
            specular: vec![
                Specular::None,
                Specular::constant(white3, 64.0),
                Specular::mapped(white3, 64.0, texture("specular")),
            ],
            specular_only: vec![
                Specular::constant(white3, 64.0),
                Specular::mapped(white3, 64.0, texture("specular")),
            ],
            refractive: vec![
                Refractive::UnmaskedNormals { scale: 0.05 },
                Refractive::MaskedNormals { scale: 0.05 },
                Refractive::UnmaskedDelta {
                    scale: 0.05,
                    texture: texture("refraction_delta"),
                },
                Refractive::MaskedDelta {
                    scale: 0.05,
                    texture: texture("refraction_delta"),
                },
            ],
            lights: LightCase::all(),
            shadow_maps: vec![ShadowMap::Basic, ShadowMap::Variance],
        }
    }
}

impl Default for CaseCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_sizes() {
        let c = CaseCatalog::standard();
        assert_eq!(c.albedo.len(), 2);
        assert_eq!(c.alpha.len(), 2);
        assert_eq!(c.depth.len(), 2);
        assert_eq!(c.emissive.len(), 3);
        assert_eq!(c.environment.len(), 3);
        assert_eq!(c.normal.len(), 2);
        assert_eq!(c.specular.len(), 3);
        assert_eq!(c.specular_only.len(), 2);
        assert_eq!(c.refractive.len(), 4);
        assert_eq!(c.lights.len(), 10);
        assert_eq!(c.shadow_maps.len(), 2);
    }

    #[test]
    fn specular_only_axis_has_no_none() {
        let c = CaseCatalog::standard();
        assert!(c.specular_only.iter().all(|s| !s.is_none()));
    }
}
