//! Pairwise compatibility rules between sub-features.
//!
//! A rejected combination is not an error; the enumerator drops it.

use crate::features::{Albedo, Depth, Environment, Specular};

pub trait CompatibilityRules {
    /// Reflection modulated by the specular map needs a specular map.
    fn is_valid_environment_specular(&self, environment: &Environment, specular: &Specular) -> bool {
        !environment.samples_specular_map() || specular.is_mapped()
    }

    /// Every albedo can feed the alpha-depth discard test, so nothing is
    /// rejected here unless a project overrides it.
    fn is_valid_depth_material(&self, _albedo: &Albedo, _depth: &Depth) -> bool {
        true
    }
}

/// The default rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl CompatibilityRules for StandardRules {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TextureRef;

    #[test]
    fn reflection_mapped_requires_mapped_specular() {
        let rules = StandardRules;
        let env = Environment::reflection_mapped(0.5, TextureRef::new("sky"));
        assert!(!rules.is_valid_environment_specular(&env, &Specular::None));
        assert!(!rules.is_valid_environment_specular(&env, &Specular::constant([1.0; 3], 8.0)));
        assert!(rules.is_valid_environment_specular(
            &env,
            &Specular::mapped([1.0; 3], 8.0, TextureRef::new("spec"))
        ));
    }

    #[test]
    fn plain_reflection_accepts_any_specular() {
        let rules = StandardRules;
        let env = Environment::reflection(0.5, TextureRef::new("sky"));
        assert!(rules.is_valid_environment_specular(&env, &Specular::None));
        assert!(rules.is_valid_environment_specular(&Environment::None, &Specular::None));
    }

    #[test]
    fn depth_material_is_permissive() {
        let rules = StandardRules;
        assert!(rules.is_valid_depth_material(&Albedo::untextured([1.0; 4]), &Depth::alpha(0.5)));
        assert!(rules.is_valid_depth_material(&Albedo::untextured([1.0; 4]), &Depth::Constant));
    }
}
