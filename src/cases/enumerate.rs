//! Cross-product enumeration of material shapes.
//!
//! Tuples are produced in nested-loop order, first axis outermost, and
//! filtered through the compatibility rules. Positions in the returned lists
//! are stable for a given catalog.

use itertools::iproduct;
use log::debug;

use super::{
    CaseCatalog, CompatibilityRules, DepthCase, LitCase, OpaqueRegular, TranslucentRefractive,
    TranslucentRegular, TranslucentSpecularOnly,
};
use crate::features::LightCase;

fn require_axis<T>(name: &str, axis: &[T]) {
    assert!(!axis.is_empty(), "case catalog axis `{name}` is empty");
}

pub fn opaque_regular(catalog: &CaseCatalog, rules: &impl CompatibilityRules) -> Vec<OpaqueRegular> {
    require_axis("albedo", &catalog.albedo);
    require_axis("depth", &catalog.depth);
    require_axis("emissive", &catalog.emissive);
    require_axis("environment", &catalog.environment);
    require_axis("normal", &catalog.normal);
    require_axis("specular", &catalog.specular);

    let cases: Vec<OpaqueRegular> = iproduct!(
        catalog.albedo.iter(),
        catalog.depth.iter(),
        catalog.emissive.iter(),
        catalog.environment.iter(),
        catalog.normal.iter(),
        catalog.specular.iter()
    )
    .filter(|(albedo, depth, _, environment, _, specular)| {
        rules.is_valid_depth_material(albedo, depth)
            && rules.is_valid_environment_specular(environment, specular)
    })
    .map(
        |(albedo, depth, emissive, environment, normal, specular)| OpaqueRegular {
            albedo: albedo.clone(),
            depth: depth.clone(),
            emissive: emissive.clone(),
            environment: environment.clone(),
            normal: normal.clone(),
            specular: specular.clone(),
        },
    )
    .collect();

    debug!("enumerated {} opaque regular cases", cases.len());
    cases
}

pub fn translucent_regular(
    catalog: &CaseCatalog,
    rules: &impl CompatibilityRules,
) -> Vec<TranslucentRegular> {
    require_axis("albedo", &catalog.albedo);
    require_axis("alpha", &catalog.alpha);
    require_axis("emissive", &catalog.emissive);
    require_axis("environment", &catalog.environment);
    require_axis("normal", &catalog.normal);
    require_axis("specular", &catalog.specular);

    let cases: Vec<TranslucentRegular> = iproduct!(
        catalog.albedo.iter(),
        catalog.alpha.iter(),
        catalog.emissive.iter(),
        catalog.environment.iter(),
        catalog.normal.iter(),
        catalog.specular.iter()
    )
    .filter(|(_, _, _, environment, _, specular)| {
        rules.is_valid_environment_specular(environment, specular)
    })
    .map(
        |(albedo, alpha, emissive, environment, normal, specular)| TranslucentRegular {
            albedo: albedo.clone(),
            alpha: alpha.clone(),
            emissive: emissive.clone(),
            environment: environment.clone(),
            normal: normal.clone(),
            specular: specular.clone(),
        },
    )
    .collect();

    debug!("enumerated {} translucent regular cases", cases.len());
    cases
}

pub fn translucent_specular_only(catalog: &CaseCatalog) -> Vec<TranslucentSpecularOnly> {
    require_axis("alpha", &catalog.alpha);
    require_axis("normal", &catalog.normal);
    require_axis("specular_only", &catalog.specular_only);

    let cases: Vec<TranslucentSpecularOnly> = iproduct!(
        catalog.alpha.iter(),
        catalog.normal.iter(),
        catalog.specular_only.iter()
    )
    .map(|(alpha, normal, specular)| TranslucentSpecularOnly {
        alpha: alpha.clone(),
        normal: normal.clone(),
        specular: specular.clone(),
    })
    .collect();

    debug!("enumerated {} translucent specular-only cases", cases.len());
    cases
}

pub fn translucent_refractive(catalog: &CaseCatalog) -> Vec<TranslucentRefractive> {
    require_axis("normal", &catalog.normal);
    require_axis("refractive", &catalog.refractive);

    let cases: Vec<TranslucentRefractive> =
        iproduct!(catalog.normal.iter(), catalog.refractive.iter())
            .map(|(normal, refractive)| TranslucentRefractive {
                normal: normal.clone(),
                refractive: refractive.clone(),
            })
            .collect();

    debug!("enumerated {} translucent refractive cases", cases.len());
    cases
}

pub fn depth_cases(catalog: &CaseCatalog, rules: &impl CompatibilityRules) -> Vec<DepthCase> {
    require_axis("albedo", &catalog.albedo);
    require_axis("depth", &catalog.depth);
    require_axis("shadow_maps", &catalog.shadow_maps);

    let cases: Vec<DepthCase> = iproduct!(
        catalog.albedo.iter(),
        catalog.depth.iter(),
        catalog.shadow_maps.iter()
    )
    .filter(|(albedo, depth, _)| rules.is_valid_depth_material(albedo, depth))
    .map(|(albedo, depth, shadow)| DepthCase {
        albedo: albedo.clone(),
        depth: depth.clone(),
        shadow: *shadow,
    })
    .collect();

    debug!("enumerated {} shadow depth cases", cases.len());
    cases
}

/// Every light paired with every material, light outermost. The materials
/// are already validated, so nothing is filtered here.
pub fn lit_pairs<M: Clone>(lights: &[LightCase], materials: &[M]) -> Vec<LitCase<M>> {
    iproduct!(lights.iter(), materials.iter())
        .map(|(light, material)| LitCase {
            light: *light,
            material: material.clone(),
        })
        .collect()
}
