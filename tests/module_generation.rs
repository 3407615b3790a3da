use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use r1_shadergen::{
    cases::{self, CaseCatalog, MaterialCase, OpaqueRegular, StandardRules},
    config::GenerationConfig,
    features::{
        Albedo, Depth, Emissive, Environment, LightCase, LightContribution, LightKind, Normal,
        ShadowMap, Specular, TextureRef,
    },
    naming::{Packaging, module_name},
    output,
    shader_gen::{ShaderCase, ShaderFamily, ShaderModule, shader_cases, synthesize},
    validation::validate_module_text_with_context,
};

fn all_modules() -> Vec<ShaderModule> {
    output::generate_modules(
        &CaseCatalog::standard(),
        &StandardRules,
        &GenerationConfig::default(),
    )
}

#[test]
fn every_module_passes_structural_validation() {
    let modules = all_modules();
    for module in &modules {
        let outline = validate_module_text_with_context(&module.source, &module.qualified_name())
            .unwrap_or_else(|e| panic!("{e:#}"));
        assert_eq!(outline.module, module.name);
        assert_eq!(outline.package, module.package);
    }
}

#[test]
fn generation_is_deterministic() {
    let a = all_modules();
    let b = all_modules();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.qualified_name(), y.qualified_name());
        assert_eq!(x.source, y.source);
    }
}

#[test]
fn family_sizes() {
    let modules = all_modules();
    let mut per_family: BTreeMap<ShaderFamily, usize> = BTreeMap::new();
    for m in &modules {
        *per_family.entry(m.family).or_default() += 1;
    }
    assert_eq!(per_family[&ShaderFamily::ForwardUnlit], 168 + 168);
    // Light passes for both shapes, plus one emission pass per emissive
    // translucent material.
    assert_eq!(per_family[&ShaderFamily::ForwardLit], 10 * 168 + 112 + 10 * 8);
    assert_eq!(per_family[&ShaderFamily::ForwardRefractive], 8);
    assert_eq!(per_family[&ShaderFamily::DeferredGeometry], 168);
    assert_eq!(per_family[&ShaderFamily::DeferredLight], 10 + 1);
    assert_eq!(per_family[&ShaderFamily::ShadowDepth], 8);
}

#[test]
fn module_names_are_unique_within_a_family() {
    let modules = all_modules();
    let mut seen = HashSet::new();
    for m in &modules {
        assert!(
            seen.insert(m.qualified_name()),
            "duplicate module {}",
            m.qualified_name()
        );
    }
}

#[test]
fn validator_rejects_mapped_reflection_without_specular_map() {
    let catalog = CaseCatalog::standard();
    let opaque = cases::opaque_regular(&catalog, &StandardRules);
    let translucent = cases::translucent_regular(&catalog, &StandardRules);

    let raw = catalog.albedo.len()
        * catalog.depth.len()
        * catalog.emissive.len()
        * catalog.environment.len()
        * catalog.normal.len()
        * catalog.specular.len();
    assert_eq!(raw, 216);
    assert_eq!(opaque.len(), 168);
    assert!(opaque.len() <= raw);

    let bad = |env: &Environment, spec: &Specular| {
        matches!(env, Environment::ReflectionMapped { .. }) && !spec.is_mapped()
    };
    assert!(!opaque.iter().any(|c| bad(&c.environment, &c.specular)));
    assert!(!translucent.iter().any(|c| bad(&c.environment, &c.specular)));
    assert!(opaque.iter().any(|c| c.code().ends_with("_ERM_NV_SM")));
}

#[test]
fn every_light_pairs_with_every_material() {
    let catalog = CaseCatalog::standard();
    let materials = cases::translucent_regular(&catalog, &StandardRules);
    let pairs = cases::lit_pairs(&catalog.lights, &materials);
    assert_eq!(pairs.len(), catalog.lights.len() * materials.len());

    let names: HashSet<String> = pairs.iter().map(|p| p.code()).collect();
    assert_eq!(names.len(), pairs.len());
    assert!(pairs[0].code().starts_with("LD_"));
    assert_eq!(pairs[0].material, materials[0]);
}

#[test]
fn normal_is_declared_and_bound_before_its_readers() {
    let modules = all_modules();
    let mut checked = 0;
    for m in modules.iter().filter(|m| {
        matches!(
            m.family,
            ShaderFamily::ForwardUnlit
                | ShaderFamily::ForwardLit
                | ShaderFamily::ForwardRefractive
                | ShaderFamily::DeferredGeometry
        )
    }) {
        let decl = m
            .source
            .find("in f_normal_")
            .unwrap_or_else(|| panic!("{} has no normal input", m.qualified_name()));
        let bound = m
            .source
            .find("value n =")
            .unwrap_or_else(|| panic!("{} never binds the normal", m.qualified_name()));
        for later in [
            "parameter p_specular",
            "parameter p_environment",
            "parameter p_light",
            "parameter p_refraction",
        ] {
            if let Some(pos) = m.source.find(later) {
                assert!(decl < pos, "{}: `{later}` before normal", m.qualified_name());
                checked += 1;
            }
        }
        for reader in [
            "value env =",
            "value opacity = F.multiply",
            "value light_vectors =",
            "value rgba = Refraction.normals",
        ] {
            if let Some(pos) = m.source.find(reader) {
                assert!(bound < pos, "{}: `{reader}` before `n`", m.qualified_name());
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn light_passes_never_add_emission() {
    let modules = all_modules();
    let light_passes: Vec<_> = modules
        .iter()
        .filter(|m| {
            (m.family == ShaderFamily::ForwardLit && m.name.starts_with('L'))
                || (m.family == ShaderFamily::DeferredLight && m.name != "Emission")
        })
        .collect();
    assert_eq!(light_passes.len(), 10 * 168 + 10 * 8 + 10);
    for m in light_passes {
        assert!(
            !m.source.contains("emission"),
            "{} reads emission",
            m.qualified_name()
        );
    }
}

#[test]
fn emission_is_added_once_per_emissive_material() {
    let catalog = CaseCatalog::standard();
    let modules = all_modules();
    let emissive: Vec<_> = cases::translucent_regular(&catalog, &StandardRules)
        .into_iter()
        .filter(|c| !c.emissive.is_none())
        .collect();

    let forward: Vec<_> = modules
        .iter()
        .filter(|m| m.family == ShaderFamily::ForwardLit && m.source.contains("value emission"))
        .collect();
    assert_eq!(forward.len(), emissive.len());
    for (module, material) in forward.iter().zip(&emissive) {
        assert_eq!(module.name, material.code());
        assert!(module.source.contains("value lit_emission"));
    }

    let deferred: Vec<_> = modules
        .iter()
        .filter(|m| m.family == ShaderFamily::DeferredLight && m.source.contains("lit_emission"))
        .collect();
    assert_eq!(deferred.len(), 1);
    assert!(deferred[0].source.contains("vertex Standard.fullscreen;"));
}

#[test]
fn unlit_programs_bind_only_what_they_read() {
    let modules = all_modules();
    for m in modules.iter().filter(|m| m.family == ShaderFamily::ForwardUnlit) {
        assert!(!m.source.contains("emission"), "{}", m.qualified_name());
        assert!(!m.source.contains("specular_exponent"), "{}", m.qualified_name());
        assert_eq!(
            m.source.contains("value specular ="),
            m.name.contains("_ERM_"),
            "{}",
            m.qualified_name()
        );
    }
}

#[test]
fn deferred_geometry_writes_four_targets_and_depth() {
    let modules = all_modules();
    let packaging = Packaging::default();
    for m in modules.iter().filter(|m| m.family == ShaderFamily::DeferredGeometry) {
        assert_eq!(m.package, packaging.package_name(ShaderFamily::DeferredGeometry));
        let outline = validate_module_text_with_context(&m.source, &m.name).unwrap();
        let colour: Vec<_> = outline
            .fragment
            .outputs
            .iter()
            .filter_map(|o| o.location)
            .collect();
        assert_eq!(colour, vec![0, 1, 2, 3]);
        assert!(outline.fragment.outputs.iter().any(|o| o.location.is_none()));
    }
}

#[test]
fn only_alpha_depth_cases_discard() {
    let catalog = CaseCatalog::standard();
    let packaging = Packaging::default();
    for case in shader_cases(&catalog, &StandardRules, &[ShaderFamily::ShadowDepth]) {
        let ShaderCase::ShadowDepth(depth) = &case else {
            panic!("unexpected case {case:?}");
        };
        let module = synthesize(&case, &packaging);
        let outline = validate_module_text_with_context(&module.source, &module.name).unwrap();
        assert_eq!(outline.fragment.discards == 1, depth.depth.discards());
        let variance = depth.shadow == ShadowMap::Variance;
        assert_eq!(outline.fragment.outputs.len(), if variance { 2 } else { 1 });
    }
}

#[test]
fn mesh_requirements_follow_features() {
    let catalog = CaseCatalog::standard();
    let packaging = Packaging::default();
    let cases = shader_cases(&catalog, &StandardRules, &[ShaderFamily::DeferredGeometry]);
    for case in &cases {
        let ShaderCase::DeferredGeometry(material) = case else {
            unreachable!()
        };
        let module = synthesize(case, &packaging);
        assert_eq!(module.requirements.uv, material.requires_uv());
        assert_eq!(
            module.requirements.tangents,
            matches!(material.normal, Normal::Mapped { .. })
        );
        assert_eq!(module.source.contains("in f_uv :"), material.requires_uv());
    }
}

#[test]
fn diffuse_only_lights_never_bind_specular() {
    let catalog = CaseCatalog::standard();
    let packaging = Packaging::default();
    let diffuse_only: Vec<LightCase> = catalog
        .lights
        .iter()
        .copied()
        .filter(LightCase::is_diffuse_only)
        .collect();
    assert_eq!(diffuse_only.len(), 5);

    for light in diffuse_only {
        let module = synthesize(&ShaderCase::DeferredLight(light), &packaging);
        assert!(module.name.ends_with("DO"));
        assert!(!module.source.contains("value light_specular"));
    }
    let shadowed = LightCase::new(
        LightKind::Projective {
            shadow: Some(ShadowMap::Basic),
        },
        LightContribution::Regular,
    );
    let module = synthesize(&ShaderCase::DeferredLight(shadowed), &packaging);
    assert_eq!(module.name, "LPSMB");
    assert!(module.source.contains("value light_specular"));
    assert!(module.source.contains("ShadowBasic.factor"));
}

fn unit() -> impl Strategy<Value = f32> {
    0.0f32..=1.0
}

fn rgba() -> impl Strategy<Value = [f32; 4]> {
    [unit(), unit(), unit(), unit()]
}

fn rgb() -> impl Strategy<Value = [f32; 3]> {
    [unit(), unit(), unit()]
}

fn texture() -> impl Strategy<Value = TextureRef> {
    "[a-z]{1,12}".prop_map(TextureRef::new)
}

fn opaque_payload() -> impl Strategy<Value = (OpaqueRegular, OpaqueRegular)> {
    (
        rgba(),
        unit(),
        unit(),
        unit(),
        rgb(),
        0.0f32..256.0,
        texture(),
        texture(),
    )
        .prop_map(|(color, mix, level, threshold, spec, exponent, t0, t1)| {
            let reference = OpaqueRegular {
                albedo: Albedo::textured([1.0; 4], 1.0, TextureRef::new("albedo")),
                depth: Depth::alpha(0.5),
                emissive: Emissive::mapped(1.0, TextureRef::new("emissive")),
                environment: Environment::reflection_mapped(0.5, TextureRef::new("env")),
                normal: Normal::mapped(TextureRef::new("normal")),
                specular: Specular::mapped([1.0; 3], 64.0, TextureRef::new("specular")),
            };
            let varied = OpaqueRegular {
                albedo: Albedo::textured(color, mix, t0.clone()),
                depth: Depth::alpha(threshold),
                emissive: Emissive::mapped(level, t1.clone()),
                environment: Environment::reflection_mapped(mix, t1),
                normal: Normal::mapped(t0.clone()),
                specular: Specular::mapped(spec, exponent, t0),
            };
            (reference, varied)
        })
}

proptest! {
    #[test]
    fn names_and_source_ignore_payload((reference, varied) in opaque_payload()) {
        let packaging = Packaging::default();
        for wrap in [ShaderCase::ForwardUnlitOpaque, ShaderCase::DeferredGeometry] {
            let a = wrap(reference.clone());
            let b = wrap(varied.clone());
            prop_assert_eq!(module_name(&a), module_name(&b));
            prop_assert_eq!(synthesize(&a, &packaging).source, synthesize(&b, &packaging).source);
        }
        prop_assert_eq!(varied.code(), "AT_DA_EM_ERM_NM_SM");
    }
}
