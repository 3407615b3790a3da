use std::path::PathBuf;

use r1_shadergen::{
    cases::{CaseCatalog, StandardRules},
    config::{GenerationConfig, parse_config},
    output::{self, MANIFEST_FILE_NAME},
    shader_gen::ShaderFamily,
};

#[test]
fn archive_layout_follows_package_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let config = parse_config(
        r#"{ "packagePrefix": "game.fx", "families": ["deferred_light", "forward_refractive"] }"#,
    )
    .unwrap();
    let packaging = config.packaging();
    let modules = output::generate_modules(&CaseCatalog::standard(), &StandardRules, &config);
    output::validate_modules(&modules).unwrap();

    // Canonical order regardless of the order families are listed in.
    assert_eq!(modules[0].family, ShaderFamily::ForwardRefractive);
    assert_eq!(modules.last().unwrap().family, ShaderFamily::DeferredLight);

    let written = output::write_modules(&modules, dir.path(), &packaging).unwrap();
    assert_eq!(written.len(), 8 + 10 + 1);
    for (rel, module) in written.iter().zip(&modules) {
        let expected: PathBuf = module
            .package
            .split('.')
            .collect::<PathBuf>()
            .join(format!("{}.p", module.name));
        assert_eq!(rel, &expected);
        assert!(rel.starts_with("game/fx"));
        let text = std::fs::read_to_string(dir.path().join(rel)).unwrap();
        assert!(text.contains(&format!("package {};", module.package)));
    }

    assert!(dir.path().join("game/fx/deferred/light/LD.p").is_file());
    assert!(dir.path().join("game/fx/deferred/light/LPSMVDO.p").is_file());
    assert!(dir.path().join("game/fx/deferred/light/Emission.p").is_file());
}

#[test]
fn manifest_lists_every_module_with_requirements() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig {
        families: vec![ShaderFamily::DeferredGeometry],
        ..GenerationConfig::default()
    };
    let packaging = config.packaging();
    let modules = output::generate_modules(&CaseCatalog::standard(), &StandardRules, &config);
    let path = output::write_manifest(&modules, dir.path(), &packaging).unwrap();
    assert_eq!(path, dir.path().join(MANIFEST_FILE_NAME));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["packagePrefix"], "r1.shaders");
    assert!(json.get("package_prefix").is_none());
    let entries = json["modules"].as_array().unwrap();
    assert_eq!(entries.len(), 168);

    let first = &entries[0];
    assert_eq!(first["name"], "AU_DC_NV");
    assert_eq!(first["package"], "r1.shaders.deferred.geometry");
    assert_eq!(first["requirements"]["uv"], false);
    assert_eq!(first["requirements"]["tangents"], false);

    let mapped = entries
        .iter()
        .find(|e| e["name"] == "AT_DA_EM_ERM_NM_SM")
        .unwrap();
    assert_eq!(mapped["requirements"]["uv"], true);
    assert_eq!(mapped["requirements"]["tangents"], true);
}
