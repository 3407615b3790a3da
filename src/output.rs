//! Batch generation and the on-disk shader archive.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::cases::{CaseCatalog, CompatibilityRules};
use crate::config::GenerationConfig;
use crate::naming::Packaging;
use crate::shader_gen::{self, MeshRequirements, ShaderFamily, ShaderModule};
use crate::validation;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Synthesize every module the config asks for. Output order is the case
/// order, independent of thread scheduling.
pub fn generate_modules(
    catalog: &CaseCatalog,
    rules: &impl CompatibilityRules,
    config: &GenerationConfig,
) -> Vec<ShaderModule> {
    let packaging = config.packaging();
    let cases = shader_gen::shader_cases(catalog, rules, &config.families);
    let modules: Vec<ShaderModule> = cases
        .par_iter()
        .map(|case| shader_gen::synthesize(case, &packaging))
        .collect();
    info!(
        "generated {} modules across {} families",
        modules.len(),
        config.families.len()
    );
    modules
}

/// Qualified names key the shader cache and the archive, so a batch must not
/// repeat one. Two catalog variants sharing a feature code produce repeats.
pub fn check_unique_names(modules: &[ShaderModule]) -> Result<()> {
    let mut seen = HashSet::with_capacity(modules.len());
    for module in modules {
        let name = module.qualified_name();
        if !seen.insert(name) {
            bail!(
                "duplicate module {}: two cases share its feature codes",
                module.qualified_name()
            );
        }
    }
    Ok(())
}

/// Run every module through the structural validator.
pub fn validate_modules(modules: &[ShaderModule]) -> Result<()> {
    check_unique_names(modules)?;
    modules.par_iter().try_for_each(|module| {
        validation::validate_module_text_with_context(&module.source, &module.qualified_name())
            .map(|_| ())
    })?;
    info!("validated {} modules", modules.len());
    Ok(())
}

/// Write modules under `dir` at their archive paths. Returns the written
/// paths, relative to `dir`, in module order. Fails before writing anything
/// if two modules share a qualified name.
pub fn write_modules(
    modules: &[ShaderModule],
    dir: &Path,
    packaging: &Packaging,
) -> Result<Vec<PathBuf>> {
    check_unique_names(modules)?;
    let mut written = Vec::with_capacity(modules.len());
    for module in modules {
        let rel = packaging.archive_path(module.family, &module.name);
        let path = dir.join(&rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow!("failed to create {}: {e}", parent.display()))?;
        }
        std::fs::write(&path, &module.source)
            .map_err(|e| anyhow!("failed to write {}: {e}", path.display()))?;
        debug!("wrote {}", path.display());
        written.push(rel);
    }
    info!("wrote {} modules to {}", written.len(), dir.display());
    Ok(written)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub family: ShaderFamily,
    pub package: String,
    pub name: String,
    /// Archive path with `/` separators.
    pub path: String,
    pub requirements: MeshRequirements,
}

/// Contents of `manifest.json`. Keys are camelCase like the config file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub package_prefix: String,
    pub modules: Vec<ManifestEntry>,
}

pub fn build_manifest(modules: &[ShaderModule], packaging: &Packaging) -> Manifest {
    let modules = modules
        .iter()
        .map(|m| {
            let path = packaging
                .archive_path(m.family, &m.name)
                .iter()
                .map(|c| c.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            ManifestEntry {
                family: m.family,
                package: m.package.clone(),
                name: m.name.clone(),
                path,
                requirements: m.requirements,
            }
        })
        .collect();
    Manifest {
        package_prefix: packaging.prefix().to_string(),
        modules,
    }
}

pub fn write_manifest(modules: &[ShaderModule], dir: &Path, packaging: &Packaging) -> Result<PathBuf> {
    check_unique_names(modules)?;
    let manifest = build_manifest(modules, packaging);
    let text = serde_json::to_string_pretty(&manifest)
        .map_err(|e| anyhow!("failed to serialize manifest: {e}"))?;
    std::fs::create_dir_all(dir).map_err(|e| anyhow!("failed to create {}: {e}", dir.display()))?;
    let path = dir.join(MANIFEST_FILE_NAME);
    std::fs::write(&path, text).map_err(|e| anyhow!("failed to write {}: {e}", path.display()))?;
    Ok(path)
}
