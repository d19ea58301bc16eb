use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::metadata::ModuleDef;
use super::object_model::{MetadataModel, ObjectModel};

/// Extensions tried, in order, when resolving a referenced module by name.
const REFERENCE_EXTENSIONS: [&str; 4] = ["json", "yaml", "yml", "toml"];

/// Parse one module file, choosing the format from its extension.
///
/// `.yaml`/`.yml` are read as YAML, `.toml` as TOML, anything else as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a module.
pub fn load_module_file(path: &Path) -> anyhow::Result<ModuleDef> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read module file {}", path.display()))?;
    let module: ModuleDef = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML module {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML module {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON module {}", path.display()))?,
    };
    if module.name.trim().is_empty() {
        anyhow::bail!("Module file {} does not declare a module name", path.display());
    }
    Ok(module)
}

/// Expand every pattern relative to `source`, de-duplicated and sorted.
fn matching_files(source: &Path, patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let full = source.join(pattern);
        let full = full
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in module pattern {}", full.display()))?;
        let paths = glob::glob(full).with_context(|| format!("Invalid module pattern '{pattern}'"))?;
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Unreadable path while matching modules"),
            }
        }
    }
    Ok(files.into_iter().collect())
}

impl MetadataModel {
    /// Load every module matching `patterns` under `source`.
    ///
    /// Files that cannot be parsed are skipped. Modules referenced by loaded
    /// modules are then looked up by name in `source` (`<name>.json`,
    /// `.yaml`, `.yml`, `.toml`) until no new module appears; references that
    /// cannot be found stay missing and make that module's types unenumerable.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a directory or a pattern is invalid.
    pub fn load(source: &Path, patterns: &[String]) -> anyhow::Result<Self> {
        if !source.is_dir() {
            anyhow::bail!("Module source {} is not a directory", source.display());
        }

        let mut model = MetadataModel::default();
        for path in matching_files(source, patterns)? {
            match load_module_file(&path) {
                Ok(module) => {
                    debug!(module = %module.name, path = %path.display(), "Loaded module");
                    model.insert(module);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping module that failed to load"),
            }
        }

        // Reference fallback: look for dependencies next to the selected modules.
        let mut attempted = BTreeSet::new();
        loop {
            let pending: Vec<String> = model
                .unresolved_references()
                .into_iter()
                .filter(|r| !attempted.contains(r))
                .collect();
            if pending.is_empty() {
                break;
            }
            for reference in pending {
                attempted.insert(reference.clone());
                match resolve_reference(source, &reference) {
                    Some(module) if module.name == reference => {
                        debug!(module = %reference, "Resolved referenced module");
                        model.insert(module);
                    }
                    Some(module) => warn!(
                        reference = %reference,
                        found = %module.name,
                        "Referenced module file declares a different name"
                    ),
                    None => warn!(reference = %reference, "Referenced module could not be resolved"),
                }
            }
        }

        model.refresh_missing();
        info!(modules = model.module_names().len(), source = %source.display(), "Object model loaded");
        Ok(model)
    }
}

fn resolve_reference(source: &Path, reference: &str) -> Option<ModuleDef> {
    REFERENCE_EXTENSIONS
        .iter()
        .map(|ext| source.join(format!("{reference}.{ext}")))
        .find(|candidate| candidate.is_file())
        .and_then(|path| match load_module_file(&path) {
            Ok(module) => Some(module),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Referenced module failed to load");
                None
            }
        })
}
