use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{info, warn};

use super::data_service::{infer_verb, write_services, ServiceSettings};
use super::entity::write_entities;
use super::naming::{service_name, unique_name};
use super::templates::write_index;
use super::INDEX_NAME;
use crate::config::{absolute_path, Options};
use crate::graph::{ModelSet, ResolvedEndpoint, TypeGraph, TypeMapper};
use crate::model::{MetadataModel, TypeId};

/// Summary of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Absolute source directory that was scanned
    pub source: PathBuf,
    /// Absolute output directory
    pub destination: PathBuf,
    pub endpoints: usize,
    /// Names of the generated model definitions
    pub models: Vec<String>,
    /// Names of the generated data services
    pub services: Vec<String>,
    /// Stale files removed from the output directory
    pub removed: Vec<String>,
    pub elapsed: Duration,
}

/// Unique output names for every model and every endpoint's service.
#[derive(Debug, Default)]
pub struct OutputNames {
    pub models: HashMap<TypeId, String>,
    pub services: HashMap<TypeId, String>,
}

impl OutputNames {
    /// Models are named first, in closure order, then services in endpoint
    /// order. `index` is always reserved.
    pub fn assign(models: &ModelSet, endpoints: &[ResolvedEndpoint], with_services: bool) -> Self {
        let mut seen = HashSet::new();
        seen.insert(INDEX_NAME.to_string());
        let mut names = OutputNames::default();
        for id in models {
            names
                .models
                .insert(id.clone(), unique_name(&mut seen, id.simple_name()));
        }
        if with_services {
            for endpoint in endpoints {
                let service = service_name(endpoint.id.simple_name());
                names
                    .services
                    .insert(endpoint.id.clone(), unique_name(&mut seen, &service));
            }
        }
        names
    }
}

/// Run a full generation: load, resolve, render, index and clean up.
///
/// # Errors
///
/// Returns an error if the source cannot be loaded, the destination cannot be
/// created, or any file cannot be written or removed.
pub fn generate(options: &Options) -> anyhow::Result<GenerationReport> {
    let started = Instant::now();
    let source = absolute_path(&options.source).context("Failed to resolve source path")?;
    let destination =
        absolute_path(&options.destination).context("Failed to resolve destination path")?;

    info!(source = %source.display(), "Scanning for DTO types");
    let model = MetadataModel::load(&source, &options.files)?;
    let graph = TypeGraph::build(&model, &options.endpoint_base_names);
    info!(
        endpoints = graph.endpoints.len(),
        seeds = graph.seeds.len(),
        models = graph.models.len(),
        "Type graph resolved"
    );

    fs::create_dir_all(&destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;

    let api_path = options.api_path.as_deref();
    let names = OutputNames::assign(&graph.models, &graph.endpoints, api_path.is_some());

    let models = write_entities(
        &model,
        &graph.models,
        &names.models,
        &destination,
        options.combine_imports,
    )?;
    let services = match api_path {
        Some(api_path) => write_services(
            &graph.endpoints,
            &names.models,
            &names.services,
            &ServiceSettings {
                api_path,
                http_module: options.http_module,
                combine_imports: options.combine_imports,
            },
            &destination,
        )?,
        None => Vec::new(),
    };

    let mut generated: Vec<String> = models.iter().chain(services.iter()).cloned().collect();
    write_index(&destination, &generated)?;
    generated.push(INDEX_NAME.to_string());
    let removed = remove_non_generated_files(&destination, &generated)?;

    let report = GenerationReport {
        source,
        destination,
        endpoints: graph.endpoints.len(),
        models,
        services,
        removed,
        elapsed: started.elapsed(),
    };
    info!(
        models = report.models.len(),
        services = report.services.len(),
        removed = report.removed.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Generation complete"
    );
    Ok(report)
}

/// Delete every top-level file in `dir` that is not `<name>.ts` for one of
/// `generated` (compared case-insensitively). Subdirectories are left alone.
///
/// Returns the removed file names, sorted.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a file cannot be removed.
pub fn remove_non_generated_files(dir: &Path, generated: &[String]) -> anyhow::Result<Vec<String>> {
    let keep: HashSet<String> = generated
        .iter()
        .map(|name| format!("{name}.ts").to_lowercase())
        .collect();

    let mut removed = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            warn!(path = %path.display(), "Skipping file with a non UTF-8 name");
            continue;
        };
        if keep.contains(&file_name.to_lowercase()) {
            continue;
        }
        fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
        info!(file = %file_name, "Removed stale file");
        removed.push(file_name);
    }
    removed.sort();
    Ok(removed)
}

/// Resolve the type graph without writing anything and describe it.
///
/// # Errors
///
/// Returns an error if the source cannot be loaded.
pub fn inspect(options: &Options) -> anyhow::Result<String> {
    let source = absolute_path(&options.source).context("Failed to resolve source path")?;
    let model = MetadataModel::load(&source, &options.files)?;
    let graph = TypeGraph::build(&model, &options.endpoint_base_names);
    Ok(describe(&graph))
}

fn describe(graph: &TypeGraph) -> String {
    let mapper = TypeMapper::new();
    let mut lines = vec![format!("Endpoints ({}):", graph.endpoints.len())];

    for endpoint in &graph.endpoints {
        lines.push(format!("  {}", endpoint.id));
        for method in &endpoint.methods {
            let params = method
                .parameters
                .iter()
                .filter_map(|p| mapper.map(&p.ty).map(|ty| format!("{}: {ty}", p.name)))
                .collect::<Vec<_>>()
                .join(", ");
            let returns = mapper
                .map(&method.returns)
                .unwrap_or_else(|| "(ignored)".to_string());
            let verb = infer_verb(method).as_client_method().to_uppercase();
            lines.push(format!("    {verb} {}({params}): {returns}", method.name));
        }
    }

    lines.push(format!("Models ({}):", graph.models.len()));
    for id in &graph.models {
        let marker = if graph.seeds.contains(id) { "*" } else { " " };
        lines.push(format!("  {marker} {id}"));
    }
    lines.join("\n") + "\n"
}
