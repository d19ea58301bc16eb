use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use askama::Template;
use tracing::debug;

/// One `name: type;` member of a generated interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyLine {
    pub name: String,
    pub ty: String,
}

/// One `Name = value,` member of a generated enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// One method of a generated data service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMethod {
    pub name: String,
    /// Parameter list, e.g. `id: number, order: Order`
    pub signature: String,
    pub returns: String,
    /// Statements of the method body, without indentation
    pub body: Vec<String>,
}

/// Template data for an entity interface
#[derive(Template)]
#[template(path = "entity.ts.txt", escape = "none")]
pub struct EntityTemplateData {
    pub imports: Vec<String>,
    pub name: String,
    /// ` extends Base`, or empty
    pub extends: String,
    pub properties: Vec<PropertyLine>,
}

/// Template data for an entity enum
#[derive(Template)]
#[template(path = "enum.ts.txt", escape = "none")]
pub struct EnumTemplateData {
    pub name: String,
    pub values: Vec<EnumMember>,
}

/// Template data for `index.ts`
#[derive(Template)]
#[template(path = "index.ts.txt", escape = "none")]
pub struct IndexTemplateData {
    pub exports: Vec<String>,
}

/// Template data for an Angular data service
#[derive(Template)]
#[template(path = "data_service.ts.txt", escape = "none")]
pub struct DataServiceTemplateData {
    pub imports: Vec<String>,
    pub name: String,
    /// Injected client type (`Http` or `HttpClient`)
    pub http_type: &'static str,
    pub methods: Vec<ServiceMethod>,
}

/// Import statements for the models a file references.
///
/// Each model comes from its own file, or all of them from the generated
/// index when `combine_imports` is set.
pub fn import_lines(referenced: &BTreeSet<String>, combine_imports: bool) -> Vec<String> {
    if referenced.is_empty() {
        return Vec::new();
    }
    if combine_imports {
        let names: Vec<&str> = referenced.iter().map(String::as_str).collect();
        return vec![format!(
            "import {{ {} }} from './{}';",
            names.join(", "),
            super::INDEX_NAME
        )];
    }
    referenced
        .iter()
        .map(|name| format!("import {{ {name} }} from './{name}';"))
        .collect()
}

/// Render a template into `<dir>/<name>.ts`.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_ts_file(dir: &Path, name: &str, template: &impl Template) -> anyhow::Result<()> {
    let path = dir.join(format!("{name}.ts"));
    let rendered = template
        .render()
        .with_context(|| format!("Failed to render {name}.ts"))?;
    fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Generated file");
    Ok(())
}

/// Write `index.ts` re-exporting every generated file.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_index(dir: &Path, exports: &[String]) -> anyhow::Result<()> {
    let mut exports = exports.to_vec();
    exports.sort_by_key(|name| name.to_lowercase());
    write_ts_file(dir, super::INDEX_NAME, &IndexTemplateData { exports })
}
