//! # Generation Options
//!
//! [`Options`] is everything a generation run needs. It is built either from
//! command-line arguments or from a settings file:
//!
//! ```json
//! {
//!   "source": "./bin",
//!   "destination": "../app/models/generated",
//!   "files": ["*.client.json"],
//!   "endpoint_base_names": ["ApiController"],
//!   "api_path": "api",
//!   "http_module": "HttpClient",
//!   "combine_imports": true
//! }
//! ```
//!
//! YAML (`.yaml`/`.yml`) and TOML (`.toml`) settings files use the same keys.

mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::graph::DEFAULT_ENDPOINT_BASE;

/// Default source directory
pub const DEFAULT_SOURCE: &str = "./";
/// Default output directory
pub const DEFAULT_DESTINATION: &str = "../models/generated";
/// Default module file patterns
pub const DEFAULT_FILES: [&str; 3] = ["*.client.json", "*.client.yaml", "*.client.yml"];

/// Angular module the generated data services are written against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpModule {
    /// Legacy `@angular/http`
    #[default]
    Http,
    /// `@angular/common/http`
    HttpClient,
}

impl HttpModule {
    /// Parse a settings value; the `...Module` spellings are accepted too.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim() {
            "Http" | "HttpModule" => Ok(HttpModule::Http),
            "HttpClient" | "HttpClientModule" => Ok(HttpModule::HttpClient),
            other => Err(ConfigError::InvalidHttpModule(other.to_string())),
        }
    }
}

/// Validated options for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Directory holding the module files
    pub source: PathBuf,
    /// Directory receiving the generated files
    pub destination: PathBuf,
    /// Glob patterns, relative to `source`, selecting module files
    pub files: Vec<String>,
    /// Simple names of endpoint base types
    pub endpoint_base_names: Vec<String>,
    /// Prefix of API calls; no data services are generated without it
    pub api_path: Option<String>,
    pub http_module: HttpModule,
    /// Import models from the generated index instead of their own files
    pub combine_imports: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            files: default_files(),
            endpoint_base_names: vec![DEFAULT_ENDPOINT_BASE.to_string()],
            api_path: None,
            http_module: HttpModule::Http,
            combine_imports: false,
        }
    }
}

fn default_files() -> Vec<String> {
    DEFAULT_FILES.iter().map(|f| f.to_string()).collect()
}

/// Raw settings file contents before validation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    source: Option<String>,
    destination: Option<String>,
    files: Vec<String>,
    endpoint_base_names: Vec<String>,
    api_path: Option<String>,
    http_module: Option<String>,
    combine_imports: bool,
}

impl Options {
    /// Read and validate a JSON, YAML or TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is missing or unparsable, if
    /// `source` or `destination` is blank, or if `http_module` is unknown.
    pub fn from_settings_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::SettingsNotFound(path.to_path_buf()));
        }
        let invalid = |reason: String| ConfigError::InvalidSettings {
            path: path.to_path_buf(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let settings: Settings = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            _ => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        };
        Self::from_settings(settings)
    }

    fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let source = non_blank(settings.source).ok_or(ConfigError::EmptySource)?;
        let destination = non_blank(settings.destination).ok_or(ConfigError::EmptyDestination)?;
        let http_module = match non_blank(settings.http_module) {
            Some(value) => HttpModule::parse(&value)?,
            None => HttpModule::default(),
        };
        let defaults = Options::default();
        Ok(Options {
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
            files: or_default(settings.files, defaults.files),
            endpoint_base_names: or_default(settings.endpoint_base_names, defaults.endpoint_base_names),
            api_path: non_blank(settings.api_path),
            http_module,
            combine_imports: settings.combine_imports,
        })
    }

    /// Validate options assembled outside a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySource`] or [`ConfigError::EmptyDestination`].
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.source.as_os_str().is_empty() {
            return Err(ConfigError::EmptySource);
        }
        if self.destination.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDestination);
        }
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_default(values: Vec<String>, default: Vec<String>) -> Vec<String> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        default
    } else {
        values
    }
}

/// `path` made absolute against the current directory.
///
/// # Errors
///
/// Fails only when the current directory cannot be determined.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
