use std::fmt;
use std::path::PathBuf;

/// Invalid or unreadable generation settings.
///
/// Reported before any module is loaded; the CLI maps it to exit status 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The settings file does not exist
    SettingsNotFound(PathBuf),
    /// The settings file exists but could not be read or parsed
    InvalidSettings {
        path: PathBuf,
        reason: String,
    },
    /// `source` is missing or blank
    EmptySource,
    /// `destination` is missing or blank
    EmptyDestination,
    /// `http_module` names neither supported Angular module
    InvalidHttpModule(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SettingsNotFound(path) => {
                write!(f, "Settings file {} does not exist.", path.display())
            }
            ConfigError::InvalidSettings { path, reason } => {
                write!(f, "Settings file {} is invalid: {reason}", path.display())
            }
            ConfigError::EmptySource => write!(f, "Source is null or empty in options."),
            ConfigError::EmptyDestination => write!(f, "Destination is null or empty in options."),
            ConfigError::InvalidHttpModule(value) => write!(
                f,
                "HttpModule must be one of Http or HttpClient (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
