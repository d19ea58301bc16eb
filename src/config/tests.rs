#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_defaults() {
    let options = Options::default();
    assert_eq!(options.source, PathBuf::from("./"));
    assert_eq!(options.destination, PathBuf::from("../models/generated"));
    assert_eq!(options.files.len(), 3);
    assert_eq!(options.endpoint_base_names, vec!["ApiController"]);
    assert_eq!(options.api_path, None);
    assert_eq!(options.http_module, HttpModule::Http);
    assert!(!options.combine_imports);
}

#[test]
fn test_json_settings_with_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "settings.json",
        r#"{"source": "./bin", "destination": "out", "files": [], "api_path": "api", "http_module": "HttpClientModule", "combine_imports": true}"#,
    );
    let options = Options::from_settings_file(&path).unwrap();
    assert_eq!(options.source, PathBuf::from("./bin"));
    assert_eq!(options.files, Options::default().files);
    assert_eq!(options.endpoint_base_names, vec!["ApiController"]);
    assert_eq!(options.api_path.as_deref(), Some("api"));
    assert_eq!(options.http_module, HttpModule::HttpClient);
    assert!(options.combine_imports);
}

#[test]
fn test_yaml_and_toml_settings() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = write(
        &dir,
        "settings.yaml",
        "source: src\ndestination: dst\nendpoint_base_names: [Controller, ApiController]\n",
    );
    let options = Options::from_settings_file(&yaml).unwrap();
    assert_eq!(options.endpoint_base_names, vec!["Controller", "ApiController"]);
    assert_eq!(options.http_module, HttpModule::Http);

    let toml = write(
        &dir,
        "settings.toml",
        "source = \"src\"\ndestination = \"dst\"\nhttp_module = \"Http\"\n",
    );
    assert_eq!(Options::from_settings_file(&toml).unwrap().destination, PathBuf::from("dst"));
}

#[test]
fn test_settings_validation_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.json");
    assert_eq!(
        Options::from_settings_file(&missing),
        Err(ConfigError::SettingsNotFound(missing.clone()))
    );

    let no_source = write(&dir, "a.json", r#"{"destination": "out"}"#);
    assert_eq!(Options::from_settings_file(&no_source), Err(ConfigError::EmptySource));

    let blank_destination = write(&dir, "b.json", r#"{"source": "in", "destination": "  "}"#);
    assert_eq!(
        Options::from_settings_file(&blank_destination),
        Err(ConfigError::EmptyDestination)
    );

    let bad_module = write(&dir, "c.json", r#"{"source": "in", "destination": "out", "http_module": "Fetch"}"#);
    assert_eq!(
        Options::from_settings_file(&bad_module),
        Err(ConfigError::InvalidHttpModule("Fetch".to_string()))
    );

    let garbage = write(&dir, "d.json", "{ not json");
    assert!(matches!(
        Options::from_settings_file(&garbage),
        Err(ConfigError::InvalidSettings { .. })
    ));
}

#[test]
fn test_validate_rejects_empty_paths() {
    let options = Options {
        source: PathBuf::new(),
        ..Default::default()
    };
    assert_eq!(options.validate(), Err(ConfigError::EmptySource));
    assert!(Options::default().validate().is_ok());
}

#[test]
fn test_absolute_path() {
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(absolute_path(Path::new("out")).unwrap(), cwd.join("out"));
    let abs = cwd.join("x");
    assert_eq!(absolute_path(&abs).unwrap(), abs);
}
