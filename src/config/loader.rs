//! Configuration file loading.
//!
//! A failure here is fatal: nothing is dispatched from a configuration
//! that could not be read or decoded.

use crate::config::schema::ParexecConfig;
use crate::config::validator::validate;
use crate::error::{ParexecError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Resolve the config path, defaulting to `config.yaml` under `cwd`.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd.join(DEFAULT_CONFIG_FILE),
    }
}

/// Load a single config file and parse it into ParexecConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ParexecConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ParexecError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ParexecError::Io(e)
        }
    })?;

    tracing::debug!("Loaded {} bytes from {}", content.len(), path.display());
    parse_config(&content, path)
}

/// Parse YAML content into ParexecConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ParexecConfig> {
    // serde_yaml rejects an empty document; treat it as "no groups"
    if content.trim().is_empty() {
        return Ok(ParexecConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ParexecError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file and validate it.
///
/// This is the full read step before a run: any error here means no job
/// may be dispatched.
pub fn load_validated(path: &Path) -> Result<ParexecConfig> {
    let config = load_config_file(path)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_config_file_reads_groups() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "functions:\n  - execdata:\n      - cmd: echo\n        args: [a]\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.functions.len(), 1);
    }

    #[test]
    fn load_config_file_missing_returns_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");

        let result = load_config_file(&path);
        assert!(matches!(result, Err(ParexecError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_invalid_yaml_returns_parse_error() {
        let result = parse_config("functions: [unclosed", Path::new("bad.yaml"));
        match result {
            Err(ParexecError::ConfigParseError { path, .. }) => {
                assert_eq!(path, PathBuf::from("bad.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn parse_config_wrong_shape_returns_parse_error() {
        let result = parse_config("functions: 42\n", Path::new("c.yaml"));
        assert!(matches!(
            result,
            Err(ParexecError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn parse_config_empty_document_has_no_groups() {
        let config = parse_config("   \n", Path::new("c.yaml")).unwrap();
        assert!(config.functions.is_empty());
    }

    #[test]
    fn load_validated_rejects_blank_cmd() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "functions:\n  - execdata:\n      - cmd: \"\"\n").unwrap();

        let result = load_validated(&path);
        assert!(matches!(
            result,
            Err(ParexecError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn resolve_config_path_defaults_to_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_config_path(None, cwd),
            PathBuf::from("/work/config.yaml")
        );
        assert_eq!(
            resolve_config_path(Some(Path::new("jobs.yml")), cwd),
            PathBuf::from("/work/jobs.yml")
        );
        assert_eq!(
            resolve_config_path(Some(Path::new("/etc/jobs.yml")), cwd),
            PathBuf::from("/etc/jobs.yml")
        );
    }
}
