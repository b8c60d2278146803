//! Integration tests for config module public API.

use parexec::config::{load_config_file, validate, validate_config, ParexecConfig};
use parexec::ParexecError;
use std::fs;
use tempfile::TempDir;

#[test]
fn public_api_is_accessible() {
    let config = ParexecConfig::default();
    assert!(config.functions.is_empty());
    assert!(validate_config(&config).is_empty());
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(
        &path,
        r#"
functions:
  - execdata:
      - name: "k8s get namespace"
        cmd: kubectl
        args: ["get", "ns"]
  - name: local
    execdata:
      - name: echoing
        cmd: echo
        args: ["hi there"]
      - name: lsing
        cmd: ls
        args: ["."]
"#,
    )
    .unwrap();

    let config = load_config_file(&path).unwrap();
    validate(&config).unwrap();

    assert_eq!(config.functions.len(), 2);
    assert_eq!(config.functions[1].name.as_deref(), Some("local"));
    assert_eq!(config.functions[1].execdata[1].args, vec!["."]);
}

#[test]
fn unreadable_yaml_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(&path, "functions:\n  - execdata: {not: [a list}\n").unwrap();

    let err = load_config_file(&path).unwrap_err();
    assert!(matches!(err, ParexecError::ConfigParseError { .. }));
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn unknown_fields_are_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(
        &path,
        "version: 2\nfunctions:\n  - execdata:\n      - cmd: echo\n        note: extra\n",
    )
    .unwrap();

    let config = load_config_file(&path).unwrap();
    assert_eq!(config.functions[0].execdata[0].cmd, "echo");
}
