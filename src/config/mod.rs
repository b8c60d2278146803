//! Configuration loading, parsing, and validation for parexec.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use parexec::config::{load_config_file, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yaml");
//! fs::write(&path, "functions:\n  - execdata:\n      - cmd: echo\n        args: [hi]\n").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.functions[0].execdata[0].cmd, "echo");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config_file, load_validated, parse_config, resolve_config_path, DEFAULT_CONFIG_FILE,
};
pub use schema::{FunctionConfig, GroupConfig, ParexecConfig};
pub use validator::{validate, validate_config, ValidationError};
