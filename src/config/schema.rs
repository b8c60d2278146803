//! Configuration schema definitions for parexec.
//!
//! This module contains the struct definitions that map to
//! the YAML configuration file format:
//!
//! ```yaml
//! functions:
//!   - execdata:
//!       - name: echoing
//!         cmd: echo
//!         args: ["hi there"]
//! ```

use serde::{Deserialize, Serialize};

/// Root configuration structure for config.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParexecConfig {
    /// Parallel groups; each one becomes a job.
    pub functions: Vec<GroupConfig>,
}

/// A parallel group whose commands run one after another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Optional label used in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Commands in execution order
    #[serde(default)]
    pub execdata: Vec<FunctionConfig>,
}

/// A single command descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Display name (metadata only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Program to invoke
    pub cmd: String,

    /// Arguments passed verbatim to the program
    #[serde(default)]
    pub args: Vec<String>,
}

impl GroupConfig {
    /// Label for the group at `index` (0-based) in the config.
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("group-{}", index + 1))
    }
}
