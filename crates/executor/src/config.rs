//! Proxy configuration via `tupleproxy.toml`
//!
//! Names the remote functions each operation kind calls and an optional
//! timeout applied to every operation a [`ProxySpace`](crate::ProxySpace)
//! hands out.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "tupleproxy.toml";

/// Remote function called by each operation kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CrudFunctions {
    /// Single insert
    pub insert: String,
    /// Batched insert
    pub insert_many: String,
    /// Single replace
    pub replace: String,
    /// Batched replace
    pub replace_many: String,
    /// Delete by key
    pub delete: String,
    /// Select by conditions
    pub select: String,
}

impl Default for CrudFunctions {
    fn default() -> Self {
        Self {
            insert: "crud.insert".to_string(),
            insert_many: "crud.insert_many".to_string(),
            replace: "crud.replace".to_string(),
            replace_many: "crud.replace_many".to_string(),
            delete: "crud.delete".to_string(),
            select: "crud.select".to_string(),
        }
    }
}

/// Proxy configuration loaded from `tupleproxy.toml`.
///
/// # Example
///
/// ```toml
/// # timeout_ms = 2000
///
/// [functions]
/// select = "crud.select"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Timeout in milliseconds sent with every operation (default: unset,
    /// the server decides).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Remote function names.
    #[serde(default)]
    pub functions: CrudFunctions,
}

impl ProxyConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Tuple proxy configuration
#
# Timeout in milliseconds sent with every operation.
# Leave unset to let the server apply its own default.
# timeout_ms = 2000

# Remote functions called for each operation kind.
[functions]
insert = "crud.insert"
insert_many = "crud.insert_many"
replace = "crud.replace"
replace_many = "crud.replace_many"
delete = "crud.delete"
select = "crud.select"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or a function name is
    /// empty.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ProxyConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Check that every function name is set.
    pub fn validate(&self) -> Result<()> {
        let f = &self.functions;
        let names = [
            ("insert", &f.insert),
            ("insert_many", &f.insert_many),
            ("replace", &f.replace),
            ("replace_many", &f.replace_many),
            ("delete", &f.delete),
            ("select", &f.select),
        ];
        match names.iter().find(|(_, name)| name.trim().is_empty()) {
            Some((kind, _)) => Err(Error::config(format!(
                "Function name for '{}' must not be empty",
                kind
            ))),
            None => Ok(()),
        }
    }
}
