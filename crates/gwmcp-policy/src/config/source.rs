//! Configuration Sources
//!
//! Read-only key/value lookups feeding the policy loader.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ConfigError;

/// A read-only key/value store.
///
/// Empty or whitespace-only values are reported as absent.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().and_then(non_blank)
    }
}

/// In-memory key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().and_then(non_blank)
    }
}

/// A JSON policy file: one object keyed by the same names as the environment.
///
/// ```json
/// {
///   "GOOGLE_MCP_SCOPE_PROFILE": "full",
///   "GOOGLE_MCP_SERVICES": ["gmail", "calendar"],
///   "GOOGLE_MCP_GMAIL_SEND": false
/// }
/// ```
///
/// Lists are joined with commas; booleans become `"true"`/`"false"`. Any other
/// value is skipped with a warning, leaving that key at its default.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    path: PathBuf,
    values: MapSource,
}

impl FileSource {
    /// Maximum accepted file size.
    const MAX_BYTES: u64 = 1_000_000;

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(io_err)?;
        if metadata.len() > Self::MAX_BYTES {
            return Err(io_err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "policy file too large (max 1MB)",
            )));
        }

        let content = fs::read_to_string(path).map_err(io_err)?;
        Self::from_json(path, &content)
    }

    pub fn from_json(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let parsed: Value = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let Value::Object(object) = parsed else {
            return Err(ConfigError::NotAnObject(path.to_path_buf()));
        };

        let mut values = MapSource::new();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            match flatten_value(&value) {
                Some(flattened) => values.insert(key, flattened),
                // Only this key falls back to its default.
                None => warn!(key = %key, "Ignoring policy file value: {}", value),
            }
        }

        debug!("Loaded policy file {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Load `path` if it exists. A missing file is silent; any other failure is
    /// logged and treated as missing.
    pub fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            debug!("Policy file does not exist: {:?}", path);
            return None;
        }

        match Self::load(path) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("Ignoring policy file: {}", e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }
}

/// Strings as-is, booleans as `"true"`/`"false"`, string lists comma-joined.
fn flatten_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        _ => None,
    }
}

/// Consults each source in order; the first one holding a value wins.
#[derive(Default)]
pub struct Layered {
    layers: Vec<Box<dyn ConfigSource + Send + Sync>>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, source: impl ConfigSource + Send + Sync + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Environment over the given policy file (if it loads).
    pub fn standard(policy_file: Option<&Path>) -> Self {
        let layered = Self::new().push(EnvSource);
        match policy_file.and_then(FileSource::load_optional) {
            Some(file) => layered.push(file),
            None => layered,
        }
    }
}

impl ConfigSource for Layered {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

/// Default policy file location (`~/.gwmcp/policy.json`).
pub fn default_policy_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".gwmcp").join("policy.json"))
}
