//! Error Types
//!
//! Only reading a policy file can fail. The policy operations themselves
//! always produce a value.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("policy file {0} must contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("home directory unavailable")]
    NoHomeDir,
}
