//! Tool-access policy and OAuth scope composition for the Google Workspace
//! MCP server.
//!
//! The pure API takes an explicit [`PolicyConfig`]:
//!
//! ```
//! use gwmcp_policy::{compose_scopes, is_allowed, MapSource, PolicyConfig, ToolRegistry};
//!
//! let config = PolicyConfig::load(
//!     &MapSource::new()
//!         .with("GOOGLE_MCP_SCOPE_PROFILE", "readonly")
//!         .with("GOOGLE_MCP_SERVICES", "gmail"),
//! );
//!
//! assert_eq!(compose_scopes(&config).len(), 1);
//! assert!(is_allowed(&config, ToolRegistry::standard(), "gmail_get_message"));
//! assert!(!is_allowed(&config, ToolRegistry::standard(), "gmail_send"));
//! ```
//!
//! [`global`] exposes the same operations over the process-wide snapshot.

pub mod authorize;
pub mod capability;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod global;
pub mod profile;
pub mod registry;
pub mod service;
pub mod tools;

pub use authorize::{evaluate, is_allowed, AllowReason, Decision, DenyReason};
pub use capability::{Capability, GmailFlags};
pub use compose::{compose_scopes, scope_param};
pub use config::{
    default_policy_path, ConfigSource, EnvSource, FileSource, Layered, MapSource, PolicyConfig,
};
pub use error::ConfigError;
pub use profile::ScopeProfile;
pub use registry::ToolRegistry;
pub use service::{EnabledServices, ServiceId};
pub use tools::{allowed_tools, ToolCatalog, ToolInfo};
