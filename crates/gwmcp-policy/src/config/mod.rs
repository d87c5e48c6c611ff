//! Policy Configuration
//!
//! Turns raw key/value settings into a validated [`PolicyConfig`]. Loading
//! never fails: unrecognized or missing values fall back to documented
//! defaults, always toward less access.

pub mod source;

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capability::{Capability, GmailFlags};
use crate::profile::ScopeProfile;
use crate::service::{EnabledServices, ServiceId};

pub use source::{default_policy_path, ConfigSource, EnvSource, FileSource, Layered, MapSource};

/// Configuration keys.
pub mod keys {
    pub const SCOPE_PROFILE: &str = "GOOGLE_MCP_SCOPE_PROFILE";
    pub const SERVICES: &str = "GOOGLE_MCP_SERVICES";
    pub const SCOPES: &str = "GOOGLE_MCP_SCOPES";
}

/// Immutable, fully resolved policy snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub profile: ScopeProfile,
    pub enabled_services: EnabledServices,
    /// When present, replaces scope composition entirely.
    pub explicit_scopes: Option<BTreeSet<String>>,
    pub gmail: GmailFlags,
    pub calendar_write: bool,
}

static GLOBAL: OnceCell<PolicyConfig> = OnceCell::new();

impl PolicyConfig {
    /// Resolve a snapshot from `source`.
    pub fn load(source: &dyn ConfigSource) -> Self {
        let profile = resolve_profile(source);
        let enabled_services = resolve_services(source);
        let explicit_scopes = resolve_explicit_scopes(source);

        let gmail = GmailFlags {
            compose: resolve_capability(source, Capability::GmailCompose, profile),
            modify: resolve_capability(source, Capability::GmailModify, profile),
            send: resolve_capability(source, Capability::GmailSend, profile),
        };
        let calendar_write = resolve_capability(source, Capability::CalendarWrite, profile);

        Self {
            profile,
            enabled_services,
            explicit_scopes,
            gmail,
            calendar_write,
        }
    }

    /// Resolve from the environment layered over `policy_file`.
    pub fn from_env_and_file(policy_file: Option<&Path>) -> Self {
        Self::load(&Layered::standard(policy_file))
    }

    /// Process-wide snapshot, loaded on first use from the environment over
    /// the default policy file.
    pub fn global() -> &'static PolicyConfig {
        GLOBAL.get_or_init(|| {
            let path = default_policy_path()
                .map_err(|e| warn!("Skipping policy file: {}", e))
                .ok();
            let config = Self::from_env_and_file(path.as_deref());
            info!(
                profile = %config.profile,
                services = config.enabled_services.len(),
                explicit_scopes = config.explicit_scopes.is_some(),
                "Policy configuration loaded"
            );
            config
        })
    }

    /// Effective value of a capability flag.
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::GmailCompose => self.gmail.compose,
            Capability::GmailModify => self.gmail.modify,
            Capability::GmailSend => self.gmail.send,
            Capability::CalendarWrite => self.calendar_write,
        }
    }

    pub fn is_service_enabled(&self, service: ServiceId) -> bool {
        self.enabled_services.contains(service)
    }
}

impl Default for PolicyConfig {
    /// Equivalent to loading from an empty source.
    fn default() -> Self {
        Self::load(&MapSource::new())
    }
}

fn resolve_profile(source: &dyn ConfigSource) -> ScopeProfile {
    let Some(raw) = source.get(keys::SCOPE_PROFILE) else {
        return ScopeProfile::default();
    };

    ScopeProfile::parse(&raw).unwrap_or_else(|| {
        warn!(value = %raw, "Unrecognized scope profile, using {}", ScopeProfile::default());
        ScopeProfile::default()
    })
}

fn resolve_services(source: &dyn ConfigSource) -> EnabledServices {
    let tokens = parse_service_tokens(source.get(keys::SERVICES).as_deref());

    if tokens.is_empty() {
        return EnabledServices::defaults();
    }
    if tokens.iter().any(|t| t == "all") {
        return EnabledServices::all();
    }

    let enabled = EnabledServices::from_tokens(tokens);
    for token in enabled.unrecognized() {
        warn!(service = %token, "Unknown service in {}, ignoring", keys::SERVICES);
    }
    enabled
}

fn resolve_explicit_scopes(source: &dyn ConfigSource) -> Option<BTreeSet<String>> {
    let scopes: BTreeSet<String> = parse_scope_list(source.get(keys::SCOPES).as_deref())
        .into_iter()
        .collect();

    if scopes.is_empty() {
        None
    } else {
        Some(scopes)
    }
}

fn resolve_capability(
    source: &dyn ConfigSource,
    capability: Capability,
    profile: ScopeProfile,
) -> bool {
    let fallback = capability.default_for(profile);
    let raw = source.get(capability.config_key());

    match raw.as_deref().map(parse_bool) {
        None => fallback,
        Some(Some(value)) => value,
        Some(None) => {
            warn!(
                key = capability.config_key(),
                value = raw.as_deref().unwrap_or_default(),
                "Unrecognized boolean, using default {}",
                fallback
            );
            fallback
        }
    }
}

/// Service tokens from a comma and/or whitespace separated list, lowercased.
pub fn parse_service_tokens(value: Option<&str>) -> Vec<String> {
    split_list(value).map(str::to_lowercase).collect()
}

/// Scope strings from a comma and/or whitespace separated list. Case is kept.
pub fn parse_scope_list(value: Option<&str>) -> Vec<String> {
    split_list(value).map(str::to_string).collect()
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Recognized boolean spellings (case-insensitive). `None` means "not a boolean".
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
