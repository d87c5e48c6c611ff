//! Process Snapshot Operations
//!
//! The operations the dispatcher and the OAuth consent flow call, evaluated
//! against [`PolicyConfig::global`] and the standard registry. Scopes composed
//! at login and decisions made at dispatch come from the same snapshot.

use std::collections::BTreeSet;

use crate::authorize::is_allowed;
use crate::compose;
use crate::config::PolicyConfig;
use crate::profile::ScopeProfile;
use crate::registry::ToolRegistry;
use crate::service::EnabledServices;

pub fn resolve_scope_profile() -> ScopeProfile {
    PolicyConfig::global().profile
}

pub fn resolve_enabled_services() -> &'static EnabledServices {
    &PolicyConfig::global().enabled_services
}

/// Scopes to request at login.
pub fn compose_scopes() -> BTreeSet<String> {
    compose::compose_scopes(PolicyConfig::global())
}

/// Dispatch-time check for one tool.
pub fn is_tool_allowed(tool: &str) -> bool {
    is_allowed(PolicyConfig::global(), ToolRegistry::standard(), tool)
}
