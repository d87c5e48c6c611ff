//! Scope Composer
//!
//! Computes the minimal OAuth scope set to request for a configuration.

use std::collections::BTreeSet;

use tracing::debug;

use crate::capability::Capability;
use crate::catalog::{scope, scopes_for};
use crate::config::PolicyConfig;
use crate::service::ServiceId;

/// Scope set for `config`, deduplicated and sorted.
///
/// An explicit scope list replaces everything else. Otherwise the catalog rows
/// of every enabled service are unioned, gmail capabilities that are switched
/// off remove their scopes, and calendar write upgrades the read-only calendar
/// scope to the full one.
pub fn compose_scopes(config: &PolicyConfig) -> BTreeSet<String> {
    if let Some(explicit) = config.explicit_scopes.as_ref().filter(|s| !s.is_empty()) {
        debug!(count = explicit.len(), "Using explicit scope list");
        return explicit.clone();
    }

    let mut scopes = BTreeSet::new();
    for service in config.enabled_services.iter() {
        let row = scopes_for(service, config.profile);
        if row.is_empty() {
            debug!(%service, profile = %config.profile, "Service contributes no scopes");
        }
        scopes.extend(row.iter().map(|s| s.to_string()));
    }

    if config.is_service_enabled(ServiceId::Gmail) {
        let gated = [
            (Capability::GmailCompose, scope::GMAIL_COMPOSE),
            (Capability::GmailModify, scope::GMAIL_MODIFY),
            (Capability::GmailSend, scope::GMAIL_SEND),
        ];
        for (capability, gmail_scope) in gated {
            if !config.allows(capability) && scopes.remove(gmail_scope) {
                debug!(%capability, "Dropped {}", gmail_scope);
            }
        }
    }

    if config.is_service_enabled(ServiceId::Calendar) && config.calendar_write {
        scopes.remove(scope::CALENDAR_READONLY);
        scopes.insert(scope::CALENDAR.to_string());
    }

    debug!(count = scopes.len(), "Composed scopes");
    scopes
}

/// Scopes in consent-request form: space separated.
pub fn scope_param(scopes: &BTreeSet<String>) -> String {
    scopes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}
