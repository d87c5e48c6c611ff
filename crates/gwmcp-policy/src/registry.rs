//! Tool Registry
//!
//! Maps tool names to their owning service and to any capability flag they
//! need beyond service enablement.

use once_cell::sync::Lazy;
use tracing::warn;

use crate::capability::Capability;
use crate::service::ServiceId;

/// Tools that establish credentials. Always allowed.
pub const AUTH_TOOLS: [&str; 4] = [
    "google_auth",
    "google_auth_status",
    "google_auth_code",
    "google_logout",
];

pub const GMAIL_SEND_TOOLS: [&str; 2] = ["gmail_send", "gmail_reply"];
pub const GMAIL_MODIFY_TOOLS: [&str; 3] = ["gmail_trash", "gmail_mark_read", "gmail_mark_unread"];
pub const GMAIL_COMPOSE_TOOLS: [&str; 1] = ["gmail_create_draft"];
pub const CALENDAR_WRITE_TOOLS: [&str; 4] = [
    "calendar_create_event",
    "calendar_update_event",
    "calendar_delete_event",
    "calendar_quick_add",
];

static STANDARD: Lazy<ToolRegistry> = Lazy::new(ToolRegistry::new);

/// Prefix table plus capability-gated tool subsets.
///
/// Prefixes are matched longest first; prefixes of equal length are tried in
/// lexicographic order. A prefix registered for several services keeps the
/// first service in `ServiceId` order, so resolution never depends on
/// insertion order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    prefixes: Vec<(String, ServiceId)>,
}

impl ToolRegistry {
    /// Registry with every service's own prefix.
    pub fn new() -> Self {
        Self::with_prefixes(
            ServiceId::ALL
                .into_iter()
                .map(|service| (service.tool_prefix().to_string(), service)),
        )
    }

    /// Shared instance of [`ToolRegistry::new`].
    pub fn standard() -> &'static ToolRegistry {
        &STANDARD
    }

    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = (S, ServiceId)>,
        S: Into<String>,
    {
        let mut prefixes: Vec<(String, ServiceId)> = prefixes
            .into_iter()
            .map(|(prefix, service)| (prefix.into(), service))
            .filter(|(prefix, _)| !prefix.is_empty())
            .collect();
        prefixes.sort_by(|(a, sa), (b, sb)| {
            b.len()
                .cmp(&a.len())
                .then_with(|| a.cmp(b))
                .then_with(|| sa.cmp(sb))
        });
        prefixes.dedup_by(|(a, sa), (b, sb)| {
            if a != b {
                return false;
            }
            warn!(prefix = %a, kept = %sb, dropped = %sa, "Duplicate tool prefix");
            true
        });
        Self { prefixes }
    }

    pub fn is_auth_tool(&self, tool: &str) -> bool {
        AUTH_TOOLS.contains(&tool)
    }

    /// Owning service, or `None` when no prefix matches.
    pub fn resolve_service(&self, tool: &str) -> Option<ServiceId> {
        self.prefixes
            .iter()
            .find(|(prefix, _)| tool.starts_with(prefix.as_str()))
            .map(|(_, service)| *service)
    }

    /// Capability flag a tool needs on top of its service being enabled.
    ///
    /// Only meaningful once the tool has resolved to the capability's service.
    pub fn required_capability(&self, tool: &str) -> Option<Capability> {
        if GMAIL_SEND_TOOLS.contains(&tool) {
            Some(Capability::GmailSend)
        } else if GMAIL_MODIFY_TOOLS.contains(&tool) {
            Some(Capability::GmailModify)
        } else if GMAIL_COMPOSE_TOOLS.contains(&tool) {
            Some(Capability::GmailCompose)
        } else if CALENDAR_WRITE_TOOLS.contains(&tool) {
            Some(Capability::CalendarWrite)
        } else {
            None
        }
    }

    /// Prefix table in evaluation order.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, ServiceId)> {
        self.prefixes.iter().map(|(p, s)| (p.as_str(), *s))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
