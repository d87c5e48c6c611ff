//! Tool Authorization
//!
//! Flat decision table consulted before every tool dispatch. Stateless: the
//! outcome depends only on the configuration snapshot and the tool name.
//!
//! Resolution (first match wins):
//! 1. Auth tool → allowed
//! 2. No prefix match → denied
//! 3. Owning service not enabled → denied
//! 4. Tool gated by a capability flag → the flag's value
//! 5. Otherwise → allowed

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::capability::Capability;
use crate::config::PolicyConfig;
use crate::registry::ToolRegistry;
use crate::service::ServiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AllowReason {
    AuthTool,
    ServiceEnabled { service: ServiceId },
    CapabilityGranted { capability: Capability },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
    UnknownTool,
    ServiceDisabled { service: ServiceId },
    CapabilityWithheld { capability: Capability },
}

/// Outcome of evaluating one tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allowed(AllowReason),
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed(_))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allowed(AllowReason::AuthTool) => write!(f, "allowed (authentication tool)"),
            Decision::Allowed(AllowReason::ServiceEnabled { service }) => {
                write!(f, "allowed ({} enabled)", service)
            }
            Decision::Allowed(AllowReason::CapabilityGranted { capability }) => {
                write!(f, "allowed ({} granted)", capability)
            }
            Decision::Denied(DenyReason::UnknownTool) => write!(f, "denied (unknown tool)"),
            Decision::Denied(DenyReason::ServiceDisabled { service }) => {
                write!(f, "denied ({} not enabled)", service)
            }
            Decision::Denied(DenyReason::CapabilityWithheld { capability }) => {
                write!(f, "denied ({} not granted, set {})", capability, capability.config_key())
            }
        }
    }
}

/// Decide whether `tool` may run under `config`, with the reason.
pub fn evaluate(config: &PolicyConfig, registry: &ToolRegistry, tool: &str) -> Decision {
    let decision = decide(config, registry, tool);
    debug!(tool, %decision, "Tool authorization");
    decision
}

fn decide(config: &PolicyConfig, registry: &ToolRegistry, tool: &str) -> Decision {
    if registry.is_auth_tool(tool) {
        return Decision::Allowed(AllowReason::AuthTool);
    }

    let Some(service) = registry.resolve_service(tool) else {
        return Decision::Denied(DenyReason::UnknownTool);
    };

    if !config.is_service_enabled(service) {
        return Decision::Denied(DenyReason::ServiceDisabled { service });
    }

    // Gated subsets only apply to the service that owns the capability.
    if let Some(capability) = registry
        .required_capability(tool)
        .filter(|c| c.service() == service)
    {
        return if config.allows(capability) {
            Decision::Allowed(AllowReason::CapabilityGranted { capability })
        } else {
            Decision::Denied(DenyReason::CapabilityWithheld { capability })
        };
    }

    Decision::Allowed(AllowReason::ServiceEnabled { service })
}

/// Whether `tool` may run under `config`.
pub fn is_allowed(config: &PolicyConfig, registry: &ToolRegistry, tool: &str) -> bool {
    decide(config, registry, tool).is_allowed()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{keys, MapSource};
    use crate::registry::AUTH_TOOLS;
    use crate::service::EnabledServices;
    use crate::tools::ToolCatalog;

    fn load(pairs: &[(&str, &str)]) -> PolicyConfig {
        PolicyConfig::load(&pairs.iter().copied().collect::<MapSource>())
    }

    fn allowed(config: &PolicyConfig, tool: &str) -> bool {
        is_allowed(config, ToolRegistry::standard(), tool)
    }

    #[test]
    fn test_auth_tools_always_allowed() {
        let empty = PolicyConfig {
            enabled_services: EnabledServices::default(),
            ..PolicyConfig::default()
        };
        let readonly = load(&[(keys::SCOPE_PROFILE, "readonly"), (keys::SERVICES, "photos")]);

        for config in [empty, readonly, PolicyConfig::default()] {
            for tool in AUTH_TOOLS {
                assert!(allowed(&config, tool), "{tool}");
            }
        }
    }

    #[test]
    fn test_unknown_tool_denied() {
        let config = load(&[(keys::SERVICES, "all"), (keys::SCOPE_PROFILE, "full")]);
        assert_eq!(
            evaluate(&config, ToolRegistry::standard(), "nonexistent_tool"),
            Decision::Denied(DenyReason::UnknownTool)
        );
        assert!(!allowed(&config, ""));
        assert!(!allowed(&config, "GMAIL_SEND"));
    }

    #[test]
    fn test_disabled_service_denies_every_tool() {
        let config = load(&[(keys::SERVICES, "drive"), (keys::SCOPE_PROFILE, "full")]);
        for t in ToolCatalog::all() {
            match t.service {
                Some(ServiceId::Drive) => assert!(allowed(&config, t.name), "{}", t.name),
                Some(service) => assert_eq!(
                    evaluate(&config, ToolRegistry::standard(), t.name),
                    Decision::Denied(DenyReason::ServiceDisabled { service }),
                    "{}",
                    t.name
                ),
                None => assert!(allowed(&config, t.name)),
            }
        }
    }

    #[test]
    fn test_gmail_gating_under_editor_defaults() {
        let config = PolicyConfig::default();
        assert!(!allowed(&config, "gmail_send"));
        assert!(!allowed(&config, "gmail_reply"));
        assert!(allowed(&config, "gmail_mark_read"));
        assert!(allowed(&config, "gmail_create_draft"));
        assert!(allowed(&config, "gmail_list_messages"));
        assert_eq!(
            evaluate(&config, ToolRegistry::standard(), "gmail_send"),
            Decision::Denied(DenyReason::CapabilityWithheld {
                capability: Capability::GmailSend
            })
        );
    }

    #[test]
    fn test_readonly_gmail_scenario() {
        let config = load(&[(keys::SCOPE_PROFILE, "readonly"), (keys::SERVICES, "gmail")]);
        assert!(allowed(&config, "gmail_get_message"));
        assert!(!allowed(&config, "gmail_send"));
        assert!(!allowed(&config, "gmail_trash"));
        assert!(!allowed(&config, "gmail_create_draft"));
    }

    #[test]
    fn test_overrides_open_gated_tools() {
        let config = load(&[
            (keys::SERVICES, "gmail calendar"),
            ("GOOGLE_MCP_GMAIL_SEND", "true"),
            ("GOOGLE_MCP_CALENDAR_WRITE", "true"),
            ("GOOGLE_MCP_GMAIL_MODIFY", "false"),
        ]);
        assert!(allowed(&config, "gmail_send"));
        assert!(allowed(&config, "calendar_create_event"));
        assert!(!allowed(&config, "gmail_mark_unread"));
    }

    #[test]
    fn test_calendar_write_tools() {
        let editor = load(&[(keys::SERVICES, "calendar")]);
        for tool in [
            "calendar_create_event",
            "calendar_update_event",
            "calendar_delete_event",
            "calendar_quick_add",
        ] {
            assert!(!allowed(&editor, tool), "{tool}");
        }
        assert!(allowed(&editor, "calendar_list_events"));
        assert!(allowed(&editor, "calendar_today"));

        let full = load(&[(keys::SERVICES, "calendar"), (keys::SCOPE_PROFILE, "full")]);
        assert!(allowed(&full, "calendar_quick_add"));
    }

    #[test]
    fn test_gated_names_only_gate_their_own_service() {
        // A custom registry routing a gmail-named tool elsewhere must not apply
        // the gmail flag to it.
        let registry = ToolRegistry::with_prefixes([("gmail_send", ServiceId::Drive)]);
        let config = load(&[(keys::SERVICES, "drive")]);
        assert_eq!(
            evaluate(&config, &registry, "gmail_send"),
            Decision::Allowed(AllowReason::ServiceEnabled {
                service: ServiceId::Drive
            })
        );
    }

    #[test]
    fn test_decisions_are_stateless() {
        let config = PolicyConfig::default();
        let before: Vec<bool> = ToolCatalog::all()
            .iter()
            .map(|t| allowed(&config, t.name))
            .collect();
        for t in ToolCatalog::all().iter().rev() {
            let _ = allowed(&config, t.name);
        }
        let after: Vec<bool> = ToolCatalog::all()
            .iter()
            .map(|t| allowed(&config, t.name))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_decision_display() {
        let denied = Decision::Denied(DenyReason::CapabilityWithheld {
            capability: Capability::GmailSend,
        });
        assert_eq!(
            denied.to_string(),
            "denied (gmail_send not granted, set GOOGLE_MCP_GMAIL_SEND)"
        );
        let allowed = Decision::Allowed(AllowReason::ServiceEnabled {
            service: ServiceId::Drive,
        });
        assert_eq!(allowed.to_string(), "allowed (drive enabled)");
    }

    #[test]
    fn test_decision_serializes_with_reason() {
        let value = serde_json::to_value(Decision::Denied(DenyReason::ServiceDisabled {
            service: ServiceId::Gmail,
        }))
        .unwrap();
        assert_eq!(value["decision"], "denied");
        assert_eq!(value["reason"], "service_disabled");
        assert_eq!(value["service"], "gmail");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dispatch_agrees_with_sequential() {
        let config = Arc::new(load(&[(keys::SERVICES, "all")]));
        let expected: Vec<bool> = ToolCatalog::all()
            .iter()
            .map(|t| allowed(&config, t.name))
            .collect();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let config = Arc::clone(&config);
            handles.push(tokio::spawn(async move {
                ToolCatalog::all()
                    .iter()
                    .map(|t| is_allowed(&config, ToolRegistry::standard(), t.name))
                    .collect::<Vec<bool>>()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), expected);
        }
    }
}
