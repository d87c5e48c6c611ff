use std::collections::BTreeSet;
use std::fmt;

use gwmcp_policy::{Decision, PolicyConfig, ScopeProfile, ServiceId, ToolInfo};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub tool: String,
    pub allowed: bool,
    #[serde(flatten)]
    pub decision: Decision,
}

impl CheckReport {
    pub fn new(tool: &str, decision: Decision) -> Self {
        Self {
            tool: tool.to_string(),
            allowed: decision.is_allowed(),
            decision,
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.tool, self.decision)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolReport {
    pub name: &'static str,
    pub service: Option<ServiceId>,
    pub description: &'static str,
    pub allowed: bool,
}

impl ToolReport {
    pub fn new(tool: &ToolInfo, allowed: bool) -> Self {
        Self {
            name: tool.name,
            service: tool.service,
            description: tool.description,
            allowed,
        }
    }

    /// One listing line; the status column only appears when denied tools are
    /// listed too.
    pub fn line(&self, with_status: bool) -> String {
        let service = self.service.map(|s| s.as_str()).unwrap_or("auth");
        if with_status {
            let status = if self.allowed { "allowed" } else { "denied" };
            format!("{:<7} {:<32} {:<9} {}", status, self.name, service, self.description)
        } else {
            format!("{:<32} {:<9} {}", self.name, service, self.description)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub profile: ScopeProfile,
    pub services: Vec<ServiceId>,
    pub unrecognized_services: Vec<String>,
    pub explicit_scopes: Option<BTreeSet<String>>,
    pub gmail_compose: bool,
    pub gmail_modify: bool,
    pub gmail_send: bool,
    pub calendar_write: bool,
}

impl From<&PolicyConfig> for ConfigReport {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            profile: config.profile,
            services: config.enabled_services.iter().collect(),
            unrecognized_services: config.enabled_services.unrecognized().iter().cloned().collect(),
            explicit_scopes: config.explicit_scopes.clone(),
            gmail_compose: config.gmail.compose,
            gmail_modify: config.gmail.modify,
            gmail_send: config.gmail.send,
            calendar_write: config.calendar_write,
        }
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let services: Vec<&str> = self.services.iter().map(|s| s.as_str()).collect();
        writeln!(f, "profile:         {}", self.profile)?;
        writeln!(f, "services:        {}", services.join(", "))?;
        if !self.unrecognized_services.is_empty() {
            writeln!(f, "ignored:         {}", self.unrecognized_services.join(", "))?;
        }
        match &self.explicit_scopes {
            Some(scopes) => {
                let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
                writeln!(f, "explicit scopes: {}", scopes.join(" "))?;
            }
            None => writeln!(f, "explicit scopes: (none)")?,
        }
        writeln!(f, "gmail compose:   {}", self.gmail_compose)?;
        writeln!(f, "gmail modify:    {}", self.gmail_modify)?;
        writeln!(f, "gmail send:      {}", self.gmail_send)?;
        writeln!(f, "calendar write:  {}", self.calendar_write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gwmcp_policy::{DenyReason, MapSource};

    #[test]
    fn test_check_report_json_flattens_decision() {
        let report =
            CheckReport::new("nonexistent_tool", Decision::Denied(DenyReason::UnknownTool));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["tool"], "nonexistent_tool");
        assert_eq!(value["allowed"], false);
        assert_eq!(value["decision"], "denied");
        assert_eq!(value["reason"], "unknown_tool");
        assert_eq!(report.to_string(), "nonexistent_tool: denied (unknown tool)");
    }

    #[test]
    fn test_tool_line_marks_auth_tools() {
        let info = ToolInfo {
            name: "google_auth",
            service: None,
            description: "Initiate OAuth authentication with Google",
        };
        let line = ToolReport::new(&info, true).line(true);
        assert!(line.starts_with("allowed"));
        assert!(line.contains(" auth "));
    }

    #[test]
    fn test_config_report_lists_ignored_tokens() {
        let config = PolicyConfig::load(
            &MapSource::new()
                .with("GOOGLE_MCP_SERVICES", "gmail photos")
                .with("GOOGLE_MCP_SCOPE_PROFILE", "full"),
        );
        let report = ConfigReport::from(&config);
        assert_eq!(report.services, vec![ServiceId::Gmail]);
        assert_eq!(report.unrecognized_services, vec!["photos".to_string()]);

        let text = report.to_string();
        assert!(text.contains("profile:         full"));
        assert!(text.contains("ignored:         photos"));
        assert!(text.contains("gmail send:      true"));
    }
}
