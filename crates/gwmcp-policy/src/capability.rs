//! Capability Flags
//!
//! Fine-grained switches narrower than a whole service. Their defaults follow
//! the active profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::ScopeProfile;
use crate::service::ServiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    GmailCompose,
    GmailModify,
    GmailSend,
    CalendarWrite,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Self::GmailCompose,
        Self::GmailModify,
        Self::GmailSend,
        Self::CalendarWrite,
    ];

    /// Configuration key carrying the explicit override.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::GmailCompose => "GOOGLE_MCP_GMAIL_COMPOSE",
            Self::GmailModify => "GOOGLE_MCP_GMAIL_MODIFY",
            Self::GmailSend => "GOOGLE_MCP_GMAIL_SEND",
            Self::CalendarWrite => "GOOGLE_MCP_CALENDAR_WRITE",
        }
    }

    pub fn service(&self) -> ServiceId {
        match self {
            Self::GmailCompose | Self::GmailModify | Self::GmailSend => ServiceId::Gmail,
            Self::CalendarWrite => ServiceId::Calendar,
        }
    }

    /// Value used when the override is absent or unparsable.
    pub fn default_for(&self, profile: ScopeProfile) -> bool {
        match self {
            Self::GmailCompose | Self::GmailModify => profile != ScopeProfile::ReadOnly,
            Self::GmailSend | Self::CalendarWrite => profile == ScopeProfile::Full,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GmailCompose => "gmail_compose",
            Self::GmailModify => "gmail_modify",
            Self::GmailSend => "gmail_send",
            Self::CalendarWrite => "calendar_write",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved Gmail switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmailFlags {
    pub compose: bool,
    pub modify: bool,
    pub send: bool,
}

impl GmailFlags {
    pub fn defaults_for(profile: ScopeProfile) -> Self {
        Self {
            compose: Capability::GmailCompose.default_for(profile),
            modify: Capability::GmailModify.default_for(profile),
            send: Capability::GmailSend.default_for(profile),
        }
    }
}
