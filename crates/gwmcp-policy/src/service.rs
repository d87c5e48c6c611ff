//! Services
//!
//! The fixed set of Google integrations and the enabled subset derived from
//! configuration.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One Google product integration.
///
/// `Notes` is synthetic: it is layered on top of the Tasks API but gated
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Calendar,
    Gmail,
    Drive,
    Docs,
    Sheets,
    Slides,
    Tasks,
    Contacts,
    Youtube,
    Forms,
    Chat,
    Meet,
    Notes,
}

impl ServiceId {
    pub const ALL: [ServiceId; 13] = [
        Self::Calendar,
        Self::Gmail,
        Self::Drive,
        Self::Docs,
        Self::Sheets,
        Self::Slides,
        Self::Tasks,
        Self::Contacts,
        Self::Youtube,
        Self::Forms,
        Self::Chat,
        Self::Meet,
        Self::Notes,
    ];

    /// Enabled when the services key is unset or empty.
    pub const DEFAULTS: [ServiceId; 6] = [
        Self::Gmail,
        Self::Calendar,
        Self::Drive,
        Self::Docs,
        Self::Sheets,
        Self::Slides,
    ];

    /// Token used in configuration and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Gmail => "gmail",
            Self::Drive => "drive",
            Self::Docs => "docs",
            Self::Sheets => "sheets",
            Self::Slides => "slides",
            Self::Tasks => "tasks",
            Self::Contacts => "contacts",
            Self::Youtube => "youtube",
            Self::Forms => "forms",
            Self::Chat => "chat",
            Self::Meet => "meet",
            Self::Notes => "notes",
        }
    }

    /// Tool-name prefix owned by this service.
    pub fn tool_prefix(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar_",
            Self::Gmail => "gmail_",
            Self::Drive => "drive_",
            Self::Docs => "docs_",
            Self::Sheets => "sheets_",
            Self::Slides => "slides_",
            Self::Tasks => "tasks_",
            Self::Contacts => "contacts_",
            Self::Youtube => "youtube_",
            Self::Forms => "forms_",
            Self::Chat => "chat_",
            Self::Meet => "meet_",
            Self::Notes => "notes_",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Calendar => "Google Calendar",
            Self::Gmail => "Gmail",
            Self::Drive => "Google Drive",
            Self::Docs => "Google Docs",
            Self::Sheets => "Google Sheets",
            Self::Slides => "Google Slides",
            Self::Tasks => "Google Tasks",
            Self::Contacts => "Google Contacts",
            Self::Youtube => "YouTube",
            Self::Forms => "Google Forms",
            Self::Chat => "Google Chat",
            Self::Meet => "Google Meet",
            Self::Notes => "Notes (Tasks)",
        }
    }

    /// Exact, already-normalized token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == token)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of services a configuration enables.
///
/// Tokens that name no known service are kept aside in `unrecognized`; they
/// never match a tool prefix or a catalog row, so they grant nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledServices {
    known: BTreeSet<ServiceId>,
    unrecognized: BTreeSet<String>,
}

impl EnabledServices {
    pub fn defaults() -> Self {
        Self::from_iter(ServiceId::DEFAULTS)
    }

    pub fn all() -> Self {
        Self::from_iter(ServiceId::ALL)
    }

    /// Build from normalized (trimmed, lowercased) tokens, keeping unknown ones.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut enabled = Self::default();
        for token in tokens {
            let token = token.into();
            match ServiceId::from_token(&token) {
                Some(service) => {
                    enabled.known.insert(service);
                }
                None => {
                    enabled.unrecognized.insert(token);
                }
            }
        }
        enabled
    }

    pub fn contains(&self, service: ServiceId) -> bool {
        self.known.contains(&service)
    }

    /// Known services, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.known.iter().copied()
    }

    pub fn unrecognized(&self) -> &BTreeSet<String> {
        &self.unrecognized
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl FromIterator<ServiceId> for EnabledServices {
    fn from_iter<I: IntoIterator<Item = ServiceId>>(iter: I) -> Self {
        Self {
            known: iter.into_iter().collect(),
            unrecognized: BTreeSet::new(),
        }
    }
}
