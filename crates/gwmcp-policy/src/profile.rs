//! Scope Profiles
//!
//! Coarse access bundles selecting how much each service asks for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much access to request per service.
///
/// Ordered from least to most access, but only ever used as a lookup key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScopeProfile {
    #[serde(rename = "readonly")]
    ReadOnly,
    #[default]
    Editor,
    Full,
}

impl ScopeProfile {
    pub const ALL: [ScopeProfile; 3] = [Self::ReadOnly, Self::Editor, Self::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "readonly",
            Self::Editor => "editor",
            Self::Full => "full",
        }
    }

    /// Parse a profile token (trimmed, case-insensitive).
    ///
    /// Returns `None` for anything that is not exactly one of the three tokens;
    /// the loader decides what to fall back to.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "readonly" => Some(Self::ReadOnly),
            "editor" => Some(Self::Editor),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
