//! Scope Catalog
//!
//! Static OAuth scope requirements per (service, profile).
//!
//! Rows are not guaranteed to be strictly nested across profiles. Several
//! services have an empty `readonly` row: enabling them under the `readonly`
//! profile requests nothing and so yields no usable access.

use crate::profile::ScopeProfile;
use crate::service::ServiceId;

/// Google OAuth scope strings referenced by the catalog and the composer.
pub mod scope {
    pub const GMAIL_READONLY: &str = "https://www.googleapis.com/auth/gmail.readonly";
    pub const GMAIL_MODIFY: &str = "https://www.googleapis.com/auth/gmail.modify";
    pub const GMAIL_COMPOSE: &str = "https://www.googleapis.com/auth/gmail.compose";
    pub const GMAIL_SEND: &str = "https://www.googleapis.com/auth/gmail.send";

    pub const CALENDAR_READONLY: &str = "https://www.googleapis.com/auth/calendar.readonly";
    pub const CALENDAR: &str = "https://www.googleapis.com/auth/calendar";

    pub const DRIVE_READONLY: &str = "https://www.googleapis.com/auth/drive.readonly";
    pub const DRIVE: &str = "https://www.googleapis.com/auth/drive";

    pub const DOCUMENTS_READONLY: &str = "https://www.googleapis.com/auth/documents.readonly";
    pub const DOCUMENTS: &str = "https://www.googleapis.com/auth/documents";

    pub const SPREADSHEETS_READONLY: &str =
        "https://www.googleapis.com/auth/spreadsheets.readonly";
    pub const SPREADSHEETS: &str = "https://www.googleapis.com/auth/spreadsheets";

    pub const PRESENTATIONS_READONLY: &str =
        "https://www.googleapis.com/auth/presentations.readonly";
    pub const PRESENTATIONS: &str = "https://www.googleapis.com/auth/presentations";

    pub const TASKS: &str = "https://www.googleapis.com/auth/tasks";
    pub const CONTACTS: &str = "https://www.googleapis.com/auth/contacts";
    pub const YOUTUBE: &str = "https://www.googleapis.com/auth/youtube";

    pub const FORMS_BODY: &str = "https://www.googleapis.com/auth/forms.body";
    pub const FORMS_RESPONSES_READONLY: &str =
        "https://www.googleapis.com/auth/forms.responses.readonly";

    pub const CHAT_SPACES: &str = "https://www.googleapis.com/auth/chat.spaces";
    pub const CHAT_SPACES_CREATE: &str = "https://www.googleapis.com/auth/chat.spaces.create";
    pub const CHAT_MESSAGES: &str = "https://www.googleapis.com/auth/chat.messages";
    pub const CHAT_MESSAGES_CREATE: &str = "https://www.googleapis.com/auth/chat.messages.create";
    pub const CHAT_MEMBERSHIPS: &str = "https://www.googleapis.com/auth/chat.memberships";

    pub const MEETINGS_SPACE_READONLY: &str =
        "https://www.googleapis.com/auth/meetings.space.readonly";
    pub const MEETINGS_SPACE_CREATED: &str =
        "https://www.googleapis.com/auth/meetings.space.created";
}

use scope::*;

/// Ordered scope list for `service` at `profile`. May be empty.
pub fn scopes_for(service: ServiceId, profile: ScopeProfile) -> &'static [&'static str] {
    use ScopeProfile::{Editor, Full, ReadOnly};
    use ServiceId::*;

    match (service, profile) {
        (Gmail, ReadOnly) => &[GMAIL_READONLY],
        (Gmail, Editor) => &[GMAIL_READONLY, GMAIL_MODIFY, GMAIL_COMPOSE],
        (Gmail, Full) => &[GMAIL_MODIFY, GMAIL_COMPOSE, GMAIL_SEND],

        (Calendar, ReadOnly | Editor) => &[CALENDAR_READONLY],
        (Calendar, Full) => &[CALENDAR],

        (Drive, ReadOnly) => &[DRIVE_READONLY],
        (Drive, Editor | Full) => &[DRIVE],

        (Docs, ReadOnly) => &[DOCUMENTS_READONLY],
        (Docs, Editor | Full) => &[DOCUMENTS],

        (Sheets, ReadOnly) => &[SPREADSHEETS_READONLY],
        (Sheets, Editor | Full) => &[SPREADSHEETS],

        (Slides, ReadOnly) => &[PRESENTATIONS_READONLY],
        (Slides, Editor | Full) => &[PRESENTATIONS],

        (Tasks | Notes, ReadOnly) => &[],
        (Tasks | Notes, Editor | Full) => &[TASKS],

        (Contacts, ReadOnly) => &[],
        (Contacts, Editor | Full) => &[CONTACTS],

        (Youtube, ReadOnly) => &[],
        (Youtube, Editor | Full) => &[YOUTUBE],

        (Forms, ReadOnly) => &[FORMS_RESPONSES_READONLY],
        (Forms, Editor | Full) => &[FORMS_BODY, FORMS_RESPONSES_READONLY],

        (Chat, ReadOnly) => &[],
        (Chat, Editor) => &[CHAT_SPACES, CHAT_MESSAGES, CHAT_MEMBERSHIPS],
        (Chat, Full) => &[
            CHAT_SPACES,
            CHAT_SPACES_CREATE,
            CHAT_MESSAGES,
            CHAT_MESSAGES_CREATE,
            CHAT_MEMBERSHIPS,
        ],

        (Meet, ReadOnly) => &[MEETINGS_SPACE_READONLY],
        (Meet, Editor | Full) => &[MEETINGS_SPACE_CREATED, MEETINGS_SPACE_READONLY],
    }
}
