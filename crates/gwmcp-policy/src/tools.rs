//! Tool Catalog
//!
//! Every tool name the server publishes, with its owning service and a short
//! description. Auth tools have no owning service.

use serde::Serialize;

use crate::authorize::is_allowed;
use crate::config::PolicyConfig;
use crate::registry::ToolRegistry;
use crate::service::ServiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub service: Option<ServiceId>,
    pub description: &'static str,
}

const fn tool(
    name: &'static str,
    service: Option<ServiceId>,
    description: &'static str,
) -> ToolInfo {
    ToolInfo {
        name,
        service,
        description,
    }
}

static TOOLS: &[ToolInfo] = &[
    tool("google_auth", None, "Initiate OAuth authentication with Google"),
    tool("google_auth_code", None, "Manually set authorization code"),
    tool("google_auth_status", None, "Check current authentication status"),
    tool("google_logout", None, "Log out and clear stored tokens"),

    tool("calendar_create_event", Some(ServiceId::Calendar), "Create a new event"),
    tool("calendar_delete_event", Some(ServiceId::Calendar), "Delete an event"),
    tool("calendar_get", Some(ServiceId::Calendar), "Get calendar details"),
    tool("calendar_get_event", Some(ServiceId::Calendar), "Get event details"),
    tool("calendar_get_freebusy", Some(ServiceId::Calendar), "Check availability"),
    tool("calendar_list", Some(ServiceId::Calendar), "List all calendars"),
    tool("calendar_list_events", Some(ServiceId::Calendar), "List events from a calendar"),
    tool("calendar_quick_add", Some(ServiceId::Calendar), "Add event via natural language"),
    tool("calendar_today", Some(ServiceId::Calendar), "Get today's events"),
    tool("calendar_upcoming", Some(ServiceId::Calendar), "Get upcoming events"),
    tool("calendar_update_event", Some(ServiceId::Calendar), "Update an existing event"),

    tool("gmail_create_draft", Some(ServiceId::Gmail), "Create a draft email"),
    tool("gmail_get_message", Some(ServiceId::Gmail), "Get specific email"),
    tool("gmail_get_profile", Some(ServiceId::Gmail), "Get Gmail profile info"),
    tool("gmail_get_thread", Some(ServiceId::Gmail), "Get email thread"),
    tool("gmail_get_unread", Some(ServiceId::Gmail), "Get unread emails"),
    tool("gmail_list_labels", Some(ServiceId::Gmail), "List Gmail labels"),
    tool("gmail_list_messages", Some(ServiceId::Gmail), "List emails"),
    tool("gmail_mark_read", Some(ServiceId::Gmail), "Mark as read"),
    tool("gmail_mark_unread", Some(ServiceId::Gmail), "Mark as unread"),
    tool("gmail_reply", Some(ServiceId::Gmail), "Reply to an email"),
    tool("gmail_search", Some(ServiceId::Gmail), "Search emails"),
    tool("gmail_send", Some(ServiceId::Gmail), "Send an email"),
    tool("gmail_trash", Some(ServiceId::Gmail), "Move to trash"),

    tool("drive_copy_file", Some(ServiceId::Drive), "Copy a file"),
    tool("drive_create_folder", Some(ServiceId::Drive), "Create a folder"),
    tool("drive_delete_file", Some(ServiceId::Drive), "Delete a file"),
    tool("drive_download_file", Some(ServiceId::Drive), "Download file content"),
    tool("drive_get_file", Some(ServiceId::Drive), "Get file metadata"),
    tool("drive_list_files", Some(ServiceId::Drive), "List files"),
    tool("drive_move_file", Some(ServiceId::Drive), "Move file to folder"),
    tool("drive_rename_file", Some(ServiceId::Drive), "Rename a file"),
    tool("drive_search", Some(ServiceId::Drive), "Search files"),
    tool("drive_upload_file", Some(ServiceId::Drive), "Upload a new file"),

    tool("docs_append_text", Some(ServiceId::Docs), "Append text"),
    tool("docs_create", Some(ServiceId::Docs), "Create a document"),
    tool("docs_insert_text", Some(ServiceId::Docs), "Insert text"),
    tool("docs_list", Some(ServiceId::Docs), "List documents"),
    tool("docs_read", Some(ServiceId::Docs), "Read document content"),
    tool("docs_replace_text", Some(ServiceId::Docs), "Find and replace"),

    tool("sheets_add_sheet", Some(ServiceId::Sheets), "Add sheet"),
    tool("sheets_append", Some(ServiceId::Sheets), "Append rows"),
    tool("sheets_clear", Some(ServiceId::Sheets), "Clear range"),
    tool("sheets_create", Some(ServiceId::Sheets), "Create spreadsheet"),
    tool("sheets_delete_sheet", Some(ServiceId::Sheets), "Delete sheet"),
    tool("sheets_get", Some(ServiceId::Sheets), "Get spreadsheet info"),
    tool("sheets_list", Some(ServiceId::Sheets), "List spreadsheets"),
    tool("sheets_read", Some(ServiceId::Sheets), "Read values"),
    tool("sheets_update", Some(ServiceId::Sheets), "Update values"),

    tool("slides_add_image", Some(ServiceId::Slides), "Add image"),
    tool("slides_add_slide", Some(ServiceId::Slides), "Add a slide"),
    tool("slides_add_text", Some(ServiceId::Slides), "Add text box"),
    tool("slides_create", Some(ServiceId::Slides), "Create presentation"),
    tool("slides_delete_slide", Some(ServiceId::Slides), "Delete a slide"),
    tool("slides_duplicate_slide", Some(ServiceId::Slides), "Duplicate slide"),
    tool("slides_get", Some(ServiceId::Slides), "Get presentation"),
    tool("slides_list", Some(ServiceId::Slides), "List presentations"),
    tool("slides_replace_text", Some(ServiceId::Slides), "Find/replace text"),

    tool("meet_create_instant", Some(ServiceId::Meet), "Create instant meeting"),
    tool("meet_create_space", Some(ServiceId::Meet), "Create meeting space"),
    tool("meet_end_conference", Some(ServiceId::Meet), "End active meeting"),
    tool("meet_get_by_event", Some(ServiceId::Meet), "Get meeting from event"),
    tool("meet_get_conference_record", Some(ServiceId::Meet), "Get past meeting details"),
    tool("meet_get_recording", Some(ServiceId::Meet), "Get a recording"),
    tool("meet_get_space", Some(ServiceId::Meet), "Get space details"),
    tool("meet_get_transcript", Some(ServiceId::Meet), "Get a transcript"),
    tool("meet_list_conference_records", Some(ServiceId::Meet), "List past meetings"),
    tool("meet_list_participants", Some(ServiceId::Meet), "List participants"),
    tool("meet_list_recordings", Some(ServiceId::Meet), "List recordings"),
    tool("meet_list_transcript_entries", Some(ServiceId::Meet), "List transcript entries"),
    tool("meet_list_transcripts", Some(ServiceId::Meet), "List transcripts"),
    tool("meet_list_upcoming", Some(ServiceId::Meet), "List upcoming meetings"),
    tool("meet_schedule", Some(ServiceId::Meet), "Schedule a meeting"),

    tool("chat_add_member", Some(ServiceId::Chat), "Add a member"),
    tool("chat_add_reaction", Some(ServiceId::Chat), "Add emoji reaction"),
    tool("chat_create_space", Some(ServiceId::Chat), "Create a space"),
    tool("chat_delete_message", Some(ServiceId::Chat), "Delete a message"),
    tool("chat_delete_space", Some(ServiceId::Chat), "Delete a space"),
    tool("chat_get_message", Some(ServiceId::Chat), "Get a message"),
    tool("chat_get_space", Some(ServiceId::Chat), "Get space details"),
    tool("chat_list_members", Some(ServiceId::Chat), "List members"),
    tool("chat_list_messages", Some(ServiceId::Chat), "List messages"),
    tool("chat_list_spaces", Some(ServiceId::Chat), "List Chat spaces"),
    tool("chat_remove_member", Some(ServiceId::Chat), "Remove a member"),
    tool("chat_send_message", Some(ServiceId::Chat), "Send a message"),
    tool("chat_update_message", Some(ServiceId::Chat), "Update a message"),

    tool("forms_add_image", Some(ServiceId::Forms), "Add image"),
    tool("forms_add_page_break", Some(ServiceId::Forms), "Add a page break"),
    tool("forms_add_question", Some(ServiceId::Forms), "Add a question"),
    tool("forms_add_text", Some(ServiceId::Forms), "Add a text item"),
    tool("forms_add_video", Some(ServiceId::Forms), "Add video"),
    tool("forms_create", Some(ServiceId::Forms), "Create a form"),
    tool("forms_delete_item", Some(ServiceId::Forms), "Delete form item"),
    tool("forms_get", Some(ServiceId::Forms), "Get form details"),
    tool("forms_get_response", Some(ServiceId::Forms), "Get response"),
    tool("forms_list_responses", Some(ServiceId::Forms), "List responses"),
    tool("forms_update_info", Some(ServiceId::Forms), "Update form info"),

    tool("youtube_get_channel", Some(ServiceId::Youtube), "Get channel details"),
    tool("youtube_get_my_channel", Some(ServiceId::Youtube), "Get your channel"),
    tool("youtube_get_playlist_items", Some(ServiceId::Youtube), "Get playlist videos"),
    tool("youtube_get_video", Some(ServiceId::Youtube), "Get video details"),
    tool("youtube_get_video_comments", Some(ServiceId::Youtube), "Get comments"),
    tool("youtube_list_liked_videos", Some(ServiceId::Youtube), "List liked videos"),
    tool("youtube_list_playlists", Some(ServiceId::Youtube), "List playlists"),
    tool("youtube_list_subscriptions", Some(ServiceId::Youtube), "List subscriptions"),
    tool("youtube_rate_video", Some(ServiceId::Youtube), "Like/dislike video"),
    tool("youtube_search", Some(ServiceId::Youtube), "Search YouTube"),

    tool("tasks_complete_task", Some(ServiceId::Tasks), "Complete task"),
    tool("tasks_create_task", Some(ServiceId::Tasks), "Create task"),
    tool("tasks_create_tasklist", Some(ServiceId::Tasks), "Create task list"),
    tool("tasks_delete_task", Some(ServiceId::Tasks), "Delete task"),
    tool("tasks_delete_tasklist", Some(ServiceId::Tasks), "Delete task list"),
    tool("tasks_list_tasklists", Some(ServiceId::Tasks), "List task lists"),
    tool("tasks_list_tasks", Some(ServiceId::Tasks), "List tasks"),
    tool("tasks_update_task", Some(ServiceId::Tasks), "Update task"),

    tool("notes_create", Some(ServiceId::Notes), "Create a note"),
    tool("notes_delete", Some(ServiceId::Notes), "Delete a note"),
    tool("notes_list", Some(ServiceId::Notes), "List notes"),
    tool("notes_update", Some(ServiceId::Notes), "Update a note"),

    tool("contacts_create", Some(ServiceId::Contacts), "Create contact"),
    tool("contacts_delete", Some(ServiceId::Contacts), "Delete contact"),
    tool("contacts_get", Some(ServiceId::Contacts), "Get contact"),
    tool("contacts_list", Some(ServiceId::Contacts), "List contacts"),
    tool("contacts_list_groups", Some(ServiceId::Contacts), "List groups"),
    tool("contacts_search", Some(ServiceId::Contacts), "Search contacts"),
];

pub struct ToolCatalog;

impl ToolCatalog {
    pub fn all() -> &'static [ToolInfo] {
        TOOLS
    }

    pub fn get(name: &str) -> Option<&'static ToolInfo> {
        TOOLS.iter().find(|t| t.name == name)
    }

    /// Tools owned by `service`, in catalog order.
    pub fn for_service(service: ServiceId) -> impl Iterator<Item = &'static ToolInfo> {
        TOOLS.iter().filter(move |t| t.service == Some(service))
    }
}

/// Catalog tools the configuration permits, in catalog order.
pub fn allowed_tools(config: &PolicyConfig, registry: &ToolRegistry) -> Vec<&'static ToolInfo> {
    TOOLS
        .iter()
        .filter(|t| is_allowed(config, registry, t.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::{keys, MapSource};
    use crate::registry::{
        AUTH_TOOLS, CALENDAR_WRITE_TOOLS, GMAIL_COMPOSE_TOOLS, GMAIL_MODIFY_TOOLS, GMAIL_SEND_TOOLS,
    };

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn test_every_entry_resolves_to_its_declared_service() {
        let registry = ToolRegistry::new();
        for t in TOOLS {
            match t.service {
                Some(service) => {
                    assert_eq!(registry.resolve_service(t.name), Some(service), "{}", t.name)
                }
                None => assert!(registry.is_auth_tool(t.name), "{}", t.name),
            }
        }
    }

    #[test]
    fn test_catalog_covers_gated_and_auth_tools() {
        let gated = AUTH_TOOLS
            .iter()
            .chain(&GMAIL_SEND_TOOLS)
            .chain(&GMAIL_MODIFY_TOOLS)
            .chain(&GMAIL_COMPOSE_TOOLS)
            .chain(&CALENDAR_WRITE_TOOLS);
        for name in gated {
            assert!(ToolCatalog::get(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_every_service_has_tools() {
        for service in ServiceId::ALL {
            assert!(ToolCatalog::for_service(service).next().is_some(), "{service}");
        }
    }

    #[test]
    fn test_allowed_tools_under_readonly_gmail() {
        let config = PolicyConfig::load(
            &MapSource::new()
                .with(keys::SCOPE_PROFILE, "readonly")
                .with(keys::SERVICES, "gmail"),
        );
        let allowed: Vec<_> = allowed_tools(&config, ToolRegistry::standard())
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert!(allowed.contains(&"google_auth"));
        assert!(allowed.contains(&"gmail_get_message"));
        assert!(!allowed.contains(&"gmail_send"));
        assert!(!allowed.contains(&"gmail_trash"));
        assert!(!allowed.contains(&"gmail_create_draft"));
        assert!(!allowed.iter().any(|name| name.starts_with("drive_")));
    }

    #[test]
    fn test_allowed_tools_with_everything_enabled() {
        let config = PolicyConfig::load(
            &MapSource::new()
                .with(keys::SCOPE_PROFILE, "full")
                .with(keys::SERVICES, "all"),
        );
        assert_eq!(allowed_tools(&config, ToolRegistry::standard()).len(), TOOLS.len());
    }
}
