use std::fmt::{Display, Write};

use askama::Template;
use chrono::{DateTime, TimeZone, Utc};

use crate::dashboard::ViewState;
use crate::models::{Conversation, DashboardStats};

/// Shown when a conversation has no patient name.
pub const NAME_PLACEHOLDER: &str = "Patient";

/// One line in the recent-conversations list, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRow {
    pub id: String,
    pub display_name: String,
    pub phone: String,
    pub status: String,
    pub is_active: bool,
    pub last_message: String,
}

impl ConversationRow {
    pub fn from_conversation<Tz>(conversation: &Conversation, tz: &Tz, time_format: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let display_name = conversation
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(NAME_PLACEHOLDER)
            .to_string();
        Self {
            id: conversation.id.clone(),
            display_name,
            phone: conversation.customer_phone.clone(),
            status: conversation.status.clone(),
            is_active: conversation.is_active(),
            last_message: format_timestamp(conversation.last_message_at, tz, time_format),
        }
    }
}

/// Format a timestamp in `tz`. Missing timestamps render empty; a bad format
/// string falls back to RFC 3339 instead of failing the page.
pub fn format_timestamp<Tz>(ts: Option<DateTime<Utc>>, tz: &Tz, time_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(ts) = ts else {
        return String::new();
    };
    let local = ts.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", local.format(time_format)).is_err() {
        log::warn!("Invalid timestamp format '{time_format}', falling back to RFC 3339");
        return local.to_rfc3339();
    }
    out
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub app_name: String,
    pub loading: bool,
    pub stats: DashboardStats,
    pub conversations: Vec<ConversationRow>,
}

impl DashboardTemplate {
    pub fn from_state<Tz>(app_name: &str, state: &ViewState, tz: &Tz, time_format: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match state {
            ViewState::Loading => Self {
                app_name: app_name.to_string(),
                loading: true,
                stats: DashboardStats::default(),
                conversations: Vec::new(),
            },
            ViewState::Ready(ready) => Self {
                app_name: app_name.to_string(),
                loading: false,
                stats: ready.snapshot.stats,
                conversations: ready
                    .snapshot
                    .recent
                    .iter()
                    .map(|c| ConversationRow::from_conversation(c, tz, time_format))
                    .collect(),
            },
        }
    }
}
