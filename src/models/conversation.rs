use chrono::{DateTime, Utc};
use serde::Serialize;

pub const STATUS_ACTIVE: &str = "active";

/// Read-only projection of a row in `conversations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: String,
    pub customer_name: Option<String>,
    pub customer_phone: String,
    pub status: String,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Sort most recent first; conversations without a timestamp go last. Stable.
pub fn sort_most_recent_first(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| match (a.last_message_at, b.last_message_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
