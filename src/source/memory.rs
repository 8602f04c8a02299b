use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use super::{ConversationColumn, CountFilter, DashboardSource, SortDir, Table, TopQuery};
use crate::errors::FetchError;
use crate::models::conversation::{Conversation, sort_most_recent_first};

/// Identifies one injectable read for fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Read {
    Count(Table, bool),
    Top,
}

/// In-process `DashboardSource`. Holds its rows in memory and can be told to
/// fail or answer "nothing" on specific reads.
#[derive(Debug, Default)]
pub struct MemorySource {
    conversations: Vec<Conversation>,
    message_count: i64,
    failing: HashSet<Read>,
    absent: HashSet<Read>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl MemorySource {
    pub fn new(conversations: Vec<Conversation>, message_count: i64) -> Self {
        Self { conversations, message_count, ..Default::default() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Sample clinic data for demo mode.
    pub fn demo() -> Self {
        let now = Utc::now();
        let rows = [
            ("c-1001", Some("Jane Doe"), "555-0100", "active", 5),
            ("c-1002", Some("Omar Haddad"), "555-0142", "active", 42),
            ("c-1003", None, "555-0199", "closed", 180),
            ("c-1004", Some("Lena Fischer"), "555-0117", "resolved", 1440),
            ("c-1005", Some("Priya Raman"), "555-0163", "active", 2900),
        ];
        let conversations = rows
            .into_iter()
            .map(|(id, name, phone, status, minutes_ago)| Conversation {
                id: id.to_string(),
                customer_name: name.map(str::to_string),
                customer_phone: phone.to_string(),
                status: status.to_string(),
                last_message_at: Some(now - ChronoDuration::minutes(minutes_ago)),
            })
            .collect();
        Self::new(conversations, 37)
    }

    pub fn fail_count(mut self, table: Table) -> Self {
        self.failing.insert(Read::Count(table, false));
        self
    }

    pub fn fail_active_count(mut self) -> Self {
        self.failing.insert(Read::Count(Table::Conversations, true));
        self
    }

    pub fn fail_recent(mut self) -> Self {
        self.failing.insert(Read::Top);
        self
    }

    pub fn fail_all(self) -> Self {
        self.fail_count(Table::Conversations)
            .fail_count(Table::Messages)
            .fail_active_count()
            .fail_recent()
    }

    pub fn absent_count(mut self, table: Table) -> Self {
        self.absent.insert(Read::Count(table, false));
        self
    }

    pub fn absent_active_count(mut self) -> Self {
        self.absent.insert(Read::Count(Table::Conversations, true));
        self
    }

    pub fn absent_recent(mut self) -> Self {
        self.absent.insert(Read::Top);
        self
    }

    /// Delay every read by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of reads served (or failed) so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, read: Read) -> Result<bool, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.contains(&read) {
            return Err(FetchError::Unavailable(format!("injected failure for {read:?}")));
        }
        Ok(!self.absent.contains(&read))
    }

    fn column_value(conversation: &Conversation, column: ConversationColumn) -> Option<String> {
        match column {
            ConversationColumn::Status => Some(conversation.status.clone()),
            ConversationColumn::LastMessageAt => conversation.last_message_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[async_trait]
impl DashboardSource for MemorySource {
    async fn count(&self, table: Table, filter: Option<&CountFilter>) -> Result<Option<i64>, FetchError> {
        if !self.enter(Read::Count(table, filter.is_some())).await? {
            return Ok(None);
        }
        let count = match (table, filter) {
            (Table::Messages, None) => self.message_count,
            (Table::Messages, Some(_)) => {
                return Err(FetchError::Unavailable("messages cannot be filtered".to_string()));
            }
            (Table::Conversations, None) => self.conversations.len() as i64,
            (Table::Conversations, Some(f)) => self
                .conversations
                .iter()
                .filter(|c| Self::column_value(c, f.column).as_deref() == Some(f.value.as_str()))
                .count() as i64,
        };
        Ok(Some(count))
    }

    async fn query_top(&self, query: TopQuery) -> Result<Option<Vec<Conversation>>, FetchError> {
        if !self.enter(Read::Top).await? {
            return Ok(None);
        }
        let mut rows = self.conversations.clone();
        match query.order_by {
            ConversationColumn::LastMessageAt => sort_most_recent_first(&mut rows),
            ConversationColumn::Status => rows.sort_by(|a, b| b.status.cmp(&a.status)),
        }
        if query.direction == SortDir::Asc {
            rows.reverse();
        }
        rows.truncate(query.limit);
        Ok(Some(rows))
    }
}
