//! The read-only query interface the dashboard consumes.
//!
//! Table and column names are closed enums so implementations can place them
//! into SQL text without escaping concerns.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::Conversation;

pub use self::memory::MemorySource;
pub use self::postgres::PgSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Conversations,
    Messages,
}

impl Table {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Table::Conversations => "conversations",
            Table::Messages => "messages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationColumn {
    Status,
    LastMessageAt,
}

impl ConversationColumn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ConversationColumn::Status => "status",
            ConversationColumn::LastMessageAt => "last_message_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Equality predicate on a single conversation column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountFilter {
    pub column: ConversationColumn,
    pub value: String,
}

impl CountFilter {
    pub fn status(value: &str) -> Self {
        Self { column: ConversationColumn::Status, value: value.to_string() }
    }
}

/// Top-N read over `conversations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopQuery {
    pub order_by: ConversationColumn,
    pub direction: SortDir,
    pub limit: usize,
}

impl TopQuery {
    pub fn most_recent(limit: usize) -> Self {
        Self { order_by: ConversationColumn::LastMessageAt, direction: SortDir::Desc, limit }
    }
}

/// Data-access capability handed to the dashboard. Never mutated or closed by it.
///
/// `Ok(None)` means the backend answered without a usable value.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn count(&self, table: Table, filter: Option<&CountFilter>) -> Result<Option<i64>, FetchError>;

    async fn query_top(&self, query: TopQuery) -> Result<Option<Vec<Conversation>>, FetchError>;
}
