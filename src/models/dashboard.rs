use serde::Serialize;

use super::conversation::Conversation;

/// Upper bound on the recent-conversations list.
pub const RECENT_LIMIT: usize = 10;

// ---------- Types ----------

/// The three headline counts. Each one is independently defaulted to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_conversations: u64,
    pub total_messages: u64,
    pub active_conversations: u64,
}

/// Everything one refresh cycle produced. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent: Vec<Conversation>,
}

/// The four reads a dashboard load performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardQuery {
    TotalConversations,
    TotalMessages,
    ActiveConversations,
    RecentConversations,
}

impl DashboardQuery {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardQuery::TotalConversations => "total conversations",
            DashboardQuery::TotalMessages => "total messages",
            DashboardQuery::ActiveConversations => "active conversations",
            DashboardQuery::RecentConversations => "recent conversations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The source raised an error.
    Error(String),
    /// The source answered with no usable value.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFailure {
    pub query: DashboardQuery,
    pub reason: FailureReason,
}

/// Result of one dashboard load. Both arms carry a renderable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Complete(DashboardSnapshot),
    Degraded {
        snapshot: DashboardSnapshot,
        failures: Vec<QueryFailure>,
    },
}

impl LoadOutcome {
    pub fn from_parts(snapshot: DashboardSnapshot, failures: Vec<QueryFailure>) -> Self {
        if failures.is_empty() {
            LoadOutcome::Complete(snapshot)
        } else {
            LoadOutcome::Degraded { snapshot, failures }
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        match self {
            LoadOutcome::Complete(snapshot) => snapshot,
            LoadOutcome::Degraded { snapshot, .. } => snapshot,
        }
    }

    pub fn failures(&self) -> &[QueryFailure] {
        match self {
            LoadOutcome::Complete(_) => &[],
            LoadOutcome::Degraded { failures, .. } => failures,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOutcome::Degraded { .. })
    }

    pub fn into_snapshot(self) -> DashboardSnapshot {
        match self {
            LoadOutcome::Complete(snapshot) => snapshot,
            LoadOutcome::Degraded { snapshot, .. } => snapshot,
        }
    }
}
