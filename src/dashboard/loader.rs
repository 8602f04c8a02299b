use std::time::Instant;

use crate::errors::FetchError;
use crate::models::conversation::{STATUS_ACTIVE, sort_most_recent_first};
use crate::models::{
    Conversation, DashboardQuery, DashboardSnapshot, DashboardStats, FailureReason, LoadOutcome,
    QueryFailure, RECENT_LIMIT,
};
use crate::source::{CountFilter, DashboardSource, Table, TopQuery};

/// Run the four dashboard reads concurrently and fold them into one snapshot.
///
/// Each read is defaulted on its own: a failed or empty answer zeroes only
/// its own field. Failures are logged here and reported in the outcome;
/// nothing is returned as an error.
pub async fn load_dashboard_data(source: &dyn DashboardSource) -> LoadOutcome {
    let started = Instant::now();
    let active = CountFilter::status(STATUS_ACTIVE);

    let (total_conversations, total_messages, active_conversations, recent) = futures::join!(
        source.count(Table::Conversations, None),
        source.count(Table::Messages, None),
        source.count(Table::Conversations, Some(&active)),
        source.query_top(TopQuery::most_recent(RECENT_LIMIT)),
    );

    let mut failures = Vec::new();
    let stats = DashboardStats {
        total_conversations: settle_count(DashboardQuery::TotalConversations, total_conversations, &mut failures),
        total_messages: settle_count(DashboardQuery::TotalMessages, total_messages, &mut failures),
        active_conversations: settle_count(DashboardQuery::ActiveConversations, active_conversations, &mut failures),
    };
    let recent = settle_recent(recent, &mut failures);

    let outcome = LoadOutcome::from_parts(DashboardSnapshot { stats, recent }, failures);
    if outcome.is_degraded() {
        log::warn!(
            "Dashboard loaded with defaults ({} of 4 queries unusable)",
            outcome.failures().len()
        );
    }
    log::debug!("Dashboard load finished in {:?}", started.elapsed());
    outcome
}

fn settle_count(
    query: DashboardQuery,
    result: Result<Option<i64>, FetchError>,
    failures: &mut Vec<QueryFailure>,
) -> u64 {
    match result {
        Ok(Some(n)) if n >= 0 => n as u64,
        Ok(Some(n)) => {
            log::error!("Error fetching dashboard data: {} returned negative count {n}", query.label());
            failures.push(QueryFailure { query, reason: FailureReason::Absent });
            0
        }
        Ok(None) => {
            log::warn!("Dashboard query returned nothing: {}", query.label());
            failures.push(QueryFailure { query, reason: FailureReason::Absent });
            0
        }
        Err(e) => {
            log::error!("Error fetching dashboard data: {}: {e}", query.label());
            failures.push(QueryFailure { query, reason: FailureReason::Error(e.to_string()) });
            0
        }
    }
}

fn settle_recent(
    result: Result<Option<Vec<Conversation>>, FetchError>,
    failures: &mut Vec<QueryFailure>,
) -> Vec<Conversation> {
    let query = DashboardQuery::RecentConversations;
    match result {
        Ok(Some(mut rows)) => {
            sort_most_recent_first(&mut rows);
            rows.truncate(RECENT_LIMIT);
            rows
        }
        Ok(None) => {
            log::warn!("Dashboard query returned nothing: {}", query.label());
            failures.push(QueryFailure { query, reason: FailureReason::Absent });
            Vec::new()
        }
        Err(e) => {
            log::error!("Error fetching dashboard data: {}: {e}", query.label());
            failures.push(QueryFailure { query, reason: FailureReason::Error(e.to_string()) });
            Vec::new()
        }
    }
}
