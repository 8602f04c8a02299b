//! Integration tests for the dashboard load orchestration.

mod common;

use clinic_dashboard::dashboard::load_dashboard_data;
use clinic_dashboard::models::{
    DashboardQuery, DashboardSnapshot, DashboardStats, FailureReason, LoadOutcome, RECENT_LIMIT,
};
use clinic_dashboard::source::{MemorySource, Table};
use common::{clinic_source, conversation, latest_timestamp};

use chrono::Duration;

#[tokio::test]
async fn test_clinic_scenario_counts_and_first_entry() {
    let source = clinic_source();
    let outcome = load_dashboard_data(&source).await;

    assert!(!outcome.is_degraded());
    let snapshot = outcome.snapshot();
    assert_eq!(
        snapshot.stats,
        DashboardStats { total_conversations: 12, total_messages: 50, active_conversations: 4 }
    );
    let first = &snapshot.recent[0];
    assert_eq!(first.customer_name.as_deref(), Some("Jane Doe"));
    assert_eq!(first.customer_phone, "555-0100");
    assert!(first.is_active());
    assert_eq!(first.last_message_at, Some(latest_timestamp()));
}

#[tokio::test]
async fn test_issues_exactly_four_reads() {
    let source = clinic_source();
    load_dashboard_data(&source).await;
    assert_eq!(source.calls(), 4);
}

#[tokio::test]
async fn test_recent_list_capped_and_descending() {
    let outcome = load_dashboard_data(&clinic_source()).await;
    let recent = &outcome.snapshot().recent;

    assert_eq!(recent.len(), RECENT_LIMIT);
    for pair in recent.windows(2) {
        assert!(pair[0].last_message_at >= pair[1].last_message_at);
    }
}

#[tokio::test]
async fn test_empty_store_is_complete_with_zeros() {
    let outcome = load_dashboard_data(&MemorySource::empty()).await;
    assert_eq!(outcome, LoadOutcome::Complete(DashboardSnapshot::default()));
}

#[tokio::test]
async fn test_all_failures_still_produce_zeroed_snapshot() {
    let source = clinic_source().fail_all();
    let outcome = load_dashboard_data(&source).await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.failures().len(), 4);
    assert!(outcome.failures().iter().all(|f| matches!(f.reason, FailureReason::Error(_))));
    assert_eq!(outcome.into_snapshot(), DashboardSnapshot::default());
}

#[tokio::test]
async fn test_active_count_independent_of_other_failures() {
    let active: Vec<_> = (0..5)
        .map(|i| {
            conversation(
                &format!("a-{i}"),
                None,
                "555-0000",
                "active",
                Some(latest_timestamp() - Duration::minutes(i)),
            )
        })
        .collect();
    let source = MemorySource::new(active, 9)
        .fail_count(Table::Messages)
        .fail_recent();

    let outcome = load_dashboard_data(&source).await;
    let stats = outcome.snapshot().stats;

    assert_eq!(stats.active_conversations, 5);
    assert_eq!(stats.total_conversations, 5);
    assert_eq!(stats.total_messages, 0);
    assert!(outcome.snapshot().recent.is_empty());
    let failed: Vec<DashboardQuery> = outcome.failures().iter().map(|f| f.query).collect();
    assert_eq!(failed, vec![DashboardQuery::TotalMessages, DashboardQuery::RecentConversations]);
}

#[tokio::test]
async fn test_every_single_failure_defaults_only_its_field() {
    let full = load_dashboard_data(&clinic_source()).await.into_snapshot();

    let cases = [
        (clinic_source().fail_count(Table::Conversations), DashboardQuery::TotalConversations),
        (clinic_source().fail_count(Table::Messages), DashboardQuery::TotalMessages),
        (clinic_source().fail_active_count(), DashboardQuery::ActiveConversations),
        (clinic_source().fail_recent(), DashboardQuery::RecentConversations),
    ];

    for (source, failed) in cases {
        let outcome = load_dashboard_data(&source).await;
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].query, failed);

        let mut expected = full.clone();
        match failed {
            DashboardQuery::TotalConversations => expected.stats.total_conversations = 0,
            DashboardQuery::TotalMessages => expected.stats.total_messages = 0,
            DashboardQuery::ActiveConversations => expected.stats.active_conversations = 0,
            DashboardQuery::RecentConversations => expected.recent.clear(),
        }
        assert_eq!(outcome.snapshot(), &expected);
    }
}

#[tokio::test]
async fn test_absent_answers_default_and_are_reported() {
    let source = clinic_source()
        .absent_count(Table::Conversations)
        .absent_active_count()
        .absent_recent();
    let outcome = load_dashboard_data(&source).await;

    let stats = outcome.snapshot().stats;
    assert_eq!(stats.total_conversations, 0);
    assert_eq!(stats.active_conversations, 0);
    assert_eq!(stats.total_messages, 50);
    assert_eq!(outcome.failures().len(), 3);
    assert!(outcome.failures().iter().all(|f| f.reason == FailureReason::Absent));
}

#[tokio::test]
async fn test_loading_twice_is_idempotent() {
    let source = clinic_source();
    let first = load_dashboard_data(&source).await;
    let second = load_dashboard_data(&source).await;

    assert_eq!(first, second);
    assert_eq!(second.snapshot().recent.len(), RECENT_LIMIT);
}

#[tokio::test]
async fn test_any_failure_combination_yields_fetched_or_zero() {
    let full = load_dashboard_data(&clinic_source()).await.into_snapshot();

    for mask in 0u8..16 {
        let mut source = clinic_source();
        if mask & 0b0001 != 0 {
            source = source.fail_count(Table::Conversations);
        }
        if mask & 0b0010 != 0 {
            source = source.fail_count(Table::Messages);
        }
        if mask & 0b0100 != 0 {
            source = source.fail_active_count();
        }
        if mask & 0b1000 != 0 {
            source = source.fail_recent();
        }

        let outcome = load_dashboard_data(&source).await;
        let snapshot = outcome.snapshot();
        let pick = |bit: u8, fetched: u64| if mask & bit != 0 { 0 } else { fetched };

        assert_eq!(snapshot.stats.total_conversations, pick(0b0001, full.stats.total_conversations), "mask {mask:04b}");
        assert_eq!(snapshot.stats.total_messages, pick(0b0010, full.stats.total_messages), "mask {mask:04b}");
        assert_eq!(snapshot.stats.active_conversations, pick(0b0100, full.stats.active_conversations), "mask {mask:04b}");
        if mask & 0b1000 != 0 {
            assert!(snapshot.recent.is_empty(), "mask {mask:04b}");
        } else {
            assert_eq!(snapshot.recent, full.recent, "mask {mask:04b}");
        }
        assert_eq!(outcome.failures().len() as u32, mask.count_ones(), "mask {mask:04b}");
        assert_eq!(outcome.is_degraded(), mask != 0);
    }
}
