//! Shared fixtures for dashboard integration tests.
//!
//! Everything runs against `MemorySource`, so no database is needed.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use clinic_dashboard::models::Conversation;
use clinic_dashboard::source::MemorySource;

/// Timestamp of the newest conversation in `clinic_source()`.
pub fn latest_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 9).unwrap()
}

pub fn conversation(
    id: &str,
    name: Option<&str>,
    phone: &str,
    status: &str,
    last_message_at: Option<DateTime<Utc>>,
) -> Conversation {
    Conversation {
        id: id.to_string(),
        customer_name: name.map(str::to_string),
        customer_phone: phone.to_string(),
        status: status.to_string(),
        last_message_at,
    }
}

/// 12 conversations (4 active), 50 messages. The most recent one is Jane Doe.
/// Rows are deliberately stored out of order.
pub fn clinic_conversations() -> Vec<Conversation> {
    let t = latest_timestamp();
    let mut rows = Vec::new();
    for i in 1..=11 {
        let status = if i <= 3 { "active" } else { "closed" };
        rows.push(conversation(
            &format!("c-{i:02}"),
            if i % 4 == 0 { None } else { Some("Patient Fixture") },
            &format!("555-02{i:02}"),
            status,
            Some(t - Duration::hours(i)),
        ));
    }
    rows.insert(5, conversation("c-jane", Some("Jane Doe"), "555-0100", "active", Some(t)));
    rows
}

pub fn clinic_source() -> MemorySource {
    MemorySource::new(clinic_conversations(), 50)
}

/// Undo HTML escaping that askama may apply to text we compare against.
pub fn unescape(html: &str) -> String {
    html.replace("&#x2f;", "/")
        .replace("&#47;", "/")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&amp;", "&")
}
