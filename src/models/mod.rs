pub mod conversation;
pub mod dashboard;

pub use self::conversation::Conversation;
pub use self::dashboard::{
    DashboardQuery, DashboardSnapshot, DashboardStats, FailureReason, LoadOutcome, QueryFailure,
    RECENT_LIMIT,
};
