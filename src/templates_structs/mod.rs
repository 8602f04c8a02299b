// Template context structures for Askama templates.

mod dashboard;

pub use self::dashboard::{
    ConversationRow, DashboardTemplate, NAME_PLACEHOLDER, format_timestamp,
};
