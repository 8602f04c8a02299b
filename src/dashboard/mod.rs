pub mod loader;
pub mod view;

pub use self::loader::load_dashboard_data;
pub use self::view::{DashboardView, ReadyView, ViewState};
