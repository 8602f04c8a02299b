use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::loader::load_dashboard_data;
use crate::models::{DashboardQuery, DashboardSnapshot, FailureReason, LoadOutcome, QueryFailure};
use crate::source::DashboardSource;

/// A finished load, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub snapshot: Arc<DashboardSnapshot>,
    pub failures: Vec<QueryFailure>,
}

impl ReadyView {
    /// True when at least one value on screen is a default rather than fetched data.
    pub fn defaults_applied(&self) -> bool {
        !self.failures.is_empty()
    }

    /// All-default view used when the load task ended without publishing.
    fn abandoned(reason: &str) -> Self {
        let failures = [
            DashboardQuery::TotalConversations,
            DashboardQuery::TotalMessages,
            DashboardQuery::ActiveConversations,
            DashboardQuery::RecentConversations,
        ]
        .into_iter()
        .map(|query| QueryFailure { query, reason: FailureReason::Error(reason.to_string()) })
        .collect();
        Self { snapshot: Arc::new(DashboardSnapshot::default()), failures }
    }
}

impl From<LoadOutcome> for ReadyView {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Complete(snapshot) => Self { snapshot: Arc::new(snapshot), failures: Vec::new() },
            LoadOutcome::Degraded { snapshot, failures } => Self { snapshot: Arc::new(snapshot), failures },
        }
    }
}

/// `Loading` is the only initial state; `Ready` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready(ReadyView),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// One mounted dashboard. The load it starts lives no longer than the view:
/// unmounting (or dropping) aborts the task, and a result that still arrives
/// finds no receiver and is discarded.
pub struct DashboardView {
    state: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl DashboardView {
    /// Mount the view and start its single load. Must be called inside a tokio runtime.
    pub fn mount(source: Arc<dyn DashboardSource>) -> Self {
        let (tx, rx) = watch::channel(ViewState::Loading);
        let task = tokio::spawn(async move {
            let outcome = load_dashboard_data(source.as_ref()).await;
            if tx.send(ViewState::Ready(ReadyView::from(outcome))).is_err() {
                log::debug!("Dashboard view unmounted before load completed, result dropped");
            }
        });
        Self { state: rx, task }
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Watch state transitions. The channel closes once the load task is gone.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait for the terminal state.
    pub async fn ready(&self) -> ReadyView {
        let mut rx = self.state.clone();
        let result = rx
            .wait_for(|s| !s.is_loading())
            .await
            .map(|state| state.clone());
        match result {
            Ok(ViewState::Ready(view)) => view,
            Ok(ViewState::Loading) | Err(_) => {
                log::error!("Error fetching dashboard data: load task ended without a result");
                ReadyView::abandoned("load task ended without a result")
            }
        }
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.task.abort();
    }
}
