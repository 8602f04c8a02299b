use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;

use super::AppState;
use crate::dashboard::{DashboardView, ReadyView, ViewState};
use crate::errors::{AppError, render};
use crate::models::{Conversation, DashboardStats, QueryFailure};
use crate::templates_structs::DashboardTemplate;

/// Mount a view for this request and wait for its load. If the client goes
/// away first, the handler future is dropped and the view with it.
async fn load(state: &AppState) -> ReadyView {
    let view = DashboardView::mount(state.source.clone());
    let ready = view.ready().await;
    view.unmount();
    ready
}

/// GET /dashboard
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let ready = load(&state).await;
    let tmpl = DashboardTemplate::from_state(
        &state.config.app_name,
        &ViewState::Ready(ready),
        &Local,
        &state.config.time_format,
    );
    render(tmpl)
}

#[derive(Serialize)]
pub struct ApiDashboard {
    pub status: &'static str,
    pub stats: DashboardStats,
    pub recent: Vec<Conversation>,
    pub failures: Vec<QueryFailure>,
}

impl From<ReadyView> for ApiDashboard {
    fn from(ready: ReadyView) -> Self {
        let status = if ready.defaults_applied() { "ready_with_defaults" } else { "ready" };
        Self {
            status,
            stats: ready.snapshot.stats,
            recent: ready.snapshot.recent.clone(),
            failures: ready.failures,
        }
    }
}

/// GET /api/v1/dashboard - the same snapshot as JSON.
pub async fn api(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let ready = load(&state).await;
    Ok(HttpResponse::Ok().json(ApiDashboard::from(ready)))
}
