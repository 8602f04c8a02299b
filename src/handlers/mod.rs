pub mod dashboard;

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::source::DashboardSource;

/// Shared, read-only application state handed to every worker.
pub struct AppState {
    pub source: Arc<dyn DashboardSource>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn DashboardSource>, config: AppConfig) -> Self {
        Self { source, config }
    }
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}

/// Register the dashboard routes and the 404 fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish()
    }))
    .route("/dashboard", web::get().to(dashboard::index))
    .route("/api/v1/dashboard", web::get().to(dashboard::api));
    cfg.default_service(web::to(not_found));
}
