use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use clinic_dashboard::config::AppConfig;
use clinic_dashboard::db;
use clinic_dashboard::handlers::{self, AppState};
use clinic_dashboard::source::{DashboardSource, MemorySource, PgSource};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    let source: Arc<dyn DashboardSource> = if config.demo {
        log::warn!("DASHBOARD_DEMO set, serving in-memory sample data");
        Arc::new(MemorySource::demo())
    } else {
        let url = config
            .database_url
            .as_deref()
            .expect("DATABASE_URL must be set (or DASHBOARD_DEMO=1)");
        let pool = db::init_pool(url, &config).expect("Failed to create DB pool");
        Arc::new(PgSource::new(pool))
    };

    let bind_addr = config.bind_addr.clone();
    let state = web::Data::new(AppState::new(source, config));

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
