use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use newsdesk::common::{init_logging, GeneralError};
use newsdesk::config::AppConfig;
use newsdesk::db::Database;
use newsdesk::services::{AdminGuard, UploadLimits, UploadStore};
use newsdesk::web::{self, middleware::RequestLogger, AppState};

#[actix_web::main]
async fn main() -> Result<(), GeneralError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_logging(config.log_level)?;

    let db = Database::new(&config.database_url, config.max_connections).await?;

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    let uploads = UploadStore::new(
        config.uploads_dir.clone(),
        UploadLimits {
            image_max_bytes: config.image_max_bytes,
            video_max_bytes: config.video_max_bytes,
        },
    );

    let guard = AdminGuard::new(config.admin_token.clone());
    if !guard.is_enabled() {
        log::warn!("ADMIN_TOKEN is not set; mutating routes are open");
    }

    let state = Data::new(AppState::new(db, uploads, guard));
    let uploads_dir = config.uploads_dir.clone();

    log::info!("Serving uploads from {}", uploads_dir.display());
    log::info!("Listening on http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestLogger)
            .configure(web::configure)
            .service(Files::new("/uploads", uploads_dir.clone()))
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
