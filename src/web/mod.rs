pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod multipart;
pub mod state;

pub use state::AppState;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::web::forms::MessageBody;

/// Registers every API route plus JSON rejections for malformed query
/// strings and bodies.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let body = MessageBody::new(format!("Invalid request: {}", err));
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = MessageBody::new(format!("Invalid request: {}", err));
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }));

    handlers::configure(cfg);
}
