use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse};

use crate::common::{ContentError, UploadError};
use crate::web::forms::MessageBody;
use crate::web::state::AppState;

pub fn require_admin(req: &HttpRequest, state: &AppState) -> Result<(), HttpResponse> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if state.guard.authorize(header) {
        Ok(())
    } else {
        Err(HttpResponse::Unauthorized()
            .insert_header(("WWW-Authenticate", "Bearer"))
            .json(MessageBody::new("Unauthorized")))
    }
}

pub fn error_response(err: &ContentError) -> HttpResponse {
    match err {
        ContentError::NotFound { .. } => {
            HttpResponse::NotFound().json(MessageBody::new(err.to_string()))
        }

        ContentError::Conflict { .. } | ContentError::PolicyViolation(_) => {
            HttpResponse::Conflict().json(MessageBody::new(err.to_string()))
        }

        ContentError::Validation(_) => {
            HttpResponse::BadRequest().json(MessageBody::new(err.to_string()))
        }

        ContentError::Upload(UploadError::TooLarge { .. }) => {
            HttpResponse::PayloadTooLarge().json(MessageBody::new(err.to_string()))
        }

        ContentError::Upload(e) if e.is_rejection() => {
            HttpResponse::BadRequest().json(MessageBody::new(err.to_string()))
        }

        ContentError::Upload(_) | ContentError::Database(_) => {
            log::error!("Request failed: {}", err);
            HttpResponse::InternalServerError()
                .json(MessageBody::new("An unexpected error occurred"))
        }
    }
}
