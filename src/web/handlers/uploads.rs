use actix_multipart::Multipart;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use crate::common::ContentError;
use crate::services::{UploadCategory, UploadKind};
use crate::web::helpers::{error_response, require_admin};
use crate::web::multipart::read_batch_files;
use crate::web::state::AppState;

async fn batch_upload(
    state: &AppState,
    req: &HttpRequest,
    payload: Multipart,
    category: Result<UploadCategory, crate::common::UploadError>,
    kind: UploadKind,
) -> HttpResponse {
    if let Err(resp) = require_admin(req, state) {
        return resp;
    }

    let category = match category {
        Ok(category) => category,
        Err(e) => return error_response(&ContentError::Upload(e)),
    };

    match read_batch_files(payload, &state.uploads, &category, kind).await {
        Ok(files) => {
            let urls: Vec<String> = files.into_iter().map(|f| f.url).collect();
            log::info!("Batch upload into {} stored {} file(s)", category.as_str(), urls.len());
            HttpResponse::Ok().json(urls)
        }
        Err(e) => error_response(&e),
    }
}

#[post("/api/uploads/images/{target}")]
pub async fn upload_images(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let category = UploadCategory::batch_images(&path);
    batch_upload(&state, &req, payload, category, UploadKind::Image).await
}

#[post("/api/uploads/videos/{target}")]
pub async fn upload_videos(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let category = UploadCategory::batch_videos(&path);
    batch_upload(&state, &req, payload, category, UploadKind::Video).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_images).service(upload_videos);
}
