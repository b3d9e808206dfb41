use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use crate::models::{NewsCreate, NewsFilter, NewsUpdate};
use crate::services::{UploadCategory, UploadKind};
use crate::web::forms::RemovedBody;
use crate::web::helpers::{error_response, require_admin};
use crate::web::multipart::{read_record_form, FileRule};
use crate::web::state::AppState;

fn news_file_rules() -> [FileRule; 2] {
    [
        FileRule {
            field: "file",
            kind: UploadKind::Image,
            category: UploadCategory::news_images(),
        },
        FileRule {
            field: "videoFile",
            kind: UploadKind::Video,
            category: UploadCategory::news_videos(),
        },
    ]
}

#[get("/api/news")]
pub async fn list_news(
    state: web::Data<AppState>,
    query: web::Query<NewsFilter>,
) -> impl Responder {
    match state.db.list_news(&query).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

#[get("/api/news/{id}")]
pub async fn get_news(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.db.get_news(path.into_inner()).await {
        Ok(news) => HttpResponse::Ok().json(news),
        Err(e) => error_response(&e),
    }
}

#[post("/api/news")]
pub async fn create_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    let form = match read_record_form(payload, &state.uploads, &news_file_rules()).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    let mut input: NewsCreate = match form.parse_input() {
        Ok(input) => input,
        Err(e) => {
            form.discard(&state.uploads).await;
            return error_response(&e);
        }
    };

    // Uploaded files win over paths supplied in the input.
    if let Some(url) = form.file_url("file") {
        input.image = Some(url);
    }
    if let Some(url) = form.file_url("videoFile") {
        input.video = Some(url);
    }

    match state.db.create_news(&input).await {
        Ok(news) => HttpResponse::Created().json(news),
        Err(e) => {
            form.discard(&state.uploads).await;
            error_response(&e)
        }
    }
}

#[put("/api/news/{id}")]
pub async fn update_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    let id = path.into_inner();

    let form = match read_record_form(payload, &state.uploads, &news_file_rules()).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    // A file-only update carries no input part.
    let mut input: NewsUpdate = if form.input.is_some() {
        match form.parse_input() {
            Ok(input) => input,
            Err(e) => {
                form.discard(&state.uploads).await;
                return error_response(&e);
            }
        }
    } else {
        NewsUpdate::default()
    };

    if let Some(url) = form.file_url("file") {
        input.image = Some(url);
    }
    if let Some(url) = form.file_url("videoFile") {
        input.video = Some(url);
    }

    match state.db.update_news(id, &input).await {
        Ok(news) => HttpResponse::Ok().json(news),
        Err(e) => {
            form.discard(&state.uploads).await;
            error_response(&e)
        }
    }
}

#[delete("/api/news/{id}")]
pub async fn remove_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    match state.db.remove_news(path.into_inner()).await {
        Ok(id) => HttpResponse::Ok().json(RemovedBody {
            id,
            message: "News successfully removed from database".into(),
        }),
        Err(e) => error_response(&e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_news)
        .service(get_news)
        .service(create_news)
        .service(update_news)
        .service(remove_news);
}
