use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use crate::models::InquiryCreate;
use crate::web::helpers::{error_response, require_admin};
use crate::web::state::AppState;

/// Public contact form endpoint.
#[post("/api/inquiries")]
pub async fn create_inquiry(
    state: web::Data<AppState>,
    body: web::Json<InquiryCreate>,
) -> impl Responder {
    match state.db.create_inquiry(&body).await {
        Ok(inquiry) => HttpResponse::Created().json(inquiry),
        Err(e) => error_response(&e),
    }
}

#[get("/api/inquiries")]
pub async fn list_inquiries(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    match state.db.list_inquiries().await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(&e),
    }
}

#[get("/api/inquiries/{id}")]
pub async fn get_inquiry(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    match state.db.get_inquiry(path.into_inner()).await {
        Ok(inquiry) => HttpResponse::Ok().json(inquiry),
        Err(e) => error_response(&e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_inquiry)
        .service(list_inquiries)
        .service(get_inquiry);
}
