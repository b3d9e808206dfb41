use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use crate::models::{ProductCreate, ProductFilter, ProductUpdate};
use crate::services::{UploadCategory, UploadKind};
use crate::web::forms::RemovedBody;
use crate::web::helpers::{error_response, require_admin};
use crate::web::multipart::{read_record_form, FileRule};
use crate::web::state::AppState;

fn product_file_rules() -> [FileRule; 1] {
    [FileRule {
        field: "file",
        kind: UploadKind::Image,
        category: UploadCategory::product_images(),
    }]
}

#[get("/api/products")]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductFilter>,
) -> impl Responder {
    match state.db.list_products(&query).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

#[get("/api/products/{id}")]
pub async fn get_product(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.db.get_product(path.into_inner()).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => error_response(&e),
    }
}

#[post("/api/products")]
pub async fn create_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    let form = match read_record_form(payload, &state.uploads, &product_file_rules()).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    let mut input: ProductCreate = match form.parse_input() {
        Ok(input) => input,
        Err(e) => {
            form.discard(&state.uploads).await;
            return error_response(&e);
        }
    };

    if let Some(url) = form.file_url("file") {
        input.image = Some(url);
    }

    match state.db.create_product(&input).await {
        Ok(product) => HttpResponse::Created().json(product),
        Err(e) => {
            form.discard(&state.uploads).await;
            error_response(&e)
        }
    }
}

#[put("/api/products/{id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    let id = path.into_inner();

    let form = match read_record_form(payload, &state.uploads, &product_file_rules()).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    let mut input: ProductUpdate = if form.input.is_some() {
        match form.parse_input() {
            Ok(input) => input,
            Err(e) => {
                form.discard(&state.uploads).await;
                return error_response(&e);
            }
        }
    } else {
        ProductUpdate::default()
    };

    if let Some(url) = form.file_url("file") {
        input.image = Some(url);
    }

    match state.db.update_product(id, &input).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => {
            form.discard(&state.uploads).await;
            error_response(&e)
        }
    }
}

#[delete("/api/products/{id}")]
pub async fn remove_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_admin(&req, &state) {
        return resp;
    }

    match state.db.remove_product(path.into_inner()).await {
        Ok(id) => HttpResponse::Ok().json(RemovedBody {
            id,
            message: "Product successfully removed from database".into(),
        }),
        Err(e) => error_response(&e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(remove_product);
}
