pub mod inquiries;
pub mod news;
pub mod products;
pub mod uploads;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    news::configure(cfg);
    products::configure(cfg);
    inquiries::configure(cfg);
    uploads::configure(cfg);
}
