pub use db::*;
pub use news::build_news_list_query;
pub use products::build_product_list_query;

mod db;
mod inquiries;
mod listing;
mod news;
mod products;
