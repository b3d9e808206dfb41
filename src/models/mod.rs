pub use inquiry::*;
pub use listing::*;
pub use news::*;
pub use news_status::*;
pub use product::*;
pub use record_kind::*;

mod inquiry;
mod listing;
mod news;
mod news_status;
mod product;
mod record_kind;

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("Field '{}' must not be empty", field));
    }

    Ok(())
}
