pub use auth::*;
pub use uploads::*;

mod auth;
mod uploads;
