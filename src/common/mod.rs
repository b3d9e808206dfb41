pub use errors::*;
pub use logging::*;

mod errors;
mod logging;
mod macros;
