// Handler modules
pub mod convert;
pub mod fetch;
pub mod utils;

// Re-export all handler functions
pub use convert::handle_convert;
pub use fetch::{FETCH_USAGE, handle_fetch};
pub use utils::RewriteReport;
