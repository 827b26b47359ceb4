//! Output formatters for the console table and JSON.

mod json;
mod table;

pub use self::json::*;
pub use table::*;
