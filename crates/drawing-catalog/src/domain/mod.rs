//! Domain types: categories, catalog rows and BOM rows.

pub mod category;
pub mod record;

pub use category::*;
pub use record::*;
