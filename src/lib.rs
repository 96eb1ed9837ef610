//! contractiq: query and export extracted contract metadata.
//!
//! The core is two pure functions over parsed contract records:
//! [`visible`] filters and orders a record collection for a keyword,
//! field and sort mode, and [`export`] projects one record into a JSON,
//! CSV or PDF-text payload. The CLI and the HTTP daemon are thin
//! surfaces over them.

pub mod cli;
pub mod export;
pub mod models;
pub mod records;
pub mod search;
pub mod server;

pub use export::{export, export_selected};
pub use search::engine::{run_query, visible, visible_indices};
