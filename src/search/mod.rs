//! Core query engine module.
//!
//! This module hosts the `visible`/`run_query` implementation together
//! with the per-field projection and sort-key helpers it is built from.

pub mod engine;
pub mod query;
pub mod sort;
