//! Prelude module for calendar_date crate.
//!
//! Re-exports the derive macros from derive_more.

pub use derive_more::Display;
