//! Shared formatting helpers for display output.

pub mod format;

pub use format::{format_optional, format_phone};
