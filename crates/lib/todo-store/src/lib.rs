//! Storage models and schema helpers for notion-todo-mcp.
//!
//! This crate defines the todo data model and owns the single translation
//! point between Notion page records and [`TodoItem`] values.

pub mod models;
pub mod record;
pub mod schema;

pub use models::*;
