//! Core types and services for notion-todo-mcp.
//!
//! This crate owns the todo control plane (validation, lookup policy, and
//! error taxonomy), the text rendering of results, and the Notion-backed
//! implementation of the [`store::TodoStore`] seam.

pub mod control;
pub mod format;
pub mod store;
