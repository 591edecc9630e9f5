//! MCP tool modules.
//!
//! The todo tools form the whole operation catalog.

mod todos;

pub use todos::{AddTodoParams, CompleteTodoParams};
