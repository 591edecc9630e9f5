//! MCP server implementation for notion-todo-mcp.
//!
//! This crate publishes the todo operation catalog through rmcp tool handlers
//! and wires each tool to the todo control plane.

mod helpers;
mod tools;
pub mod server;

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{ServerCapabilities, ServerInfo, Tool};
use todo_core::control::TodoControlPlane;

pub use tools::{AddTodoParams, CompleteTodoParams};

const SERVER_INSTRUCTIONS: &str = r"notion-todo-mcp manages a todo list stored in a Notion database.

Tools:
- `list-todos` lists every todo with its schedule (`today` or `later`) and completion mark.
- `list-today` lists open todos scheduled for today.
- `add-todo` creates an open todo. `title` is required; `when` is `today` (default) or `later`.
- `complete-todo` marks the open todo with the given `title` as done. An exact title match is
  preferred, otherwise the first open todo whose title contains the text is completed.

Notes:
- Completed todos are never matched again, so completing the same title twice reports not found.
- Failures come back as tool errors of the form `Error (<kind>): <message>`.";

/// MCP server wrapper around the todo control plane.
#[derive(Clone)]
pub struct TodoMcp {
    tool_router: ToolRouter<Self>,
    control: TodoControlPlane,
}

impl TodoMcp {
    #[must_use]
    pub fn new(control: TodoControlPlane) -> Self {
        Self {
            tool_router: Self::tool_router_todos(),
            control,
        }
    }

    /// Operation catalog advertised to the assistant.
    #[must_use]
    pub fn catalog(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

#[tool_handler]
impl ServerHandler for TodoMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
