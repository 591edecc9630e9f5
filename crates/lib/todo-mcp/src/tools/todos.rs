use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use todo_core::control::AddTodoRequest;
use todo_core::format::{render_added, render_all, render_completed, render_today};

use crate::{TodoMcp, helpers};

/// Parameters for adding a todo.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddTodoParams {
    /// Todo title. Must not be empty.
    pub title: String,
    /// When the todo is scheduled: `today` or `later`. Defaults to `today`.
    #[schemars(extend("enum" = ["today", "later", null], "default" = "today"))]
    pub when: Option<String>,
}

/// Parameters for completing a todo.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompleteTodoParams {
    /// Title of the open todo to complete. Exact match preferred, partial match as fallback.
    pub title: String,
}

#[tool_router(router = tool_router_todos, vis = "pub(crate)")]
impl TodoMcp {
    #[tool(name = "list-todos", description = "List every todo with its schedule and completion state.")]
    async fn list_todos(&self) -> Result<CallToolResult, ErrorData> {
        Ok(match self.control.list_todos().await {
            Ok(items) => helpers::text_result(render_all(&items)),
            Err(err) => helpers::todo_err(&err),
        })
    }

    #[tool(name = "list-today", description = "List open todos scheduled for today.")]
    async fn list_today(&self) -> Result<CallToolResult, ErrorData> {
        Ok(match self.control.list_today().await {
            Ok(items) => helpers::text_result(render_today(&items)),
            Err(err) => helpers::todo_err(&err),
        })
    }

    #[tool(name = "add-todo", description = "Add a todo. `when` is `today` (default) or `later`.")]
    async fn add_todo(
        &self,
        Parameters(params): Parameters<AddTodoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = AddTodoRequest {
            title: params.title,
            when: params.when,
        };
        Ok(match self.control.add_todo(request).await {
            Ok(item) => helpers::text_result(render_added(&item)),
            Err(err) => helpers::todo_err(&err),
        })
    }

    #[tool(name = "complete-todo", description = "Mark the open todo with the given title as completed.")]
    async fn complete_todo(
        &self,
        Parameters(params): Parameters<CompleteTodoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(match self.control.complete_todo(&params.title).await {
            Ok(completed) => helpers::text_result(render_completed(&completed)),
            Err(err) => helpers::todo_err(&err),
        })
    }
}
