use rmcp::model::{CallToolResult, Content};
use todo_core::control::TodoError;
use todo_core::format::render_error;
use tracing::warn;

/// Wraps rendered text as a successful tool result.
pub fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Reports a todo failure in the tool result instead of as a protocol error.
pub fn todo_err(err: &TodoError) -> CallToolResult {
    warn!(kind = err.kind(), message = err.message(), "todo tool failed");
    CallToolResult::error(vec![Content::text(render_error(err))])
}
