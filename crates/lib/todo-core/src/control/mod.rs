use std::{error::Error, fmt, sync::Arc};

use todo_store::{TitleMatch, TodoItem};
use tracing::error;

use crate::store::{StoreError, TodoStore};

pub mod todos;

pub use todos::AddTodoRequest;

/// Failure taxonomy reported back to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Caller input was rejected before any remote call.
    InvalidArgument(String),
    /// The store was consulted and nothing matched.
    NotFound(String),
    RemoteUnavailable(String),
    /// The store answered with records that do not fit the todo schema.
    RemoteSchemaMismatch(String),
}

impl TodoError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::RemoteUnavailable(_) => "remote_unavailable",
            Self::RemoteSchemaMismatch(_) => "remote_schema_mismatch",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message)
            | Self::NotFound(message)
            | Self::RemoteUnavailable(message)
            | Self::RemoteSchemaMismatch(message) => message,
        }
    }
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl Error for TodoError {}

impl From<StoreError> for TodoError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "todo store call failed");
        match err {
            StoreError::Record(err) => Self::RemoteSchemaMismatch(format!(
                "the Notion database does not match the todo layout ({err})"
            )),
            StoreError::Transport(_) => {
                Self::RemoteUnavailable("could not reach the Notion API".to_string())
            }
            StoreError::Api {
                status, message, ..
            } => Self::RemoteUnavailable(describe_api_failure(status, &message)),
            StoreError::Decode(_) => {
                Self::RemoteUnavailable("the Notion API returned an unreadable response".to_string())
            }
            StoreError::InvalidConfig(message) => Self::RemoteUnavailable(message),
        }
    }
}

fn describe_api_failure(status: u16, message: &str) -> String {
    match status {
        401 | 403 => format!("Notion rejected the credential (HTTP {status}): {message}"),
        404 => format!(
            "Notion could not find the database or page; check that it is shared with the integration (HTTP 404): {message}"
        ),
        429 => "Notion is rate limiting requests; try again shortly (HTTP 429)".to_string(),
        _ => format!("Notion API request failed (HTTP {status}): {message}"),
    }
}

/// Outcome of a completed lookup-and-update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTodo {
    pub item: TodoItem,
    /// Open todos that matched the lookup; the first one was completed.
    pub matched: usize,
    pub match_mode: TitleMatch,
}

/// Executes todo operations against a [`TodoStore`].
#[derive(Clone)]
pub struct TodoControlPlane {
    store: Arc<dyn TodoStore>,
}

impl TodoControlPlane {
    pub fn new<S: TodoStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[must_use]
    pub fn from_arc(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }
}
