//! Store interfaces and the Notion implementation.
//!
//! The store layer issues the remote calls; it never validates caller input.

pub mod notion;

use std::{error::Error, fmt};

use async_trait::async_trait;
use todo_store::record::RecordError;
use todo_store::{NewTodo, TodoFilter, TodoItem};

pub use notion::{NotionStoreConfig, NotionTodoStore};

#[derive(Debug)]
pub enum StoreError {
    /// The request never produced a response (connect, TLS, timeout).
    Transport(Box<reqwest::Error>),
    /// The API answered with a non-success status.
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The response body was not the JSON shape the API documents.
    Decode(String),
    Record(RecordError),
    InvalidConfig(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Api {
                status,
                code: Some(code),
                message,
            } => write!(f, "API error {status} ({code}): {message}"),
            Self::Api {
                status,
                code: None,
                message,
            } => write!(f, "API error {status}: {message}"),
            Self::Decode(message) => write!(f, "malformed response: {message}"),
            Self::Record(err) => write!(f, "{err}"),
            Self::InvalidConfig(message) => write!(f, "invalid store configuration: {message}"),
        }
    }
}

impl Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<RecordError> for StoreError {
    fn from(err: RecordError) -> Self {
        Self::Record(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote persistence for todos. Each method is one logical remote call.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Returns matching records in the store's own order.
    async fn query(&self, filter: &TodoFilter) -> StoreResult<Vec<TodoItem>>;

    /// Creates an open todo and returns it with its assigned identifier.
    async fn create(&self, todo: NewTodo) -> StoreResult<TodoItem>;

    /// Sets the completed flag on one record, leaving other fields alone.
    async fn mark_completed(&self, id: &str) -> StoreResult<TodoItem>;
}
