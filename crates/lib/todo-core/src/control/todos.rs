use serde::{Deserialize, Serialize};
use todo_store::{NewTodo, Schedule, TitleMatch, TodoFilter, TodoItem};
use tracing::{info, warn};

use super::{CompletedTodo, TodoControlPlane, TodoError};

/// Input for [`TodoControlPlane::add_todo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTodoRequest {
    pub title: String,
    pub when: Option<String>,
}

impl TodoControlPlane {
    /// Lists every todo in the database, in store order.
    ///
    /// # Errors
    /// Returns `TodoError` if the store query fails or a record is malformed.
    pub async fn list_todos(&self) -> Result<Vec<TodoItem>, TodoError> {
        let items = self.store.query(&TodoFilter::All).await?;
        info!(count = items.len(), "listed todos");
        Ok(items)
    }

    /// Lists open todos scheduled for today.
    ///
    /// # Errors
    /// Returns `TodoError` if the store query fails or a record is malformed.
    pub async fn list_today(&self) -> Result<Vec<TodoItem>, TodoError> {
        let filter = TodoFilter::OpenToday;
        let mut items = self.store.query(&filter).await?;
        let returned = items.len();
        items.retain(|item| filter.matches(item));
        if items.len() != returned {
            warn!(
                dropped = returned - items.len(),
                "store returned todos outside the today filter"
            );
        }
        info!(count = items.len(), "listed today's todos");
        Ok(items)
    }

    /// Creates an open todo.
    ///
    /// # Errors
    /// Returns `TodoError::InvalidArgument` for a blank title or an unknown
    /// schedule, without touching the store; otherwise any store failure.
    pub async fn add_todo(&self, request: AddTodoRequest) -> Result<TodoItem, TodoError> {
        let title = require_title(&request.title)?;
        let schedule = parse_when(request.when.as_deref())?;

        let item = self.store.create(NewTodo { title, schedule }).await?;
        info!(id = %item.id, schedule = %item.schedule, "added todo");
        Ok(item)
    }

    /// Marks the open todo matching `title` as completed.
    ///
    /// An exact title match is tried first, then a case-insensitive substring
    /// match. Completed todos never match, so completing twice is `NotFound`.
    /// When several open todos match, the first in store order is completed.
    ///
    /// # Errors
    /// Returns `TodoError::InvalidArgument` for a blank title,
    /// `TodoError::NotFound` when no open todo matches, or any store failure.
    pub async fn complete_todo(&self, title: &str) -> Result<CompletedTodo, TodoError> {
        let title = require_title(title)?;

        let mut match_mode = TitleMatch::Exact;
        let mut matches = self.find_open(&title, match_mode).await?;
        if matches.is_empty() {
            match_mode = TitleMatch::Contains;
            matches = self.find_open(&title, match_mode).await?;
        }

        let matched = matches.len();
        let Some(target) = matches.into_iter().next() else {
            return Err(TodoError::NotFound(format!(
                "no open todo titled \"{title}\""
            )));
        };
        if matched > 1 {
            warn!(
                matched,
                id = %target.id,
                "several open todos match; completing the first in store order"
            );
        }

        let item = self.store.mark_completed(&target.id).await?;
        info!(id = %item.id, ?match_mode, "completed todo");
        Ok(CompletedTodo {
            item,
            matched,
            match_mode,
        })
    }

    async fn find_open(&self, title: &str, mode: TitleMatch) -> Result<Vec<TodoItem>, TodoError> {
        let filter = TodoFilter::OpenTitle {
            title: title.to_string(),
            mode,
        };
        let mut items = self.store.query(&filter).await?;
        items.retain(|item| filter.matches(item));
        Ok(items)
    }
}

fn require_title(title: &str) -> Result<String, TodoError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::InvalidArgument(
            "title must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Blank or missing `when` means today.
fn parse_when(when: Option<&str>) -> Result<Schedule, TodoError> {
    match when.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(Schedule::default()),
        Some(value) => value
            .parse()
            .map_err(|err| TodoError::InvalidArgument(format!("when: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(require_title("  check emails "), Ok("check emails".to_string()));
        assert!(matches!(
            require_title(" \t"),
            Err(TodoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn when_defaults_to_today() {
        assert_eq!(parse_when(None), Ok(Schedule::Today));
        assert_eq!(parse_when(Some("  ")), Ok(Schedule::Today));
        assert_eq!(parse_when(Some("Later")), Ok(Schedule::Later));
    }

    #[test]
    fn when_rejects_unknown_schedule() {
        let err = parse_when(Some("someday")).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
        assert!(err.message().contains("someday"));
    }
}
