use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Bucket a todo is scheduled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    #[default]
    Today,
    Later,
}

impl Schedule {
    pub const ALL: [Self; 2] = [Self::Today, Self::Later];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Later => "later",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScheduleError {
    pub value: String,
}

impl fmt::Display for ParseScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown schedule `{}` (expected `today` or `later`)",
            self.value
        )
    }
}

impl Error for ParseScheduleError {}

impl FromStr for Schedule {
    type Err = ParseScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|schedule| schedule.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseScheduleError {
                value: value.to_string(),
            })
    }
}

/// A todo record as seen through the remote database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub schedule: Schedule,
    pub completed: bool,
}

/// Fields supplied when creating a todo. New todos always start open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub schedule: Schedule,
}

/// How a title lookup compares against stored titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleMatch {
    Exact,
    /// Case-insensitive substring match.
    Contains,
}

impl TitleMatch {
    #[must_use]
    pub fn matches(self, candidate: &str, needle: &str) -> bool {
        match self {
            Self::Exact => candidate == needle,
            Self::Contains => candidate
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Record selection for a database query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    /// Scheduled for today and not yet completed.
    OpenToday,
    /// Not yet completed, with a title matching `title`.
    OpenTitle { title: String, mode: TitleMatch },
}

impl TodoFilter {
    #[must_use]
    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::OpenToday => item.schedule == Schedule::Today && !item.completed,
            Self::OpenTitle { title, mode } => !item.completed && mode.matches(&item.title, title),
        }
    }
}
