//! Translation between Notion page JSON and [`TodoItem`].
//!
//! Every assumption about the database layout (property names and types)
//! lives here and in [`crate::schema`].

use std::{error::Error, fmt};

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::models::{NewTodo, Schedule, TitleMatch, TodoFilter, TodoItem};
use crate::schema::{PROP_COMPLETED, PROP_SCHEDULE, PROP_TITLE, QUERY_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    MissingField(&'static str),
    InvalidField { field: &'static str, reason: String },
    /// The property exists but the row leaves it unset, as a fresh "+ New" row does.
    Unfilled(&'static str),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "record is missing `{field}`"),
            Self::InvalidField { field, reason } => {
                write!(f, "record field `{field}` is invalid: {reason}")
            }
            Self::Unfilled(field) => write!(f, "record field `{field}` is not filled in"),
        }
    }
}

impl Error for RecordError {}

/// Reads a Notion page object into a [`TodoItem`].
///
/// # Errors
/// Returns `RecordError` if the page lacks one of the three todo properties
/// or holds a value outside the fixed schema.
pub fn item_from_page(page: &Value) -> Result<TodoItem, RecordError> {
    let id = page
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(RecordError::MissingField("id"))?;
    let properties = page
        .get("properties")
        .and_then(Value::as_object)
        .ok_or(RecordError::MissingField("properties"))?;

    Ok(TodoItem {
        id: id.to_string(),
        title: read_title(properties)?,
        schedule: read_schedule(properties)?,
        completed: read_checkbox(properties)?,
    })
}

/// Reads every page in a query response `results` array.
///
/// Rows with an empty title or no `When` option are skipped with a warning.
///
/// # Errors
/// Returns `RecordError` on the first page that does not fit the schema.
pub fn items_from_results(results: &[Value]) -> Result<Vec<TodoItem>, RecordError> {
    let mut items = Vec::with_capacity(results.len());
    for page in results {
        match item_from_page(page) {
            Ok(item) => items.push(item),
            Err(RecordError::Unfilled(field)) => {
                let id = page.get("id").and_then(Value::as_str).unwrap_or_default();
                warn!(id, field, "skipping unfilled notion row");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(items)
}

fn read_title(properties: &Map<String, Value>) -> Result<String, RecordError> {
    let fragments = properties
        .get(PROP_TITLE)
        .and_then(|prop| prop.get("title"))
        .and_then(Value::as_array)
        .ok_or(RecordError::MissingField(PROP_TITLE))?;

    let title: String = fragments
        .iter()
        .filter_map(|fragment| {
            fragment
                .get("plain_text")
                .or_else(|| fragment.get("text").and_then(|text| text.get("content")))
                .and_then(Value::as_str)
        })
        .collect();

    let title = title.trim();
    if title.is_empty() {
        return Err(RecordError::Unfilled(PROP_TITLE));
    }
    Ok(title.to_string())
}

fn read_schedule(properties: &Map<String, Value>) -> Result<Schedule, RecordError> {
    let select = properties
        .get(PROP_SCHEDULE)
        .and_then(|prop| prop.get("select"))
        .ok_or(RecordError::MissingField(PROP_SCHEDULE))?;

    let name = select
        .get("name")
        .and_then(Value::as_str)
        .ok_or(RecordError::Unfilled(PROP_SCHEDULE))?;

    name.parse().map_err(|err| RecordError::InvalidField {
        field: PROP_SCHEDULE,
        reason: format!("{err}"),
    })
}

fn read_checkbox(properties: &Map<String, Value>) -> Result<bool, RecordError> {
    properties
        .get(PROP_COMPLETED)
        .and_then(|prop| prop.get("checkbox"))
        .and_then(Value::as_bool)
        .ok_or(RecordError::MissingField(PROP_COMPLETED))
}

/// Property payload for a freshly created, open todo.
#[must_use]
pub fn new_page_properties(todo: &NewTodo) -> Value {
    json!({
        PROP_TITLE: {
            "title": [{ "type": "text", "text": { "content": todo.title } }]
        },
        PROP_SCHEDULE: {
            "select": { "name": todo.schedule.as_str() }
        },
        PROP_COMPLETED: {
            "checkbox": false
        }
    })
}

/// Request body for `POST /pages`.
#[must_use]
pub fn create_page_body(database_id: &str, todo: &NewTodo) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": new_page_properties(todo),
    })
}

/// Request body for `PATCH /pages/{id}` that only touches the checkbox.
#[must_use]
pub fn mark_completed_body() -> Value {
    json!({
        "properties": {
            PROP_COMPLETED: { "checkbox": true }
        }
    })
}

/// Notion filter object for a [`TodoFilter`]; `None` queries everything.
#[must_use]
pub fn query_filter(filter: &TodoFilter) -> Option<Value> {
    let open = json!({ "property": PROP_COMPLETED, "checkbox": { "equals": false } });
    match filter {
        TodoFilter::All => None,
        TodoFilter::OpenToday => Some(json!({
            "and": [
                { "property": PROP_SCHEDULE, "select": { "equals": Schedule::Today.as_str() } },
                open,
            ]
        })),
        TodoFilter::OpenTitle { title, mode } => {
            let condition = match mode {
                TitleMatch::Exact => json!({ "equals": title }),
                TitleMatch::Contains => json!({ "contains": title }),
            };
            Some(json!({
                "and": [
                    { "property": PROP_TITLE, "title": condition },
                    open,
                ]
            }))
        }
    }
}

/// Request body for `POST /databases/{id}/query`.
#[must_use]
pub fn query_body(filter: &TodoFilter, start_cursor: Option<&str>) -> Value {
    let mut body = json!({ "page_size": QUERY_PAGE_SIZE });
    if let Some(filter) = query_filter(filter) {
        body["filter"] = filter;
    }
    if let Some(cursor) = start_cursor {
        body["start_cursor"] = Value::String(cursor.to_string());
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: Value, when: Value, checkbox: Value) -> Value {
        json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "properties": {
                "Task": { "id": "title", "type": "title", "title": title },
                "When": { "id": "abc", "type": "select", "select": when },
                "Checkbox": { "id": "def", "type": "checkbox", "checkbox": checkbox }
            }
        })
    }

    #[test]
    fn reads_page_into_item() {
        let value = page(
            json!([
                { "type": "text", "plain_text": "check ", "text": { "content": "check " } },
                { "type": "text", "plain_text": "emails", "text": { "content": "emails" } }
            ]),
            json!({ "id": "1", "name": "later", "color": "blue" }),
            json!(true),
        );

        let item = item_from_page(&value).expect("page should parse");

        assert_eq!(item.id, "59833787-2cf9-4fdf-8782-e53db20768a5");
        assert_eq!(item.title, "check emails");
        assert_eq!(item.schedule, Schedule::Later);
        assert!(item.completed);
    }

    #[test]
    fn falls_back_to_text_content_without_plain_text() {
        let value = page(
            json!([{ "type": "text", "text": { "content": "water plants" } }]),
            json!({ "name": "today" }),
            json!(false),
        );

        let item = item_from_page(&value).expect("page should parse");
        assert_eq!(item.title, "water plants");
        assert_eq!(item.schedule, Schedule::Today);
    }

    #[test]
    fn reports_missing_properties() {
        let mut value = page(json!([]), json!({ "name": "today" }), json!(false));
        value["properties"]
            .as_object_mut()
            .expect("properties object")
            .remove("Checkbox");
        value["properties"]["Task"]["title"] = json!([{ "plain_text": "x" }]);

        assert_eq!(
            item_from_page(&value),
            Err(RecordError::MissingField(PROP_COMPLETED))
        );
        assert_eq!(
            item_from_page(&json!({ "id": "x" })),
            Err(RecordError::MissingField("properties"))
        );
    }

    #[test]
    fn rejects_values_outside_schema() {
        let empty_title = page(json!([]), json!({ "name": "today" }), json!(false));
        assert_eq!(
            item_from_page(&empty_title),
            Err(RecordError::Unfilled(PROP_TITLE))
        );

        let unset = page(json!([{ "plain_text": "x" }]), Value::Null, json!(false));
        assert_eq!(
            item_from_page(&unset),
            Err(RecordError::Unfilled(PROP_SCHEDULE))
        );

        let unknown = page(
            json!([{ "plain_text": "x" }]),
            json!({ "name": "someday" }),
            json!(false),
        );
        assert!(matches!(
            item_from_page(&unknown),
            Err(RecordError::InvalidField { field: PROP_SCHEDULE, .. })
        ));
    }

    #[test]
    fn results_skip_unfilled_rows_but_not_broken_ones() {
        let valid = page(
            json!([{ "plain_text": "check emails" }]),
            json!({ "name": "today" }),
            json!(false),
        );
        let blank = page(json!([]), Value::Null, json!(false));
        let untitled = page(json!([]), json!({ "name": "later" }), json!(false));

        let items = items_from_results(&[blank, valid.clone(), untitled])
            .expect("unfilled rows should be skipped");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "check emails");

        let someday = page(
            json!([{ "plain_text": "x" }]),
            json!({ "name": "someday" }),
            json!(false),
        );
        assert!(matches!(
            items_from_results(&[valid.clone(), someday]),
            Err(RecordError::InvalidField { field: PROP_SCHEDULE, .. })
        ));

        let mut no_checkbox = valid.clone();
        no_checkbox["properties"]
            .as_object_mut()
            .expect("properties object")
            .remove("Checkbox");
        assert_eq!(
            items_from_results(&[valid, no_checkbox]),
            Err(RecordError::MissingField(PROP_COMPLETED))
        );
    }

    #[test]
    fn create_body_sets_all_three_properties() {
        let body = create_page_body(
            "db-1",
            &NewTodo {
                title: "check emails".to_string(),
                schedule: Schedule::Later,
            },
        );

        assert_eq!(body["parent"]["database_id"], "db-1");
        assert_eq!(
            body["properties"]["Task"]["title"][0]["text"]["content"],
            "check emails"
        );
        assert_eq!(body["properties"]["When"]["select"]["name"], "later");
        assert_eq!(body["properties"]["Checkbox"]["checkbox"], false);
    }

    #[test]
    fn mark_completed_body_touches_only_checkbox() {
        let body = mark_completed_body();
        let properties = body["properties"].as_object().expect("properties");
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["Checkbox"]["checkbox"], true);
    }

    #[test]
    fn query_body_encodes_filters_and_cursor() {
        let all = query_body(&TodoFilter::All, None);
        assert!(all.get("filter").is_none());
        assert_eq!(all["page_size"], 100);

        let today = query_body(&TodoFilter::OpenToday, Some("cursor-2"));
        assert_eq!(today["start_cursor"], "cursor-2");
        assert_eq!(today["filter"]["and"][0]["select"]["equals"], "today");
        assert_eq!(today["filter"]["and"][1]["checkbox"]["equals"], false);

        let contains = query_filter(&TodoFilter::OpenTitle {
            title: "email".to_string(),
            mode: TitleMatch::Contains,
        })
        .expect("title filter");
        assert_eq!(contains["and"][0]["property"], "Task");
        assert_eq!(contains["and"][0]["title"]["contains"], "email");
    }
}
