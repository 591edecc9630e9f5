//! Plain-text rendering of todo results for the assistant.

use todo_store::{TitleMatch, TodoItem};

use crate::control::{CompletedTodo, TodoError};

pub const EMPTY_LIST_MESSAGE: &str = "Your todo list is empty.";
pub const NOTHING_TODAY_MESSAGE: &str = "Nothing scheduled for today.";

/// One line per todo: schedule tag, completion mark, title.
#[must_use]
pub fn todo_line(item: &TodoItem) -> String {
    let mark = if item.completed { "[x]" } else { "[ ]" };
    format!("[{}] {mark} {}", item.schedule, item.title)
}

#[must_use]
pub fn render_all(items: &[TodoItem]) -> String {
    render_list(items, "Todos", EMPTY_LIST_MESSAGE)
}

#[must_use]
pub fn render_today(items: &[TodoItem]) -> String {
    render_list(items, "Today", NOTHING_TODAY_MESSAGE)
}

fn render_list(items: &[TodoItem], heading: &str, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut out = format!("{heading} ({}):", items.len());
    for item in items {
        out.push('\n');
        out.push_str(&todo_line(item));
    }
    out
}

#[must_use]
pub fn render_added(item: &TodoItem) -> String {
    format!(
        "Added \"{}\" for {} (id {}).",
        item.title, item.schedule, item.id
    )
}

#[must_use]
pub fn render_completed(completed: &CompletedTodo) -> String {
    let mut out = format!("Marked \"{}\" as completed.", completed.item.title);
    if completed.match_mode == TitleMatch::Contains {
        out.push_str(" No exact title match; used the closest partial match.");
    }
    if completed.matched > 1 {
        out.push_str(&format!(
            " {} open todos matched; completed the first one.",
            completed.matched
        ));
    }
    out
}

#[must_use]
pub fn render_error(err: &TodoError) -> String {
    format!("Error ({}): {}", err.kind(), err.message())
}

#[cfg(test)]
mod tests {
    use todo_store::Schedule;

    use super::*;

    fn item(title: &str, schedule: Schedule, completed: bool) -> TodoItem {
        TodoItem {
            id: format!("id-{title}"),
            title: title.to_string(),
            schedule,
            completed,
        }
    }

    #[test]
    fn lists_have_distinct_empty_messages() {
        assert_eq!(render_all(&[]), EMPTY_LIST_MESSAGE);
        assert_eq!(render_today(&[]), NOTHING_TODAY_MESSAGE);
        assert_ne!(EMPTY_LIST_MESSAGE, NOTHING_TODAY_MESSAGE);
    }

    #[test]
    fn list_lines_carry_tag_mark_and_title() {
        let text = render_all(&[
            item("check emails", Schedule::Today, false),
            item("file taxes", Schedule::Later, true),
        ]);
        assert_eq!(
            text,
            "Todos (2):\n[today] [ ] check emails\n[later] [x] file taxes"
        );
    }

    #[test]
    fn completion_mentions_ambiguity() {
        let text = render_completed(&CompletedTodo {
            item: item("check emails", Schedule::Today, true),
            matched: 2,
            match_mode: TitleMatch::Exact,
        });
        assert_eq!(
            text,
            "Marked \"check emails\" as completed. 2 open todos matched; completed the first one."
        );

        let partial = render_completed(&CompletedTodo {
            item: item("check emails", Schedule::Today, true),
            matched: 3,
            match_mode: TitleMatch::Contains,
        });
        assert_eq!(
            partial,
            "Marked \"check emails\" as completed. No exact title match; used the closest partial match. 3 open todos matched; completed the first one."
        );
    }

    #[test]
    fn errors_show_kind_and_message() {
        let err = TodoError::NotFound("no open todo titled \"x\"".to_string());
        assert_eq!(
            render_error(&err),
            "Error (not_found): no open todo titled \"x\""
        );
    }
}
