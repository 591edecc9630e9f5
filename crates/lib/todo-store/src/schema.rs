pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_API_VERSION: &str = "2022-06-28";

pub const PROP_TITLE: &str = "Task";
pub const PROP_SCHEDULE: &str = "When";
pub const PROP_COMPLETED: &str = "Checkbox";

/// Largest page size the Notion query endpoint accepts.
pub const QUERY_PAGE_SIZE: u32 = 100;

pub fn database_query_path(database_id: &str) -> String {
    format!("databases/{database_id}/query")
}

pub fn page_path(page_id: &str) -> String {
    format!("pages/{page_id}")
}
