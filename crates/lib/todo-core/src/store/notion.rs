use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use todo_store::record::{
    create_page_body,
    item_from_page,
    items_from_results,
    mark_completed_body,
    query_body,
};
use todo_store::schema::{
    NOTION_API_BASE_URL,
    NOTION_API_VERSION,
    database_query_path,
    page_path,
};
use todo_store::{NewTodo, TodoFilter, TodoItem};
use tracing::debug;

use super::{StoreError, StoreResult, TodoStore};

const NOTION_VERSION_HEADER: &str = "notion-version";

/// Connection settings for one Notion database.
#[derive(Clone)]
pub struct NotionStoreConfig {
    pub api_key: String,
    pub database_id: String,
    pub base_url: String,
    pub api_version: String,
    pub request_timeout: Option<Duration>,
}

impl NotionStoreConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            database_id: database_id.into(),
            base_url: NOTION_API_BASE_URL.to_string(),
            api_version: NOTION_API_VERSION.to_string(),
            request_timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl fmt::Debug for NotionStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionStoreConfig")
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// [`TodoStore`] backed by the Notion REST API.
#[derive(Clone)]
pub struct NotionTodoStore {
    client: Client,
    base_url: String,
    database_id: String,
}

impl NotionTodoStore {
    /// Builds an HTTP client carrying the bearer credential and API version.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidConfig` if a setting cannot be used as a
    /// header value or the client cannot be built.
    pub fn new(config: &NotionStoreConfig) -> StoreResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::InvalidConfig("api key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        let version = HeaderValue::from_str(&config.api_version).map_err(|_| {
            StoreError::InvalidConfig("api version is not a valid header value".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(NOTION_VERSION_HEADER, version);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| StoreError::InvalidConfig(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
        })
    }

    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        serde_json::from_str(&body).map_err(|err| StoreError::Decode(err.to_string()))
    }
}

#[async_trait]
impl TodoStore for NotionTodoStore {
    async fn query(&self, filter: &TodoFilter) -> StoreResult<Vec<TodoItem>> {
        let url = self.url(&database_query_path(&self.database_id));
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0_u32;

        loop {
            let body = query_body(filter, cursor.as_deref());
            let response = self.send(self.client.post(&url).json(&body)).await?;
            pages += 1;

            let results = response
                .get("results")
                .and_then(Value::as_array)
                .ok_or_else(|| StoreError::Decode("query response has no `results` array".to_string()))?;
            items.extend(items_from_results(results)?);

            let has_more = response
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let next = response
                .get("next_cursor")
                .and_then(Value::as_str)
                .map(str::to_string);
            if !has_more || next.is_none() {
                break;
            }
            if next == cursor {
                return Err(StoreError::Decode(
                    "query pagination cursor did not advance".to_string(),
                ));
            }
            cursor = next;
        }

        debug!(?filter, pages, count = items.len(), "queried notion database");
        Ok(items)
    }

    async fn create(&self, todo: NewTodo) -> StoreResult<TodoItem> {
        let body = create_page_body(&self.database_id, &todo);
        let response = self
            .send(self.client.post(self.url("pages")).json(&body))
            .await?;
        let item = item_from_page(&response)?;
        debug!(id = %item.id, "created notion page");
        Ok(item)
    }

    async fn mark_completed(&self, id: &str) -> StoreResult<TodoItem> {
        let response = self
            .send(
                self.client
                    .patch(self.url(&page_path(id)))
                    .json(&mark_completed_body()),
            )
            .await?;
        let item = item_from_page(&response)?;
        debug!(id = %item.id, "updated notion page checkbox");
        Ok(item)
    }
}

#[derive(Deserialize)]
struct NotionErrorBody {
    code: Option<String>,
    message: Option<String>,
}

fn api_error(status: StatusCode, body: &str) -> StoreError {
    let parsed: Option<NotionErrorBody> = serde_json::from_str(body).ok();
    let (code, message) = match parsed {
        Some(NotionErrorBody { code, message }) => (code, message),
        None => (None, None),
    };
    StoreError::Api {
        status: status.as_u16(),
        code,
        message: message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        }),
    }
}
