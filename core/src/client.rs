//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Responses are passed through untouched: no client-side filtering happens
//! at fetch time. `TodoService` glues the two halves to a `Transport` for
//! hosts that want a single call per operation.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{CreatedTodo, NewTodo, Todo, TodoFilter, TodoId};

const OWNER_KEY: &str = "owner";
const STATUS_KEY: &str = "status";
const CATEGORY_KEY: &str = "category";
const BODY_KEY: &str = "body";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    /// Build the collection read. Only filters that are present go into the
    /// query; `status` is sent for both `true` and `false`. `limit` stays
    /// local.
    pub fn build_list_todos(&self, filter: &TodoFilter) -> HttpRequest {
        let mut query = Vec::new();
        if let Some(owner) = non_empty(&filter.owner) {
            query.push((OWNER_KEY.to_string(), owner.to_string()));
        }
        if let Some(status) = filter.status {
            query.push((STATUS_KEY.to_string(), status.to_string()));
        }
        if let Some(category) = non_empty(&filter.category) {
            query.push((CATEGORY_KEY.to_string(), category.to_string()));
        }
        if let Some(body) = non_empty(&filter.body) {
            query.push((BODY_KEY.to_string(), body.to_string()));
        }
        debug!(params = query.len(), "built list request");
        HttpRequest {
            method: HttpMethod::Get,
            path: self.todos_url(),
            query,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{id}", self.todos_url()),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.todos_url(),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, &[200])?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// A 404 is a valid outcome and yields `Ok(None)`.
    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        if response.status == 404 {
            return Ok(None);
        }
        check_status(&response, &[200])?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Extract the server-assigned id from `{"id": "..."}`.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoId, ApiError> {
        check_status(&response, &[201, 200])?;
        let created: CreatedTodo =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(created.id)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// `TodoClient` bound to a `Transport`. One outbound request per call, no
/// retries.
pub struct TodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn get_todos(&self, filter: &TodoFilter) -> Result<Vec<Todo>, ApiError> {
        let response = self.execute(self.client.build_list_todos(filter))?;
        self.client.parse_list_todos(response)
    }

    pub fn get_todo_by_id(&self, id: &TodoId) -> Result<Option<Todo>, ApiError> {
        let response = self.execute(self.client.build_get_todo(id))?;
        self.client.parse_get_todo(response)
    }

    pub fn add_todo(&self, input: &NewTodo) -> Result<TodoId, ApiError> {
        let response = self.execute(self.client.build_create_todo(input)?)?;
        self.client.parse_create_todo(response)
    }

    /// Run a request built elsewhere (views build their own).
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.path.clone();
        self.transport.execute(request).inspect_err(|e| {
            warn!(path = %path, error = %e, "todo request failed");
        })
    }
}
