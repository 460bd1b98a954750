use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub category: String,
    pub body: String,
    pub status: bool,
}

#[derive(Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub body: String,
    pub status: Option<bool>,
}

/// Insertion-ordered so equal sort keys come back in a stable order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(seed: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(seed));
    Router::new()
        .route("/api/todos", get(list_todos).post(add_todo))
        .route("/api/todos/{id}", get(get_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, seed: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

/// Fresh 24-hex-character id in the shape of a 12-byte object id.
pub fn new_id() -> String {
    Uuid::new_v4().as_bytes()[..12]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub fn is_valid_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    let message = message.into();
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "title": message, "status": 400 })),
    )
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn compare(a: &Todo, b: &Todo, key: &str) -> Ordering {
    match key {
        "_id" => a.id.cmp(&b.id),
        "category" => a.category.cmp(&b.category),
        "body" => a.body.cmp(&b.body),
        "status" => a.status.cmp(&b.status),
        _ => a.owner.cmp(&b.owner),
    }
}

async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Todo>>> {
    let status = match params.get("status").map(String::as_str) {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => return Err(bad_request(format!("Specified status '{other}' can't be parsed to a boolean"))),
    };

    let todos = db.read().await;
    let mut matching: Vec<Todo> = todos
        .iter()
        .filter(|t| params.get("owner").is_none_or(|o| contains_ignore_case(&t.owner, o)))
        .filter(|t| params.get("category").is_none_or(|c| contains_ignore_case(&t.category, c)))
        .filter(|t| params.get("body").is_none_or(|b| contains_ignore_case(&t.body, b)))
        .filter(|t| status.is_none_or(|s| t.status == s))
        .cloned()
        .collect();

    let sort_by = params.get("sortby").map_or("owner", String::as_str);
    let descending = params.get("sortorder").is_some_and(|o| o == "desc");
    matching.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    info!(count = matching.len(), "listed todos");
    Ok(Json(matching))
}

async fn add_todo(
    State(db): State<Db>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(input) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;
    if input.owner.is_empty() {
        return Err(bad_request("Todo must have a non-empty owner"));
    }
    let Some(status) = input.status else {
        return Err(bad_request("Status must be a boolean value"));
    };
    if input.category.is_empty() {
        return Err(bad_request("Todo must have a non-empty category"));
    }
    if input.body.is_empty() {
        return Err(bad_request("Todo must have a non-empty body"));
    }

    let todo = Todo {
        id: new_id(),
        owner: input.owner,
        category: input.category,
        body: input.body,
        status,
    };
    info!(id = %todo.id, owner = %todo.owner, "added todo");
    let id = todo.id.clone();
    db.write().await.push(todo);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Todo>> {
    if !is_valid_id(&id) {
        return Err(bad_request("The requested todo id wasn't a legal Mongo Object ID."));
    }
    let todos = db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "title": format!("The requested todo was not found: {id}"), "status": 404 })),
            )
        })
}
