//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `TodoFilter` has no lifecycle of its own: views rebuild it from widget
//! state on every interaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Length of a todo identifier in hex characters (a 12-byte object id).
pub const TODO_ID_LEN: usize = 24;

/// Server-assigned identity of a persisted todo.
///
/// Always exactly 24 hexadecimal characters. Construction goes through
/// `FromStr` (or serde, which delegates to it), so a `TodoId` in hand is
/// known to be well formed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoId(String);

impl TodoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TodoId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == TODO_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(TodoId(s.to_string()))
        } else {
            Err(ApiError::InvalidId(s.to_string()))
        }
    }
}

impl TryFrom<String> for TodoId {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TodoId> for String {
    fn from(id: TodoId) -> Self {
        id.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted todo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub owner: String,
    pub category: String,
    pub body: String,
    pub status: bool,
}

/// Request payload for creating a new todo. Has no identity until the
/// server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub owner: String,
    pub category: String,
    pub body: String,
    pub status: bool,
}

/// Body of a successful create response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedTodo {
    pub id: TodoId,
}

/// Filter widgets' current state. A `None` field imposes no constraint.
///
/// `limit` only applies to local refinement; it is never sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub owner: Option<String>,
    pub category: Option<String>,
    pub body: Option<String>,
    pub status: Option<bool>,
    pub limit: Option<usize>,
}

/// Field a todo list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Owner,
    Category,
    Status,
    Body,
}

impl SortKey {
    /// Wire name, as accepted by the server's `sortby` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "_id",
            SortKey::Owner => "owner",
            SortKey::Category => "category",
            SortKey::Status => "status",
            SortKey::Body => "body",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_id" => Ok(SortKey::Id),
            "owner" => Ok(SortKey::Owner),
            "category" => Ok(SortKey::Category),
            "status" => Ok(SortKey::Status),
            "body" => Ok(SortKey::Body),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_accepts_24_hex_chars() {
        let id: TodoId = "588935f57546a2daea44de7c".parse().unwrap();
        assert_eq!(id.as_str(), "588935f57546a2daea44de7c");
        assert!("588935F57546A2DAEA44DE7C".parse::<TodoId>().is_ok());
    }

    #[test]
    fn todo_id_rejects_wrong_shape() {
        assert!("chris_id".parse::<TodoId>().is_err());
        assert!("588935f57546a2daea44de7".parse::<TodoId>().is_err());
        assert!("588935f57546a2daea44de7c0".parse::<TodoId>().is_err());
        assert!("588935f57546a2daea44de7g".parse::<TodoId>().is_err());
        assert!(matches!("".parse::<TodoId>(), Err(ApiError::InvalidId(_))));
    }

    #[test]
    fn todo_uses_underscore_id_on_the_wire() {
        let json = r#"{"_id":"588935f57546a2daea44de7c","owner":"Blanche","category":"software design","body":"In sunt ex non tempor cillum commodo amet incididunt anim qui commodo quis.","status":false}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.owner, "Blanche");
        assert!(!todo.status);
        let back = serde_json::to_value(&todo).unwrap();
        assert_eq!(back["_id"], "588935f57546a2daea44de7c");
        assert!(back.get("id").is_none());
    }

    #[test]
    fn todo_with_malformed_id_fails_to_deserialize() {
        let json = r#"{"_id":"chris_id","owner":"Chris","category":"UMM","body":"x","status":true}"#;
        assert!(serde_json::from_str::<Todo>(json).is_err());
    }

    #[test]
    fn status_must_be_a_json_boolean() {
        let json = r#"{"owner":"Fry","category":"video games","body":"sims","status":"true"}"#;
        assert!(serde_json::from_str::<NewTodo>(json).is_err());
    }

    #[test]
    fn sort_key_parses_wire_names() {
        for key in [
            SortKey::Id,
            SortKey::Owner,
            SortKey::Category,
            SortKey::Status,
            SortKey::Body,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("name".parse::<SortKey>().is_err());
    }
}
