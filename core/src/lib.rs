//! Client core for the todo manager.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), refines fetched results
//! locally, validates the add-todo form, and keeps the per-page state the
//! UI renders from.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each remote operation is split into `build_*` and `parse_*`, so the
//!   I/O boundary is explicit. `TodoService` binds the pair to a
//!   `Transport` for hosts (and tests) that want one call.
//! - `filter_todos` / `sort_todos` are pure functions over borrowed slices.
//! - Views hand out `FetchTicket`s so late responses from superseded or
//!   torn-down requests never reach displayed state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod add_view;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod list_view;
pub mod profile_view;
pub mod refine;
pub mod types;
pub mod view;

pub use add_view::{AddTodoView, SubmitOutcome};
pub use client::{TodoClient, TodoService};
pub use config::ClientConfig;
pub use error::ApiError;
pub use form::{Field, FieldState, FieldStatus, Input, RuleId, TodoForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list_view::{TodoListView, ViewType};
pub use profile_view::{ProfileError, ProfileState, TodoProfileView};
pub use refine::{filter_todos, sort_todos};
pub use types::{NewTodo, SortKey, SortOrder, Todo, TodoFilter, TodoId};
pub use view::{Applied, FetchTicket, Notification};
