//! State behind the todo list page.
//!
//! The server result is held as fetched and replaced wholesale on each
//! successful fetch. Changing a local filter only re-runs `filter_todos`
//! over it; changing a server filter means calling `request_todos` again.

use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{TodoClient, TodoService};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::refine::{filter_todos, sort_todos};
use crate::types::{SortKey, SortOrder, Todo, TodoFilter};
use crate::view::{describe_failure, Applied, FetchTicket, Notification, Subscription};

const ERROR_DURATION: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewType {
    #[default]
    Card,
    List,
}

#[derive(Debug, Default)]
pub struct TodoListView {
    pub owner: Option<String>,
    pub category: Option<String>,
    pub body: Option<String>,
    pub status: Option<bool>,
    pub limit: Option<usize>,
    pub sort: Option<(SortKey, SortOrder)>,
    pub view_type: ViewType,
    server_todos: Vec<Todo>,
    filtered_todos: Vec<Todo>,
    err_msg: Option<String>,
    subscription: Subscription,
}

impl TodoListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter built from the current widget values.
    pub fn filter(&self) -> TodoFilter {
        TodoFilter {
            owner: self.owner.clone(),
            category: self.category.clone(),
            body: self.body.clone(),
            status: self.status,
            limit: self.limit,
        }
    }

    pub fn server_todos(&self) -> &[Todo] {
        &self.server_todos
    }

    pub fn filtered_todos(&self) -> &[Todo] {
        &self.filtered_todos
    }

    pub fn error_message(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }

    /// Build the fetch for the current filters. Any earlier fetch still in
    /// flight becomes stale.
    pub fn request_todos(&mut self, client: &TodoClient) -> (FetchTicket, HttpRequest) {
        let ticket = self.subscription.issue();
        (ticket, client.build_list_todos(&self.filter()))
    }

    pub fn apply_todos(
        &mut self,
        ticket: FetchTicket,
        client: &TodoClient,
        result: Result<HttpResponse, ApiError>,
    ) -> Applied {
        if !self.subscription.is_live(ticket) {
            warn!("discarding stale todo list response");
            return Applied::Stale;
        }
        match result.and_then(|response| client.parse_list_todos(response)) {
            Ok(todos) => {
                debug!(count = todos.len(), "todo list replaced");
                self.server_todos = todos;
                self.err_msg = None;
                self.update_filter();
                Applied::Updated
            }
            Err(err) => {
                let message = describe_failure(&err);
                self.err_msg = Some(message.clone());
                Applied::Failed(Notification::dismissable(message, ERROR_DURATION))
            }
        }
    }

    /// Fetch through `service` and apply the result in one step.
    pub fn refresh<T: Transport>(&mut self, service: &TodoService<T>) -> Applied {
        let (ticket, request) = self.request_todos(service.client());
        let result = service.execute(request);
        self.apply_todos(ticket, service.client(), result)
    }

    /// Re-run local refinement (and sorting) over the held server result.
    /// With a sort selected, `limit` keeps the first records in sorted order.
    pub fn update_filter(&mut self) {
        let Some((key, order)) = self.sort else {
            self.filtered_todos = filter_todos(&self.server_todos, &self.filter());
            return;
        };
        let unlimited = TodoFilter {
            limit: None,
            ..self.filter()
        };
        let mut sorted = sort_todos(&filter_todos(&self.server_todos, &unlimited), key, order);
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            sorted.truncate(limit);
        }
        self.filtered_todos = sorted;
    }

    pub fn teardown(&mut self) {
        self.subscription.cancel();
    }
}
