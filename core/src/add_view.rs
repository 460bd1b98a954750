//! State behind the add-todo page: the form plus the submit round trip.

use std::time::Duration;

use tracing::{info, warn};

use crate::client::{TodoClient, TodoService};
use crate::error::ApiError;
use crate::form::TodoForm;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::NewTodo;
use crate::view::{describe_failure, FetchTicket, Notification, Subscription};

const ADDED_DURATION: Duration = Duration::from_millis(2000);
const ERROR_DURATION: Duration = Duration::from_millis(5000);

/// What the page does once a create request resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notification: Notification,
    /// Route to navigate to; `None` keeps the user on the form.
    pub navigate_to: Option<String>,
}

#[derive(Debug, Default)]
pub struct AddTodoView {
    pub form: TodoForm,
    pending: Option<NewTodo>,
    subscription: Subscription,
}

impl AddTodoView {
    pub fn new(form: TodoForm) -> Self {
        Self {
            form,
            pending: None,
            subscription: Subscription::default(),
        }
    }

    /// Build the create request from the current form values. Returns
    /// `Ok(None)` while the form is invalid, matching a disabled button.
    pub fn submit(&mut self, client: &TodoClient) -> Result<Option<(FetchTicket, HttpRequest)>, ApiError> {
        let Some(draft) = self.form.draft() else {
            return Ok(None);
        };
        let request = client.build_create_todo(&draft)?;
        self.pending = Some(draft);
        Ok(Some((self.subscription.issue(), request)))
    }

    /// Turn the create response into a notification and, on success, a
    /// route to the new todo. `None` means the response was stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        client: &TodoClient,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<SubmitOutcome> {
        if !self.subscription.is_live(ticket) {
            warn!("discarding stale create response");
            return None;
        }
        let owner = self.pending.take().map(|d| d.owner).unwrap_or_default();
        Some(match result.and_then(|response| client.parse_create_todo(response)) {
            Ok(id) => {
                info!(id = %id, "todo created");
                SubmitOutcome {
                    notification: Notification::info(format!("Added todo {owner}"), ADDED_DURATION),
                    navigate_to: Some(format!("/todos/{id}")),
                }
            }
            Err(err) => SubmitOutcome {
                notification: Notification::dismissable(describe_failure(&err), ERROR_DURATION),
                navigate_to: None,
            },
        })
    }

    /// Submit through `service`. `None` when the form is invalid.
    pub fn submit_with<T: Transport>(&mut self, service: &TodoService<T>) -> Option<SubmitOutcome> {
        let (ticket, request) = match self.submit(service.client()) {
            Ok(Some(pair)) => pair,
            Ok(None) => return None,
            Err(err) => {
                let ticket = self.subscription.issue();
                return self.complete(ticket, service.client(), Err(err));
            }
        };
        let result = service.execute(request);
        self.complete(ticket, service.client(), result)
    }

    pub fn teardown(&mut self) {
        self.subscription.cancel();
    }
}
