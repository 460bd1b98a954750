//! State behind the single-todo page.

use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{TodoClient, TodoService};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Todo, TodoId};
use crate::view::{describe_failure, Applied, FetchTicket, Notification, Subscription};

const LOAD_HELP: &str = "There was a problem loading the todo – try again.";
const ERROR_DURATION: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileError {
    pub help: String,
    pub http_response: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileState {
    #[default]
    Idle,
    Loading,
    Loaded(Todo),
    NotFound,
    Failed(ProfileError),
}

#[derive(Debug, Default)]
pub struct TodoProfileView {
    state: ProfileState,
    subscription: Subscription,
}

impl TodoProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    /// Start loading the todo named by a route parameter. A malformed id
    /// cannot exist on the server, so it goes straight to `NotFound` and no
    /// request is built.
    pub fn load(&mut self, client: &TodoClient, raw_id: &str) -> Option<(FetchTicket, HttpRequest)> {
        let ticket = self.subscription.issue();
        match raw_id.parse::<TodoId>() {
            Ok(id) => {
                self.state = ProfileState::Loading;
                Some((ticket, client.build_get_todo(&id)))
            }
            Err(err) => {
                debug!(error = %err, "todo route id rejected");
                self.state = ProfileState::NotFound;
                None
            }
        }
    }

    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        client: &TodoClient,
        result: Result<HttpResponse, ApiError>,
    ) -> Applied {
        if !self.subscription.is_live(ticket) {
            warn!("discarding stale todo response");
            return Applied::Stale;
        }
        match result.and_then(|response| client.parse_get_todo(response)) {
            Ok(Some(todo)) => {
                self.state = ProfileState::Loaded(todo);
                Applied::Updated
            }
            Ok(None) => {
                self.state = ProfileState::NotFound;
                Applied::Updated
            }
            Err(err) => {
                let message = match &err {
                    ApiError::HttpError { body, .. } => error_title(body),
                    _ => String::new(),
                };
                self.state = ProfileState::Failed(ProfileError {
                    help: LOAD_HELP.to_string(),
                    http_response: err.to_string(),
                    message,
                });
                Applied::Failed(Notification::dismissable(describe_failure(&err), ERROR_DURATION))
            }
        }
    }

    pub fn open<T: Transport>(&mut self, service: &TodoService<T>, raw_id: &str) -> Applied {
        match self.load(service.client(), raw_id) {
            Some((ticket, request)) => {
                let result = service.execute(request);
                self.apply(ticket, service.client(), result)
            }
            None => Applied::Updated,
        }
    }

    pub fn teardown(&mut self) {
        self.subscription.cancel();
    }
}

/// `title` from a JSON error body, or the raw body when it has none.
fn error_title(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("title").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "588935f57546a2daea44de7c";

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:4567/api")
    }

    fn respond(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn loads_existing_todo() {
        let mut view = TodoProfileView::new();
        let (ticket, request) = view.load(&client(), ID).unwrap();
        assert!(request.path.ends_with(ID));
        assert_eq!(view.state(), &ProfileState::Loading);

        let body = format!(r#"{{"_id":"{ID}","owner":"Chris","category":"UMM","body":"write tests","status":true}}"#);
        assert_eq!(view.apply(ticket, &client(), respond(200, &body)), Applied::Updated);
        let ProfileState::Loaded(todo) = view.state() else {
            panic!("expected loaded todo");
        };
        assert_eq!(todo.owner, "Chris");
    }

    #[test]
    fn missing_todo_is_not_an_error() {
        let mut view = TodoProfileView::new();
        let (ticket, _) = view.load(&client(), ID).unwrap();
        assert_eq!(view.apply(ticket, &client(), respond(404, "")), Applied::Updated);
        assert_eq!(view.state(), &ProfileState::NotFound);
    }

    #[test]
    fn malformed_id_skips_the_request() {
        let mut view = TodoProfileView::new();
        assert!(view.load(&client(), "chris_id").is_none());
        assert_eq!(view.state(), &ProfileState::NotFound);
    }

    #[test]
    fn server_error_fills_error_state() {
        let mut view = TodoProfileView::new();
        let (ticket, _) = view.load(&client(), ID).unwrap();
        let applied = view.apply(ticket, &client(), respond(500, "Server Error"));
        assert!(matches!(applied, Applied::Failed(_)));
        let ProfileState::Failed(error) = view.state() else {
            panic!("expected failure state");
        };
        assert_eq!(error.help, LOAD_HELP);
        assert_eq!(error.message, "Server Error");
        assert!(error.http_response.contains("500"));
    }

    #[test]
    fn error_message_uses_json_title() {
        let mut view = TodoProfileView::new();
        let (ticket, _) = view.load(&client(), ID).unwrap();
        let body = r#"{"title":"The requested todo id wasn't a legal Mongo Object ID.","status":400}"#;
        view.apply(ticket, &client(), respond(400, body));
        let ProfileState::Failed(error) = view.state() else {
            panic!("expected failure state");
        };
        assert_eq!(error.message, "The requested todo id wasn't a legal Mongo Object ID.");
        assert!(error.http_response.contains("400"));
    }

    #[test]
    fn navigating_again_drops_the_earlier_response() {
        let mut view = TodoProfileView::new();
        let (first, _) = view.load(&client(), ID).unwrap();
        let _ = view.load(&client(), "58895985a22c04e761776d54").unwrap();
        assert_eq!(view.apply(first, &client(), respond(404, "")), Applied::Stale);
        assert_eq!(view.state(), &ProfileState::Loading);
    }
}
