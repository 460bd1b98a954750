//! Pieces shared by the view controllers.
//!
//! # Design
//! Views never run I/O. They hand out a `FetchTicket` with each request and
//! take it back with the response. `Subscription` remembers the newest
//! ticket and whether the view was torn down, so a superseded or orphaned
//! response is dropped instead of overwriting newer state.

use std::time::Duration;

use crate::error::ApiError;

/// Identifies one outbound request issued by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Subscription {
    generation: u64,
    cancelled: bool,
}

impl Subscription {
    /// Start a new request, superseding any in flight.
    pub fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
        }
    }

    pub fn is_live(&self, ticket: FetchTicket) -> bool {
        !self.cancelled && ticket.generation == self.generation
    }

    /// Teardown: every outstanding and future ticket is dead.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Result of handing a response back to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed(Notification),
    Stale,
}

/// Transient message for the user (a snackbar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub action: Option<String>,
    pub duration: Duration,
}

impl Notification {
    pub fn info(message: String, duration: Duration) -> Self {
        Self {
            message,
            action: None,
            duration,
        }
    }

    pub fn dismissable(message: String, duration: Duration) -> Self {
        Self {
            message,
            action: Some("OK".to_string()),
            duration,
        }
    }
}

/// User-facing text for a failed request.
pub fn describe_failure(err: &ApiError) -> String {
    match err {
        ApiError::HttpError { .. } | ApiError::Transport(_) => format!(
            "Problem contacting the server – Error Code: {}\nMessage: {err}",
            err.status_code()
        ),
        _ => format!("Problem in the client – Error: {err}"),
    }
}
