//! GitHub event routing.
//!
//! The `X-GitHub-Event` header selects an [`EventKind`]; [`dispatch`] hands
//! the parsed payload to that kind's extractor, which logs one structured
//! line and returns the extracted [`EventRecord`].
//!
//! ## Processing Flow
//!
//! ```text
//! X-GitHub-Event → EventKind::from_header() ─┐
//! raw body → WebhookPayload::parse() ────────┴→ dispatch() → EventRecord
//! ```

pub mod check_suite;
pub mod payload;
pub mod pull_request;
pub mod workflow_run;

use std::fmt;

use tracing::info;

pub use check_suite::CheckSuiteRecord;
pub use payload::{WebhookPayload, UNKNOWN_REPOSITORY};
pub use pull_request::PullRequestRecord;
pub use workflow_run::WorkflowRunRecord;

/// Login suffix GitHub reserves for app and bot accounts.
pub const BOT_SUFFIX: &str = "[bot]";

/// Event types this service understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    WorkflowRun,
    CheckSuite,
    PullRequest,
    /// Any other event type, kept verbatim for logging.
    Unknown(String),
}

impl EventKind {
    /// Map an `X-GitHub-Event` value to a kind. Matching is exact and
    /// case-sensitive.
    pub fn from_header(value: &str) -> Self {
        match value {
            "workflow_run" => EventKind::WorkflowRun,
            "check_suite" => EventKind::CheckSuite,
            "pull_request" => EventKind::PullRequest,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::WorkflowRun => "workflow_run",
            EventKind::CheckSuite => "check_suite",
            EventKind::PullRequest => "pull_request",
            EventKind::Unknown(name) => name,
        }
    }

    /// Top-level object carrying the event's subject, for known kinds.
    pub fn payload_key(&self) -> Option<&'static str> {
        match self {
            EventKind::WorkflowRun => Some("workflow_run"),
            EventKind::CheckSuite => Some("check_suite"),
            EventKind::PullRequest => Some("pull_request"),
            EventKind::Unknown(_) => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from a handled event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRecord {
    WorkflowRun(WorkflowRunRecord),
    CheckSuite(CheckSuiteRecord),
    PullRequest(PullRequestRecord),
}

/// Route a parsed payload to its handler.
///
/// Never fails: unknown kinds are logged and yield `None`, and missing fields
/// in known kinds are defaulted.
pub fn dispatch(kind: &EventKind, payload: &WebhookPayload) -> Option<EventRecord> {
    let record = match kind {
        EventKind::WorkflowRun => EventRecord::WorkflowRun(workflow_run::handle(payload)),
        EventKind::CheckSuite => EventRecord::CheckSuite(check_suite::handle(payload)),
        EventKind::PullRequest => EventRecord::PullRequest(pull_request::handle(payload)),
        EventKind::Unknown(name) => {
            info!(event = %name, "github_event_unhandled");
            return None;
        }
    };

    Some(record)
}

/// Whether a login looks like an automated account.
pub fn is_bot(login: Option<&str>) -> bool {
    login.is_some_and(|l| !l.is_empty() && l.ends_with(BOT_SUFFIX))
}
