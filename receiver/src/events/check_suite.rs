//! `check_suite` event handling.

use tracing::info;

use crate::events::{is_bot, WebhookPayload};

/// Fields logged for a `check_suite` event.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSuiteRecord {
    pub action: Option<String>,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub repository: String,
    pub head_branch: Option<String>,
    pub sender: Option<String>,
    pub sender_is_bot: bool,
}

impl CheckSuiteRecord {
    pub fn from_payload(payload: &WebhookPayload) -> Self {
        let sender = payload.login_at(&["sender"]);

        CheckSuiteRecord {
            action: payload.action(),
            status: payload
                .str_at(&["check_suite", "status"])
                .map(str::to_string),
            conclusion: payload
                .str_at(&["check_suite", "conclusion"])
                .map(str::to_string),
            repository: payload.repository_name(),
            head_branch: payload
                .str_at(&["check_suite", "head_branch"])
                .map(str::to_string),
            sender_is_bot: is_bot(sender.as_deref()),
            sender,
        }
    }
}

/// Extract and log a `check_suite` event.
pub fn handle(payload: &WebhookPayload) -> CheckSuiteRecord {
    let record = CheckSuiteRecord::from_payload(payload);

    info!(
        action = record.action.as_deref(),
        status = record.status.as_deref(),
        conclusion = record.conclusion.as_deref(),
        repo = %record.repository,
        branch = record.head_branch.as_deref(),
        actor = record.sender.as_deref(),
        bot = record.sender_is_bot,
        "github_check_suite"
    );

    record
}
