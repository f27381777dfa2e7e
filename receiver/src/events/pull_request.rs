//! `pull_request` event handling.

use tracing::info;

use crate::events::{is_bot, WebhookPayload};

/// Fields logged for a `pull_request` event.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestRecord {
    pub action: Option<String>,
    pub number: Option<u64>,
    pub merged: Option<bool>,
    pub repository: String,
    /// Author of the pull request (`pull_request.user`)
    pub author: Option<String>,
    /// Account that triggered this delivery
    pub sender: Option<String>,
    pub sender_is_bot: bool,
}

impl PullRequestRecord {
    pub fn from_payload(payload: &WebhookPayload) -> Self {
        let sender = payload.login_at(&["sender"]);

        PullRequestRecord {
            action: payload.action(),
            number: payload
                .u64_at(&["pull_request", "number"])
                .or_else(|| payload.u64_at(&["number"])),
            merged: payload.bool_at(&["pull_request", "merged"]),
            repository: payload.repository_name(),
            author: payload.login_at(&["pull_request", "user"]),
            sender_is_bot: is_bot(sender.as_deref()),
            sender,
        }
    }
}

/// Extract and log a `pull_request` event.
pub fn handle(payload: &WebhookPayload) -> PullRequestRecord {
    let record = PullRequestRecord::from_payload(payload);

    info!(
        action = record.action.as_deref(),
        number = record.number,
        merged = record.merged,
        repo = %record.repository,
        author = record.author.as_deref(),
        sender = record.sender.as_deref(),
        sender_bot = record.sender_is_bot,
        "github_pull_request"
    );

    record
}
