//! `workflow_run` event handling.

use tracing::info;

use crate::events::{is_bot, WebhookPayload};

/// Fields logged for a `workflow_run` event.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRunRecord {
    pub action: Option<String>,
    pub run_id: Option<u64>,
    pub conclusion: Option<String>,
    pub head_branch: Option<String>,
    pub repository: String,
    /// The run's own actor, falling back to the delivery sender
    pub actor: Option<String>,
    pub actor_is_bot: bool,
}

impl WorkflowRunRecord {
    pub fn from_payload(payload: &WebhookPayload) -> Self {
        let actor = payload
            .login_at(&["workflow_run", "actor"])
            .or_else(|| payload.login_at(&["sender"]));

        WorkflowRunRecord {
            action: payload.action(),
            run_id: payload.u64_at(&["workflow_run", "id"]),
            conclusion: payload
                .str_at(&["workflow_run", "conclusion"])
                .map(str::to_string),
            head_branch: payload
                .str_at(&["workflow_run", "head_branch"])
                .map(str::to_string),
            repository: payload.repository_name(),
            actor_is_bot: is_bot(actor.as_deref()),
            actor,
        }
    }
}

/// Extract and log a `workflow_run` event.
pub fn handle(payload: &WebhookPayload) -> WorkflowRunRecord {
    let record = WorkflowRunRecord::from_payload(payload);

    info!(
        action = record.action.as_deref(),
        run_id = record.run_id,
        conclusion = record.conclusion.as_deref(),
        branch = record.head_branch.as_deref(),
        repo = %record.repository,
        actor = record.actor.as_deref(),
        bot = record.actor_is_bot,
        "github_workflow_run"
    );

    record
}
