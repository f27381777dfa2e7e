//! Web server module for receiving GitHub webhooks.
//!
//! Requests are handled inline: verify, parse, log, acknowledge. Nothing is
//! queued or stored.

pub mod handlers;
pub mod signature;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    github_webhook, health, root, AppState, MessageResponse, WebhookResponse, DELIVERY_HEADER,
    EVENT_HEADER, SIGNATURE_HEADER,
};
pub use signature::{compute_signature, verify_signature};

/// Largest payload GitHub will deliver.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/hello", get(health))
        .route("/webhook", post(github_webhook))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::Config;

    const SECRET: &str = "test-secret";

    const WORKFLOW_RUN_BODY: &str = r#"{"action":"completed","workflow_run":{"id":42,"conclusion":"success","actor":{"login":"alice"}},"repository":{"full_name":"org/repo"}}"#;

    fn app(secret: Option<&str>) -> Router {
        let config = Config {
            github_webhook_secret: secret.map(str::to_string),
            ..Config::default()
        };
        router(AppState::new(config))
    }

    async fn post_webhook(
        app: Router,
        event: Option<&str>,
        signature: Option<&str>,
        body: &str,
    ) -> Response {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header("content-type", "application/json");
        if let Some(event) = event {
            builder = builder.header(EVENT_HEADER, event);
        }
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        app.oneshot(request).await.unwrap()
    }

    async fn get_path(app: Router, path: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        for secret in [None, Some(SECRET)] {
            let response = get_path(app(secret), "/health").await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await, json!({"message": "OK"}));
        }

        let response = get_path(app(None), "/hello").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let response = get_path(app(None), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"message": "hello world"}));
    }

    #[tokio::test]
    async fn test_webhook_accepted_without_secret() {
        let response =
            post_webhook(app(None), Some("workflow_run"), None, WORKFLOW_RUN_BODY).await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(json_body(response).await, json!({"status": "accepted"}));
    }

    #[tokio::test]
    async fn test_webhook_ignores_signature_without_secret() {
        let response = post_webhook(
            app(None),
            Some("workflow_run"),
            Some("sha1=not-checked"),
            WORKFLOW_RUN_BODY,
        )
        .await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_webhook_valid_signature() {
        let signature = compute_signature(SECRET, WORKFLOW_RUN_BODY.as_bytes()).unwrap();
        let response = post_webhook(
            app(Some(SECRET)),
            Some("workflow_run"),
            Some(&signature),
            WORKFLOW_RUN_BODY,
        )
        .await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_webhook_missing_signature() {
        let response =
            post_webhook(app(Some(SECRET)), Some("workflow_run"), None, WORKFLOW_RUN_BODY).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["status"], "missing_signature");
    }

    #[tokio::test]
    async fn test_webhook_invalid_signature() {
        let signature = compute_signature("wrong-secret", WORKFLOW_RUN_BODY.as_bytes()).unwrap();
        let response = post_webhook(
            app(Some(SECRET)),
            Some("workflow_run"),
            Some(&signature),
            WORKFLOW_RUN_BODY,
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["status"], "invalid_signature");
    }

    #[tokio::test]
    async fn test_webhook_unsupported_signature_format() {
        let response = post_webhook(
            app(Some(SECRET)),
            Some("workflow_run"),
            Some("sha1=abcdef"),
            WORKFLOW_RUN_BODY,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["status"],
            "unsupported_signature_format"
        );
    }

    #[tokio::test]
    async fn test_webhook_malformed_json() {
        let response = post_webhook(app(None), Some("workflow_run"), None, "{\"action\":").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "invalid_json");
    }

    #[tokio::test]
    async fn test_webhook_signed_malformed_json() {
        // Signature is checked before parsing, so a correctly signed bad body is still a 400
        let body = "not json";
        let signature = compute_signature(SECRET, body.as_bytes()).unwrap();
        let response =
            post_webhook(app(Some(SECRET)), Some("pull_request"), Some(&signature), body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhook_missing_required_field() {
        let response = post_webhook(
            app(None),
            Some("pull_request"),
            None,
            r#"{"action":"opened","repository":{}}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "invalid_payload");
    }

    #[tokio::test]
    async fn test_webhook_unknown_event_accepted() {
        let response = post_webhook(
            app(None),
            Some("push"),
            None,
            r#"{"ref":"refs/heads/main"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(json_body(response).await, json!({"status": "accepted"}));
    }

    #[tokio::test]
    async fn test_webhook_unknown_event_non_object_body_accepted() {
        for body in ["[1,2]", "null"] {
            let response = post_webhook(app(None), Some("push"), None, body).await;
            assert_eq!(response.status(), StatusCode::ACCEPTED, "body {body:?}");
        }
    }

    #[tokio::test]
    async fn test_webhook_known_event_non_object_body_rejected() {
        let response = post_webhook(app(None), Some("check_suite"), None, "[1,2]").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "invalid_payload");
    }

    #[tokio::test]
    async fn test_webhook_missing_event_header() {
        let response = post_webhook(app(None), None, None, WORKFLOW_RUN_BODY).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "missing_event_type");
    }

    #[tokio::test]
    async fn test_webhook_get_not_allowed() {
        let response = get_path(app(None), "/webhook").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
