// Lead intake endpoint
// POST /api/leads: receives the lead handed off by the chat widget

use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use pivcor_lib::models::{ApiResponse, LeadSubmission};
use pivcor_lib::services::intake::{IntakeError, LEAD_ACCEPTED_MESSAGE};

use super::{failure, ApiReply};
use crate::state::SharedState;

pub async fn handle_lead(State(state): State<SharedState>, body: Bytes) -> ApiReply {
    let submission: LeadSubmission = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[leads] Unreadable request body: {}", e);
            return failure(StatusCode::BAD_REQUEST, IntakeError::InvalidBody.to_string());
        }
    };

    match state.intake.submit_lead(&submission).await {
        Ok(_) => (StatusCode::OK, Json(ApiResponse::ok(LEAD_ACCEPTED_MESSAGE))),
        Err(e @ IntakeError::MissingFields) => failure(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => failure(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use pivcor_lib::services::mail::{MemoryMailer, MemoryOutcome};

    use crate::handlers::test_support::{app, post_json};

    const LEAD: &str = r#"{"name":"Maria Lopez","email":"maria@example.com","service":"Web App Development"}"#;

    #[tokio::test]
    async fn test_lead_accepted() {
        let mailer = Arc::new(MemoryMailer::new());
        let (status, json) = post_json(app(mailer.clone()), "/api/leads", LEAD).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Perfect! Our team will get in contact with you soon! 🚀");
        assert_eq!(mailer.sent()[0].subject, "New Lead: Maria Lopez - Web App Development");
    }

    #[tokio::test]
    async fn test_lead_missing_fields() {
        let mailer = Arc::new(MemoryMailer::new());
        let (status, json) =
            post_json(app(mailer.clone()), "/api/leads", r#"{"name":"Maria","email":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"success": false, "error": "Missing required fields"}));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_lead_delivery_failure() {
        let mailer = Arc::new(MemoryMailer::with_outcome(MemoryOutcome::Reject));
        let (status, json) = post_json(app(mailer), "/api/leads", LEAD).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "Failed to deliver lead");
    }

    #[tokio::test]
    async fn test_lead_unreadable_body() {
        let (status, json) = post_json(app(Arc::new(MemoryMailer::new())), "/api/leads", "nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request body");
    }
}
