// Contact form endpoint
// POST /api/contact: forwards a visitor message to the agency inbox

use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use pivcor_lib::models::{ApiResponse, ContactSubmission};
use pivcor_lib::services::intake::{IntakeError, CONTACT_ACCEPTED_MESSAGE};

use super::{failure, ApiReply};
use crate::state::SharedState;

pub async fn handle_contact(State(state): State<SharedState>, body: Bytes) -> ApiReply {
    let submission: ContactSubmission = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(e) => {
            log::error!("[contact] Failed to parse request body: {}", e);
            return failure(StatusCode::BAD_REQUEST, IntakeError::InvalidBody.to_string());
        }
    };

    match state.intake.submit_contact(&submission).await {
        Ok(_) => (StatusCode::OK, Json(ApiResponse::ok(CONTACT_ACCEPTED_MESSAGE))),
        Err(e @ (IntakeError::InvalidBody | IntakeError::MissingFields)) => {
            failure(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
