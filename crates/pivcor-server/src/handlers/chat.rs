// Chat endpoint
// POST /api/chat: computes the next chatbot reply and streams it as plain text

use std::panic::{catch_unwind, AssertUnwindSafe};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use pivcor_lib::models::ChatRequest;
use pivcor_lib::services::chat::{self, GREETING_TEXT};
use pivcor_lib::services::paced_stream;
use tokio::time::Instant;

use crate::state::SharedState;

/// Reply text for a raw request body; never fails
pub fn reply_for_body(body: &[u8]) -> String {
    let request: ChatRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("[chat] Unreadable request body: {}", e);
            return GREETING_TEXT.to_string();
        }
    };
    let turns = request.into_turns();

    match catch_unwind(AssertUnwindSafe(|| chat::reply_text(&turns))) {
        Ok(text) => text,
        Err(_) => {
            log::error!("[chat] Reply computation panicked; falling back to greeting");
            GREETING_TEXT.to_string()
        }
    }
}

pub async fn handle_chat(State(state): State<SharedState>, body: Bytes) -> Response {
    let deadline = Instant::now() + state.config.max_duration;
    let text = reply_for_body(&body);

    // A deadline error aborts the body instead of ending it cleanly
    let stream = paced_stream(text, state.config.pacing, Some(deadline));

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}
