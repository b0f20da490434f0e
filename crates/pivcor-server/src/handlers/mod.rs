// Request handlers

pub mod chat;
pub mod contact;
pub mod health;
pub mod leads;

use axum::{http::StatusCode, response::Json};
use pivcor_lib::models::ApiResponse;

/// JSON reply of the intake endpoints
pub type ApiReply = (StatusCode, Json<ApiResponse>);

pub(crate) fn failure(status: StatusCode, error: impl Into<String>) -> ApiReply {
    (status, Json(ApiResponse::failure(error)))
}
