// Chat Widget Client
// Caller side of the chat protocol: reply parsing, lead hand-off and the
// HTTP session used by terminal front ends

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

use crate::models::{
    ChatRequest, ConnectionMethod, LeadSubmission, Turn, LEAD_MARKER_PREFIX, OPTIONS_PREFIX,
};

/// Notice shown when the lead hand-off fails
pub const LEAD_SUBMIT_NOTICE: &str = "Failed to submit. Please try again.";

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Cannot reach chat server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Chat server returned HTTP {0}")]
    Status(u16),

    #[error("Reply stream was not valid UTF-8")]
    InvalidText,
}

pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetErrorCode {
    InvalidUrl,
    Transport,
    Status,
    InvalidText,
}

impl WidgetErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetErrorCode::InvalidUrl => "WIDGET_INVALID_URL",
            WidgetErrorCode::Transport => "WIDGET_TRANSPORT",
            WidgetErrorCode::Status => "WIDGET_HTTP_STATUS",
            WidgetErrorCode::InvalidText => "WIDGET_INVALID_TEXT",
        }
    }
}

impl WidgetError {
    pub fn code(&self) -> WidgetErrorCode {
        match self {
            WidgetError::InvalidUrl(_) => WidgetErrorCode::InvalidUrl,
            WidgetError::Transport(_) => WidgetErrorCode::Transport,
            WidgetError::Status(_) => WidgetErrorCode::Status,
            WidgetError::InvalidText => WidgetErrorCode::InvalidText,
        }
    }
}

// ============================================================================
// Reply parsing
// ============================================================================

/// Lead fields recovered from a `LEAD_READY:` marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadMarker {
    pub name: String,
    pub email: String,
    pub service: String,
}

impl LeadMarker {
    /// Parse the text following `LEAD_READY:`.
    ///
    /// Only a complete marker is accepted: exactly
    /// `name|email|mobile|service|Email`. The service falls back to the third
    /// field when the fourth is empty, and must not end up empty.
    pub fn parse(fields: &str) -> Option<Self> {
        let parts: Vec<&str> = fields.trim_end().split('|').collect();
        if parts.len() != 5 || parts[4] != ConnectionMethod::Email.as_str() {
            return None;
        }
        let service = [parts[3], parts[2]]
            .into_iter()
            .find(|s| !s.is_empty())?;

        Some(Self {
            name: parts[0].to_string(),
            email: parts[1].to_string(),
            service: service.to_string(),
        })
    }

    pub fn to_submission(&self) -> LeadSubmission {
        LeadSubmission {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            service: Some(self.service.clone()),
        }
    }
}

/// Remove the hand-off marker (and the blank line before it) from display text
pub fn strip_marker(text: &str) -> &str {
    match text.find(LEAD_MARKER_PREFIX) {
        Some(at) => {
            let visible = &text[..at];
            visible.strip_suffix("\n\n").unwrap_or(visible)
        }
        None => text,
    }
}

/// A reply as the widget renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub display: String,
    pub options: Vec<String>,
    pub lead: Option<LeadMarker>,
}

impl ParsedReply {
    pub fn parse(text: &str) -> Self {
        let lead = text
            .find(LEAD_MARKER_PREFIX)
            .and_then(|at| LeadMarker::parse(&text[at + LEAD_MARKER_PREFIX.len()..]));

        let visible = strip_marker(text);
        let (display, options) = match visible.strip_prefix(OPTIONS_PREFIX) {
            Some(rest) => {
                let mut parts = rest.split('|');
                let prompt = parts.next().unwrap_or_default().to_string();
                (prompt, parts.map(str::to_string).collect())
            }
            None => (visible.to_string(), Vec::new()),
        };

        Self {
            display,
            options,
            lead,
        }
    }
}

// ============================================================================
// Submission guard
// ============================================================================

/// Allows one lead submission in flight at a time
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicBool>,
}

/// Held while a submission runs; dropping it frees the guard
#[derive(Debug)]
pub struct SubmissionPermit {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<SubmissionPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionPermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

// ============================================================================
// HTTP session
// ============================================================================

/// Lead hand-off running in the background
#[derive(Debug)]
pub struct PendingSubmission {
    handle: JoinHandle<Option<String>>,
}

impl PendingSubmission {
    /// Wait for the hand-off; `Some` carries the notice to show on failure
    pub async fn notice(self) -> Option<String> {
        match self.handle.await {
            Ok(notice) => notice,
            Err(e) => {
                log::error!("[widget] Lead submission task failed: {}", e);
                Some(LEAD_SUBMIT_NOTICE.to_string())
            }
        }
    }
}

/// Result of one visitor message
#[derive(Debug)]
pub struct WidgetTurn {
    pub reply: ParsedReply,
    /// Set when this turn handed a lead to the intake endpoint
    pub submission: Option<PendingSubmission>,
}

/// Chat session against a running server
pub struct ChatWidget {
    client: Client,
    base_url: Url,
    session_id: Uuid,
    transcript: Vec<Turn>,
    guard: SubmissionGuard,
}

impl ChatWidget {
    pub fn new(base_url: &str) -> WidgetResult<Self> {
        let base = format!("{}/", base_url.trim_end_matches('/'));
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(&base)?,
            session_id: Uuid::new_v4(),
            transcript: Vec::new(),
            guard: SubmissionGuard::new(),
        })
    }

    /// Id tagging this session's log lines
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Transcript sent on every request; assistant turns are stored as
    /// displayed, without the hand-off marker
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    /// Send a visitor message and read the streamed reply.
    ///
    /// `on_text` receives the display text so far after every chunk. A failed
    /// or cut-off reply leaves the transcript unchanged and submits nothing.
    pub async fn send<F>(&mut self, text: &str, on_text: F) -> WidgetResult<WidgetTurn>
    where
        F: FnMut(&str),
    {
        self.transcript.push(Turn::user(text.trim()));

        let raw = match self.fetch_reply(on_text).await {
            Ok(raw) => raw,
            Err(e) => {
                self.transcript.pop();
                log::warn!("[widget] session={} Reply failed: {} ({})", self.session_id, e, e.code().as_str());
                return Err(e);
            }
        };

        let reply = ParsedReply::parse(&raw);
        self.transcript.push(Turn::assistant(strip_marker(&raw)));

        // One submission per completed marker, at most one in flight
        let submission = match &reply.lead {
            Some(lead) => match self.guard.try_begin() {
                Some(permit) => Some(self.spawn_submission(lead.to_submission(), permit)?),
                None => {
                    log::debug!("[widget] session={} Lead submission already in flight, skipping", self.session_id);
                    None
                }
            },
            None => None,
        };

        Ok(WidgetTurn { reply, submission })
    }

    async fn fetch_reply<F>(&self, mut on_text: F) -> WidgetResult<String>
    where
        F: FnMut(&str),
    {
        let url = self.base_url.join("api/chat")?;
        let response = self
            .client
            .post(url)
            .json(&ChatRequest::new(self.transcript.clone()))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WidgetError::Status(response.status().as_u16()));
        }

        let mut raw = String::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut stream = std::pin::pin!(response.bytes_stream());
        while let Some(chunk) = stream.next().await {
            pending.extend_from_slice(&chunk?);
            let valid = match std::str::from_utf8(&pending) {
                Ok(s) => s.len(),
                Err(e) if e.error_len().is_none() => e.valid_up_to(),
                Err(_) => return Err(WidgetError::InvalidText),
            };
            raw.push_str(std::str::from_utf8(&pending[..valid]).map_err(|_| WidgetError::InvalidText)?);
            pending.drain(..valid);
            on_text(strip_marker(&raw));
        }
        if !pending.is_empty() {
            return Err(WidgetError::InvalidText);
        }
        Ok(raw)
    }

    /// Post the lead in the background; the permit is released when the task ends
    fn spawn_submission(
        &self,
        lead: LeadSubmission,
        permit: SubmissionPermit,
    ) -> WidgetResult<PendingSubmission> {
        let url = self.base_url.join("api/leads")?;
        let client = self.client.clone();
        let session_id = self.session_id;

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let result = match client.post(url).json(&lead).send().await {
                Ok(response) if response.status().is_success() => Ok(()),
                Ok(response) => Err(WidgetError::Status(response.status().as_u16())),
                Err(e) => Err(WidgetError::from(e)),
            };

            match result {
                Ok(()) => {
                    log::info!(
                        "[widget] session={} Lead submitted for {}",
                        session_id,
                        lead.service.as_deref().unwrap_or_default()
                    );
                    None
                }
                Err(e) => {
                    log::error!("[widget] session={} Lead submission failed: {} ({})", session_id, e, e.code().as_str());
                    Some(LEAD_SUBMIT_NOTICE.to_string())
                }
            }
        });

        Ok(PendingSubmission { handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINAL_REPLY: &str = "Perfect! Thank you Maria Lopez. I've received your information about Web App Development. Our team will contact you at maria@example.com soon! 🚀\n\nLEAD_READY:Maria Lopez|maria@example.com||Web App Development|Email";

    #[test]
    fn test_parse_options_reply() {
        let reply = ParsedReply::parse("OPTIONS:Great! What service are you interested in?|Web App Development|Headless E-Commerce");
        assert_eq!(reply.display, "Great! What service are you interested in?");
        assert_eq!(reply.options, vec!["Web App Development", "Headless E-Commerce"]);
        assert!(reply.lead.is_none());
    }

    #[test]
    fn test_parse_final_reply_hides_marker() {
        let reply = ParsedReply::parse(FINAL_REPLY);
        assert!(reply.display.ends_with("soon! 🚀"));
        assert!(!reply.display.contains("LEAD_READY"));
        assert_eq!(
            reply.lead,
            Some(LeadMarker {
                name: "Maria Lopez".to_string(),
                email: "maria@example.com".to_string(),
                service: "Web App Development".to_string(),
            })
        );
    }

    #[test]
    fn test_marker_service_fallback() {
        let lead = LeadMarker::parse("Ana|ana@x.io|Headless E-Commerce||Email").unwrap();
        assert_eq!(lead.service, "Headless E-Commerce");
        assert!(LeadMarker::parse("Ana|ana@x.io|||Email").is_none());
    }

    #[test]
    fn test_truncated_marker_is_ignored() {
        for cut in [
            "Maria Lopez|maria@example.com||Web Ap",
            "Maria Lopez|maria@example.com|",
            "Maria Lopez|maria@example.com||Web App Development|",
            "Maria Lopez|maria@example.com||Web App Development|Ema",
            "Ana|ana@x.io|Headless E-Commerce",
        ] {
            assert!(LeadMarker::parse(cut).is_none(), "{}", cut);
            let text = format!("Perfect!\n\nLEAD_READY:{}", cut);
            let reply = ParsedReply::parse(&text);
            assert!(reply.lead.is_none(), "{}", cut);
            assert_eq!(reply.display, "Perfect!");
        }
    }

    #[test]
    fn test_strip_marker_partial_stream() {
        assert_eq!(strip_marker("Perfect!\n\nLEAD_REA"), "Perfect!\n\nLEAD_REA");
        assert_eq!(strip_marker("Perfect!\n\nLEAD_READY:Ma"), "Perfect!");
        assert_eq!(strip_marker("LEAD_READY:a|b|c"), "");
    }

    #[test]
    fn test_guard_single_permit() {
        let guard = SubmissionGuard::new();
        let permit = guard.try_begin().expect("first permit");
        assert!(guard.is_busy());
        assert!(guard.clone().try_begin().is_none());
        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_widget_base_url() {
        let widget = ChatWidget::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(
            widget.base_url.join("api/chat").unwrap().as_str(),
            "http://127.0.0.1:3000/api/chat"
        );
        assert!(widget.transcript().is_empty());
        assert!(!widget.guard().is_busy());
        assert_ne!(widget.session_id(), ChatWidget::new("http://127.0.0.1:3000").unwrap().session_id());
        assert!(ChatWidget::new("not a url").is_err());
    }
}
