// Resend Mailer
// Delivers transactional e-mail through the Resend HTTP API
//
// Requires an API key.
// Default endpoint: https://api.resend.com

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{MailError, MailResult, Mailer, OutboundEmail};

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Per-request timeout for the provider call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Resend mailer
pub struct ResendMailer {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ResendMailer {
    /// `api_key: None` builds a mailer that reports `NotConfigured` on every send
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn api_url(&self, path: &str) -> MailResult<Url> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Ok(Url::parse(&base)?.join(path)?)
    }

    fn auth_headers(&self, api_key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

// Resend API types
#[derive(Debug, Serialize)]
struct ResendSendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResendSendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    #[serde(default)]
    name: Option<String>,
    message: String,
}

#[async_trait]
impl Mailer for ResendMailer {
    fn name(&self) -> &str {
        "Resend"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, email: &OutboundEmail) -> MailResult<String> {
        let api_key = self.api_key.as_deref().ok_or(MailError::NotConfigured)?;
        let url = self.api_url("emails")?;

        let request = ResendSendRequest {
            from: &email.from,
            to: vec![email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            reply_to: email.reply_to.as_deref(),
        };

        log::info!("[mailer] Sending \"{}\" to {} via Resend", email.subject, email.to);

        let response = self
            .client
            .post(url)
            .headers(self.auth_headers(api_key))
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = serde_json::from_str::<ResendError>(&body)
                .map(|e| match e.name {
                    Some(name) => format!("{}: {}", name, e.message),
                    None => e.message,
                })
                .unwrap_or_else(|_| format!("Resend API error ({}): {}", status, body));

            return Err(match status.as_u16() {
                401 | 403 => MailError::AuthFailed(message),
                429 => MailError::RateLimited,
                _ => MailError::ApiError(message),
            });
        }

        let parsed: ResendSendResponse = serde_json::from_str(&body)?;
        match parsed.id {
            Some(id) if !id.is_empty() => {
                log::info!("[mailer] Email accepted by Resend, id: {}", id);
                Ok(id)
            }
            _ => {
                log::warn!("[mailer] Resend returned success but no email id");
                Err(MailError::MissingId)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: "PIVCOR <noreply@pivcor.com>".to_string(),
            to: "contact@pivcor.com".to_string(),
            subject: "New Lead".to_string(),
            html: "<p>hi</p>".to_string(),
            reply_to: None,
        }
    }

    #[test]
    fn test_api_url() {
        let mailer = ResendMailer::new("https://api.resend.com/", Some("re_test".to_string()));
        assert_eq!(
            mailer.api_url("emails").unwrap().as_str(),
            "https://api.resend.com/emails"
        );

        let mailer = ResendMailer::new("http://127.0.0.1:9000/v1", None);
        assert_eq!(
            mailer.api_url("emails").unwrap().as_str(),
            "http://127.0.0.1:9000/v1/emails"
        );
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let mailer = ResendMailer::new(DEFAULT_RESEND_API_URL, Some("  ".to_string()));
        assert!(!mailer.is_configured());
        assert_eq!(mailer.name(), "Resend");
    }

    #[tokio::test]
    async fn test_send_without_key() {
        let mailer = ResendMailer::new(DEFAULT_RESEND_API_URL, None);
        let err = mailer.send(&email()).await.unwrap_err();
        assert!(matches!(err, MailError::NotConfigured));
    }

    #[test]
    fn test_request_shape() {
        let e = OutboundEmail {
            reply_to: Some("sam@acme.io".to_string()),
            ..email()
        };
        let request = ResendSendRequest {
            from: &e.from,
            to: vec![e.to.as_str()],
            subject: &e.subject,
            html: &e.html,
            reply_to: e.reply_to.as_deref(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["to"][0], "contact@pivcor.com");
        assert_eq!(value["reply_to"], "sam@acme.io");
    }
}
