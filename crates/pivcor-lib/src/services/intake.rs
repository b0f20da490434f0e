// Lead & Contact Intake
// Validates intake submissions and forwards them to the agency inbox

use thiserror::Error;

use crate::models::{ContactSubmission, LeadSubmission};
use crate::services::mail::{
    ContactEmailFields, LeadEmailFields, MailError, OutboundEmail, SharedMailer,
};

pub const LEAD_ACCEPTED_MESSAGE: &str = "Perfect! Our team will get in contact with you soon! 🚀";
pub const CONTACT_ACCEPTED_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// Intake error; the display text is the public error message
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to deliver lead")]
    LeadNotDelivered(#[source] MailError),

    #[error("Failed to send email")]
    SendFailed(#[source] MailError),

    #[error("Email sent but no confirmation received")]
    MissingConfirmation,
}

pub type IntakeResult<T> = Result<T, IntakeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeErrorCode {
    InvalidBody,
    MissingFields,
    NotConfigured,
    LeadNotDelivered,
    SendFailed,
    MissingConfirmation,
}

impl IntakeErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeErrorCode::InvalidBody => "INTAKE_INVALID_BODY",
            IntakeErrorCode::MissingFields => "INTAKE_MISSING_FIELDS",
            IntakeErrorCode::NotConfigured => "INTAKE_NOT_CONFIGURED",
            IntakeErrorCode::LeadNotDelivered => "INTAKE_LEAD_NOT_DELIVERED",
            IntakeErrorCode::SendFailed => "INTAKE_SEND_FAILED",
            IntakeErrorCode::MissingConfirmation => "INTAKE_MISSING_CONFIRMATION",
        }
    }
}

impl IntakeError {
    pub fn code(&self) -> IntakeErrorCode {
        match self {
            IntakeError::InvalidBody => IntakeErrorCode::InvalidBody,
            IntakeError::MissingFields => IntakeErrorCode::MissingFields,
            IntakeError::NotConfigured => IntakeErrorCode::NotConfigured,
            IntakeError::LeadNotDelivered(_) => IntakeErrorCode::LeadNotDelivered,
            IntakeError::SendFailed(_) => IntakeErrorCode::SendFailed,
            IntakeError::MissingConfirmation => IntakeErrorCode::MissingConfirmation,
        }
    }
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Sender, recipient and backend for intake notifications
#[derive(Clone)]
pub struct Intake {
    mailer: SharedMailer,
    from: String,
    to: String,
}

impl Intake {
    pub fn new(mailer: SharedMailer, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn mailer(&self) -> &SharedMailer {
        &self.mailer
    }

    /// Accept a lead handed off by the chat widget.
    ///
    /// Returns the provider message id of the notification.
    pub async fn submit_lead(&self, submission: &LeadSubmission) -> IntakeResult<String> {
        let (Some(name), Some(email), Some(service)) = (
            required(&submission.name),
            required(&submission.email),
            required(&submission.service),
        ) else {
            log::warn!("[leads] Rejected lead with missing fields");
            return Err(IntakeError::MissingFields);
        };

        log::info!(
            "[leads] New lead captured: name={} email={} service={} at {}",
            name,
            email,
            service,
            chrono::Utc::now().to_rfc3339()
        );

        let message = OutboundEmail::lead_notification(
            &self.from,
            &self.to,
            &LeadEmailFields {
                name,
                email,
                mobile: "",
                service,
            },
        );

        match self.mailer.send(&message).await {
            Ok(id) => {
                log::info!("[leads] Lead notification sent to {} (id: {})", self.to, id);
                Ok(id)
            }
            Err(e) => {
                log::error!("[leads] Lead notification failed via {}: {} ({})", self.mailer.name(), e, e.code().as_str());
                Err(IntakeError::LeadNotDelivered(e))
            }
        }
    }

    /// Forward a contact form submission; replies go to the visitor.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> IntakeResult<String> {
        let (Some(name), Some(email), Some(body)) = (
            required(&submission.name),
            required(&submission.email),
            required(&submission.message),
        ) else {
            log::warn!("[contact] Rejected submission with missing fields");
            return Err(IntakeError::MissingFields);
        };

        if !self.mailer.is_configured() {
            log::error!("[contact] {} mailer is not configured", self.mailer.name());
            return Err(IntakeError::NotConfigured);
        }

        let message = OutboundEmail::contact_notification(
            &self.from,
            &self.to,
            &ContactEmailFields {
                name,
                email,
                company: submission.company.as_deref(),
                message: body,
            },
        );

        match self.mailer.send(&message).await {
            Ok(id) => {
                log::info!("[contact] Contact email sent to {} from {} (id: {})", self.to, email, id);
                Ok(id)
            }
            Err(MailError::NotConfigured) => Err(IntakeError::NotConfigured),
            Err(MailError::MissingId) => {
                log::error!("[contact] Provider returned success but no email id");
                Err(IntakeError::MissingConfirmation)
            }
            Err(e) => {
                log::error!("[contact] Contact email failed: {} ({})", e, e.code().as_str());
                Err(IntakeError::SendFailed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::mail::{MemoryMailer, MemoryOutcome};

    fn intake(mailer: Arc<MemoryMailer>) -> Intake {
        Intake::new(mailer, "PIVCOR <noreply@pivcor.com>", "contact@pivcor.com")
    }

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: Some("Maria Lopez".to_string()),
            email: Some("maria@example.com".to_string()),
            service: Some("Web App Development".to_string()),
        }
    }

    fn contact() -> ContactSubmission {
        ContactSubmission {
            name: Some("Sam".to_string()),
            email: Some("sam@acme.io".to_string()),
            company: Some("Acme".to_string()),
            message: Some("We need a storefront".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_lead_sends_notification() {
        let mailer = Arc::new(MemoryMailer::new());
        let id = intake(mailer.clone()).submit_lead(&lead()).await.unwrap();
        assert_eq!(id, "mem-1");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New Lead: Maria Lopez - Web App Development");
        assert_eq!(sent[0].to, "contact@pivcor.com");
    }

    #[tokio::test]
    async fn test_submit_lead_missing_fields() {
        let mailer = Arc::new(MemoryMailer::new());
        let mut submission = lead();
        submission.service = Some("   ".to_string());
        let err = intake(mailer.clone()).submit_lead(&submission).await.unwrap_err();
        assert_eq!(err.code(), IntakeErrorCode::MissingFields);
        assert_eq!(err.to_string(), "Missing required fields");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_submit_lead_delivery_failure() {
        let mailer = Arc::new(MemoryMailer::with_outcome(MemoryOutcome::NotConfigured));
        let err = intake(mailer).submit_lead(&lead()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to deliver lead");
    }

    #[tokio::test]
    async fn test_submit_contact_reply_to_visitor() {
        let mailer = Arc::new(MemoryMailer::new());
        intake(mailer.clone()).submit_contact(&contact()).await.unwrap();
        let sent = mailer.sent();
        assert_eq!(sent[0].reply_to.as_deref(), Some("sam@acme.io"));
        assert!(sent[0].html.contains("We need a storefront"));
    }

    #[tokio::test]
    async fn test_submit_contact_error_mapping() {
        let cases = [
            (MemoryOutcome::NotConfigured, "Email service not configured"),
            (MemoryOutcome::Reject, "Failed to send email"),
            (MemoryOutcome::NoConfirmation, "Email sent but no confirmation received"),
        ];
        for (outcome, expected) in cases {
            let mailer = Arc::new(MemoryMailer::with_outcome(outcome));
            let err = intake(mailer).submit_contact(&contact()).await.unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_submit_contact_company_optional() {
        let mailer = Arc::new(MemoryMailer::new());
        let mut submission = contact();
        submission.company = None;
        intake(mailer.clone()).submit_contact(&submission).await.unwrap();

        submission.message = None;
        let err = intake(mailer.clone()).submit_contact(&submission).await.unwrap_err();
        assert_eq!(err.code(), IntakeErrorCode::MissingFields);
        assert_eq!(mailer.sent().len(), 1);
    }
}
