// Mail Service Module
// Outbound notification e-mail for captured leads and contact requests

pub mod error;
pub mod memory;
pub mod resend;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{MailError, MailErrorCode, MailResult};
pub use memory::{MemoryMailer, MemoryOutcome};
pub use resend::{ResendMailer, DEFAULT_RESEND_API_URL};
pub use templates::{escape_html, ContactEmailFields, LeadEmailFields};

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl OutboundEmail {
    /// Lead notification stamped with the current time
    pub fn lead_notification(from: &str, to: &str, lead: &LeadEmailFields<'_>) -> Self {
        templates::lead_email(from, to, lead, chrono::Utc::now())
    }

    /// Contact form notification stamped with the current time
    pub fn contact_notification(from: &str, to: &str, contact: &ContactEmailFields<'_>) -> Self {
        templates::contact_email(from, to, contact, chrono::Utc::now())
    }
}

/// Trait for e-mail delivery backends
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Whether the backend has the credentials it needs
    fn is_configured(&self) -> bool;

    /// Deliver a message, returning the provider's message id
    async fn send(&self, email: &OutboundEmail) -> MailResult<String>;
}

/// Shared mailer handle
pub type SharedMailer = Arc<dyn Mailer>;
