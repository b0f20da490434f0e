// Memory Mailer
// In-process outbox that records messages instead of delivering them

use std::sync::Mutex;

use async_trait::async_trait;

use super::{MailError, MailResult, Mailer, OutboundEmail};

/// How the outbox answers a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryOutcome {
    #[default]
    Accept,
    NotConfigured,
    Reject,
    NoConfirmation,
}

/// Records every accepted message; failure modes can be forced per instance
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outcome: MemoryOutcome,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(outcome: MemoryOutcome) -> Self {
        Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages accepted so far
    pub fn sent(&self) -> Vec<OutboundEmail> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    fn name(&self) -> &str {
        "Memory"
    }

    fn is_configured(&self) -> bool {
        self.outcome != MemoryOutcome::NotConfigured
    }

    async fn send(&self, email: &OutboundEmail) -> MailResult<String> {
        match self.outcome {
            MemoryOutcome::NotConfigured => Err(MailError::NotConfigured),
            MemoryOutcome::Reject => Err(MailError::ApiError("rejected by memory outbox".to_string())),
            MemoryOutcome::NoConfirmation => Err(MailError::MissingId),
            MemoryOutcome::Accept => {
                let mut sent = match self.sent.lock() {
                    Ok(sent) => sent,
                    Err(poisoned) => poisoned.into_inner(),
                };
                sent.push(email.clone());
                Ok(format!("mem-{}", sent.len()))
            }
        }
    }
}
