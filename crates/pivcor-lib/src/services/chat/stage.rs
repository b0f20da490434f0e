// Stage Selector
// Pure transition function from extracted facts to the conversation stage

use super::classifier::classify_service;
use super::extract::{extract_name, has_email};
use super::patterns::is_bare_greeting;
use super::transcript::Transcript;
use crate::models::{ServiceOffering, Stage};

/// Everything the stage selector looks at, extracted from one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facts {
    /// Turns of any role
    pub message_count: usize,
    pub service: Option<ServiceOffering>,
    /// Primary name extraction result
    pub name: Option<String>,
    pub has_email: bool,
    pub asked_for_name: bool,
    /// Latest user turn is nothing but a greeting
    pub bare_greeting: bool,
}

impl Facts {
    pub fn extract(transcript: &Transcript<'_>) -> Self {
        Self {
            message_count: transcript.message_count(),
            service: classify_service(transcript),
            name: extract_name(transcript),
            has_email: has_email(transcript),
            asked_for_name: transcript.has_asked_for_name(),
            bare_greeting: transcript
                .latest_user()
                .map(|turn| is_bare_greeting(&turn.content))
                .unwrap_or(false),
        }
    }

    /// Name is settled once it is known or the question has been asked;
    /// the answer to the question is resolved later by the fallback
    pub fn name_settled(&self) -> bool {
        self.name.is_some() || self.asked_for_name
    }
}

/// Select the stage, in precedence order:
///
/// 1. The very first message, or a bare greeting as the second message with
///    no service yet, always gets the greeting menu.
/// 2. Without a service, re-offer the menu.
/// 3. With a service: ask for the name until it is known or asked for, then
///    the e-mail, then the lead is ready.
pub fn select_stage(facts: &Facts) -> Stage {
    if facts.message_count == 1
        || (facts.message_count == 2 && facts.bare_greeting && facts.service.is_none())
    {
        return Stage::Greeting;
    }

    if facts.service.is_none() {
        return Stage::AskService;
    }

    match (facts.name_settled(), facts.has_email) {
        (false, _) => Stage::AskName,
        (true, false) => Stage::AskEmail,
        (true, true) => Stage::LeadReady,
    }
}
