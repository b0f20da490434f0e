// Response Renderer and Lead Emitter
// Turns a selected stage into the reply shown to the visitor

use super::extract::{extract_email, fallback_name};
use super::stage::Facts;
use super::transcript::Transcript;
use crate::models::{LeadRecord, Reply, ReplyBody, ServiceOffering, Stage};

pub const GREETING_PROMPT: &str = "Hi! How Can PIVCOR Help You today? 🚀";
pub const SERVICE_PROMPT: &str = "Great! What service are you interested in?";

/// Service wording in prompts when none is known
const ANY_SERVICE: &str = "our services";
/// Lead defaults when extraction came up empty
pub const DEFAULT_SERVICE: &str = "General Inquiry";
pub const DEFAULT_NAME: &str = "Lead";

fn service_menu(prompt: &str) -> ReplyBody {
    ReplyBody::Options {
        prompt: prompt.to_string(),
        options: ServiceOffering::labels()
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

fn prose(text: String) -> ReplyBody {
    ReplyBody::Prose { text }
}

/// Assemble the lead once service, name and e-mail are resolved
pub fn build_lead(facts: &Facts, transcript: &Transcript<'_>) -> LeadRecord {
    let email = extract_email(transcript).unwrap_or_default();
    let service = facts
        .service
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| DEFAULT_SERVICE.to_string());
    let name = facts
        .name
        .clone()
        .or_else(|| {
            if facts.asked_for_name {
                fallback_name(transcript)
            } else {
                None
            }
        })
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    LeadRecord::new(name.trim(), email, service)
}

/// Render the reply for `stage`
pub fn render(stage: Stage, facts: &Facts, transcript: &Transcript<'_>) -> Reply {
    let service = facts.service.map(|s| s.label()).unwrap_or(ANY_SERVICE);

    let (body, lead) = match stage {
        Stage::Greeting => (service_menu(GREETING_PROMPT), None),
        Stage::AskService => (service_menu(SERVICE_PROMPT), None),
        Stage::AskName => (
            prose(format!("Great choice on {}! What's your name? 👋", service)),
            None,
        ),
        Stage::AskEmail => {
            let greeting = match &facts.name {
                Some(name) => format!("Nice to meet you, {}!", name),
                None => "Nice to meet you!".to_string(),
            };
            (
                prose(format!(
                    "{} To send you more details about {}, I'll need your email address. What's your email? 📧",
                    greeting, service
                )),
                None,
            )
        }
        Stage::LeadReady => {
            let lead = build_lead(facts, transcript);
            let text = format!(
                "Perfect! Thank you {}. I've received your information about {}. Our team will contact you at {} soon! 🚀",
                lead.name, lead.service, lead.email
            );
            (prose(text), Some(lead))
        }
    };

    Reply { stage, body, lead }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Turn;

    #[test]
    fn test_lead_defaults() {
        let turns = vec![Turn::user("x@y.io")];
        let transcript = Transcript::new(&turns);
        let facts = Facts {
            message_count: 1,
            service: None,
            name: None,
            has_email: true,
            asked_for_name: false,
            bare_greeting: false,
        };
        let lead = build_lead(&facts, &transcript);
        assert_eq!(lead.name, DEFAULT_NAME);
        assert_eq!(lead.service, DEFAULT_SERVICE);
        assert_eq!(lead.email, "x@y.io");
        assert_eq!(lead.mobile, "");
    }

    #[test]
    fn test_ask_email_without_name() {
        let turns: Vec<Turn> = Vec::new();
        let transcript = Transcript::new(&turns);
        let facts = Facts {
            message_count: 5,
            service: Some(ServiceOffering::AiAutomationsSaas),
            name: None,
            has_email: false,
            asked_for_name: true,
            bare_greeting: false,
        };
        let reply = render(Stage::AskEmail, &facts, &transcript);
        assert_eq!(
            reply.body.text(),
            "Nice to meet you! To send you more details about AI Automations & SaaS, I'll need your email address. What's your email? 📧"
        );
        assert!(reply.lead.is_none());
    }

    #[test]
    fn test_menus_list_all_services() {
        let turns: Vec<Turn> = Vec::new();
        let transcript = Transcript::new(&turns);
        let facts = Facts {
            message_count: 2,
            service: None,
            name: None,
            has_email: false,
            asked_for_name: false,
            bare_greeting: false,
        };
        for stage in [Stage::Greeting, Stage::AskService] {
            match render(stage, &facts, &transcript).body {
                ReplyBody::Options { options, .. } => assert_eq!(options.len(), 6),
                other => panic!("expected options, got {:?}", other),
            }
        }
    }
}
