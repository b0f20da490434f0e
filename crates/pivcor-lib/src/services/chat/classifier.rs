// Service Classifier
// Infers which offering the visitor is interested in from free text
//
// Exact labels are tried first; the rule table below catches synonyms and
// abbreviations. Table order is the tie-break when a message matches several
// rules.

use once_cell::sync::Lazy;
use regex::Regex;

use super::transcript::Transcript;
use crate::models::ServiceOffering;

/// Fallback rules, evaluated in order
const SERVICE_RULE_PATTERNS: [(&str, ServiceOffering); 6] = [
    (
        r"(?i)digital ecosystem strategy|ecosystem strategy",
        ServiceOffering::DigitalEcosystemStrategy,
    ),
    (r"(?i)web app development", ServiceOffering::WebAppDevelopment),
    (r"(?i)mobile app development", ServiceOffering::MobileAppDevelopment),
    (r"(?i)blockchain|web3|web 3", ServiceOffering::BlockchainWeb3),
    (
        r"(?i)ai automation|saas|ai automations",
        ServiceOffering::AiAutomationsSaas,
    ),
    (
        r"(?i)e-commerce|ecommerce|headless e-commerce",
        ServiceOffering::HeadlessEcommerce,
    ),
];

/// Compiled fallback rule
pub struct ServiceRule {
    pub pattern: Regex,
    pub service: ServiceOffering,
}

pub static SERVICE_RULES: Lazy<Vec<ServiceRule>> = Lazy::new(|| {
    SERVICE_RULE_PATTERNS
        .iter()
        .filter_map(|(pattern, service)| {
            Regex::new(pattern).ok().map(|pattern| ServiceRule {
                pattern,
                service: *service,
            })
        })
        .collect()
});

/// First fallback rule matching `text`
pub fn match_service_rule(text: &str) -> Option<ServiceOffering> {
    SERVICE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.service)
}

/// Service named by a single message: exact label first, then the rule table
pub fn classify_message(text: &str) -> Option<ServiceOffering> {
    ServiceOffering::named_in(text).or_else(|| match_service_rule(text))
}

/// Scan user turns newest to oldest and return the first service found,
/// so a visitor can change their mind mid-conversation
pub fn classify_service(transcript: &Transcript<'_>) -> Option<ServiceOffering> {
    transcript
        .user_turns()
        .iter()
        .rev()
        .find_map(|turn| classify_message(&turn.content))
}
