// Field Extractors
// E-mail and name inference over the transcript
//
// Name extraction is anchored to the first user turn that names a service:
// only later turns are candidates, and the first plausible one wins.

use super::patterns::{
    is_bare_greeting, is_email_shaped, is_phone_shaped, CONNECTION_METHOD, DIGIT_RUN, EMAIL,
    NAME_LENIENT, NAME_STRICT,
};
use super::transcript::Transcript;
use crate::models::ServiceOffering;

/// Accepted name length, in characters
const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 40;

// =============================================================================
// E-mail
// =============================================================================

/// Whether an e-mail-shaped substring appears anywhere in the transcript
pub fn has_email(transcript: &Transcript<'_>) -> bool {
    EMAIL.is_match(transcript.history())
}

/// First e-mail address in the transcript (lower-cased, like the history it comes from)
pub fn extract_email(transcript: &Transcript<'_>) -> Option<String> {
    EMAIL
        .captures(transcript.history())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// =============================================================================
// Name
// =============================================================================

/// Position (among user turns) of the first turn naming a service by its exact label
pub fn service_selection_index(transcript: &Transcript<'_>) -> Option<usize> {
    transcript
        .user_turns()
        .iter()
        .position(|turn| ServiceOffering::named_in(&turn.content).is_some())
}

/// Length, e-mail and phone checks shared by both name paths
fn passes_basic_name_checks(content: &str) -> bool {
    let len = content.chars().count();
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len)
        && !is_email_shaped(content)
        && !is_phone_shaped(content)
}

/// Whether a trimmed user message plausibly is a name.
///
/// Once the bot has asked for a name the shape check is lenient (periods
/// allowed, e.g. "J. R. Smith"); before that a stricter shape applies.
pub fn is_plausible_name(content: &str, asked_for_name: bool) -> bool {
    if !passes_basic_name_checks(content) {
        return false;
    }
    if CONNECTION_METHOD.is_match(content) {
        return false;
    }
    if ServiceOffering::named_in(content).is_some() {
        return false;
    }
    if is_bare_greeting(content) {
        return false;
    }

    if asked_for_name {
        NAME_LENIENT.is_match(content)
    } else {
        NAME_STRICT.is_match(content) && !DIGIT_RUN.is_match(content)
    }
}

/// First plausible name after the service-selection turn
pub fn extract_name(transcript: &Transcript<'_>) -> Option<String> {
    let service_index = service_selection_index(transcript)?;
    let asked = transcript.has_asked_for_name();

    transcript.user_turns()[service_index + 1..]
        .iter()
        .map(|turn| turn.content.trim())
        .find(|content| is_plausible_name(content, asked))
        .map(str::to_string)
}

/// The user turn right after the bot's name question, checked only for
/// length, e-mail and phone shape
pub fn fallback_name(transcript: &Transcript<'_>) -> Option<String> {
    let question = transcript.name_question_index()?;
    let answer = transcript.turns().get(question + 1)?;
    if !answer.is_user() {
        return None;
    }

    let candidate = answer.content.trim();
    passes_basic_name_checks(candidate).then(|| candidate.to_string())
}
