// Chat Engine
// Rule-based lead qualification over the client-supplied transcript
//
// No session is stored: every call re-derives the stage from the full
// transcript, so the same transcript always yields the same reply. The
// heuristics are not monotonic; a later message can undo an earlier
// inference.

pub mod classifier;
pub mod emitter;
pub mod extract;
pub mod patterns;
pub mod stage;
pub mod transcript;

pub use emitter::{DEFAULT_NAME, DEFAULT_SERVICE, GREETING_PROMPT};
pub use stage::{select_stage, Facts};
pub use transcript::Transcript;

use crate::models::{Reply, ReplyBody, Stage, Turn};

/// Reply to an empty or unreadable request
pub const GREETING_TEXT: &str = GREETING_PROMPT;

/// Reply used when no transcript is available
pub fn greeting_reply() -> Reply {
    Reply {
        stage: Stage::Greeting,
        body: ReplyBody::Prose {
            text: GREETING_TEXT.to_string(),
        },
        lead: None,
    }
}

/// Compute the chatbot's reply to a transcript
pub fn respond(turns: &[Turn]) -> Reply {
    if turns.is_empty() {
        return greeting_reply();
    }

    let transcript = Transcript::new(turns);
    let facts = Facts::extract(&transcript);
    let stage = select_stage(&facts);

    log::debug!(
        "[chat] messages={} service={:?} name={} email={} asked={} -> {}",
        facts.message_count,
        facts.service.map(|s| s.label()),
        facts.name.is_some(),
        facts.has_email,
        facts.asked_for_name,
        stage
    );

    let reply = emitter::render(stage, &facts, &transcript);
    if let Some(lead) = &reply.lead {
        log::info!("[chat] Lead ready for service: {}", lead.service);
    }
    reply
}

/// Wire text of the reply to a transcript
pub fn reply_text(turns: &[Turn]) -> String {
    respond(turns).to_wire_text()
}
