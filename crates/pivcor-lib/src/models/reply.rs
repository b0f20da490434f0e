// Chatbot reply models
// Structured result of one chatbot turn and its text wire format

use serde::{Deserialize, Serialize};

use super::lead::LeadRecord;

/// Prefix of an options-list directive on the wire
pub const OPTIONS_PREFIX: &str = "OPTIONS:";

/// Conversation stage, derived from the transcript on every turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    AskService,
    AskName,
    AskEmail,
    LeadReady,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::AskService => "ask_service",
            Stage::AskName => "ask_name",
            Stage::AskEmail => "ask_email",
            Stage::LeadReady => "lead_ready",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the visitor sees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyBody {
    /// Prompt rendered with one button per option
    Options { prompt: String, options: Vec<String> },
    /// Plain prose
    Prose { text: String },
}

impl ReplyBody {
    /// Display text without any directive prefix
    pub fn text(&self) -> &str {
        match self {
            ReplyBody::Options { prompt, .. } => prompt,
            ReplyBody::Prose { text } => text,
        }
    }
}

/// One chatbot turn: what to show, and what (if anything) to submit downstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub stage: Stage,
    pub body: ReplyBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<LeadRecord>,
}

impl Reply {
    /// Text body sent to the widget.
    ///
    /// Options become `OPTIONS:<prompt>|<opt1>|...`; a lead is appended as a
    /// hidden marker after a blank line.
    pub fn to_wire_text(&self) -> String {
        let mut text = match &self.body {
            ReplyBody::Options { prompt, options } => {
                let mut out = format!("{}{}", OPTIONS_PREFIX, prompt);
                for option in options {
                    out.push('|');
                    out.push_str(option);
                }
                out
            }
            ReplyBody::Prose { text } => text.clone(),
        };

        if let Some(lead) = &self.lead {
            text.push_str("\n\n");
            text.push_str(&lead.to_marker());
        }

        text
    }
}
