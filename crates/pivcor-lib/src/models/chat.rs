// Chat transcript models
// Wire and in-memory representation of the chatbot conversation

use serde::{Deserialize, Deserializer, Serialize};

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Any other role sent by a client (e.g. "system"); ignored by role-filtered scans
    #[default]
    #[serde(other)]
    Other,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Other => write!(f, "other"),
        }
    }
}

/// A single message in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub role: Role,
    /// Message text; a missing or null content is read as ""
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Vec<Turn>>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Turn>) -> Self {
        Self {
            messages: Some(messages),
        }
    }

    /// Messages of the request, empty when the field was missing
    pub fn into_turns(self) -> Vec<Turn> {
        self.messages.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_deserialize_null_content() {
        let turn: Turn = serde_json::from_str(r#"{"role":"user","content":null}"#).unwrap();
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "");

        let turn: Turn = serde_json::from_str(r#"{"role":"assistant"}"#).unwrap();
        assert!(turn.is_assistant());
        assert_eq!(turn.content, "");
    }

    #[test]
    fn test_unknown_role_is_other() {
        let turn: Turn = serde_json::from_str(r#"{"role":"system","content":"x"}"#).unwrap();
        assert_eq!(turn.role, Role::Other);
        assert!(!turn.is_user());
    }

    #[test]
    fn test_chat_request_missing_messages() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.into_turns().is_empty());
    }

    #[test]
    fn test_turn_serializes_lowercase_role() {
        let json = serde_json::to_string(&Turn::user("Hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hi"}"#);
    }
}
