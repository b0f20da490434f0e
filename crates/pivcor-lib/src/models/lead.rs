// Lead models
// Lead records produced by the chatbot and the intake payloads accepted by the server

use serde::{Deserialize, Serialize};

/// Prefix of the hidden hand-off marker appended to the final chatbot reply
pub const LEAD_MARKER_PREFIX: &str = "LEAD_READY:";

/// Channel the visitor will be contacted through; the chat flow only collects e-mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConnectionMethod {
    #[default]
    Email,
}

impl ConnectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionMethod::Email => "Email",
        }
    }
}

/// A fully qualified lead, created once all required fields resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    /// Never collected by the chat flow; kept for payload compatibility
    pub mobile: String,
    pub service: String,
    pub connection_method: ConnectionMethod,
}

impl LeadRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            mobile: String::new(),
            service: service.into(),
            connection_method: ConnectionMethod::Email,
        }
    }

    /// Marker line: `LEAD_READY:<name>|<email>|<mobile>|<service>|<method>`
    pub fn to_marker(&self) -> String {
        format!(
            "{}{}|{}|{}|{}|{}",
            LEAD_MARKER_PREFIX,
            self.name,
            self.email,
            self.mobile,
            self.service,
            self.connection_method.as_str()
        )
    }
}

/// Request body of `POST /api/leads`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

/// Request body of `POST /api/contact`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// JSON response of the intake endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
