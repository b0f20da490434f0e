// Mail Service Error Types

use thiserror::Error;

/// Mail delivery error
#[derive(Error, Debug)]
pub enum MailError {
    /// No API key configured
    #[error("Email service not configured")]
    NotConfigured,

    /// Connection failed
    #[error("Cannot connect to email service: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Invalid or expired email API key: {0}")]
    AuthFailed(String),

    /// Rate limited
    #[error("Email API rate limit exceeded, please try again later")]
    RateLimited,

    /// Request timeout
    #[error("Email service response timeout")]
    Timeout,

    /// Error reported by the provider
    #[error("Email service error: {0}")]
    ApiError(String),

    /// Provider accepted the request but returned no message id
    #[error("Email sent but no confirmation received")]
    MissingId,

    /// JSON parsing error
    #[error("Response parse error: {0}")]
    ParseError(String),

    /// Invalid configuration (e.g. a malformed API URL)
    #[error("Invalid email configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MailError::Timeout
        } else if err.is_connect() {
            MailError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            MailError::ParseError(err.to_string())
        } else {
            MailError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        MailError::ParseError(err.to_string())
    }
}

impl From<url::ParseError> for MailError {
    fn from(err: url::ParseError) -> Self {
        MailError::InvalidConfig(err.to_string())
    }
}

/// Result type for mail operations
pub type MailResult<T> = Result<T, MailError>;

/// Mail error codes for API consumers and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailErrorCode {
    NotConfigured,
    ConnectionFailed,
    AuthFailed,
    RateLimited,
    Timeout,
    ApiError,
    MissingId,
    ParseError,
    InvalidConfig,
}

impl MailErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailErrorCode::NotConfigured => "MAIL_NOT_CONFIGURED",
            MailErrorCode::ConnectionFailed => "MAIL_CONNECTION_FAILED",
            MailErrorCode::AuthFailed => "MAIL_AUTH_FAILED",
            MailErrorCode::RateLimited => "MAIL_RATE_LIMITED",
            MailErrorCode::Timeout => "MAIL_TIMEOUT",
            MailErrorCode::ApiError => "MAIL_API_ERROR",
            MailErrorCode::MissingId => "MAIL_MISSING_ID",
            MailErrorCode::ParseError => "MAIL_PARSE_ERROR",
            MailErrorCode::InvalidConfig => "MAIL_INVALID_CONFIG",
        }
    }
}

impl MailError {
    pub fn code(&self) -> MailErrorCode {
        match self {
            MailError::NotConfigured => MailErrorCode::NotConfigured,
            MailError::ConnectionFailed(_) => MailErrorCode::ConnectionFailed,
            MailError::AuthFailed(_) => MailErrorCode::AuthFailed,
            MailError::RateLimited => MailErrorCode::RateLimited,
            MailError::Timeout => MailErrorCode::Timeout,
            MailError::ApiError(_) => MailErrorCode::ApiError,
            MailError::MissingId => MailErrorCode::MissingId,
            MailError::ParseError(_) => MailErrorCode::ParseError,
            MailError::InvalidConfig(_) => MailErrorCode::InvalidConfig,
        }
    }
}
