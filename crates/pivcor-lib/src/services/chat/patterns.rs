// Chat Patterns
// Compiled regular expressions shared by the chat extractors
//
// Character classes are spelled out ASCII-only so that `\w`-style classes
// behave the same for every visitor locale.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// `local@domain.tld` anywhere in the text; group 1 is the address
pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| compile(r"([A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+)"));

/// Ten or more digits, spaces or dashes, optionally after a `+`
pub static PHONE: Lazy<Regex> = Lazy::new(|| compile(r"\+?[0-9\s-]{10,}"));

/// A message that is nothing but a greeting
pub static BARE_GREETING: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^(hi|hello|hey|good morning|good afternoon|good evening)$")
});

/// Connection-method quick replies that must never be read as a name
pub static CONNECTION_METHOD: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^(telegram|whatsapp|email|connect to whatsapp)$"));

/// Name shape once the bot has asked for a name
pub static NAME_LENIENT: Lazy<Regex> = Lazy::new(|| compile(r"^[a-zA-Z\s'.-]+$"));

/// Name shape for unprompted messages
pub static NAME_STRICT: Lazy<Regex> = Lazy::new(|| compile(r"^[a-zA-Z\s'-]+$"));

/// Three or more consecutive digits
pub static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| compile(r"[0-9]{3,}"));

pub fn is_email_shaped(text: &str) -> bool {
    EMAIL.is_match(text)
}

pub fn is_phone_shaped(text: &str) -> bool {
    PHONE.is_match(text)
}

pub fn is_bare_greeting(text: &str) -> bool {
    BARE_GREETING.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_email_shaped("reach me at maria@example.com please"));
        assert!(is_email_shaped("a.b-c@sub.domain.io"));
        assert!(!is_email_shaped("maria at example dot com"));
        assert!(!is_email_shaped("@example.com"));
    }

    #[test]
    fn test_phone_shape() {
        assert!(is_phone_shaped("555-123-4567"));
        assert!(is_phone_shaped("+1 937 230 2564"));
        assert!(!is_phone_shaped("555-1234"));
        assert!(!is_phone_shaped("Maria Lopez"));
    }

    #[test]
    fn test_bare_greeting() {
        assert!(is_bare_greeting("Hi"));
        assert!(is_bare_greeting("  good Evening "));
        assert!(!is_bare_greeting("hi there"));
        assert!(!is_bare_greeting("Hillary"));
    }

    #[test]
    fn test_connection_method_is_whole_message() {
        assert!(CONNECTION_METHOD.is_match("WhatsApp"));
        assert!(CONNECTION_METHOD.is_match("connect to whatsapp"));
        assert!(!CONNECTION_METHOD.is_match("Emailia"));
    }
}
