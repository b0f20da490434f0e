// Transcript Normalizer
// Read-only views over the client-supplied message history

use crate::models::Turn;

/// Assistant phrases that mean "we already asked for the visitor's name"
const NAME_QUESTION_MARKERS: [&str; 2] = ["What's your name", "name?"];

/// The exact question whose following user turn is the fallback name candidate
pub const NAME_QUESTION: &str = "What's your name";

/// Normalized view of one transcript
pub struct Transcript<'a> {
    turns: &'a [Turn],
    history: String,
    user_turns: Vec<&'a Turn>,
}

impl<'a> Transcript<'a> {
    pub fn new(turns: &'a [Turn]) -> Self {
        let history = turns
            .iter()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let user_turns = turns.iter().filter(|t| t.is_user()).collect();

        Self {
            turns,
            history,
            user_turns,
        }
    }

    /// All turns, any role
    pub fn turns(&self) -> &'a [Turn] {
        self.turns
    }

    /// Number of turns, any role
    pub fn message_count(&self) -> usize {
        self.turns.len()
    }

    /// Lower-cased contents of every turn joined by single spaces
    pub fn history(&self) -> &str {
        &self.history
    }

    /// User-authored turns, oldest first
    pub fn user_turns(&self) -> &[&'a Turn] {
        &self.user_turns
    }

    /// Most recent user-authored turn
    pub fn latest_user(&self) -> Option<&'a Turn> {
        self.user_turns.last().copied()
    }

    /// Whether any assistant turn already asked for a name
    pub fn has_asked_for_name(&self) -> bool {
        self.turns.iter().any(|t| {
            t.is_assistant()
                && NAME_QUESTION_MARKERS
                    .iter()
                    .any(|marker| t.content.contains(marker))
        })
    }

    /// Index (into all turns) of the first assistant turn containing the name question
    pub fn name_question_index(&self) -> Option<usize> {
        self.turns
            .iter()
            .position(|t| t.is_assistant() && t.content.contains(NAME_QUESTION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Turn> {
        vec![
            Turn::user("Hi"),
            Turn::assistant("OPTIONS:Hello|Web App Development"),
            Turn::user("Web App Development"),
        ]
    }

    #[test]
    fn test_history_is_lowercase_and_space_joined() {
        let turns = sample();
        let transcript = Transcript::new(&turns);
        assert_eq!(
            transcript.history(),
            "hi options:hello|web app development web app development"
        );
    }

    #[test]
    fn test_user_turns_filter_roles() {
        let turns = sample();
        let transcript = Transcript::new(&turns);
        assert_eq!(transcript.message_count(), 3);
        assert_eq!(transcript.user_turns().len(), 2);
        assert_eq!(transcript.latest_user().map(|t| t.content.as_str()), Some("Web App Development"));
    }

    #[test]
    fn test_has_asked_for_name() {
        let mut turns = sample();
        let transcript = Transcript::new(&turns);
        assert!(!transcript.has_asked_for_name());

        turns.push(Turn::assistant("Great choice on Web App Development! What's your name? 👋"));
        let transcript = Transcript::new(&turns);
        assert!(transcript.has_asked_for_name());
        assert_eq!(transcript.name_question_index(), Some(3));
    }

    #[test]
    fn test_user_asking_for_name_does_not_count() {
        let turns = vec![Turn::user("What's your name?")];
        let transcript = Transcript::new(&turns);
        assert!(!transcript.has_asked_for_name());
        assert_eq!(transcript.name_question_index(), None);
    }
}
