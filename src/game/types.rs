use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque player identifier.
///
/// Callers may send ids as JSON strings or numbers; both normalize to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPlayerId")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlayerId {
    Text(String),
    Number(i64),
}

impl From<RawPlayerId> for PlayerId {
    fn from(raw: RawPlayerId) -> Self {
        match raw {
            RawPlayerId::Text(id) => PlayerId(id),
            RawPlayerId::Number(id) => PlayerId(id.to_string()),
        }
    }
}

/// Match identifier, allocated from 1 upwards and never reused.
pub type MatchId = u64;

/// One of the three moves a player can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Parse a move name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Choice> {
        let raw = raw.trim();
        Choice::ALL
            .into_iter()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single round, relative to the order the two choices were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_is_case_insensitive() {
        assert_eq!(Choice::parse("Rock"), Some(Choice::Rock));
        assert_eq!(Choice::parse(" scissors "), Some(Choice::Scissors));
        assert_eq!(Choice::parse("PAPER"), Some(Choice::Paper));
    }

    #[test]
    fn test_parse_choice_rejects_unknown_moves() {
        assert_eq!(Choice::parse("lizard"), None);
        assert_eq!(Choice::parse(""), None);
        assert_eq!(Choice::parse("pedra"), None);
    }

    #[test]
    fn test_player_id_accepts_numbers_and_strings() {
        let from_number: PlayerId = serde_json::from_str("4242").unwrap();
        let from_text: PlayerId = serde_json::from_str("\"4242\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"4242\"");
    }
}
