use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::repository::SessionError;
use crate::decision::CareerDecisionModel;

const MAX_SESSION_ID_LEN: usize = 64;

/// Turns kept per session for rescanning the recent conversation.
pub const MAX_HISTORY_TURNS: usize = 5;

/// Opaque client-chosen session key: 1-64 ASCII letters, digits, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn parse(value: &str) -> Result<Self, SessionError> {
        let value = value.trim();
        let valid = !value.is_empty()
            && value.len() <= MAX_SESSION_ID_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(SessionError::InvalidId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One exchange with the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub input: Option<String>,
    pub response: String,
    pub at: DateTime<Utc>,
}

/// Everything remembered between turns of one conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerSession {
    pub id: SessionId,
    pub model: CareerDecisionModel,
    pub last_input: Option<String>,
    pub last_response: Option<String>,
    /// Oldest first, at most [`MAX_HISTORY_TURNS`] entries.
    pub history: VecDeque<Turn>,
    pub updated_at: DateTime<Utc>,
}

impl CareerSession {
    /// A fresh session starts from the built-in career table.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            model: CareerDecisionModel::standard(),
            last_input: None,
            last_response: None,
            history: VecDeque::with_capacity(MAX_HISTORY_TURNS),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn record_turn(&mut self, input: Option<String>, response: String) {
        self.touch();
        if self.history.len() == MAX_HISTORY_TURNS {
            self.history.pop_front();
        }
        self.history.push_back(Turn {
            input: input.clone(),
            response: response.clone(),
            at: self.updated_at,
        });

        if input.is_some() {
            self.last_input = input;
        }
        self.last_response = Some(response);
    }

    /// Recent turns joined oldest first, each input before its response.
    pub fn history_text(&self) -> String {
        self.history
            .iter()
            .flat_map(|turn| turn.input.as_deref().into_iter().chain([turn.response.as_str()]))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Education,
    Experience,
    Skills,
    Interests,
}

impl ProfileField {
    /// Fields that must be filled before the agent is asked for career options.
    pub const REQUIRED: [ProfileField; 3] = [Self::Education, Self::Skills, Self::Interests];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Interests => "interests",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Experience => "Experience",
            Self::Skills => "Skills",
            Self::Interests => "Interests",
        }
    }
}

/// Background the user shared about themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
}

impl UserProfile {
    fn value(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::Education => &self.education,
            ProfileField::Experience => &self.experience,
            ProfileField::Skills => &self.skills,
            ProfileField::Interests => &self.interests,
        };
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Required fields that are absent or blank, in display order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::REQUIRED
            .into_iter()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The question put to the agent, built from whichever fields are filled.
    pub fn to_query(&self) -> String {
        let summary = [
            ProfileField::Education,
            ProfileField::Experience,
            ProfileField::Skills,
            ProfileField::Interests,
        ]
        .into_iter()
        .filter_map(|field| {
            self.value(field)
                .map(|value| format!("{}: {value}", field.label()))
        })
        .collect::<Vec<_>>()
        .join("; ");

        format!(
            "Based on this profile: {summary}, what are the best career options and how do they compare?"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_validated() {
        assert_eq!(
            SessionId::parse("  user-42_a ").expect("valid id").as_str(),
            "user-42_a"
        );
        assert!(SessionId::parse("").is_err());
        assert!(SessionId::parse("has space").is_err());
        assert!(SessionId::parse(&"x".repeat(65)).is_err());
    }

    #[test]
    fn history_keeps_only_the_latest_turns() {
        let mut session = CareerSession::new(SessionId::parse("history").expect("valid id"));
        for turn in 1..=7 {
            session.record_turn(None, format!("reply {turn}"));
        }

        assert_eq!(session.history.len(), MAX_HISTORY_TURNS);
        assert_eq!(session.history.front().map(|t| t.response.as_str()), Some("reply 3"));
        assert_eq!(session.last_response.as_deref(), Some("reply 7"));
    }

    #[test]
    fn history_text_puts_inputs_before_responses() {
        let mut session = CareerSession::new(SessionId::parse("joined").expect("valid id"));
        session.record_turn(Some("first question".to_string()), "first reply".to_string());
        session.record_turn(None, "second reply".to_string());

        assert_eq!(session.history_text(), "first question\nfirst reply\nsecond reply");
        assert_eq!(session.last_input.as_deref(), Some("first question"));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let profile = UserProfile {
            education: Some("BSc Physics".to_string()),
            experience: None,
            skills: Some("   ".to_string()),
            interests: None,
        };
        assert_eq!(
            profile.missing_fields(),
            vec![ProfileField::Skills, ProfileField::Interests]
        );
        assert!(!profile.is_complete());
    }

    #[test]
    fn query_lists_filled_fields_in_order() {
        let profile = UserProfile {
            education: Some("MBA".to_string()),
            experience: Some("3 years in sales".to_string()),
            skills: Some("negotiation".to_string()),
            interests: Some("startups".to_string()),
        };
        assert!(profile.is_complete());
        assert_eq!(
            profile.to_query(),
            "Based on this profile: Education: MBA; Experience: 3 years in sales; Skills: negotiation; Interests: startups, what are the best career options and how do they compare?"
        );
    }

    #[test]
    fn recording_a_turn_keeps_previous_input_when_none_given() {
        let mut session = CareerSession::new(SessionId("s1".to_string()));
        session.record_turn(Some("hello".to_string()), "first".to_string());
        session.record_turn(None, "second".to_string());
        assert_eq!(session.last_input.as_deref(), Some("hello"));
        assert_eq!(session.last_response.as_deref(), Some("second"));
    }
}
