//! Lobby page actions and the DOM ids they are wired through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid action: {0}")]
pub struct ActionError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Public,
    Private,
    Practice,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Public, Action::Private, Action::Practice];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Public => "public",
            Action::Private => "private",
            Action::Practice => "practice",
        }
    }

    /// Whether the form carries an anti-abuse token. Practice games are local
    /// and skip the round trip.
    pub fn needs_token(self) -> bool {
        !matches!(self, Action::Practice)
    }

    pub fn form_id(self) -> String {
        format!("{}form", self.as_str())
    }

    pub fn token_input_id(self) -> String {
        format!("{}forminput", self.as_str())
    }

    pub fn button_id(self) -> String {
        format!("{}formbutton", self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| ActionError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_ids() {
        assert_eq!(Action::Public.form_id(), "publicform");
        assert_eq!(Action::Private.token_input_id(), "privateforminput");
        assert_eq!(Action::Practice.button_id(), "practiceformbutton");
    }

    #[test]
    fn test_parse() {
        assert_eq!("private".parse::<Action>(), Ok(Action::Private));
        assert_eq!(
            "Public".parse::<Action>(),
            Err(ActionError("Public".to_string()))
        );
    }

    #[test]
    fn test_only_practice_skips_token() {
        let skipping: Vec<_> = Action::ALL.into_iter().filter(|a| !a.needs_token()).collect();
        assert_eq!(skipping, vec![Action::Practice]);
    }
}
