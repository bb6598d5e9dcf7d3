//! Lobby keys and the URLs built from the page origin.

use std::fmt;

use thiserror::Error;

use crate::action::Action;
use crate::launch::LaunchToken;

pub const LOBBY_KEY_LEN: usize = 16;
pub const LOBBY_KEY_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Path segment in front of a lobby key in shareable links.
pub const LOBBY_PATH: &str = "/g/";
/// Path of the live player counter feed.
pub const PLAYER_COUNT_PATH: &str = "/d/playercount";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("lobby key must be {expected} chars, got {found}")]
    LobbyKeyLength { expected: usize, found: usize },

    #[error("invalid character '{ch}' at position {index} of lobby key")]
    LobbyKeyCharacter { ch: char, index: usize },

    #[error("origin has no http or https scheme: {0}")]
    UnsupportedScheme(String),
}

/// Key naming a private lobby. Alphanumeric only, so it can double as a pair
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LobbyKey(String);

impl LobbyKey {
    pub fn parse(value: &str) -> Result<Self, LinkError> {
        let found = value.chars().count();
        if found != LOBBY_KEY_LEN {
            return Err(LinkError::LobbyKeyLength {
                expected: LOBBY_KEY_LEN,
                found,
            });
        }
        for (index, ch) in value.chars().enumerate() {
            if !LOBBY_KEY_ALPHABET.contains(ch) {
                return Err(LinkError::LobbyKeyCharacter { ch, index });
            }
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path the lobby is played at, relative to the origin.
    pub fn path(&self) -> String {
        format!("{LOBBY_PATH}{}", self.0)
    }

    /// Shareable link, e.g. `https://example.com/g/xyz9`.
    pub fn url(&self, origin: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), self.path())
    }

    /// Launch token pairing everyone who opens this lobby.
    pub fn launch_token(&self, game_size: u32) -> LaunchToken {
        LaunchToken::from_parts(self.0.clone(), game_size)
    }
}

impl fmt::Display for LobbyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for LobbyKey {
    type Err = LinkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// WebSocket URL for the player counter, with the scheme mirrored from the
/// page origin (`http` -> `ws`, `https` -> `wss`).
pub fn counter_socket_url(origin: &str) -> Result<String, LinkError> {
    let origin = origin.trim_end_matches('/');
    let socket_origin = if let Some(rest) = origin.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = origin.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return Err(LinkError::UnsupportedScheme(origin.to_string()));
    };
    Ok(format!("{socket_origin}{PLAYER_COUNT_PATH}"))
}

/// Path of the redirect that forwards the verification token in the query
/// string instead of a form post.
pub const ASSESS_PATH: &str = "/assess";

/// Redirect target for `action`. `encoded_token` must already be
/// URI-component encoded.
pub fn assess_url(action: Action, encoded_token: &str) -> String {
    format!("{ASSESS_PATH}?a={}&q={encoded_token}", action.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lobby_url() {
        let key = LobbyKey("xyz9".to_string());
        assert_eq!(key.url("https://example.com"), "https://example.com/g/xyz9");
        assert_eq!(key.url("https://example.com/"), "https://example.com/g/xyz9");
        assert_eq!(key.path(), "/g/xyz9");
    }

    #[test]
    fn test_lobby_key_parse() {
        let key = LobbyKey::parse("Ab3dEf6hIj9lMn0p").unwrap();
        assert_eq!(key.as_str(), "Ab3dEf6hIj9lMn0p");
        assert_eq!(key.launch_token(16).to_string(), "Ab3dEf6hIj9lMn0p16");

        assert_eq!(
            LobbyKey::parse("short"),
            Err(LinkError::LobbyKeyLength {
                expected: LOBBY_KEY_LEN,
                found: 5
            })
        );
        assert_eq!(
            LobbyKey::parse("Ab3dEf6hIj9lMn0/"),
            Err(LinkError::LobbyKeyCharacter { ch: '/', index: 15 })
        );
    }

    #[test]
    fn test_counter_socket_url() {
        assert_eq!(
            counter_socket_url("https://plurabus.me").unwrap(),
            "wss://plurabus.me/d/playercount"
        );
        assert_eq!(
            counter_socket_url("http://localhost:3000/").unwrap(),
            "ws://localhost:3000/d/playercount"
        );
        assert!(matches!(
            counter_socket_url("file://"),
            Err(LinkError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_assess_url() {
        assert_eq!(
            assess_url(Action::Public, "03A%2Bb%2Fc%3D%3D"),
            "/assess?a=public&q=03A%2Bb%2Fc%3D%3D"
        );
        assert_eq!(assess_url(Action::Practice, ""), "/assess?a=practice&q=");
    }
}
