//! Launch requests and the argument list handed to the external game module.
//!
//! The server validates a [`LaunchRequest`] into a [`LaunchToken`], wraps it in
//! a [`LaunchPayload`] and embeds that as JSON in the play page. The client
//! reads the payload back, fits the canvas and turns it into
//! [`LaunchArguments`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sizing::{CanvasFit, SizingConfig, SizingError, SizingStrategy, Viewport};
use crate::{GAME_PANEL_SIZE, GAME_WINDOW_PADDING, MENU_ITEMS, UNIT_LIMIT};

/// Longest pair string accepted by [`PairStringRule::Strict`].
pub const MAX_PAIR_STRING_LEN: usize = 100;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No post data found :(")]
    MissingFields,

    #[error("pstr is not alphanumeric")]
    PairString,

    #[error("size is not alphanumeric")]
    SizeNotAlphanumeric,

    #[error("size is not numeric")]
    SizeNotNumeric,

    #[error("size is out of range")]
    SizeOutOfRange,
}

/// How the pair string is checked before it is joined with the board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairStringRule {
    /// Whole string is ASCII alphanumeric (or empty) and at most
    /// [`MAX_PAIR_STRING_LEN`] bytes.
    #[default]
    Strict,
    /// Historic unanchored `^$|[a-zA-Z0-9]+`: empty, or containing at least one
    /// alphanumeric character anywhere.
    Legacy,
}

impl PairStringRule {
    pub fn accepts(self, pair_string: &str) -> bool {
        match self {
            PairStringRule::Strict => {
                pair_string.len() <= MAX_PAIR_STRING_LEN
                    && pair_string.bytes().all(|b| b.is_ascii_alphanumeric())
            }
            PairStringRule::Legacy => {
                pair_string.is_empty() || pair_string.bytes().any(|b| b.is_ascii_alphanumeric())
            }
        }
    }
}

/// Raw form fields as posted by the lobby page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LaunchRequest {
    #[serde(rename = "pstr", default)]
    pub pair_string: Option<String>,
    #[serde(rename = "gameSize", default)]
    pub game_size: Option<String>,
}

impl LaunchRequest {
    pub fn new(pair_string: impl Into<String>, game_size: impl Into<String>) -> Self {
        Self {
            pair_string: Some(pair_string.into()),
            game_size: Some(game_size.into()),
        }
    }

    /// Check both fields. An absent `pstr` counts as empty. An absent
    /// `gameSize` is a bad size when `pstr` was posted, and an empty post
    /// otherwise.
    pub fn validate(&self, rule: PairStringRule) -> Result<LaunchToken, ValidationError> {
        let Some(game_size) = self.game_size.as_deref() else {
            return Err(match self.pair_string {
                Some(_) => ValidationError::SizeNotAlphanumeric,
                None => ValidationError::MissingFields,
            });
        };
        let pair_string = self.pair_string.as_deref().unwrap_or_default();

        if !rule.accepts(pair_string) {
            return Err(ValidationError::PairString);
        }
        if game_size.is_empty() || !game_size.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ValidationError::SizeNotAlphanumeric);
        }
        if !game_size.bytes().any(|b| b.is_ascii_digit()) {
            return Err(ValidationError::SizeNotNumeric);
        }
        let game_size: u32 = game_size
            .parse()
            .map_err(|_| ValidationError::SizeNotNumeric)?;
        if !(1..=UNIT_LIMIT).contains(&game_size) {
            return Err(ValidationError::SizeOutOfRange);
        }

        Ok(LaunchToken {
            pair_string: pair_string.to_string(),
            game_size,
        })
    }
}

/// Validated pair string and board size. Displays as the two joined with no
/// delimiter, which is how the game module receives them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchToken {
    pair_string: String,
    game_size: u32,
}

impl LaunchToken {
    /// Token for an open match: no pair string.
    pub fn open(game_size: u32) -> Self {
        Self {
            pair_string: String::new(),
            game_size,
        }
    }

    pub fn pair_string(&self) -> &str {
        &self.pair_string
    }

    pub fn game_size(&self) -> u32 {
        self.game_size
    }

    /// Build a token from an already trusted pair string, such as a lobby key.
    pub(crate) fn from_parts(pair_string: String, game_size: u32) -> Self {
        Self {
            pair_string,
            game_size,
        }
    }
}

impl fmt::Display for LaunchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pair_string, self.game_size)
    }
}

/// Build of the external game module a page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleRevision {
    #[default]
    Hivemind,
    Webhd,
}

impl ModuleRevision {
    pub fn script_name(self) -> &'static str {
        match self {
            ModuleRevision::Hivemind => "hivemindweb.js",
            ModuleRevision::Webhd => "webhd.js",
        }
    }

    pub fn sizing(self) -> SizingStrategy {
        match self {
            ModuleRevision::Hivemind => SizingStrategy::Step,
            ModuleRevision::Webhd => SizingStrategy::Divisor,
        }
    }
}

/// How the player reached the play page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Posted the launch form directly.
    Direct,
    Public,
    Practice,
    /// Opened a shared lobby link.
    Lobby,
}

/// Everything the client needs to start the game module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPayload {
    pub revision: ModuleRevision,
    pub mode: LaunchMode,
    pub game_size: u32,
    pub launch_token: String,
    pub panel_size: u32,
    pub menu_items: u32,
    pub unit_limit: u32,
    pub padding: u32,
    pub module_script: String,
}

impl LaunchPayload {
    pub fn new(
        revision: ModuleRevision,
        mode: LaunchMode,
        token: &LaunchToken,
        asset_prefix: &str,
    ) -> Self {
        Self {
            revision,
            mode,
            game_size: token.game_size(),
            launch_token: token.to_string(),
            panel_size: GAME_PANEL_SIZE,
            menu_items: MENU_ITEMS,
            unit_limit: UNIT_LIMIT,
            padding: GAME_WINDOW_PADDING,
            module_script: format!(
                "{}/{}",
                asset_prefix.trim_end_matches('/'),
                revision.script_name()
            ),
        }
    }

    pub fn sizing(&self) -> SizingConfig {
        SizingConfig {
            game_size: self.game_size,
            panel_size: self.panel_size,
            menu_items: self.menu_items,
            padding: self.padding,
        }
    }

    pub fn fit(&self, viewport: Viewport) -> Result<CanvasFit, SizingError> {
        self.revision.sizing().fit(&self.sizing(), viewport)
    }

    /// Serialize for a `<script type="application/json">` element. Characters
    /// that could close the element or start markup are emitted as `\u` escapes,
    /// which JSON parsers read back unchanged.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        let mut escaped = String::with_capacity(json.len());
        for c in json.chars() {
            match c {
                '<' => escaped.push_str("\\u003c"),
                '>' => escaped.push_str("\\u003e"),
                '&' => escaped.push_str("\\u0026"),
                '\u{2028}' => escaped.push_str("\\u2028"),
                '\u{2029}' => escaped.push_str("\\u2029"),
                _ => escaped.push(c),
            }
        }
        Ok(escaped)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json.trim())
    }
}

/// Ordered strings passed to the game module as its `argv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArguments(Vec<String>);

impl LaunchArguments {
    pub fn new(payload: &LaunchPayload, fit: &CanvasFit) -> Self {
        let args = match payload.revision {
            ModuleRevision::Hivemind => vec![
                payload.game_size.to_string(),
                payload.panel_size.to_string(),
                fit.scale.to_string(),
                payload.launch_token.clone(),
            ],
            ModuleRevision::Webhd => vec![
                payload.game_size.to_string(),
                payload.panel_size.to_string(),
                payload.menu_items.to_string(),
                fit.scale.to_string(),
                payload.unit_limit.to_string(),
                payload.launch_token.clone(),
            ],
        };
        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(pstr: &str, size: &str) -> Result<LaunchToken, ValidationError> {
        LaunchRequest::new(pstr, size).validate(PairStringRule::Strict)
    }

    #[test]
    fn test_concatenates_pair_string_and_size() {
        let token = validate("AB12", "8").unwrap();
        assert_eq!(token.to_string(), "AB128");
        assert_eq!(token.game_size(), 8);
        assert_eq!(token.pair_string(), "AB12");
    }

    #[test]
    fn test_pair_string_strict_rule() {
        assert!(validate("abc123", "8").is_ok());
        assert!(validate("", "8").is_ok());
        assert_eq!(validate(";--", "8"), Err(ValidationError::PairString));
        assert_eq!(validate("ab;<script>", "8"), Err(ValidationError::PairString));
        assert_eq!(
            validate(&"a".repeat(MAX_PAIR_STRING_LEN + 1), "8"),
            Err(ValidationError::PairString)
        );
    }

    #[test]
    fn test_pair_string_legacy_rule_is_unanchored() {
        // The historic pattern only needs one alphanumeric somewhere.
        assert!(PairStringRule::Legacy.accepts("\";<script>"));
        assert!(PairStringRule::Legacy.accepts(""));
        assert!(!PairStringRule::Legacy.accepts(";--"));
        assert!(!PairStringRule::Strict.accepts("\";<script>"));
    }

    #[test]
    fn test_game_size_checks() {
        assert_eq!(validate("", ""), Err(ValidationError::SizeNotAlphanumeric));
        assert_eq!(validate("", "8 "), Err(ValidationError::SizeNotAlphanumeric));
        assert_eq!(validate("", "-8"), Err(ValidationError::SizeNotAlphanumeric));
        assert_eq!(validate("", "abc"), Err(ValidationError::SizeNotNumeric));
        assert_eq!(validate("", "8a"), Err(ValidationError::SizeNotNumeric));
        assert_eq!(validate("", "0"), Err(ValidationError::SizeOutOfRange));
        assert_eq!(validate("", "4097"), Err(ValidationError::SizeOutOfRange));
        assert_eq!(
            validate("", "99999999999"),
            Err(ValidationError::SizeNotNumeric)
        );
        assert_eq!(validate("", "4096").unwrap().game_size(), 4096);
    }

    #[test]
    fn test_missing_fields() {
        let request = LaunchRequest::default();
        assert_eq!(
            request.validate(PairStringRule::Strict),
            Err(ValidationError::MissingFields)
        );

        let request = LaunchRequest {
            pair_string: None,
            game_size: Some("16".to_string()),
        };
        assert_eq!(request.validate(PairStringRule::Strict).unwrap().to_string(), "16");
    }

    #[test]
    fn test_pair_string_without_size() {
        let request = LaunchRequest {
            pair_string: Some("AB12".to_string()),
            game_size: None,
        };
        assert_eq!(
            request.validate(PairStringRule::Strict),
            Err(ValidationError::SizeNotAlphanumeric)
        );
    }

    #[test]
    fn test_hivemind_arguments() {
        let token = validate("AB12", "64").unwrap();
        let payload = LaunchPayload::new(ModuleRevision::Hivemind, LaunchMode::Direct, &token, "/d");
        assert_eq!(payload.module_script, "/d/hivemindweb.js");

        let fit = payload.fit(Viewport::new(1280, 720)).unwrap();
        let args = LaunchArguments::new(&payload, &fit);
        assert_eq!(args.as_slice(), ["64", "240", "9", "AB1264"]);
    }

    #[test]
    fn test_webhd_arguments() {
        let token = validate("AB12", "64").unwrap();
        let payload = LaunchPayload::new(ModuleRevision::Webhd, LaunchMode::Direct, &token, "/d/");
        assert_eq!(payload.module_script, "/d/webhd.js");

        let fit = payload.fit(Viewport::new(800, 600)).unwrap();
        let args = LaunchArguments::new(&payload, &fit);
        assert_eq!(args.as_slice(), ["64", "240", "6", "6", "4096", "AB1264"]);
    }

    #[test]
    fn test_script_json_escapes_markup() {
        let mut payload = LaunchPayload::new(
            ModuleRevision::Hivemind,
            LaunchMode::Public,
            &LaunchToken::open(32),
            "/d",
        );
        payload.launch_token = "</script><b>&\u{2028}".to_string();

        let json = payload.to_script_json().unwrap();
        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains('&'));
        assert!(json.contains(r#""mode":"public""#));

        let decoded = LaunchPayload::from_json(&json).unwrap();
        assert_eq!(decoded, payload);
    }
}
