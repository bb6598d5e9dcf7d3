//! Command line and environment configuration.

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, ValueEnum};
use plurabus_core::{ModuleRevision, PairStringRule};

/// Public reCAPTCHA Enterprise site key the pages were issued.
pub const DEFAULT_SITE_KEY: &str = "6LetnQQlAAAAABNjewyT0QnLyxOPkMharK-SILmD";

#[derive(Debug, Clone, Parser)]
#[command(name = "plurabus-server", version, about = "Page server for plurabus")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "PLURABUS_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Directory served under `/d/`: the client bundle and the game module.
    #[arg(long, env = "PLURABUS_ASSET_DIR", default_value = "dist")]
    pub asset_dir: PathBuf,

    /// Game module build the play page loads.
    #[arg(long, env = "PLURABUS_REVISION", value_enum, default_value_t = Revision::Hivemind)]
    pub revision: Revision,

    /// Board size for games started from the lobby buttons and links.
    #[arg(long, env = "PLURABUS_DEFAULT_GAME_SIZE", default_value_t = 64,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(plurabus_core::UNIT_LIMIT)))]
    pub default_game_size: u32,

    /// Check applied to the posted pair string.
    #[arg(long, env = "PLURABUS_PAIR_STRING_RULE", value_enum, default_value_t = PairRule::Strict)]
    pub pair_string_rule: PairRule,

    /// Site key handed to the anti-abuse widget.
    #[arg(long, env = "PLURABUS_RECAPTCHA_SITE_KEY", default_value = DEFAULT_SITE_KEY)]
    pub recaptcha_site_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Revision {
    Hivemind,
    Webhd,
}

impl From<Revision> for ModuleRevision {
    fn from(value: Revision) -> Self {
        match value {
            Revision::Hivemind => ModuleRevision::Hivemind,
            Revision::Webhd => ModuleRevision::Webhd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PairRule {
    Strict,
    Legacy,
}

impl From<PairRule> for PairStringRule {
    fn from(value: PairRule) -> Self {
        match value {
            PairRule::Strict => PairStringRule::Strict,
            PairRule::Legacy => PairStringRule::Legacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["plurabus-server"]);
        assert_eq!(config.default_game_size, 64);
        assert_eq!(config.revision, Revision::Hivemind);
        assert_eq!(
            PairStringRule::from(config.pair_string_rule),
            PairStringRule::Strict
        );
    }

    #[test]
    fn test_rejects_game_size_out_of_range() {
        let result = Config::try_parse_from(["plurabus-server", "--default-game-size", "0"]);
        assert!(result.is_err());

        let config =
            Config::try_parse_from(["plurabus-server", "--revision", "webhd"]).unwrap();
        assert_eq!(ModuleRevision::from(config.revision), ModuleRevision::Webhd);
    }
}
