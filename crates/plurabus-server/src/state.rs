use std::sync::Arc;

use plurabus_core::{LaunchMode, LaunchPayload, LaunchToken, ModuleRevision, PairStringRule};

use crate::config::Config;

/// Prefix the asset directory is mounted at.
pub const ASSET_PREFIX: &str = "/d";

/// Read-only configuration shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner
    }

    pub fn revision(&self) -> ModuleRevision {
        self.inner.revision.into()
    }

    pub fn pair_string_rule(&self) -> PairStringRule {
        self.inner.pair_string_rule.into()
    }

    pub fn default_game_size(&self) -> u32 {
        self.inner.default_game_size
    }

    pub fn site_key(&self) -> &str {
        &self.inner.recaptcha_site_key
    }

    pub fn payload(&self, mode: LaunchMode, token: &LaunchToken) -> LaunchPayload {
        LaunchPayload::new(self.revision(), mode, token, ASSET_PREFIX)
    }
}
