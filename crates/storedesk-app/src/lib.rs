mod confirm;
mod create;
mod effects;
mod request;
mod settings;
mod stores;
#[cfg(test)]
mod test_support;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use storedesk_core::api::StoreApi;
use storedesk_core::api_url::api_url;
use storedesk_core::config::{StoredeskConfig, load_config, resolve_config_path};
use storedesk_core::http::HttpStoreApi;
use storedesk_core::messages::Messages;
use storedesk_core::store::StoreId;

pub use confirm::{ConfirmGuard, GuardState};
pub use create::{CreateStoreFlow, StoreModal};
pub use effects::{Navigation, Navigator, Notice, NoticeKind, Notifier};
pub use request::{
    CreateRequest, DeleteRequest, PendingRequest, RequestOutcome, UpdateRequest,
};
pub use settings::SettingsFlow;
pub use stores::StoreLoadError;

/// Sink for request lifecycle lines. The CLI routes these into the
/// diagnostics log when it is enabled.
pub trait RequestLog: Send + Sync {
    fn record(&self, entry: &str);
}

#[derive(Debug, Default)]
pub struct NoopLog;

impl RequestLog for NoopLog {
    fn record(&self, _entry: &str) {}
}

#[derive(Clone)]
pub struct App {
    api: Arc<dyn StoreApi>,
    log: Arc<dyn RequestLog>,
    messages: Messages,
    origin: String,
}

impl App {
    pub fn new(api: Arc<dyn StoreApi>, messages: Messages, origin: impl Into<String>) -> Self {
        Self {
            api,
            log: Arc::new(NoopLog),
            messages,
            origin: origin.into(),
        }
    }

    /// Talks to the backend named in the config over HTTP.
    pub fn from_config(config: &StoredeskConfig) -> Self {
        Self::new(
            Arc::new(HttpStoreApi::new(&config.api)),
            config.messages(),
            config.api.origin(),
        )
    }

    pub fn with_log(mut self, log: Arc<dyn RequestLog>) -> Self {
        self.log = log;
        self
    }

    pub fn messages(&self) -> Messages {
        self.messages
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn api_url(&self, store_id: &StoreId) -> String {
        api_url(&self.origin, store_id)
    }

    pub fn record_navigation(&self, navigation: &Navigation) {
        self.record(format!("navigation {navigation}"));
    }

    pub(crate) fn record(&self, entry: impl AsRef<str>) {
        self.log.record(entry.as_ref());
    }
}

pub fn ensure_config_ready() -> Result<StoredeskConfig> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;
    ensure_config_ready_at(&config_path)
}

pub fn ensure_config_ready_at(config_path: &Path) -> Result<StoredeskConfig> {
    if !config_path.exists() {
        bail!(
            "missing config at {}\nCreate ~/.config/storedesk/config.toml and see README.md for setup instructions.",
            config_path.display()
        );
    }

    load_config(config_path).map_err(|error| {
        anyhow!(
            "invalid config at {}: {error}\nFix the config and retry. See README.md for setup instructions.",
            config_path.display()
        )
    })
}
