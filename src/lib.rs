pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{HttpListingSource, JsonSnapshotStore, ListingSelectors, WebhookNotifier};
pub use crate::config::{cli::LocalStorage, Settings, SettingsOverrides, TomlConfig};
pub use crate::core::{detector::detect_changes, message::build_message, runner::Runner};
pub use crate::domain::model::{ListingRecord, MessagePayload, RunReport};
pub use crate::utils::error::{NotifierError, Result};

use crate::core::ConfigProvider;

/// Wires the HTTP source, webhook notifier and on-disk snapshot from
/// `settings` and performs one run.
pub async fn run_once(settings: &Settings) -> Result<RunReport> {
    let timeout = settings.request_timeout();

    let store = JsonSnapshotStore::new(
        LocalStorage::new(settings.state_dir()),
        settings.state_file(),
    );
    let source = HttpListingSource::new(
        settings.search_url(),
        settings.selectors.clone(),
        timeout,
        settings.user_agent.as_deref(),
    )?;
    let notifier = WebhookNotifier::new(settings.webhook_url(), timeout)?;

    Runner::new(store, source, notifier, settings.currency())
        .run()
        .await
}
