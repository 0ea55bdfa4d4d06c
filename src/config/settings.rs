use crate::adapters::snapshot::DEFAULT_STATE_FILE;
use crate::adapters::source::ListingSelectors;
use crate::config::toml_config::TomlConfig;
use crate::core::message::DEFAULT_CURRENCY;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_web_url, validate_file_name, validate_non_empty_string, validate_positive_number,
    validate_required_field, validate_selector, validate_state_dir, Validate,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STATE_DIR: &str = ".config";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values given on the command line; `None` falls back to the config file,
/// then to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub search_url: Option<String>,
    pub webhook_url: Option<String>,
    pub state_dir: Option<String>,
    pub state_file: Option<String>,
    pub timeout_secs: Option<u64>,
    pub currency: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search_url: String,
    pub webhook_url: String,
    pub state_dir: PathBuf,
    pub state_file: String,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
    pub currency: String,
    pub selectors: ListingSelectors,
}

impl Settings {
    /// Merges flags over the config file, applies defaults and validates.
    pub fn resolve(file: Option<TomlConfig>, overrides: SettingsOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = ListingSelectors::default();

        let search_url = overrides.search_url.or(file.source.search_url);
        let webhook_url = overrides.webhook_url.or(file.notify.webhook_url);

        let settings = Settings {
            search_url: validate_required_field("search_url", &search_url)?.clone(),
            webhook_url: validate_required_field("webhook_url", &webhook_url)?.clone(),
            state_dir: PathBuf::from(
                overrides
                    .state_dir
                    .or(file.state.dir)
                    .unwrap_or_else(|| DEFAULT_STATE_DIR.to_string()),
            ),
            state_file: overrides
                .state_file
                .or(file.state.file)
                .unwrap_or_else(|| DEFAULT_STATE_FILE.to_string()),
            timeout_secs: overrides
                .timeout_secs
                .or(file.source.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: file.source.user_agent,
            currency: overrides
                .currency
                .or(file.notify.currency)
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            selectors: ListingSelectors {
                item: file.selectors.item.unwrap_or(defaults.item),
                id_attr: file.selectors.id_attr.unwrap_or(defaults.id_attr),
                link: file.selectors.link.unwrap_or(defaults.link),
                price: file.selectors.price.unwrap_or(defaults.price),
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir.join(&self.state_file)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        parse_web_url("search_url", &self.search_url)?;
        parse_web_url("webhook_url", &self.webhook_url)?;
        validate_state_dir("state_dir", &self.state_dir)?;
        validate_file_name("state_file", &self.state_file)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        if let Some(agent) = &self.user_agent {
            validate_non_empty_string("user_agent", agent)?;
        }
        validate_selector("selectors.item", &self.selectors.item)?;
        validate_non_empty_string("selectors.id_attr", &self.selectors.id_attr)?;
        validate_selector("selectors.link", &self.selectors.link)?;
        validate_selector("selectors.price", &self.selectors.price)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn search_url(&self) -> &str {
        &self.search_url
    }

    fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn state_file(&self) -> &str {
        &self.state_file
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}
