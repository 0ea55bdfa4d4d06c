pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::{Settings, SettingsOverrides};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "listing-notifier")]
#[command(about = "Posts new and cheaper classified listings from a search page to a webhook")]
pub struct CliConfig {
    #[arg(short = 's', long, help = "Search results page to watch")]
    pub search_url: Option<String>,

    #[arg(short = 'w', long, help = "Webhook URL that receives the notification")]
    pub webhook_url: Option<String>,

    #[arg(short = 'c', long, help = "Optional TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Directory holding the snapshot file [default: .config]")]
    pub state_dir: Option<String>,

    #[arg(long, help = "Snapshot file name [default: listing-notifier.json]")]
    pub state_file: Option<String>,

    #[arg(long, help = "Timeout for each HTTP request in seconds [default: 30]")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Currency label after prices [default: руб.]")]
    pub currency: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file, if any, and merges these flags over it.
    pub fn resolve(&self) -> crate::utils::error::Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Settings::resolve(file, self.overrides())
    }

    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            search_url: self.search_url.clone(),
            webhook_url: self.webhook_url.clone(),
            state_dir: self.state_dir.clone(),
            state_file: self.state_file.clone(),
            timeout_secs: self.timeout_secs,
            currency: self.currency.clone(),
        }
    }
}
