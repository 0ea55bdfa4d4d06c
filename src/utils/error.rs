use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Search page returned HTTP {status} for {url}")]
    FetchStatusError { url: String, status: u16 },

    #[error("Invalid CSS selector '{selector}': {reason}")]
    SelectorError { selector: String, reason: String },

    #[error("Failed to extract {} listing(s): {}", .failures.len(), .failures.join("; "))]
    ExtractionError { failures: Vec<String> },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Transient; the next scheduled run will likely succeed.
    Medium,
    /// The fetched data could not be processed.
    High,
    /// Configuration or local file system is broken; needs an operator.
    Critical,
}

impl NotifierError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NotifierError::HttpError(_) | NotifierError::FetchStatusError { .. } => {
                ErrorSeverity::Medium
            }
            NotifierError::ExtractionError { .. } | NotifierError::SelectorError { .. } => {
                ErrorSeverity::High
            }
            NotifierError::IoError(_)
            | NotifierError::SerializationError(_)
            | NotifierError::TomlError(_)
            | NotifierError::MissingConfigError { .. }
            | NotifierError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NotifierError::HttpError(e) if e.is_timeout() => {
                "The search page or webhook did not answer in time".to_string()
            }
            NotifierError::HttpError(_) => "Could not reach the search page".to_string(),
            NotifierError::FetchStatusError { status, .. } => {
                format!("The search page answered with HTTP {}", status)
            }
            NotifierError::IoError(e) => format!("Could not access the snapshot file: {}", e),
            NotifierError::SerializationError(_) => {
                "The snapshot file is not a valid listing array".to_string()
            }
            NotifierError::ExtractionError { failures } => format!(
                "{} listing(s) on the page were missing an id or link",
                failures.len()
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NotifierError::HttpError(_) | NotifierError::FetchStatusError { .. } => {
                "Check the search URL and network connectivity, or raise --timeout-secs"
            }
            NotifierError::ExtractionError { .. } | NotifierError::SelectorError { .. } => {
                "The page layout may have changed; review the [selectors] section of the config file"
            }
            NotifierError::IoError(_) => "Check permissions of the state directory",
            NotifierError::SerializationError(_) => {
                "Fix or delete the snapshot file; the next run will rebuild it"
            }
            NotifierError::TomlError(_) => "Fix the syntax of the config file",
            NotifierError::MissingConfigError { .. }
            | NotifierError::InvalidConfigValueError { .. } => {
                "Pass --search-url and --webhook-url or set them in the config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
