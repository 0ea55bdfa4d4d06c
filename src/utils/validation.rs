use crate::utils::error::{NotifierError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> NotifierError {
    NotifierError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parses a page or webhook address: absolute, http(s), with a host.
pub fn parse_web_url(field_name: &str, url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    Ok(url)
}

/// The snapshot directory may not exist yet, but must not be a file.
pub fn validate_state_dir(field_name: &str, dir: &Path) -> Result<()> {
    let shown = dir.to_string_lossy();
    if shown.is_empty() {
        return Err(invalid(field_name, &shown, "Path cannot be empty"));
    }
    if shown.contains('\0') {
        return Err(invalid(field_name, &shown, "Path contains null bytes"));
    }
    if dir.exists() && !dir.is_dir() {
        return Err(invalid(field_name, &shown, "Exists but is not a directory"));
    }
    Ok(())
}

/// Bare file name: no directory components.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.contains('\0') {
        return Err(invalid(field_name, name, "File name is empty or contains null bytes"));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(invalid(
            field_name,
            name,
            "Must be a file name without directory components",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(NotifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NotifierError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NotifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_selector(field_name: &str, selector: &str) -> Result<()> {
    validate_non_empty_string(field_name, selector)?;
    scraper::Selector::parse(selector).map_err(|e| NotifierError::SelectorError {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
