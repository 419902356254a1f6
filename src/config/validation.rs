use crate::config::types::{CatalogueConfig, Config, HttpConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalogue_config(&config.catalogue)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the catalogue location
fn validate_catalogue_config(config: &CatalogueConfig) -> Result<(), ConfigError> {
    let url = config.root()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url '{}' must use http or https",
            config.root_url
        )));
    }

    if config.first_page.trim().is_empty() {
        return Err(ConfigError::Validation(
            "first-page cannot be empty".to_string(),
        ));
    }

    config.first_page_url()?;

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.export_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "export-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
