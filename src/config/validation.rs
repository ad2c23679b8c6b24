use crate::config::types::{Config, CrawlerConfig, UserAgentConfig, WikiConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_wiki_config(&config.wiki)?;
    validate_classifier_config(config.classifier.evidence_threshold)?;
    validate_image_cache_config(config.image_cache.capacity)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.record_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "record_limit must be >= 1, got {}",
            config.record_limit
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 16 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 16, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the target wiki configuration
fn validate_wiki_config(config: &WikiConfig) -> Result<(), ConfigError> {
    if config.allowed_domain.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domain cannot be empty".to_string(),
        ));
    }

    if config.allowed_domain.contains('/') || config.allowed_domain.contains(':') {
        return Err(ConfigError::Validation(format!(
            "allowed_domain must be a bare domain suffix, got '{}'",
            config.allowed_domain
        )));
    }

    Ok(())
}

/// Validates classifier tuning
fn validate_classifier_config(threshold: u32) -> Result<(), ConfigError> {
    // Three independent signals exist; a threshold above that never matches
    if threshold < 1 || threshold > 3 {
        return Err(ConfigError::Validation(format!(
            "evidence_threshold must be between 1 and 3, got {}",
            threshold
        )));
    }

    Ok(())
}

/// Validates image cache tuning
fn validate_image_cache_config(capacity: usize) -> Result<(), ConfigError> {
    if capacity < 1 {
        return Err(ConfigError::Validation(
            "image cache capacity must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email shape check: one '@' with non-empty local part and a dotted domain
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();

    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid contact_email: '{}'",
            email
        )));
    }

    Ok(())
}
