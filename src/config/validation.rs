use crate::config::types::{Config, ScrapeConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_scrape_config(&config.scrape)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.bind_address.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "bind_address must be a socket address like 127.0.0.1:5000, got '{}'",
            config.bind_address
        )));
    }

    Ok(())
}

/// Validates scrape configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for (name, value) in [
        ("first_page_timeout_secs", config.first_page_timeout_secs),
        ("page_timeout_secs", config.page_timeout_secs),
        ("image_timeout_secs", config.image_timeout_secs),
    ] {
        if value == 0 || value > 300 {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and 300 seconds, got {}",
                name, value
            )));
        }
    }

    if config.edge_width_percent < 1 || config.edge_width_percent > 100 {
        return Err(ConfigError::Validation(format!(
            "edge_width_percent must be between 1 and 100, got {}",
            config.edge_width_percent
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = Config::default();
        config.server.bind_address = "not-an-address".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = Config::default();
        config.scrape.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.scrape.page_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_edge_width_bounds() {
        let mut config = Config::default();
        config.scrape.edge_width_percent = 0;
        assert!(validate(&config).is_err());

        config.scrape.edge_width_percent = 101;
        assert!(validate(&config).is_err());

        config.scrape.edge_width_percent = 100;
        assert!(validate(&config).is_ok());
    }
}
