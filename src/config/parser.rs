use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Every key is optional; anything left out keeps the built-in default for
/// the DSEI speaker directory.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use speaker_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Listing: {}", config.site.listing_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates and returns the built-in configuration
pub fn default_config() -> Result<Config, ConfigError> {
    let config = Config::default();
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a CSV can be traced back to the settings that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[site]
base-url = "https://conf.example.com"
listing-url = "https://conf.example.com/speakers-list"
detail-url = "https://conf.example.com/speakers"

[site.listing-params]
sortby = "name"
searchgroup = "list-group"

[site.detail-params]
searchgroup = "detail-group"

[http]
user-agent = "TestAgent/1.0"
timeout-secs = 5
max-attempts = 2
backoff-unit-ms = 10

[crawler]
request-delay-ms = 0
max-pages = 4

[output]
csv-path = "./out.csv"
log-path = "./harvest.log"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://conf.example.com");
        assert_eq!(config.site.listing_params.get("sortby").unwrap(), "name");
        assert_eq!(config.site.detail_params.len(), 1);
        assert_eq!(config.http.user_agent, "TestAgent/1.0");
        assert_eq!(config.http.max_attempts, 2);
        assert_eq!(config.http.backoff_unit_ms, 10);
        assert_eq!(config.crawler.request_delay_ms, 0);
        assert_eq!(config.crawler.max_pages, Some(4));
        assert_eq!(config.output.csv_path, "./out.csv");
        assert_eq!(config.output.log_path.as_deref(), Some("./harvest.log"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = create_temp_config("[crawler]\nrequest-delay-ms = 250\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.request_delay_ms, 250);
        assert_eq!(config.http.max_attempts, 3);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(
            config.site.listing_params.get("searchgroup").unwrap(),
            "A2A12251-speakers"
        );
        assert_eq!(config.output.csv_path, "data/speakers.csv");
    }

    #[test]
    fn test_empty_config_is_default() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.site.detail_url, "https://www.dsei.co.uk/speakers");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[http]\nmax-attempts = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_with_invalid_url() {
        let file = create_temp_config("[site]\nlisting-url = \"nowhere\"\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_default_config() {
        let config = default_config().unwrap();
        assert_eq!(config.http.max_attempts, 3);
        assert_eq!(config.crawler.max_pages, None);
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
