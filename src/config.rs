use crate::aggregate::SchemaPolicy;
use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

/// Configuration for one catalog harvest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of the paginated catalog listing
    pub catalog_url: String,

    /// Prefix prepended to the relative detail links discovered in the
    /// catalog; empty means "derive from the catalog URL's origin"
    #[serde(default)]
    pub detail_base_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum number of detail pages fetched concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// How long to wait for the "show more" control before assuming the
    /// catalog is fully revealed, in milliseconds
    #[serde(default = "default_reveal_timeout_ms")]
    pub reveal_timeout_ms: u64,

    /// Pause after each expansion click so new entries can render, in
    /// milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Where the delimited output file is written
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// How records with differing field sets are reconciled
    #[serde(default)]
    pub schema_policy: SchemaPolicy,
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    20
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default wait for the "show more" control
fn default_reveal_timeout_ms() -> u64 {
    1000
}

/// Default render-settle pause after an expansion click
fn default_settle_delay_ms() -> u64 {
    1500
}

/// Default output file
fn default_output_path() -> String {
    "products.csv".to_string()
}

impl CatalogConfig {
    /// Create a new configuration with default values
    pub fn new(catalog_url: &str) -> Self {
        Self {
            catalog_url: catalog_url.to_string(),
            detail_base_url: String::new(),
            webdriver_url: default_webdriver_url(),
            max_concurrency: default_max_concurrency(),
            reveal_timeout_ms: default_reveal_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            output_path: default_output_path(),
            schema_policy: SchemaPolicy::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// The detail-link prefix, falling back to the catalog URL's origin
    /// (`scheme://host`) when none was configured.
    pub fn resolved_detail_base(&self) -> Result<String, HarvestError> {
        if !self.detail_base_url.is_empty() {
            return Ok(self.detail_base_url.clone());
        }

        let catalog = Url::parse(&self.catalog_url).map_err(|e| HarvestError::InvalidUrl {
            url: self.catalog_url.clone(),
            source: e,
        })?;
        Ok(catalog.origin().ascii_serialization())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"catalog_url": "https://catalog.example.com/phones/"}"#)
                .unwrap();

        assert_eq!(config.max_concurrency, 20);
        assert_eq!(config.reveal_timeout_ms, 1000);
        assert_eq!(config.settle_delay_ms, 1500);
        assert_eq!(config.output_path, "products.csv");
        assert_eq!(config.schema_policy, SchemaPolicy::Lenient);
    }

    #[test]
    fn test_detail_base_derived_from_catalog_origin() {
        let config = CatalogConfig::new("https://catalog.example.com/phones/?sort=new");
        assert_eq!(
            config.resolved_detail_base().unwrap(),
            "https://catalog.example.com"
        );
    }

    #[test]
    fn test_configured_detail_base_wins() {
        let mut config = CatalogConfig::new("https://catalog.example.com/phones/");
        config.detail_base_url = "https://m.example.com".to_string();
        assert_eq!(
            config.resolved_detail_base().unwrap(),
            "https://m.example.com"
        );
    }

    #[test]
    fn test_invalid_catalog_url_is_reported() {
        let config = CatalogConfig::new("not a url");
        assert!(matches!(
            config.resolved_detail_base(),
            Err(HarvestError::InvalidUrl { .. })
        ));
    }
}
