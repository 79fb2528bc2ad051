// Re-export modules
pub mod aggregate;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod records;
pub mod sink;

// Re-export commonly used types for convenience
pub use aggregate::{AggregatedTable, SchemaPolicy};
pub use config::CatalogConfig;
pub use error::HarvestError;
pub use records::{FieldValue, ProductRecord};

use crate::crawlers::pool::PoolOutcome;
use fantoccini::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// What a finished run produced.
///
/// `skipped` counts fetch tasks that never started because the run was
/// cancelled; `failed` counts tasks dropped under the log-and-drop failure
/// policy. A run with `written == 0` completes successfully but is reported
/// as a warning by the binary.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Product links discovered in the expanded catalog
    pub discovered: usize,
    /// Rows written to the output file
    pub written: usize,
    /// Fetch tasks dropped after a per-task failure
    pub failed: usize,
    /// Fetch tasks skipped due to cancellation
    pub skipped: usize,
    /// Canonical column names of the output table
    pub columns: Vec<String>,
}

/// Main builder for harvesting a product catalog into a delimited table
pub struct Harvest {
    config: CatalogConfig,
    cancel: CancellationToken,
}

impl Harvest {
    /// Create a new Harvest builder for the given catalog URL
    pub fn new(catalog_url: &str) -> Self {
        Self {
            config: CatalogConfig::new(catalog_url),
            cancel: CancellationToken::new(),
        }
    }

    /// Start from a full configuration
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the maximum number of concurrent detail fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the base URL prepended to relative detail links
    pub fn with_detail_base_url(mut self, base: &str) -> Self {
        self.config.detail_base_url = base.to_string();
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Set the output file path
    pub fn with_output(mut self, path: &str) -> Self {
        self.config.output_path = path.to_string();
        self
    }

    /// Set the schema reconciliation policy
    pub fn with_schema_policy(mut self, policy: SchemaPolicy) -> Self {
        self.config.schema_policy = policy;
        self
    }

    /// Attach a cancellation token; cancelling it stops further pagination
    /// clicks and unstarted fetch tasks while in-flight tasks drain
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Run the whole pipeline: expand the catalog, collect detail links,
    /// fetch them concurrently, reconcile the records and write the table.
    pub async fn run(mut self) -> Result<RunSummary, HarvestError> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        Url::parse(&self.config.catalog_url).map_err(|e| HarvestError::InvalidUrl {
            url: self.config.catalog_url.clone(),
            source: e,
        })?;
        self.config.detail_base_url = self.config.resolved_detail_base()?;

        let config = Arc::new(self.config);
        ::log::info!("starting harvest of {}", config.catalog_url);

        let client = crawlers::session::connect(&config.webdriver_url).await?;
        let phases = run_phases(&client, &config, &self.cancel).await;
        if let Err(e) = client.close().await {
            ::log::warn!("failed to close the catalog session: {}", e);
        }
        let (discovered, outcome) = phases?;

        if outcome.failed > 0 {
            ::log::warn!(
                "{} of {} detail fetches failed and were dropped",
                outcome.failed,
                discovered
            );
        }

        let table = aggregate::aggregate(outcome.results, config.schema_policy)?;
        let written = if table.is_empty() {
            ::log::warn!(
                "no products harvested from {}; not writing {}",
                config.catalog_url,
                config.output_path
            );
            0
        } else {
            sink::write_table(&table, &config.output_path)?
        };

        Ok(RunSummary {
            discovered,
            written,
            failed: outcome.failed,
            skipped: outcome.skipped,
            columns: table.columns,
        })
    }
}

/// The browser-facing phases, separated so the root session is closed on
/// every exit path of `run`.
async fn run_phases(
    client: &Client,
    config: &Arc<CatalogConfig>,
    cancel: &CancellationToken,
) -> Result<(usize, PoolOutcome<ProductRecord>), HarvestError> {
    client
        .goto(&config.catalog_url)
        .await
        .map_err(|e| HarvestError::navigation(&config.catalog_url, e))?;

    let clicks = crawlers::pagination::expand(client, config, cancel).await?;
    ::log::info!("catalog expanded with {} click(s)", clicks);

    let html = client
        .source()
        .await
        .map_err(|e| HarvestError::navigation(&config.catalog_url, e))?;
    let links = parsers::catalog::collect_product_links(&html);
    ::log::info!("found {} products", links.len());

    let discovered = links.len();
    let outcome = crawlers::pool::run(links, config.max_concurrency, cancel, |link| {
        crawlers::detail::fetch_one(Arc::clone(config), link)
    })
    .await;

    Ok((discovered, outcome))
}
