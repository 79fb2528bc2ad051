use crate::config::CatalogConfig;
use crate::crawlers::session;
use crate::error::HarvestError;
use crate::parsers;
use crate::records::ProductRecord;
use fantoccini::Client;
use std::sync::Arc;

/// Render one detail page in the given session and extract its record.
pub async fn fetch_detail(
    client: &Client,
    config: &CatalogConfig,
    link: &str,
) -> Result<ProductRecord, HarvestError> {
    let url = format!("{}{}", config.detail_base_url, link);

    client
        .goto(&url)
        .await
        .map_err(|e| HarvestError::navigation(&url, e))?;
    let html = client
        .source()
        .await
        .map_err(|e| HarvestError::navigation(&url, e))?;

    parsers::detail::parse_detail(&html, &url)
}

/// One pool task: open an isolated rendering context, fetch the detail page,
/// and close the context again whether the fetch succeeded or not.
///
/// Runs entirely under the pool's concurrency permit, so at most `limit`
/// sessions exist at any moment.
pub async fn fetch_one(
    config: Arc<CatalogConfig>,
    link: String,
) -> Result<ProductRecord, HarvestError> {
    let client = session::connect(&config.webdriver_url).await?;
    let result = fetch_detail(&client, &config, &link).await;

    if let Err(e) = client.close().await {
        ::log::warn!("failed to close page context for {}: {}", link, e);
    }

    result
}
