use crate::config::CatalogConfig;
use crate::error::HarvestError;
use crate::parsers;
use fantoccini::{Client, Locator};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The "show more" control that reveals the next slice of the catalog.
const SHOW_MORE_SELECTOR: &str = ".list-more-div";

/// Reveal the whole catalog by clicking the "show more" control until the
/// pager's page count is exhausted.
///
/// The pager determines an upper bound on clicks; the loop also stops early
/// the first time the control cannot be found or clicked within the reveal
/// timeout, which on the reference site means everything is already visible.
/// A missing pager is fatal. Returns the number of clicks performed.
pub async fn expand(
    client: &Client,
    config: &CatalogConfig,
    cancel: &CancellationToken,
) -> Result<usize, HarvestError> {
    let html = client
        .source()
        .await
        .map_err(|e| HarvestError::navigation(&config.catalog_url, e))?;
    let max_clicks = parsers::catalog::remaining_clicks(&html, &config.catalog_url)?;
    ::log::info!("catalog spans {} additional page(s)", max_clicks);

    let mut clicks = 0;
    for _ in 0..max_clicks {
        if cancel.is_cancelled() {
            ::log::info!("cancelled during pagination after {} click(s)", clicks);
            break;
        }

        let control = match client
            .wait()
            .at_most(Duration::from_millis(config.reveal_timeout_ms))
            .for_element(Locator::Css(SHOW_MORE_SELECTOR))
            .await
        {
            Ok(control) => control,
            Err(e) => {
                ::log::info!(
                    "show-more control gone after {} click(s), catalog fully revealed: {}",
                    clicks,
                    e
                );
                break;
            }
        };

        if let Err(e) = control.click().await {
            ::log::info!("show-more control went stale after {} click(s): {}", clicks, e);
            break;
        }

        // Let the newly revealed entries render before the next read.
        tokio::time::sleep(Duration::from_millis(config.settle_delay_ms)).await;
        clicks += 1;
        ::log::debug!("revealed catalog slice {}/{}", clicks, max_clicks);
    }

    Ok(clicks)
}
