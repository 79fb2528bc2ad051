use crate::error::HarvestError;
use scraper::{Html, Selector};

/// Pager links at the bottom of the catalog listing.
const PAGER_LINK_SELECTOR: &str = "a.ib";

/// Per-product title anchors in the (expanded) catalog listing.
const PRODUCT_LINK_SELECTOR: &str = "a.model-short-title";

/// Derive how many "show more" clicks remain from the catalog pager.
///
/// The pager mixes numbered page links with non-numeric controls (a trailing
/// "next" arrow on the reference site), so the last *numeric* label is taken
/// as the total page count instead of indexing a fixed position. One page is
/// already visible, so the remaining click count is `total - 1`. A catalog
/// with no pager, or a pager without a single numeric label, means the site's
/// markup contract changed and is fatal.
pub fn remaining_clicks(html: &str, catalog_url: &str) -> Result<usize, HarvestError> {
    let doc = Html::parse_document(html);
    let pager = Selector::parse(PAGER_LINK_SELECTOR).unwrap();

    let mut saw_pager = false;
    let mut last_page: Option<usize> = None;
    for element in doc.select(&pager) {
        saw_pager = true;
        let label = element.text().collect::<String>();
        if let Ok(page) = label.trim().parse::<usize>() {
            last_page = Some(page);
        }
    }

    if !saw_pager {
        return Err(HarvestError::layout("catalog pager links", catalog_url));
    }

    match last_page {
        Some(total) => Ok(total.saturating_sub(1)),
        None => Err(HarvestError::layout(
            "numeric page label in catalog pager",
            catalog_url,
        )),
    }
}

/// Extract every product detail link from the fully expanded catalog markup.
///
/// Hrefs are returned verbatim (relative URLs), in document order, without
/// deduplication. Anchors missing an href are skipped.
pub fn collect_product_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let anchors = Selector::parse(PRODUCT_LINK_SELECTOR).unwrap();

    let links: Vec<String> = doc
        .select(&anchors)
        .filter_map(|e| e.value().attr("href"))
        .map(|href| href.to_string())
        .collect();

    ::log::debug!("catalog parser found {} product links", links.len());
    links
}
