use crate::error::HarvestError;
use crate::parsers::catalog::{collect_product_links, remaining_clicks};

const CATALOG_URL: &str = "https://catalog.example.com/phones/";

fn catalog_page(pager: &str, products: &str) -> String {
    format!(
        "<html><body>\
         <div class=\"list\">{products}</div>\
         <div class=\"pager\">{pager}</div>\
         </body></html>"
    )
}

#[test]
fn test_remaining_clicks_from_numbered_pager() {
    // Last element is a "next" arrow, not a page number.
    let html = catalog_page(
        r##"<a class="ib" href="#">1</a>
            <a class="ib" href="#">2</a>
            <a class="ib" href="#">3</a>
            <a class="ib" href="#">&gt;</a>"##,
        "",
    );
    assert_eq!(remaining_clicks(&html, CATALOG_URL).unwrap(), 2);
}

#[test]
fn test_remaining_clicks_without_trailing_arrow() {
    // A pager that ends on a page number must not be misread.
    let html = catalog_page(
        r##"<a class="ib" href="#">1</a>
            <a class="ib" href="#">2</a>
            <a class="ib" href="#">5</a>"##,
        "",
    );
    assert_eq!(remaining_clicks(&html, CATALOG_URL).unwrap(), 4);
}

#[test]
fn test_single_page_needs_no_clicks() {
    let html = catalog_page(r##"<a class="ib" href="#">1</a>"##, "");
    assert_eq!(remaining_clicks(&html, CATALOG_URL).unwrap(), 0);
}

#[test]
fn test_missing_pager_is_fatal() {
    let html = catalog_page("", "");
    match remaining_clicks(&html, CATALOG_URL) {
        Err(HarvestError::Layout { what, url }) => {
            assert_eq!(what, "catalog pager links");
            assert_eq!(url, CATALOG_URL);
        }
        other => panic!("expected Layout error, got {other:?}"),
    }
}

#[test]
fn test_pager_without_numbers_is_fatal() {
    let html = catalog_page(
        r##"<a class="ib" href="#">&lt;</a><a class="ib" href="#">&gt;</a>"##,
        "",
    );
    assert!(matches!(
        remaining_clicks(&html, CATALOG_URL),
        Err(HarvestError::Layout { .. })
    ));
}

#[test]
fn test_collect_links_in_document_order() {
    let html = catalog_page(
        "",
        r##"<a class="model-short-title" href="/p/alpha">Alpha</a>
            <a class="model-short-title" href="/p/beta?v=2">Beta</a>
            <a class="other" href="/not-a-product">Nope</a>
            <a class="model-short-title" href="/p/gamma">Gamma</a>"##,
    );
    let links = collect_product_links(&html);
    assert_eq!(links, vec!["/p/alpha", "/p/beta?v=2", "/p/gamma"]);
}

#[test]
fn test_collect_links_preserves_hrefs_verbatim() {
    let html = catalog_page(
        "",
        r##"<a class="model-short-title" href="/p/x%20y?a=1&amp;b=2">X</a>"##,
    );
    let links = collect_product_links(&html);
    assert_eq!(links, vec!["/p/x%20y?a=1&b=2"]);
}

#[test]
fn test_collect_links_from_empty_catalog() {
    let html = catalog_page(r##"<a class="ib" href="#">1</a>"##, "");
    assert!(collect_product_links(&html).is_empty());
}

#[test]
fn test_three_page_catalog_with_seven_products() {
    // Page 3 of 3 plus seven product anchors: two expansion clicks, seven
    // fetch tasks.
    let products: String = (1..=7)
        .map(|i| format!(r##"<a class="model-short-title" href="/p/{i}">P{i}</a>"##))
        .collect();
    let html = catalog_page(
        r##"<a class="ib" href="#">1</a>
            <a class="ib" href="#">2</a>
            <a class="ib" href="#">3</a>
            <a class="ib" href="#">&gt;</a>"##,
        &products,
    );
    assert_eq!(remaining_clicks(&html, CATALOG_URL).unwrap(), 2);
    assert_eq!(collect_product_links(&html).len(), 7);
}
