use crate::error::HarvestError;
use fantoccini::{Client, ClientBuilder};

/// Opens a fresh WebDriver session.
///
/// Each concurrent fetch task gets its own session so no two tasks ever share
/// a rendering context. If the configured endpoint refuses the connection,
/// a few common WebDriver ports are tried before giving up with the original
/// error.
pub async fn connect(webdriver_url: &str) -> Result<Client, HarvestError> {
    let primary_error = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://127.0.0.1:4444", // geckodriver, with IP instead of localhost
    ];

    for url in fallback_urls.iter().filter(|u| **u != webdriver_url) {
        ::log::info!("trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "no WebDriver server reachable; start one or set the WEBDRIVER_URL environment variable"
    );
    Err(HarvestError::Session {
        webdriver_url: webdriver_url.to_string(),
        source: primary_error,
    })
}
