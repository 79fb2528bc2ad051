use thiserror::Error;

/// Errors raised while harvesting a catalog.
///
/// `Layout` is fatal when the catalog pager is involved and recoverable per
/// item during detail extraction; `Navigation` ends the pagination loop early
/// but only costs a single record during the fetch phase. The fetch-phase
/// policy (log and drop the failed task) is applied in the pool's collection
/// loop.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// An element the site's markup contract promises was not found.
    #[error("expected {what} missing from {url}")]
    Layout { what: &'static str, url: String },

    /// A navigate/render/wait operation against the browser failed.
    #[error("navigation failed for {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    /// No WebDriver session could be opened.
    #[error("could not open a WebDriver session at {webdriver_url}: {source}")]
    Session {
        webdriver_url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    /// A record's columns diverge from the canonical set under strict policy.
    #[error("record for {url} does not match the canonical columns (offending: {columns:?})")]
    SchemaMismatch { url: String, columns: Vec<String> },

    /// A configured URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to write output: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl HarvestError {
    /// Shorthand for a missing-element error.
    pub fn layout(what: &'static str, url: &str) -> Self {
        Self::Layout {
            what,
            url: url.to_string(),
        }
    }

    /// Shorthand for a failed browser operation.
    pub fn navigation(url: &str, source: fantoccini::error::CmdError) -> Self {
        Self::Navigation {
            url: url.to_string(),
            source,
        }
    }
}
