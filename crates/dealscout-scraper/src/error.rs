use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not parse price \"{raw}\": {reason}")]
    Parse { raw: String, reason: String },

    #[error("no product identifier in URL \"{url}\": {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("element {locator} not found on {url}")]
    ElementNotFound { locator: String, url: String },

    #[error("timed out after {waited_ms}ms waiting for {locator}")]
    Timeout { locator: String, waited_ms: u64 },

    #[error("invalid selector {locator}: {reason}")]
    InvalidSelector { locator: String, reason: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("page driver session is closed")]
    SessionClosed,
}
