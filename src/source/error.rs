//! Data loading error types

use thiserror::Error;

/// Errors that can occur while fetching the customer/transaction feed
#[derive(Error, Debug)]
pub enum LoadError {
    /// Connection to the feed could not be established
    #[error("Data source unavailable at {0}")]
    Unavailable(String),

    /// The feed did not answer within the configured timeout
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The feed answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body was not a collection of the expected records
    #[error("Malformed {collection} payload: {message}")]
    Payload {
        collection: &'static str,
        message: String,
    },
}

impl LoadError {
    /// Classify a transport error for the given URL
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LoadError::Timeout(url.to_string())
        } else if err.is_connect() {
            LoadError::Unavailable(url.to_string())
        } else {
            LoadError::Request(err)
        }
    }
}
