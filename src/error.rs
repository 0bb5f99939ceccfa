//! Error types for header-logger
//!
//! Nothing here is fatal: every variant ends with a log line and, at worst,
//! logging staying off for a tab or one batch of logs being dropped.

use thiserror::Error;

/// A header value that could not be turned into log entries
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 in header: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid JSON in header: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed log envelope: {0}")]
    Envelope(String),
}

/// Allow-list storage failure
#[derive(Debug, Error)]
#[error("allow-list {operation} failed for {host:?}: {message}")]
pub struct StoreError {
    pub operation: &'static str,
    pub host: String,
    pub message: String,
}

impl StoreError {
    pub fn new(operation: &'static str, host: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError {
            operation,
            host: host.into(),
            message: message.into(),
        }
    }
}

/// Failure to reach a tab or the toolbar button
#[derive(Debug, Error)]
#[error("delivery to tab {tab_id} failed: {message}")]
pub struct DeliveryError {
    pub tab_id: i32,
    pub message: String,
}

impl DeliveryError {
    pub fn new(tab_id: i32, message: impl Into<String>) -> Self {
        DeliveryError {
            tab_id,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("logging cannot be enabled on {url}")]
    ProtectedPage { url: String },
}

pub type Result<T> = std::result::Result<T, Error>;
