//! Error types for the vpn-proxy-fetch crate.

use thiserror::Error;

/// Errors surfaced by the run. The first three come out of the HTTP layer;
/// the rest are fatal conditions detected by the individual phases.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (DNS, connection refused, timeout, bad body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error {status}: {body}")]
    Request { status: u16, body: String },

    /// The API answered 2xx but the `{success, data}` envelope was unusable.
    #[error("unexpected API response from {endpoint}")]
    Api { endpoint: String },

    /// Device registration did not yield an access token.
    #[error("device registration failed: {0}")]
    Registration(String),

    /// The location list contained no free-tier entries.
    #[error("no free locations available")]
    NoFreeLocations,

    /// Every scan attempt came back empty or failed.
    #[error("no proxy server found after scanning")]
    NoProxyFound,
}
