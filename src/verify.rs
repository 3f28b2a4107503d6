//! Post-selection proxy verification.

use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Issue one test request through the proxy and report whether it succeeded.
///
/// Verification is best-effort: every failure mode (bad URL, client build
/// error, transport error, non-2xx status) is logged and reported as `false`,
/// never propagated. The proxy URL remains useful output either way.
pub async fn verify_proxy(proxy_url: &str, verify_url: &str, timeout: Duration) -> bool {
    if let Err(err) = Url::parse(proxy_url) {
        warn!("cannot parse proxy url {}: {}", proxy_url, err);
        return false;
    }

    let proxy = match reqwest::Proxy::all(proxy_url) {
        Ok(proxy) => proxy,
        Err(err) => {
            warn!("cannot use proxy {}: {}", proxy_url, err);
            return false;
        }
    };

    let client = match Client::builder()
        .proxy(proxy)
        .timeout(timeout)
        .pool_max_idle_per_host(0) // one-off request, no pooling
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            warn!("cannot build client for verification: {}", err);
            return false;
        }
    };

    let result = client.get(verify_url).send().await;
    drop(client);

    match result {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("proxy verification failed: {} {}", status, body);
            false
        }
        Err(err) => {
            debug!("proxy verification failed: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_proxy_url_fails_without_a_request() {
        let ok = verify_proxy("not a url", "https://httpbin.org/ip", Duration::from_secs(1)).await;
        assert!(!ok);
    }
}
