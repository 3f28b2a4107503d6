//! HTTP client for the provider API.
//!
//! One low-level JSON request helper plus a typed wrapper per endpoint.
//! Retry policy belongs to callers; nothing in this layer retries.

use crate::config::FetchConfig;
use crate::device::{DeviceInfo, Tokens};
use crate::error::Error;
use crate::location::{Location, LocationList};
use crate::proxy::Server;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The `{success, data}` envelope every endpoint answers with.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
}

/// Body of a `/api/server/list/` request.
#[derive(Debug, Serialize)]
struct ServerListRequest<'a> {
    protocol: &'a str,
    region: &'a str,
    #[serde(rename = "type")]
    kind: i64,
}

/// Source of per-region server lists, seam between the scanner and the
/// network so scans can be driven by scripted responses in tests.
#[async_trait]
pub trait ServerDirectory {
    /// Fetch the server list for one (location, protocol) pair.
    async fn server_list(
        &self,
        token: &str,
        protocol: &str,
        location: &Location,
    ) -> Result<Vec<Server>, Error>;
}

/// Client for the provider API.
pub struct ApiClient {
    http: Client,
    api_base: String,
}

impl ApiClient {
    /// Build a client with the fixed header set and request timeout.
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, api_base: config.api_base.clone() })
    }

    /// Assemble one request with the fixed header set. Content-Type and
    /// Accept go out on every request, bodyless POSTs included.
    fn build_request<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.api_base, endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Perform one JSON request and parse the response body.
    ///
    /// Non-2xx responses become `Error::Request` carrying status and body;
    /// transport failures become `Error::Network`.
    async fn request_json<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.build_request(method, endpoint, body, token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request { status: status.as_u16(), body });
        }

        Ok(response.json().await?)
    }

    /// Register the device anonymously and exchange it for tokens.
    ///
    /// Registration failure is terminal for the run; a missing or empty
    /// access token counts as failure.
    pub async fn register(&self, device: &DeviceInfo) -> Result<Tokens, Error> {
        let envelope: Envelope<Tokens> = self
            .request_json(Method::POST, "/api/launch/", Some(device), None)
            .await?;

        let tokens = match envelope.data {
            Some(tokens) if envelope.success => tokens,
            _ => return Err(Error::Registration("launch response unsuccessful".to_string())),
        };
        if tokens.access_token.is_empty() {
            return Err(Error::Registration("no access token in launch response".to_string()));
        }
        Ok(tokens)
    }

    /// Fetch the full location list with its country name lookup.
    pub async fn locations(&self, token: &str) -> Result<LocationList, Error> {
        let envelope: Envelope<LocationList> = self
            .request_json::<_, ()>(Method::POST, "/api/location/list/", None, Some(token))
            .await?;

        match envelope.data {
            Some(list) if envelope.success && !list.locations.is_empty() => Ok(list),
            _ => Err(Error::Api { endpoint: "/api/location/list/".to_string() }),
        }
    }
}

#[async_trait]
impl ServerDirectory for ApiClient {
    async fn server_list(
        &self,
        token: &str,
        protocol: &str,
        location: &Location,
    ) -> Result<Vec<Server>, Error> {
        let payload = ServerListRequest {
            protocol,
            region: &location.region,
            kind: location.kind,
        };
        let envelope: Envelope<Vec<Server>> = self
            .request_json(Method::POST, "/api/server/list/", Some(&payload), Some(token))
            .await?;

        match envelope.data {
            Some(servers) if envelope.success => Ok(servers),
            _ => Err(Error::Api { endpoint: "/api/server/list/".to_string() }),
        }
    }
}
