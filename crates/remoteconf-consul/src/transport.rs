//! Single-shot HTTP transport to the Consul agent
//!
//! Only connection establishment is bounded; reading the body is not. There
//! is no retry: a failed attempt is reported to the caller as-is.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{ConsulError, Result},
    settings::ConnectionSettings,
};

/// HTTP transport for KV listings
#[derive(Clone, Debug)]
pub struct ConsulTransport {
    client: Client,
    connect_timeout: Duration,
}

impl ConsulTransport {
    /// Create a transport with the given connection timeout
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ConsulError::Client)?;

        Ok(Self {
            client,
            connect_timeout,
        })
    }

    /// Create a transport honoring the connection timeout of `settings`
    pub fn from_settings(settings: &ConnectionSettings) -> Result<Self> {
        Self::new(settings.connect_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// GET `url` and return the whole body of a 2xx answer.
    ///
    /// Other statuses fail with [`ConsulError::Status`] without reading the
    /// body. Errors never carry the URL, since it may embed the ACL token.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Consul request failed: {}", e);
                ConsulError::Connect(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Consul answered with status {}", status);
            return Err(ConsulError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ConsulError::Connect(e.without_url()))?;
        debug!("Received {} bytes from Consul", body.len());

        Ok(body)
    }
}
