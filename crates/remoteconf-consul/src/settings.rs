//! Connection settings and KV request construction
//!
//! Settings arrive from the host configuration as loose, possibly missing
//! values. [`ConnectionSettings::build`] validates them once and produces a
//! [`KvRequest`] holding the normalized endpoint, prefix and the final URL.

use std::time::Duration;

use config::{Config, ConfigError};
use url::Url;

use crate::{
    constants::{DEFAULT_CONNECT_TIMEOUT_MS, kv_api, setting_key},
    error::{ConsulError, Result},
};

/// Connection settings for the Consul agent
#[derive(Clone, Debug)]
pub struct ConnectionSettings {
    /// Agent base URL (e.g. "http://127.0.0.1:8500")
    pub endpoint: Option<String>,
    /// KV path prefix listed recursively
    pub prefix: Option<String>,
    /// ACL token, sent as the `token` query parameter
    pub auth_token: Option<String>,
    /// Connection timeout (default: 1500 ms)
    pub connect_timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            prefix: None,
            auth_token: None,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

impl ConnectionSettings {
    /// Create settings for an endpoint and prefix
    pub fn new(endpoint: &str, prefix: &str) -> Self {
        Self {
            endpoint: Some(endpoint.to_string()),
            prefix: Some(prefix.to_string()),
            ..Default::default()
        }
    }

    /// Set the ACL token
    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout_ms(mut self, connect_ms: u64) -> Self {
        self.connect_timeout = Duration::from_millis(connect_ms);
        self
    }

    /// Read settings from the host configuration object `object_name`.
    ///
    /// Missing keys stay `None` so that [`ConnectionSettings::build`] reports
    /// them; keys holding a value of the wrong type fail here.
    pub fn from_config(config: &Config, object_name: &str) -> Result<Self> {
        let path = |key: &str| format!("{object_name}.{key}");

        let connect_timeout = match config.get_int(&path(setting_key::CONNECT_TIMEOUT)) {
            Ok(ms) => {
                let ms = u64::try_from(ms).map_err(|_| {
                    ConsulError::invalid_setting(
                        setting_key::CONNECT_TIMEOUT,
                        "must be a positive number of milliseconds",
                    )
                })?;
                Duration::from_millis(ms)
            }
            Err(ConfigError::NotFound(_)) => Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            Err(e) => {
                return Err(ConsulError::invalid_setting(
                    setting_key::CONNECT_TIMEOUT,
                    e.to_string(),
                ));
            }
        };

        Ok(Self {
            endpoint: optional_string(config, &path(setting_key::ENDPOINT), setting_key::ENDPOINT)?,
            prefix: optional_string(config, &path(setting_key::PREFIX), setting_key::PREFIX)?,
            auth_token: optional_string(
                config,
                &path(setting_key::AUTH_TOKEN),
                setting_key::AUTH_TOKEN,
            )?,
            connect_timeout,
        })
    }

    /// Validate and normalize the settings into a KV request
    pub fn build(&self) -> Result<KvRequest> {
        let endpoint = match self.endpoint.as_deref() {
            None => {
                return Err(ConsulError::invalid_setting(
                    setting_key::ENDPOINT,
                    "must not be null",
                ));
            }
            Some(endpoint) if !endpoint.starts_with("http") => {
                return Err(ConsulError::invalid_setting(
                    setting_key::ENDPOINT,
                    "must start with http:// or https://",
                ));
            }
            Some(endpoint) => endpoint,
        };
        let Some(prefix) = self.prefix.as_deref() else {
            return Err(ConsulError::invalid_setting(
                setting_key::PREFIX,
                "must not be null",
            ));
        };

        let endpoint = normalize_endpoint(endpoint);
        let prefix = normalize_prefix(prefix).to_string();

        let mut url = Url::parse(&format!("{endpoint}{}", kv_api::PATH))
            .map_err(|e| ConsulError::invalid_setting(setting_key::ENDPOINT, e.to_string()))?;
        if !prefix.is_empty() {
            // Segments are percent-encoded, so `#`, `?` and `%` stay inside the path
            url.path_segments_mut()
                .map_err(|_| {
                    ConsulError::invalid_setting(setting_key::ENDPOINT, "cannot be a base URL")
                })?
                .pop_if_empty()
                .extend(prefix.split('/'))
                .push("");
        }

        url.set_query(Some(kv_api::RECURSE));
        if let Some(token) = self.auth_token.as_deref() {
            url.query_pairs_mut().append_pair(kv_api::TOKEN, token);
        }

        Ok(KvRequest {
            endpoint,
            prefix,
            url,
        })
    }
}

/// A validated KV listing request
#[derive(Clone, Debug)]
pub struct KvRequest {
    endpoint: String,
    prefix: String,
    url: Url,
}

impl KvRequest {
    /// Endpoint, always ending with `/`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Prefix, never starting or ending with `/`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL with the token value masked, for logging
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        if url.query_pairs().any(|(key, _)| key == kv_api::TOKEN) {
            url.set_query(Some(kv_api::RECURSE));
            url.query_pairs_mut().append_pair(kv_api::TOKEN, "***");
        }
        url.to_string()
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.ends_with('/') {
        endpoint.to_string()
    } else {
        format!("{endpoint}/")
    }
}

fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_matches('/')
}

fn optional_string(config: &Config, path: &str, field: &'static str) -> Result<Option<String>> {
    match config.get_string(path) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ConsulError::invalid_setting(field, e.to_string())),
    }
}
