// Consul provider constants

/// Provider name reported to the host
pub const PROVIDER_NAME: &str = "HashiCorp Consul";

/// Configuration object holding the provider settings
pub const CONFIGURATION_OBJECT_NAME: &str = "consul";

/// Version reported when the release metadata carries none
pub const UNKNOWN_VERSION: &str = "unknown";

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1500;

pub mod setting_key {
    pub const ENDPOINT: &str = "endpoint";
    pub const PREFIX: &str = "prefix";
    pub const AUTH_TOKEN: &str = "auth-token";
    pub const CONNECT_TIMEOUT: &str = "connect-timeout";
}

pub mod kv_api {
    /// KV endpoint, relative to the normalized agent endpoint
    pub const PATH: &str = "v1/kv/";
    pub const RECURSE: &str = "recurse";
    pub const TOKEN: &str = "token";
}
