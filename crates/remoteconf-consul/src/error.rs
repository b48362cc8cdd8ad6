//! Error types for Consul retrieval

use remoteconf_provider::ProviderError;

/// Errors that can occur while retrieving configuration from Consul
#[derive(Debug, thiserror::Error)]
pub enum ConsulError {
    #[error("invalid value for '{field}': {message}")]
    InvalidSetting {
        field: &'static str,
        message: String,
    },

    #[error("non-2xx status: {0}")]
    Status(u16),

    #[error("cannot connect to consul")]
    Connect(#[source] reqwest::Error),

    #[error("cannot build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("malformed KV listing: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("invalid base64 value at '{key}'")]
    InvalidBase64 {
        key: String,
        #[source]
        source: base64::DecodeError,
    },
}

impl ConsulError {
    pub fn invalid_setting(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            message: message.into(),
        }
    }

    /// Setting name for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSetting { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// HTTP status for non-2xx answers
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<ConsulError> for ProviderError {
    fn from(err: ConsulError) -> Self {
        let message = err.to_string();
        match err {
            ConsulError::InvalidSetting { field, message } => {
                ProviderError::bad_value(field, message)
            }
            ConsulError::Status(_) => ProviderError::provider(message),
            ConsulError::Connect(source) | ConsulError::Client(source) => {
                ProviderError::provider_caused_by(message, source)
            }
            ConsulError::MalformedResponse(source) => {
                ProviderError::decode_caused_by(message, source)
            }
            ConsulError::InvalidBase64 { source, .. } => {
                ProviderError::decode_caused_by(message, source)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsulError>;
