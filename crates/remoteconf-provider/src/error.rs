//! Error type surfaced by providers to the configuration host

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors a provider reports while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A provider setting is missing or malformed
    #[error("invalid value at '{path}': {message}")]
    BadValue { path: String, message: String },

    /// The remote source could not be reached or refused the request
    #[error("{message}")]
    Provider {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The remote source answered with content that could not be decoded
    #[error("{message}")]
    Decode {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("release metadata unavailable: {0}")]
    Metadata(String),
}

impl ProviderError {
    pub fn bad_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadValue {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    pub fn provider_caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn decode_caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
