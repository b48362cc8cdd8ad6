//! Consul configuration provider
//!
//! Runs the retrieval pipeline: settings → request URL → one HTTP GET →
//! KV listing → classification → sinks. Entries already pushed into the sinks
//! stay there when a later entry fails to decode.

use async_trait::async_trait;
use config::Config;
use remoteconf_provider::{
    FileDetector, FileMarker, FileSink, KeyValueSink, Provider, ProviderError,
};
use tracing::{debug, info};

use crate::{
    classifier::{Emitter, LoadSummary, classify},
    constants::{CONFIGURATION_OBJECT_NAME, PROVIDER_NAME},
    decoder::KvListing,
    error::Result,
    release,
    settings::ConnectionSettings,
    transport::ConsulTransport,
};

/// Retrieves configuration from HashiCorp Consul
pub struct ConsulProvider {
    detector: Box<dyn FileDetector>,
}

impl Default for ConsulProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsulProvider {
    /// Create a provider recognizing files by the `<FILE>` marker
    pub fn new() -> Self {
        Self::with_detector(FileMarker)
    }

    /// Create a provider using a custom file detector
    pub fn with_detector(detector: impl FileDetector + 'static) -> Self {
        Self {
            detector: Box::new(detector),
        }
    }

    /// Retrieve every entry under the configured prefix and push it into the sinks
    pub async fn retrieve(
        &self,
        settings: &ConnectionSettings,
        kv_sink: &mut dyn KeyValueSink,
        file_sink: &mut dyn FileSink,
    ) -> Result<LoadSummary> {
        let request = settings.build()?;
        debug!("Listing Consul KV: {}", request.redacted_url());

        let transport = ConsulTransport::from_settings(settings)?;
        let body = transport.fetch(request.url()).await?;

        let listing = KvListing::parse(&body)?;
        let directory_markers = listing.directory_markers();

        let mut emitter = Emitter::new(kv_sink, file_sink);
        for entry in listing.into_entries(request.prefix()) {
            let entry = entry?;
            emitter.emit(classify(entry.key, entry.payload, self.detector.as_ref()));
        }

        let summary = LoadSummary {
            directory_markers,
            ..emitter.summary()
        };
        info!(
            "Loaded {} key-values and {} files from Consul prefix '{}' ({} directory markers skipped)",
            summary.key_values,
            summary.files,
            request.prefix(),
            summary.directory_markers
        );

        Ok(summary)
    }
}

#[async_trait]
impl Provider for ConsulProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn version(&self) -> std::result::Result<String, ProviderError> {
        release::release_version().await.map(str::to_string)
    }

    fn configuration_object_name(&self) -> &str {
        CONFIGURATION_OBJECT_NAME
    }

    async fn load_data(
        &self,
        config: &Config,
        kv_sink: &mut dyn KeyValueSink,
        file_sink: &mut dyn FileSink,
    ) -> std::result::Result<(), ProviderError> {
        let settings = ConnectionSettings::from_config(config, self.configuration_object_name())?;
        self.retrieve(&settings, kv_sink, file_sink).await?;
        Ok(())
    }
}
