// Provider trait driven by the configuration host

use async_trait::async_trait;
use config::Config;

use crate::{
    error::Result,
    sink::{FileSink, KeyValueSink},
};

/// A remote configuration source.
///
/// The host hands every provider its whole configuration; a provider reads
/// its own settings from the object named by [`Provider::configuration_object_name`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human readable provider name
    fn name(&self) -> &str;

    /// Provider release version
    async fn version(&self) -> Result<String>;

    /// Name of the configuration object holding this provider's settings
    fn configuration_object_name(&self) -> &str;

    /// Retrieve every configuration entry and push it into the matching sink
    async fn load_data(
        &self,
        config: &Config,
        kv_sink: &mut dyn KeyValueSink,
        file_sink: &mut dyn FileSink,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ProviderError,
        model::{FileObject, KeyValueObject},
    };

    struct StaticProvider;

    #[async_trait]
    impl Provider for StaticProvider {
        fn name(&self) -> &str {
            "Static"
        }

        async fn version(&self) -> Result<String> {
            Ok("1.0.0".to_string())
        }

        fn configuration_object_name(&self) -> &str {
            "static"
        }

        async fn load_data(
            &self,
            config: &Config,
            kv_sink: &mut dyn KeyValueSink,
            file_sink: &mut dyn FileSink,
        ) -> Result<()> {
            let value = config
                .get_string("static.value")
                .map_err(|e| ProviderError::bad_value("value", e.to_string()))?;
            kv_sink.accept(KeyValueObject::new("value", value));
            file_sink.accept(FileObject::new("file", "<FILE>./f$"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_provider_as_trait_object() {
        let provider: Box<dyn Provider> = Box::new(StaticProvider);
        let config = Config::builder()
            .set_override("static.value", "42")
            .unwrap()
            .build()
            .unwrap();

        let mut values = Vec::new();
        let mut files = Vec::new();
        provider
            .load_data(
                &config,
                &mut |object: KeyValueObject| values.push(object),
                &mut |object: FileObject| files.push(object),
            )
            .await
            .unwrap();

        assert_eq!(provider.name(), "Static");
        assert_eq!(provider.version().await.unwrap(), "1.0.0");
        assert_eq!(values, vec![KeyValueObject::new("value", "42")]);
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_provider_reports_missing_setting() {
        let provider = StaticProvider;
        let config = Config::builder().build().unwrap();

        let mut values = Vec::new();
        let mut files = Vec::new();
        let err = provider
            .load_data(
                &config,
                &mut |object: KeyValueObject| values.push(object),
                &mut |object: FileObject| files.push(object),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::BadValue { ref path, .. } if path == "value"));
        assert!(values.is_empty());
        assert!(files.is_empty());
    }
}
