// File-vs-value classification and sink dispatch

use remoteconf_provider::{FileDetector, FileObject, FileSink, KeyValueObject, KeyValueSink};
use tracing::debug;

/// A classified configuration entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    KeyValue(KeyValueObject),
    File(FileObject),
}

impl ConfigValue {
    pub fn key(&self) -> &str {
        match self {
            Self::KeyValue(object) => &object.key,
            Self::File(object) => &object.key,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// Classify a decoded payload. The detector is evaluated exactly once.
pub fn classify(key: String, payload: String, detector: &dyn FileDetector) -> ConfigValue {
    if detector.is_file(&payload) {
        ConfigValue::File(FileObject::new(key, payload))
    } else {
        ConfigValue::KeyValue(KeyValueObject::new(key, payload))
    }
}

/// Counts of what one retrieval emitted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub key_values: usize,
    pub files: usize,
    pub directory_markers: usize,
}

impl LoadSummary {
    pub fn emitted(&self) -> usize {
        self.key_values + self.files
    }
}

/// Pushes classified entries into the sinks, in the order they are emitted
pub struct Emitter<'a> {
    kv_sink: &'a mut dyn KeyValueSink,
    file_sink: &'a mut dyn FileSink,
    summary: LoadSummary,
}

impl<'a> Emitter<'a> {
    pub fn new(kv_sink: &'a mut dyn KeyValueSink, file_sink: &'a mut dyn FileSink) -> Self {
        Self {
            kv_sink,
            file_sink,
            summary: LoadSummary::default(),
        }
    }

    pub fn emit(&mut self, value: ConfigValue) {
        match value {
            ConfigValue::File(object) => {
                debug!("Emitting file '{}'", object.key);
                self.summary.files += 1;
                self.file_sink.accept(object);
            }
            ConfigValue::KeyValue(object) => {
                debug!("Emitting key '{}'", object.key);
                self.summary.key_values += 1;
                self.kv_sink.accept(object);
            }
        }
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use remoteconf_provider::FileMarker;

    use super::*;

    #[test]
    fn test_classify_with_file_marker() {
        let value = classify(
            "nginx.conf".to_string(),
            "<FILE>./conf/nginx.conf$c2VydmVyIHt9".to_string(),
            &FileMarker,
        );
        assert!(value.is_file());
        assert_eq!(value.key(), "nginx.conf");

        let value = classify("db.url".to_string(), "postgres://db".to_string(), &FileMarker);
        assert_eq!(
            value,
            ConfigValue::KeyValue(KeyValueObject::new("db.url", "postgres://db"))
        );
    }

    #[test]
    fn test_classify_evaluates_detector_once() {
        let calls = AtomicUsize::new(0);
        let detector = |payload: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            payload.contains('\n')
        };

        let value = classify("motd".to_string(), "line 1\nline 2".to_string(), &detector);
        assert!(value.is_file());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emitter_routes_in_order() {
        let mut log = Vec::new();
        let mut files = Vec::new();
        {
            let mut kv_sink = |object: KeyValueObject| log.push(object.key);
            let mut file_sink = |object: FileObject| files.push(object.key);
            let mut emitter = Emitter::new(&mut kv_sink, &mut file_sink);

            emitter.emit(ConfigValue::KeyValue(KeyValueObject::new("a", "1")));
            emitter.emit(ConfigValue::File(FileObject::new("f", "<FILE>x$")));
            emitter.emit(ConfigValue::KeyValue(KeyValueObject::new("b", "2")));

            assert_eq!(
                emitter.summary(),
                LoadSummary {
                    key_values: 2,
                    files: 1,
                    directory_markers: 0,
                }
            );
            assert_eq!(emitter.summary().emitted(), 3);
        }

        assert_eq!(log, vec!["a", "b"]);
        assert_eq!(files, vec!["f"]);
    }
}
