//! Output channels and the file detection predicate
//!
//! Providers never collect results; every decoded entry is pushed into one of
//! two sinks as soon as it is classified. Any `FnMut` closure is a sink, and
//! any `Fn(&str) -> bool` closure is a file detector.

use crate::model::{FileObject, KeyValueObject};

/// Prefix marking a value as a file payload
pub const FILE_MARKER: &str = "<FILE>";

/// Receives plain configuration values
pub trait KeyValueSink: Send {
    fn accept(&mut self, object: KeyValueObject);
}

impl<F> KeyValueSink for F
where
    F: FnMut(KeyValueObject) + Send,
{
    fn accept(&mut self, object: KeyValueObject) {
        self(object)
    }
}

/// Receives file payloads
pub trait FileSink: Send {
    fn accept(&mut self, object: FileObject);
}

impl<F> FileSink for F
where
    F: FnMut(FileObject) + Send,
{
    fn accept(&mut self, object: FileObject) {
        self(object)
    }
}

/// Decides whether a decoded payload is a file.
///
/// Implementations must be pure: the same payload always yields the same
/// answer, and evaluating it has no side effects.
pub trait FileDetector: Send + Sync {
    fn is_file(&self, payload: &str) -> bool;
}

impl<F> FileDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_file(&self, payload: &str) -> bool {
        self(payload)
    }
}

/// Default detector: a payload is a file when it starts with [`FILE_MARKER`]
#[derive(Clone, Copy, Debug, Default)]
pub struct FileMarker;

impl FileDetector for FileMarker {
    fn is_file(&self, payload: &str) -> bool {
        payload.starts_with(FILE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sinks() {
        let mut values = Vec::new();
        let mut files = Vec::new();
        {
            let mut kv_sink = |object: KeyValueObject| values.push(object);
            let mut file_sink = |object: FileObject| files.push(object);
            let kv: &mut dyn KeyValueSink = &mut kv_sink;
            let file: &mut dyn FileSink = &mut file_sink;

            kv.accept(KeyValueObject::new("a", "1"));
            file.accept(FileObject::new("b", "<FILE>./b.txt$Yg=="));
            kv.accept(KeyValueObject::new("c", "3"));
        }

        assert_eq!(
            values,
            vec![KeyValueObject::new("a", "1"), KeyValueObject::new("c", "3")]
        );
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].key, "b");
    }

    #[test]
    fn test_file_marker() {
        let detector = FileMarker;
        assert!(detector.is_file("<FILE>./conf/app.conf$aGVsbG8="));
        assert!(!detector.is_file("hello"));
        assert!(!detector.is_file(""));
        assert!(!detector.is_file(" <FILE>leading space"));
    }

    #[test]
    fn test_closure_detector() {
        let multi_line = |payload: &str| payload.contains('\n');
        let detector: &dyn FileDetector = &multi_line;
        assert!(detector.is_file("line 1\nline 2"));
        assert!(!detector.is_file("single"));
    }
}
