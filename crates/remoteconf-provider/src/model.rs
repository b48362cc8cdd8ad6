// Configuration objects emitted by providers

use serde::{Deserialize, Serialize};

/// A plain configuration value stored under a dotted key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueObject {
    pub key: String,
    pub value: String,
}

impl KeyValueObject {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A configuration entry whose value is a file payload for the host to deploy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    pub key: String,
    pub value: String,
}

impl FileObject {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
