//! KV listing decoder
//!
//! A recursive KV listing is a JSON array of records. The whole array is
//! parsed up front; entries are then decoded lazily, in the order Consul
//! returned them.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::Deserialize;

use crate::error::{ConsulError, Result};

/// Standard alphabet; padding is optional and non-zero trailing bits are accepted
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// One record of a KV listing. Fields other than `Key` and `Value` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct KvRecord {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Value", default)]
    pub value: Option<String>, // Base64 encoded, absent for directory markers
}

impl KvRecord {
    pub fn is_directory_marker(&self) -> bool {
        self.value.is_none()
    }
}

/// A decoded entry ready for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    /// Dotted configuration key
    pub key: String,
    /// Decoded payload
    pub payload: String,
}

/// A parsed KV listing
#[derive(Debug, Clone, Default)]
pub struct KvListing {
    records: Vec<KvRecord>,
}

impl KvListing {
    pub fn parse(body: &[u8]) -> Result<Self> {
        let records: Vec<KvRecord> = serde_json::from_slice(body)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[KvRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records without a value
    pub fn directory_markers(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.is_directory_marker())
            .count()
    }

    /// Decode every record carrying a value, skipping directory markers.
    ///
    /// `prefix` must already be normalized. An invalid base64 value yields an
    /// error item; entries before it have already been produced.
    pub fn into_entries(self, prefix: &str) -> impl Iterator<Item = Result<DecodedEntry>> + '_ {
        self.records.into_iter().filter_map(move |record| {
            let KvRecord { key: store_key, value } = record;
            let encoded = value?;

            Some(match decode_value(&encoded) {
                Ok(payload) => Ok(DecodedEntry {
                    key: config_key(&store_key, prefix),
                    payload,
                }),
                Err(source) => Err(ConsulError::InvalidBase64 {
                    key: store_key,
                    source,
                }),
            })
        })
    }
}

/// Derive the dotted configuration key for a store path.
///
/// A leading `prefix/` is removed when `prefix` is not empty, then every `/`
/// becomes `.`.
pub fn config_key(store_key: &str, prefix: &str) -> String {
    let relative = if prefix.is_empty() {
        store_key
    } else {
        store_key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(store_key)
    };
    relative.replace('/', ".")
}

fn decode_value(encoded: &str) -> std::result::Result<String, base64::DecodeError> {
    let bytes = BASE64.decode(encoded)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
