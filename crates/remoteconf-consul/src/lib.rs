//! Remoteconf Consul - configuration provider backed by the Consul KV store
//!
//! One retrieval runs four stages in order:
//! - `settings`: validate and normalize connection settings, build the request URL
//! - `transport`: a single HTTP GET bounded by a connect timeout
//! - `decoder`: parse the KV listing and base64-decode every value
//! - `classifier`: split entries into key-values and files and push them to the sinks
//!
//! `ConsulProvider` ties the stages together behind the `Provider` trait.

pub mod classifier;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod provider;
pub mod release;
pub mod settings;
pub mod transport;

pub use classifier::{ConfigValue, Emitter, LoadSummary, classify};
pub use decoder::{DecodedEntry, KvListing, KvRecord, config_key};
pub use error::{ConsulError, Result};
pub use provider::ConsulProvider;
pub use settings::{ConnectionSettings, KvRequest};
pub use transport::ConsulTransport;
