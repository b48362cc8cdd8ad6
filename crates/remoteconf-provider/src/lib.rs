//! Remoteconf Provider - SPI shared by remote configuration providers
//!
//! This crate provides:
//! - The `Provider` trait a configuration host drives
//! - Configuration object types emitted by providers (key-value and file)
//! - Sink traits receiving those objects, implemented for plain closures
//! - The pluggable file detection predicate
//! - `ProviderError`, the error surfaced to the host

pub mod error;
pub mod model;
pub mod provider;
pub mod sink;

pub use error::{BoxError, ProviderError, Result};
pub use model::{FileObject, KeyValueObject};
pub use provider::Provider;
pub use sink::{FILE_MARKER, FileDetector, FileMarker, FileSink, KeyValueSink};
