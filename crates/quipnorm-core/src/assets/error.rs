//! Error type for asset store operations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },

    #[error("GET {url}: response has no Content-Disposition header")]
    MissingContentDisposition { url: String },

    #[error("GET {url}: no usable filename=\"...\" in Content-Disposition: {header}")]
    MalformedContentDisposition { url: String, header: String },

    #[error("write asset {}", .path.display())]
    WriteAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read asset metadata {}", .path.display())]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse asset metadata {}", .path.display())]
    ParseMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("asset metadata {}: {filename} is claimed by both {first} and {second}", .path.display())]
    DuplicateFilename {
        path: PathBuf,
        filename: String,
        first: String,
        second: String,
    },

    #[error("write asset metadata {}", .path.display())]
    WriteMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialize asset metadata")]
    SerializeMetadata(#[source] serde_json::Error),
}

impl AssetError {
    /// True for errors raised while loading an existing `quip-assets.json`.
    pub fn is_metadata_load(&self) -> bool {
        matches!(
            self,
            AssetError::ReadMetadata { .. }
                | AssetError::ParseMetadata { .. }
                | AssetError::DuplicateFilename { .. }
        )
    }
}
