//! Persist the URL -> filename mapping as `quip-assets.json` in the asset dir.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use super::{AssetError, AssetStore};
use crate::storage;

/// Metadata file kept next to the downloaded assets.
pub const METADATA_FILENAME: &str = "quip-assets.json";

impl AssetStore {
    pub fn metadata_path(&self) -> PathBuf {
        self.base_dir().join(METADATA_FILENAME)
    }

    /// Replaces the in-memory mapping with the persisted one.
    ///
    /// Returns `Ok(false)` if there is no metadata file. On error the current
    /// mapping is left untouched.
    pub fn load(&mut self) -> Result<bool, AssetError> {
        let path = self.metadata_path();
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(source) => return Err(AssetError::ReadMetadata { path, source }),
        };

        let url_to_file: BTreeMap<String, String> = serde_json::from_slice(&bytes)
            .map_err(|source| AssetError::ParseMetadata {
                path: path.clone(),
                source,
            })?;

        let mut file_to_url = HashMap::with_capacity(url_to_file.len());
        for (url, filename) in &url_to_file {
            if let Some(first) = file_to_url.insert(filename.clone(), url.clone()) {
                return Err(AssetError::DuplicateFilename {
                    path,
                    filename: filename.clone(),
                    first,
                    second: url.clone(),
                });
            }
        }

        self.url_to_file = url_to_file;
        self.file_to_url = file_to_url;
        Ok(true)
    }

    /// Writes the mapping, replacing the previous metadata file.
    ///
    /// Keys are sorted, so saving an unchanged store reproduces the file byte
    /// for byte.
    pub fn save(&self) -> Result<(), AssetError> {
        let path = self.metadata_path();
        let mut json =
            serde_json::to_string_pretty(&self.url_to_file).map_err(AssetError::SerializeMetadata)?;
        json.push('\n');
        storage::write_atomic(&path, json.as_bytes())
            .map_err(|source| AssetError::WriteMetadata { path, source })?;
        tracing::debug!(assets = self.url_to_file.len(), "wrote {}", self.metadata_path().display());
        Ok(())
    }
}
