//! Exported document loaded from disk.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::assets::{AssetError, AssetStore};
use crate::config::MetadataPolicy;
use crate::credential::Credential;
use crate::rewrite;
use crate::transport::Transport;

/// A document's path and raw text. Read once; never modified.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    content: String,
}

impl Document {
    /// Reads the whole file as UTF-8.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read document {}", path.display()))?;
        tracing::debug!(bytes = content.len(), "loaded {}", path.display());
        Ok(Self { path, content })
    }

    pub fn from_parts(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Directory assets are saved to: the document's parent, or `.` for a bare name.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn image_urls(&self) -> Vec<String> {
        rewrite::extract_image_urls(&self.content)
    }

    /// Opens the asset store scoped to this document's directory.
    pub fn open_store(
        &self,
        credential: Credential,
        transport: Box<dyn Transport>,
        policy: MetadataPolicy,
    ) -> Result<AssetStore, AssetError> {
        AssetStore::open(self.base_dir(), credential, transport, policy)
    }

    pub fn normalized_content(&self, store: &mut AssetStore) -> Result<String, AssetError> {
        rewrite::normalize(&self.content, store)
    }
}
