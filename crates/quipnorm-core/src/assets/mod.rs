//! Deduplicated, collision-safe asset downloads into one directory.
//!
//! An [`AssetStore`] is scoped to the directory of one document. It remembers
//! which URL was saved under which filename in `quip-assets.json`, so a URL is
//! fetched at most once across runs and every stored asset has its own name.
//!
//! The store assumes it is the only writer of its directory for the duration
//! of a run. Running two normalizations against the same directory at once
//! races on the metadata file and on collision resolution; callers must not
//! do that.

mod error;
mod persist;


pub use error::AssetError;
pub use persist::METADATA_FILENAME;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::config::MetadataPolicy;
use crate::credential::Credential;
use crate::filename::{parse_quoted_filename, sanitize_filename_for_linux, unique_candidate};
use crate::storage;
use crate::transport::Transport;

/// Result of [`AssetStore::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The URL was already mapped; nothing was fetched.
    Cached,
    /// The URL was fetched and saved under this filename.
    Fetched(String),
}

/// Per-batch counters returned by [`AssetStore::save_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub fetched: usize,
    pub cached: usize,
    /// URLs whose download failed; they stay unmapped.
    pub failed: Vec<String>,
}

pub struct AssetStore {
    base_dir: PathBuf,
    credential: Credential,
    transport: Box<dyn Transport>,
    url_to_file: BTreeMap<String, String>,
    /// Exact inverse of `url_to_file`.
    file_to_url: HashMap<String, String>,
}

impl AssetStore {
    /// Creates the store for `base_dir` and loads any persisted mapping.
    ///
    /// A missing metadata file yields an empty store. An unreadable or corrupt
    /// one fails under [`MetadataPolicy::Strict`] and is logged and ignored
    /// under [`MetadataPolicy::Lenient`].
    pub fn open(
        base_dir: impl Into<PathBuf>,
        credential: Credential,
        transport: Box<dyn Transport>,
        policy: MetadataPolicy,
    ) -> Result<Self, AssetError> {
        let mut store = Self {
            base_dir: base_dir.into(),
            credential,
            transport,
            url_to_file: BTreeMap::new(),
            file_to_url: HashMap::new(),
        };

        match store.load() {
            Ok(true) => tracing::debug!(
                assets = store.len(),
                "loaded {}",
                store.metadata_path().display()
            ),
            Ok(false) => tracing::debug!(
                "no {} yet; starting empty",
                store.metadata_path().display()
            ),
            Err(e) if policy == MetadataPolicy::Lenient && e.is_metadata_load() => {
                tracing::warn!(
                    "ignoring asset metadata, previously downloaded assets may be fetched again: {:#}",
                    anyhow::Error::from(e)
                );
            }
            Err(e) => return Err(e),
        }

        Ok(store)
    }

    /// Directory assets and `quip-assets.json` are written to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of mapped URLs.
    pub fn len(&self) -> usize {
        self.url_to_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url_to_file.is_empty()
    }

    /// Local filename the URL was saved as, if it was.
    pub fn filename(&self, url: &str) -> Option<&str> {
        self.url_to_file.get(url).map(String::as_str)
    }

    /// Downloads every URL in order, then persists the mapping once.
    ///
    /// A failed download is logged and skipped; only the final save error is
    /// returned.
    pub fn save_all<I, S>(&mut self, urls: I) -> Result<BatchSummary, AssetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = BatchSummary::default();

        for url in urls {
            let url = url.as_ref();
            match self.download(url) {
                Ok(DownloadOutcome::Cached) => summary.cached += 1,
                Ok(DownloadOutcome::Fetched(_)) => summary.fetched += 1,
                Err(e) => {
                    tracing::warn!("skipping asset {}: {:#}", url, anyhow::Error::from(e));
                    summary.failed.push(url.to_string());
                }
            }
        }

        self.save()?;
        tracing::info!(
            fetched = summary.fetched,
            cached = summary.cached,
            failed = summary.failed.len(),
            "asset batch finished"
        );
        Ok(summary)
    }

    /// Fetches `url` unless it is already mapped.
    pub fn download(&mut self, url: &str) -> Result<DownloadOutcome, AssetError> {
        if let Some(filename) = self.url_to_file.get(url) {
            tracing::debug!(url, filename = %filename, "asset already downloaded");
            return Ok(DownloadOutcome::Cached);
        }
        self.get(url).map(DownloadOutcome::Fetched)
    }

    /// Fetches `url`, writes the body under a unique name and records it.
    ///
    /// Does not persist the mapping; see [`AssetStore::save`].
    pub fn get(&mut self, url: &str) -> Result<String, AssetError> {
        let response = self.transport.fetch(url, &self.credential)?;
        if !response.is_success() {
            return Err(AssetError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let header = response.content_disposition.as_deref().ok_or_else(|| {
            AssetError::MissingContentDisposition {
                url: url.to_string(),
            }
        })?;
        let suggested = parse_quoted_filename(header)
            .map(|name| sanitize_filename_for_linux(&name))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AssetError::MalformedContentDisposition {
                url: url.to_string(),
                header: header.to_string(),
            })?;

        let filename = self.ensure_unique_filename(&suggested);
        let path = self.base_dir().join(&filename);
        tracing::info!(url, path = %path.display(), "saving asset");

        storage::write_atomic(&path, &response.body)
            .map_err(|source| AssetError::WriteAsset { path, source })?;

        self.file_to_url.insert(filename.clone(), url.to_string());
        self.url_to_file.insert(url.to_string(), filename.clone());
        Ok(filename)
    }

    /// First of `name`, `stem_2.ext`, `stem_3.ext`, ... that no tracked asset
    /// uses and that does not exist on disk.
    fn ensure_unique_filename(&self, name: &str) -> String {
        let mut attempt = 1;
        loop {
            let candidate = unique_candidate(name, attempt);
            if !self.is_taken(&candidate) {
                return candidate;
            }
            attempt += 1;
        }
    }

    fn is_taken(&self, filename: &str) -> bool {
        self.file_to_url.contains_key(filename)
            || filename == METADATA_FILENAME
            || std::fs::symlink_metadata(self.base_dir().join(filename)).is_ok()
    }
}
