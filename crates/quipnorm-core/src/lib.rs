pub mod config;
pub mod logging;

pub mod assets;
pub mod credential;
pub mod document;
pub mod filename;
pub mod rewrite;
pub mod storage;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use assets::{AssetError, AssetStore, BatchSummary, DownloadOutcome};
pub use config::{MetadataPolicy, NormalizeConfig};
pub use credential::Credential;
pub use document::Document;
pub use transport::{CurlTransport, FetchResponse, Transport};
