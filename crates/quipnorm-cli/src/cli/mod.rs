//! CLI for normalizing an exported Quip document.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quipnorm_core::{config, Credential, CurlTransport, Document, MetadataPolicy};
use std::io::Write;
use std::path::PathBuf;

/// Rewrite Quip image/video tags to portable markdown, downloading images
/// next to the document. The result is printed to stdout.
#[derive(Debug, Parser)]
#[command(name = "quip-normalize")]
#[command(about = "Normalize an exported Quip markdown document", long_about = None)]
pub struct Cli {
    /// Exported document; assets and quip-assets.json are kept in its directory.
    pub path: PathBuf,

    /// How to treat an unreadable quip-assets.json (overrides config).
    #[arg(long, value_enum, value_name = "POLICY")]
    pub metadata_policy: Option<PolicyArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Stop with an error.
    Strict,
    /// Warn and start with no known assets.
    Lenient,
}

impl From<PolicyArg> for MetadataPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => MetadataPolicy::Strict,
            PolicyArg::Lenient => MetadataPolicy::Lenient,
        }
    }
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        // Checked before anything touches the document or the network.
        let credential = Credential::from_env(&cfg.credential_env)?;
        let policy = self
            .metadata_policy
            .map(MetadataPolicy::from)
            .unwrap_or(cfg.metadata_policy);

        let doc = Document::open(&self.path)?;
        let transport = CurlTransport::new(cfg.connect_timeout(), cfg.timeout());
        let mut store = doc.open_store(credential, Box::new(transport), policy)?;
        tracing::info!(
            assets = store.len(),
            "normalizing {} with assets in {}",
            doc.path().display(),
            store.base_dir().display()
        );
        let content = doc.normalized_content(&mut store)?;

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .context("write normalized document to stdout")?;
        Ok(())
    }
}
