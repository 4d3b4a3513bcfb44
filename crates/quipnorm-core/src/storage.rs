//! Whole-file writes for assets and metadata.
//!
//! Bytes go to a uniquely named temp file in the destination directory and
//! are renamed over the final path, so a crash never leaves a half-written
//! asset or `quip-assets.json` behind, and no other file in the directory is
//! touched along the way.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `data` to `path`, replacing any previous contents.
///
/// The temp file is created exclusively, so it never truncates an existing
/// file; it is removed if anything fails before the rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
