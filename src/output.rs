//! Writing converted output to disk.
//!
//! The body is written to a temporary file next to the destination and then
//! renamed over it, so the destination is either untouched or complete.

use crate::error::PdfTablesError;
use std::path::Path;
use tracing::debug;

/// Write `bytes` to `path` atomically, creating parent directories.
///
/// An existing file at `path` is replaced.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PdfTablesError> {
    let write_err = |source: std::io::Error| PdfTablesError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    tokio::fs::create_dir_all(parent).await.map_err(write_err)?;

    // Dropping the TempPath on any error below removes the partial file.
    let tmp = tempfile::Builder::new()
        .prefix(".pdftables-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(write_err)?
        .into_temp_path();

    tokio::fs::write(&tmp, bytes).await.map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
