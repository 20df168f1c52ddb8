//! Writing exported images to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Write PNG bytes to `dir/name`, creating `dir` if needed.
pub fn write_png(dir: &Path, name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote image");
    Ok(path)
}
