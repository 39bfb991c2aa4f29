//! Copy generated files into the consuming package tree.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Copy every `*.R` in `from` into `to`, overwriting. Returns the copied destinations.
pub fn copy_r_files(from: &Path, to: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.R",
        glob::Pattern::escape(&from.to_string_lossy())
    );
    let mut sources: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    // Sort for deterministic output
    sources.sort();

    if sources.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(to)
        .with_context(|| format!("failed to create directory: {}", to.display()))?;

    let mut copied = Vec::with_capacity(sources.len());
    for src in sources {
        let Some(name) = src.file_name() else { continue };
        let dest = to.join(name);
        fs::copy(&src, &dest)
            .with_context(|| format!("failed to copy {} to {}", src.display(), dest.display()))?;
        copied.push(dest);
    }
    info!(count = copied.len(), to = %to.display(), "installed");
    Ok(copied)
}
