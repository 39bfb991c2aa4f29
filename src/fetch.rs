//! Tool bundle retrieval: one HTTP GET, then zip extraction.
//!
//! The archive on disk is the only cache. If it exists the download is
//! skipped; the unpacked directory is always rebuilt from it.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Last path segment of a URL, e.g. `WhiteboxTools_linux_amd64.zip`.
pub fn archive_name(url: &str) -> Result<&str> {
    let name = url
        .split(|c: char| c == '?' || c == '#')
        .next()
        .and_then(|u| u.rsplit('/').next())
        .unwrap_or_default();
    if name.is_empty() {
        bail!("cannot derive an archive file name from {}", url);
    }
    Ok(name)
}

/// Download `url` to `archive` unless it is already there.
/// Returns `true` when a download happened.
pub fn ensure_archive(url: &str, archive: &Path) -> Result<bool> {
    if archive.is_file() {
        info!(archive = %archive.display(), "bundle already exists");
        return Ok(false);
    }
    info!(url, "downloading bundle");
    download(url, archive)?;
    Ok(true)
}

/// Stream the body into `<dest>.part`, renaming only once it is complete.
fn download(url: &str, dest: &Path) -> Result<()> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to download {}", url))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let partial = partial_path(dest);
    let mut file = fs::File::create(&partial)
        .with_context(|| format!("failed to create {}", partial.display()))?;
    io::copy(&mut response.into_reader(), &mut file)
        .with_context(|| format!("failed to write {}", partial.display()))?;
    file.sync_all()?;
    drop(file);

    fs::rename(&partial, dest)
        .with_context(|| format!("failed to move {} into place", partial.display()))?;
    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Remove `bundle_dir` if present, then extract `archive` into `target`.
pub fn unpack(archive: &Path, target: &Path, bundle_dir: &Path) -> Result<()> {
    if bundle_dir.exists() {
        fs::remove_dir_all(bundle_dir)
            .with_context(|| format!("failed to remove {}", bundle_dir.display()))?;
    }
    info!(archive = %archive.display(), "decompressing");
    extract_zip(archive, target)
}

/// Extract every entry, refusing paths that escape `target`.
fn extract_zip(archive: &Path, target: &Path) -> Result<()> {
    let file = fs::File::open(archive)
        .with_context(|| format!("failed to open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("invalid zip archive: {}", archive.display()))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .with_context(|| format!("failed to read entry {} of {}", i, archive.display()))?;

        let name = entry.name().to_string();
        if name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
            bail!("unsafe path in zip archive: {}", name);
        }
        let out_path = target.join(&name);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("failed to create {}", out_path.display()))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut out = fs::File::create(&out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", name))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .with_context(|| format!("failed to set permissions on {}", out_path.display()))?;
        }
    }

    Ok(())
}
