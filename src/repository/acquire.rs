//! Repository acquisition
//!
//! Turns a repository *source* (local directory, zip archive, remote git
//! URL) into a scanned directory tree. Archives and clones are materialized
//! into a scratch directory owned by the caller; nothing here deletes
//! anything, so the caller decides when the scratch space goes away.

use std::fs;
use std::path::{Path, PathBuf};

use super::RepositoryError;

/// Materialize a local source into a directory tree.
///
/// A directory is returned as-is; a `.zip` archive is extracted into
/// `scratch` and the extraction root returned. Anything else is an
/// [`RepositoryError::InvalidSource`].
pub fn materialize(source: &Path, scratch: &Path) -> Result<PathBuf, RepositoryError> {
    if source.is_dir() {
        return Ok(source.to_path_buf());
    }

    let is_zip = source.extension().is_some_and(|ext| ext == "zip");
    if source.is_file() && is_zip {
        extract_zip(source, scratch)?;
        return Ok(scratch.to_path_buf());
    }

    Err(RepositoryError::InvalidSource(source.to_path_buf()))
}

/// Extract a zip archive into `dest`
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<(), RepositoryError> {
    let file = fs::File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|source| RepositoryError::Zip {
            path: archive_path.to_path_buf(),
            source,
        })?;
    archive.extract(dest).map_err(|source| RepositoryError::Zip {
        path: archive_path.to_path_buf(),
        source,
    })?;
    log::debug!("extracted {} into {}", archive_path.display(), dest.display());
    Ok(())
}

/// Clone a remote repository into `dest` and return the clone's root
pub fn clone_remote(url: &str, dest: &Path) -> Result<PathBuf, RepositoryError> {
    log::info!("cloning {url}");
    git2::Repository::clone(url, dest).map_err(|source| RepositoryError::Clone {
        url: url.to_string(),
        source,
    })?;
    Ok(dest.to_path_buf())
}
