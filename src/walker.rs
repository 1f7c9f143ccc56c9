//! Pruned directory traversal.
//!
//! Uses the `ignore` crate's walker with its standard gitignore/hidden
//! filters disabled: the [`ExclusionPolicy`] is the single authority on what
//! gets visited. Excluded directories are pruned via `filter_entry`, so
//! their contents are never opened or stat'ed, so a file beneath `.git/` or
//! `node_modules/` can never leak into the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use log::debug;
use thiserror::Error;

use crate::filter::ExclusionPolicy;

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collect all included files under `root`, depth-first.
///
/// The root itself must exist and be a directory; anything else is a usage
/// error surfaced before traversal starts. Individual unreadable entries are
/// skipped without aborting the walk. Traversal order is deterministic but
/// not an external guarantee; the prioritizer re-sorts downstream.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use marrow::filter::ExclusionPolicy;
/// use marrow::walker::collect_files;
///
/// let policy = Arc::new(ExclusionPolicy::default());
/// let files = collect_files(std::path::Path::new("."), policy).unwrap();
/// println!("{} files", files.len());
/// ```
pub fn collect_files(
    root: &Path,
    policy: Arc<ExclusionPolicy>,
) -> Result<Vec<PathBuf>, WalkError> {
    if !root.exists() {
        return Err(WalkError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(false);

    builder.filter_entry(move |entry| {
        // The root is never filtered; filter_entry prunes everything below it.
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        !policy.should_exclude(entry.path(), is_dir)
    });

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                // Unreadable entry: skip it and keep walking.
                debug!("skipping unreadable entry: {err}");
            }
        }
    }

    Ok(files)
}
