//! Finding the files a run operates on

use crate::errors::{RenameError, Result};
use crate::filename::FilenameCandidate;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Which entries under the root become candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Walk into subdirectories
    pub recursive: bool,
    /// Only files with this (already validated, lowercase) extension
    pub extension: Option<String>,
}

impl Discovery {
    /// Collect candidates under `root`
    ///
    /// A file root yields itself. A directory yields its files sorted by name;
    /// hidden entries are left out and links are listed, not followed, so the
    /// validator can refuse them. A missing root is fatal; unreadable entries
    /// below it are logged and skipped.
    pub fn candidates(&self, root: &Path) -> Result<Vec<FilenameCandidate>> {
        let metadata = fs::symlink_metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RenameError::RootNotFound(root.to_path_buf()),
            _ => RenameError::filesystem(root, e),
        })?;

        if !metadata.is_dir() {
            return Ok(vec![FilenameCandidate::from_path(root)]);
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let candidate = FilenameCandidate::from_path(entry.path());
            if self.matches_extension(&candidate) {
                candidates.push(candidate);
            }
        }

        debug!(root = %root.display(), count = candidates.len(), "discovered candidates");
        Ok(candidates)
    }

    fn matches_extension(&self, candidate: &FilenameCandidate) -> bool {
        match (&self.extension, &candidate.extension) {
            (None, _) => true,
            (Some(wanted), Some(ext)) => ext.to_lowercase() == *wanted,
            (Some(_), None) => false,
        }
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
