// Test infrastructure and utilities for xplat tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory populated with files to rename
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    /// Create a new test project with temporary directory
    pub fn new() -> std::io::Result<Self> {
        let root = TempDir::new()?;
        Ok(Self { root })
    }

    /// Create a project holding empty files with the given names
    pub fn with_files(names: &[&str]) -> std::io::Result<Self> {
        let project = Self::new()?;
        for name in names {
            project.create_file(name, name)?;
        }
        Ok(project)
    }

    /// Get the root path
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Create a file, including any parent directories
    pub fn create_file(&self, path: &str, content: &str) -> std::io::Result<PathBuf> {
        let file_path = self.root.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Create a directory below the root
    pub fn create_dir(&self, path: &str) -> std::io::Result<PathBuf> {
        let dir = self.root.path().join(path);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Create a symlink below the root pointing at `target`
    #[cfg(unix)]
    pub fn create_symlink(&self, target: &str, link: &str) -> std::io::Result<PathBuf> {
        let link_path = self.root.path().join(link);
        std::os::unix::fs::symlink(self.root.path().join(target), &link_path)?;
        Ok(link_path)
    }

    /// Read file content
    pub fn read_file(&self, path: &str) -> std::io::Result<String> {
        fs::read_to_string(self.root.path().join(path))
    }

    /// Check whether a file exists, without following links
    pub fn exists(&self, path: &str) -> bool {
        fs::symlink_metadata(self.root.path().join(path)).is_ok()
    }

    /// Sorted names of the entries directly under `dir` (relative to root)
    pub fn names_in(&self, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root.path().join(dir))
            .map(|entries| {
                entries
                    .flatten()
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Sorted names of the entries directly under the root
    pub fn names(&self) -> Vec<String> {
        self.names_in("")
    }
}
