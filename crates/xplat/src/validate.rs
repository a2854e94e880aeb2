//! Safety checks run before anything is renamed

use crate::errors::ValidationError;
use std::fs;
use std::io;
use std::path::Path;

const GLOB_METACHARACTERS: [char; 4] = ['*', '?', '/', '\\'];

/// Check that a path is a regular file we are willing to rename
///
/// Uses `symlink_metadata`, so a link is reported as a link and never followed.
pub fn validate(path: &Path) -> Result<(), ValidationError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| inaccessible(path, &e))?;

    if metadata.file_type().is_symlink() {
        return Err(ValidationError::SymlinkRejected(path.to_path_buf()));
    }
    if !metadata.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}

/// Check a caller-supplied extension filter and return it in canonical form
///
/// Accepts `txt` or `.txt`; rejects globs, separators and traversal.
pub fn validate_extension_filter(filter: &str) -> Result<String, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidExtensionFilter {
        filter: filter.to_string(),
        reason: reason.to_string(),
    };

    if filter.contains("..") {
        return Err(invalid("path traversal is not allowed"));
    }
    if let Some(c) = filter.chars().find(|c| GLOB_METACHARACTERS.contains(c)) {
        return Err(invalid(&format!("'{}' is not allowed", c)));
    }
    if filter.contains('\0') {
        return Err(invalid("null bytes are not allowed"));
    }

    let bare = filter.strip_prefix('.').unwrap_or(filter).trim();
    if bare.is_empty() {
        return Err(invalid("extension is empty"));
    }
    if bare.contains('.') {
        return Err(invalid("only a single extension can be matched"));
    }

    Ok(bare.to_lowercase())
}

/// Check that an optional destination directory is usable
pub fn validate_target_dir(path: &Path) -> Result<(), ValidationError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(ValidationError::NotADirectory(path.to_path_buf())),
    }
}

fn inaccessible(path: &Path, err: &io::Error) -> ValidationError {
    ValidationError::Inaccessible { path: path.to_path_buf(), message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("real.txt");
        fs::write(&file, "content").unwrap();

        assert!(validate(&file).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_rejects_symlink() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("real.txt");
        fs::write(&file, "content").unwrap();
        let link = temp.path().join("link_to_file.txt");
        std::os::unix::fs::symlink(&file, &link).unwrap();

        assert_eq!(validate(&link), Err(ValidationError::SymlinkRejected(link.clone())));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_rejects_dangling_symlink() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("dangling.txt");
        std::os::unix::fs::symlink(temp.path().join("missing.txt"), &link).unwrap();

        assert_eq!(validate(&link), Err(ValidationError::SymlinkRejected(link.clone())));
    }

    #[test]
    fn test_validate_rejects_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            validate(temp.path()),
            Err(ValidationError::NotAFile(temp.path().to_path_buf()))
        );
    }

    #[test]
    fn test_validate_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("not_a_file.tmp");
        assert!(matches!(validate(&missing), Err(ValidationError::Inaccessible { .. })));
    }

    #[test]
    fn test_extension_filter_accepts_plain() {
        assert_eq!(validate_extension_filter("txt").unwrap(), "txt");
        assert_eq!(validate_extension_filter(".TXT").unwrap(), "txt");
        assert_eq!(validate_extension_filter("jpeg").unwrap(), "jpeg");
    }

    #[test]
    fn test_extension_filter_rejects_globs() {
        for bad in ["*.txt", "*", "tx?", "a/b", "a\\b"] {
            assert!(
                matches!(
                    validate_extension_filter(bad),
                    Err(ValidationError::InvalidExtensionFilter { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_extension_filter_rejects_traversal() {
        let err = validate_extension_filter("..").unwrap_err();
        assert!(err.to_string().contains("path traversal"));
        assert!(validate_extension_filter("../etc").is_err());
    }

    #[test]
    fn test_extension_filter_rejects_empty() {
        assert!(validate_extension_filter("").is_err());
        assert!(validate_extension_filter(".").is_err());
        assert!(validate_extension_filter("tar.gz").is_err());
    }

    #[test]
    fn test_target_dir() {
        let temp = TempDir::new().unwrap();
        assert!(validate_target_dir(temp.path()).is_ok());

        let missing = temp.path().join("not_a_dir");
        assert_eq!(validate_target_dir(&missing), Err(ValidationError::NotADirectory(missing.clone())));

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(validate_target_dir(&file).is_err());
    }
}
