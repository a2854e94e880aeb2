//! Filesystem identity checks
//!
//! Lexical path comparison cannot tell `Foo.txt` and `foo.txt` apart on a
//! case-insensitive filesystem, so collisions are decided by asking the
//! filesystem whether two paths name the same file.

use std::fs;
use std::io;
use std::path::Path;

/// Whether `a` and `b` refer to the same file on disk
///
/// Links are not followed: a symlink is never the same file as its target.
#[cfg(unix)]
pub fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let a = fs::symlink_metadata(a)?;
    let b = fs::symlink_metadata(b)?;
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
pub fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let a_meta = fs::symlink_metadata(a)?;
    let b_meta = fs::symlink_metadata(b)?;
    if a_meta.file_type().is_symlink() != b_meta.file_type().is_symlink() {
        return Ok(false);
    }
    Ok(a.canonicalize()? == b.canonicalize()?)
}

/// Whether something (file, directory or dangling link) occupies `path`
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Whether `b` is `a` spelled with different letter case in the same directory
pub fn is_case_variant(a: &Path, b: &Path) -> bool {
    match (a.file_name(), b.file_name()) {
        (Some(x), Some(y)) => {
            a.parent() == b.parent()
                && x.to_string_lossy().to_lowercase() == y.to_string_lossy().to_lowercase()
        }
        _ => false,
    }
}

/// Whether renaming `source` to `target` only changes letter case of a file
/// the filesystem already resolves under both spellings
///
/// Hard links share an inode too, so identity alone is not enough.
pub fn is_case_only_rename(source: &Path, target: &Path) -> bool {
    is_case_variant(source, target) && same_file(source, target).unwrap_or(false)
}

/// Probe whether `dir` lives on a case-insensitive filesystem
///
/// Looks for an entry whose name changes under case swapping and checks
/// whether the swapped spelling resolves to the same file. Returns `None`
/// when `dir` is unreadable or has no such entry to test with.
pub fn is_case_insensitive(dir: &Path) -> Option<bool> {
    let entries = fs::read_dir(dir).ok()?;

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let swapped = swap_case(name);
        if swapped == name {
            continue;
        }
        let original = entry.path();
        let probe = dir.join(&swapped);
        return Some(occupied(&probe) && same_file(&original, &probe).unwrap_or(false));
    }

    None
}

fn swap_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
