//! Filename candidates and the stem pipeline

use crate::normalize::{fold_ascii, normalize};
use crate::style::Style;
use std::path::{Path, PathBuf};

/// Largest file name most filesystems accept, in bytes
pub const MAX_NAME_BYTES: usize = 255;

/// A file found on disk, split into the parts the pipeline works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameCandidate {
    pub original_path: PathBuf,
    pub stem: String,
    pub extension: Option<String>,
}

impl FilenameCandidate {
    /// Split a path into stem and extension
    ///
    /// Non UTF-8 names are read lossily; the original path is kept untouched
    /// so the rename still addresses the real file. A trailing dot starts no
    /// extension and stays in the stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let original_path = path.into();
        let extension = original_path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .filter(|e| !e.is_empty());
        let stem = match extension {
            Some(_) => original_path.file_stem(),
            None => original_path.file_name(),
        }
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

        Self { original_path, stem, extension }
    }

    /// File name as it currently is on disk
    pub fn file_name(&self) -> String {
        self.original_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Dotfiles such as `.bashrc` have no stem to restyle
    pub fn is_hidden(&self) -> bool {
        self.file_name().starts_with('.')
    }

    /// Directory the candidate lives in
    pub fn parent(&self) -> &Path {
        self.original_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Options for turning a stem into its safe form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StemOptions {
    pub style: Style,
    pub max_bytes: usize,
    pub ascii_only: bool,
}

impl Default for StemOptions {
    fn default() -> Self {
        Self { style: Style::Web, max_bytes: MAX_NAME_BYTES, ascii_only: false }
    }
}

/// Truncate to at most `max_bytes` of UTF-8 without splitting a code point
pub fn truncate(stem: &str, max_bytes: usize) -> String {
    if stem.len() <= max_bytes {
        return stem.to_string();
    }

    let mut end = max_bytes;
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    stem[..end].to_string()
}

/// Run a raw stem through normalize → style → truncate
pub fn safe_stem(raw_stem: &str, options: &StemOptions) -> String {
    let normalized = normalize(raw_stem);
    let normalized = if options.ascii_only { fold_ascii(&normalized) } else { normalized };
    let styled = options.style.apply(&normalized);

    if styled.len() <= options.max_bytes {
        return styled;
    }

    // A cut can leave a dangling separator behind
    truncate(&styled, options.max_bytes).trim_end_matches(['-', '_']).to_string()
}

/// Build the target file name, or `None` when nothing usable is left
///
/// `max_bytes` limits the whole name; the extension is lowercased and its
/// bytes come out of the stem's budget.
pub fn safe_file_name(candidate: &FilenameCandidate, options: &StemOptions) -> Option<String> {
    let extension = candidate.extension.as_ref().map(|e| e.to_lowercase());
    let suffix_len = extension.as_ref().map_or(0, |e| e.len() + 1);
    let budget = StemOptions {
        max_bytes: options.max_bytes.saturating_sub(suffix_len),
        ..*options
    };

    let stem = safe_stem(&candidate.stem, &budget);
    if stem.is_empty() {
        return None;
    }

    Some(match extension {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    })
}
