//! Rename planning
//!
//! Turns candidates into `(source, target, status)` entries without touching
//! the disk, so a dry run reports exactly what a live run would attempt.

use crate::errors::ValidationError;
use crate::filename::{safe_file_name, FilenameCandidate, StemOptions};
use crate::identity::{is_case_insensitive, is_case_only_rename, occupied};
use crate::style::Style;
use crate::validate::validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happens when several files in one batch want the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The first file in input order keeps the name, later ones are held back
    #[default]
    FirstWins,
    /// Every file contending for the name is held back
    Strict,
}

/// Why an entry was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source failed a safety check
    Rejected(ValidationError),
    /// Dotfiles are never restyled
    Hidden,
    /// Nothing usable was left after sanitizing
    EmptyStem,
    /// Another process created the target after planning
    TargetNowExists,
}

impl SkipReason {
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, SkipReason::Rejected(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Rejected(e) => write!(f, "{}", e),
            SkipReason::Hidden => f.write_str("hidden file"),
            SkipReason::EmptyStem => f.write_str("name is empty after sanitization"),
            SkipReason::TargetNowExists => f.write_str("target now exists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStatus {
    Ready,
    CollisionWithExisting,
    CollisionWithinBatch,
    Skipped(SkipReason),
    NoOp,
}

impl PlanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::Ready => "ready",
            PlanStatus::CollisionWithExisting => "collision-with-existing",
            PlanStatus::CollisionWithinBatch => "collision-within-batch",
            PlanStatus::Skipped(_) => "skipped",
            PlanStatus::NoOp => "no-op",
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, PlanStatus::CollisionWithExisting | PlanStatus::CollisionWithinBatch)
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Skipped(reason) => write!(f, "skipped ({})", reason),
            other => f.write_str(other.label()),
        }
    }
}

/// One file's proposed rename
///
/// Entries that never got a target (rejected, hidden, empty) carry their
/// source as target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlanEntry {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub status: PlanStatus,
}

impl RenamePlanEntry {
    fn new(source_path: PathBuf, target_path: PathBuf, status: PlanStatus) -> Self {
        Self { source_path, target_path, status }
    }

    pub fn is_ready(&self) -> bool {
        self.status == PlanStatus::Ready
    }
}

/// Computes rename plans for a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Planner {
    options: StemOptions,
    target_dir: Option<PathBuf>,
    policy: CollisionPolicy,
}

impl Planner {
    pub fn new(options: StemOptions) -> Self {
        Self { options, ..Default::default() }
    }

    /// Place renamed files in `dir` instead of next to their source
    pub fn with_target_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.target_dir = dir;
        self
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Plan every candidate; never touches the disk beyond metadata reads
    pub fn plan(&self, candidates: &[FilenameCandidate]) -> Vec<RenamePlanEntry> {
        self.plan_with(candidates, CaseProbe::default())
    }

    fn plan_with(
        &self,
        candidates: &[FilenameCandidate],
        mut case_probe: CaseProbe,
    ) -> Vec<RenamePlanEntry> {
        let mut entries: Vec<RenamePlanEntry> =
            candidates.iter().map(|c| self.propose(c)).collect();

        let keys: Vec<Option<PathBuf>> = entries
            .iter()
            .map(|e| match e.status {
                PlanStatus::Ready | PlanStatus::NoOp => {
                    Some(case_probe.key(&e.target_path, &e.source_path))
                }
                _ => None,
            })
            .collect();

        let mut contenders: HashMap<&PathBuf, usize> = HashMap::new();
        for key in keys.iter().flatten() {
            *contenders.entry(key).or_default() += 1;
        }

        // Files already carrying their final name hold it before anyone else
        let mut claimed: HashMap<&PathBuf, usize> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if let (PlanStatus::NoOp, Some(key)) = (&entry.status, &keys[i]) {
                claimed.entry(key).or_insert(i);
            }
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            let Some(key) = keys[i].as_ref() else { continue };
            if entry.status != PlanStatus::Ready {
                continue;
            }

            let contested = match self.policy {
                CollisionPolicy::FirstWins => claimed.contains_key(key),
                CollisionPolicy::Strict => contenders.get(key).copied().unwrap_or(0) > 1,
            };

            entry.status = if contested {
                PlanStatus::CollisionWithinBatch
            } else if taken_by_other_file(&entry.source_path, &entry.target_path) {
                PlanStatus::CollisionWithExisting
            } else {
                claimed.insert(key, i);
                PlanStatus::Ready
            };

            debug!(
                source = %entry.source_path.display(),
                target = %entry.target_path.display(),
                status = entry.status.label(),
                "planned"
            );
        }

        entries
    }

    /// First-pass status: everything not yet ruled out is provisionally Ready
    fn propose(&self, candidate: &FilenameCandidate) -> RenamePlanEntry {
        let source = candidate.original_path.clone();
        let skipped = |reason| {
            RenamePlanEntry::new(source.clone(), source.clone(), PlanStatus::Skipped(reason))
        };

        if let Err(e) = validate(&source) {
            warn!(source = %source.display(), error = %e, "skipping");
            return skipped(SkipReason::Rejected(e));
        }
        if candidate.is_hidden() {
            return skipped(SkipReason::Hidden);
        }
        let Some(name) = safe_file_name(candidate, &self.options) else {
            return skipped(SkipReason::EmptyStem);
        };

        let dir = self.target_dir.as_deref().unwrap_or_else(|| candidate.parent());
        let target = dir.join(&name);

        let status = if target == source { PlanStatus::NoOp } else { PlanStatus::Ready };
        RenamePlanEntry::new(source, target, status)
    }
}

/// Plan `candidates` with the default options for `style`
pub fn plan(candidates: &[FilenameCandidate], style: Style) -> Vec<RenamePlanEntry> {
    Planner::new(StemOptions { style, ..Default::default() }).plan(candidates)
}

/// Something other than `source` already sits at `target`
///
/// The only exception is `source` itself under a differently cased name on a
/// case-insensitive filesystem. A hard link under another name still counts
/// as taken.
pub(crate) fn taken_by_other_file(source: &Path, target: &Path) -> bool {
    occupied(target) && !is_case_only_rename(source, target)
}

/// Batch keys, case-folded for directories on case-insensitive filesystems
#[derive(Debug, Default)]
struct CaseProbe {
    known: HashMap<PathBuf, Option<bool>>,
}

impl CaseProbe {
    /// Record a directory's case sensitivity instead of probing it
    #[cfg(test)]
    fn with_dir(mut self, dir: &Path, insensitive: bool) -> Self {
        self.known.insert(dir.to_path_buf(), Some(insensitive));
        self
    }

    fn insensitive(&mut self, dir: &Path) -> Option<bool> {
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        if let Some(known) = self.known.get(dir) {
            return *known;
        }
        let found = is_case_insensitive(dir);
        self.known.insert(dir.to_path_buf(), found);
        found
    }

    /// An empty target directory says nothing, so the source's directory
    /// decides in its place
    fn key(&mut self, target: &Path, source: &Path) -> PathBuf {
        let dir = parent_of(target);
        let insensitive = match self.insensitive(dir) {
            Some(known) => known,
            None => self.insensitive(parent_of(source)).unwrap_or(false),
        };

        match (insensitive, target.file_name()) {
            (true, Some(name)) => dir.join(name.to_string_lossy().to_lowercase()),
            _ => target.to_path_buf(),
        }
    }
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}
