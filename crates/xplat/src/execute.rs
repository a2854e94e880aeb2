//! Applying a rename plan

use crate::errors::{RenameError, Result};
use crate::plan::{taken_by_other_file, PlanStatus, RenamePlanEntry, SkipReason};
use crate::validate::validate;
use serde::Serialize;
use std::fs;
use std::io;
use tracing::{debug, info, warn};

/// What actually happened to one plan entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Renamed,
    /// Dry run: the entry was Ready and would be renamed
    WouldRename,
    NoOp,
    /// Held back at planning time
    Collision,
    Skipped(SkipReason),
    Failed(String),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Renamed => "renamed",
            Outcome::WouldRename => "would-rename",
            Outcome::NoOp => "no-op",
            Outcome::Collision => "collision",
            Outcome::Skipped(_) => "skipped",
            Outcome::Failed(_) => "failed",
        }
    }

    /// Human readable detail for skipped and failed entries
    pub fn reason(&self) -> Option<String> {
        match self {
            Outcome::Skipped(reason) => Some(reason.to_string()),
            Outcome::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub entry: RenamePlanEntry,
    pub outcome: Outcome,
}

impl EntryOutcome {
    /// Why the entry was not renamed, if it was held back
    pub fn reason(&self) -> Option<String> {
        match self.outcome {
            Outcome::Collision => {
                Some(RenameError::CollisionDetected(self.entry.target_path.clone()).to_string())
            }
            _ => self.outcome.reason(),
        }
    }
}

/// Totals over a whole batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub renamed: usize,
    pub skipped: usize,
    pub no_op: usize,
    pub failed_validation: usize,
    pub collisions: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Renamed | Outcome::WouldRename => self.renamed += 1,
            Outcome::NoOp => self.no_op += 1,
            Outcome::Collision => self.collisions += 1,
            Outcome::Skipped(reason) if reason.is_validation_failure() => {
                self.failed_validation += 1
            }
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.renamed
            + self.skipped
            + self.no_op
            + self.failed_validation
            + self.collisions
            + self.failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub dry_run: bool,
    pub entries: Vec<EntryOutcome>,
    pub summary: Summary,
}

/// Apply a plan, or only predict its outcome when `dry_run` is set
///
/// A failure on one entry is recorded and the batch carries on.
pub fn execute(plan: Vec<RenamePlanEntry>, dry_run: bool) -> ExecutionReport {
    let mut summary = Summary::default();
    let mut entries = Vec::with_capacity(plan.len());

    for entry in plan {
        let outcome = match &entry.status {
            PlanStatus::Ready if dry_run => Outcome::WouldRename,
            PlanStatus::Ready => apply(&entry),
            PlanStatus::NoOp => Outcome::NoOp,
            PlanStatus::CollisionWithExisting | PlanStatus::CollisionWithinBatch => {
                debug!(source = %entry.source_path.display(), status = entry.status.label(), "not attempted");
                Outcome::Collision
            }
            PlanStatus::Skipped(reason) => Outcome::Skipped(reason.clone()),
        };

        summary.record(&outcome);
        entries.push(EntryOutcome { entry, outcome });
    }

    ExecutionReport { dry_run, entries, summary }
}

fn apply(entry: &RenamePlanEntry) -> Outcome {
    match rename_entry(entry) {
        Ok(()) => {
            info!(
                source = %entry.source_path.display(),
                target = %entry.target_path.display(),
                "renamed"
            );
            Outcome::Renamed
        }
        Err(RenameError::RaceLostOnExecution(target)) => {
            warn!(
                source = %entry.source_path.display(),
                target = %target.display(),
                "target appeared after planning, skipping"
            );
            Outcome::Skipped(SkipReason::TargetNowExists)
        }
        Err(RenameError::Validation(e)) => {
            warn!(source = %entry.source_path.display(), error = %e, "source changed after planning, skipping");
            Outcome::Skipped(SkipReason::Rejected(e))
        }
        Err(e) => {
            warn!(source = %entry.source_path.display(), error = %e, "rename failed");
            Outcome::Failed(e.to_string())
        }
    }
}

fn rename_entry(entry: &RenamePlanEntry) -> Result<()> {
    let source = &entry.source_path;
    let target = &entry.target_path;

    // The disk may have moved on since planning
    validate(source)?;
    if taken_by_other_file(source, target) {
        return Err(RenameError::RaceLostOnExecution(target.clone()));
    }

    fs::rename(source, target).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => RenameError::RaceLostOnExecution(target.clone()),
        _ => RenameError::filesystem(source, e),
    })
}
