//! Cross-platform, web-friendly file renaming
//!
//! Filenames run through a fixed pipeline: normalize whitespace and unicode,
//! apply a naming [`Style`], truncate to a byte limit, then plan the renames
//! with collision and symlink checks before anything touches the disk.

pub mod config;
pub mod discover;
pub mod errors;
pub mod execute;
pub mod filename;
pub mod identity;
pub mod normalize;
pub mod plan;
pub mod style;
pub mod theme;
pub mod validate;

pub use config::Config;
pub use discover::Discovery;
pub use errors::{RenameError, ValidationError};
pub use execute::{execute, EntryOutcome, ExecutionReport, Outcome, Summary};
pub use filename::{safe_file_name, safe_stem, truncate, FilenameCandidate, StemOptions};
pub use normalize::{fold_ascii, normalize};
pub use plan::{plan, CollisionPolicy, PlanStatus, Planner, RenamePlanEntry, SkipReason};
pub use style::{apply_style, Style};
pub use validate::{validate, validate_extension_filter, validate_target_dir};
