//! Rename command implementation

use crate::cli::{OutputFormat, RenameArgs};
use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use xplat::errors::print_warning;
use xplat::{
    execute, theme, validate_extension_filter, validate_target_dir, CollisionPolicy, Config,
    Discovery, EntryOutcome, ExecutionReport, Planner, RenameError, Style, Summary,
};

pub fn rename_files(args: &RenameArgs) -> Result<()> {
    let config = resolve_config(args)?;

    let discovery =
        Discovery { recursive: config.recursive, extension: config.extension.clone() };
    let candidates = discovery.candidates(&args.path)?;

    let planner = Planner::new(config.stem_options())
        .with_target_dir(config.target_dir.clone())
        .with_policy(config.collision_policy);
    let plan = planner.plan(&candidates);
    let report = execute(plan, config.dry_run);

    match args.format {
        OutputFormat::Text => print_report(&report, &config),
        OutputFormat::Json => println!("{}", json_report(&report, &config)?),
    }

    Ok(())
}

/// Layer config file, then command line flags, over the defaults
fn resolve_config(args: &RenameArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(style) = args.style {
        config.style = style;
    }
    if let Some(max_bytes) = args.max_bytes {
        config.max_bytes = max_bytes;
    }
    if let Some(ext) = &args.extension {
        config.extension = Some(ext.clone());
    }
    if let Some(dir) = &args.target_dir {
        config.target_dir = Some(dir.clone());
    }
    config.dry_run = args.dry_run;
    config.recursive |= args.recursive;
    config.ascii_only |= args.ascii;
    if args.strict_collisions {
        config.collision_policy = CollisionPolicy::Strict;
    }

    if config.max_bytes == 0 {
        bail!("--max-bytes must be at least 1");
    }
    config.extension = config
        .extension
        .as_deref()
        .map(validate_extension_filter)
        .transpose()
        .map_err(RenameError::from)?;
    if let Some(dir) = &config.target_dir {
        validate_target_dir(dir).map_err(RenameError::from)?;
    }

    Ok(config)
}

fn print_report(report: &ExecutionReport, config: &Config) {
    println!();
    if report.dry_run {
        println!("{}", "Dry run: nothing will be renamed".yellow().bold());
    } else {
        println!("{}", "Renaming files...".cyan().bold());
    }
    println!("  Style: {}", config.style.to_string().cyan());
    println!();

    if report.entries.is_empty() {
        print_warning("No matching files found");
        println!();
    }

    for entry in &report.entries {
        println!("{}", entry_line(entry, config.target_dir.is_some()));
    }

    println!();
    println!("{}", summary_line(&report.summary, report.dry_run));
    println!();
}

fn entry_line(entry: &EntryOutcome, full_target: bool) -> String {
    let source = display_name(&entry.entry.source_path);
    let outcome = &entry.outcome;
    let badge = format!(
        "  {} {:<12}",
        theme::outcome_symbol(outcome),
        theme::outcome_badge(outcome)
    );

    if let Some(reason) = outcome.reason() {
        return format!("{} {} {}", badge, source, format!("({})", reason).dimmed());
    }
    if entry.entry.target_path == entry.entry.source_path {
        return format!("{} {}", badge, source);
    }

    let target = if full_target {
        entry.entry.target_path.display().to_string()
    } else {
        display_name(&entry.entry.target_path)
    };
    let mut line = format!("{} {} {} {}", badge, source, theme::info_symbol(), target.cyan());
    if outcome == &xplat::Outcome::Collision {
        line.push_str(&format!(" {}", format!("({})", entry.entry.status).dimmed()));
    }
    line
}

fn summary_line(summary: &Summary, dry_run: bool) -> String {
    let renamed_label = if dry_run { "to rename" } else { "renamed" };
    let mut parts = vec![
        theme::success(&format!("{} {}", summary.renamed, renamed_label)).to_string(),
        format!("{} unchanged", summary.no_op),
    ];
    if summary.collisions > 0 {
        parts.push(theme::warning(&format!("{} collisions", summary.collisions)).to_string());
    }
    if summary.skipped > 0 {
        parts.push(theme::warning(&format!("{} skipped", summary.skipped)).to_string());
    }
    if summary.failed_validation > 0 {
        parts.push(
            theme::error(&format!("{} failed validation", summary.failed_validation)).to_string(),
        );
    }
    if summary.failed > 0 {
        parts.push(theme::error(&format!("{} failed", summary.failed)).to_string());
    }

    format!("{} {}", "Summary:".bold(), parts.join(", "))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'a str,
    dry_run: bool,
    style: Style,
    summary: Summary,
    entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
    source: String,
    target: String,
    status: &'static str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn json_report(report: &ExecutionReport, config: &Config) -> Result<String> {
    let entries = report
        .entries
        .iter()
        .map(|e| JsonEntry {
            source: e.entry.source_path.display().to_string(),
            target: e.entry.target_path.display().to_string(),
            status: e.entry.status.label(),
            outcome: e.outcome.label(),
            reason: e.reason(),
        })
        .collect();

    let json = JsonReport {
        version: &config.version,
        dry_run: report.dry_run,
        style: config.style,
        summary: report.summary,
        entries,
    };

    Ok(serde_json::to_string_pretty(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use xplat::{Outcome, PlanStatus, RenamePlanEntry, SkipReason};

    fn args(path: &Path) -> RenameArgs {
        RenameArgs {
            path: path.to_path_buf(),
            style: None,
            dry_run: false,
            extension: None,
            recursive: false,
            target_dir: None,
            ascii: false,
            max_bytes: None,
            strict_collisions: false,
            config: None,
            format: OutputFormat::Text,
        }
    }

    fn outcome(source: &str, target: &str, status: PlanStatus, outcome: Outcome) -> EntryOutcome {
        EntryOutcome {
            entry: RenamePlanEntry {
                source_path: PathBuf::from(source),
                target_path: PathBuf::from(target),
                status,
            },
            outcome,
        }
    }

    #[test]
    fn test_resolve_config_defaults() {
        let temp = TempDir::new().unwrap();
        let config = resolve_config(&args(temp.path())).unwrap();
        assert_eq!(config.style, Style::Web);
        assert_eq!(config.extension, None);
        assert_eq!(config.collision_policy, CollisionPolicy::FirstWins);
    }

    #[test]
    fn test_resolve_config_flags_override_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("xplat.toml");
        fs::write(&file, "style = \"snake\"\nextension = \"md\"\n").unwrap();

        let mut a = args(temp.path());
        a.config = Some(file);
        a.style = Some(Style::Camel);
        a.strict_collisions = true;

        let config = resolve_config(&a).unwrap();
        assert_eq!(config.style, Style::Camel);
        assert_eq!(config.extension.as_deref(), Some("md"));
        assert_eq!(config.collision_policy, CollisionPolicy::Strict);
    }

    #[test]
    fn test_resolve_config_rejects_glob_filter() {
        let temp = TempDir::new().unwrap();
        let mut a = args(temp.path());
        a.extension = Some("*.txt".to_string());

        let err = resolve_config(&a).unwrap_err();
        assert!(err.to_string().contains("Invalid extension filter"));
        assert!(xplat::errors::suggestion_for(&err).is_some());
    }

    #[test]
    fn test_resolve_config_rejects_missing_target_dir() {
        let temp = TempDir::new().unwrap();
        let mut a = args(temp.path());
        a.target_dir = Some(temp.path().join("not_a_dir"));

        let err = resolve_config(&a).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[test]
    fn test_resolve_config_rejects_zero_bytes() {
        let temp = TempDir::new().unwrap();
        let mut a = args(temp.path());
        a.max_bytes = Some(0);
        assert!(resolve_config(&a).is_err());
    }

    #[test]
    fn test_rename_files_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = rename_files(&args(&temp.path().join("nope"))).unwrap_err();
        assert!(err.to_string().contains("Path does not exist"));
    }

    #[test]
    fn test_rename_files_renames_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Hello World.TXT"), "").unwrap();

        rename_files(&args(temp.path())).unwrap();
        assert!(temp.path().join("hello-world.txt").exists());
    }

    #[test]
    fn test_entry_line_rename() {
        colored::control::set_override(false);
        let line = entry_line(
            &outcome("/d/My File.txt", "/d/my-file.txt", PlanStatus::Ready, Outcome::Renamed),
            false,
        );
        assert!(line.contains("My File.txt → my-file.txt"));
        assert!(line.contains("renamed"));
    }

    #[test]
    fn test_entry_line_skipped_shows_reason() {
        colored::control::set_override(false);
        let line = entry_line(
            &outcome(
                "/d/!!!.txt",
                "/d/!!!.txt",
                PlanStatus::Skipped(SkipReason::EmptyStem),
                Outcome::Skipped(SkipReason::EmptyStem),
            ),
            false,
        );
        assert!(line.contains("!!!.txt"));
        assert!(line.contains("(name is empty after sanitization)"));
    }

    #[test]
    fn test_entry_line_collision_shows_status() {
        colored::control::set_override(false);
        let line = entry_line(
            &outcome(
                "/d/My File.txt",
                "/d/my-file.txt",
                PlanStatus::CollisionWithinBatch,
                Outcome::Collision,
            ),
            false,
        );
        assert!(line.contains("(collision-within-batch)"));
    }

    #[test]
    fn test_summary_line() {
        colored::control::set_override(false);
        let summary = Summary { renamed: 2, no_op: 1, collisions: 1, ..Default::default() };
        let line = summary_line(&summary, true);
        assert!(line.contains("2 to rename"));
        assert!(line.contains("1 unchanged"));
        assert!(line.contains("1 collisions"));
        assert!(!line.contains("failed"));
    }

    #[test]
    fn test_json_report() {
        let report = ExecutionReport {
            dry_run: true,
            entries: vec![outcome(
                "/d/A B.txt",
                "/d/a-b.txt",
                PlanStatus::Ready,
                Outcome::WouldRename,
            )],
            summary: Summary { renamed: 1, ..Default::default() },
        };
        let json = json_report(&report, &Config::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["dry_run"], true);
        assert_eq!(value["style"], "web");
        assert_eq!(value["summary"]["renamed"], 1);
        assert_eq!(value["entries"][0]["status"], "ready");
        assert_eq!(value["entries"][0]["outcome"], "would-rename");
        assert!(value["entries"][0].get("reason").is_none());
    }

    #[test]
    fn test_json_report_collision_reason() {
        let report = ExecutionReport {
            dry_run: false,
            entries: vec![outcome(
                "/d/My File.txt",
                "/d/my-file.txt",
                PlanStatus::CollisionWithExisting,
                Outcome::Collision,
            )],
            summary: Summary { collisions: 1, ..Default::default() },
        };
        let json = json_report(&report, &Config::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["entries"][0]["outcome"], "collision");
        assert_eq!(value["entries"][0]["reason"], "Target already taken: /d/my-file.txt");
    }
}
