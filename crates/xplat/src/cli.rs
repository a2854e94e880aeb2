//! CLI argument parsing

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use xplat::Style;

#[derive(Parser)]
#[command(name = "xplat")]
#[command(about = "Cross-platform, web-friendly file renaming", long_about = None, version)]
#[command(after_help = "Use 'xplat <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log more (-v for each rename, -vv for planning decisions)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename files to a safe, consistent naming style
    #[command(visible_alias = "rn")]
    Rename(RenameArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// File or directory to rename (defaults to the current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Naming style [default: web]
    #[arg(short, long, value_enum)]
    pub style: Option<Style>,

    /// Show what would be renamed without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Only rename files with this extension (e.g. 'txt' or '.txt')
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Also rename files in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Move renamed files into this directory
    #[arg(short, long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Transliterate names to ASCII (Café → cafe)
    #[arg(long)]
    pub ascii: bool,

    /// Longest file name allowed, in bytes [default: 255]
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<usize>,

    /// Hold back every file contending for the same name, not just the later ones
    #[arg(long)]
    pub strict_collisions: bool,

    /// Read defaults from a TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
