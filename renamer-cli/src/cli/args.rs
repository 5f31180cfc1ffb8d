use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{
    CaseArg, CaseExtensionArg, CollisionArg, LogLevelArg, OutputFormat, PreviewArg, SaveLogArg,
};

/// Bulk file renamer with preview, dry-run and backups
#[derive(Parser, Debug)]
#[command(name = "renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Minimum level of log lines written to stderr
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "RENAMER_YES")]
    pub yes: bool,
}

/// Which files to rename
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Files or directories to rename. Defaults to current directory
    #[arg(help = "Files or directories to rename")]
    pub paths: Vec<PathBuf>,

    /// Glob matched against file names inside the given directories
    #[arg(short = 'p', long, default_value = "*")]
    pub pattern: String,

    /// Descend into subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,
}

/// How new names are built. Exactly one is required.
#[derive(Args, Debug, Clone)]
#[group(id = "mode", required = true, multiple = false)]
pub struct ModeArgs {
    /// Number files in order: PREFIX followed by a zero-padded counter
    #[arg(long, value_name = "PREFIX")]
    pub sequential: Option<String>,

    /// Replace every occurrence of a literal PATTERN (see --with)
    #[arg(long, value_name = "PATTERN")]
    pub replace: Option<String>,

    /// Change the case of the name
    #[arg(long, value_enum)]
    pub case: Option<CaseArg>,

    /// Regex search over the whole file name (see --replacement)
    #[arg(long, value_name = "SEARCH")]
    pub regex: Option<String>,

    /// Build names from {name}, {ext}, {counter}, {date}, {time} and {size}
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,
}

/// Parameters of the selected mode
#[derive(Args, Debug, Clone)]
pub struct ModeOptions {
    /// First counter value for --sequential
    #[arg(long, default_value_t = 1, requires = "sequential")]
    pub start: u64,

    /// Minimum counter digits for --sequential
    #[arg(long, default_value_t = 3, requires = "sequential")]
    pub width: usize,

    /// Replacement text for --replace
    #[arg(long = "with", value_name = "REPLACEMENT", default_value = "", requires = "replace")]
    pub with: String,

    /// Replacement for --regex; $1 and \1 refer to capture groups
    #[arg(long, value_name = "R", default_value = "", requires = "regex")]
    pub replacement: String,
}

/// Validation policy for the plan
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// What to do when several files map to the same name
    #[arg(long, value_enum)]
    pub collision: Option<CollisionArg>,

    /// Whether --case also changes the extension
    #[arg(long, value_enum)]
    pub case_extension: Option<CaseExtensionArg>,

    /// Allow replacing files that already exist at the target.
    /// With --backup the replaced file is backed up as well.
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute and preview a rename plan without touching any file
    Plan {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        mode: ModeArgs,

        #[command(flatten)]
        mode_options: ModeOptions,

        #[command(flatten)]
        plan: PlanArgs,

        /// Preview format (default from config, else table)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Plan, preview, confirm and apply renames
    Rename {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        mode: ModeArgs,

        #[command(flatten)]
        mode_options: ModeOptions,

        #[command(flatten)]
        plan: PlanArgs,

        /// Show what would happen without renaming anything
        #[arg(long)]
        dry_run: bool,

        /// Copy every file before renaming it
        #[arg(long)]
        backup: bool,

        /// Where backups are written (default .renamer/backups)
        #[arg(long, value_name = "DIR")]
        backup_dir: Option<PathBuf>,

        /// Save an operations log after the run
        #[arg(long, value_enum)]
        save_log: Option<SaveLogArg>,

        /// Preview format shown before the confirmation prompt
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
