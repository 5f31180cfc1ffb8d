use anyhow::{Context, Result};
use renamer_core::{
    plan_operation, rename_operation, ExecuteOptions, FileSink, Level, OutputFormatter,
    PlanRequest, RenameRequest, ReportFormat, Sink, TracingSink,
};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::UsageError;
use crate::OutputFormat;

/// Rename-specific settings, already merged with config defaults
pub struct RenameSettings {
    pub dry_run: bool,
    pub backup: bool,
    pub backup_dir: PathBuf,
    pub save_log: Option<ReportFormat>,
    pub state_dir: PathBuf,
}

fn confirm() -> Result<bool> {
    print!("Proceed with rename? [y/N]: ");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}

fn open_sink(settings: &RenameSettings) -> Result<Box<dyn Sink>> {
    // Dry runs leave no trace on disk
    if settings.dry_run {
        return Ok(Box::new(TracingSink));
    }
    let log_path = settings.state_dir.join("renamer.log");
    let file_sink = FileSink::open(&log_path, Level::Info)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    Ok(Box::new((TracingSink, file_sink)))
}

/// Returns `Ok(false)` when at least one rename failed
pub fn handle_rename(
    request: &PlanRequest,
    settings: &RenameSettings,
    auto_approve: bool,
    output: OutputFormat,
) -> Result<bool> {
    if output == OutputFormat::Json && !auto_approve && !settings.dry_run {
        return Err(UsageError::JsonNeedsApproval.into());
    }

    let mut sink = open_sink(settings)?;
    let (plan, preview) = plan_operation(request, sink.as_mut())?;

    if let Some(preview) = preview {
        print!("{}", preview);
    }

    let nothing_planned = !plan.items().iter().any(|item| item.status().is_planned());
    if nothing_planned && output == OutputFormat::Summary {
        println!("Nothing to rename.");
        return Ok(true);
    }

    if !nothing_planned && !settings.dry_run && !auto_approve && !confirm()? {
        println!("Operation cancelled.");
        return Ok(true);
    }

    let rename_request = RenameRequest {
        execute: ExecuteOptions {
            backup: settings.backup,
            backup_dir: settings.backup_dir.clone(),
            dry_run: settings.dry_run,
        },
        save_log: settings.save_log,
        log_dir: settings.state_dir.join("logs"),
    };
    let result = rename_operation(plan, &rename_request, sink.as_mut())?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    Ok(result.succeeded())
}
